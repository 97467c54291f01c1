//! Receives DHCPv4 datagrams on a UDP socket and logs what they decode to.
//!
//! Nothing is ever answered; the inspector only listens.

use std::net::{Ipv4Addr, SocketAddr, SocketAddrV4};

use socket2::{Domain, Protocol, Socket, Type};
use tokio::net::UdpSocket;
use tracing::{error, info, warn};

use crate::config::Config;
use crate::error::{Error, Result};
use crate::packet::DhcpPacket;
use crate::registry::OptionRegistry;

/// Decodes one datagram and attaches its receive metadata.
///
/// # Errors
///
/// Same as [`DhcpPacket::parse_with`]. A packet returned inside
/// [`Error::TruncatedOptions`] has no metadata attached.
pub fn inspect_datagram(
    data: &[u8],
    source: SocketAddrV4,
    local: SocketAddrV4,
    registry: &OptionRegistry,
) -> Result<DhcpPacket> {
    let mut packet = DhcpPacket::parse_with(data, registry)?;
    attach_metadata(&mut packet, source, local);
    Ok(packet)
}

fn attach_metadata(packet: &mut DhcpPacket, source: SocketAddrV4, local: SocketAddrV4) {
    packet.set_remote_addr(source);
    packet.set_local_addr(local);
    packet.stamp();
}

/// Listens on the configured address and logs every message received.
pub struct Inspector {
    socket: UdpSocket,
    registry: OptionRegistry,
    local_addr: SocketAddrV4,
    interface_index: Option<u32>,
    max_datagram_size: usize,
}

impl Inspector {
    /// Binds the socket described by `config`.
    ///
    /// Must be called from within a Tokio runtime.
    ///
    /// # Errors
    ///
    /// [`Error::Socket`] if the socket can't be created or bound (port 67
    /// usually needs elevated privileges), [`Error::InvalidConfig`] if the
    /// option definitions are invalid.
    pub fn bind(config: &Config) -> Result<Self> {
        let registry = config.registry()?;
        let socket = Self::create_socket(config)?;

        let local_addr = match socket.local_addr()? {
            SocketAddr::V4(addr) => addr,
            SocketAddr::V6(addr) => {
                return Err(Error::Socket(format!("Unexpected IPv6 address {}", addr)));
            }
        };

        info!(
            "Inspecting DHCPv4 traffic on {} ({} option definitions)",
            local_addr,
            registry.len()
        );

        Ok(Self {
            socket,
            registry,
            local_addr,
            interface_index: config.interface_index,
            max_datagram_size: config.max_datagram_size,
        })
    }

    fn create_socket(config: &Config) -> Result<UdpSocket> {
        let socket = Socket::new(Domain::IPV4, Type::DGRAM, Some(Protocol::UDP))
            .map_err(|error| Error::Socket(format!("Failed to create socket: {}", error)))?;

        socket
            .set_reuse_address(true)
            .map_err(|error| Error::Socket(format!("Failed to set SO_REUSEADDR: {}", error)))?;

        socket
            .set_broadcast(true)
            .map_err(|error| Error::Socket(format!("Failed to set SO_BROADCAST: {}", error)))?;

        socket
            .set_nonblocking(true)
            .map_err(|error| Error::Socket(format!("Failed to set non-blocking: {}", error)))?;

        let bind_addr = config.bind_address;
        socket.bind(&bind_addr.into()).map_err(|error| {
            Error::Socket(format!("Failed to bind to {}: {}", bind_addr, error))
        })?;

        let std_socket: std::net::UdpSocket = socket.into();
        let tokio_socket = UdpSocket::from_std(std_socket).map_err(|error| {
            Error::Socket(format!("Failed to convert to tokio socket: {}", error))
        })?;

        Ok(tokio_socket)
    }

    pub fn local_addr(&self) -> SocketAddrV4 {
        self.local_addr
    }

    pub fn registry(&self) -> &OptionRegistry {
        &self.registry
    }

    /// Decodes a datagram received from `source`.
    ///
    /// A message whose vendor suboptions are truncated is still returned,
    /// with the options decoded before the damage, after logging a warning.
    pub fn inspect(&self, data: &[u8], source: SocketAddr) -> Result<DhcpPacket> {
        let source = match source {
            SocketAddr::V4(addr) => addr,
            SocketAddr::V6(addr) => SocketAddrV4::new(
                addr.ip().to_ipv4_mapped().unwrap_or(Ipv4Addr::UNSPECIFIED),
                addr.port(),
            ),
        };

        let mut packet = match inspect_datagram(data, source, self.local_addr, &self.registry) {
            Ok(packet) => packet,
            Err(Error::TruncatedOptions {
                code,
                reason,
                partial,
            }) => {
                let mut packet = *partial;
                attach_metadata(&mut packet, source, self.local_addr);
                warn!(
                    "{}: options from {} on dropped ({})",
                    packet.label(),
                    code,
                    reason
                );
                packet
            }
            Err(error) => return Err(error),
        };

        if let Some(index) = self.interface_index {
            packet.set_iface_index(index);
        }
        Ok(packet)
    }

    /// Receives and logs messages until `count` have been inspected, or
    /// forever if `count` is `None`. Returns the number inspected.
    pub async fn run(&self, count: Option<usize>, verbose: bool) -> Result<usize> {
        let mut buffer = vec![0u8; self.max_datagram_size];
        let mut inspected = 0;

        info!("Inspector ready and listening");

        while count.is_none_or(|count| inspected < count) {
            match self.socket.recv_from(&mut buffer).await {
                Ok((size, source)) => match self.inspect(&buffer[..size], source) {
                    Ok(packet) => {
                        info!("{} {} from {}", packet.name(), packet.label(), source);
                        if verbose {
                            info!("{}", packet.to_text());
                        }
                        inspected += 1;
                    }
                    Err(error) => {
                        warn!("Dropping {} bytes from {}: {}", size, source, error);
                    }
                },
                Err(error) => {
                    error!("Error receiving packet: {}", error);
                }
            }
        }

        Ok(inspected)
    }
}
