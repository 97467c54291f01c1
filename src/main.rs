use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use dhcpcodec::{Config, DhcpPacket, Error, Inspector, OptionRegistry, Result};

#[derive(Parser)]
#[command(name = "dhcpcodec")]
#[command(author, version, about = "Decode and inspect DHCPv4 messages", long_about = None)]
struct Cli {
    #[arg(short, long, default_value = "config.json")]
    config: PathBuf,

    #[arg(short, long, default_value = "info")]
    log_level: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Decode a hex-encoded message and print it
    Decode { hex: String },
    /// Print the log label of a hex-encoded message
    Label { hex: String },
    /// Listen for DHCPv4 traffic and log every message
    Inspect {
        /// Overrides the configured bind address
        #[arg(short, long)]
        bind: Option<std::net::SocketAddrV4>,
        /// Stop after this many messages
        #[arg(short = 'n', long)]
        count: Option<usize>,
        /// Log the full option listing of each message
        #[arg(short, long)]
        verbose: bool,
    },
    ShowConfig,
}

/// Accepts `0a1b...`, `0a 1b ...` and `0a:1b:...`.
fn decode_hex(input: &str) -> Result<Vec<u8>> {
    let digits: String = input
        .chars()
        .filter(|c| !c.is_whitespace() && *c != ':')
        .collect();
    Ok(hex::decode(digits)?)
}

/// Decodes a message; one whose vendor suboptions are truncated is kept
/// with the options decoded before the damage.
fn decode_message(input: &str, registry: &OptionRegistry) -> Result<DhcpPacket> {
    let data = decode_hex(input)?;
    match DhcpPacket::parse_with(&data, registry) {
        Ok(packet) => Ok(packet),
        Err(Error::TruncatedOptions {
            code,
            reason,
            partial,
        }) => {
            warn!("Options from {} on dropped: {}", code, reason);
            Ok(*partial)
        }
        Err(error) => Err(error),
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&cli.log_level)),
        )
        .init();

    let config = Config::load_or_create(&cli.config)?;

    match cli.command {
        Commands::Decode { hex } => {
            let packet = decode_message(&hex, &config.registry()?)?;
            println!(
                "op={} htype={} hlen={} hops={} secs={} flags=0x{:04x}",
                packet.op(),
                packet.htype(),
                packet.hlen(),
                packet.hops(),
                packet.secs(),
                packet.flags()
            );
            println!(
                "ciaddr={} yiaddr={} siaddr={} giaddr={}",
                packet.ciaddr(),
                packet.yiaddr(),
                packet.siaddr(),
                packet.giaddr()
            );
            println!(
                "sname=\"{}\" file=\"{}\"",
                String::from_utf8_lossy(packet.sname()),
                String::from_utf8_lossy(packet.file())
            );
            println!("{}", packet.to_text());
            Ok(())
        }
        Commands::Label { hex } => {
            let packet = decode_message(&hex, &config.registry()?)?;
            println!("{}", packet.label());
            Ok(())
        }
        Commands::Inspect {
            bind,
            count,
            verbose,
        } => {
            let config = Config {
                bind_address: bind.unwrap_or(config.bind_address),
                ..config
            };
            let inspector = Inspector::bind(&config)?;

            tokio::select! {
                result = inspector.run(count, verbose) => {
                    let inspected = result?;
                    info!("Inspected {} message(s)", inspected);
                    Ok(())
                }
                _ = tokio::signal::ctrl_c() => {
                    info!("Received shutdown signal, stopping inspector...");
                    Ok(())
                }
            }
        }
        Commands::ShowConfig => {
            println!("{}", serde_json::to_string_pretty(&config)?);
            Ok(())
        }
    }
}
