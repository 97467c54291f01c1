use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::net::{Ipv4Addr, SocketAddrV4};
use std::path::Path;

use crate::error::{Error, Result};
use crate::header::HEADER_LEN;
use crate::packet::DHCP_SERVER_PORT;
use crate::registry::{OptionKind, OptionRegistry, OptionSpace};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Address the inspector listens on.
    pub bind_address: SocketAddrV4,
    /// Largest datagram the inspector accepts.
    pub max_datagram_size: usize,
    /// Interface index recorded on every inspected message. It doesn't
    /// restrict which interfaces the socket receives from.
    pub interface_index: Option<u32>,
    /// Definitions added on top of the standard ones.
    pub option_definitions: Vec<OptionDefinition>,
}

/// Declares how one option code decodes.
///
/// Without `vendor_id` the code is a top-level DHCPv4 option; with it, a
/// suboption of that vendor's option 125.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OptionDefinition {
    pub name: String,
    pub code: u8,
    pub kind: OptionKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vendor_id: Option<u32>,
}

impl OptionDefinition {
    pub fn space(&self) -> OptionSpace {
        self.vendor_id
            .map_or(OptionSpace::Dhcp4, OptionSpace::Vendor)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bind_address: SocketAddrV4::new(Ipv4Addr::UNSPECIFIED, DHCP_SERVER_PORT),
            max_datagram_size: 1500,
            interface_index: None,
            option_definitions: Vec::new(),
        }
    }
}

impl Config {
    pub fn load_or_create<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        if path.exists() {
            let content = std::fs::read_to_string(path)?;
            let config: Config = serde_json::from_str(&content)?;
            config.validate()?;
            Ok(config)
        } else {
            let config = Config::default();
            config.save(path)?;
            Ok(config)
        }
    }

    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        if self.max_datagram_size < HEADER_LEN {
            return Err(Error::InvalidConfig(format!(
                "max_datagram_size must be at least {}",
                HEADER_LEN
            )));
        }

        let mut seen = HashSet::new();
        for definition in &self.option_definitions {
            if definition.name.is_empty() {
                return Err(Error::InvalidConfig(format!(
                    "option definition for code {} has no name",
                    definition.code
                )));
            }
            if !seen.insert((definition.space(), definition.code)) {
                return Err(Error::InvalidConfig(format!(
                    "option {} defined twice in {}",
                    definition.code,
                    definition.space()
                )));
            }
        }

        self.registry().map(|_| ())
    }

    /// Builds the option registry: standard definitions plus the
    /// configured ones, which take precedence.
    pub fn registry(&self) -> Result<OptionRegistry> {
        let mut registry = OptionRegistry::default();
        for definition in &self.option_definitions {
            registry.define(definition.space(), definition.code, definition.kind)?;
        }
        Ok(registry)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn definition(code: u8, kind: OptionKind, vendor_id: Option<u32>) -> OptionDefinition {
        OptionDefinition {
            name: format!("option-{}", code),
            code,
            kind,
            vendor_id,
        }
    }

    #[test]
    fn test_default_config_is_valid() {
        let config = Config::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.bind_address.port(), 67);
    }

    #[test]
    fn test_registry_applies_definitions() {
        let config = Config {
            option_definitions: vec![
                definition(224, OptionKind::String, None),
                definition(5, OptionKind::Uint32, Some(4491)),
            ],
            ..Default::default()
        };
        let registry = config.registry().unwrap();
        assert_eq!(registry.kind(OptionSpace::Dhcp4, 224), OptionKind::String);
        assert_eq!(registry.kind(OptionSpace::Vendor(4491), 5), OptionKind::Uint32);
        assert_eq!(registry.kind(OptionSpace::Dhcp4, 12), OptionKind::String);
    }

    #[test]
    fn test_duplicate_definition() {
        let config = Config {
            option_definitions: vec![
                definition(224, OptionKind::String, None),
                definition(224, OptionKind::Binary, None),
            ],
            ..Default::default()
        };
        assert!(config.validate().is_err());

        // Same code in different spaces is fine.
        let config = Config {
            option_definitions: vec![
                definition(224, OptionKind::String, None),
                definition(224, OptionKind::Binary, Some(9)),
            ],
            ..Default::default()
        };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_invalid_definitions() {
        for bad in [
            definition(0, OptionKind::Binary, None),
            definition(255, OptionKind::Binary, None),
            definition(3, OptionKind::Vendor, Some(9)),
        ] {
            let config = Config {
                option_definitions: vec![bad],
                ..Default::default()
            };
            assert!(matches!(config.validate(), Err(Error::InvalidConfig(_))));
        }

        let config = Config {
            option_definitions: vec![OptionDefinition {
                name: String::new(),
                ..definition(224, OptionKind::Binary, None)
            }],
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_small_datagram_size() {
        let config = Config {
            max_datagram_size: 100,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_json_format() {
        let json = r#"{
            "bind_address": "127.0.0.1:6767",
            "max_datagram_size": 1500,
            "interface_index": null,
            "option_definitions": [
                { "name": "site-path", "code": 224, "kind": "string" },
                { "name": "modem-servers", "code": 2, "kind": "ipv4-address-list", "vendor_id": 4491 }
            ]
        }"#;
        let config: Config = serde_json::from_str(json).unwrap();
        assert!(config.validate().is_ok());
        assert_eq!(config.option_definitions[1].space(), OptionSpace::Vendor(4491));

        let saved = serde_json::to_string(&config).unwrap();
        let reloaded: Config = serde_json::from_str(&saved).unwrap();
        assert_eq!(reloaded, config);
    }

    #[test]
    fn test_load_or_create() {
        let path = std::env::temp_dir().join(format!("dhcpcodec-config-{}.json", std::process::id()));
        let _ = std::fs::remove_file(&path);

        let created = Config::load_or_create(&path).unwrap();
        assert!(path.exists());
        let loaded = Config::load_or_create(&path).unwrap();
        assert_eq!(created, loaded);

        let _ = std::fs::remove_file(&path);
    }
}
