//! Configuration loading from files and environment.

use crate::{ConfigError, RelayConfig};
use std::path::Path;
use tracing::{debug, info};

/// Configuration loader.
pub struct ConfigLoader;

impl ConfigLoader {
	/// Load configuration from a TOML file.
	pub fn from_file<P: AsRef<Path>>(path: P) -> Result<RelayConfig, ConfigError> {
		let path = path.as_ref();
		info!("Loading configuration from {:?}", path);

		let contents = std::fs::read_to_string(path).map_err(|e| {
			if e.kind() == std::io::ErrorKind::NotFound {
				ConfigError::FileNotFound(path.display().to_string())
			} else {
				ConfigError::IoError(e)
			}
		})?;

		let config = Self::from_toml(&contents)?;
		Self::validate(&config)?;
		Ok(config)
	}

	/// Load from a TOML string.
	pub fn from_toml(contents: &str) -> Result<RelayConfig, ConfigError> {
		toml::from_str(contents).map_err(|e| ConfigError::ParseError(e.to_string()))
	}

	/// Defaults, overlaid with an optional file, then environment overrides.
	pub fn from_env_and_file(file_path: Option<&Path>) -> Result<RelayConfig, ConfigError> {
		let mut config = match file_path {
			Some(path) => Self::from_file(path)?,
			None => RelayConfig::default(),
		};

		Self::apply_env_overrides(&mut config)?;
		Self::validate(&config)?;
		Ok(config)
	}

	fn apply_env_overrides(config: &mut RelayConfig) -> Result<(), ConfigError> {
		if let Ok(url) = std::env::var("RPC_URL") {
			debug!("Overriding RPC URL from environment");
			config.network.rpc_url = url;
		}

		if let Ok(key) = std::env::var("RELAYER_PRIVATE_KEY") {
			if !key.is_empty() {
				debug!("Overriding relayer key from environment");
				config.relayer.private_key = Some(key);
			}
		}

		if let Ok(addr) = std::env::var("SCORE_ORACLE_ADDRESS") {
			if !addr.is_empty() {
				let parsed = addr.parse().map_err(|e| {
					ConfigError::ValidationError(format!("Invalid SCORE_ORACLE_ADDRESS: {}", e))
				})?;
				config.oracle.address = Some(parsed);
			}
		}

		if let Ok(port) = std::env::var("PORT") {
			config.service.port = port
				.parse()
				.map_err(|e| ConfigError::ValidationError(format!("Invalid PORT: {}", e)))?;
		}

		Ok(())
	}

	fn validate(config: &RelayConfig) -> Result<(), ConfigError> {
		let rpc_url = &config.network.rpc_url;
		if !rpc_url.starts_with("http://") && !rpc_url.starts_with("https://") {
			return Err(ConfigError::ValidationError(
				"RPC URL must start with http:// or https://".to_string(),
			));
		}

		if let Some(key) = &config.relayer.private_key {
			let key_without_prefix = key.strip_prefix("0x").unwrap_or(key);

			if key_without_prefix.len() != 64 {
				return Err(ConfigError::ValidationError(
					"Private key must be 64 hex characters (32 bytes)".to_string(),
				));
			}

			if hex::decode(key_without_prefix).is_err() {
				return Err(ConfigError::ValidationError(
					"Private key must be valid hexadecimal".to_string(),
				));
			}
		}

		if config.relayer.confirmation_timeout_secs == 0 {
			return Err(ConfigError::ValidationError(
				"confirmation_timeout_secs must be non-zero".to_string(),
			));
		}

		Ok(())
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use std::io::Write;

	#[test]
	fn test_from_toml_full() {
		let config = ConfigLoader::from_toml(
			r#"
			[service]
			name = "relay-test"
			host = "127.0.0.1"
			port = 4000

			[network]
			rpc_url = "http://localhost:9545"

			[relayer]
			private_key = "0xac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80"
			confirmations = 2
			confirmation_timeout_secs = 60

			[oracle]
			address = "0x1111111111111111111111111111111111111111"
			"#,
		)
		.unwrap();

		assert_eq!(config.service.name, "relay-test");
		assert_eq!(config.service.port, 4000);
		assert_eq!(config.network.rpc_url, "http://localhost:9545");
		assert!(config.relayer.private_key.is_some());
		assert_eq!(config.relayer.confirmations, 2);
		assert!(config.oracle.address.is_some());
	}

	#[test]
	fn test_from_toml_partial_uses_defaults() {
		let config = ConfigLoader::from_toml(
			r#"
			[service]
			port = 8080
			"#,
		)
		.unwrap();

		assert_eq!(config.service.port, 8080);
		assert_eq!(config.service.host, "0.0.0.0");
		assert_eq!(config.network.rpc_url, "http://localhost:8545");
		assert!(config.relayer.private_key.is_none());
	}

	#[test]
	fn test_from_file_rejects_bad_key() {
		let mut file = tempfile::NamedTempFile::new().unwrap();
		write!(
			file,
			r#"
			[relayer]
			private_key = "0xnot-a-key"
			"#
		)
		.unwrap();

		let result = ConfigLoader::from_file(file.path());
		assert!(matches!(result, Err(ConfigError::ValidationError(_))));
	}

	#[test]
	fn test_from_file_rejects_bad_rpc_scheme() {
		let mut file = tempfile::NamedTempFile::new().unwrap();
		write!(
			file,
			r#"
			[network]
			rpc_url = "ws://localhost:8545"
			"#
		)
		.unwrap();

		let result = ConfigLoader::from_file(file.path());
		assert!(matches!(result, Err(ConfigError::ValidationError(_))));
	}

	#[test]
	fn test_missing_file() {
		let result = ConfigLoader::from_file("/nonexistent/relay.toml");
		assert!(matches!(result, Err(ConfigError::FileNotFound(_))));
	}

	#[test]
	fn test_env_overrides() {
		std::env::set_var("RPC_URL", "http://localhost:7777");
		std::env::set_var(
			"RELAYER_PRIVATE_KEY",
			"0xac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80",
		);
		std::env::set_var("PORT", "4444");

		let config = ConfigLoader::from_env_and_file(None).unwrap();

		std::env::remove_var("RPC_URL");
		std::env::remove_var("RELAYER_PRIVATE_KEY");
		std::env::remove_var("PORT");

		assert_eq!(config.network.rpc_url, "http://localhost:7777");
		assert!(config.relayer.private_key.is_some());
		assert_eq!(config.service.port, 4444);
	}
}
