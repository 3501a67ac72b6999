//! Connection configuration
//!
//! Settings are read from TOML. Every key is optional:
//!
//! ```toml
//! # Display to send to (host:port)
//! address = "172.23.42.29:2342"
//!
//! # Local address to bind, default is an ephemeral port
//! bind_address = "0.0.0.0:0"
//!
//! # Compression for bitmap helpers: uncompressed, zlib, bzip2, lzma, zstd
//! compression = "lzma"
//!
//! # Give up on a blocked send after this many milliseconds
//! write_timeout_ms = 500
//!
//! # Serialize but never transmit
//! fake = false
//! ```

use std::fs;
use std::io;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::time::Duration;

use pixmatrix_core::DEFAULT_PORT;
use pixmatrix_hal::TransportConfig;
use pixmatrix_protocol::CompressionCode;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Host of the display on its home network
pub const DEFAULT_HOST: &str = "172.23.42.29";

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The file could not be read
    #[error("could not read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    /// The file is not valid TOML or has unknown keys
    #[error("invalid configuration: {0}")]
    Parse(#[from] toml::de::Error),
    /// An address could not be parsed
    #[error("invalid address {0:?}")]
    InvalidAddress(String),
    /// Sockets reject a zero timeout
    #[error("write_timeout_ms must be greater than zero")]
    ZeroTimeout,
    /// The configured codec is not compiled in
    #[error("compression {0:?} is not enabled in this build")]
    UnsupportedCompression(CompressionCode),
}

/// Settings for opening a [`Connection`](crate::Connection)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DisplayConfig {
    /// Display address as `host:port`
    pub address: String,
    /// Local socket address to bind
    pub bind_address: Option<String>,
    /// Compression used when the connection builds commands itself
    pub compression: CompressionCode,
    /// Send timeout in milliseconds
    pub write_timeout_ms: Option<u64>,
    /// Use a connection that discards frames
    pub fake: bool,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            address: format!("{DEFAULT_HOST}:{DEFAULT_PORT}"),
            bind_address: None,
            compression: CompressionCode::default(),
            write_timeout_ms: None,
            fake: false,
        }
    }
}

impl DisplayConfig {
    /// Parse a TOML document
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Read and parse a TOML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text)
    }

    /// Render as TOML
    pub fn to_toml_string(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }

    /// Transport settings derived from this configuration
    pub fn transport_config(&self) -> Result<TransportConfig, ConfigError> {
        let bind_address = self
            .bind_address
            .as_deref()
            .map(|text| {
                text.parse::<SocketAddr>()
                    .map_err(|_| ConfigError::InvalidAddress(text.to_string()))
            })
            .transpose()?;
        Ok(TransportConfig {
            bind_address,
            write_timeout: self.write_timeout_ms.map(Duration::from_millis),
        })
    }

    fn validate(&self) -> Result<(), ConfigError> {
        // host names are resolved on open, only the shape is checked here
        match self.address.rsplit_once(':') {
            Some((host, port)) if !host.is_empty() && port.parse::<u16>().is_ok() => {}
            _ => return Err(ConfigError::InvalidAddress(self.address.clone())),
        }
        if self.write_timeout_ms == Some(0) {
            return Err(ConfigError::ZeroTimeout);
        }
        if !self.compression.is_available() {
            return Err(ConfigError::UnsupportedCompression(self.compression));
        }
        self.transport_config().map(|_| ())
    }
}
