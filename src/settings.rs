#![cfg(feature = "std")]
//! Connection parameters read at startup.
//!
//! The file holds three lines: transport protocol, host, port.

use std::fmt;
use std::path::Path;

/// Default location of the connection file, relative to the working directory.
pub const DEFAULT_CONFIG_PATH: &str = "config";

/// The only transport the client speaks.
pub const SUPPORTED_PROTOCOL: &str = "tcp";

/// Problems with the connection file. All of them are fatal at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// File could not be read.
    Io(String),
    /// Fewer than three lines.
    Missing(&'static str),
    /// Line present but blank.
    Empty(&'static str),
    /// Port is not a number in `1..=65535`.
    InvalidPort(String),
    /// Protocol other than `tcp`.
    UnsupportedProtocol(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "cannot read connection config: {}", e),
            ConfigError::Missing(field) => write!(f, "connection config is missing the {} line", field),
            ConfigError::Empty(field) => write!(f, "connection config has an empty {}", field),
            ConfigError::InvalidPort(p) => write!(f, "invalid port {:?}", p),
            ConfigError::UnsupportedProtocol(p) => {
                write!(f, "unsupported protocol {:?} (only {} is supported)", p, SUPPORTED_PROTOCOL)
            }
        }
    }
}

impl std::error::Error for ConfigError {}

/// Where to find the authority.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectionConfig {
    pub protocol: String,
    pub host: String,
    pub port: u16,
}

impl ConnectionConfig {
    pub fn parse(text: &str) -> Result<Self, ConfigError> {
        let mut lines = text.lines().map(str::trim);
        let mut field = |name: &'static str| -> Result<String, ConfigError> {
            match lines.next() {
                None => Err(ConfigError::Missing(name)),
                Some("") => Err(ConfigError::Empty(name)),
                Some(value) => Ok(value.to_string()),
            }
        };
        let protocol = field("protocol")?;
        let host = field("host")?;
        let port_text = field("port")?;

        if !protocol.eq_ignore_ascii_case(SUPPORTED_PROTOCOL) {
            return Err(ConfigError::UnsupportedProtocol(protocol));
        }
        let port = match port_text.parse::<u16>() {
            Ok(p) if p != 0 => p,
            _ => return Err(ConfigError::InvalidPort(port_text)),
        };
        Ok(Self {
            protocol: protocol.to_ascii_lowercase(),
            host,
            port,
        })
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::Io(format!("{}: {}", path.as_ref().display(), e)))?;
        Self::parse(&text)
    }

    /// `host:port`, ready for `TcpStream::connect`.
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
