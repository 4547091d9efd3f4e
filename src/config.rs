//! Configuration for sorictl
//!
//! Endpoint, protocol generation and timing as an explicit value, with the
//! host defaults as the starting point.

use std::fmt;
use std::time::Duration;

use crate::error::{ClientError, Result};
use crate::protocol::FrameVariant;

/// Default host the SORI server listens on
pub const DEFAULT_HOST: &str = "localhost";

/// Default port the SORI server listens on
pub const DEFAULT_PORT: u16 = 38539;

/// Default delay between follow-mode polls
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(5);

/// Main configuration for a client
#[derive(Debug, Clone)]
pub struct ClientConfig {
    // -------------------------------------------------------------------------
    // Endpoint Configuration
    // -------------------------------------------------------------------------
    /// Server host name or address
    pub host: String,

    /// Server TCP port
    pub port: u16,

    // -------------------------------------------------------------------------
    // Protocol Configuration
    // -------------------------------------------------------------------------
    /// Server generation: selects command shapes and the follow operation
    pub generation: Generation,

    /// Length prefix used for outgoing request frames
    pub request_frame: FrameVariant,

    /// Length prefix expected on incoming response frames
    pub response_frame: FrameVariant,

    /// How response payload text is turned into display text
    pub response_encoding: ResponseEncoding,

    // -------------------------------------------------------------------------
    // Timing Configuration
    // -------------------------------------------------------------------------
    /// Delay between follow-mode polls
    pub poll_interval: Duration,

    /// Connect timeout (milliseconds, 0 = none)
    pub connect_timeout_ms: u64,

    /// Response read timeout (milliseconds, 0 = none)
    pub read_timeout_ms: u64,

    /// Request write timeout (milliseconds, 0 = none)
    pub write_timeout_ms: u64,
}

/// Server generation
///
/// Generation 1 hosts speak 2-byte frames, generation 2 hosts 4-byte frames.
/// Nothing on the wire tells them apart.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Generation {
    One,
    Two,
}

impl Generation {
    /// Frame variant deployed with this generation
    pub fn frame_variant(self) -> FrameVariant {
        match self {
            Generation::One => FrameVariant::Short,
            Generation::Two => FrameVariant::Long,
        }
    }

    /// Operation issued on every follow-mode cycle
    pub fn status_operation(self) -> &'static str {
        match self {
            Generation::One => "getLastSnapshot",
            Generation::Two => "recentStats",
        }
    }
}

impl TryFrom<u8> for Generation {
    type Error = ClientError;

    fn try_from(value: u8) -> Result<Self> {
        match value {
            1 => Ok(Generation::One),
            2 => Ok(Generation::Two),
            other => Err(ClientError::Config(format!(
                "unknown generation {} (expected 1 or 2)",
                other
            ))),
        }
    }
}

impl fmt::Display for Generation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Generation::One => write!(f, "1"),
            Generation::Two => write!(f, "2"),
        }
    }
}

/// Response display encoding
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseEncoding {
    /// UTF-8 text shown verbatim
    Plain,

    /// Space-separated decimal character codes
    CharCodes,
}

impl Default for ClientConfig {
    fn default() -> Self {
        let generation = Generation::One;
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            generation,
            request_frame: generation.frame_variant(),
            response_frame: generation.frame_variant(),
            response_encoding: ResponseEncoding::Plain,
            poll_interval: DEFAULT_POLL_INTERVAL,
            connect_timeout_ms: 5000,
            read_timeout_ms: 30000,
            write_timeout_ms: 5000,
        }
    }
}

impl ClientConfig {
    /// Create a new config builder
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::default()
    }

    /// `host:port` string used for connecting and logging
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn connect_timeout(&self) -> Option<Duration> {
        non_zero_millis(self.connect_timeout_ms)
    }

    pub fn read_timeout(&self) -> Option<Duration> {
        non_zero_millis(self.read_timeout_ms)
    }

    pub fn write_timeout(&self) -> Option<Duration> {
        non_zero_millis(self.write_timeout_ms)
    }
}

fn non_zero_millis(ms: u64) -> Option<Duration> {
    if ms > 0 {
        Some(Duration::from_millis(ms))
    } else {
        None
    }
}

/// Builder for ClientConfig
#[derive(Default)]
pub struct ConfigBuilder {
    config: ClientConfig,
    request_frame: Option<FrameVariant>,
    response_frame: Option<FrameVariant>,
}

impl ConfigBuilder {
    /// Set the server host
    pub fn host(mut self, host: impl Into<String>) -> Self {
        self.config.host = host.into();
        self
    }

    /// Set the server port
    pub fn port(mut self, port: u16) -> Self {
        self.config.port = port;
        self
    }

    /// Set the server generation (frame variants follow unless overridden)
    pub fn generation(mut self, generation: Generation) -> Self {
        self.config.generation = generation;
        self
    }

    /// Override the request frame variant
    pub fn request_frame(mut self, variant: FrameVariant) -> Self {
        self.request_frame = Some(variant);
        self
    }

    /// Override the response frame variant
    pub fn response_frame(mut self, variant: FrameVariant) -> Self {
        self.response_frame = Some(variant);
        self
    }

    /// Set how responses are decoded for display
    pub fn response_encoding(mut self, encoding: ResponseEncoding) -> Self {
        self.config.response_encoding = encoding;
        self
    }

    /// Set the follow-mode poll interval
    pub fn poll_interval(mut self, interval: Duration) -> Self {
        self.config.poll_interval = interval;
        self
    }

    /// Set the connect timeout (in milliseconds)
    pub fn connect_timeout_ms(mut self, ms: u64) -> Self {
        self.config.connect_timeout_ms = ms;
        self
    }

    /// Set the read timeout (in milliseconds)
    pub fn read_timeout_ms(mut self, ms: u64) -> Self {
        self.config.read_timeout_ms = ms;
        self
    }

    /// Set the write timeout (in milliseconds)
    pub fn write_timeout_ms(mut self, ms: u64) -> Self {
        self.config.write_timeout_ms = ms;
        self
    }

    pub fn build(mut self) -> ClientConfig {
        let default_variant = self.config.generation.frame_variant();
        self.config.request_frame = self.request_frame.unwrap_or(default_variant);
        self.config.response_frame = self.response_frame.unwrap_or(default_variant);
        self.config
    }
}
