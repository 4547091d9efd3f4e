//! Client
//!
//! Runs complete exchanges: encode, one session, decode.

use crate::config::{ClientConfig, ResponseEncoding};
use crate::error::Result;
use crate::protocol::{decode, decode_char_codes, encode, Command, Message};
use super::{Connector, Session, TcpConnector};

/// Issues requests to one server, one connection per request
pub struct Client<C: Connector = TcpConnector> {
    config: ClientConfig,
    connector: C,
}

impl Client<TcpConnector> {
    /// Create a TCP client for the configured endpoint
    pub fn new(config: ClientConfig) -> Self {
        let connector = TcpConnector::new(&config);
        Self { config, connector }
    }
}

impl<C: Connector> Client<C> {
    /// Create a client over a custom connector
    pub fn with_connector(config: ClientConfig, connector: C) -> Self {
        Self { config, connector }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Send a command and return the display text of the response
    pub fn execute(&self, command: &Command) -> Result<String> {
        self.exchange(&command.to_message())
    }

    /// Send a message and return the display text of the response
    ///
    /// Encoding happens before connecting, so an unencodable message never
    /// touches the network.
    pub fn exchange(&self, message: &Message) -> Result<String> {
        let request = encode(message)?;
        tracing::debug!("Exchanging '{}' with {}", message.operation(), self.connector.peer());

        let response = self.exchange_raw(&request)?;
        let text = decode(response)?;

        match self.config.response_encoding {
            ResponseEncoding::Plain => Ok(text),
            ResponseEncoding::CharCodes => decode_char_codes(&text),
        }
    }

    /// One full exchange of raw payloads over a fresh session
    pub fn exchange_raw(&self, request: &[u8]) -> Result<Vec<u8>> {
        let mut session = Session::new(&self.connector);
        session.connect()?;
        session.send(self.config.request_frame, request)?;
        session.receive(self.config.response_frame)
    }
}
