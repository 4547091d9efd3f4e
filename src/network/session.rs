//! Transport Session
//!
//! Owns one connection for exactly one request/response exchange.
//!
//! ```text
//! Disconnected → Connecting → Connected → Sending → AwaitingResponse → Closed
//! ```
//!
//! Any failure jumps straight to `Closed`. A closed session cannot be
//! reopened; each exchange gets a new one.

use crate::error::{ClientError, Result};
use crate::protocol::{read_frame, write_frame, FrameVariant};
use super::Connector;

/// Lifecycle of a session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Disconnected,
    Connecting,
    Connected,
    Sending,
    AwaitingResponse,
    Closed,
}

/// A single-use connection
pub struct Session<'a, C: Connector> {
    connector: &'a C,
    stream: Option<C::Stream>,
    state: SessionState,
    peer: String,
}

impl<'a, C: Connector> Session<'a, C> {
    /// Create a disconnected session
    pub fn new(connector: &'a C) -> Self {
        Self {
            connector,
            stream: None,
            state: SessionState::Disconnected,
            peer: connector.peer(),
        }
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Open the connection
    pub fn connect(&mut self) -> Result<()> {
        self.expect_state(SessionState::Disconnected)?;
        self.transition(SessionState::Connecting);

        match self.connector.connect() {
            Ok(stream) => {
                self.stream = Some(stream);
                self.transition(SessionState::Connected);
                Ok(())
            }
            Err(e) => {
                self.close();
                Err(e)
            }
        }
    }

    /// Write the request frame
    pub fn send(&mut self, variant: FrameVariant, payload: &[u8]) -> Result<()> {
        self.expect_state(SessionState::Connected)?;
        self.transition(SessionState::Sending);

        let outcome = match self.stream.as_mut() {
            Some(stream) => write_frame(stream, variant, payload),
            None => Err(self.missing_stream()),
        };

        if let Err(e) = outcome {
            self.close();
            return Err(e);
        }

        tracing::debug!("Sent {} byte request to {}", payload.len(), self.peer);
        Ok(())
    }

    /// Block for the response frame, then close regardless of outcome
    pub fn receive(&mut self, variant: FrameVariant) -> Result<Vec<u8>> {
        self.expect_state(SessionState::Sending)?;
        self.transition(SessionState::AwaitingResponse);

        let outcome = match self.stream.as_mut() {
            Some(stream) => read_frame(stream, variant),
            None => Err(self.missing_stream()),
        };
        self.close();

        let payload = outcome?;
        tracing::debug!("Received {} byte response from {}", payload.len(), self.peer);
        Ok(payload)
    }

    /// Tear the connection down. Idempotent.
    pub fn close(&mut self) {
        if let Some(stream) = self.stream.take() {
            self.connector.disconnect(stream);
        }
        if self.state != SessionState::Closed {
            self.transition(SessionState::Closed);
        }
    }

    fn transition(&mut self, next: SessionState) {
        tracing::trace!("Session {}: {:?} -> {:?}", self.peer, self.state, next);
        self.state = next;
    }

    fn expect_state(&self, expected: SessionState) -> Result<()> {
        if self.state == expected {
            Ok(())
        } else {
            Err(ClientError::InvalidState {
                expected,
                actual: self.state,
            })
        }
    }

    /// A session past `Connected` always holds a stream
    fn missing_stream(&self) -> ClientError {
        ClientError::InvalidState {
            expected: SessionState::Connected,
            actual: self.state,
        }
    }
}

impl<C: Connector> Drop for Session<'_, C> {
    fn drop(&mut self) {
        self.close();
    }
}
