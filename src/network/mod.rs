//! Network Module
//!
//! TCP transport for request/response exchanges.
//!
//! ## Architecture
//! - One connection per exchange, never reused
//! - Connect, write one frame, read one frame, close
//! - Blocking I/O on the calling thread, bounded by configured timeouts

mod connector;
mod session;
mod client;

pub use connector::{Connector, TcpConnector};
pub use session::{Session, SessionState};
pub use client::Client;
