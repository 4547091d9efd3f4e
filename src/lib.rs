//! # sorictl
//!
//! Command-line client for a SORI host:
//! - JSON commands in length-prefixed frames over TCP
//! - Two wire generations (2-byte and 4-byte little-endian prefixes)
//! - One fresh connection per request/response exchange
//! - Follow mode polling a status query on a fixed interval
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                  Runner (single shot / follow)               │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │ Command → Message
//! ┌─────────────────────▼───────────────────────────────────────┐
//! │                     Message Codec                            │
//! │              (JSON request / opaque text reply)              │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │ bytes
//! ┌─────────────────────▼───────────────────────────────────────┐
//! │                  Transport Session                           │
//! │        connect → write frame → read frame → close            │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │
//!                       ▼
//!               ┌───────────────┐
//!               │ Frame Protocol│
//!               │  (W = 2 | 4)  │
//!               └───────────────┘
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod config;

pub mod protocol;
pub mod network;
pub mod follow;
pub mod runner;

// =============================================================================
// Public API Re-exports
// =============================================================================

pub use error::{ClientError, Result};
pub use config::{ClientConfig, Generation, ResponseEncoding};
pub use network::Client;
pub use follow::Follower;

// =============================================================================
// Version Info
// =============================================================================

/// Current version of sorictl
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
