//! Protocol Module
//!
//! Defines the wire protocol for talking to a SORI host.
//!
//! ## Frame Format
//! ```text
//! ┌──────────────────┬─────────────────────────────┐
//! │ Len (W, LE)      │         Payload             │
//! └──────────────────┴─────────────────────────────┘
//! ```
//!
//! `W` is 2 bytes on generation 1 hosts and 4 bytes on generation 2 hosts.
//! There is no negotiation: both ends must agree on `W` in advance.
//!
//! ### Request Payload
//! Compact JSON object, string values only, `operation` first:
//! ```text
//! {"operation":"set","key":"threshold","value":"0.5"}
//! ```
//!
//! ### Response Payload
//! Opaque UTF-8 text rendered by the server. Some generation 2 responses
//! carry space-separated decimal character codes instead.

mod message;
mod command;
mod codec;
mod frame;

pub use message::{Message, OPERATION_KEY};
pub use command::{Command, Invocation, FOLLOW};
pub use codec::{encode, decode, decode_char_codes};
pub use frame::{Frame, FrameVariant, read_frame, write_frame};
