//! Message codec
//!
//! Requests are structured JSON; responses are opaque text the server has
//! already rendered, so they are never parsed as JSON here.

use crate::error::{ClientError, Result};
use super::Message;

/// Encode a message as compact UTF-8 JSON
pub fn encode(message: &Message) -> Result<Vec<u8>> {
    let bytes = serde_json::to_vec(message)?;
    Ok(bytes)
}

/// Decode a response payload into text, verbatim
pub fn decode(payload: Vec<u8>) -> Result<String> {
    let text = String::from_utf8(payload)?;
    Ok(text)
}

/// Decode a response of space-separated decimal character codes
///
/// `"72 105"` decodes to `"Hi"`. Any whitespace separates codes.
pub fn decode_char_codes(text: &str) -> Result<String> {
    text.split_whitespace()
        .map(|token| -> Result<char> {
            let code = token.parse::<u32>().map_err(|_| {
                ClientError::Decoding(format!("not a character code: {:?}", token))
            })?;
            char::from_u32(code).ok_or_else(|| {
                ClientError::Decoding(format!("invalid character code: {}", code))
            })
        })
        .collect()
}
