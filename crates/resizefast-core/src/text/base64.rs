//! Base64 text encoding and decoding.
//!
//! Standard alphabet with padding, the same flavor `btoa`/`atob` speak, so
//! output pastes cleanly into data URLs and HTTP headers.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;

use super::TextError;

/// Encode text as Base64 over its UTF-8 bytes.
pub fn encode_base64(text: &str) -> String {
    STANDARD.encode(text.as_bytes())
}

/// Decode Base64 back into text.
///
/// Surrounding whitespace is ignored; the payload must decode to valid
/// UTF-8.
///
/// # Errors
///
/// Returns `TextError::InvalidBase64` for malformed Base64 and
/// `TextError::NotText` when the decoded bytes are not UTF-8.
pub fn decode_base64(input: &str) -> Result<String, TextError> {
    let bytes = STANDARD.decode(input.trim().as_bytes())?;
    Ok(String::from_utf8(bytes)?)
}

/// Extract the Base64 payload from a data URL.
///
/// File uploads arrive as `data:<mime>;base64,<payload>`; everything up to
/// and including the first comma is dropped. Input without a comma is
/// returned unchanged, so plain Base64 passes through.
pub fn strip_data_url_prefix(input: &str) -> &str {
    match input.split_once(',') {
        Some((_, payload)) => payload,
        None => input,
    }
}
