//! Text utilities for ResizeFast.
//!
//! This module provides functionality for:
//! - Base64 encoding and decoding of text and file payloads
//! - Case transforms (upper, lower, title, sentence) with text statistics
//! - JSON reformatting (beautify at a chosen indent, or minify)
//!
//! These back the suite's text tools; unlike the image pipeline they never
//! allocate more than the strings involved, and every transform is a pure
//! function of its input.

use thiserror::Error;

mod base64;
mod case;
mod json;

pub use case::{convert_case, count_text, CaseStyle, TextStats};
pub use json::{format_json, Indent};
pub use self::base64::{decode_base64, encode_base64, strip_data_url_prefix};

/// Errors the text tools can surface.
#[derive(Debug, Error)]
pub enum TextError {
    /// The input is not decodable Base64.
    #[error("Invalid Base64 input: {0}")]
    InvalidBase64(#[from] ::base64::DecodeError),

    /// The Base64 payload decoded fine but is not text.
    #[error("Decoded data is not valid UTF-8 text")]
    NotText(#[from] std::string::FromUtf8Error),

    /// The input is not parseable JSON; the message is shown verbatim in
    /// the UI.
    #[error("Invalid JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),

    /// The case style label is not one of the four supported transforms.
    #[error("Unknown case style: {0:?}")]
    UnknownCaseStyle(String),
}
