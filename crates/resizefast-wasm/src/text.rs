//! Text tool WASM bindings.
//!
//! The suite's text tools (Base64, case converter, JSON formatter) share
//! this surface. Every function is a pure transform of its string input;
//! nothing is cached between calls.
//!
//! # Example
//!
//! ```typescript
//! import { base64_encode, convert_case, format_json } from '@resizefast/wasm';
//!
//! base64_encode('hello');                 // 'aGVsbG8='
//! convert_case('hello world', 'title');   // 'Hello World'
//! format_json('{"b":1,"a":2}', 2);        // keeps key order, 2-space indent
//! ```

use resizefast_core::text::{self, CaseStyle, Indent};
use wasm_bindgen::prelude::*;

/// Base64-encode a UTF-8 string.
///
/// Standard alphabet with padding, the output `atob`-compatible decoders
/// expect.
///
/// # Example
///
/// ```typescript
/// base64_encode('hello'); // 'aGVsbG8='
/// ```
#[wasm_bindgen]
pub fn base64_encode(input: &str) -> String {
    text::encode_base64(input)
}

/// Decode Base64 back into a UTF-8 string.
///
/// Surrounding whitespace is tolerated; the payload itself must be clean
/// standard-alphabet Base64.
///
/// # Errors
///
/// Returns an error if the input is not decodable Base64, or decodes to
/// bytes that are not valid UTF-8 text.
///
/// # Example
///
/// ```typescript
/// base64_decode('aGVsbG8='); // 'hello'
/// ```
#[wasm_bindgen]
pub fn base64_decode(input: &str) -> Result<String, JsValue> {
    text::decode_base64(input).map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Strip the `data:...;base64,` prefix from a data URL.
///
/// Used when a file upload arrives as a `FileReader.readAsDataURL` result
/// and only the Base64 payload is wanted. Input without a comma is
/// returned unchanged.
///
/// # Example
///
/// ```typescript
/// base64_from_data_url('data:text/plain;base64,aGVsbG8='); // 'aGVsbG8='
/// ```
#[wasm_bindgen]
pub fn base64_from_data_url(data_url: &str) -> String {
    text::strip_data_url_prefix(data_url).to_string()
}

/// Apply a case transform to text.
///
/// # Arguments
///
/// * `input` - The text to transform
/// * `style` - One of `"upper"`, `"lower"`, `"title"`, `"sentence"`
///
/// # Errors
///
/// Returns an error for an unknown style label.
///
/// # Example
///
/// ```typescript
/// convert_case('hello. world', 'sentence'); // 'Hello. World'
/// ```
#[wasm_bindgen]
pub fn convert_case(input: &str, style: &str) -> Result<String, JsValue> {
    let style = style
        .parse::<CaseStyle>()
        .map_err(|e| JsValue::from_str(&e.to_string()))?;
    Ok(text::convert_case(input, style))
}

/// Count characters and words in text.
///
/// # Returns
///
/// An object `{ characters, words }`: Unicode character count and
/// whitespace-separated word count.
///
/// # Example
///
/// ```typescript
/// count_text('hello world'); // { characters: 11, words: 2 }
/// ```
#[wasm_bindgen]
pub fn count_text(input: &str) -> Result<JsValue, JsValue> {
    serde_wasm_bindgen::to_value(&text::count_text(input))
        .map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Reformat a JSON document.
///
/// Object key order is preserved from the input. Indentation beyond 10
/// spaces is clamped to 10, matching what `JSON.stringify` allows.
///
/// # Arguments
///
/// * `input` - The JSON text to reformat
/// * `spaces` - Indent width per nesting level; 0 minifies
///
/// # Errors
///
/// Returns an error when the input is not valid JSON; the message names
/// the offending line.
///
/// # Example
///
/// ```typescript
/// format_json('{ "a": 1 }', 0); // '{"a":1}'
/// ```
#[wasm_bindgen]
pub fn format_json(input: &str, spaces: u8) -> Result<String, JsValue> {
    text::format_json(input, Indent::from_spaces(spaces))
        .map_err(|e| JsValue::from_str(&e.to_string()))
}
