//! JSON reformatting: beautify or minify without touching content.

use serde::{Deserialize, Serialize};
use serde_json::ser::PrettyFormatter;
use serde_json::{Serializer, Value};

use super::TextError;

/// Output whitespace style for [`format_json`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Indent {
    /// Single-line output with no inter-token whitespace.
    Minify,
    /// Pretty-printed with this many spaces per nesting level.
    Spaces(u8),
}

impl Default for Indent {
    fn default() -> Self {
        Indent::Spaces(2)
    }
}

impl Indent {
    /// Deepest indent honored, the same cap `JSON.stringify` applies.
    pub const MAX_SPACES: u8 = 10;

    /// Map a spaces-per-level count to a style; zero means minify.
    pub fn from_spaces(n: u8) -> Self {
        if n == 0 {
            Indent::Minify
        } else {
            Indent::Spaces(n.min(Self::MAX_SPACES))
        }
    }
}

/// Parse `input` as JSON and re-serialize it in the requested style.
///
/// Object key order is preserved, so beautify and minify are
/// content-neutral: only whitespace changes. Numbers are re-emitted by the
/// serializer and keep their values.
///
/// # Errors
///
/// Returns `TextError::InvalidJson` carrying the parser's message (with
/// line and column) when `input` is not valid JSON.
pub fn format_json(input: &str, indent: Indent) -> Result<String, TextError> {
    let value: Value = serde_json::from_str(input)?;

    let spaces = match indent {
        Indent::Minify => return Ok(serde_json::to_string(&value)?),
        Indent::Spaces(n) => n.min(Indent::MAX_SPACES),
    };

    let pad = " ".repeat(spaces as usize);
    let mut out = Vec::new();
    let mut ser = Serializer::with_formatter(&mut out, PrettyFormatter::with_indent(pad.as_bytes()));
    value.serialize(&mut ser)?;
    Ok(String::from_utf8(out)?)
}
