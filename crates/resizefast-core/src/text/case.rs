//! Case transforms and text statistics.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::TextError;

/// The four case transforms the text tool offers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CaseStyle {
    /// Everything uppercased.
    Upper,
    /// Everything lowercased.
    Lower,
    /// First letter of each space-separated word uppercased, rest lowered.
    Title,
    /// Lowercased, then capitalized at line starts and after sentences.
    Sentence,
}

impl FromStr for CaseStyle {
    type Err = TextError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "upper" => Ok(CaseStyle::Upper),
            "lower" => Ok(CaseStyle::Lower),
            "title" => Ok(CaseStyle::Title),
            "sentence" => Ok(CaseStyle::Sentence),
            other => Err(TextError::UnknownCaseStyle(other.to_string())),
        }
    }
}

/// Apply a case transform to `text`.
pub fn convert_case(text: &str, style: CaseStyle) -> String {
    match style {
        CaseStyle::Upper => text.to_uppercase(),
        CaseStyle::Lower => text.to_lowercase(),
        CaseStyle::Title => title_case(text),
        CaseStyle::Sentence => sentence_case(text),
    }
}

/// Character and word counts shown under the text area.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextStats {
    /// Unicode scalar count.
    pub characters: usize,
    /// Whitespace-separated word count; zero for blank input.
    pub words: usize,
}

/// Count characters and words in `text`.
pub fn count_text(text: &str) -> TextStats {
    TextStats {
        characters: text.chars().count(),
        words: text.split_whitespace().count(),
    }
}

/// Words are split on single spaces, so runs of spaces survive unchanged.
fn title_case(text: &str) -> String {
    text.split(' ')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first
                    .to_uppercase()
                    .chain(chars.flat_map(|c| c.to_lowercase()))
                    .collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<String>>()
        .join(" ")
}

/// A word character in the sentence scanner: ASCII letters, digits and
/// underscore, mirroring how the tool has always behaved. Accented letters
/// are left alone.
fn is_word_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

fn sentence_case(text: &str) -> String {
    let lowered = text.to_lowercase();
    let mut out = String::with_capacity(lowered.len());

    // A word character is capitalized when it sits at the very start of a
    // line, or when the only characters since the last period are
    // whitespace (at least one). Anything else breaks both conditions.
    let mut at_line_start = true;
    let mut pending_period = false;
    let mut period_then_space = false;

    for ch in lowered.chars() {
        if is_word_char(ch) {
            if at_line_start || period_then_space {
                out.extend(ch.to_uppercase());
            } else {
                out.push(ch);
            }
            at_line_start = false;
            pending_period = false;
            period_then_space = false;
        } else if ch == '\n' {
            if pending_period {
                period_then_space = true;
                pending_period = false;
            }
            at_line_start = true;
            out.push(ch);
        } else if ch.is_whitespace() {
            if pending_period {
                period_then_space = true;
                pending_period = false;
            }
            at_line_start = false;
            out.push(ch);
        } else if ch == '.' {
            pending_period = true;
            period_then_space = false;
            at_line_start = false;
            out.push(ch);
        } else {
            pending_period = false;
            period_then_space = false;
            at_line_start = false;
            out.push(ch);
        }
    }

    out
}
