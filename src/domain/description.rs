use serde::{Deserialize, Serialize};
use std::fmt;
use unicode_normalization::UnicodeNormalization;
use unicode_normalization::char::is_combining_mark;

/// Used when neither the caller nor the configuration provide usable text.
pub const FALLBACK_DESCRIPTION: &str = "Thanh toan don hang";

/// Longest order description the gateway accepts.
pub const MAX_DESCRIPTION_LEN: usize = 255;

/// Letters that carry no combining mark under NFD.
fn fold(c: char) -> Option<&'static str> {
    Some(match c {
        'đ' | 'ð' => "d",
        'Đ' | 'Ð' => "D",
        'ł' => "l",
        'Ł' => "L",
        'ø' => "o",
        'Ø' => "O",
        'ß' => "ss",
        'æ' => "ae",
        'Æ' => "AE",
        'œ' => "oe",
        'Œ' => "OE",
        'þ' => "th",
        'Þ' => "TH",
        'ı' => "i",
        _ => return None,
    })
}

/// Decomposes, drops combining marks and folds the remaining Latin letters,
/// so precomposed and decomposed input give the same result.
fn transliterate(raw: &str) -> String {
    let mut folded = String::with_capacity(raw.len());
    for c in raw.nfd().filter(|c| !is_combining_mark(*c)) {
        match fold(c) {
            Some(base) => folded.push_str(base),
            None => folded.push(c),
        }
    }
    folded
}

fn is_allowed(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, ' ' | ':' | '-' | '_' | '.' | ',' | '/')
}

/// Order description (`vnp_OrderInfo`) restricted to the gateway-safe character
/// set `[A-Za-z0-9 :\-_.,/]`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OrderDescription(String);

impl OrderDescription {
    /// Transliterates diacritics, blanks out disallowed characters and collapses
    /// whitespace. Returns `None` if nothing is left.
    pub fn normalize(raw: &str) -> Option<Self> {
        let replaced: String = transliterate(raw)
            .chars()
            .map(|c| if is_allowed(c) { c } else { ' ' })
            .collect();
        let collapsed: String = replaced
            .split_whitespace()
            .collect::<Vec<_>>()
            .join(" ")
            .chars()
            .take(MAX_DESCRIPTION_LEN)
            .collect();
        let trimmed = collapsed.trim_end();
        if trimmed.is_empty() {
            None
        } else {
            Some(Self(trimmed.to_string()))
        }
    }

    /// Tries each candidate in turn, ending at [`FALLBACK_DESCRIPTION`].
    pub fn first_usable<'a>(candidates: impl IntoIterator<Item = &'a str>) -> Self {
        candidates
            .into_iter()
            .find_map(Self::normalize)
            .unwrap_or_else(|| Self(FALLBACK_DESCRIPTION.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for OrderDescription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
