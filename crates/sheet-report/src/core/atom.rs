//! Atoms: the `sheet:index` identity of one sprite.
//!
//! Static sheets spell the index as `0x`-prefixed hex, animated sheets as a
//! plain decimal frame number. Atoms are used as URL fragments, duplicate
//! group members and link targets.

use std::fmt;

use crate::api::types::SheetKind;
use crate::error::AtomParseError;

/// One sprite occurrence on a named sheet.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Atom {
    sheet: String,
    kind: SheetKind,
    index: u32,
}

impl Atom {
    pub fn new(sheet: impl Into<String>, kind: SheetKind, index: u32) -> Self {
        Self {
            sheet: sheet.into(),
            kind,
            index,
        }
    }

    pub fn sheet(&self) -> &str {
        &self.sheet
    }

    pub fn kind(&self) -> SheetKind {
        self.kind
    }

    pub fn index(&self) -> u32 {
        self.index
    }

    /// Parse `sheet:index`. `kind_of` resolves a sheet name to its kind, or
    /// None when the sheet is unknown.
    pub fn parse(
        text: &str,
        kind_of: impl Fn(&str) -> Option<SheetKind>,
    ) -> Result<Self, AtomParseError> {
        let (sheet, index_text) = text
            .split_once(':')
            .ok_or(AtomParseError::MissingSeparator)?;
        if sheet.is_empty() {
            return Err(AtomParseError::EmptySheet);
        }
        let kind = kind_of(sheet).ok_or_else(|| AtomParseError::UnknownSheet(sheet.to_string()))?;
        let index = parse_index(index_text)
            .ok_or_else(|| AtomParseError::InvalidIndex(index_text.to_string()))?;
        Ok(Self::new(sheet, kind, index))
    }

    /// The URL fragment that links to this atom, including the leading `#`.
    pub fn to_hash(&self) -> String {
        format!("#{}", self)
    }
}

impl fmt::Display for Atom {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.sheet, self.kind.format_index(self.index))
    }
}

/// Strip the leading `#` of a URL fragment and require a non-empty index part.
/// Returns None for fragments that cannot name an atom at all.
pub fn strip_hash(hash: &str) -> Option<&str> {
    let body = hash.strip_prefix('#')?;
    match body.split_once(':') {
        Some((sheet, index)) if !sheet.is_empty() && !index.is_empty() => Some(body),
        _ => None,
    }
}

/// Parse a sprite index the way a browser's `Number()` reads an integer:
/// surrounding whitespace is ignored, `0x`/`0o`/`0b` literals are accepted,
/// an empty string is 0. Negative, fractional and out-of-range values fail.
pub fn parse_index(text: &str) -> Option<u32> {
    let text = text.trim();
    if text.is_empty() {
        return Some(0);
    }

    let radix_literal = |prefix: [&str; 2], radix: u32| {
        prefix
            .iter()
            .find_map(|p| text.strip_prefix(p))
            .map(|digits| {
                if digits.is_empty() || !digits.chars().all(|c| c.is_digit(radix)) {
                    None
                } else {
                    u32::from_str_radix(digits, radix).ok()
                }
            })
    };

    if let Some(index) = radix_literal(["0x", "0X"], 16) {
        return index;
    }
    if let Some(index) = radix_literal(["0o", "0O"], 8) {
        return index;
    }
    if let Some(index) = radix_literal(["0b", "0B"], 2) {
        return index;
    }

    if let Ok(index) = text.parse::<u32>() {
        return Some(index);
    }

    // Forms like "5.0" or "1e2" still denote integers
    let value: f64 = text.parse().ok()?;
    let is_integer = value.is_finite() && value.fract() == 0.0;
    if is_integer && value >= 0.0 && value <= u32::MAX as f64 {
        Some(value as u32)
    } else {
        None
    }
}
