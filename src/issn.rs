//! ISSN token recognition.
//!
//! An ISSN is an 8-character serial identifier, `DDDD-DDDC` where the check
//! character `C` is a digit or `X`. Matching here is purely syntactic:
//! 4 digits, optional hyphen, 3 digits, then a digit or `X`/`x`. No checksum
//! is verified - accreditation lists contain plenty of ISSNs that would fail
//! one, and the DOAJ lookup is the real arbiter.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;
use std::fmt;

static ISSN_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d{4}-?\d{3}[\dxX]$").expect("Invalid ISSN pattern"));

/// Whether a token is a syntactically valid ISSN.
///
/// Anchored over the entire token; case-insensitive only for the trailing
/// check character. The caller is responsible for any trimming.
pub fn is_issn_token(token: &str) -> bool {
    ISSN_REGEX.is_match(token)
}

/// A recognized ISSN.
///
/// Identity is the raw string with the check character folded to uppercase,
/// so `1234-567x` and `1234-567X` are the same value. Hyphenated and
/// unhyphenated spellings stay distinct - the source data decides.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Issn(String);

impl Issn {
    /// Parse a token into an ISSN, trimming surrounding whitespace.
    ///
    /// Returns `None` when the trimmed token does not match the pattern.
    pub fn parse(token: &str) -> Option<Self> {
        let trimmed = token.trim();
        if !is_issn_token(trimmed) {
            return None;
        }
        let mut value = trimmed.to_string();
        if value.ends_with('x') {
            value.pop();
            value.push('X');
        }
        Some(Issn(value))
    }

    /// The ISSN as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Issn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
