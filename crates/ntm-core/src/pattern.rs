//! JavaScript-style regular expressions used as rule `test` conditions.
//!
//! A [`Pattern`] keeps the original `source` and `flags` next to the compiled
//! [`regex::Regex`], because rules are located by pattern identity: two
//! patterns are the same when their `/source/flags` serializations are.

use std::fmt;

use regex::{Regex, RegexBuilder};

use ntm_util::errors::NtmError;

use crate::bundler::Condition;

/// Flags in the order JavaScript serializes them.
const FLAG_ORDER: &str = "dgimsuvy";

/// A compiled pattern with its JavaScript `source` and `flags`.
#[derive(Clone)]
pub struct Pattern {
    source: String,
    flags: String,
    regex: Regex,
}

impl Pattern {
    /// Compile `source` with `flags`.
    ///
    /// Flags are canonicalized to JavaScript order. `i`, `m` and `s` affect
    /// matching; the other valid flags are kept for identity only. Unknown or
    /// repeated flags are rejected.
    pub fn new(source: &str, flags: &str) -> Result<Self, NtmError> {
        let flags = canonical_flags(flags)?;
        let source = if source.is_empty() {
            "(?:)".to_string()
        } else {
            source.to_string()
        };

        let regex = RegexBuilder::new(&source)
            .case_insensitive(flags.contains('i'))
            .multi_line(flags.contains('m'))
            .dot_matches_new_line(flags.contains('s'))
            .build()
            .map_err(|e| NtmError::Config {
                message: format!("invalid pattern /{source}/{flags}: {e}"),
            })?;

        Ok(Self {
            source,
            flags,
            regex,
        })
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn flags(&self) -> &str {
        &self.flags
    }

    pub fn is_match(&self, haystack: &str) -> bool {
        self.regex.is_match(haystack)
    }
}

fn canonical_flags(flags: &str) -> Result<String, NtmError> {
    let mut seen = Vec::with_capacity(flags.len());
    for flag in flags.chars() {
        if !FLAG_ORDER.contains(flag) {
            return Err(NtmError::Config {
                message: format!("invalid pattern flag '{flag}'"),
            });
        }
        if seen.contains(&flag) {
            return Err(NtmError::Config {
                message: format!("duplicate pattern flag '{flag}'"),
            });
        }
        seen.push(flag);
    }
    Ok(FLAG_ORDER.chars().filter(|f| seen.contains(f)).collect())
}

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "/{}/{}", self.source, self.flags)
    }
}

impl fmt::Debug for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Pattern({self})")
    }
}

impl PartialEq for Pattern {
    fn eq(&self, other: &Self) -> bool {
        self.to_string() == other.to_string()
    }
}

impl Eq for Pattern {}

/// Two conditions are regex-equal when both are patterns and their
/// serializations (source and flags) are identical. Any other pairing,
/// including two equal paths, is not.
pub fn regex_equal(a: &Condition, b: &Condition) -> bool {
    match (a, b) {
        (Condition::Pattern(x), Condition::Pattern(y)) => x.to_string() == y.to_string(),
        _ => false,
    }
}
