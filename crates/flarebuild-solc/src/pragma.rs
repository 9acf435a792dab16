//! `pragma solidity` parsing and matching.
//!
//! Solidity writes version requirements with spaces (`>=0.6.0 <0.8.0`) and
//! treats a bare version as exact; the `semver` crate wants commas and treats
//! a bare version as caret. [`Pragma::parse`] normalizes between the two.

use once_cell::sync::Lazy;
use regex::Regex;
use semver::{Version, VersionReq};
use thiserror::Error;

static PRAGMA_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"pragma\s+solidity\s+(?<req>[^;]+);").unwrap());

static COMPARATOR_GAP: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"([0-9*xX])\s+([\^~><=0-9])").unwrap());

#[derive(Debug, Error)]
#[error("invalid solidity pragma: {0}")]
pub struct PragmaError(pub String);

/// A contract's declared `pragma solidity` requirement.
#[derive(Debug, Clone, PartialEq)]
pub struct Pragma(VersionReq);

impl Pragma {
    /// Parse a bare requirement such as `^0.8.17`, `0.5.17`, or
    /// `>=0.6.0 <0.8.0`.
    pub fn parse(s: &str) -> Result<Self, PragmaError> {
        let normalized = COMPARATOR_GAP.replace_all(s.trim(), "${1}, ${2}");
        let comparators: Vec<String> = normalized
            .split(',')
            .map(str::trim)
            .map(|c| {
                // Solidity semantics: a comparator without an operator is exact.
                if c.starts_with(|ch: char| ch.is_ascii_digit()) {
                    format!("={c}")
                } else {
                    c.to_string()
                }
            })
            .collect();
        let req = VersionReq::parse(&comparators.join(", "))
            .map_err(|_| PragmaError(s.to_string()))?;
        Ok(Self(req))
    }

    /// Extract the first `pragma solidity` declaration from contract source.
    pub fn from_source(source: &str) -> Result<Self, PragmaError> {
        let caps = PRAGMA_REGEX
            .captures(source)
            .ok_or_else(|| PragmaError("missing `pragma solidity` declaration".to_string()))?;
        Self::parse(caps.name("req").map(|m| m.as_str()).unwrap_or_default())
    }

    pub fn matches(&self, version: &Version) -> bool {
        self.0.matches(version)
    }
}

impl std::str::FromStr for Pragma {
    type Err = PragmaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Pragma::parse(s)
    }
}

impl std::fmt::Display for Pragma {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
