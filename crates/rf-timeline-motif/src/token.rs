//! Motif tokens and their label rules.
//!
//! Tokens are shorthand for families of event labels. Matching is always
//! done on the lower-cased token.

use std::fmt;
use std::str::FromStr;

use crate::{MotifError, Result};

/// Number of steps in a motif.
pub const MOTIF_LEN: usize = 3;

/// One step of a motif.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MotifToken {
    raw: String,
    rule: LabelRule,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum LabelRule {
    Prefix(&'static str),
    PrefixWithWidth(&'static str),
    Exact(String),
}

impl MotifToken {
    pub fn new(token: &str) -> Self {
        let lowered = token.trim().to_lowercase();
        let rule = if lowered == "ultra19" {
            LabelRule::Prefix("ultra_")
        } else if let Some(prefix) = beacon_prefix(&lowered) {
            if lowered.starts_with("wifi2") || !lowered.contains("20") {
                LabelRule::Prefix(prefix)
            } else {
                LabelRule::PrefixWithWidth(prefix)
            }
        } else {
            LabelRule::Exact(lowered.clone())
        };
        Self { raw: lowered, rule }
    }

    /// The lower-cased token text.
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// Whether `label` belongs to this token's family.
    pub fn matches(&self, label: &str) -> bool {
        match &self.rule {
            LabelRule::Prefix(prefix) => label.starts_with(prefix),
            LabelRule::PrefixWithWidth(prefix) => {
                label.starts_with(prefix) && label.contains("_20")
            }
            LabelRule::Exact(expected) => label == expected,
        }
    }
}

fn beacon_prefix(token: &str) -> Option<&'static str> {
    if token.starts_with("wifi5") {
        Some("wifi_beacon_5g_")
    } else if token.starts_with("wifi6") {
        Some("wifi_beacon_6g_")
    } else if token.starts_with("wifi2") {
        Some("wifi_beacon_2g4_")
    } else {
        None
    }
}

impl fmt::Display for MotifToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

/// An ordered three-token pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Motif {
    tokens: [MotifToken; MOTIF_LEN],
}

impl Motif {
    /// Build a motif from exactly three tokens.
    pub fn new<S: AsRef<str>>(tokens: &[S]) -> Result<Self> {
        match tokens {
            [a, b, c] => Ok(Self {
                tokens: [
                    MotifToken::new(a.as_ref()),
                    MotifToken::new(b.as_ref()),
                    MotifToken::new(c.as_ref()),
                ],
            }),
            _ => Err(MotifError::TokenCount {
                expected: MOTIF_LEN,
                actual: tokens.len(),
            }),
        }
    }

    /// Parse a comma-separated motif such as `wifi5_20,ultra19,wifi6_20`.
    ///
    /// Empty fields count as tokens, so `a,,b,c` and `a,b,c,` are rejected.
    pub fn parse(text: &str) -> Result<Self> {
        let tokens: Vec<&str> = text.split(',').map(str::trim).collect();
        Self::new(tokens.as_slice())
    }

    pub fn tokens(&self) -> &[MotifToken; MOTIF_LEN] {
        &self.tokens
    }
}

impl FromStr for Motif {
    type Err = MotifError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl fmt::Display for Motif {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [a, b, c] = &self.tokens;
        write!(f, "{a},{b},{c}")
    }
}
