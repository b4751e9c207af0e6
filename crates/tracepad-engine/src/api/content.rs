use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::TraceError;

/// Which glyph variant(s) a single-character template shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CaseMode {
    #[default]
    Uppercase,
    Lowercase,
    /// Uppercase and lowercase side by side.
    Both,
}

impl CaseMode {
    pub const ALL: [CaseMode; 3] = [Self::Uppercase, Self::Lowercase, Self::Both];

    /// The next mode in the toggle cycle: uppercase → lowercase → both → uppercase.
    pub fn cycle(self) -> Self {
        match self {
            Self::Uppercase => Self::Lowercase,
            Self::Lowercase => Self::Both,
            Self::Both => Self::Uppercase,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Uppercase => "uppercase",
            Self::Lowercase => "lowercase",
            Self::Both => "both",
        }
    }

    /// Re-case a character for display. `Both` keeps the uppercase form as its base.
    pub fn apply(self, ch: char) -> char {
        match self {
            Self::Lowercase => to_lower(ch),
            Self::Uppercase | Self::Both => to_upper(ch),
        }
    }
}

impl fmt::Display for CaseMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CaseMode {
    type Err = TraceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|mode| mode.as_str() == s)
            .ok_or_else(|| TraceError::UnknownCaseMode(s.to_string()))
    }
}

/// Single-char case mapping. Characters whose mapping expands (e.g. 'ß') are left as-is.
pub(crate) fn to_upper(ch: char) -> char {
    let mut upper = ch.to_uppercase();
    match (upper.next(), upper.next()) {
        (Some(c), None) => c,
        _ => ch,
    }
}

pub(crate) fn to_lower(ch: char) -> char {
    let mut lower = ch.to_lowercase();
    match (lower.next(), lower.next()) {
        (Some(c), None) => c,
        _ => ch,
    }
}

/// What the guide layer shows. Exactly one mode is active at a time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum PracticeContent {
    /// A digit or letter with its case mode.
    Character { ch: char, case: CaseMode },
    /// A whole word drawn as one string. Case mode does not apply.
    Word { text: String },
}

impl PracticeContent {
    pub fn character(ch: char, case: CaseMode) -> Self {
        Self::Character { ch, case }
    }

    pub fn word(text: impl Into<String>) -> Self {
        Self::Word { text: text.into() }
    }

    pub fn is_word(&self) -> bool {
        matches!(self, Self::Word { .. })
    }

    /// True when the template is drawn as an uppercase/lowercase pair.
    pub fn is_dual_case(&self) -> bool {
        matches!(self, Self::Character { case: CaseMode::Both, .. })
    }
}
