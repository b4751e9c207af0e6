use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::rng::Rng;
use crate::api::content::CaseMode;
use crate::error::TraceError;

pub const UPPERCASE: [char; 26] = [
    'A', 'B', 'C', 'D', 'E', 'F', 'G', 'H', 'I', 'J', 'K', 'L', 'M', 'N', 'O', 'P', 'Q', 'R',
    'S', 'T', 'U', 'V', 'W', 'X', 'Y', 'Z',
];
pub const LOWERCASE: [char; 26] = [
    'a', 'b', 'c', 'd', 'e', 'f', 'g', 'h', 'i', 'j', 'k', 'l', 'm', 'n', 'o', 'p', 'q', 'r',
    's', 't', 'u', 'v', 'w', 'x', 'y', 'z',
];
pub const DIGITS: [char; 10] = ['0', '1', '2', '3', '4', '5', '6', '7', '8', '9'];

/// What the learner practices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Letters,
    Numbers,
    Words,
}

impl Category {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Letters => "letters",
            Self::Numbers => "numbers",
            Self::Words => "words",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = TraceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "letters" => Ok(Self::Letters),
            "numbers" => Ok(Self::Numbers),
            "words" => Ok(Self::Words),
            _ => Err(TraceError::UnknownCategory(s.to_string())),
        }
    }
}

/// Order in which characters are presented.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    /// Fixed alphabetical / numeric order, wrapping around.
    #[default]
    Sequence,
    /// Random, never the same character twice in a row.
    Random,
}

impl Mode {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Sequence => "sequence",
            Self::Random => "random",
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Mode {
    type Err = TraceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "sequence" => Ok(Self::Sequence),
            "random" => Ok(Self::Random),
            _ => Err(TraceError::UnknownMode(s.to_string())),
        }
    }
}

/// The character table for a category and case. Both-case practice uses the
/// uppercase table as its base; digits ignore case. Words have no table.
pub fn characters(category: Category, case: CaseMode) -> &'static [char] {
    match (category, case) {
        (Category::Numbers, _) => &DIGITS,
        (Category::Words, _) => &[],
        (Category::Letters, CaseMode::Lowercase) => &LOWERCASE,
        (Category::Letters, CaseMode::Uppercase | CaseMode::Both) => &UPPERCASE,
    }
}

/// The character after `current`, wrapping at the end. An unknown `current`
/// restarts at the first entry.
pub fn next_character(current: char, category: Category, case: CaseMode) -> Option<char> {
    let table = characters(category, case);
    let next = match table.iter().position(|&c| c == current) {
        Some(i) => (i + 1) % table.len(),
        None => 0,
    };
    table.get(next).copied()
}

/// A random character, never equal to `exclude` when the table offers another choice.
pub fn random_character(
    rng: &mut Rng,
    category: Category,
    case: CaseMode,
    exclude: Option<char>,
) -> Option<char> {
    let table = characters(category, case);
    if table.is_empty() {
        return None;
    }
    match exclude {
        Some(ex) if table.len() > 1 && table.contains(&ex) => {
            let candidates: Vec<char> = table.iter().copied().filter(|&c| c != ex).collect();
            Some(candidates[rng.next_index(candidates.len())])
        }
        _ => Some(table[rng.next_index(table.len())]),
    }
}
