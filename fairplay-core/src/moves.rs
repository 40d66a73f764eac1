use crate::error::{ConfigError, InputError};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

/// Minimum number of moves in a game
pub const MIN_MOVES: usize = 3;

/// Ordered, validated list of distinct move names.
///
/// Always holds an odd number of moves, at least [`MIN_MOVES`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct MoveSet {
    moves: Vec<String>,
}

impl MoveSet {
    /// Validate a list of move names
    pub fn new<S: AsRef<str>>(names: &[S]) -> Result<Self, ConfigError> {
        if names.is_empty() {
            return Err(ConfigError::EmptyConfig);
        }

        if names.len() % 2 == 0 || names.len() < MIN_MOVES {
            return Err(ConfigError::InvalidCount(names.len()));
        }

        let mut seen = HashSet::with_capacity(names.len());
        for name in names {
            if !seen.insert(name.as_ref()) {
                return Err(ConfigError::DuplicateMove(name.as_ref().to_string()));
            }
        }

        Ok(Self {
            moves: names.iter().map(|n| n.as_ref().to_string()).collect(),
        })
    }

    /// Split a whitespace-delimited line of move names and validate it
    pub fn parse(line: &str) -> Result<Self, ConfigError> {
        let names: Vec<&str> = line.split_whitespace().collect();
        Self::new(names.as_slice())
    }

    pub fn len(&self) -> usize {
        self.moves.len()
    }

    pub fn is_empty(&self) -> bool {
        self.moves.is_empty()
    }

    /// Move name by 1-based index
    pub fn name(&self, index: usize) -> Option<&str> {
        index
            .checked_sub(1)
            .and_then(|i| self.moves.get(i))
            .map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.moves.iter().map(String::as_str)
    }

    /// `(1-based index, name)` pairs in order
    pub fn numbered(&self) -> impl Iterator<Item = (usize, &str)> {
        self.iter().enumerate().map(|(i, name)| (i + 1, name))
    }
}

impl fmt::Display for MoveSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.moves.join(" "))
    }
}

impl<'de> Deserialize<'de> for MoveSet {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let names = Vec::<String>::deserialize(deserializer)?;
        MoveSet::new(names.as_slice()).map_err(serde::de::Error::custom)
    }
}

/// A validated human choice for one round
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Choice {
    /// `0`: leave without playing
    Exit,
    /// 1-based move index
    Move(usize),
}

/// Parse a human's choice against a set of `move_count` moves.
///
/// Only plain base-10 digits are accepted; surrounding whitespace is ignored.
pub fn validate_choice(input: &str, move_count: usize) -> Result<Choice, InputError> {
    let input = input.trim();
    if input.is_empty() || !input.bytes().all(|b| b.is_ascii_digit()) {
        return Err(InputError::NotNumeric { max: move_count });
    }

    let out_of_range = || InputError::OutOfRange {
        value: input.to_string(),
        max: move_count,
    };

    // all digits, so a parse failure can only mean overflow
    let value: usize = input.parse().map_err(|_| out_of_range())?;
    match value {
        0 => Ok(Choice::Exit),
        v if v <= move_count => Ok(Choice::Move(v)),
        _ => Err(out_of_range()),
    }
}
