use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

const UNITS: [(char, u64); 5] = [
    ('T', 1 << 40),
    ('G', 1 << 30),
    ('M', 1 << 20),
    ('K', 1 << 10),
    ('B', 1),
];

/// A size in bytes, written as a number followed by one of `B`, `K`, `M`,
/// `G` or `T` (binary multiples), e.g. `100M`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ByteSize(u64);

impl ByteSize {
    pub const fn new(bytes: u64) -> Self {
        Self(bytes)
    }

    pub const fn mebibytes(n: u64) -> Self {
        Self(n << 20)
    }

    pub const fn bytes(self) -> u64 {
        self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ByteSizeError {
    #[error("invalid size string")]
    TooShort,
    #[error("unknown unit '{0}'")]
    UnknownUnit(char),
    #[error("size '{0}' is not a number")]
    NotANumber(String),
    #[error("size '{0}' does not fit in 64 bits")]
    Overflow(String),
}

impl FromStr for ByteSize {
    type Err = ByteSizeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.chars();
        let unit = chars.next_back().ok_or(ByteSizeError::TooShort)?;
        let digits = chars.as_str();
        if digits.is_empty() {
            return Err(ByteSizeError::TooShort);
        }

        let multiplier = UNITS
            .iter()
            .find(|(symbol, _)| *symbol == unit)
            .map(|(_, multiplier)| *multiplier)
            .ok_or(ByteSizeError::UnknownUnit(unit))?;

        let n: u64 = digits
            .parse()
            .map_err(|_| ByteSizeError::NotANumber(digits.to_string()))?;

        n.checked_mul(multiplier)
            .map(Self)
            .ok_or_else(|| ByteSizeError::Overflow(s.to_string()))
    }
}

impl TryFrom<String> for ByteSize {
    type Error = ByteSizeError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<ByteSize> for String {
    fn from(value: ByteSize) -> Self {
        value.to_string()
    }
}

impl fmt::Display for ByteSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Largest unit that divides evenly; zero prints as 0B.
        let (symbol, multiplier) = UNITS
            .iter()
            .find(|(_, multiplier)| self.0 != 0 && self.0 % multiplier == 0)
            .copied()
            .unwrap_or(('B', 1));
        write!(f, "{}{}", self.0 / multiplier, symbol)
    }
}
