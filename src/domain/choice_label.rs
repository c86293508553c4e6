use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// A single uppercase letter A-Z naming one choice of a question.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ChoiceLabel(char);

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("label must be a single letter A-Z, got {0:?}")]
pub struct LabelError(pub String);

impl ChoiceLabel {
    /// Trims and uppercases `raw`, then keeps its first character if it is
    /// a letter A-Z. `" b)"` parses as `B`.
    pub fn parse(raw: &str) -> Result<Self, LabelError> {
        let upper = raw.trim().to_uppercase();
        match upper.chars().next() {
            Some(c) if c.is_ascii_uppercase() => Ok(Self(c)),
            _ => Err(LabelError(raw.to_string())),
        }
    }

    /// Positional label: 0 is `A`, 25 is `Z`.
    pub fn from_index(index: usize) -> Option<Self> {
        u8::try_from(index)
            .ok()
            .filter(|i| *i < 26)
            .map(|i| Self(char::from(b'A' + i)))
    }

    pub fn as_char(&self) -> char {
        self.0
    }
}

impl fmt::Display for ChoiceLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Serialize for ChoiceLabel {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for ChoiceLabel {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Self::parse(&raw).map_err(serde::de::Error::custom)
    }
}
