//! Placeholder generation and value collection.
//!
//! A [`Placeholders`] collector is created once per render. Every call to
//! [`Placeholders::bind`] records the value and returns the marker to splice
//! into the SQL text, so the Nth marker in the output always refers to the
//! Nth recorded value.

use crate::error::FillError;
use crate::value::Value;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// How placeholder markers are spelled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PlaceholderStyle {
    /// `$1, $2, ...` (PostgreSQL)
    #[default]
    Positional,
    /// `?` for every value (MySQL, SQLite)
    Anonymous,
}

impl PlaceholderStyle {
    /// Canonical name, as accepted by [`FromStr`].
    pub fn as_str(&self) -> &'static str {
        match self {
            PlaceholderStyle::Positional => "positional",
            PlaceholderStyle::Anonymous => "anonymous",
        }
    }
}

impl fmt::Display for PlaceholderStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PlaceholderStyle {
    type Err = FillError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "$" | "positional" => Ok(PlaceholderStyle::Positional),
            "?" | "anonymous" => Ok(PlaceholderStyle::Anonymous),
            other => Err(FillError::Config(format!(
                "unknown placeholder style '{other}' (expected \"positional\" or \"anonymous\")"
            ))),
        }
    }
}

impl Serialize for PlaceholderStyle {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for PlaceholderStyle {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// Ordered collector that hands out placeholder markers.
///
/// Not synchronized: one instance belongs to exactly one render.
#[derive(Debug, Clone, Default)]
pub struct Placeholders {
    style: PlaceholderStyle,
    values: Vec<Value>,
}

impl Placeholders {
    /// Create an empty collector with the given marker style.
    pub fn new(style: PlaceholderStyle) -> Self {
        Self {
            style,
            values: Vec::new(),
        }
    }

    /// Collector producing `$1, $2, ...`.
    pub fn positional() -> Self {
        Self::new(PlaceholderStyle::Positional)
    }

    /// Collector producing `?`.
    pub fn anonymous() -> Self {
        Self::new(PlaceholderStyle::Anonymous)
    }

    pub fn style(&self) -> PlaceholderStyle {
        self.style
    }

    /// Record `value` and return its marker.
    pub fn bind(&mut self, value: impl Into<Value>) -> String {
        self.values.push(value.into());
        match self.style {
            PlaceholderStyle::Positional => format!("${}", self.values.len()),
            PlaceholderStyle::Anonymous => "?".to_string(),
        }
    }

    /// Values recorded so far, in bind order.
    pub fn values(&self) -> &[Value] {
        &self.values
    }

    /// Number of values recorded so far.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Consume the collector and return the recorded values.
    pub fn into_values(self) -> Vec<Value> {
        self.values
    }
}
