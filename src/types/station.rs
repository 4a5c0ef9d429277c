//! Defines the identifier of a Weather Underground personal weather station.

use crate::error::PwsError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A validated personal weather station identifier (e.g., "KCAJAMES3").
///
/// Station ids are non-empty ASCII alphanumeric strings. Weather Underground treats
/// them case-insensitively, so they are normalised to upper case.
///
/// # Examples
///
/// ```
/// use pws_history::StationId;
///
/// let station: StationId = "kcajames3".parse().unwrap();
/// assert_eq!(station.as_str(), "KCAJAMES3");
/// assert!("".parse::<StationId>().is_err());
/// assert!("KCA JAMES".parse::<StationId>().is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct StationId(String);

impl StationId {
    pub fn new(id: &str) -> Result<Self, PwsError> {
        let trimmed = id.trim();
        if trimmed.is_empty() || !trimmed.chars().all(|c| c.is_ascii_alphanumeric()) {
            return Err(PwsError::InvalidStation(id.to_string()));
        }
        Ok(Self(trimmed.to_ascii_uppercase()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for StationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for StationId {
    type Err = PwsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<String> for StationId {
    type Error = PwsError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(&value)
    }
}

impl From<StationId> for String {
    fn from(value: StationId) -> Self {
        value.0
    }
}

impl AsRef<str> for StationId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
