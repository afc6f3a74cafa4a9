//! Typed driver identifier.
//!
//! Driver IDs are stable and system-generated; the CPF is user-supplied and
//! can be corrected, so it must never double as the record key. IDs use the
//! prefixed format `drv_{ulid}`: the prefix makes the resource type obvious
//! in logs and the ULID keeps IDs time-ordered.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;
use ulid::Ulid;

/// Errors that can occur when parsing a driver ID.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DriverIdError {
    /// The ID string is empty.
    #[error("driver ID cannot be empty")]
    Empty,

    /// The ID is missing the underscore separator.
    #[error("driver ID missing underscore separator")]
    MissingSeparator,

    /// The ID has the wrong prefix.
    #[error("invalid driver ID prefix: expected '{expected}', got '{actual}'")]
    InvalidPrefix {
        expected: &'static str,
        actual: String,
    },

    /// The ULID portion of the ID is invalid.
    #[error("invalid ULID: {0}")]
    InvalidUlid(String),
}

/// A typed identifier for a driver record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DriverId(Ulid);

impl DriverId {
    /// The prefix for driver IDs.
    pub const PREFIX: &'static str = "drv";

    /// Creates a new ID with a fresh ULID.
    #[must_use]
    pub fn new() -> Self {
        Self(Ulid::new())
    }

    /// Returns the underlying ULID.
    #[must_use]
    pub const fn ulid(&self) -> Ulid {
        self.0
    }

    /// Parses an ID from a string in the format `drv_{ulid}`.
    pub fn parse(s: &str) -> Result<Self, DriverIdError> {
        if s.is_empty() {
            return Err(DriverIdError::Empty);
        }

        let Some((prefix, ulid_str)) = s.split_once('_') else {
            return Err(DriverIdError::MissingSeparator);
        };

        if prefix != Self::PREFIX {
            return Err(DriverIdError::InvalidPrefix {
                expected: Self::PREFIX,
                actual: prefix.to_string(),
            });
        }

        let ulid = ulid_str
            .parse::<Ulid>()
            .map_err(|e| DriverIdError::InvalidUlid(e.to_string()))?;

        Ok(Self(ulid))
    }
}

impl Default for DriverId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for DriverId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}_{}", Self::PREFIX, self.0)
    }
}

impl FromStr for DriverId {
    type Err = DriverIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl serde::Serialize for DriverId {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> serde::Deserialize<'de> for DriverId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Self::parse(&s).map_err(serde::de::Error::custom)
    }
}
