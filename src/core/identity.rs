//! Sheet identity: prefixed ULIDs
//!
//! Every stackup sheet carries a `STK-<ULID>` identifier. ULIDs sort
//! lexicographically by creation time, so sheet filenames list in
//! chronological order.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;
use ulid::Ulid;

/// Prefix carried by every sheet ID
pub const SHEET_PREFIX: &str = "STK";

/// Errors from parsing a sheet ID string
#[derive(Debug, Error)]
pub enum IdParseError {
    #[error("invalid sheet id '{0}': expected the form STK-<ULID>")]
    BadPrefix(String),
    #[error("invalid ULID in sheet id '{0}'")]
    BadUlid(String),
}

/// Identifier of a stackup sheet, e.g. `STK-01JGXW5D2M3N4P5Q6R7S8T9V0W`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SheetId(Ulid);

impl SheetId {
    /// Generate a fresh ID
    pub fn new() -> Self {
        Self(Ulid::new())
    }

    /// Parse the canonical `STK-<ULID>` form
    pub fn parse(s: &str) -> Result<Self, IdParseError> {
        let rest = s
            .strip_prefix(SHEET_PREFIX)
            .and_then(|r| r.strip_prefix('-'))
            .ok_or_else(|| IdParseError::BadPrefix(s.to_string()))?;
        let ulid = Ulid::from_string(rest).map_err(|_| IdParseError::BadUlid(s.to_string()))?;
        Ok(Self(ulid))
    }
}

impl Default for SheetId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for SheetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", SHEET_PREFIX, self.0)
    }
}

impl FromStr for SheetId {
    type Err = IdParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl Serialize for SheetId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for SheetId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Self::parse(&s).map_err(serde::de::Error::custom)
    }
}
