//! Typed CLI argument wrappers.

use crate::error::{EffError, Result};
use std::fmt;
use std::str::FromStr;

/// Type-safe wrapper for a season-ending year (e.g. 2020 for 2019-20).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Season(pub u16);

impl Season {
    pub fn new(year: u16) -> Self {
        Self(year)
    }

    pub fn as_u16(&self) -> u16 {
        self.0
    }
}

impl fmt::Display for Season {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for Season {
    type Err = EffError;

    fn from_str(s: &str) -> Result<Self> {
        Ok(Self(s.parse()?))
    }
}
