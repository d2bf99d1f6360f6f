//! `W:H` aspect ratios, as used for blank canvases.
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

#[derive(Copy, Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct Aspect {
    pub width: u32,
    pub height: u32,
}

impl Aspect {
    /// Parses exactly two colon-separated positive integers.
    pub fn parse(s: &str) -> Result<Self> {
        let invalid = || Error::InvalidAspect(s.to_string());
        let mut parts = s.split(':');
        let (Some(w), Some(h), None) = (parts.next(), parts.next(), parts.next()) else {
            return Err(invalid());
        };
        let width: u32 = w.trim().parse().map_err(|_| invalid())?;
        let height: u32 = h.trim().parse().map_err(|_| invalid())?;
        if width == 0 || height == 0 {
            return Err(invalid());
        }
        Ok(Aspect { width, height })
    }

    /// `floor(w * rate) x floor(h * rate)`.
    pub fn to_size(&self, rate: f64) -> (u32, u32) {
        (
            (self.width as f64 * rate) as u32,
            (self.height as f64 * rate) as u32,
        )
    }
}

impl FromStr for Aspect {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Aspect::parse(s)
    }
}

impl std::fmt::Display for Aspect {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.width, self.height)
    }
}
