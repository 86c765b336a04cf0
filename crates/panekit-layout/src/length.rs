//! Track sizing modes.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::{validate_length, LayoutError};

/// How a grid track (row or column) is sized.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GridLength {
    /// Fixed length in device-independent units.
    Absolute(f32),
    /// Sized to the largest content placed in the track.
    Auto,
    /// Weighted share of the space left after fixed and auto tracks.
    Star(f32),
}

impl Default for GridLength {
    fn default() -> Self {
        GridLength::Star(1.0)
    }
}

impl GridLength {
    /// A validated fixed length.
    pub fn absolute(value: f32) -> Result<Self, LayoutError> {
        Ok(GridLength::Absolute(validate_length("GridLength.Absolute", value)?))
    }

    /// A validated star weight.
    pub fn star(weight: f32) -> Result<Self, LayoutError> {
        Ok(GridLength::Star(validate_length("GridLength.Star", weight)?))
    }

    /// Check the payload of a directly constructed value.
    pub fn validate(&self) -> Result<(), LayoutError> {
        match *self {
            GridLength::Absolute(v) => validate_length("GridLength.Absolute", v).map(|_| ()),
            GridLength::Star(w) => validate_length("GridLength.Star", w).map(|_| ()),
            GridLength::Auto => Ok(()),
        }
    }

    pub fn is_absolute(&self) -> bool {
        matches!(self, GridLength::Absolute(_))
    }

    pub fn is_auto(&self) -> bool {
        matches!(self, GridLength::Auto)
    }

    pub fn is_star(&self) -> bool {
        matches!(self, GridLength::Star(_))
    }

    /// Star weight, or 0 for non-star tracks.
    pub fn star_weight(&self) -> f32 {
        match *self {
            GridLength::Star(w) => w,
            _ => 0.0,
        }
    }
}

impl fmt::Display for GridLength {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GridLength::Absolute(v) => write!(f, "{v}"),
            GridLength::Auto => write!(f, "Auto"),
            GridLength::Star(w) if *w == 1.0 => write!(f, "*"),
            GridLength::Star(w) => write!(f, "{w}*"),
        }
    }
}

/// Parses `"Auto"`, `"*"`, `"2.5*"` and plain numbers such as `"120"`.
impl FromStr for GridLength {
    type Err = LayoutError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.eq_ignore_ascii_case("auto") {
            return Ok(GridLength::Auto);
        }
        if let Some(weight) = s.strip_suffix('*') {
            if weight.is_empty() {
                return Ok(GridLength::Star(1.0));
            }
            let weight = weight.trim().parse::<f32>().unwrap_or(f32::NAN);
            return GridLength::star(weight);
        }
        GridLength::absolute(s.parse::<f32>().unwrap_or(f32::NAN))
    }
}
