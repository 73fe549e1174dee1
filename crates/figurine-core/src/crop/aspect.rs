use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::EditorError;

/// Output-shape presets offered for the crop frame.
#[derive(Clone, Copy, Debug, PartialEq, Default, Serialize, Deserialize)]
pub enum AspectPreset {
    #[default]
    Square,
    Portrait,
    Landscape,
    Widescreen,
    Story,
    Custom(f32),
}

impl AspectPreset {
    pub const ALL: &[Self] = &[
        Self::Square,
        Self::Portrait,
        Self::Landscape,
        Self::Widescreen,
        Self::Story,
    ];

    /// Width over height.
    pub fn ratio(&self) -> f32 {
        match self {
            Self::Square => 1.0,
            Self::Portrait => 3.0 / 4.0,
            Self::Landscape => 4.0 / 3.0,
            Self::Widescreen => 16.0 / 9.0,
            Self::Story => 9.0 / 16.0,
            Self::Custom(r) => *r,
        }
    }
}

/// True for ratios a crop frame can be locked to.
pub fn is_valid_ratio(ratio: f32) -> bool {
    ratio.is_finite() && ratio > 0.0
}

impl fmt::Display for AspectPreset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Square => write!(f, "1:1"),
            Self::Portrait => write!(f, "3:4"),
            Self::Landscape => write!(f, "4:3"),
            Self::Widescreen => write!(f, "16:9"),
            Self::Story => write!(f, "9:16"),
            Self::Custom(r) => write!(f, "{r:.3}"),
        }
    }
}

impl FromStr for AspectPreset {
    type Err = EditorError;

    /// Accepts a preset name (`square`, `widescreen`, ...), `W:H`, or a
    /// plain width/height ratio.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let named = match trimmed.to_ascii_lowercase().as_str() {
            "square" => Some(Self::Square),
            "portrait" => Some(Self::Portrait),
            "landscape" => Some(Self::Landscape),
            "widescreen" => Some(Self::Widescreen),
            "story" => Some(Self::Story),
            _ => None,
        };
        if let Some(preset) = named {
            return Ok(preset);
        }

        let ratio = match trimmed.split_once(':') {
            Some((w, h)) => {
                let w: f32 = w.trim().parse().map_err(|_| invalid(s))?;
                let h: f32 = h.trim().parse().map_err(|_| invalid(s))?;
                w / h
            }
            None => trimmed.parse().map_err(|_| invalid(s))?,
        };

        if !(ratio.is_finite() && ratio > 0.0) {
            return Err(invalid(s));
        }

        Ok(Self::ALL
            .iter()
            .copied()
            .find(|p| (p.ratio() - ratio).abs() < 1e-6)
            .unwrap_or(Self::Custom(ratio)))
    }
}

fn invalid(s: &str) -> EditorError {
    EditorError::InvalidAspect(format!("'{s}' is not a preset name, W:H pair, or positive ratio"))
}
