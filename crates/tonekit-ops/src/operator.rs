//! Operator identities and adjustment requests.
//!
//! An [`Operator`] names *which* adjustment is running (the key the engine
//! coalesces on). An [`Adjustment`] is one request: the operator plus its
//! slider values.
//!
//! Adjustments parse from short strings, as used by the CLI:
//!
//! | Text                 | Adjustment                                   |
//! |----------------------|----------------------------------------------|
//! | `grayscale`          | [`Adjustment::Grayscale`]                    |
//! | `invert`             | [`Adjustment::Invert`]                       |
//! | `brightness=20`      | [`Adjustment::Brightness`]                   |
//! | `contrast=-35.5`     | [`Adjustment::Contrast`]                     |
//! | `balance=10,0,-5`    | [`Adjustment::ColorBalance`]                 |
//! | `restore`            | [`Adjustment::RestoreOrigin`]                |

use std::fmt;
use std::str::FromStr;

use crate::{OpsError, OpsResult};

/// Identity of an adjustment operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operator {
    /// Rec.601 luma to all three channels.
    Grayscale,
    /// `255 - k` on every color channel.
    Invert,
    /// Additive shift of `level * 0.9`.
    Brightness,
    /// Stretch around the mean luma.
    Contrast,
    /// Per-channel shift with lightness preserved.
    ColorBalance,
    /// Copy of the origin snapshot.
    RestoreOrigin,
}

impl Operator {
    /// History title recorded for this operator.
    pub const fn title(self) -> &'static str {
        match self {
            Self::Grayscale => "Grayscale",
            Self::Invert => "Invert",
            Self::Brightness => "Brightness",
            Self::Contrast => "Contrast",
            Self::ColorBalance => "Color Balance",
            Self::RestoreOrigin => "Restore Original",
        }
    }

    /// One-shot operators have no continuous parameter and always take a
    /// fresh baseline, even when repeated.
    pub const fn is_one_shot(self) -> bool {
        matches!(self, Self::Grayscale | Self::Invert)
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.title())
    }
}

/// One adjustment request.
///
/// Levels are nominally in [-100, 100]; values outside are clamped.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Adjustment {
    /// Convert to grayscale.
    Grayscale,
    /// Invert colors.
    Invert,
    /// Brightness level.
    Brightness(f64),
    /// Contrast level.
    Contrast(f64),
    /// Per-channel color balance levels.
    ColorBalance {
        /// Red level
        red: f64,
        /// Green level
        green: f64,
        /// Blue level
        blue: f64,
    },
    /// Return to the origin snapshot.
    RestoreOrigin,
}

impl Adjustment {
    /// Operator this request runs under.
    pub const fn operator(&self) -> Operator {
        match self {
            Self::Grayscale => Operator::Grayscale,
            Self::Invert => Operator::Invert,
            Self::Brightness(_) => Operator::Brightness,
            Self::Contrast(_) => Operator::Contrast,
            Self::ColorBalance { .. } => Operator::ColorBalance,
            Self::RestoreOrigin => Operator::RestoreOrigin,
        }
    }
}

fn invalid(input: &str, reason: impl Into<String>) -> OpsError {
    OpsError::InvalidAdjustment {
        input: input.to_string(),
        reason: reason.into(),
    }
}

fn parse_level(input: &str, value: &str) -> OpsResult<f64> {
    value
        .trim()
        .parse::<f64>()
        .map_err(|e| invalid(input, format!("bad level '{}': {}", value.trim(), e)))
}

impl FromStr for Adjustment {
    type Err = OpsError;

    fn from_str(s: &str) -> OpsResult<Self> {
        let text = s.trim();
        let (name, value) = match text.split_once('=') {
            Some((name, value)) => (name.trim().to_ascii_lowercase(), Some(value)),
            None => (text.to_ascii_lowercase(), None),
        };

        match (name.as_str(), value) {
            ("grayscale" | "greyscale" | "gray" | "grey", None) => Ok(Self::Grayscale),
            ("invert", None) => Ok(Self::Invert),
            ("restore", None) => Ok(Self::RestoreOrigin),
            ("brightness", Some(v)) => Ok(Self::Brightness(parse_level(s, v)?)),
            ("contrast", Some(v)) => Ok(Self::Contrast(parse_level(s, v)?)),
            ("balance" | "color-balance", Some(v)) => {
                let parts: Vec<&str> = v.split(',').collect();
                if parts.len() != 3 {
                    return Err(invalid(
                        s,
                        format!("expected 3 values (R,G,B), got {}", parts.len()),
                    ));
                }
                Ok(Self::ColorBalance {
                    red: parse_level(s, parts[0])?,
                    green: parse_level(s, parts[1])?,
                    blue: parse_level(s, parts[2])?,
                })
            }
            ("grayscale" | "greyscale" | "gray" | "grey" | "invert" | "restore", Some(_)) => {
                Err(invalid(s, "operator takes no value"))
            }
            ("brightness" | "contrast" | "balance" | "color-balance", None) => {
                Err(invalid(s, "missing '=<value>'"))
            }
            _ => Err(invalid(s, "unknown operator")),
        }
    }
}
