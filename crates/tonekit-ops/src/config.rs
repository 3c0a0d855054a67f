//! Session configuration.
//!
//! Settings are plain data with serde derives and are read from RON:
//!
//! ```ron
//! (
//!     history_capacity: 25,
//!     histogram_height: 120.0,
//!     contrast_boundary: Reject,
//! )
//! ```
//!
//! Omitted fields take their defaults.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::{OpsError, OpsResult};

/// Default number of history entries kept.
pub const DEFAULT_HISTORY_CAPACITY: usize = 10;

/// Default histogram bar height.
pub const DEFAULT_HISTOGRAM_HEIGHT: f64 = 100.0;

/// Default fraction of the bar height actually used, leaving a top margin.
pub const DEFAULT_HISTOGRAM_HEADROOM: f64 = 0.9;

/// How the contrast curve behaves at level 100, where
/// `1 / (1 - level / 100)` divides by zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ContrastBoundary {
    /// Use the limit of the stretch: a hard threshold at the mean luma.
    #[default]
    Saturate,
    /// Fail with [`OpsError::ContrastSingularity`].
    Reject,
}

/// Tunables for an editing session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Maximum history entries; oldest are evicted first.
    pub history_capacity: usize,
    /// Target height of normalized histogram bars.
    pub histogram_height: f64,
    /// Fraction of `histogram_height` the tallest bar reaches.
    pub histogram_headroom: f64,
    /// Contrast level-100 policy.
    pub contrast_boundary: ContrastBoundary,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            history_capacity: DEFAULT_HISTORY_CAPACITY,
            histogram_height: DEFAULT_HISTOGRAM_HEIGHT,
            histogram_headroom: DEFAULT_HISTOGRAM_HEADROOM,
            contrast_boundary: ContrastBoundary::default(),
        }
    }
}

impl SessionConfig {
    /// Parses and validates a RON document.
    pub fn from_ron_str(text: &str) -> OpsResult<Self> {
        let config: Self =
            ron::from_str(text).map_err(|e| OpsError::InvalidConfig(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Reads, parses and validates a RON file.
    pub fn load<P: AsRef<Path>>(path: P) -> OpsResult<Self> {
        let text = std::fs::read_to_string(path.as_ref())?;
        let config = Self::from_ron_str(&text)?;
        tracing::debug!(path = %path.as_ref().display(), ?config, "Loaded session config");
        Ok(config)
    }

    /// Serializes to pretty RON.
    pub fn to_ron_string(&self) -> OpsResult<String> {
        ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default())
            .map_err(|e| OpsError::InvalidConfig(e.to_string()))
    }

    /// Checks every field is in range.
    pub fn validate(&self) -> OpsResult<()> {
        if self.history_capacity == 0 {
            return Err(OpsError::InvalidConfig(
                "history_capacity must be > 0".into(),
            ));
        }
        if !(self.histogram_height.is_finite() && self.histogram_height > 0.0) {
            return Err(OpsError::InvalidConfig(format!(
                "histogram_height must be a positive number, got {}",
                self.histogram_height
            )));
        }
        if !(self.histogram_headroom > 0.0 && self.histogram_headroom <= 1.0) {
            return Err(OpsError::InvalidConfig(format!(
                "histogram_headroom must be in (0, 1], got {}",
                self.histogram_headroom
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = SessionConfig::default();
        assert_eq!(config.history_capacity, 10);
        assert_relative_eq!(config.histogram_height, 100.0);
        assert_relative_eq!(config.histogram_headroom, 0.9);
        assert_eq!(config.contrast_boundary, ContrastBoundary::Saturate);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_ron_uses_defaults() {
        let config = SessionConfig::from_ron_str("(history_capacity: 3, contrast_boundary: Reject)")
            .unwrap();
        assert_eq!(config.history_capacity, 3);
        assert_eq!(config.contrast_boundary, ContrastBoundary::Reject);
        assert_eq!(config.histogram_height, DEFAULT_HISTOGRAM_HEIGHT);
    }

    #[test]
    fn test_zero_capacity_rejected() {
        let err = SessionConfig::from_ron_str("(history_capacity: 0)").unwrap_err();
        assert!(matches!(err, OpsError::InvalidConfig(_)));
    }

    #[test]
    fn test_bad_headroom_rejected() {
        assert!(SessionConfig::from_ron_str("(histogram_headroom: 1.5)").is_err());
        assert!(SessionConfig::from_ron_str("(histogram_headroom: 0.0)").is_err());
    }

    #[test]
    fn test_malformed_ron() {
        assert!(matches!(
            SessionConfig::from_ron_str("(history_capacity: \"ten\")"),
            Err(OpsError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_ron_roundtrip() {
        let config = SessionConfig {
            history_capacity: 4,
            ..Default::default()
        };
        let text = config.to_ron_string().unwrap();
        assert_eq!(SessionConfig::from_ron_str(&text).unwrap(), config);
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "(histogram_height: 50.0)").unwrap();
        let config = SessionConfig::load(file.path()).unwrap();
        assert_relative_eq!(config.histogram_height, 50.0);
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = SessionConfig::load(dir.path().join("missing.ron")).unwrap_err();
        assert!(matches!(err, OpsError::Io(_)));
    }
}
