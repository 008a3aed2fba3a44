//! Settings for a distance field run, loadable from TOML.

use crate::bitmap::{BinaryClassifier, Classification};
use crate::brute::DEFAULT_SPREAD;
use crate::error::{Result, SdfError};
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Algorithm {
    /// Two-pass vector propagation; linear time.
    Sweep,
    /// Exhaustive window search; exact within the window.
    BruteForce,
}

impl std::str::FromStr for Algorithm {
    type Err = SdfError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "sweep" => Ok(Algorithm::Sweep),
            "brute-force" | "brute" => Ok(Algorithm::BruteForce),
            _ => Err(SdfError::InvalidConfig(format!(
                "unknown algorithm '{}', expected sweep or brute-force",
                s
            ))),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SdfConfig {
    /// Normalized intensity below which a pixel counts as foreground.
    pub threshold: f32,
    /// Brute force window: `spread / 2` cells on each side of the pixel.
    #[serde(alias = "brute_force_window")]
    pub spread: usize,
    /// Classification mapped to positive distances.
    pub inside: Classification,
    pub algorithm: Algorithm,
    /// Invert the source intensities before classifying.
    pub invert: bool,
}

impl Default for SdfConfig {
    fn default() -> Self {
        Self {
            threshold: 0.5,
            spread: DEFAULT_SPREAD,
            inside: Classification::Foreground,
            algorithm: Algorithm::Sweep,
            invert: false,
        }
    }
}

impl SdfConfig {
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)?;
        let config = Self::from_toml_str(&text)?;
        log::debug!("loaded {:?} from {}", config, path.display());
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if !(self.threshold > 0.0 && self.threshold <= 1.0) {
            return Err(SdfError::InvalidConfig(format!(
                "threshold must lie in (0, 1], got {}",
                self.threshold
            )));
        }
        if self.spread < 2 {
            return Err(SdfError::InvalidConfig(format!(
                "spread must be at least 2, got {}",
                self.spread
            )));
        }
        Ok(())
    }

    pub fn classifier(&self) -> BinaryClassifier {
        BinaryClassifier::new(self.threshold)
    }
}
