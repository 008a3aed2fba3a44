//! Source bitmaps and their foreground/background classification.

use crate::error::{Result, SdfError};
use crate::grid::Grid;
use serde::{Deserialize, Serialize};

/// A sample type that can be mapped onto `[0, 1]`.
pub trait Intensity: Copy {
    fn normalized(self) -> f32;
}

impl Intensity for u8 {
    fn normalized(self) -> f32 {
        self as f32 / u8::MAX as f32
    }
}

impl Intensity for u16 {
    fn normalized(self) -> f32 {
        self as f32 / u16::MAX as f32
    }
}

/// Floating point samples are taken to already be normalized.
impl Intensity for f32 {
    fn normalized(self) -> f32 {
        self
    }
}

/// Immutable intensity samples, one per pixel.
pub type Bitmap<P> = Grid<P>;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Classification {
    Foreground,
    Background,
}

impl Classification {
    pub fn inverse(self) -> Self {
        match self {
            Classification::Foreground => Classification::Background,
            Classification::Background => Classification::Foreground,
        }
    }
}

impl std::str::FromStr for Classification {
    type Err = SdfError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "foreground" | "fg" => Ok(Classification::Foreground),
            "background" | "bg" => Ok(Classification::Background),
            _ => Err(SdfError::InvalidConfig(format!(
                "unknown classification '{}', expected foreground or background",
                s
            ))),
        }
    }
}

impl std::fmt::Display for Classification {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Classification::Foreground => f.write_str("foreground"),
            Classification::Background => f.write_str("background"),
        }
    }
}

pub type ClassificationGrid = Grid<Classification>;

impl ClassificationGrid {
    /// Swaps foreground and background in every cell.
    pub fn invert(&self) -> Self {
        self.map(|c| c.inverse())
    }

    /// Number of cells holding `class`.
    pub fn count(&self, class: Classification) -> usize {
        self.as_slice().iter().filter(|c| **c == class).count()
    }
}

/// Thresholds a bitmap into a [`ClassificationGrid`].
///
/// A pixel is foreground when its normalized intensity lies strictly below
/// the threshold. For 8-bit input with the default threshold this is
/// `p < 128`.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct BinaryClassifier {
    threshold: f32,
}

impl Default for BinaryClassifier {
    fn default() -> Self {
        Self { threshold: 0.5 }
    }
}

impl BinaryClassifier {
    pub fn new(threshold: f32) -> Self {
        Self { threshold }
    }

    pub fn threshold(&self) -> f32 {
        self.threshold
    }

    pub fn classify_sample<P: Intensity>(&self, sample: P) -> Classification {
        if sample.normalized() < self.threshold {
            Classification::Foreground
        } else {
            Classification::Background
        }
    }

    pub fn classify<P: Intensity>(&self, bitmap: &Bitmap<P>) -> ClassificationGrid {
        bitmap.map(|p| self.classify_sample(*p))
    }
}
