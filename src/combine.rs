//! Merging the two unsigned sweeps into one signed, normalized field.
//!
//! Each unsigned field is divided by its *own* maximum before the two are
//! subtracted. Values on either side of the boundary are therefore not in
//! the same units: a thin shape in a large empty canvas gets its inside
//! stretched to the full `[0, 1]` range just like the outside. Ordering of
//! distances on each side is preserved, absolute scale is not.

use crate::bitmap::{Classification, ClassificationGrid};
use crate::config::SdfConfig;
use crate::error::Result;
use crate::grid::Grid;
use crate::sweep::{unsigned_distance, DistanceField};
use crate::utils::{field_max, normalize, to_unit, to_unorm8};

/// A signed field in `[-1, 1]`, positive on the inside.
#[derive(Clone, Debug, PartialEq)]
pub struct SignedDistanceField {
    signed: Grid<f32>,
}

impl SignedDistanceField {
    pub(crate) fn from_signed(signed: Grid<f32>) -> Self {
        Self { signed }
    }

    pub fn width(&self) -> usize {
        self.signed.width()
    }

    pub fn height(&self) -> usize {
        self.signed.height()
    }

    /// Raw values in `[-1, 1]`.
    pub fn signed(&self) -> &Grid<f32> {
        &self.signed
    }

    /// Remapped to `[0, 1]`, with the boundary at `0.5`.
    pub fn to_unit(&self) -> Grid<f32> {
        self.signed.map(|s| to_unit(*s))
    }

    /// Quantized to `[0, 255]`, with the boundary at `128`.
    pub fn to_unorm8(&self) -> Grid<u8> {
        self.signed.map(|s| to_unorm8(*s))
    }
}

/// Runs the sweep transform once per classification and combines the two
/// distance fields.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct SignedFieldCombiner {
    inside: Classification,
}

impl SignedFieldCombiner {
    /// `inside` is the classification that ends up with positive values.
    pub fn new(inside: Classification) -> Self {
        Self { inside }
    }

    pub fn from_config(config: &SdfConfig) -> Self {
        Self::new(config.inside)
    }

    pub fn inside(&self) -> Classification {
        self.inside
    }

    /// Distance to the nearest inside site and to the nearest outside site,
    /// in that order.
    pub fn unsigned_fields(&self, grid: &ClassificationGrid) -> (DistanceField, DistanceField) {
        let inside = self.inside;
        let outside = inside.inverse();

        for class in [inside, outside] {
            if grid.count(class) == 0 {
                log::warn!("no {} cells, the signed field will saturate", class);
            }
        }

        run_sweeps(
            || unsigned_distance(grid, inside),
            || unsigned_distance(grid, outside),
        )
    }

    pub fn combine(&self, grid: &ClassificationGrid) -> SignedDistanceField {
        let (to_inside, to_outside) = self.unsigned_fields(grid);
        log::debug!(
            "max distance to {}: {}, to {}: {}",
            self.inside,
            field_max(&to_inside),
            self.inside.inverse(),
            field_max(&to_outside)
        );

        subtract_normalized(&to_outside, &to_inside)
    }

    /// Combines two precomputed unsigned fields. Both must share extents.
    pub fn combine_fields(
        to_inside: &DistanceField,
        to_outside: &DistanceField,
    ) -> Result<SignedDistanceField> {
        to_inside.ensure_same_extents(to_outside)?;
        Ok(subtract_normalized(to_outside, to_inside))
    }
}

/// `normalize(positive) - normalize(negative)`, cell by cell.
fn subtract_normalized(positive: &DistanceField, negative: &DistanceField) -> SignedDistanceField {
    let positive = normalize(positive);
    let negative = normalize(negative);
    let n = negative.as_slice();

    SignedDistanceField::from_signed(
        positive.map_indexed(|x, y, p| p - n[y * negative.width() + x]),
    )
}

#[cfg(not(feature = "rayon"))]
fn run_sweeps<A, B, RA, RB>(a: A, b: B) -> (RA, RB)
where
    A: FnOnce() -> RA + Send,
    B: FnOnce() -> RB + Send,
    RA: Send,
    RB: Send,
{
    (a(), b())
}

/// The two sweeps read the same grid and write disjoint outputs.
#[cfg(feature = "rayon")]
fn run_sweeps<A, B, RA, RB>(a: A, b: B) -> (RA, RB)
where
    A: FnOnce() -> RA + Send,
    B: FnOnce() -> RB + Send,
    RA: Send,
    RB: Send,
{
    rayon::join(a, b)
}
