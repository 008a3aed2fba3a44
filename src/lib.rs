//! sdfgen turns binary bitmaps into signed distance fields.
//!
//! The pipeline is one-way:
//! bitmap → [`ClassificationGrid`] → two [`SiteVectorGrid`]s (one per
//! classification) → two unsigned [`DistanceField`]s → one
//! [`SignedDistanceField`], which can then be quantized for an image encoder.
//!
//! The production path is the linear time [`sweep`] transform combined by
//! [`SignedFieldCombiner`]. [`brute`] holds an exhaustive reference search
//! that the sweep is tested against.

pub mod bitmap;
pub mod brute;
pub mod combine;
pub mod config;
pub mod error;
pub mod grid;
mod math;
pub mod sweep;
mod utils;

pub use self::bitmap::{BinaryClassifier, Bitmap, Classification, ClassificationGrid, Intensity};
pub use self::brute::{brute_force_distance, brute_force_sdf};
pub use self::combine::{SignedDistanceField, SignedFieldCombiner};
pub use self::config::{Algorithm, SdfConfig};
pub use self::error::{Result, SdfError};
pub use self::grid::Grid;
pub use self::math::{Displacement, FAR};
pub use self::sweep::{distance_field, sweep_transform, DistanceField, SiteVectorGrid};

/// Computes a signed field from an already classified grid, using the
/// algorithm and sign convention in `config`.
pub fn compute_sdf(grid: &ClassificationGrid, config: &SdfConfig) -> Result<SignedDistanceField> {
    config.validate()?;

    match config.algorithm {
        Algorithm::Sweep => Ok(SignedFieldCombiner::from_config(config).combine(grid)),
        Algorithm::BruteForce => brute_force_sdf(grid, config.spread, config.inside),
    }
}

/// Classifies `bitmap` with the configured threshold, then runs
/// [`compute_sdf`].
pub fn sdf_from_bitmap<P: Intensity>(
    bitmap: &Bitmap<P>,
    config: &SdfConfig,
) -> Result<SignedDistanceField> {
    config.validate()?;
    let grid = config.classifier().classify(bitmap);
    log::info!(
        "classified {}x{}: {} foreground, {} background",
        grid.width(),
        grid.height(),
        grid.count(Classification::Foreground),
        grid.count(Classification::Background)
    );
    compute_sdf(&grid, config)
}

#[cfg(test)]
mod test {
    use super::*;

    fn bar() -> Bitmap<u8> {
        // dark vertical bar in the middle of a light 6x3 image
        Bitmap::from_fn(6, 3, |x, _| if x == 2 || x == 3 { 0 } else { 255 }).unwrap()
    }

    #[test_log::test]
    fn test_bitmap_pipeline() {
        let sdf = sdf_from_bitmap(&bar(), &SdfConfig::default()).unwrap();
        assert_eq!(sdf.width(), 6);
        assert_eq!(sdf.height(), 3);

        let row: Vec<u8> = sdf.to_unorm8().rows().next().unwrap().to_vec();
        assert!(row[2] > 128 && row[3] > 128);
        assert!(row[0] < 128 && row[5] < 128);
        assert!(row[0] < row[1]);
    }

    #[test]
    fn test_algorithms_agree_on_sign() {
        let sweep = sdf_from_bitmap(&bar(), &SdfConfig::default()).unwrap();
        let brute = sdf_from_bitmap(
            &bar(),
            &SdfConfig {
                algorithm: Algorithm::BruteForce,
                ..SdfConfig::default()
            },
        )
        .unwrap();

        for (a, b) in sweep.signed().as_slice().iter().zip(brute.signed().as_slice()) {
            assert_eq!(a.signum(), b.signum());
        }
    }

    #[test]
    fn test_invalid_config_fails_before_work() {
        let config = SdfConfig {
            threshold: f32::NAN,
            ..SdfConfig::default()
        };
        assert!(matches!(
            sdf_from_bitmap(&bar(), &config),
            Err(SdfError::InvalidConfig(_))
        ));
    }
}
