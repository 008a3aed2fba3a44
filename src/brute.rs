//! Exhaustive window search, used as the ground truth for [`crate::sweep`].
//!
//! For every pixel the whole `(2 * (spread / 2) + 1)²` window around it is
//! scanned for the closest pixel of the opposite classification. This is
//! `O(W * H * spread²)` and only meant for testing and small images.

use crate::bitmap::{Classification, ClassificationGrid};
use crate::combine::SignedDistanceField;
use crate::error::{Result, SdfError};
use crate::math::FAR;
use crate::sweep::DistanceField;

/// Default window spread.
pub const DEFAULT_SPREAD: usize = 32;

fn half_window(spread: usize) -> Result<isize> {
    if spread < 2 {
        return Err(SdfError::InvalidConfig(format!(
            "brute force spread must be at least 2, got {}",
            spread
        )));
    }
    Ok((spread / 2) as isize)
}

/// Squared distance from `(x, y)` to the nearest cell classified
/// differently, looking no further than `half` cells along either axis.
/// Cells outside the grid are never sites.
fn nearest_other(grid: &ClassificationGrid, x: usize, y: usize, half: isize) -> Option<isize> {
    // Beyond the larger extent the window only covers cells outside the grid.
    let half = half.min(grid.width().max(grid.height()) as isize);
    let own = *grid.get(x, y);
    let (x, y) = (x as isize, y as isize);
    let mut best: Option<isize> = None;

    for dy in -half..=half {
        for dx in -half..=half {
            match grid.get_checked(x + dx, y + dy) {
                Some(class) if *class != own => {
                    let d = dx * dx + dy * dy;
                    if best.map_or(true, |b| d < b) {
                        best = Some(d);
                    }
                }
                _ => {}
            }
        }
    }

    best
}

/// Distance from every cell to the nearest cell of the other
/// classification within the window. Cells with no such neighbour get
/// [`FAR`].
pub fn brute_force_distance(grid: &ClassificationGrid, spread: usize) -> Result<DistanceField> {
    let half = half_window(spread)?;

    Ok(grid.map_indexed(|x, y, _| match nearest_other(grid, x, y, half) {
        Some(d) => (d as f32).sqrt(),
        None => FAR,
    }))
}

/// Renders a signed field straight from the window search.
///
/// Distances are scaled by the farthest point the window can hold,
/// `(spread / 2) * sqrt(2)`, so every value fits in `[-1, 1]`; a cell with
/// nothing of the other classification in range saturates to `1`. Cells
/// classified as `inside` are positive.
pub fn brute_force_sdf(
    grid: &ClassificationGrid,
    spread: usize,
    inside: Classification,
) -> Result<SignedDistanceField> {
    let half = half_window(spread)?;
    let reach = half as f32 * std::f32::consts::SQRT_2;
    log::info!(
        "brute force over {}x{} with spread {}",
        grid.width(),
        grid.height(),
        spread
    );

    let signed = grid.map_indexed(|x, y, class| {
        let d = match nearest_other(grid, x, y, half) {
            Some(d) => ((d as f32).sqrt() / reach).min(1.0),
            None => 1.0,
        };
        if *class == inside {
            d
        } else {
            -d
        }
    });

    Ok(SignedDistanceField::from_signed(signed))
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::grid::Grid;
    use Classification::*;

    fn center_background() -> ClassificationGrid {
        Grid::from_fn(3, 3, |x, y| {
            if (x, y) == (1, 1) {
                Background
            } else {
                Foreground
            }
        })
        .unwrap()
    }

    #[test]
    fn test_rejects_tiny_window() {
        let grid = center_background();
        assert!(brute_force_distance(&grid, 0).is_err());
        assert!(brute_force_distance(&grid, 1).is_err());
        assert!(brute_force_distance(&grid, 2).is_ok());
    }

    #[test]
    fn test_distance_to_other_classification() {
        let field = brute_force_distance(&center_background(), DEFAULT_SPREAD).unwrap();
        let sqrt2 = 2.0f32.sqrt();
        assert_eq!(
            field.as_slice(),
            &[sqrt2, 1.0, sqrt2, 1.0, 1.0, 1.0, sqrt2, 1.0, sqrt2]
        );
    }

    #[test]
    fn test_uniform_grid_is_far() {
        let grid = Grid::from_vec(4, 2, vec![Foreground; 8]).unwrap();
        let field = brute_force_distance(&grid, 8).unwrap();
        assert!(field.as_slice().iter().all(|d| *d == FAR));
    }

    #[test]
    fn test_window_limits_search() {
        let mut cells = vec![Background; 9];
        cells[0] = Foreground;
        let grid = Grid::from_vec(9, 1, cells).unwrap();

        // half window of 2 cells: only the first three background cells see the site
        let field = brute_force_distance(&grid, 4).unwrap();
        assert_eq!(&field.as_slice()[..4], &[1.0, 1.0, 2.0, FAR]);
        assert!(field.as_slice()[3..].iter().all(|d| *d == FAR));
    }

    #[test]
    fn test_huge_spread_matches_whole_grid_window() {
        let grid = center_background();
        let huge = brute_force_distance(&grid, usize::MAX).unwrap();
        assert_eq!(huge, brute_force_distance(&grid, DEFAULT_SPREAD).unwrap());

        let single = Grid::from_vec(1, 1, vec![Foreground]).unwrap();
        assert_eq!(brute_force_distance(&single, usize::MAX).unwrap().as_slice(), &[FAR]);

        let sdf = brute_force_sdf(&grid, usize::MAX, Foreground).unwrap();
        for (s, class) in sdf.signed().as_slice().iter().zip(grid.as_slice()) {
            assert!(s.is_finite() && s.abs() <= 1.0);
            match class {
                Foreground => assert!(*s > 0.0),
                Background => assert!(*s < 0.0),
            }
        }
    }

    #[test]
    fn test_signed_field_polarity() {
        let grid = center_background();
        let sdf = brute_force_sdf(&grid, 2, Foreground).unwrap();
        let reach = 2.0f32.sqrt();
        let s = sdf.signed();

        assert!((*s.get(1, 1) + 1.0 / reach).abs() < 1e-6);
        assert!((*s.get(1, 0) - 1.0 / reach).abs() < 1e-6);
        assert!((*s.get(0, 0) - 1.0).abs() < 1e-6);

        let flipped = brute_force_sdf(&grid, 2, Background).unwrap();
        for (a, b) in sdf.signed().as_slice().iter().zip(flipped.signed().as_slice()) {
            assert_eq!(*a, -*b);
        }
    }

    #[test]
    fn test_signed_field_saturates_without_boundary() {
        let grid = Grid::from_vec(3, 3, vec![Background; 9]).unwrap();
        let sdf = brute_force_sdf(&grid, DEFAULT_SPREAD, Foreground).unwrap();
        assert!(sdf.signed().as_slice().iter().all(|s| *s == -1.0));
    }
}
