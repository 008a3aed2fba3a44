//! Two-pass vector propagation distance transform.
//!
//! Every cell starts out either as a site (zero displacement) or with the
//! sentinel. A forward raster pass then lets each cell adopt a better site
//! from the neighbours already visited above and to the left; the backward
//! pass does the same from below and to the right. The result is the
//! displacement from every cell to (nearly always) its nearest site.
//!
//! The transform is not exact for every input: a cell can end up pointing
//! at a site slightly farther away than the true nearest one when the
//! propagation path to that site passes through a cell that preferred
//! another site. [`crate::brute`] provides the exact answer for comparison.

use crate::bitmap::{Classification, ClassificationGrid};
use crate::grid::Grid;
use crate::math::{is_sentinel, magnitude, sentinel, Displacement};

/// Displacement from every cell to its nearest site.
pub type SiteVectorGrid = Grid<Displacement>;

/// Non-negative distance from every cell to its nearest site.
pub type DistanceField = Grid<f32>;

/// Neighbours that precede a cell in top-to-bottom, left-to-right order.
const FORWARD: [(isize, isize); 4] = [(0, -1), (-1, -1), (1, -1), (-1, 0)];

/// Neighbours that precede a cell in bottom-to-top, right-to-left order.
const BACKWARD: [(isize, isize); 4] = [(0, 1), (1, 1), (-1, 1), (1, 0)];

/// Working grid with a one cell gutter on every side, so neighbour reads
/// never leave the buffer. Gutter cells hold the sentinel forever.
struct PaddedGrid {
    width: usize,
    height: usize,
    cells: Vec<Displacement>,
}

impl PaddedGrid {
    fn seed(grid: &ClassificationGrid, target: Classification) -> Self {
        let width = grid.width() + 2;
        let height = grid.height() + 2;
        let mut cells = vec![sentinel(); width * height];

        for (y, row) in grid.rows().enumerate() {
            for (x, class) in row.iter().enumerate() {
                if *class == target {
                    cells[(y + 1) * width + x + 1] = Displacement::zero();
                }
            }
        }

        Self {
            width,
            height,
            cells,
        }
    }

    fn index(&self, x: usize, y: usize) -> usize {
        y * self.width + x
    }

    /// Tries every neighbour in `offsets` as a route to a closer site.
    fn relax(&mut self, x: usize, y: usize, offsets: &[(isize, isize)]) {
        let idx = self.index(x, y);
        let mut best = self.cells[idx];
        let mut best_len = best.square_length();

        for &(dx, dy) in offsets {
            let nx = (x as isize + dx) as usize;
            let ny = (y as isize + dy) as usize;
            let neighbour = self.cells[self.index(nx, ny)];
            if is_sentinel(neighbour) {
                continue;
            }

            // The neighbour's site, seen from this cell.
            let candidate = neighbour + Displacement::new(dx as f32, dy as f32);
            let len = candidate.square_length();
            if len < best_len {
                best = candidate;
                best_len = len;
            }
        }

        self.cells[idx] = best;
    }

    fn forward(&mut self) {
        for y in 1..self.height - 1 {
            for x in 1..self.width - 1 {
                self.relax(x, y, &FORWARD);
            }
        }
    }

    fn backward(&mut self) {
        for y in (1..self.height - 1).rev() {
            for x in (1..self.width - 1).rev() {
                self.relax(x, y, &BACKWARD);
            }
        }
    }

    /// Drops the gutter, leaving a grid with the extents of `source`.
    fn strip<T>(self, source: &Grid<T>) -> SiteVectorGrid {
        source.map_indexed(|x, y, _| self.cells[self.index(x + 1, y + 1)])
    }
}

/// Computes, for every cell, the displacement to the nearest cell
/// classified as `target`.
///
/// When no cell matches `target` every displacement stays the sentinel;
/// [`distance_field`] turns those into [`crate::FAR`].
pub fn sweep_transform(grid: &ClassificationGrid, target: Classification) -> SiteVectorGrid {
    let mut padded = PaddedGrid::seed(grid, target);
    padded.forward();
    padded.backward();

    let vectors = padded.strip(grid);
    log::debug!(
        "{} sweep over {}x{} finished",
        target,
        vectors.width(),
        vectors.height()
    );
    vectors
}

/// Euclidean length of every displacement.
pub fn distance_field(vectors: &SiteVectorGrid) -> DistanceField {
    vectors.map(|d| magnitude(*d))
}

/// Shorthand for [`sweep_transform`] followed by [`distance_field`].
pub fn unsigned_distance(grid: &ClassificationGrid, target: Classification) -> DistanceField {
    distance_field(&sweep_transform(grid, target))
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::math::FAR;
    use Classification::*;

    fn grid_from(rows: &[&str]) -> ClassificationGrid {
        let h = rows.len();
        let w = rows[0].len();
        Grid::from_fn(w, h, |x, y| {
            if rows[y].as_bytes()[x] == b'#' {
                Foreground
            } else {
                Background
            }
        })
        .unwrap()
    }

    #[test_log::test]
    fn test_single_site_vectors_point_at_site() {
        let grid = grid_from(&[".....", ".....", "..#..", ".....", "....."]);
        let vectors = sweep_transform(&grid, Foreground);

        for y in 0..5 {
            for x in 0..5 {
                let d = *vectors.get(x, y);
                assert_eq!(d, Displacement::new(2.0 - x as f32, 2.0 - y as f32));
            }
        }
    }

    #[test]
    fn test_sites_are_zero() {
        let grid = grid_from(&["#..#", ".##.", "...."]);
        for target in [Foreground, Background] {
            let field = unsigned_distance(&grid, target);
            for y in 0..grid.height() {
                for x in 0..grid.width() {
                    if *grid.get(x, y) == target {
                        assert_eq!(*field.get(x, y), 0.0);
                    } else {
                        assert!(*field.get(x, y) >= 1.0);
                    }
                }
            }
        }
    }

    #[test]
    fn test_corner_site_reaches_opposite_corner() {
        // Only the backward pass can carry this site up and to the left.
        let grid = grid_from(&["....", "....", "...#"]);
        let field = unsigned_distance(&grid, Foreground);
        assert!((*field.get(0, 0) - (9.0f32 + 4.0).sqrt()).abs() < 1e-6);
        assert_eq!(*field.get(0, 2), 3.0);
        assert_eq!(*field.get(3, 0), 2.0);
    }

    #[test]
    fn test_nearest_of_two_sites() {
        let grid = grid_from(&["#......#"]);
        let field = unsigned_distance(&grid, Foreground);
        assert_eq!(field.as_slice(), &[0.0, 1.0, 2.0, 3.0, 3.0, 2.0, 1.0, 0.0]);
    }

    #[test]
    fn test_no_sites_is_far_everywhere() {
        let grid = grid_from(&["...", "..."]);
        let vectors = sweep_transform(&grid, Foreground);
        assert!(vectors.as_slice().iter().all(|d| is_sentinel(*d)));

        let field = distance_field(&vectors);
        assert!(field.as_slice().iter().all(|d| *d == FAR));
    }

    #[test]
    fn test_strip_preserves_extents() {
        let grid = grid_from(&["#..", "...", "...", ".#."]);
        let vectors = sweep_transform(&grid, Foreground);
        assert_eq!(vectors.dimensions(), (3, 4));
    }

    #[test]
    fn test_single_cell() {
        let grid = grid_from(&["#"]);
        assert_eq!(unsigned_distance(&grid, Foreground).as_slice(), &[0.0]);
        assert_eq!(unsigned_distance(&grid, Background).as_slice(), &[FAR]);
    }
}
