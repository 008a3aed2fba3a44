//! A dense, row-major 2D grid. Every field in the pipeline is one of these.

use crate::error::{Result, SdfError};

/// A `width` by `height` matrix stored row by row.
#[derive(Clone, Debug, PartialEq)]
pub struct Grid<T> {
    width: usize,
    height: usize,
    cells: Vec<T>,
}

impl<T> Grid<T> {
    /// Wraps an existing row-major buffer.
    /// Fails if either extent is zero or the buffer does not hold exactly
    /// `width * height` cells.
    pub fn from_vec(width: usize, height: usize, cells: Vec<T>) -> Result<Self> {
        if width == 0 || height == 0 || width.checked_mul(height) != Some(cells.len()) {
            return Err(SdfError::MalformedInput {
                width,
                height,
                cells: cells.len(),
            });
        }

        Ok(Self {
            width,
            height,
            cells,
        })
    }

    /// Builds a grid by evaluating `f(x, y)` for every cell.
    pub fn from_fn(width: usize, height: usize, mut f: impl FnMut(usize, usize) -> T) -> Result<Self> {
        let len = match width.checked_mul(height) {
            Some(len) if len > 0 => len,
            _ => {
                return Err(SdfError::MalformedInput {
                    width,
                    height,
                    cells: 0,
                })
            }
        };

        let mut cells = Vec::with_capacity(len);
        for y in 0..height {
            for x in 0..width {
                cells.push(f(x, y));
            }
        }

        Ok(Self {
            width,
            height,
            cells,
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn dimensions(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    pub fn get(&self, x: usize, y: usize) -> &T {
        &self.cells[y * self.width + x]
    }

    /// Signed lookup; anything outside the grid is `None`.
    pub fn get_checked(&self, x: isize, y: isize) -> Option<&T> {
        if x < 0 || y < 0 || x as usize >= self.width || y as usize >= self.height {
            None
        } else {
            Some(self.get(x as usize, y as usize))
        }
    }

    pub fn rows(&self) -> std::slice::Chunks<'_, T> {
        self.cells.chunks(self.width)
    }

    pub fn as_slice(&self) -> &[T] {
        &self.cells
    }

    pub fn into_vec(self) -> Vec<T> {
        self.cells
    }

    /// Applies `f` to every cell, keeping the extents.
    pub fn map<U>(&self, f: impl FnMut(&T) -> U) -> Grid<U> {
        Grid {
            width: self.width,
            height: self.height,
            cells: self.cells.iter().map(f).collect(),
        }
    }

    /// Like [`Grid::map`], with the cell coordinates passed along.
    pub fn map_indexed<U>(&self, mut f: impl FnMut(usize, usize, &T) -> U) -> Grid<U> {
        let width = self.width;
        Grid {
            width,
            height: self.height,
            cells: self
                .cells
                .iter()
                .enumerate()
                .map(|(i, c)| f(i % width, i / width, c))
                .collect(),
        }
    }

    /// Fails with [`SdfError::DimensionMismatch`] unless both grids share extents.
    pub fn ensure_same_extents<U>(&self, other: &Grid<U>) -> Result<()> {
        if self.dimensions() != other.dimensions() {
            return Err(SdfError::DimensionMismatch {
                left: self.dimensions(),
                right: other.dimensions(),
            });
        }
        Ok(())
    }
}
