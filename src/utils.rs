//! Field-wide helpers shared by the combiner and the brute-force renderer.

use crate::grid::Grid;

/// Largest value in the field; never below zero.
pub(crate) fn field_max(field: &Grid<f32>) -> f32 {
    field.as_slice().iter().fold(0.0f32, |m, &d| m.max(d))
}

/// Divides every cell by the field's own maximum.
/// A field whose maximum is zero is already all zeros and comes back as is.
pub(crate) fn normalize(field: &Grid<f32>) -> Grid<f32> {
    let max = field_max(field);
    if max <= 0.0 {
        return field.clone();
    }
    field.map(|&d| d / max)
}

/// `[-1, 1] -> [0, 1]`
pub(crate) fn to_unit(signed: f32) -> f32 {
    ((signed + 1.0) / 2.0).max(0.0).min(1.0)
}

/// `[-1, 1] -> [0, 255]`, rounded to the nearest step.
pub(crate) fn to_unorm8(signed: f32) -> u8 {
    (255.0 * (signed / 2.0 + 0.5)).round().max(0.0).min(255.0) as u8
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_normalize_by_own_max() {
        let f = Grid::from_vec(3, 1, vec![0.0, 2.0, 4.0]).unwrap();
        assert_eq!(normalize(&f).as_slice(), &[0.0, 0.5, 1.0]);
    }

    #[test]
    fn test_normalize_zero_field_is_identity() {
        let f = Grid::from_vec(2, 2, vec![0.0; 4]).unwrap();
        let n = normalize(&f);
        assert_eq!(n, f);
        assert!(n.as_slice().iter().all(|d| !d.is_nan()));
    }

    #[test]
    fn test_output_ranges() {
        assert_eq!(to_unit(-1.0), 0.0);
        assert_eq!(to_unit(0.0), 0.5);
        assert_eq!(to_unit(1.0), 1.0);
        assert_eq!(to_unorm8(-1.0), 0);
        assert_eq!(to_unorm8(0.0), 128);
        assert_eq!(to_unorm8(1.0), 255);
    }
}
