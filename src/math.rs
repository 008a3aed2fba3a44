use euclid::default::Vector2D;

/// Offset from a cell to its nearest site, in pixels.
pub type Displacement = Vector2D<f32>;

/// Distance reported for a cell that no site can reach.
pub const FAR: f32 = f32::MAX;

/// "No site found yet".
pub(crate) fn sentinel() -> Displacement {
    Displacement::new(f32::INFINITY, f32::INFINITY)
}

pub(crate) fn is_sentinel(d: Displacement) -> bool {
    !d.x.is_finite() || !d.y.is_finite()
}

/// Euclidean norm of a displacement, with the sentinel mapped to [`FAR`].
pub(crate) fn magnitude(d: Displacement) -> f32 {
    if is_sentinel(d) {
        FAR
    } else {
        d.length()
    }
}
