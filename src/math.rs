//! Shared numerical primitives anchored on `nalgebra`.

use nalgebra::Vector3;

/// Primary scalar type used across the crate.
pub type Scalar = f64;
/// Convenient alias for three-dimensional real vectors.
pub type R3 = Vector3<Scalar>;

/// Wraps an angle in degrees into `[0, 360)`.
#[inline]
#[must_use]
pub fn wrap_degrees(angle: Scalar) -> Scalar {
    let wrapped = angle.rem_euclid(360.0);
    // rem_euclid can round up to exactly 360 for tiny negative inputs.
    if wrapped >= 360.0 {
        0.0
    } else {
        wrapped
    }
}

/// Generates `n` linearly spaced samples in [start, stop].
#[must_use]
pub fn linspace(start: Scalar, stop: Scalar, n: usize) -> Vec<Scalar> {
    match n {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let step = (stop - start) / (n as Scalar - 1.0);
            (0..n).map(|i| start + step * i as Scalar).collect()
        }
    }
}

/// Converts a slice of `[x, y, z]` rows into vectors.
#[must_use]
pub fn rows_to_vectors(rows: &[[Scalar; 3]]) -> Vec<R3> {
    rows.iter().map(|r| R3::new(r[0], r[1], r[2])).collect()
}
