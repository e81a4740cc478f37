use crate::math::{R3, Scalar};

use super::orientation::Orientation;

/// Projects each field vector onto the ambient field direction (total magnetic intensity).
#[must_use]
pub fn tmi_projection(fields: &[R3], ambient: Orientation) -> Vec<Scalar> {
    let h0 = ambient.unit_vector();
    fields.iter().map(|b| h0.dot(b)).collect()
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;

    #[test]
    fn projection_is_linear() {
        let a = [R3::new(1.0, -2.0, 3.0), R3::new(0.1, 0.2, -0.3)];
        let b = [R3::new(-4.0, 0.5, 2.0), R3::new(9.0, -1.0, 0.0)];
        let sum: Vec<R3> = a.iter().zip(&b).map(|(x, y)| x + y).collect();
        let ambient = Orientation::new(-62.11, -17.9);

        let pa = tmi_projection(&a, ambient);
        let pb = tmi_projection(&b, ambient);
        let ps = tmi_projection(&sum, ambient);
        for i in 0..2 {
            assert_relative_eq!(ps[i], pa[i] + pb[i], epsilon = 1.0e-12);
        }
    }

    #[test]
    fn vertical_ambient_field_picks_negative_z() {
        let fields = [R3::new(3.0, 4.0, -5.0)];
        let tmi = tmi_projection(&fields, Orientation::vertical());
        assert_relative_eq!(tmi[0], 5.0, epsilon = 1.0e-12);
    }
}
