use crate::math::{R3, Scalar};

/// Magnetic flux density descriptor expressed in nanotesla (nT).
#[cfg_attr(feature = "serde-serialize", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MagneticField {
    /// Flux density magnitude (nT).
    pub magnitude: Scalar,
    /// Unit direction vector; zero for a vanishing field.
    pub direction: R3,
}

impl MagneticField {
    /// Constructs a field descriptor from a vector in nT.
    #[must_use]
    pub fn from_vector(vector: R3) -> Self {
        let magnitude = vector.norm();
        let direction = if magnitude == 0.0 {
            R3::zeros()
        } else {
            vector / magnitude
        };

        Self {
            magnitude,
            direction,
        }
    }

    /// Reassembles the field vector.
    #[must_use]
    pub fn vector(&self) -> R3 {
        self.direction * self.magnitude
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;

    #[test]
    fn from_vector_handles_nonzero_input() {
        let vector = R3::new(1.0, 2.0, 2.0);
        let field = MagneticField::from_vector(vector);
        assert_relative_eq!(field.magnitude, 3.0, epsilon = 1.0e-12);
        assert_relative_eq!(field.direction.norm(), 1.0, epsilon = 1.0e-12);
        assert_relative_eq!(field.vector(), vector, epsilon = 1.0e-12);
    }

    #[test]
    fn from_vector_handles_zero_input() {
        let field = MagneticField::from_vector(R3::zeros());
        assert_eq!(field.magnitude, 0.0);
        assert_eq!(field.direction, R3::zeros());
    }
}
