use crate::math::{wrap_degrees, R3, Scalar};

/// Direction expressed as geomagnetic inclination and declination angles in degrees.
///
/// The frame is right-handed with x pointing east, y north and z up.
/// Declination is measured clockwise from north when looking down; inclination
/// is measured from the horizontal plane, positive downwards.
#[cfg_attr(feature = "serde-serialize", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Orientation {
    /// Angle below the horizontal (degrees, positive down).
    pub inclination: Scalar,
    /// Azimuth clockwise from north (degrees).
    pub declination: Scalar,
}

impl Orientation {
    /// Creates an orientation from inclination and declination in degrees.
    #[must_use]
    pub const fn new(inclination: Scalar, declination: Scalar) -> Self {
        Self {
            inclination,
            declination,
        }
    }

    /// Vertical field pointing straight down, the default ambient field.
    #[must_use]
    pub const fn vertical() -> Self {
        Self::new(90.0, 0.0)
    }

    /// Unit vector pointing along this orientation.
    #[must_use]
    pub fn unit_vector(&self) -> R3 {
        direction_from_angles(self.inclination, self.declination)
    }
}

impl Default for Orientation {
    fn default() -> Self {
        Self::vertical()
    }
}

/// Converts inclination/declination angles (degrees) into a Cartesian unit vector.
///
/// Uses spherical angles θ = (450° − declination) mod 360° measured from +x
/// and φ = 90° + inclination measured from +z. Any real input is accepted.
#[must_use]
pub fn direction_from_angles(inclination: Scalar, declination: Scalar) -> R3 {
    let theta = wrap_degrees(450.0 - declination).to_radians();
    let phi = (90.0 + inclination).to_radians();
    let (sin_phi, cos_phi) = phi.sin_cos();
    let (sin_theta, cos_theta) = theta.sin_cos();
    R3::new(sin_phi * cos_theta, sin_phi * sin_theta, cos_phi)
}
