use thiserror::Error;
use tracing::debug;

use crate::constants::DIPOLE_FIELD_CONSTANT;
use crate::math::{R3, Scalar};

use super::orientation::Orientation;

/// Raised when a per-source parameter array does not match the number of sources.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("shape mismatch for `{parameter}`: expected {expected} values, found {found}")]
pub struct ShapeMismatch {
    /// Name of the offending parameter.
    pub parameter: &'static str,
    /// Number of sources.
    pub expected: usize,
    /// Length of the supplied array.
    pub found: usize,
}

/// Source parameter given either as one value for all sources or as one value per source.
#[cfg_attr(feature = "serde-serialize", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub enum SourceParameter {
    /// Single value broadcast to every source.
    Uniform(Scalar),
    /// One value per source, in source order.
    PerSource(Vec<Scalar>),
}

impl SourceParameter {
    /// Expands the parameter to exactly `count` values.
    ///
    /// Per-source arrays are never truncated or padded.
    pub fn resolve(
        &self,
        parameter: &'static str,
        count: usize,
    ) -> Result<Vec<Scalar>, ShapeMismatch> {
        match self {
            Self::Uniform(value) => Ok(vec![*value; count]),
            Self::PerSource(values) if values.len() == count => Ok(values.clone()),
            Self::PerSource(values) => Err(ShapeMismatch {
                parameter,
                expected: count,
                found: values.len(),
            }),
        }
    }
}

impl From<Scalar> for SourceParameter {
    fn from(value: Scalar) -> Self {
        Self::Uniform(value)
    }
}

impl From<Vec<Scalar>> for SourceParameter {
    fn from(values: Vec<Scalar>) -> Self {
        Self::PerSource(values)
    }
}

/// Point magnetic dipole.
#[cfg_attr(feature = "serde-serialize", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointDipole {
    /// Position in meters.
    pub position: R3,
    /// Moment magnitude in A·m².
    pub moment: Scalar,
    /// Direction of the moment vector.
    pub orientation: Orientation,
}

impl PointDipole {
    /// Creates a dipole at `position`.
    #[must_use]
    pub const fn new(position: R3, moment: Scalar, orientation: Orientation) -> Self {
        Self {
            position,
            moment,
            orientation,
        }
    }

    /// Moment vector m in A·m².
    #[must_use]
    pub fn moment_vector(&self) -> R3 {
        self.orientation.unit_vector() * self.moment
    }

    /// Flux density (nT) at each of `points`.
    #[must_use]
    pub fn field_at(&self, points: &[R3]) -> Vec<R3> {
        dipole_field(self.position, points, self.moment, self.orientation)
    }
}

#[inline]
fn field_kernel(source: R3, point: R3, m: R3) -> R3 {
    let r_vec = source - point;
    let r = r_vec.norm();
    let r3 = r * r * r;
    let r5 = r3 * r * r;
    (r_vec * (3.0 * m.dot(&r_vec) / r5) - m / r3) * DIPOLE_FIELD_CONSTANT
}

/// Magnetic flux density (nT) of one point dipole at each observation point.
///
/// B = k (3 (m·r) r / |r|⁵ − m / |r|³), with r the separation between source
/// and observation. An observation point coinciding with `source` yields
/// non-finite components; callers must keep the geometry disjoint.
#[must_use]
pub fn dipole_field(
    source: R3,
    observations: &[R3],
    moment: Scalar,
    orientation: Orientation,
) -> Vec<R3> {
    let m = orientation.unit_vector() * moment;
    observations
        .iter()
        .map(|&point| field_kernel(source, point, m))
        .collect()
}

/// Sums the fields of several dipoles at each observation point.
#[must_use]
pub fn field_from_dipoles(dipoles: &[PointDipole], observations: &[R3]) -> Vec<R3> {
    let mut total = vec![R3::zeros(); observations.len()];
    for dipole in dipoles {
        accumulate(&mut total, dipole.field_at(observations));
    }
    total
}

/// Superposes the fields of `sources` at `observations`.
///
/// Moments and angles may be uniform or given per source; per-source arrays
/// must have one entry per source or a [`ShapeMismatch`] is returned.
pub fn field_from_sources(
    sources: &[R3],
    observations: &[R3],
    moments: &SourceParameter,
    inclinations: &SourceParameter,
    declinations: &SourceParameter,
) -> Result<Vec<R3>, ShapeMismatch> {
    let count = sources.len();
    let moments = moments.resolve("moments", count)?;
    let inclinations = inclinations.resolve("inclinations", count)?;
    let declinations = declinations.resolve("declinations", count)?;

    debug!(
        sources = count,
        observations = observations.len(),
        "evaluating dipole fields"
    );

    let dipoles: Vec<PointDipole> = sources
        .iter()
        .zip(moments)
        .zip(inclinations.into_iter().zip(declinations))
        .map(|((&position, moment), (inc, dec))| {
            PointDipole::new(position, moment, Orientation::new(inc, dec))
        })
        .collect();

    Ok(superpose(&dipoles, observations))
}

#[cfg(not(feature = "parallel"))]
fn superpose(dipoles: &[PointDipole], observations: &[R3]) -> Vec<R3> {
    field_from_dipoles(dipoles, observations)
}

#[cfg(feature = "parallel")]
fn superpose(dipoles: &[PointDipole], observations: &[R3]) -> Vec<R3> {
    use rayon::prelude::*;

    let n = observations.len();
    dipoles
        .par_iter()
        .map(|dipole| dipole.field_at(observations))
        .reduce(
            || vec![R3::zeros(); n],
            |mut acc, part| {
                accumulate(&mut acc, part);
                acc
            },
        )
}

#[inline]
fn accumulate(total: &mut [R3], part: Vec<R3>) {
    for (t, p) in total.iter_mut().zip(part) {
        *t += p;
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;

    fn survey_points() -> Vec<R3> {
        vec![
            R3::new(10.0, 0.0, 5.0),
            R3::new(-3.0, 7.0, 2.0),
            R3::new(0.5, -4.0, 12.0),
            R3::new(25.0, 25.0, 1.0),
        ]
    }

    #[test]
    fn on_axis_field_matches_dipole_special_case() {
        let r = 10.0;
        let above = [R3::new(0.0, 0.0, r)];
        let fields = dipole_field(R3::zeros(), &above, 1.0, Orientation::new(90.0, 0.0));
        let b = fields[0];
        let expected = 2.0 * DIPOLE_FIELD_CONSTANT * 1.0 / (r * r * r);
        assert_relative_eq!(b.norm(), expected, max_relative = 1.0e-12);
        assert_relative_eq!(b.z.abs(), expected, max_relative = 1.0e-12);
        assert!(b.x.abs() < 1.0e-12);
        assert!(b.y.abs() < 1.0e-12);
        // Field on the axis is parallel to the moment.
        assert!(b.z < 0.0);
    }

    #[test]
    fn zero_moment_contributes_nothing() {
        let points = survey_points();
        let orientation = Orientation::new(-62.11, -17.9);
        let fields = dipole_field(R3::new(1.0, 2.0, -3.0), &points, 0.0, orientation);
        for b in fields {
            assert_eq!(b, R3::zeros());
        }
    }

    #[test]
    fn field_decays_as_inverse_cube() {
        let dir = R3::new(1.0, 2.0, 3.0).normalize();
        let orientation = Orientation::new(35.0, 120.0);
        let base = dipole_field(R3::zeros(), &[dir * 5.0], 2.5, orientation)[0].norm();
        for k in [2.0, 3.5, 10.0] {
            let scaled = dipole_field(R3::zeros(), &[dir * (5.0 * k)], 2.5, orientation)[0].norm();
            assert_relative_eq!(scaled * k * k * k, base, max_relative = 1.0e-10);
        }
    }

    #[test]
    fn superposition_is_linear_and_order_independent() {
        let points = survey_points();
        let s1 = PointDipole::new(R3::new(0.0, 0.0, -10.0), 3.0, Orientation::new(60.0, 10.0));
        let s2 = PointDipole::new(R3::new(5.0, -5.0, -20.0), 7.5, Orientation::new(-20.0, 250.0));

        let combined = field_from_dipoles(&[s1, s2], &points);
        let reversed = field_from_dipoles(&[s2, s1], &points);
        let f1 = s1.field_at(&points);
        let f2 = s2.field_at(&points);

        for i in 0..points.len() {
            assert_relative_eq!(combined[i], f1[i] + f2[i], max_relative = 1.0e-12);
            assert_relative_eq!(combined[i], reversed[i], max_relative = 1.0e-12);
        }
    }

    #[test]
    fn uniform_parameters_broadcast_to_every_source() {
        let points = survey_points();
        let sources = [R3::new(0.0, 0.0, -10.0), R3::new(4.0, 1.0, -6.0)];
        let uniform = field_from_sources(
            &sources,
            &points,
            &SourceParameter::Uniform(2.0),
            &SourceParameter::Uniform(45.0),
            &SourceParameter::Uniform(-10.0),
        )
        .expect("uniform parameters");
        let explicit = field_from_sources(
            &sources,
            &points,
            &vec![2.0, 2.0].into(),
            &vec![45.0, 45.0].into(),
            &vec![-10.0, -10.0].into(),
        )
        .expect("per-source parameters");
        for (a, b) in uniform.iter().zip(&explicit) {
            assert_relative_eq!(*a, *b, max_relative = 1.0e-12);
        }
    }

    #[test]
    fn mismatched_moment_array_is_rejected() {
        let sources = [R3::new(0.0, 0.0, -10.0), R3::new(4.0, 1.0, -6.0)];
        let err = field_from_sources(
            &sources,
            &survey_points(),
            &SourceParameter::PerSource(vec![1.0, 2.0, 3.0]),
            &SourceParameter::Uniform(90.0),
            &SourceParameter::Uniform(0.0),
        )
        .unwrap_err();
        assert_eq!(
            err,
            ShapeMismatch {
                parameter: "moments",
                expected: 2,
                found: 3
            }
        );
    }

    #[test]
    fn mismatched_angle_arrays_name_the_parameter() {
        let sources = [R3::new(0.0, 0.0, -10.0), R3::new(4.0, 1.0, -6.0)];
        let points = survey_points();
        let err = field_from_sources(
            &sources,
            &points,
            &SourceParameter::Uniform(1.0),
            &SourceParameter::PerSource(vec![90.0]),
            &SourceParameter::Uniform(0.0),
        )
        .unwrap_err();
        assert_eq!(
            err,
            ShapeMismatch {
                parameter: "inclinations",
                expected: 2,
                found: 1
            }
        );

        let err = field_from_sources(
            &sources,
            &points,
            &SourceParameter::Uniform(1.0),
            &SourceParameter::Uniform(90.0),
            &SourceParameter::PerSource(vec![0.0, 10.0, 20.0, 30.0]),
        )
        .unwrap_err();
        assert_eq!(
            err,
            ShapeMismatch {
                parameter: "declinations",
                expected: 2,
                found: 4
            }
        );
    }

    #[test]
    fn no_sources_yields_zero_field() {
        let points = survey_points();
        let fields = field_from_sources(
            &[],
            &points,
            &SourceParameter::Uniform(1.0),
            &SourceParameter::Uniform(0.0),
            &SourceParameter::Uniform(0.0),
        )
        .expect("empty source set");
        assert_eq!(fields.len(), points.len());
        assert!(fields.iter().all(|b| *b == R3::zeros()));
    }

    #[test]
    fn coincident_point_is_not_finite() {
        let fields = dipole_field(R3::zeros(), &[R3::zeros()], 1.0, Orientation::vertical());
        assert!(!fields[0].iter().all(|c| c.is_finite()));
    }
}
