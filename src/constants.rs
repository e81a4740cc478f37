//! Physical constants and unit scaling for dipole forward modelling.
//!
//! ## Units
//!
//! Moments are in ampere square metres (A·m²), distances in metres and field
//! outputs in nanotesla (nT). The dipole scaling constant folds μ₀/4π together
//! with the tesla to nanotesla conversion.
//!
//! ## References
//!
//! - NIST Reference on Constants, Units, and Uncertainty: <https://physics.nist.gov/cuu/Constants/>
//! - Blakely, R. J. (1995). Potential Theory in Gravity and Magnetic Applications.
//!   Cambridge University Press.

/// Vacuum permeability μ₀ in henries per meter (H/m).
/// Approximate value: 1.25663706212 × 10⁻⁶ H/m (12 significant figures).
/// Note: CODATA 2022 value is 1.25663706127 × 10⁻⁶ H/m with relative uncertainty ~10⁻¹⁰.
pub const VACUUM_PERMEABILITY: f64 = 1.256_637_062_12e-6;

/// Number of nanotesla in one tesla.
pub const NANOTESLA_PER_TESLA: f64 = 1.0e9;

/// Dipole field scaling constant k = μ₀/4π · 10⁹ in nT·m³/(A·m²).
///
/// Uses the pre-2019 exact value μ₀/4π = 10⁻⁷, which agrees with
/// [`VACUUM_PERMEABILITY`] to better than one part in 10⁹.
pub const DIPOLE_FIELD_CONSTANT: f64 = 1.0e2;

/// Returns μ₀/4π · 10⁹ evaluated from the CODATA permeability.
#[inline]
#[must_use]
pub fn dipole_constant_from_permeability() -> f64 {
    VACUUM_PERMEABILITY / (4.0 * std::f64::consts::PI) * NANOTESLA_PER_TESLA
}
