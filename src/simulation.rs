//! Dipole forward simulation on arbitrary source and receiver geometry.

use std::io;
use std::io::Write;

use tracing::debug;

use crate::fields::{
    field_from_sources, tmi_projection, MagneticField, Orientation, ShapeMismatch, SourceParameter,
};
use crate::geometry::Locations;
use crate::math::{R3, Scalar};

/// Errors that can occur while configuring or executing simulations.
#[derive(Debug, thiserror::Error)]
pub enum SimulationError {
    /// Per-source parameter does not match the source count.
    #[error(transparent)]
    Shape(#[from] ShapeMismatch),
    /// Raised when a required parameter is missing.
    #[error("missing parameter: {0}")]
    MissingParameter(&'static str),
    /// Raised when the configuration is internally inconsistent.
    #[error("configuration error: {0}")]
    InvalidConfig(String),
}

/// Names of the data arrays produced by a simulation, in output order.
pub const RESULT_NAMES: [&str; 4] = ["b_x", "b_y", "b_z", "tmi"];

/// Field components and total magnetic intensity at every receiver.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FieldResult {
    /// Flux density vectors (nT), one per receiver.
    pub fields: Vec<R3>,
    /// Projection onto the ambient field (nT), one per receiver.
    pub tmi: Vec<Scalar>,
}

impl FieldResult {
    /// Number of receivers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// True if there are no receivers.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Splits the field vectors into x, y and z component arrays.
    #[must_use]
    pub fn components(&self) -> [Vec<Scalar>; 3] {
        [
            self.fields.iter().map(|b| b.x).collect(),
            self.fields.iter().map(|b| b.y).collect(),
            self.fields.iter().map(|b| b.z).collect(),
        ]
    }

    /// Largest field vector, if any.
    #[must_use]
    pub fn peak(&self) -> Option<MagneticField> {
        self.fields
            .iter()
            .copied()
            .max_by(|a, b| a.norm().total_cmp(&b.norm()))
            .map(MagneticField::from_vector)
    }

    /// Index of the first receiver whose field or TMI is NaN or infinite.
    #[must_use]
    pub fn first_non_finite(&self) -> Option<usize> {
        self.fields
            .iter()
            .zip(&self.tmi)
            .position(|(b, t)| !(b.iter().all(|c| c.is_finite()) && t.is_finite()))
    }

    /// Named output arrays `b_x`, `b_y`, `b_z`, `tmi`.
    #[must_use]
    pub fn data_arrays(&self) -> Vec<(&'static str, Vec<Scalar>)> {
        let [bx, by, bz] = self.components();
        RESULT_NAMES.into_iter().zip([bx, by, bz, self.tmi.clone()]).collect()
    }
}

/// Magnetic response of a set of dipoles observed at a set of receivers.
#[derive(Debug, Clone)]
pub struct MagneticSimulation {
    sources: Vec<R3>,
    receivers: Vec<R3>,
    moments: SourceParameter,
    inclinations: SourceParameter,
    declinations: SourceParameter,
    earth_field: Orientation,
}

impl MagneticSimulation {
    /// Creates a simulation under a vertical ambient field.
    pub fn new<S, R>(
        sources: &S,
        receivers: &R,
        moments: impl Into<SourceParameter>,
        inclinations: impl Into<SourceParameter>,
        declinations: impl Into<SourceParameter>,
    ) -> Self
    where
        S: Locations + ?Sized,
        R: Locations + ?Sized,
    {
        Self {
            sources: sources.observation_points(),
            receivers: receivers.observation_points(),
            moments: moments.into(),
            inclinations: inclinations.into(),
            declinations: declinations.into(),
            earth_field: Orientation::vertical(),
        }
    }

    /// Sets the ambient field direction used for the TMI projection.
    #[must_use]
    pub fn with_earth_field(mut self, earth_field: Orientation) -> Self {
        self.earth_field = earth_field;
        self
    }

    /// Dipole locations.
    #[must_use]
    pub fn sources(&self) -> &[R3] {
        &self.sources
    }

    /// Receiver locations.
    #[must_use]
    pub fn receivers(&self) -> &[R3] {
        &self.receivers
    }

    /// Ambient field direction.
    #[must_use]
    pub fn earth_field(&self) -> Orientation {
        self.earth_field
    }

    /// Summed dipole fields at every receiver.
    pub fn compute(&self) -> Result<Vec<R3>, SimulationError> {
        if self.sources.is_empty() {
            return Err(SimulationError::MissingParameter("sources"));
        }
        let fields = field_from_sources(
            &self.sources,
            &self.receivers,
            &self.moments,
            &self.inclinations,
            &self.declinations,
        )?;
        Ok(fields)
    }

    /// Projects `fields` onto the ambient field direction.
    #[must_use]
    pub fn tmi_projection(&self, fields: &[R3]) -> Vec<Scalar> {
        tmi_projection(fields, self.earth_field)
    }

    /// Computes field components and TMI.
    pub fn simulate(&self) -> Result<FieldResult, SimulationError> {
        let fields = self.compute()?;
        let tmi = self.tmi_projection(&fields);
        debug!(receivers = fields.len(), "simulation complete");
        Ok(FieldResult { fields, tmi })
    }
}

/// Writes receiver coordinates, field components and TMI as CSV.
pub fn write_field_csv<W: Write>(
    mut w: W,
    receivers: &[R3],
    result: &FieldResult,
) -> io::Result<()> {
    if receivers.len() != result.len() || result.tmi.len() != result.len() {
        return Err(io::Error::new(
            io::ErrorKind::InvalidInput,
            "receiver count does not match result length",
        ));
    }
    writeln!(w, "x,y,z,b_x,b_y,b_z,tmi")?;
    for ((p, b), t) in receivers.iter().zip(&result.fields).zip(&result.tmi) {
        writeln!(
            w,
            "{:.16e},{:.16e},{:.16e},{:.16e},{:.16e},{:.16e},{:.16e}",
            p.x, p.y, p.z, b.x, b.y, b.z, t
        )?;
    }
    Ok(())
}
