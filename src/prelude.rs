//! Convenience re-exports for building dipole simulations.

pub use crate::app::{resolve_parameter, run, simulate_in_workspace};
pub use crate::constants::*;
pub use crate::errors::MagDipoleError;
pub use crate::fields::{
    dipole_field, direction_from_angles, field_from_dipoles, field_from_sources, tmi_projection,
    MagneticField, Orientation, PointDipole, ShapeMismatch, SourceParameter,
};
pub use crate::geometry::{Grid2D, Locations, Points};
pub use crate::io::{write_field_csv, write_vtk_points};
pub use crate::math::{linspace, wrap_degrees, R3, Scalar};
pub use crate::simulation::{FieldResult, MagneticSimulation, SimulationError, RESULT_NAMES};
pub use crate::ui_json::{MagDipoleUi, ParameterInput, UiJsonError};
pub use crate::workspace::{monitored_copy, Geometry, ObjectEntity, Workspace, WorkspaceError};
