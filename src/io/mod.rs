//! I/O helpers for exporting simulation data.

pub mod vtk;

pub use crate::simulation::write_field_csv;
pub use vtk::*;
