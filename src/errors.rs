//! Shared error types used across submodules.

use thiserror::Error;

use crate::simulation::SimulationError;
use crate::ui_json::UiJsonError;
use crate::workspace::WorkspaceError;

/// Top-level error type for the crate.
#[derive(Debug, Error)]
pub enum MagDipoleError {
    /// Wraps simulation-related errors.
    #[error(transparent)]
    Simulation(#[from] SimulationError),
    /// Wraps workspace access errors.
    #[error(transparent)]
    Workspace(#[from] WorkspaceError),
    /// Wraps parameter file errors.
    #[error(transparent)]
    UiJson(#[from] UiJsonError),
    /// Raised when exporting results fails.
    #[error("export error: {0}")]
    Io(#[from] std::io::Error),
}
