//! Program entry point driven by a ui.json parameter file.

use std::path::Path;

use tracing::{info, info_span};

use crate::errors::MagDipoleError;
use crate::fields::SourceParameter;
use crate::geometry::Locations;
use crate::math::R3;
use crate::simulation::{FieldResult, MagneticSimulation, SimulationError};
use crate::ui_json::{MagDipoleUi, ParameterInput};
use crate::workspace::{monitored_copy, ObjectEntity, Workspace, WorkspaceError};

/// Maps a ui.json parameter onto a per-source kernel parameter.
///
/// Data references are looked up on the `sources` object.
pub fn resolve_parameter(
    input: &ParameterInput,
    sources: &ObjectEntity,
) -> Result<SourceParameter, WorkspaceError> {
    match input {
        ParameterInput::Value(value) => Ok(SourceParameter::Uniform(*value)),
        ParameterInput::Data(name) => {
            Ok(SourceParameter::PerSource(sources.data_values(name)?.to_vec()))
        }
    }
}

/// Runs the simulation described by an already parsed ui.json against `workspace`.
///
/// Results are stored on the receiver object as `b_x`, `b_y`, `b_z` and `tmi`.
/// Non-finite results (a receiver coinciding with a source) are rejected and
/// nothing is stored.
pub fn simulate_in_workspace(
    ui: &MagDipoleUi,
    workspace: &mut Workspace,
) -> Result<FieldResult, MagDipoleError> {
    let sources = workspace.get(&ui.sources.value)?;
    let receivers = workspace.get(&ui.receivers.value)?;

    let simulation = MagneticSimulation::new(
        sources,
        receivers,
        resolve_parameter(&ui.moments.input(), sources)?,
        resolve_parameter(&ui.inclination.input(), sources)?,
        resolve_parameter(&ui.declination.input(), sources)?,
    )
    .with_earth_field(ui.earth_field());

    info!(
        sources = simulation.sources().len(),
        receivers = simulation.receivers().len(),
        "running dipole simulation"
    );
    let result = simulation.simulate()?;
    if let Some(index) = result.first_non_finite() {
        return Err(SimulationError::InvalidConfig(format!(
            "non-finite field at receiver {index} of `{}`: receiver coincides with a source",
            ui.receivers.value
        ))
        .into());
    }

    let receivers = workspace.get_mut(&ui.receivers.value)?;
    for (name, values) in result.data_arrays() {
        receivers.add_data(name, values)?;
    }
    Ok(result)
}

/// Outcome of [`run`].
#[derive(Debug, Clone)]
pub struct RunSummary {
    /// Title of the parameter file.
    pub title: String,
    /// Receiver locations the results are aligned with.
    pub receivers: Vec<R3>,
    /// Computed fields and TMI.
    pub result: FieldResult,
}

/// Reads the ui.json at `file`, runs the simulation and saves the workspace.
///
/// The workspace file is only rewritten when the whole run succeeds. When a
/// monitoring directory is configured, the receiver object is copied there
/// after the workspace has been saved.
pub fn run(file: impl AsRef<Path>) -> Result<RunSummary, MagDipoleError> {
    let file = file.as_ref();
    let _span = info_span!("run", file = %file.display()).entered();

    let ui = MagDipoleUi::read(file)?;
    info!(workspace = %ui.geoh5.display(), "loaded parameters");

    let (entity, result) = Workspace::modify(&ui.geoh5, |ws| -> Result<_, MagDipoleError> {
        let result = simulate_in_workspace(&ui, ws)?;
        Ok((ws.get(&ui.receivers.value)?.clone(), result))
    })?;
    if let Some(dir) = &ui.monitoring_directory {
        monitored_copy(dir, &entity)?;
    }
    let receivers = entity.observation_points();

    if let Some(peak) = result.peak() {
        info!(peak_nt = peak.magnitude, "simulation stored on `{}`", ui.receivers.value);
    }
    Ok(RunSummary {
        title: ui.title,
        receivers,
        result,
    })
}
