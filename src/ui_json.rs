//! Reader and template writer for the `ui.json` parameter description file.
//!
//! A host application renders each entry as a form, lets the user fill it in,
//! and writes the file back before invoking the program with its path. Object
//! forms name workspace objects; data forms either carry a literal value
//! (`isValue: true`) or name a data array (`property`) on their parent object.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::fields::Orientation;
use crate::math::Scalar;

/// Errors raised while reading or writing a ui.json file.
#[derive(Debug, Error)]
pub enum UiJsonError {
    /// Underlying file-system failure.
    #[error("ui.json i/o error on {}: {source}", .path.display())]
    Io {
        /// File being accessed.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: io::Error,
    },
    /// Malformed JSON or missing required forms.
    #[error("invalid ui.json {}: {source}", .path.display())]
    Json {
        /// File being parsed.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: serde_json::Error,
    },
    /// Structurally valid file with unusable content.
    #[error("invalid ui.json parameter `{parameter}`: {reason}")]
    Invalid {
        /// Offending form.
        parameter: &'static str,
        /// Explanation.
        reason: String,
    },
}

/// Form selecting a workspace object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ObjectForm {
    /// Label shown in the host application.
    pub label: String,
    /// Marks the form as part of the main panel.
    #[serde(default)]
    pub main: bool,
    /// Accepted object types; empty accepts any.
    #[serde(default)]
    pub mesh_type: String,
    /// Selected object name.
    #[serde(default)]
    pub value: String,
}

/// Form accepting either a literal value or a data array on a parent object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DataForm {
    /// Label shown in the host application.
    pub label: String,
    /// Marks the form as part of the main panel.
    #[serde(default)]
    pub main: bool,
    /// Name of the object form whose data may be selected.
    #[serde(default)]
    pub parent: String,
    /// Use `value` when true, `property` otherwise.
    #[serde(default)]
    pub is_value: bool,
    /// Selected data array name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub property: Option<String>,
    /// Literal value.
    #[serde(default)]
    pub value: Scalar,
}

/// Value requested by a [`DataForm`].
#[derive(Debug, Clone, PartialEq)]
pub enum ParameterInput {
    /// Literal value broadcast to every source.
    Value(Scalar),
    /// Data array name on the parent object.
    Data(String),
}

impl DataForm {
    fn new(label: &str, parent: &str, value: Scalar) -> Self {
        Self {
            label: label.to_owned(),
            main: true,
            parent: parent.to_owned(),
            is_value: true,
            property: Some(String::new()),
            value,
        }
    }

    /// Resolves the form to a literal value or a data reference.
    ///
    /// A form switched to data mode without a selected array falls back to
    /// its literal value.
    #[must_use]
    pub fn input(&self) -> ParameterInput {
        match &self.property {
            Some(name) if !self.is_value && !name.is_empty() => ParameterInput::Data(name.clone()),
            _ => ParameterInput::Value(self.value),
        }
    }
}

/// Form holding a single float.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FloatForm {
    /// Label shown in the host application.
    pub label: String,
    /// Marks the form as part of the main panel.
    #[serde(default)]
    pub main: bool,
    /// Current value.
    pub value: Scalar,
}

impl FloatForm {
    fn new(label: &str, value: Scalar) -> Self {
        Self {
            label: label.to_owned(),
            main: true,
            value,
        }
    }
}

/// Parameters of the magnetic dipole program.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MagDipoleUi {
    /// Window title.
    pub title: String,
    /// Program invoked by the host application.
    #[serde(default)]
    pub run_command: Option<String>,
    /// Environment the host activates before running.
    #[serde(default)]
    pub conda_environment: Option<String>,
    /// Workspace file path.
    pub geoh5: PathBuf,
    /// Directory receiving copies of the results.
    #[serde(default)]
    pub monitoring_directory: Option<PathBuf>,
    /// Dipole locations.
    pub sources: ObjectForm,
    /// Observation locations.
    pub receivers: ObjectForm,
    /// Dipole moments (A·m²).
    pub moments: DataForm,
    /// Dipole inclinations (degrees).
    pub inclination: DataForm,
    /// Dipole declinations (degrees).
    pub declination: DataForm,
    /// Ambient field inclination (degrees).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub earth_inc: Option<FloatForm>,
    /// Ambient field declination (degrees).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub earth_dec: Option<FloatForm>,
}

impl MagDipoleUi {
    /// Default form set for the dipole program.
    #[must_use]
    pub fn template() -> Self {
        Self {
            title: "Magnetic Dipole App".to_owned(),
            run_command: Some("mag-dipole".to_owned()),
            conda_environment: None,
            geoh5: PathBuf::from("workspace.json"),
            monitoring_directory: None,
            sources: ObjectForm {
                label: "Dipoles".to_owned(),
                main: true,
                mesh_type: String::new(),
                value: String::new(),
            },
            receivers: ObjectForm {
                label: "Receivers".to_owned(),
                main: true,
                mesh_type: String::new(),
                value: String::new(),
            },
            moments: DataForm::new("Dipole Moment", "sources", 1.0),
            inclination: DataForm::new("Dipole Inclination", "sources", -62.11),
            declination: DataForm::new("Dipole Declination", "sources", -17.9),
            earth_inc: Some(FloatForm::new("Earth Field Inclination", 90.0)),
            earth_dec: Some(FloatForm::new("Earth Field Declination", 0.0)),
        }
    }

    /// Reads and validates a ui.json file.
    ///
    /// A relative `geoh5` or monitoring path is resolved against the directory
    /// containing the file.
    pub fn read(path: impl AsRef<Path>) -> Result<Self, UiJsonError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| UiJsonError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let mut ui: Self = serde_json::from_str(&text).map_err(|source| UiJsonError::Json {
            path: path.to_path_buf(),
            source,
        })?;

        let base = path.parent().unwrap_or_else(|| Path::new(""));
        if ui.geoh5.is_relative() {
            ui.geoh5 = base.join(&ui.geoh5);
        }
        ui.monitoring_directory = ui
            .monitoring_directory
            .take()
            .filter(|dir| !dir.as_os_str().is_empty())
            .map(|dir| if dir.is_relative() { base.join(dir) } else { dir });

        ui.validate()?;
        Ok(ui)
    }

    /// Writes the form set to `path` as pretty-printed JSON.
    pub fn write(&self, path: impl AsRef<Path>) -> Result<(), UiJsonError> {
        let path = path.as_ref();
        let text = serde_json::to_string_pretty(self).map_err(|source| UiJsonError::Json {
            path: path.to_path_buf(),
            source,
        })?;
        fs::write(path, text).map_err(|source| UiJsonError::Io {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Ambient field direction, vertical when not specified.
    #[must_use]
    pub fn earth_field(&self) -> Orientation {
        let default = Orientation::vertical();
        Orientation::new(
            self.earth_inc.as_ref().map_or(default.inclination, |f| f.value),
            self.earth_dec.as_ref().map_or(default.declination, |f| f.value),
        )
    }

    fn validate(&self) -> Result<(), UiJsonError> {
        for (parameter, form) in [("sources", &self.sources), ("receivers", &self.receivers)] {
            if form.value.is_empty() {
                return Err(UiJsonError::Invalid {
                    parameter,
                    reason: "no object selected".to_owned(),
                });
            }
        }
        Ok(())
    }
}
