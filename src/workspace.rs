//! File-backed workspace of named objects carrying tagged data arrays.
//!
//! The on-disk form is a JSON document:
//!
//! ```json
//! {
//!   "objects": [
//!     { "name": "dipoles", "type": "points", "vertices": [[0, 0, -10]],
//!       "data": { "moment": [2.5] } },
//!     { "name": "survey", "type": "grid2d", "origin": [0, 0, 1],
//!       "u_cell_size": 5, "v_cell_size": 5, "u_count": 20, "v_count": 20 }
//!   ]
//! }
//! ```
//!
//! Files are only ever replaced whole: writes go to a sibling temporary file
//! that is renamed over the target.

use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::geometry::{Grid2D, Locations, Points};
use crate::math::{R3, Scalar};

/// Errors raised while reading, querying or writing a workspace.
#[derive(Debug, Error)]
pub enum WorkspaceError {
    /// Underlying file-system failure.
    #[error("workspace i/o error on {}: {source}", .path.display())]
    Io {
        /// File being accessed.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: io::Error,
    },
    /// Malformed workspace document.
    #[error("invalid workspace file {}: {source}", .path.display())]
    Json {
        /// File being parsed.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: serde_json::Error,
    },
    /// No object with the requested name.
    #[error("object `{0}` not found in workspace")]
    MissingObject(String),
    /// No data array with the requested name on the object.
    #[error("data `{data}` not found on object `{object}`")]
    MissingData {
        /// Object searched.
        object: String,
        /// Requested data name.
        data: String,
    },
    /// Data array length does not match the object's location count.
    #[error("data `{data}` on `{object}` has {found} values, object has {expected} locations")]
    DataLength {
        /// Target object.
        object: String,
        /// Data name.
        data: String,
        /// Location count of the object.
        expected: usize,
        /// Supplied length.
        found: usize,
    },
}

/// Geometry carried by a workspace object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Geometry {
    /// Discrete vertices.
    Points(Points),
    /// Regular grid evaluated at centroids.
    #[serde(rename = "grid2d")]
    Grid2D(Grid2D),
}

impl Locations for Geometry {
    fn observation_points(&self) -> Vec<R3> {
        match self {
            Self::Points(points) => points.observation_points(),
            Self::Grid2D(grid) => grid.observation_points(),
        }
    }

    fn location_count(&self) -> usize {
        match self {
            Self::Points(points) => points.location_count(),
            Self::Grid2D(grid) => grid.location_count(),
        }
    }
}

/// Named object with geometry and data arrays aligned to its locations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObjectEntity {
    /// Unique object name.
    pub name: String,
    /// Geometry description.
    #[serde(flatten)]
    pub geometry: Geometry,
    /// Data arrays keyed by name.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub data: BTreeMap<String, Vec<Scalar>>,
}

impl ObjectEntity {
    /// Creates an object without data.
    #[must_use]
    pub fn new(name: impl Into<String>, geometry: Geometry) -> Self {
        Self {
            name: name.into(),
            geometry,
            data: BTreeMap::new(),
        }
    }

    /// Looks up a data array by name.
    pub fn data_values(&self, name: &str) -> Result<&[Scalar], WorkspaceError> {
        self.data
            .get(name)
            .map(Vec::as_slice)
            .ok_or_else(|| WorkspaceError::MissingData {
                object: self.name.clone(),
                data: name.to_owned(),
            })
    }

    /// Attaches a data array, replacing any array of the same name.
    pub fn add_data(
        &mut self,
        name: impl Into<String>,
        values: Vec<Scalar>,
    ) -> Result<(), WorkspaceError> {
        let name = name.into();
        let expected = self.geometry.location_count();
        if values.len() != expected {
            return Err(WorkspaceError::DataLength {
                object: self.name.clone(),
                data: name,
                expected,
                found: values.len(),
            });
        }
        if self.data.insert(name.clone(), values).is_some() {
            warn!(object = %self.name, data = %name, "replaced existing data");
        }
        Ok(())
    }
}

impl Locations for ObjectEntity {
    fn observation_points(&self) -> Vec<R3> {
        self.geometry.observation_points()
    }

    fn location_count(&self) -> usize {
        self.geometry.location_count()
    }
}

/// In-memory view of a workspace file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Workspace {
    /// Objects in insertion order.
    #[serde(default)]
    pub objects: Vec<ObjectEntity>,
}

impl Workspace {
    /// Creates an empty workspace.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Reads a workspace from `path`.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, WorkspaceError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| WorkspaceError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let ws: Self = serde_json::from_str(&text).map_err(|source| WorkspaceError::Json {
            path: path.to_path_buf(),
            source,
        })?;
        debug!(path = %path.display(), objects = ws.objects.len(), "opened workspace");
        Ok(ws)
    }

    /// Writes the workspace to `path`, replacing the file atomically.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), WorkspaceError> {
        let path = path.as_ref();
        let text = serde_json::to_string_pretty(self).map_err(|source| WorkspaceError::Json {
            path: path.to_path_buf(),
            source,
        })?;
        write_replacing(path, text.as_bytes())?;
        debug!(path = %path.display(), "saved workspace");
        Ok(())
    }

    /// Opens the workspace at `path`, applies `f`, and saves only if `f` succeeds.
    pub fn modify<T, E, F>(path: impl AsRef<Path>, f: F) -> Result<T, E>
    where
        F: FnOnce(&mut Self) -> Result<T, E>,
        E: From<WorkspaceError>,
    {
        let path = path.as_ref();
        let mut ws = Self::open(path)?;
        let out = f(&mut ws)?;
        ws.save(path)?;
        Ok(out)
    }

    /// Adds an object, replacing any object with the same name.
    pub fn add_object(&mut self, object: ObjectEntity) {
        match self.objects.iter_mut().find(|o| o.name == object.name) {
            Some(existing) => {
                warn!(object = %object.name, "replaced existing object");
                *existing = object;
            }
            None => self.objects.push(object),
        }
    }

    /// Looks up an object by name.
    pub fn get(&self, name: &str) -> Result<&ObjectEntity, WorkspaceError> {
        self.objects
            .iter()
            .find(|o| o.name == name)
            .ok_or_else(|| WorkspaceError::MissingObject(name.to_owned()))
    }

    /// Looks up an object by name for modification.
    pub fn get_mut(&mut self, name: &str) -> Result<&mut ObjectEntity, WorkspaceError> {
        self.objects
            .iter_mut()
            .find(|o| o.name == name)
            .ok_or_else(|| WorkspaceError::MissingObject(name.to_owned()))
    }
}

/// Copies `object` into a fresh workspace file inside the monitoring directory `dir`.
///
/// Returns the path of the written file.
pub fn monitored_copy(
    dir: impl AsRef<Path>,
    object: &ObjectEntity,
) -> Result<PathBuf, WorkspaceError> {
    let dir = dir.as_ref();
    fs::create_dir_all(dir).map_err(|source| WorkspaceError::Io {
        path: dir.to_path_buf(),
        source,
    })?;
    let mut copy = Workspace::new();
    copy.add_object(object.clone());
    let target = dir.join(format!("{}.workspace.json", object.name));
    copy.save(&target)?;
    info!(path = %target.display(), "copied results to monitoring directory");
    Ok(target)
}

fn write_replacing(path: &Path, bytes: &[u8]) -> Result<(), WorkspaceError> {
    let io_err = |source| WorkspaceError::Io {
        path: path.to_path_buf(),
        source,
    };
    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    let tmp = path.with_file_name(format!(".{file_name}.tmp"));
    fs::write(&tmp, bytes).map_err(io_err)?;
    if let Err(err) = fs::rename(&tmp, path) {
        let _ = fs::remove_file(&tmp);
        return Err(io_err(err));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Workspace {
        let mut ws = Workspace::new();
        let mut dipoles = ObjectEntity::new(
            "dipoles",
            Geometry::Points(Points::new(vec![[0.0, 0.0, -10.0], [5.0, 0.0, -12.0]])),
        );
        dipoles.add_data("moment", vec![1.0, 2.0]).expect("two values");
        ws.add_object(dipoles);
        ws.add_object(ObjectEntity::new(
            "grid",
            Geometry::Grid2D(Grid2D::new([0.0, 0.0, 1.0], 5.0, 5.0, 4, 3)),
        ));
        ws
    }

    #[test]
    fn add_data_checks_length() {
        let mut ws = sample();
        let grid = ws.get_mut("grid").expect("grid exists");
        let err = grid.add_data("tmi", vec![0.0; 5]).unwrap_err();
        assert!(matches!(
            err,
            WorkspaceError::DataLength { expected: 12, found: 5, .. }
        ));
        grid.add_data("tmi", vec![0.0; 12]).expect("matching length");
        grid.add_data("tmi", vec![1.0; 12]).expect("replacement");
        assert_eq!(grid.data_values("tmi").expect("present")[0], 1.0);
    }

    #[test]
    fn lookups_report_missing_names() {
        let ws = sample();
        assert!(matches!(ws.get("nope"), Err(WorkspaceError::MissingObject(_))));
        let dipoles = ws.get("dipoles").expect("present");
        assert!(matches!(
            dipoles.data_values("azimuth"),
            Err(WorkspaceError::MissingData { .. })
        ));
    }

    #[test]
    fn json_document_uses_tagged_geometry() {
        let text = serde_json::to_string(&sample()).expect("serializable");
        assert!(text.contains("\"type\":\"points\""));
        assert!(text.contains("\"type\":\"grid2d\""));
        let back: Workspace = serde_json::from_str(&text).expect("parsable");
        assert_eq!(back, sample());
    }
}
