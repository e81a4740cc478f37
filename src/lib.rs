#![cfg_attr(docsrs, feature(doc_auto_cfg))]
#![warn(clippy::all, clippy::cargo, clippy::nursery, missing_docs)]
#![doc = include_str!("../README.md")]

/// Physical constants and unit scaling.
pub mod constants;
/// Shared mathematical utilities (vectors, angles, sampling).
pub mod math;
/// Dipole field kernel: orientation, superposition and TMI projection.
pub mod fields;
/// Source and receiver geometry.
pub mod geometry;
/// File-backed workspace of objects and data arrays.
pub mod workspace;
/// ui.json parameter description files.
pub mod ui_json;
/// Dipole simulation orchestration and result handling.
pub mod simulation;
/// Driver running a simulation from a ui.json file.
pub mod app;
/// Result exporters.
pub mod io;
/// Error types shared between submodules.
pub mod errors;

/// Common exports for downstream crates.
pub mod prelude;
