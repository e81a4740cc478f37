//! Point-dipole magnetic fields and their projection onto an ambient field.

mod dipole;
mod magnetic;
mod orientation;
mod projection;

pub use dipole::{
    dipole_field, field_from_dipoles, field_from_sources, PointDipole, ShapeMismatch,
    SourceParameter,
};
pub use magnetic::MagneticField;
pub use orientation::{direction_from_angles, Orientation};
pub use projection::tmi_projection;
