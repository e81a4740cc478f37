//! Observation and source geometry.
//!
//! Point-like objects expose their vertices and cell-like objects expose their
//! cell centroids; both are reached through [`Locations`] so that the field
//! kernel never needs to know which kind of object it is evaluating on.

use serde::{Deserialize, Serialize};

use crate::math::{rows_to_vectors, R3, Scalar};

/// Anything that can provide an ordered set of 3D locations.
pub trait Locations {
    /// Locations in meters, in the object's canonical order.
    fn observation_points(&self) -> Vec<R3>;

    /// Number of locations.
    fn location_count(&self) -> usize {
        self.observation_points().len()
    }
}

impl Locations for [R3] {
    fn observation_points(&self) -> Vec<R3> {
        self.to_vec()
    }

    fn location_count(&self) -> usize {
        self.len()
    }
}

impl Locations for Vec<R3> {
    fn observation_points(&self) -> Vec<R3> {
        self.clone()
    }

    fn location_count(&self) -> usize {
        self.len()
    }
}

/// Cloud of discrete vertices.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Points {
    /// Vertex coordinates `[x, y, z]` in meters.
    pub vertices: Vec<[Scalar; 3]>,
}

impl Points {
    /// Creates a point cloud from coordinate rows.
    #[must_use]
    pub fn new(vertices: Vec<[Scalar; 3]>) -> Self {
        Self { vertices }
    }

    /// Creates a point cloud from vectors.
    #[must_use]
    pub fn from_vectors(points: &[R3]) -> Self {
        Self::new(points.iter().map(|p| [p.x, p.y, p.z]).collect())
    }
}

impl Locations for Points {
    fn observation_points(&self) -> Vec<R3> {
        rows_to_vectors(&self.vertices)
    }

    fn location_count(&self) -> usize {
        self.vertices.len()
    }
}

/// Regular horizontal grid of rectangular cells, evaluated at cell centroids.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Grid2D {
    /// Corner of the first cell `[x, y, z]` in meters.
    pub origin: [Scalar; 3],
    /// Cell size along u (meters).
    pub u_cell_size: Scalar,
    /// Cell size along v (meters).
    pub v_cell_size: Scalar,
    /// Number of cells along u.
    pub u_count: usize,
    /// Number of cells along v.
    pub v_count: usize,
    /// Counter-clockwise rotation of the u axis from east, in degrees.
    #[serde(default)]
    pub rotation: Scalar,
}

impl Grid2D {
    /// Creates an unrotated grid.
    #[must_use]
    pub fn new(
        origin: [Scalar; 3],
        u_cell_size: Scalar,
        v_cell_size: Scalar,
        u_count: usize,
        v_count: usize,
    ) -> Self {
        Self {
            origin,
            u_cell_size,
            v_cell_size,
            u_count,
            v_count,
            rotation: 0.0,
        }
    }

    /// Sets the grid rotation in degrees.
    #[must_use]
    pub fn with_rotation(mut self, rotation: Scalar) -> Self {
        self.rotation = rotation;
        self
    }

    /// Total number of cells.
    #[must_use]
    pub fn n_cells(&self) -> usize {
        self.u_count * self.v_count
    }

    /// Cell centroids with the u index varying fastest.
    #[must_use]
    pub fn centroids(&self) -> Vec<R3> {
        let (sin, cos) = self.rotation.to_radians().sin_cos();
        let origin = R3::from(self.origin);
        let mut out = Vec::with_capacity(self.n_cells());
        for j in 0..self.v_count {
            let v = self.v_cell_size * (j as Scalar + 0.5);
            for i in 0..self.u_count {
                let u = self.u_cell_size * (i as Scalar + 0.5);
                out.push(origin + R3::new(u * cos - v * sin, u * sin + v * cos, 0.0));
            }
        }
        out
    }
}

impl Locations for Grid2D {
    fn observation_points(&self) -> Vec<R3> {
        self.centroids()
    }

    fn location_count(&self) -> usize {
        self.n_cells()
    }
}
