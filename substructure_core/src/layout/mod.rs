//! # Pier-Local Layouts
//!
//! Pure derivations of the pier-local geometry. Every function here reads
//! only its own slice of the parameters and is independent of the station
//! it will later be placed at.
//!
//! - [`profile`] - pier-cap cross-section polygon
//! - [`pile_grid`] - pile-cap plan size and pile centers
//! - [`columns`] - column centers along the pier-cap width
//!
//! Local frame: `x` across the pier (pier-cap width), `y` up, `z` along the
//! alignment.

pub mod columns;
pub mod pile_grid;
pub mod profile;

use serde::{Deserialize, Serialize};

pub use columns::{column_layout, ColumnSet};
pub use pile_grid::{pile_grid_layout, PileGrid};
pub use profile::{pier_cap_profile, PierCapProfile};

/// 2D point type (profile plane: x across, y up).
pub type Point2 = nalgebra::Point2<f64>;

/// 3D point type.
pub type Point3 = nalgebra::Point3<f64>;

/// 3D vector type.
pub type Vector3 = nalgebra::Vector3<f64>;

/// A point on the local plan (x across, z along the alignment).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlanPoint {
    pub x: f64,
    pub z: f64,
}

impl PlanPoint {
    pub fn new(x: f64, z: f64) -> Self {
        PlanPoint { x, z }
    }

    /// Lift onto the local 3D frame at height `y`.
    pub fn at_height(self, y: f64) -> Point3 {
        Point3::new(self.x, y, self.z)
    }
}
