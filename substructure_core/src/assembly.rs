//! # Geometry Assembler
//!
//! Places the pier-local layouts at every station and hands back a plain,
//! renderer-agnostic description: boxes, cylinders and one extrusion per
//! pier, all in world coordinates.
//!
//! The only arithmetic here is coordinate composition:
//!
//! ```text
//! world = station.position + Ry(station.orientation) · local
//! ```
//!
//! ## Vertical stack (local y)
//!
//! ```text
//!  H + T ┌──────── pier cap ────────┐   H = base column height + elevation
//!      H └──┬───────────────────┬───┘   T = pier cap thickness
//!           │ column            │
//!      0 ┌──┴───────────────────┴───┐
//!        │        pile cap          │
//!   −Tpc └──┬────┬────┬────┬────┬───┘
//!           │    │    │    │    │       piles: top at −Tpc + embedment,
//!                                       length L, centered L/2 below that
//! ```

use nalgebra::Rotation3;
use serde::{Deserialize, Serialize};

use crate::alignment::PierStation;
use crate::layout::{ColumnSet, PierCapProfile, PileGrid, PlanPoint, Point3, Vector3};
use crate::params::{ColumnShape, SubstructureParams, ViewToggles};
use crate::quantities::column_height_at;

/// Dimensions the assembler reads besides the layouts.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AssemblyInput {
    pub pile_length_in: f64,
    pub pile_embedment_in: f64,
    pub pile_cap_thickness_in: f64,
    pub column_shape: ColumnShape,
    pub column_width_in: f64,
    pub column_depth_in: f64,
    /// Column height before the station elevation is added. May be negative.
    pub base_column_height_in: f64,
    pub pier_cap_length_in: f64,
    pub pier_cap_thickness_in: f64,
}

impl From<&SubstructureParams> for AssemblyInput {
    fn from(p: &SubstructureParams) -> Self {
        AssemblyInput {
            pile_length_in: p.pile_length_in,
            pile_embedment_in: p.pile_embedment_in,
            pile_cap_thickness_in: p.pile_cap_thickness_in,
            column_shape: p.column_shape,
            column_width_in: p.column_width_in,
            column_depth_in: p.column_depth_in,
            base_column_height_in: p.base_column_height_in(),
            pier_cap_length_in: p.pier_cap_length_in,
            pier_cap_thickness_in: p.pier_cap_thickness_in,
        }
    }
}

/// Rigid placement of a pier: rotate about +y, then translate.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Placement {
    pub translation: Vector3,
    pub rotation_y_rad: f64,
}

impl Placement {
    pub fn of_station(station: &PierStation) -> Self {
        Placement {
            translation: station.position.coords,
            rotation_y_rad: station.orientation_rad,
        }
    }

    /// Map a pier-local point into world coordinates.
    pub fn apply(&self, local: &Point3) -> Point3 {
        let rotation = Rotation3::from_axis_angle(&Vector3::y_axis(), self.rotation_y_rad);
        rotation * *local + self.translation
    }
}

/// Axis-aligned box in its own frame, rotated about +y in the world.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoxShape {
    pub center: Point3,
    /// Extent along local x
    pub width_in: f64,
    /// Extent along y
    pub height_in: f64,
    /// Extent along local z
    pub depth_in: f64,
    pub rotation_y_rad: f64,
}

/// Vertical cylinder.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CylinderShape {
    pub center: Point3,
    pub radius_in: f64,
    pub height_in: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "shape", rename_all = "lowercase")]
pub enum ColumnSolid {
    Box(BoxShape),
    Cylinder(CylinderShape),
}

/// The pier-cap profile swept along local z.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Extrusion {
    pub profile: PierCapProfile,
    /// Sweep length, centered on `center`
    pub depth_in: f64,
    /// Where the profile's local origin lands
    pub center: Point3,
    pub rotation_y_rad: f64,
}

/// Everything the renderer needs for one pier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PierGeometry {
    pub station: PierStation,
    pub placement: Placement,
    pub pile_cap: BoxShape,
    pub pier_cap: Extrusion,
    pub piles: Vec<CylinderShape>,
    pub columns: Vec<ColumnSolid>,
    pub column_height_in: f64,
}

/// All piers plus the renderer toggles.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubstructureGeometry {
    pub piers: Vec<PierGeometry>,
    pub view: ViewToggles,
}

/// Vertical center of the piles in the pier-local frame.
pub fn pile_center_y(input: &AssemblyInput) -> f64 {
    -input.pile_cap_thickness_in + input.pile_embedment_in - input.pile_length_in / 2.0
}

/// Compose one pier at `station`.
pub fn assemble_pier(
    station: &PierStation,
    grid: &PileGrid,
    columns: &ColumnSet,
    profile: &PierCapProfile,
    input: &AssemblyInput,
) -> PierGeometry {
    let placement = Placement::of_station(station);
    let rot = station.orientation_rad;
    let (column_height, _) = column_height_at(input.base_column_height_in, station.elevation_in);

    let pile_cap = BoxShape {
        center: placement.apply(&Point3::new(0.0, -input.pile_cap_thickness_in / 2.0, 0.0)),
        width_in: grid.cap_width_in,
        height_in: input.pile_cap_thickness_in,
        depth_in: grid.cap_length_in,
        rotation_y_rad: rot,
    };

    let pile_y = pile_center_y(input);
    let piles = grid
        .positions
        .iter()
        .map(|p| CylinderShape {
            center: placement.apply(&p.at_height(pile_y)),
            radius_in: grid.pile_diameter_in / 2.0,
            height_in: input.pile_length_in,
        })
        .collect();

    let columns = columns
        .positions
        .iter()
        .map(|p| column_solid(&placement, p, column_height, input))
        .collect();

    let pier_cap = Extrusion {
        profile: profile.clone(),
        depth_in: input.pier_cap_length_in,
        center: placement.apply(&Point3::new(0.0, column_height + input.pier_cap_thickness_in / 2.0, 0.0)),
        rotation_y_rad: rot,
    };

    PierGeometry {
        station: *station,
        placement,
        pile_cap,
        pier_cap,
        piles,
        columns,
        column_height_in: column_height,
    }
}

fn column_solid(placement: &Placement, at: &PlanPoint, height: f64, input: &AssemblyInput) -> ColumnSolid {
    let center = placement.apply(&at.at_height(height / 2.0));
    match input.column_shape {
        ColumnShape::Rectangular => ColumnSolid::Box(BoxShape {
            center,
            width_in: input.column_width_in,
            height_in: height,
            depth_in: input.column_depth_in,
            rotation_y_rad: placement.rotation_y_rad,
        }),
        ColumnShape::Circular => ColumnSolid::Cylinder(CylinderShape {
            center,
            radius_in: input.column_width_in / 2.0,
            height_in: height,
        }),
    }
}

/// Compose every station.
pub fn assemble(
    stations: &[PierStation],
    grid: &PileGrid,
    columns: &ColumnSet,
    profile: &PierCapProfile,
    input: &AssemblyInput,
    view: ViewToggles,
) -> SubstructureGeometry {
    SubstructureGeometry {
        piers: stations
            .iter()
            .map(|s| assemble_pier(s, grid, columns, profile, input))
            .collect(),
        view,
    }
}
