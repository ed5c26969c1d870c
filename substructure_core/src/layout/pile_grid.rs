//! # Pile Grid Layout
//!
//! Sizes the pile cap from its pile grid and places every pile center.
//!
//! ```text
//! capWidth  = 2·edge + (rowsW − 1)·spacing + rowsW·dia
//! capLength = 2·edge + (rowsL − 1)·spacing + rowsL·dia
//! ```
//!
//! `spacing` is the clear gap between adjacent piles, so centers sit
//! `spacing + dia` apart. Piles are listed row-major: all piles of length
//! row 0 (across the width), then row 1, and so on. Downstream code refers
//! to piles by index, so this order is part of the contract.

use serde::{Deserialize, Serialize};

use super::PlanPoint;

/// Pile-cap plan dimensions and pile centers, centered on the local origin.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PileGrid {
    pub rows_length: u32,
    pub rows_width: u32,
    /// Plan dimension along local x
    pub cap_width_in: f64,
    /// Plan dimension along local z
    pub cap_length_in: f64,
    pub pile_diameter_in: f64,
    pub positions: Vec<PlanPoint>,
}

/// Lay out the pile grid. Row counts below 1 are treated as 1.
///
/// # Example
///
/// ```rust
/// use substructure_core::layout::pile_grid_layout;
///
/// let grid = pile_grid_layout(3, 6, 144.0, 48.0, 48.0);
/// assert_eq!(grid.cap_width_in, 1104.0);
/// assert_eq!(grid.cap_length_in, 528.0);
/// assert_eq!(grid.positions.len(), 18);
/// ```
pub fn pile_grid_layout(
    rows_length: u32,
    rows_width: u32,
    spacing: f64,
    edge_distance: f64,
    pile_diameter: f64,
) -> PileGrid {
    let rows_l = rows_length.max(1);
    let rows_w = rows_width.max(1);

    let cap_width = cap_extent(rows_w, spacing, edge_distance, pile_diameter);
    let cap_length = cap_extent(rows_l, spacing, edge_distance, pile_diameter);
    let pitch = spacing + pile_diameter;
    let first_x = -cap_width / 2.0 + edge_distance + pile_diameter / 2.0;
    let first_z = -cap_length / 2.0 + edge_distance + pile_diameter / 2.0;

    let mut positions = Vec::with_capacity((rows_l * rows_w) as usize);
    for i in 0..rows_l {
        for j in 0..rows_w {
            positions.push(PlanPoint::new(
                first_x + f64::from(j) * pitch,
                first_z + f64::from(i) * pitch,
            ));
        }
    }

    PileGrid {
        rows_length: rows_l,
        rows_width: rows_w,
        cap_width_in: cap_width,
        cap_length_in: cap_length,
        pile_diameter_in: pile_diameter,
        positions,
    }
}

fn cap_extent(rows: u32, spacing: f64, edge_distance: f64, pile_diameter: f64) -> f64 {
    let n = f64::from(rows);
    2.0 * edge_distance + (n - 1.0) * spacing + n * pile_diameter
}

impl PileGrid {
    pub fn pile_count(&self) -> u32 {
        self.rows_length * self.rows_width
    }

    /// Plan area of the pile cap in square inches
    pub fn footprint_area_sq_in(&self) -> f64 {
        self.cap_width_in * self.cap_length_in
    }
}
