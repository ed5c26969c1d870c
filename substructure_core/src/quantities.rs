//! # Quantity Engine
//!
//! Material quantities per pier station and totals for the whole bridge.
//! Computed straight from the layouts, independently of the assembled
//! geometry.
//!
//! ## Per-station model
//!
//! - Piles: `rowsL·rowsW` piles, each `pile_length` long
//! - Pile cap: `capWidth × capLength × capThickness` box
//! - Columns: `area × height × count`, with
//!   `height = (column_height − pier_cap_thickness) + elevation`
//! - Pier cap: `width × length × thickness` box
//!
//! Cap volumes are flat boxes, identical at every station: the tapered
//! profile and any skew from the curve orientation are not deducted.
//!
//! Volumes are cubic feet from inch dimensions (`/12` per axis). Nothing is
//! rounded here; use [`format_2dp`](crate::units::format_2dp) for display.

use std::f64::consts::PI;

use serde::{Deserialize, Serialize};

use crate::alignment::PierStation;
use crate::layout::{ColumnSet, PileGrid};
use crate::params::{ColumnShape, SubstructureParams};
use crate::units::{box_volume_cuft, CuFt, CuYd, Inches, SqFt};

/// The dimensions the quantity engine reads besides the layouts.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct QuantityInput {
    pub pile_length_in: f64,
    pub pile_cap_thickness_in: f64,
    pub column_shape: ColumnShape,
    pub column_width_in: f64,
    pub column_depth_in: f64,
    pub column_height_in: f64,
    /// Column height before the station elevation is added. May be negative.
    pub base_column_height_in: f64,
    pub pier_cap_width_in: f64,
    pub pier_cap_length_in: f64,
    pub pier_cap_thickness_in: f64,
}

impl From<&SubstructureParams> for QuantityInput {
    fn from(p: &SubstructureParams) -> Self {
        QuantityInput {
            pile_length_in: p.pile_length_in,
            pile_cap_thickness_in: p.pile_cap_thickness_in,
            column_shape: p.column_shape,
            column_width_in: p.column_width_in,
            column_depth_in: p.column_depth_in,
            column_height_in: p.column_height_in,
            base_column_height_in: p.base_column_height_in(),
            pier_cap_width_in: p.pier_cap_width_in,
            pier_cap_length_in: p.pier_cap_length_in,
            pier_cap_thickness_in: p.pier_cap_thickness_in,
        }
    }
}

impl QuantityInput {
    /// Column cross-section area in square feet.
    ///
    /// `column_depth_in` is ignored for circular columns.
    pub fn column_area_sqft(&self) -> SqFt {
        match self.column_shape {
            ColumnShape::Rectangular => SqFt((self.column_width_in / 12.0) * (self.column_depth_in / 12.0)),
            ColumnShape::Circular => SqFt(PI * (self.column_width_in / 2.0 / 12.0).powi(2)),
        }
    }
}

/// Column height at a station, clamped at zero.
///
/// Returns the clamped height and whether clamping was needed.
pub fn column_height_at(base_column_height_in: f64, elevation_in: f64) -> (f64, bool) {
    let raw = base_column_height_in + elevation_in;
    if raw < 0.0 {
        (0.0, true)
    } else {
        (raw, false)
    }
}

/// Quantities for one pier station.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StationQuantities {
    pub index: u32,
    pub elevation_in: f64,
    pub column_height_in: f64,
    pub pile_count: u32,
    pub pile_length_total_in: Inches,
    pub column_count: u32,
    pub pile_cap_volume: CuFt,
    pub column_volume: CuFt,
    pub pier_cap_volume: CuFt,
}

impl StationQuantities {
    pub fn concrete_volume(&self) -> CuFt {
        self.pile_cap_volume + self.column_volume + self.pier_cap_volume
    }
}

/// Per-station rows and bridge totals.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuantitySummary {
    pub stations: Vec<StationQuantities>,
    pub total_piles: u32,
    pub total_pile_length: Inches,
    pub total_columns: u32,
    pub total_pile_cap_volume: CuFt,
    pub total_column_volume: CuFt,
    pub total_pier_cap_volume: CuFt,
    /// Anomalies worth showing to the user (never errors)
    pub warnings: Vec<String>,
}

impl QuantitySummary {
    /// Pile cap + columns + pier caps, in cubic feet.
    pub fn total_concrete_volume(&self) -> CuFt {
        self.total_pile_cap_volume + self.total_column_volume + self.total_pier_cap_volume
    }

    pub fn total_concrete_cuyd(&self) -> CuYd {
        self.total_concrete_volume().into()
    }
}

/// Compute per-station and total quantities.
///
/// # Example
///
/// ```rust
/// use substructure_core::alignment::sample_alignment;
/// use substructure_core::layout::{column_layout, pile_grid_layout};
/// use substructure_core::params::SubstructureParams;
/// use substructure_core::quantities::compute_quantities;
///
/// let params = SubstructureParams::default();
/// let grid = pile_grid_layout(3, 6, 144.0, 48.0, 48.0);
/// let columns = column_layout(2, 432.0);
/// let stations = sample_alignment(&(&params).into());
///
/// let summary = compute_quantities(&grid, &columns, &stations, &(&params).into());
/// assert_eq!(summary.total_piles, 54);
/// assert_eq!(summary.stations.len(), 3);
/// ```
pub fn compute_quantities(
    grid: &PileGrid,
    columns: &ColumnSet,
    stations: &[PierStation],
    input: &QuantityInput,
) -> QuantitySummary {
    let pile_count = grid.pile_count();
    let column_count = columns.len() as u32;
    let base_height = input.base_column_height_in;
    let column_area = input.column_area_sqft();

    let pile_cap_volume = box_volume_cuft(
        Inches(grid.cap_width_in),
        Inches(grid.cap_length_in),
        Inches(input.pile_cap_thickness_in),
    );
    let pier_cap_volume = box_volume_cuft(
        Inches(input.pier_cap_width_in),
        Inches(input.pier_cap_length_in),
        Inches(input.pier_cap_thickness_in),
    );

    let mut warnings = Vec::new();
    if base_height < 0.0 {
        tracing::warn!(base_height, "column base height is negative");
        warnings.push(format!(
            "Column height {:.2} in is less than pier cap thickness {:.2} in",
            input.column_height_in, input.pier_cap_thickness_in
        ));
    }

    let rows: Vec<StationQuantities> = stations
        .iter()
        .map(|station| {
            let (height, clamped) = column_height_at(base_height, station.elevation_in);
            if clamped {
                warnings.push(format!("Station {}: column height clamped to zero", station.index));
            }
            StationQuantities {
                index: station.index,
                elevation_in: station.elevation_in,
                column_height_in: height,
                pile_count,
                pile_length_total_in: Inches(f64::from(pile_count) * input.pile_length_in),
                column_count,
                pile_cap_volume,
                column_volume: CuFt(column_area.0 * (height / 12.0) * f64::from(column_count)),
                pier_cap_volume,
            }
        })
        .collect();

    QuantitySummary {
        total_piles: rows.iter().map(|r| r.pile_count).sum(),
        total_pile_length: rows.iter().map(|r| r.pile_length_total_in).sum(),
        total_columns: rows.iter().map(|r| r.column_count).sum(),
        total_pile_cap_volume: rows.iter().map(|r| r.pile_cap_volume).sum(),
        total_column_volume: rows.iter().map(|r| r.column_volume).sum(),
        total_pier_cap_volume: rows.iter().map(|r| r.pier_cap_volume).sum(),
        stations: rows,
        warnings,
    }
}
