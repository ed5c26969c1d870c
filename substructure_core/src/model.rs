//! # Memoized Substructure Model
//!
//! Holds one immutable [`SubstructureParams`] value and caches every
//! derivation against the exact input tuple it reads. Replacing the
//! parameters with [`SubstructureModel::set_params`] is cheap; each accessor
//! recomputes only if its own inputs changed.
//!
//! Keys are the raw bit patterns of the inputs, so a cache hit returns
//! exactly what a fresh computation would.
//!
//! ## Example
//!
//! ```rust
//! use substructure_core::model::{Derivation, SubstructureModel};
//! use substructure_core::params::SubstructureParams;
//!
//! let mut model = SubstructureModel::new(SubstructureParams::default()).unwrap();
//! assert_eq!(model.pile_grid().cap_width_in, 1104.0);
//!
//! // Changing the slope leaves the pile grid alone
//! let mut params = model.params().clone();
//! params.road_slope = 0.03;
//! model.set_params(params).unwrap();
//! model.pile_grid();
//! assert_eq!(model.recompute_count(Derivation::PileGrid), 1);
//! ```

use crate::alignment::{sample_alignment, AlignmentInput, PierStation};
use crate::assembly::{assemble, AssemblyInput, SubstructureGeometry};
use crate::errors::GeometryResult;
use crate::layout::{column_layout, pier_cap_profile, pile_grid_layout, ColumnSet, PierCapProfile, PileGrid};
use crate::params::{ColumnShape, CurveDirection, SubstructureParams};
use crate::quantities::{compute_quantities, QuantityInput, QuantitySummary};

/// A derivation cached by the model
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Derivation {
    Profile,
    PileGrid,
    Columns,
    Stations,
    Geometry,
    Quantities,
}

impl Derivation {
    pub fn name(self) -> &'static str {
        match self {
            Derivation::Profile => "pier_cap_profile",
            Derivation::PileGrid => "pile_grid",
            Derivation::Columns => "columns",
            Derivation::Stations => "stations",
            Derivation::Geometry => "geometry",
            Derivation::Quantities => "quantities",
        }
    }
}

/// Exact, hashable identity of a derivation's inputs.
pub type InputKey = Vec<u64>;

/// Single-entry cache: the last input key and its value.
#[derive(Debug)]
pub struct Memo<V> {
    derivation: Derivation,
    slot: Option<(InputKey, V)>,
    recomputes: usize,
}

impl<V> Memo<V> {
    pub fn new(derivation: Derivation) -> Self {
        Memo {
            derivation,
            slot: None,
            recomputes: 0,
        }
    }

    /// Return the cached value for `key`, computing it on a miss.
    pub fn get_or_compute(&mut self, key: InputKey, compute: impl FnOnce() -> V) -> &V {
        if !matches!(&self.slot, Some((cached, _)) if *cached == key) {
            self.slot = None;
        }
        let (_, value) = self.slot.get_or_insert_with(|| {
            tracing::debug!(derivation = self.derivation.name(), "recomputing");
            self.recomputes += 1;
            (key, compute())
        });
        value
    }

    pub fn recomputes(&self) -> usize {
        self.recomputes
    }
}

fn bits(values: &[f64]) -> InputKey {
    values.iter().map(|v| v.to_bits()).collect()
}

fn shape_bit(shape: ColumnShape) -> u64 {
    match shape {
        ColumnShape::Rectangular => 0,
        ColumnShape::Circular => 1,
    }
}

fn direction_bit(direction: CurveDirection) -> u64 {
    match direction {
        CurveDirection::Left => 0,
        CurveDirection::Right => 1,
    }
}

/// Parameters plus per-derivation caches.
#[derive(Debug)]
pub struct SubstructureModel {
    params: SubstructureParams,
    profile: Memo<PierCapProfile>,
    pile_grid: Memo<PileGrid>,
    columns: Memo<ColumnSet>,
    stations: Memo<Vec<PierStation>>,
    geometry: Memo<SubstructureGeometry>,
    quantities: Memo<QuantitySummary>,
}

impl SubstructureModel {
    /// Validate and adopt `params`.
    pub fn new(params: SubstructureParams) -> GeometryResult<Self> {
        params.validate()?;
        Ok(SubstructureModel {
            params,
            profile: Memo::new(Derivation::Profile),
            pile_grid: Memo::new(Derivation::PileGrid),
            columns: Memo::new(Derivation::Columns),
            stations: Memo::new(Derivation::Stations),
            geometry: Memo::new(Derivation::Geometry),
            quantities: Memo::new(Derivation::Quantities),
        })
    }

    /// Replace the parameters. On error the previous parameters stay.
    pub fn set_params(&mut self, params: SubstructureParams) -> GeometryResult<()> {
        params.validate()?;
        self.params = params;
        Ok(())
    }

    pub fn params(&self) -> &SubstructureParams {
        &self.params
    }

    pub fn recompute_count(&self, derivation: Derivation) -> usize {
        match derivation {
            Derivation::Profile => self.profile.recomputes(),
            Derivation::PileGrid => self.pile_grid.recomputes(),
            Derivation::Columns => self.columns.recomputes(),
            Derivation::Stations => self.stations.recomputes(),
            Derivation::Geometry => self.geometry.recomputes(),
            Derivation::Quantities => self.quantities.recomputes(),
        }
    }

    fn profile_key(&self) -> InputKey {
        let p = &self.params;
        bits(&[
            p.pier_cap_width_in,
            p.pier_cap_overhang_in,
            p.pier_cap_thickness_in,
            p.pier_cap_tip_thickness_in,
        ])
    }

    fn pile_grid_key(&self) -> InputKey {
        let p = &self.params;
        let mut key = vec![u64::from(p.pile_rows_length), u64::from(p.pile_rows_width)];
        key.extend(bits(&[p.pile_spacing_in, p.pile_edge_distance_in, p.pile_diameter_in]));
        key
    }

    fn columns_key(&self) -> InputKey {
        vec![u64::from(self.params.column_count), self.params.column_spacing_in.to_bits()]
    }

    fn stations_key(&self) -> InputKey {
        let p = &self.params;
        let mut key = vec![
            u64::from(p.span_count),
            u64::from(p.use_curve),
            direction_bit(p.curve_direction),
        ];
        key.extend(bits(&[
            p.span_length_in,
            p.road_slope,
            p.curve_radius_in,
            p.curve_start_angle_deg,
        ]));
        key
    }

    fn dimension_key(&self) -> InputKey {
        let p = &self.params;
        let mut key = vec![shape_bit(p.column_shape)];
        key.extend(bits(&[
            p.pile_length_in,
            p.pile_embedment_in,
            p.pile_cap_thickness_in,
            p.column_width_in,
            p.column_depth_in,
            p.column_height_in,
            p.pier_cap_width_in,
            p.pier_cap_length_in,
            p.pier_cap_thickness_in,
        ]));
        key
    }

    pub fn profile(&mut self) -> &PierCapProfile {
        let key = self.profile_key();
        let p = &self.params;
        self.profile.get_or_compute(key, || {
            pier_cap_profile(
                p.pier_cap_width_in,
                p.pier_cap_overhang_in,
                p.pier_cap_thickness_in,
                p.pier_cap_tip_thickness_in,
            )
        })
    }

    pub fn pile_grid(&mut self) -> &PileGrid {
        let key = self.pile_grid_key();
        let p = &self.params;
        self.pile_grid.get_or_compute(key, || {
            pile_grid_layout(
                p.pile_rows_length,
                p.pile_rows_width,
                p.pile_spacing_in,
                p.pile_edge_distance_in,
                p.pile_diameter_in,
            )
        })
    }

    pub fn columns(&mut self) -> &ColumnSet {
        let key = self.columns_key();
        let p = &self.params;
        self.columns
            .get_or_compute(key, || column_layout(p.column_count, p.column_spacing_in))
    }

    pub fn stations(&mut self) -> &[PierStation] {
        let key = self.stations_key();
        let input = AlignmentInput::from(&self.params);
        self.stations.get_or_compute(key, || sample_alignment(&input))
    }

    /// The assembled per-station geometry.
    pub fn geometry(&mut self) -> &SubstructureGeometry {
        let mut key = self.profile_key();
        key.extend(self.pile_grid_key());
        key.extend(self.columns_key());
        key.extend(self.stations_key());
        key.extend(self.dimension_key());
        key.push(u64::from(self.params.view.wireframe));
        key.push(u64::from(self.params.view.show_edges));

        let profile = self.profile().clone();
        let grid = self.pile_grid().clone();
        let columns = self.columns().clone();
        let stations = self.stations().to_vec();
        let input = AssemblyInput::from(&self.params);
        let view = self.params.view;
        self.geometry
            .get_or_compute(key, || assemble(&stations, &grid, &columns, &profile, &input, view))
    }

    /// Quantities, computed from the layouts (not from the geometry).
    pub fn quantities(&mut self) -> &QuantitySummary {
        let mut key = self.pile_grid_key();
        key.extend(self.columns_key());
        key.extend(self.stations_key());
        key.extend(self.dimension_key());

        let grid = self.pile_grid().clone();
        let columns = self.columns().clone();
        let stations = self.stations().to_vec();
        let input = QuantityInput::from(&self.params);
        self.quantities
            .get_or_compute(key, || compute_quantities(&grid, &columns, &stations, &input))
    }
}
