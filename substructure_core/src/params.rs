//! # Substructure Parameters
//!
//! `SubstructureParams` is the single immutable input record every derivation
//! reads. It is JSON-first: every field has a default, so a parameter file
//! only needs to list what differs from the stock two-span bridge.
//!
//! Lengths are inches. The curve start angle is the only angle and crosses
//! this boundary in degrees.
//!
//! ## JSON Example
//!
//! ```json
//! {
//!   "span_count": 3,
//!   "use_curve": true,
//!   "curve_radius_in": 24000.0,
//!   "curve_direction": "right",
//!   "column_shape": "rectangular",
//!   "column_depth_in": 48.0
//! }
//! ```
//!
//! ## Example
//!
//! ```rust
//! use substructure_core::params::{CurveDirection, SubstructureParams};
//!
//! let params = SubstructureParams::from_json(r#"{ "curve_direction": "right" }"#).unwrap();
//! assert_eq!(params.curve_direction, CurveDirection::Right);
//! assert_eq!(params.span_count, 2);
//! assert!(params.validate().is_ok());
//! ```

use serde::{Deserialize, Serialize};

use crate::errors::{GeometryError, GeometryResult};

/// Maximum number of columns a pier carries
pub const MAX_COLUMNS: u32 = 4;

/// Maximum number of spans along the alignment
pub const MAX_SPANS: u32 = 100;

/// Maximum pile rows in either direction of a pile cap
pub const MAX_PILE_ROWS: u32 = 50;

/// Which way a curved alignment turns
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CurveDirection {
    #[default]
    Left,
    Right,
}

impl CurveDirection {
    /// +1 for a left-hand curve, -1 for a right-hand curve
    pub fn sign(self) -> f64 {
        match self {
            CurveDirection::Left => 1.0,
            CurveDirection::Right => -1.0,
        }
    }
}

/// Column cross-section shape
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnShape {
    Rectangular,
    #[default]
    Circular,
}

/// Renderer toggles carried alongside the geometry. They never influence it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewToggles {
    pub wireframe: bool,
    pub show_edges: bool,
}

impl Default for ViewToggles {
    fn default() -> Self {
        ViewToggles {
            wireframe: false,
            show_edges: true,
        }
    }
}

/// Every scalar input of the substructure model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SubstructureParams {
    // --- Alignment ---
    /// Number of spans; the alignment carries `span_count + 1` piers
    pub span_count: u32,
    /// Span length, also the arc step on a curved alignment
    pub span_length_in: f64,
    /// Longitudinal grade (rise over run, signed)
    pub road_slope: f64,
    pub use_curve: bool,
    pub curve_radius_in: f64,
    pub curve_start_angle_deg: f64,
    pub curve_direction: CurveDirection,

    // --- Piles and pile cap ---
    /// Pile rows along the cap length (local z)
    pub pile_rows_length: u32,
    /// Pile rows along the cap width (local x)
    pub pile_rows_width: u32,
    /// Clear spacing between adjacent piles
    pub pile_spacing_in: f64,
    /// Clear distance from the outer piles to the cap edge
    pub pile_edge_distance_in: f64,
    pub pile_diameter_in: f64,
    pub pile_length_in: f64,
    /// Depth the piles are socketed into the cap underside
    pub pile_embedment_in: f64,
    pub pile_cap_thickness_in: f64,

    // --- Columns ---
    pub column_count: u32,
    pub column_spacing_in: f64,
    pub column_shape: ColumnShape,
    /// Width of a rectangular column, diameter of a circular one
    pub column_width_in: f64,
    /// Depth of a rectangular column (ignored when circular)
    pub column_depth_in: f64,
    /// Pile-cap top to pier-cap top at station 0
    pub column_height_in: f64,

    // --- Pier cap ---
    pub pier_cap_width_in: f64,
    pub pier_cap_length_in: f64,
    pub pier_cap_thickness_in: f64,
    pub pier_cap_overhang_in: f64,
    pub pier_cap_tip_thickness_in: f64,

    pub view: ViewToggles,
}

impl Default for SubstructureParams {
    fn default() -> Self {
        SubstructureParams {
            span_count: 2,
            span_length_in: 1800.0,
            road_slope: 0.015,
            use_curve: false,
            curve_radius_in: 12000.0,
            curve_start_angle_deg: 0.0,
            curve_direction: CurveDirection::Left,

            pile_rows_length: 3,
            pile_rows_width: 6,
            pile_spacing_in: 144.0,
            pile_edge_distance_in: 48.0,
            pile_diameter_in: 48.0,
            pile_length_in: 1200.0,
            pile_embedment_in: 12.0,
            pile_cap_thickness_in: 72.0,

            column_count: 2,
            column_spacing_in: 432.0,
            column_shape: ColumnShape::Circular,
            column_width_in: 60.0,
            column_depth_in: 60.0,
            column_height_in: 360.0,

            pier_cap_width_in: 864.0,
            pier_cap_length_in: 72.0,
            pier_cap_thickness_in: 72.0,
            pier_cap_overhang_in: 96.0,
            pier_cap_tip_thickness_in: 36.0,

            view: ViewToggles::default(),
        }
    }
}

impl SubstructureParams {
    /// Parse a (possibly partial) JSON parameter record.
    pub fn from_json(json: &str) -> GeometryResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Serialize to pretty JSON.
    pub fn to_json_pretty(&self) -> GeometryResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Column base height: total column height less the pier-cap thickness.
    ///
    /// May be negative for some inputs; consumers clamp per station.
    pub fn base_column_height_in(&self) -> f64 {
        self.column_height_in - self.pier_cap_thickness_in
    }

    /// Clamp counts into the range the geometry core expects.
    ///
    /// Dimensions are left untouched; those are rejected by [`validate`](Self::validate).
    pub fn sanitized(&self) -> Self {
        let mut out = self.clone();
        out.span_count = out.span_count.clamp(1, MAX_SPANS);
        out.pile_rows_length = out.pile_rows_length.clamp(1, MAX_PILE_ROWS);
        out.pile_rows_width = out.pile_rows_width.clamp(1, MAX_PILE_ROWS);
        out.column_count = out.column_count.clamp(1, MAX_COLUMNS);
        if out != *self {
            tracing::warn!("parameter counts clamped into range");
        }
        out
    }

    /// Validate the record at the boundary.
    ///
    /// The geometry derivations assume every rule checked here and do not
    /// re-check them.
    pub fn validate(&self) -> GeometryResult<()> {
        for (field, value) in self.numeric_fields() {
            if !value.is_finite() {
                return Err(GeometryError::invalid_parameter(
                    field,
                    value.to_string(),
                    "Value must be finite",
                ));
            }
        }

        check_count("span_count", self.span_count, 1, MAX_SPANS)?;
        check_count("pile_rows_length", self.pile_rows_length, 1, MAX_PILE_ROWS)?;
        check_count("pile_rows_width", self.pile_rows_width, 1, MAX_PILE_ROWS)?;
        check_count("column_count", self.column_count, 1, MAX_COLUMNS)?;

        check_positive("span_length_in", self.span_length_in)?;
        check_positive("pile_spacing_in", self.pile_spacing_in)?;
        check_positive("pile_edge_distance_in", self.pile_edge_distance_in)?;
        check_positive("pile_diameter_in", self.pile_diameter_in)?;
        check_positive("pile_length_in", self.pile_length_in)?;
        check_positive("pile_cap_thickness_in", self.pile_cap_thickness_in)?;
        check_positive("column_width_in", self.column_width_in)?;
        check_positive("column_height_in", self.column_height_in)?;
        check_positive("pier_cap_width_in", self.pier_cap_width_in)?;
        check_positive("pier_cap_length_in", self.pier_cap_length_in)?;
        check_positive("pier_cap_thickness_in", self.pier_cap_thickness_in)?;

        // Spacing may be zero with a single column
        if self.column_spacing_in < 0.0 {
            return Err(GeometryError::invalid_parameter(
                "column_spacing_in",
                self.column_spacing_in.to_string(),
                "Column spacing cannot be negative",
            ));
        }

        check_non_negative("pile_embedment_in", self.pile_embedment_in)?;
        check_non_negative("pier_cap_overhang_in", self.pier_cap_overhang_in)?;
        check_non_negative("pier_cap_tip_thickness_in", self.pier_cap_tip_thickness_in)?;

        if self.column_shape == ColumnShape::Rectangular {
            check_positive("column_depth_in", self.column_depth_in)?;
        }

        if self.use_curve && self.curve_radius_in <= 0.0 {
            return Err(GeometryError::invalid_parameter(
                "curve_radius_in",
                self.curve_radius_in.to_string(),
                "Curve radius must be positive on a curved alignment",
            ));
        }

        Ok(())
    }

    fn numeric_fields(&self) -> [(&'static str, f64); 19] {
        [
            ("span_length_in", self.span_length_in),
            ("road_slope", self.road_slope),
            ("curve_radius_in", self.curve_radius_in),
            ("curve_start_angle_deg", self.curve_start_angle_deg),
            ("pile_spacing_in", self.pile_spacing_in),
            ("pile_edge_distance_in", self.pile_edge_distance_in),
            ("pile_diameter_in", self.pile_diameter_in),
            ("pile_length_in", self.pile_length_in),
            ("pile_embedment_in", self.pile_embedment_in),
            ("pile_cap_thickness_in", self.pile_cap_thickness_in),
            ("column_spacing_in", self.column_spacing_in),
            ("column_width_in", self.column_width_in),
            ("column_depth_in", self.column_depth_in),
            ("column_height_in", self.column_height_in),
            ("pier_cap_width_in", self.pier_cap_width_in),
            ("pier_cap_length_in", self.pier_cap_length_in),
            ("pier_cap_thickness_in", self.pier_cap_thickness_in),
            ("pier_cap_overhang_in", self.pier_cap_overhang_in),
            ("pier_cap_tip_thickness_in", self.pier_cap_tip_thickness_in),
        ]
    }
}

fn check_positive(field: &str, value: f64) -> GeometryResult<()> {
    if value <= 0.0 {
        return Err(GeometryError::invalid_parameter(
            field,
            value.to_string(),
            "Must be positive",
        ));
    }
    Ok(())
}

fn check_non_negative(field: &str, value: f64) -> GeometryResult<()> {
    if value < 0.0 {
        return Err(GeometryError::invalid_parameter(
            field,
            value.to_string(),
            "Cannot be negative",
        ));
    }
    Ok(())
}

fn check_count(field: &str, value: u32, min: u32, max: u32) -> GeometryResult<()> {
    if value < min {
        return Err(GeometryError::invalid_parameter(
            field,
            value.to_string(),
            format!("Count must be at least {}", min),
        ));
    }
    if value > max {
        return Err(GeometryError::invalid_parameter(
            field,
            value.to_string(),
            format!("Count cannot exceed {}", max),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        assert!(SubstructureParams::default().validate().is_ok());
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let params = SubstructureParams::from_json(
            r#"{ "span_count": 4, "column_shape": "rectangular", "view": { "wireframe": true } }"#,
        )
        .unwrap();
        assert_eq!(params.span_count, 4);
        assert_eq!(params.column_shape, ColumnShape::Rectangular);
        assert!(params.view.wireframe);
        assert!(params.view.show_edges);
        assert_eq!(params.pile_spacing_in, 144.0);
    }

    #[test]
    fn test_json_roundtrip() {
        let params = SubstructureParams {
            use_curve: true,
            curve_direction: CurveDirection::Right,
            ..Default::default()
        };
        let json = params.to_json_pretty().unwrap();
        assert!(json.contains("\"curve_direction\": \"right\""));
        assert_eq!(SubstructureParams::from_json(&json).unwrap(), params);
    }

    #[test]
    fn test_malformed_json_is_serialization_error() {
        let err = SubstructureParams::from_json("{ not json").unwrap_err();
        assert_eq!(err.error_code(), "SERIALIZATION_ERROR");
    }

    #[test]
    fn test_curve_radius_only_checked_when_curved() {
        let mut params = SubstructureParams {
            curve_radius_in: 0.0,
            ..Default::default()
        };
        assert!(params.validate().is_ok());

        params.use_curve = true;
        match params.validate() {
            Err(GeometryError::InvalidParameter { field, .. }) => assert_eq!(field, "curve_radius_in"),
            other => panic!("expected InvalidParameter, got {:?}", other),
        }
    }

    #[test]
    fn test_column_depth_ignored_when_circular() {
        let mut params = SubstructureParams {
            column_depth_in: 0.0,
            ..Default::default()
        };
        assert!(params.validate().is_ok());

        params.column_shape = ColumnShape::Rectangular;
        assert!(params.validate().is_err());
    }

    #[test]
    fn test_rejects_bad_counts_and_dimensions() {
        let zero_spans = SubstructureParams {
            span_count: 0,
            ..Default::default()
        };
        assert!(zero_spans.validate().is_err());

        let five_columns = SubstructureParams {
            column_count: 5,
            ..Default::default()
        };
        assert!(five_columns.validate().is_err());

        let negative_pile = SubstructureParams {
            pile_diameter_in: -48.0,
            ..Default::default()
        };
        assert!(negative_pile.validate().is_err());

        let nan_slope = SubstructureParams {
            road_slope: f64::NAN,
            ..Default::default()
        };
        assert!(nan_slope.validate().is_err());
    }

    #[test]
    fn test_sanitized_clamps_counts() {
        let params = SubstructureParams {
            span_count: 0,
            pile_rows_length: 0,
            pile_rows_width: 0,
            column_count: 9,
            ..Default::default()
        }
        .sanitized();
        assert_eq!(params.span_count, 1);
        assert_eq!(params.pile_rows_length, 1);
        assert_eq!(params.pile_rows_width, 1);
        assert_eq!(params.column_count, MAX_COLUMNS);
        assert!(params.validate().is_ok());
    }

    #[test]
    fn test_rejects_oversized_counts() {
        let huge_grid = SubstructureParams {
            pile_rows_length: 70_000,
            pile_rows_width: 70_000,
            ..Default::default()
        };
        let err = huge_grid.validate().unwrap_err();
        assert!(matches!(
            err,
            GeometryError::InvalidParameter { ref field, .. } if field == "pile_rows_length"
        ));

        let huge_spans = SubstructureParams {
            span_count: u32::MAX,
            ..Default::default()
        };
        assert!(huge_spans.validate().is_err());

        let at_limit = SubstructureParams {
            span_count: MAX_SPANS,
            pile_rows_length: MAX_PILE_ROWS,
            pile_rows_width: MAX_PILE_ROWS,
            ..Default::default()
        };
        assert!(at_limit.validate().is_ok());
    }

    #[test]
    fn test_sanitized_clamps_oversized_counts() {
        let params = SubstructureParams {
            span_count: u32::MAX,
            pile_rows_length: 70_000,
            pile_rows_width: 70_000,
            ..Default::default()
        }
        .sanitized();
        assert_eq!(params.span_count, MAX_SPANS);
        assert_eq!(params.pile_rows_length, MAX_PILE_ROWS);
        assert_eq!(params.pile_rows_width, MAX_PILE_ROWS);
        assert!(params.validate().is_ok());
    }

    #[test]
    fn test_base_column_height() {
        let params = SubstructureParams::default();
        assert_eq!(params.base_column_height_in(), 288.0);
    }

    #[test]
    fn test_curve_direction_sign() {
        assert_eq!(CurveDirection::Left.sign(), 1.0);
        assert_eq!(CurveDirection::Right.sign(), -1.0);
    }
}
