//! # Column Layout
//!
//! Column centers spread evenly along the pier-cap width (local x) and
//! centered on the origin. The count is clamped to `[1, 4]`.

use serde::{Deserialize, Serialize};

use super::PlanPoint;
use crate::params::MAX_COLUMNS;

/// Column centers in order of increasing x.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnSet {
    pub positions: Vec<PlanPoint>,
}

/// Place `count` columns `spacing` apart (center to center).
///
/// # Example
///
/// ```rust
/// use substructure_core::layout::column_layout;
///
/// let cols = column_layout(2, 432.0);
/// let xs: Vec<f64> = cols.positions.iter().map(|p| p.x).collect();
/// assert_eq!(xs, vec![-216.0, 216.0]);
/// ```
pub fn column_layout(count: u32, spacing: f64) -> ColumnSet {
    let n = count.clamp(1, MAX_COLUMNS);
    let start = -spacing * f64::from(n - 1) / 2.0;
    let positions = (0..n)
        .map(|i| PlanPoint::new(start + f64::from(i) * spacing, 0.0))
        .collect();
    ColumnSet { positions }
}

impl ColumnSet {
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }
}
