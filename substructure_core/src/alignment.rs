//! # Alignment Sampler
//!
//! Places one pier station at every span end along the bridge alignment:
//! `span_count + 1` stations, indexed `0..=span_count`.
//!
//! ## Straight alignment
//!
//! Stations lie on the z axis, `span_length` apart, centered so the whole
//! run straddles `z = 0`. Orientation is zero.
//!
//! ## Curved alignment
//!
//! Stations lie on a circular arc of radius `R`. Each span advances the
//! polar angle by `δ = span_length / R` (times +1 for a left curve, −1 for
//! a right curve), and the arc is shifted so station 0 sits on the local
//! origin whatever the start angle:
//!
//! ```text
//! θᵢ = θ₀ + i·δ
//! xᵢ = R·cos θᵢ − R·cos θ₀
//! zᵢ = R·sin θᵢ − R·sin θ₀
//! orientationᵢ = π/2 − (θᵢ + sign·π/2)
//! ```
//!
//! The orientation keeps each pier's width axis square to the running
//! tangent. Only the pier stations are discretized; there is no deck curve.
//!
//! In both modes elevation grows linearly: `elevationᵢ = i·span_length·slope`.
//!
//! ## Preconditions
//!
//! `span_length > 0`, and `curve_radius > 0` when curved. These are checked
//! by [`SubstructureParams::validate`](crate::params::SubstructureParams::validate),
//! not here.

use std::f64::consts::FRAC_PI_2;

use serde::{Deserialize, Serialize};

use crate::layout::Point3;
use crate::params::{CurveDirection, SubstructureParams};
use crate::units::{Degrees, Radians};

/// Alignment inputs, split out of the parameter record.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AlignmentInput {
    pub span_count: u32,
    pub span_length_in: f64,
    pub road_slope: f64,
    pub use_curve: bool,
    pub curve_radius_in: f64,
    pub curve_start_angle: Degrees,
    pub curve_direction: CurveDirection,
}

impl From<&SubstructureParams> for AlignmentInput {
    fn from(p: &SubstructureParams) -> Self {
        AlignmentInput {
            span_count: p.span_count,
            span_length_in: p.span_length_in,
            road_slope: p.road_slope,
            use_curve: p.use_curve,
            curve_radius_in: p.curve_radius_in,
            curve_start_angle: Degrees(p.curve_start_angle_deg),
            curve_direction: p.curve_direction,
        }
    }
}

/// One pier placement along the alignment.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PierStation {
    pub index: u32,
    /// Plan position on the level ground datum (`y = 0`)
    pub position: Point3,
    /// Rise of the roadway above station 0
    pub elevation_in: f64,
    /// Rotation about +y in radians
    pub orientation_rad: f64,
    /// Distance along the alignment from station 0
    pub chainage_in: f64,
}

/// Sample the alignment into `span_count + 1` pier stations.
///
/// # Example
///
/// ```rust
/// use substructure_core::alignment::{sample_alignment, AlignmentInput};
/// use substructure_core::params::CurveDirection;
/// use substructure_core::units::Degrees;
///
/// let stations = sample_alignment(&AlignmentInput {
///     span_count: 2,
///     span_length_in: 1800.0,
///     road_slope: 0.015,
///     use_curve: false,
///     curve_radius_in: 12000.0,
///     curve_start_angle: Degrees(0.0),
///     curve_direction: CurveDirection::Left,
/// });
/// let zs: Vec<f64> = stations.iter().map(|s| s.position.z).collect();
/// assert_eq!(zs, vec![-1800.0, 0.0, 1800.0]);
/// ```
pub fn sample_alignment(input: &AlignmentInput) -> Vec<PierStation> {
    if input.use_curve {
        curved_stations(input)
    } else {
        straight_stations(input)
    }
}

fn straight_stations(input: &AlignmentInput) -> Vec<PierStation> {
    let total = f64::from(input.span_count) * input.span_length_in;
    (0..=input.span_count)
        .map(|i| {
            let chainage = f64::from(i) * input.span_length_in;
            PierStation {
                index: i,
                position: Point3::new(0.0, 0.0, chainage - total / 2.0),
                elevation_in: chainage * input.road_slope,
                orientation_rad: 0.0,
                chainage_in: chainage,
            }
        })
        .collect()
}

fn curved_stations(input: &AlignmentInput) -> Vec<PierStation> {
    let r = input.curve_radius_in;
    let sign = input.curve_direction.sign();
    let start = Radians::from(input.curve_start_angle).0;
    let delta = input.span_length_in / r * sign;
    let (origin_x, origin_z) = (r * start.cos(), r * start.sin());

    (0..=input.span_count)
        .map(|i| {
            let chainage = f64::from(i) * input.span_length_in;
            let theta = start + f64::from(i) * delta;
            let tangent = theta + sign * FRAC_PI_2;
            PierStation {
                index: i,
                position: Point3::new(r * theta.cos() - origin_x, 0.0, r * theta.sin() - origin_z),
                elevation_in: chainage * input.road_slope,
                orientation_rad: -tangent + FRAC_PI_2,
                chainage_in: chainage,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn straight(span_count: u32, span_length: f64, slope: f64) -> AlignmentInput {
        AlignmentInput {
            span_count,
            span_length_in: span_length,
            road_slope: slope,
            use_curve: false,
            curve_radius_in: 12000.0,
            curve_start_angle: Degrees(0.0),
            curve_direction: CurveDirection::Left,
        }
    }

    fn curved(direction: CurveDirection, start_deg: f64) -> AlignmentInput {
        AlignmentInput {
            span_count: 4,
            span_length_in: 1800.0,
            road_slope: 0.02,
            use_curve: true,
            curve_radius_in: 12000.0,
            curve_start_angle: Degrees(start_deg),
            curve_direction: direction,
        }
    }

    #[test]
    fn test_straight_reference_example() {
        let stations = sample_alignment(&straight(2, 1800.0, 0.015));
        assert_eq!(stations.len(), 3);
        let zs: Vec<f64> = stations.iter().map(|s| s.position.z).collect();
        assert_eq!(zs, vec![-1800.0, 0.0, 1800.0]);
        let elevations: Vec<f64> = stations.iter().map(|s| s.elevation_in).collect();
        assert_abs_diff_eq!(elevations[0], 0.0);
        assert_abs_diff_eq!(elevations[1], 27.0, epsilon = 1e-9);
        assert_abs_diff_eq!(elevations[2], 54.0, epsilon = 1e-9);
        assert!(stations.iter().all(|s| s.orientation_rad == 0.0 && s.position.x == 0.0));
    }

    #[test]
    fn test_straight_symmetric_and_linear() {
        for span_count in 1..=6 {
            let stations = sample_alignment(&straight(span_count, 1250.0, -0.03));
            let first = stations[0];
            let last = stations[span_count as usize];
            assert_abs_diff_eq!(first.position.z, -last.position.z, epsilon = 1e-9);
            for pair in stations.windows(2) {
                assert_abs_diff_eq!(pair[1].position.z - pair[0].position.z, 1250.0, epsilon = 1e-9);
                assert_abs_diff_eq!(
                    pair[1].elevation_in - pair[0].elevation_in,
                    1250.0 * -0.03,
                    epsilon = 1e-9
                );
            }
        }
    }

    #[test]
    fn test_curved_station_zero_at_origin() {
        for start in [0.0, 30.0, 90.0, 145.0, 270.0, -60.0] {
            for dir in [CurveDirection::Left, CurveDirection::Right] {
                let s0 = sample_alignment(&curved(dir, start))[0];
                assert_abs_diff_eq!(s0.position.x, 0.0, epsilon = 1e-9);
                assert_abs_diff_eq!(s0.position.z, 0.0, epsilon = 1e-9);
            }
        }
    }

    #[test]
    fn test_curved_stations_on_circle() {
        let input = curved(CurveDirection::Left, 30.0);
        let start = 30.0_f64.to_radians();
        // Circle center relative to station 0
        let (cx, cz) = (-12000.0 * start.cos(), -12000.0 * start.sin());
        for s in sample_alignment(&input) {
            let d = ((s.position.x - cx).powi(2) + (s.position.z - cz).powi(2)).sqrt();
            assert_abs_diff_eq!(d, 12000.0, epsilon = 1e-6);
        }
    }

    #[test]
    fn test_left_right_mirror() {
        // Right-hand stations are the left-hand ones reflected across the
        // radial line through station 0.
        for start_deg in [0.0, 40.0, 200.0] {
            let left = sample_alignment(&curved(CurveDirection::Left, start_deg));
            let right = sample_alignment(&curved(CurveDirection::Right, start_deg));
            let start = f64::to_radians(start_deg);
            let (ux, uz) = (start.cos(), start.sin());
            for (l, r) in left.iter().zip(&right) {
                let dot = l.position.x * ux + l.position.z * uz;
                let (mx, mz) = (2.0 * dot * ux - l.position.x, 2.0 * dot * uz - l.position.z);
                assert_abs_diff_eq!(mx, r.position.x, epsilon = 1e-6);
                assert_abs_diff_eq!(mz, r.position.z, epsilon = 1e-6);
                assert_eq!(l.elevation_in, r.elevation_in);
            }
        }
    }

    #[test]
    fn test_curved_orientation_follows_tangent() {
        for dir in [CurveDirection::Left, CurveDirection::Right] {
            let stations = sample_alignment(&curved(dir, 25.0));
            for s in &stations {
                // Local +z rotated about +y by the orientation
                let (tx, tz) = (s.orientation_rad.sin(), s.orientation_rad.cos());
                let theta = 25.0_f64.to_radians() + f64::from(s.index) * 1800.0 / 12000.0 * dir.sign();
                let sign = dir.sign();
                // Direction of travel along the arc
                let (ex, ez) = (-theta.sin() * sign, theta.cos() * sign);
                assert_abs_diff_eq!(tx, ex, epsilon = 1e-9);
                assert_abs_diff_eq!(tz, ez, epsilon = 1e-9);
            }
        }
    }

    #[test]
    fn test_left_orientation_is_negative_theta() {
        let stations = sample_alignment(&curved(CurveDirection::Left, 0.0));
        for s in &stations {
            assert_abs_diff_eq!(s.orientation_rad, -(f64::from(s.index) * 0.15), epsilon = 1e-12);
        }
    }

    #[test]
    fn test_chainage_and_count() {
        let stations = sample_alignment(&curved(CurveDirection::Right, 10.0));
        assert_eq!(stations.len(), 5);
        for (i, s) in stations.iter().enumerate() {
            assert_eq!(s.index as usize, i);
            assert_eq!(s.chainage_in, i as f64 * 1800.0);
            assert_eq!(s.position.y, 0.0);
        }
    }

    #[test]
    fn test_idempotent() {
        let input = curved(CurveDirection::Left, 33.0);
        assert_eq!(sample_alignment(&input), sample_alignment(&input));
    }
}
