//! # Pier-Cap Profile
//!
//! Builds the closed hexagonal cross-section of the pier cap: a full-width
//! top edge, vertical tips of `tip_thickness` at both ends, and sloped
//! soffits running in by `overhang` to a narrower bottom edge.
//!
//! ```text
//!   0 ────────────────────────── 1
//!   │                            │
//!   5 ╲                        ╱ 2
//!       ╲                    ╱
//!         4 ──────────────── 3
//! ```
//!
//! Inputs are clamped rather than rejected so degenerate proportions still
//! produce a non-crossing polygon: the overhang is held to `[0, W/2]` and
//! the tip thickness to `[0, T]`.

use serde::{Deserialize, Serialize};

use super::Point2;

/// Closed cross-section polygon of the pier cap, centered on its local axes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PierCapProfile {
    /// The six vertices in drawing order (not repeated)
    pub points: Vec<Point2>,
    /// Overhang actually used after clamping
    pub effective_overhang_in: f64,
    /// Tip thickness actually used after clamping
    pub effective_tip_thickness_in: f64,
    /// True when either input had to be clamped
    pub clamped: bool,
}

/// Build the pier-cap profile from width `W`, overhang `O`, thickness `T`
/// and tip thickness `Tt` (all inches).
///
/// # Example
///
/// ```rust
/// use substructure_core::layout::pier_cap_profile;
///
/// let profile = pier_cap_profile(864.0, 96.0, 72.0, 36.0);
/// assert_eq!(profile.points.len(), 6);
/// assert_eq!(profile.points[3].x, 432.0 - 96.0);
/// ```
pub fn pier_cap_profile(width: f64, overhang: f64, thickness: f64, tip_thickness: f64) -> PierCapProfile {
    let half_w = width / 2.0;
    let half_t = thickness / 2.0;
    let o = overhang.clamp(0.0, half_w.max(0.0));
    let tt = tip_thickness.clamp(0.0, thickness.max(0.0));
    let tip_y = half_t - tt;

    let clamped = o != overhang || tt != tip_thickness;
    if o != overhang {
        tracing::warn!(overhang, effective = o, "pier cap overhang clamped to [0, W/2]");
    }
    if tt != tip_thickness {
        tracing::warn!(tip_thickness, effective = tt, "pier cap tip thickness clamped to [0, T]");
    }

    let points = vec![
        Point2::new(-half_w, half_t),
        Point2::new(half_w, half_t),
        Point2::new(half_w, tip_y),
        Point2::new(half_w - o, -half_t),
        Point2::new(-half_w + o, -half_t),
        Point2::new(-half_w, tip_y),
    ];

    PierCapProfile {
        points,
        effective_overhang_in: o,
        effective_tip_thickness_in: tt,
        clamped,
    }
}

impl PierCapProfile {
    /// Vertices with the first repeated at the end.
    pub fn closed_points(&self) -> Vec<Point2> {
        let mut closed = self.points.clone();
        if let Some(first) = self.points.first() {
            closed.push(*first);
        }
        closed
    }

    /// Enclosed area in square inches (shoelace).
    pub fn area_sq_in(&self) -> f64 {
        let n = self.points.len();
        if n < 3 {
            return 0.0;
        }
        let mut sum = 0.0;
        for i in 0..n {
            let j = (i + 1) % n;
            sum += self.points[i].x * self.points[j].y - self.points[j].x * self.points[i].y;
        }
        (sum * 0.5).abs()
    }

    /// Axis-aligned extents as `(min, max)`.
    pub fn bounds(&self) -> (Point2, Point2) {
        let mut min = Point2::new(f64::INFINITY, f64::INFINITY);
        let mut max = Point2::new(f64::NEG_INFINITY, f64::NEG_INFINITY);
        for p in &self.points {
            min.x = min.x.min(p.x);
            min.y = min.y.min(p.y);
            max.x = max.x.max(p.x);
            max.y = max.y.max(p.y);
        }
        (min, max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    /// Proper crossing of two segments (shared endpoints and collinear
    /// touching do not count).
    fn segments_cross(a: Point2, b: Point2, c: Point2, d: Point2) -> bool {
        let orient = |p: Point2, q: Point2, r: Point2| (q.x - p.x) * (r.y - p.y) - (q.y - p.y) * (r.x - p.x);
        let d1 = orient(c, d, a);
        let d2 = orient(c, d, b);
        let d3 = orient(a, b, c);
        let d4 = orient(a, b, d);
        d1 * d2 < 0.0 && d3 * d4 < 0.0
    }

    fn has_crossing(profile: &PierCapProfile) -> bool {
        let pts = profile.closed_points();
        let edges: Vec<(Point2, Point2)> = pts.windows(2).map(|w| (w[0], w[1])).collect();
        for i in 0..edges.len() {
            for j in (i + 1)..edges.len() {
                if segments_cross(edges[i].0, edges[i].1, edges[j].0, edges[j].1) {
                    return true;
                }
            }
        }
        false
    }

    #[test]
    fn test_vertex_order() {
        let p = pier_cap_profile(100.0, 20.0, 10.0, 4.0);
        let expected = [(-50.0, 5.0), (50.0, 5.0), (50.0, 1.0), (30.0, -5.0), (-30.0, -5.0), (-50.0, 1.0)];
        for (pt, (x, y)) in p.points.iter().zip(expected) {
            assert_eq!(pt.x, x);
            assert_eq!(pt.y, y);
        }
    }

    #[test]
    fn test_closed() {
        let p = pier_cap_profile(864.0, 96.0, 72.0, 36.0);
        let closed = p.closed_points();
        assert_eq!(closed.len(), 7);
        assert_eq!(closed.first(), closed.last());
    }

    #[test]
    fn test_symmetric_about_vertical_axis() {
        let p = pier_cap_profile(864.0, 96.0, 72.0, 36.0);
        // Vertex i mirrors vertex (1 - i) mod 6
        let mirror = [1, 0, 5, 4, 3, 2];
        for (i, &m) in mirror.iter().enumerate() {
            assert_eq!(p.points[i].x, -p.points[m].x);
            assert_eq!(p.points[i].y, p.points[m].y);
        }
    }

    #[test]
    fn test_area() {
        // Rectangle 100x10 minus two triangles (20 wide, 6 tall)
        let p = pier_cap_profile(100.0, 20.0, 10.0, 4.0);
        assert_abs_diff_eq!(p.area_sq_in(), 1000.0 - 2.0 * 0.5 * 20.0 * 6.0, epsilon = 1e-9);

        // No overhang, full tip: plain rectangle
        let rect = pier_cap_profile(100.0, 0.0, 10.0, 10.0);
        assert_abs_diff_eq!(rect.area_sq_in(), 1000.0, epsilon = 1e-9);
    }

    #[test]
    fn test_overhang_clamped_to_half_width() {
        let p = pier_cap_profile(100.0, 80.0, 10.0, 4.0);
        assert_eq!(p.effective_overhang_in, 50.0);
        assert!(p.clamped);
        // Bottom edge collapses to a point at x = 0
        assert_eq!(p.points[3].x, 0.0);
        assert_eq!(p.points[4].x, 0.0);
        assert!(!has_crossing(&p));
    }

    #[test]
    fn test_in_range_inputs_not_clamped() {
        let p = pier_cap_profile(864.0, 96.0, 72.0, 36.0);
        assert!(!p.clamped);
        assert_eq!(p.effective_overhang_in, 96.0);
        assert_eq!(p.effective_tip_thickness_in, 36.0);

        // Both limits are inclusive
        assert!(!pier_cap_profile(100.0, 50.0, 10.0, 10.0).clamped);
    }

    #[test]
    fn test_tip_thickness_clamped() {
        let p = pier_cap_profile(100.0, 20.0, 10.0, 25.0);
        assert_eq!(p.effective_tip_thickness_in, 10.0);
        assert!(p.clamped);
        assert_eq!(p.points[2].y, -5.0);
        assert!(!has_crossing(&p));

        let negative = pier_cap_profile(100.0, -5.0, 10.0, -1.0);
        assert_eq!(negative.effective_overhang_in, 0.0);
        assert_eq!(negative.effective_tip_thickness_in, 0.0);
        assert!(negative.clamped);
        assert!(!has_crossing(&negative));
    }

    #[test]
    fn test_no_crossing_over_valid_domain() {
        let (w, t) = (120.0, 30.0);
        for oi in 0..=6 {
            for ti in 0..=6 {
                let o = w / 2.0 * f64::from(oi) / 6.0;
                let tt = t * f64::from(ti) / 6.0;
                let p = pier_cap_profile(w, o, t, tt);
                assert!(!has_crossing(&p), "crossing at overhang {} tip {}", o, tt);
                assert!(p.points.iter().all(|pt| pt.x.is_finite() && pt.y.is_finite()));
            }
        }
    }

    #[test]
    fn test_bounds() {
        let (min, max) = pier_cap_profile(864.0, 96.0, 72.0, 36.0).bounds();
        assert_eq!((min.x, min.y, max.x, max.y), (-432.0, -36.0, 432.0, 36.0));
    }

    #[test]
    fn test_idempotent() {
        assert_eq!(
            pier_cap_profile(864.0, 96.0, 72.0, 36.0),
            pier_cap_profile(864.0, 96.0, 72.0, 36.0)
        );
    }
}
