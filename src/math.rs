//! Hex geometry, offset coordinates, line placement and zoom math.
//!
//! Nothing here touches the ECS. [`hex_corners`] is the only place hexagon
//! vertices are derived; the hover outline and the border synthesizer both
//! go through it.

use bevy::prelude::{IVec2, Quat, Vec2, Vec3};
use hexx::Hex;

/// `sqrt(3)`, the ratio between a pointy hex's width and its circumradius.
const SQRT_3: f32 = 1.732_050_8;

// ── Hex geometry ────────────────────────────────────────────────────

/// Converts a cell size `(w, h)` into the per-axis scale of a pointy `hexx::HexLayout`.
///
/// A pointy hex of circumradius `r` is `sqrt(3) * r` wide and `2 * r` tall, so
/// scaling each axis independently lets stretched cells line up with
/// [`hex_corners`].
pub fn layout_scale(cell_size: Vec2) -> Vec2 {
    Vec2::new(cell_size.x / SQRT_3, cell_size.y / 2.0)
}

/// The 6 corners of a point-top hexagon around `center`.
///
/// Ordered from the top vertex clockwise: top, upper-right, lower-right,
/// bottom, lower-left, upper-left. With `s = h/2`, `hx = w/2` and `hy = s/2`
/// the offsets are `(0,s) (hx,hy) (hx,-hy) (0,-s) (-hx,-hy) (-hx,hy)`.
pub fn hex_corners(center: Vec2, cell_size: Vec2) -> [Vec2; 6] {
    let s = cell_size.y * 0.5;
    let hx = cell_size.x * 0.5;
    let hy = s * 0.5;
    [
        center + Vec2::new(0.0, s),
        center + Vec2::new(hx, hy),
        center + Vec2::new(hx, -hy),
        center + Vec2::new(0.0, -s),
        center + Vec2::new(-hx, -hy),
        center + Vec2::new(-hx, hy),
    ]
}

/// Closed outline of a hexagon: the 6 corners plus the first corner repeated.
pub fn hex_outline(center: Vec2, cell_size: Vec2) -> [Vec2; 7] {
    let c = hex_corners(center, cell_size);
    [c[0], c[1], c[2], c[3], c[4], c[5], c[0]]
}

/// Midpoint of edge `edge` (`corners[edge]` → `corners[edge + 1 mod 6]`).
pub fn edge_midpoint(corners: &[Vec2; 6], edge: usize) -> Vec2 {
    let (a, b) = edge_endpoints(corners, edge);
    (a + b) * 0.5
}

/// Endpoints of edge `edge`, wrapping the last edge back to corner 0.
pub fn edge_endpoints(corners: &[Vec2; 6], edge: usize) -> (Vec2, Vec2) {
    (corners[edge % 6], corners[(edge + 1) % 6])
}

/// Point just outside edge `edge`, found by extrapolating from `center`
/// through the edge midpoint by `factor`.
///
/// With `factor > 1` the point lands inside the neighbouring cell across
/// that edge.
pub fn edge_sample_point(center: Vec2, corners: &[Vec2; 6], edge: usize, factor: f32) -> Vec2 {
    center + (edge_midpoint(corners, edge) - center) * factor
}

// ── Offset coordinates ──────────────────────────────────────────────

/// Odd-row offset coordinate (`col`, `row`) → axial hex.
///
/// Odd rows sit half a cell to the right, matching a point-top tilemap.
pub fn offset_to_hex(offset: IVec2) -> Hex {
    let row = offset.y;
    Hex::new(offset.x - (row - (row & 1)) / 2, row)
}

/// Axial hex → odd-row offset coordinate. Inverse of [`offset_to_hex`].
pub fn hex_to_offset(hex: Hex) -> IVec2 {
    let row = hex.y;
    IVec2::new(hex.x + (row - (row & 1)) / 2, row)
}

// ── Line segments ───────────────────────────────────────────────────

/// Placement of a unit-length line mesh stretched between two points.
#[derive(Debug, PartialEq)]
pub struct SegmentGeometry {
    /// Centre of the segment.
    pub midpoint: Vec3,
    /// Distance between the endpoints.
    pub length: f32,
    /// Rotation taking +X onto the segment direction.
    pub rotation: Quat,
}

/// Computes the transform inputs for a line cuboid from `from` to `to`.
///
/// Returns `None` for degenerate (zero-length) segments.
pub fn segment_geometry(from: Vec3, to: Vec3) -> Option<SegmentGeometry> {
    let diff = to - from;
    let length = diff.length();
    if length <= f32::EPSILON {
        return None;
    }
    Some(SegmentGeometry {
        midpoint: (from + to) / 2.0,
        length,
        rotation: Quat::from_rotation_arc(Vec3::X, diff / length),
    })
}

// ── Zoom ────────────────────────────────────────────────────────────

/// Applies `lines` of scroll to a zoom target size and clamps the result.
///
/// Scrolling up (positive lines) zooms in, i.e. shrinks the size, unless
/// `invert` is set.
pub fn step_zoom(target: f32, lines: f32, step: f32, invert: bool, min: f32, max: f32) -> f32 {
    let dir = if invert { -1.0 } else { 1.0 };
    (target - dir * lines * step).clamp(min, max)
}

/// Frame-rate independent lerp factor: `1 - exp(-smooth * dt)`.
pub fn smoothing_factor(smooth: f32, dt: f32) -> f32 {
    1.0 - (-smooth * dt).exp()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const EPS: f32 = 1e-5;

    // ── hex_corners ─────────────────────────────────────────────────

    #[test]
    fn corners_start_at_top_and_run_clockwise() {
        let c = hex_corners(Vec2::ZERO, Vec2::new(2.0, 4.0));
        assert!((c[0] - Vec2::new(0.0, 2.0)).length() < EPS);
        assert!((c[1] - Vec2::new(1.0, 1.0)).length() < EPS);
        assert!((c[2] - Vec2::new(1.0, -1.0)).length() < EPS);
        assert!((c[3] - Vec2::new(0.0, -2.0)).length() < EPS);
        assert!((c[4] - Vec2::new(-1.0, -1.0)).length() < EPS);
        assert!((c[5] - Vec2::new(-1.0, 1.0)).length() < EPS);
    }

    #[test]
    fn corners_follow_the_center() {
        let size = Vec2::new(0.866, 1.0);
        let at_origin = hex_corners(Vec2::ZERO, size);
        let moved = hex_corners(Vec2::new(3.0, -2.0), size);
        for (m, o) in moved.iter().zip(at_origin) {
            assert!((*m - o - Vec2::new(3.0, -2.0)).length() < EPS);
        }
    }

    #[test]
    fn outline_closes_on_first_corner() {
        let o = hex_outline(Vec2::new(1.0, 1.0), Vec2::new(0.866, 1.0));
        assert_eq!(o[0], o[6]);
    }

    #[test]
    fn regular_hex_corners_match_hexx_layout() {
        // A regular pointy hex of circumradius 1 is sqrt(3) wide and 2 tall.
        let c = hex_corners(Vec2::ZERO, Vec2::new(SQRT_3, 2.0));
        for p in c {
            assert!((p.length() - 1.0).abs() < 1e-4, "corner {p:?} off the circumcircle");
        }
    }

    proptest! {
        #[test]
        fn corners_are_symmetric_about_center(
            w in 0.1f32..10.0,
            h in 0.1f32..10.0,
            cx in -100.0f32..100.0,
            cy in -100.0f32..100.0,
        ) {
            let center = Vec2::new(cx, cy);
            let size = Vec2::new(w, h);
            let c = hex_corners(center, size);
            let tol = 1e-3;
            for i in 0..3 {
                let mirrored = c[i] + c[i + 3] - center * 2.0;
                prop_assert!(mirrored.length() < tol);
            }
            let hx = w / 2.0;
            let hy = h / 4.0;
            let diagonal = (hx * hx + hy * hy).sqrt();
            prop_assert!((c[0].distance(center) - h / 2.0).abs() < tol);
            prop_assert!((c[3].distance(center) - h / 2.0).abs() < tol);
            for i in [1, 2, 4, 5] {
                prop_assert!((c[i].distance(center) - diagonal).abs() < tol);
            }
            let o = hex_outline(center, size);
            prop_assert_eq!(o[0], o[6]);
        }
    }

    // ── edges ───────────────────────────────────────────────────────

    #[test]
    fn last_edge_wraps_to_first_corner() {
        let c = hex_corners(Vec2::ZERO, Vec2::new(2.0, 4.0));
        assert_eq!(edge_endpoints(&c, 5), (c[5], c[0]));
    }

    #[test]
    fn sample_point_lies_beyond_the_edge() {
        let c = hex_corners(Vec2::ZERO, Vec2::new(2.0, 4.0));
        // Edge 1 is the vertical right edge at x = 1.
        let mid = edge_midpoint(&c, 1);
        assert!((mid - Vec2::new(1.0, 0.0)).length() < EPS);
        let sample = edge_sample_point(Vec2::ZERO, &c, 1, 1.2);
        assert!((sample - Vec2::new(1.2, 0.0)).length() < EPS);
    }

    // ── offset coordinates ──────────────────────────────────────────

    #[test]
    fn origin_offset_is_origin_hex() {
        assert_eq!(offset_to_hex(IVec2::ZERO), Hex::ZERO);
        assert_eq!(hex_to_offset(Hex::ZERO), IVec2::ZERO);
    }

    #[test]
    fn offset_conversion_inverts_on_negative_rows() {
        for row in -5..=5 {
            for col in -5..=5 {
                let offset = IVec2::new(col, row);
                assert_eq!(hex_to_offset(offset_to_hex(offset)), offset);
            }
        }
    }

    #[test]
    fn odd_rows_shift_right() {
        // Row 1 is odd, so (0, 1) is a direct neighbour of the origin.
        assert_eq!(offset_to_hex(IVec2::new(0, 1)), Hex::new(0, 1));
        assert_eq!(offset_to_hex(IVec2::new(0, -1)), Hex::new(1, -1));
        assert_eq!(offset_to_hex(IVec2::new(0, 2)), Hex::new(-1, 2));
    }

    // ── segment_geometry ────────────────────────────────────────────

    #[test]
    fn segment_along_x_has_identity_rotation() {
        let g = segment_geometry(Vec3::ZERO, Vec3::new(2.0, 0.0, 0.0)).unwrap();
        assert!((g.length - 2.0).abs() < EPS);
        assert!((g.midpoint - Vec3::new(1.0, 0.0, 0.0)).length() < EPS);
        assert!((g.rotation * Vec3::X - Vec3::X).length() < EPS);
    }

    #[test]
    fn segment_rotation_maps_x_onto_direction() {
        let g = segment_geometry(Vec3::ZERO, Vec3::new(0.0, 0.0, 3.0)).unwrap();
        assert!((g.rotation * Vec3::X - Vec3::Z).length() < 1e-4);
    }

    #[test]
    fn degenerate_segment_returns_none() {
        assert!(segment_geometry(Vec3::ONE, Vec3::ONE).is_none());
    }

    // ── zoom ────────────────────────────────────────────────────────

    #[test]
    fn scrolling_up_zooms_in() {
        assert!((step_zoom(10.0, 1.0, 1.0, false, 3.0, 20.0) - 9.0).abs() < EPS);
    }

    #[test]
    fn inverted_scroll_zooms_out() {
        assert!((step_zoom(10.0, 1.0, 1.0, true, 3.0, 20.0) - 11.0).abs() < EPS);
    }

    #[test]
    fn zoom_clamps_to_limits() {
        assert_eq!(step_zoom(4.0, 5.0, 1.0, false, 3.0, 20.0), 3.0);
        assert_eq!(step_zoom(19.0, -5.0, 1.0, false, 3.0, 20.0), 20.0);
    }

    #[test]
    fn smoothing_is_zero_without_time_and_approaches_one() {
        assert_eq!(smoothing_factor(15.0, 0.0), 0.0);
        let f = smoothing_factor(15.0, 1.0);
        assert!(f > 0.99 && f <= 1.0);
    }
}
