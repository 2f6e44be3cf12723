use bevy::prelude::*;

use crate::math;
use crate::polyline::{LineStyle, PolylineId, PolylineSurface};
use crate::tilemap::{GridMap, TileId};

/// One drawn edge between a base cell and a sea neighbour.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BorderSegment {
    /// First corner of the shared edge.
    pub start: Vec2,
    /// Second corner of the shared edge.
    pub end: Vec2,
    /// Stroke style.
    pub style: LineStyle,
}

/// Scans the occupied bounds for `base` cells and emits every edge whose
/// outward sample point falls in a `sea` cell.
///
/// Each base cell owns its 6 candidate edges, so an edge shared by two base
/// cells never qualifies and no de-duplication is needed.
pub fn synthesize_borders(
    grid: &impl GridMap,
    base: TileId,
    sea: TileId,
    sample_factor: f32,
    style: LineStyle,
) -> Vec<BorderSegment> {
    let Some(bounds) = grid.occupied_bounds() else {
        return Vec::new();
    };
    let size = grid.cell_size();
    let mut segments = Vec::new();

    for cell in bounds.cells() {
        if grid.tile(cell) != Some(base) {
            continue;
        }
        let center = grid.cell_center_world(cell);
        let corners = math::hex_corners(center, size);
        for edge in 0..6 {
            let sample = math::edge_sample_point(center, &corners, edge, sample_factor);
            if grid.tile(grid.world_to_cell(sample)) == Some(sea) {
                let (start, end) = math::edge_endpoints(&corners, edge);
                segments.push(BorderSegment { start, end, style });
            }
        }
    }
    segments
}

/// Currently displayed border segments and the polylines drawing them.
///
/// Always rebuilt as a whole; never patched.
#[derive(Default)]
pub struct BorderSet {
    segments: Vec<BorderSegment>,
    lines: Vec<PolylineId>,
}

impl BorderSet {
    /// Segments emitted by the last rebuild.
    pub fn segments(&self) -> &[BorderSegment] {
        &self.segments
    }

    /// Destroys every border polyline.
    pub fn clear(&mut self, surface: &mut impl PolylineSurface) {
        for id in self.lines.drain(..) {
            surface.destroy(id);
        }
        self.segments.clear();
    }

    /// Replaces the displayed borders with `segments`.
    pub fn replace(&mut self, segments: Vec<BorderSegment>, surface: &mut impl PolylineSurface) {
        self.clear(surface);
        for seg in &segments {
            let id = surface.create();
            surface.set_style(id, seg.style);
            surface.set_vertices(id, &[seg.start, seg.end]);
            surface.set_enabled(id, true);
            self.lines.push(id);
        }
        self.segments = segments;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::polyline::Polylines;
    use crate::tilemap::{HexTilemap, TilePalette, TileStyle};
    use hexx::Hex;

    const STYLE: LineStyle = LineStyle {
        color: Color::BLACK,
        width: 0.04,
    };

    fn setup() -> (HexTilemap, TileId, TileId) {
        let mut palette = TilePalette::default();
        let sea = palette.register(TileStyle::new("Sea", Color::BLACK, true));
        let base = palette.register(TileStyle::new("Base", Color::WHITE, true));
        (HexTilemap::new(Vec2::new(0.866_025_4, 1.0)), sea, base)
    }

    #[test]
    fn isolated_base_in_sea_has_six_borders() {
        let (mut map, sea, base) = setup();
        map.set_tile(Hex::ZERO, base);
        for n in Hex::ZERO.all_neighbors() {
            map.set_tile(n, sea);
        }
        let segs = synthesize_borders(&map, base, sea, 1.2, STYLE);
        assert_eq!(segs.len(), 6);
    }

    #[test]
    fn base_surrounded_by_base_has_no_borders() {
        let (mut map, sea, base) = setup();
        map.set_tile(Hex::ZERO, base);
        for n in Hex::ZERO.all_neighbors() {
            map.set_tile(n, base);
        }
        let segs = synthesize_borders(&map, base, sea, 1.2, STYLE);
        // Outer ring cells border only empty cells, never sea.
        assert!(segs.is_empty());
    }

    #[test]
    fn empty_neighbours_do_not_produce_borders() {
        let (mut map, sea, base) = setup();
        map.set_tile(Hex::ZERO, base);
        assert!(synthesize_borders(&map, base, sea, 1.2, STYLE).is_empty());
    }

    #[test]
    fn border_edges_are_corners_of_the_base_cell() {
        let (mut map, sea, base) = setup();
        map.set_tile(Hex::ZERO, base);
        for n in Hex::ZERO.all_neighbors() {
            map.set_tile(n, sea);
        }
        let corners = math::hex_corners(Vec2::ZERO, map.cell_size());
        for seg in synthesize_borders(&map, base, sea, 1.2, STYLE) {
            assert!(corners.iter().any(|c| c.distance(seg.start) < 1e-5));
            assert!(corners.iter().any(|c| c.distance(seg.end) < 1e-5));
        }
    }

    #[test]
    fn replace_destroys_previous_polylines() {
        let (mut map, sea, base) = setup();
        map.set_tile(Hex::ZERO, base);
        for n in Hex::ZERO.all_neighbors() {
            map.set_tile(n, sea);
        }
        let mut lines = Polylines::default();
        let mut set = BorderSet::default();
        set.replace(synthesize_borders(&map, base, sea, 1.2, STYLE), &mut lines);
        set.replace(synthesize_borders(&map, base, sea, 1.2, STYLE), &mut lines);
        assert_eq!(lines.len(), 6);
        set.clear(&mut lines);
        assert!(lines.is_empty());
        assert!(set.segments().is_empty());
    }
}
