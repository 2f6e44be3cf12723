use bevy::platform::collections::{HashMap, HashSet};
use bevy::prelude::*;
use hexx::{Hex, HexLayout, HexOrientation};

use super::{CellRect, GridMap, OverlayMap, TileId};
use crate::math;

/// Sparse hex tile storage on a point-top layout.
///
/// Writes mark cells dirty; [`super::systems::sync_tile_views`] drains the
/// dirty set each frame and respawns the affected tile meshes.
#[derive(Component)]
pub struct HexTilemap {
    layout: HexLayout,
    cell_size: Vec2,
    tiles: HashMap<Hex, TileId>,
    alphas: HashMap<Hex, f32>,
    dirty: HashSet<Hex>,
}

impl HexTilemap {
    /// Empty tilemap whose cells are `cell_size.x` wide and `cell_size.y` tall,
    /// with cell `(0, 0)` centred on the world origin.
    pub fn new(cell_size: Vec2) -> Self {
        let layout = HexLayout {
            orientation: HexOrientation::Pointy,
            scale: math::layout_scale(cell_size),
            ..default()
        };
        Self {
            layout,
            cell_size,
            tiles: HashMap::new(),
            alphas: HashMap::new(),
            dirty: HashSet::new(),
        }
    }

    /// Number of occupied cells.
    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    /// `true` when no cell is occupied.
    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    /// Occupied cells and their tiles, in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = (Hex, TileId)> + '_ {
        self.tiles.iter().map(|(&hex, &tile)| (hex, tile))
    }

    /// Opacity `cell` is drawn with (1.0 unless overridden).
    pub fn alpha(&self, cell: Hex) -> f32 {
        self.alphas.get(&cell).copied().unwrap_or(1.0)
    }

    /// Per-axis scale applied to a unit-circumradius hex mesh.
    pub fn mesh_scale(&self) -> Vec2 {
        self.layout.scale
    }

    /// Cells touched since the last call, for the view sync.
    pub fn take_dirty(&mut self) -> Vec<Hex> {
        self.dirty.drain().collect()
    }
}

impl GridMap for HexTilemap {
    fn set_tile(&mut self, cell: Hex, tile: TileId) {
        self.tiles.insert(cell, tile);
        self.dirty.insert(cell);
    }

    fn tile(&self, cell: Hex) -> Option<TileId> {
        self.tiles.get(&cell).copied()
    }

    fn world_to_cell(&self, world: Vec2) -> Hex {
        self.layout.world_pos_to_hex(world)
    }

    fn cell_center_world(&self, cell: Hex) -> Vec2 {
        self.layout.hex_to_world_pos(cell)
    }

    fn occupied_bounds(&self) -> Option<CellRect> {
        let mut offsets = self.tiles.keys().map(|&hex| math::hex_to_offset(hex));
        let first = offsets.next()?;
        let start = CellRect {
            min: first,
            max: first,
        };
        Some(offsets.fold(start, CellRect::include))
    }

    fn cell_size(&self) -> Vec2 {
        self.cell_size
    }

    fn refresh(&mut self, cell: Hex) {
        self.dirty.insert(cell);
    }

    fn refresh_all(&mut self) {
        self.dirty.extend(self.tiles.keys().copied());
    }
}

impl OverlayMap for HexTilemap {
    fn set_tile_alpha(&mut self, cell: Hex, alpha: f32) {
        self.alphas.insert(cell, alpha.clamp(0.0, 1.0));
        self.dirty.insert(cell);
    }

    fn clear_all(&mut self) {
        self.dirty.extend(self.tiles.keys().copied());
        self.tiles.clear();
        self.alphas.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tilemap::{TilePalette, TileStyle};

    const CELL: Vec2 = Vec2::new(0.866_025_4, 1.0);

    fn one_tile() -> TileId {
        TilePalette::default().register(TileStyle::new("Sea", Color::BLACK, true))
    }

    #[test]
    fn origin_world_maps_to_origin_cell() {
        let map = HexTilemap::new(CELL);
        assert_eq!(map.world_to_cell(Vec2::ZERO), Hex::ZERO);
        assert!(map.cell_center_world(Hex::ZERO).length() < 1e-6);
    }

    #[test]
    fn cell_center_roundtrips_through_world_to_cell() {
        let map = HexTilemap::new(CELL);
        for hex in hexx::shapes::hexagon(Hex::ZERO, 4) {
            let center = map.cell_center_world(hex);
            assert_eq!(map.world_to_cell(center), hex, "roundtrip failed for {hex:?}");
        }
    }

    #[test]
    fn horizontal_neighbours_are_one_cell_width_apart() {
        let map = HexTilemap::new(CELL);
        let right = math::offset_to_hex(IVec2::new(1, 0));
        let d = map.cell_center_world(right).distance(map.cell_center_world(Hex::ZERO));
        assert!((d - CELL.x).abs() < 1e-4, "spacing {d}");
    }

    #[test]
    fn has_tile_follows_set_tile() {
        let mut map = HexTilemap::new(CELL);
        let sea = one_tile();
        assert!(!map.has_tile(Hex::ZERO));
        map.set_tile(Hex::ZERO, sea);
        assert!(map.has_tile(Hex::ZERO));
        assert_eq!(map.tile(Hex::ZERO), Some(sea));
    }

    #[test]
    fn empty_map_has_no_bounds() {
        assert!(HexTilemap::new(CELL).occupied_bounds().is_none());
    }

    #[test]
    fn bounds_enclose_all_tiles_in_offset_space() {
        let mut map = HexTilemap::new(CELL);
        let sea = one_tile();
        map.set_tile(math::offset_to_hex(IVec2::new(-2, 3)), sea);
        map.set_tile(math::offset_to_hex(IVec2::new(4, -1)), sea);
        let rect = map.occupied_bounds().unwrap();
        assert_eq!(rect.min, IVec2::new(-2, -1));
        assert_eq!(rect.max, IVec2::new(4, 3));
    }

    #[test]
    fn writes_mark_cells_dirty_once() {
        let mut map = HexTilemap::new(CELL);
        let sea = one_tile();
        map.set_tile(Hex::ZERO, sea);
        map.refresh(Hex::ZERO);
        assert_eq!(map.take_dirty(), vec![Hex::ZERO]);
        assert!(map.take_dirty().is_empty());
    }

    #[test]
    fn clear_all_empties_and_dirties_previous_cells() {
        let mut map = HexTilemap::new(CELL);
        let sea = one_tile();
        map.set_tile(Hex::ZERO, sea);
        map.set_tile_alpha(Hex::ZERO, 0.5);
        map.take_dirty();
        map.clear_all();
        assert!(map.is_empty());
        assert_eq!(map.alpha(Hex::ZERO), 1.0);
        assert_eq!(map.take_dirty(), vec![Hex::ZERO]);
    }

    #[test]
    fn clearing_an_empty_overlay_dirties_nothing() {
        let mut map = HexTilemap::new(CELL);
        map.clear_all();
        assert!(map.take_dirty().is_empty());
    }
}
