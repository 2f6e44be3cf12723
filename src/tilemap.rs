//! Hex tile storage: the grid map the editor paints into, the translucent
//! preview overlay, the tile palette, and the systems that keep rendered tile
//! meshes in step with the stored cells.

mod entities;
mod hex_tilemap;
mod systems;

pub use entities::{PreviewLayer, TileLayer, TileView, TileViews, WorldLayer};
pub use hex_tilemap::HexTilemap;

use bevy::prelude::*;
use hexx::Hex;

use crate::EditorSet;
use crate::math;

/// Identity token for a tile category ("sea", "base", ...).
///
/// Tiles are compared by id only; two palette entries with identical styles
/// are still different tiles.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Reflect)]
pub struct TileId(u32);

/// Display style of a tile category.
#[derive(Clone, Debug, Reflect)]
pub struct TileStyle {
    /// Label shown on the brush button.
    pub name: String,
    /// Fill color of the tile face.
    pub color: Color,
    /// Whether the tile is offered as a brush.
    pub brush: bool,
}

impl TileStyle {
    /// Convenience constructor.
    pub fn new(name: impl Into<String>, color: Color, brush: bool) -> Self {
        Self {
            name: name.into(),
            color,
            brush,
        }
    }
}

/// Registry of tile categories, handing out [`TileId`]s in registration order.
#[derive(Resource, Default)]
pub struct TilePalette {
    tiles: Vec<TileStyle>,
}

impl TilePalette {
    /// Registers a tile category and returns its id.
    pub fn register(&mut self, style: TileStyle) -> TileId {
        self.tiles.push(style);
        TileId(self.tiles.len() as u32 - 1)
    }

    /// Style of a registered tile.
    pub fn get(&self, id: TileId) -> Option<&TileStyle> {
        self.tiles.get(id.0 as usize)
    }

    /// Tiles flagged as brushes, in registration order.
    pub fn brushes(&self) -> impl Iterator<Item = (TileId, &TileStyle)> {
        self.tiles
            .iter()
            .enumerate()
            .filter(|(_, t)| t.brush)
            .map(|(i, t)| (TileId(i as u32), t))
    }
}

/// Inclusive rectangle of cells in odd-row offset coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CellRect {
    /// Lowest column and row.
    pub min: IVec2,
    /// Highest column and row (inclusive).
    pub max: IVec2,
}

impl CellRect {
    /// Grows the rectangle to include `offset`.
    pub fn include(self, offset: IVec2) -> Self {
        Self {
            min: self.min.min(offset),
            max: self.max.max(offset),
        }
    }

    /// Every cell in the rectangle, row by row.
    pub fn cells(self) -> impl Iterator<Item = Hex> {
        (self.min.y..=self.max.y).flat_map(move |row| {
            (self.min.x..=self.max.x).map(move |col| math::offset_to_hex(IVec2::new(col, row)))
        })
    }
}

/// Tile storage surface the editor reads and writes through.
pub trait GridMap {
    /// Writes `tile` into `cell`, replacing any previous tile.
    fn set_tile(&mut self, cell: Hex, tile: TileId);
    /// Tile stored at `cell`, `None` when the cell is empty.
    fn tile(&self, cell: Hex) -> Option<TileId>;
    /// Whether `cell` holds any tile.
    fn has_tile(&self, cell: Hex) -> bool {
        self.tile(cell).is_some()
    }
    /// Cell containing a world-space point on the grid plane.
    fn world_to_cell(&self, world: Vec2) -> Hex;
    /// World-space center of `cell`.
    fn cell_center_world(&self, cell: Hex) -> Vec2;
    /// Smallest rectangle enclosing every occupied cell.
    fn occupied_bounds(&self) -> Option<CellRect>;
    /// Cell width and height in world units.
    fn cell_size(&self) -> Vec2;
    /// Requests a redraw of one cell.
    fn refresh(&mut self, cell: Hex);
    /// Requests a redraw of every occupied cell.
    fn refresh_all(&mut self);
}

/// A [`GridMap`] used as a translucent overlay.
pub trait OverlayMap: GridMap {
    /// Sets the opacity `cell` is drawn with.
    fn set_tile_alpha(&mut self, cell: Hex, alpha: f32);
    /// Removes every tile.
    fn clear_all(&mut self);
}

/// Tile palette plus per-frame tile mesh sync.
pub struct TilemapPlugin;

impl Plugin for TilemapPlugin {
    fn build(&self, app: &mut App) {
        app.register_type::<TileView>()
            .register_type::<TileLayer>()
            .init_resource::<TilePalette>()
            .add_systems(Startup, systems::setup_tile_mesh)
            .add_systems(Update, systems::sync_tile_views.in_set(EditorSet::Views));
    }
}
