use bevy::platform::collections::HashMap;
use bevy::prelude::*;
use hexx::Hex;

/// Render settings of a tile layer entity. The layer also carries a
/// [`super::HexTilemap`] and a [`TileViews`], and parents its tile views.
#[derive(Component, Clone, Debug, Reflect)]
pub struct TileLayer {
    /// Height above the grid plane the layer is drawn at.
    pub lift: f32,
    /// Fraction of the cell the tile face covers, leaving a thin gap between tiles.
    pub inset: f32,
}

/// Marker for the layer the editor paints into.
#[derive(Component)]
pub struct WorldLayer;

/// Marker for the translucent brush preview layer.
#[derive(Component)]
pub struct PreviewLayer;

/// Rendered face of one occupied cell. Child of its [`TileLayer`].
#[derive(Component, Reflect)]
pub struct TileView {
    /// The cell this face represents.
    pub hex: Hex,
}

/// Maps occupied cells of a layer to their spawned [`TileView`] entities.
#[derive(Component, Default)]
pub struct TileViews {
    /// Lookup from cell to view entity.
    pub map: HashMap<Hex, Entity>,
}

/// Shared unit-circumradius hex face mesh.
#[derive(Resource)]
pub struct TileMesh(pub Handle<Mesh>);
