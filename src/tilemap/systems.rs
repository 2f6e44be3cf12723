use bevy::asset::RenderAssetUsages;
use bevy::mesh::Indices;
use bevy::prelude::*;
use bevy::render::render_resource::PrimitiveTopology;
use hexx::{HexLayout, HexOrientation, PlaneMeshBuilder};

use super::entities::{TileLayer, TileMesh, TileView, TileViews};
use super::{GridMap, HexTilemap, TilePalette};

/// Builds the shared hex face mesh from a unit-radius pointy layout.
pub fn setup_tile_mesh(mut commands: Commands, mut meshes: ResMut<Assets<Mesh>>) {
    let unit_layout = HexLayout {
        orientation: HexOrientation::Pointy,
        scale: Vec2::splat(1.0),
        ..default()
    };
    let info = PlaneMeshBuilder::new(&unit_layout).build();
    let mesh = Mesh::new(
        PrimitiveTopology::TriangleList,
        RenderAssetUsages::RENDER_WORLD,
    )
    .with_inserted_attribute(Mesh::ATTRIBUTE_POSITION, info.vertices)
    .with_inserted_attribute(Mesh::ATTRIBUTE_NORMAL, info.normals)
    .with_inserted_attribute(Mesh::ATTRIBUTE_UV_0, info.uvs)
    .with_inserted_indices(Indices::U16(info.indices));
    commands.insert_resource(TileMesh(meshes.add(mesh)));
}

/// Respawns the face of every cell touched since last frame, per layer.
pub fn sync_tile_views(
    mut commands: Commands,
    mut materials: ResMut<Assets<StandardMaterial>>,
    mesh: Option<Res<TileMesh>>,
    palette: Res<TilePalette>,
    mut layers: Query<(Entity, &TileLayer, &mut HexTilemap, &mut TileViews)>,
) {
    let Some(mesh) = mesh else { return };

    for (layer_entity, layer, mut tiles, mut views) in &mut layers {
        let dirty = tiles.take_dirty();
        if dirty.is_empty() {
            continue;
        }
        let scale = tiles.mesh_scale() * layer.inset;

        for hex in dirty {
            if let Some(entity) = views.map.remove(&hex) {
                commands.entity(entity).despawn();
            }
            let Some(style) = tiles.tile(hex).and_then(|t| palette.get(t)) else {
                continue;
            };

            let alpha = tiles.alpha(hex);
            let material = materials.add(StandardMaterial {
                base_color: style.color.with_alpha(alpha),
                alpha_mode: if alpha < 1.0 {
                    AlphaMode::Blend
                } else {
                    AlphaMode::Opaque
                },
                unlit: true,
                ..default()
            });
            let center = tiles.cell_center_world(hex);

            let entity = commands
                .spawn((
                    TileView { hex },
                    Name::new(format!("Tile({},{})", hex.x, hex.y)),
                    Mesh3d(mesh.0.clone()),
                    MeshMaterial3d(material),
                    Transform::from_xyz(center.x, layer.lift, center.y)
                        .with_scale(Vec3::new(scale.x, 1.0, scale.y)),
                ))
                .id();
            commands.entity(layer_entity).add_child(entity);
            views.map.insert(hex, entity);
        }
    }
}
