use std::sync::{Arc, Mutex};

use bevy::ecs::system::SystemParam;
use bevy::math::primitives::InfinitePlane3d;
use bevy::prelude::*;
use bevy::window::PrimaryWindow;

use super::MapEditor;
use crate::camera::EditorCamera;
use crate::polyline::Polylines;
use crate::tilemap::{HexTilemap, PreviewLayer, TileId, WorldLayer};

/// Edit mode switched on or off.
#[derive(Message, Clone, Copy, Debug, PartialEq, Eq)]
pub struct EditModeChanged {
    /// The new state.
    pub active: bool,
}

/// Request to make a tile the active brush.
#[derive(Message, Clone, Copy, Debug)]
pub struct SelectBrush(pub TileId);

/// Transitions recorded by the observer the editor registers at startup,
/// drained into [`EditModeChanged`] messages each frame.
#[derive(Resource, Clone, Default)]
pub struct EditModeFeed(pub Arc<Mutex<Vec<bool>>>);

/// `true` while the pointer is over an egui panel.
#[derive(Resource, Default, Debug)]
pub struct PointerOverUi(pub bool);

/// Cursor position on the grid plane, sampled once per frame.
#[derive(Resource, Default, Debug)]
pub struct PointerPosition(pub Option<Vec2>);

/// Projects the cursor onto the ground plane through the editor camera.
#[derive(SystemParam)]
pub struct PointerWorld<'w, 's> {
    windows: Query<'w, 's, &'static Window, With<PrimaryWindow>>,
    cameras: Query<'w, 's, (&'static Camera, &'static GlobalTransform), With<EditorCamera>>,
}

impl PointerWorld<'_, '_> {
    /// Cursor position on the grid plane, `None` when the window, camera or
    /// cursor is unavailable or the ray misses the plane.
    pub fn world_pos(&self) -> Option<Vec2> {
        let window = self.windows.single().ok()?;
        let (camera, transform) = self.cameras.single().ok()?;
        let cursor = window.cursor_position()?;
        let ray = camera.viewport_to_world(transform, cursor).ok()?;
        let t = ray.intersect_plane(Vec3::ZERO, InfinitePlane3d::new(Vec3::Y))?;
        let hit = ray.get_point(t);
        Some(Vec2::new(hit.x, hit.z))
    }
}

/// The editor together with the stores it edits.
#[derive(SystemParam)]
pub struct EditorStores<'w, 's> {
    pub(super) editor: ResMut<'w, MapEditor>,
    pub(super) world: Query<'w, 's, &'static mut HexTilemap, (With<WorldLayer>, Without<PreviewLayer>)>,
    pub(super) preview: Query<'w, 's, &'static mut HexTilemap, (With<PreviewLayer>, Without<WorldLayer>)>,
    pub(super) lines: ResMut<'w, Polylines>,
}
