//! Top-down orthographic editor camera.
//!
//! Scroll zooms by moving a target size that the projection eases toward on
//! real time; WASD pans across the grid plane.

mod entities;
mod systems;

pub use entities::{EditorCamera, ZoomTarget};

use bevy::prelude::*;

use crate::GameState;

/// Camera placement, zoom limits and zoom feel.
#[derive(Resource, Clone, Debug, Reflect)]
pub struct ZoomConfig {
    /// Smallest half-height of the view in world units.
    pub min_size: f32,
    /// Largest half-height of the view in world units.
    pub max_size: f32,
    /// Size change per scroll line.
    pub step_per_line: f32,
    /// Exponential approach rate of the projection toward the target size.
    pub smooth: f32,
    /// Scroll up zooms out instead of in.
    pub invert: bool,
    /// Half-height of the view at startup.
    pub initial_size: f32,
    /// Pan speed in view half-heights per second.
    pub pan_speed: f32,
    /// Height of the camera above the grid plane.
    pub height: f32,
}

impl Default for ZoomConfig {
    fn default() -> Self {
        Self {
            min_size: 3.0,
            max_size: 20.0,
            step_per_line: 1.0,
            smooth: 15.0,
            invert: false,
            initial_size: 8.0,
            pan_speed: 1.0,
            height: 50.0,
        }
    }
}

/// Editor camera with scroll zoom and keyboard pan.
pub struct CameraPlugin(pub ZoomConfig);

impl Plugin for CameraPlugin {
    fn build(&self, app: &mut App) {
        app.register_type::<ZoomConfig>()
            .register_type::<EditorCamera>()
            .register_type::<ZoomTarget>()
            .insert_resource(self.0.clone())
            .add_systems(Startup, systems::spawn_camera)
            .add_systems(
                Update,
                (systems::scroll_zoom, systems::pan_camera).run_if(in_state(GameState::Editing)),
            );
    }
}
