use bevy::prelude::*;

/// Marker for the camera the editor projects the cursor through.
#[derive(Component, Reflect)]
pub struct EditorCamera;

/// View half-height the projection is easing toward.
#[derive(Component, Reflect)]
pub struct ZoomTarget(pub f32);
