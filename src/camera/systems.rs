use bevy::camera::ScalingMode;
use bevy::core_pipeline::tonemapping::Tonemapping;
use bevy::input::mouse::{MouseScrollUnit, MouseWheel};
use bevy::prelude::*;

use super::ZoomConfig;
use super::entities::{EditorCamera, ZoomTarget};
use crate::editor::PointerOverUi;
use crate::math;

/// Spawns the orthographic camera looking straight down at the origin.
pub fn spawn_camera(mut commands: Commands, cfg: Res<ZoomConfig>) {
    let size = cfg.initial_size.clamp(cfg.min_size, cfg.max_size);
    commands.spawn((
        Name::new("EditorCamera"),
        Camera3d::default(),
        Projection::from(OrthographicProjection {
            scaling_mode: ScalingMode::FixedVertical {
                viewport_height: 2.0,
            },
            scale: size,
            ..OrthographicProjection::default_3d()
        }),
        // Unlit tile colors are shown as configured.
        Tonemapping::None,
        Transform::from_xyz(0.0, cfg.height, 0.0).looking_at(Vec3::ZERO, Vec3::NEG_Z),
        EditorCamera,
        ZoomTarget(size),
    ));
}

/// Moves the zoom target by the scrolled lines, then eases the projection
/// toward it. Scrolls over the brush panel are dropped.
pub fn scroll_zoom(
    cfg: Res<ZoomConfig>,
    time: Res<Time<Real>>,
    over_ui: Res<PointerOverUi>,
    mut scroll: MessageReader<MouseWheel>,
    mut query: Query<(&mut Projection, &mut ZoomTarget), With<EditorCamera>>,
) {
    let lines: f32 = scroll
        .read()
        .map(|ev| match ev.unit {
            MouseScrollUnit::Line => ev.y,
            MouseScrollUnit::Pixel => ev.y / 40.0,
        })
        .sum();
    let Ok((mut projection, mut target)) = query.single_mut() else {
        return;
    };

    if !over_ui.0 && lines.abs() > f32::EPSILON {
        target.0 = math::step_zoom(
            target.0,
            lines,
            cfg.step_per_line,
            cfg.invert,
            cfg.min_size,
            cfg.max_size,
        );
    }

    let Projection::Orthographic(ortho) = projection.as_mut() else {
        return;
    };
    let t = math::smoothing_factor(cfg.smooth, time.delta_secs());
    ortho.scale += (target.0 - ortho.scale) * t;
}

/// WASD pan across the grid plane, faster when zoomed out.
pub fn pan_camera(
    cfg: Res<ZoomConfig>,
    time: Res<Time>,
    keys: Res<ButtonInput<KeyCode>>,
    mut query: Query<(&mut Transform, &Projection), With<EditorCamera>>,
) {
    let Ok((mut transform, projection)) = query.single_mut() else {
        return;
    };

    // Screen up is world -Z.
    let mut direction = Vec3::ZERO;
    if keys.pressed(KeyCode::KeyW) {
        direction.z -= 1.0;
    }
    if keys.pressed(KeyCode::KeyS) {
        direction.z += 1.0;
    }
    if keys.pressed(KeyCode::KeyD) {
        direction.x += 1.0;
    }
    if keys.pressed(KeyCode::KeyA) {
        direction.x -= 1.0;
    }
    if direction == Vec3::ZERO {
        return;
    }

    let size = match projection {
        Projection::Orthographic(ortho) => ortho.scale,
        _ => cfg.initial_size,
    };
    transform.translation += direction.normalize() * cfg.pan_speed * size * time.delta_secs();
}
