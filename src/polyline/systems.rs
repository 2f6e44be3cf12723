use bevy::prelude::*;

use super::entities::{PolylineSegment, PolylineView, PolylineViews};
use super::{Polyline, PolylineId, Polylines};
use crate::math;

/// Height above the grid plane lines are drawn at, over tiles and preview.
const LINE_LIFT: f32 = 0.05;

/// Respawns the view of every polyline reshaped since last frame and flips
/// the visibility of those only shown or hidden.
///
/// Destroyed polylines lose their view; reshaped ones get a fresh parent
/// entity with one cuboid child per segment.
pub fn sync_polyline_views(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    mut lines: ResMut<Polylines>,
    mut views: ResMut<PolylineViews>,
    mut visibility: Query<&mut Visibility, With<PolylineView>>,
) {
    for id in lines.take_dirty() {
        if let Some(entity) = views.map.remove(&id) {
            commands.entity(entity).despawn();
        }
        let Some(line) = lines.get(id) else {
            continue;
        };
        let entity = spawn_polyline_view(&mut commands, &mut meshes, &mut materials, id, line);
        views.map.insert(id, entity);
    }

    // Views spawned above are not in the world yet and already carry the flag.
    for id in lines.take_toggled() {
        let (Some(line), Some(&entity)) = (lines.get(id), views.map.get(&id)) else {
            continue;
        };
        if let Ok(mut vis) = visibility.get_mut(entity) {
            *vis = line_visibility(line);
        }
    }
}

fn line_visibility(line: &Polyline) -> Visibility {
    if line.enabled {
        Visibility::Inherited
    } else {
        Visibility::Hidden
    }
}

fn spawn_polyline_view(
    commands: &mut Commands,
    meshes: &mut Assets<Mesh>,
    materials: &mut Assets<StandardMaterial>,
    id: PolylineId,
    line: &Polyline,
) -> Entity {
    let parent = commands
        .spawn((
            PolylineView { id },
            Name::new(format!("Polyline({})", id.0)),
            Transform::default(),
            line_visibility(line),
        ))
        .id();

    let material = materials.add(StandardMaterial {
        base_color: line.style.color,
        unlit: true,
        ..default()
    });
    let width = line.style.width;

    for pair in line.points.windows(2) {
        let from = Vec3::new(pair[0].x, LINE_LIFT, pair[0].y);
        let to = Vec3::new(pair[1].x, LINE_LIFT, pair[1].y);
        let Some(seg) = math::segment_geometry(from, to) else {
            continue;
        };
        let mesh = meshes.add(Cuboid::new(seg.length, width, width));
        let child = commands
            .spawn((
                PolylineSegment,
                Mesh3d(mesh),
                MeshMaterial3d(material.clone()),
                Transform::from_translation(seg.midpoint).with_rotation(seg.rotation),
            ))
            .id();
        commands.entity(parent).add_child(child);
    }
    parent
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::polyline::PolylineSurface;

    fn app() -> App {
        let mut app = App::new();
        app.init_resource::<Assets<Mesh>>()
            .init_resource::<Assets<StandardMaterial>>()
            .init_resource::<Polylines>()
            .init_resource::<PolylineViews>()
            .add_systems(Update, sync_polyline_views);
        app
    }

    fn view(app: &App, id: PolylineId) -> Entity {
        app.world().resource::<PolylineViews>().map.get(&id).copied().unwrap()
    }

    fn segment_count(app: &mut App) -> usize {
        let mut q = app.world_mut().query::<&PolylineSegment>();
        q.iter(app.world()).count()
    }

    #[test]
    fn reshaped_line_gets_one_segment_per_edge() {
        let mut app = app();
        let id = {
            let mut lines = app.world_mut().resource_mut::<Polylines>();
            let id = lines.create();
            lines.set_vertices(id, &[Vec2::ZERO, Vec2::X, Vec2::ONE]);
            lines.set_enabled(id, true);
            id
        };
        app.update();

        assert_eq!(segment_count(&mut app), 2);
        let entity = view(&app, id);
        assert_eq!(app.world().get::<Visibility>(entity), Some(&Visibility::Inherited));
    }

    #[test]
    fn hiding_keeps_the_existing_view() {
        let mut app = app();
        let id = {
            let mut lines = app.world_mut().resource_mut::<Polylines>();
            let id = lines.create();
            lines.set_vertices(id, &[Vec2::ZERO, Vec2::X]);
            lines.set_enabled(id, true);
            id
        };
        app.update();
        let before = view(&app, id);

        app.world_mut()
            .resource_mut::<Polylines>()
            .set_enabled(id, false);
        app.update();

        assert_eq!(view(&app, id), before);
        assert_eq!(app.world().get::<Visibility>(before), Some(&Visibility::Hidden));
        assert_eq!(segment_count(&mut app), 1);
    }

    #[test]
    fn destroyed_line_loses_its_view() {
        let mut app = app();
        let id = app.world_mut().resource_mut::<Polylines>().create();
        app.update();
        let entity = view(&app, id);

        app.world_mut().resource_mut::<Polylines>().destroy(id);
        app.update();

        assert!(!app.world().resource::<PolylineViews>().map.contains_key(&id));
        assert!(app.world().get_entity(entity).is_err());
    }
}
