//! Retained polylines on the grid plane: the hover outline and the border
//! segments are both stored here and rebuilt as cuboid line meshes when they
//! change.

mod entities;
mod systems;

pub use entities::{PolylineSegment, PolylineView, PolylineViews};

use bevy::platform::collections::{HashMap, HashSet};
use bevy::prelude::*;

use crate::EditorSet;

/// Handle to a polyline in a [`PolylineSurface`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Reflect)]
pub struct PolylineId(u32);

/// Stroke color and width of a polyline.
#[derive(Clone, Copy, Debug, PartialEq, Reflect)]
pub struct LineStyle {
    /// Stroke color.
    pub color: Color,
    /// Stroke width in world units.
    pub width: f32,
}

/// Line-drawing surface the editor pushes outlines and borders to.
pub trait PolylineSurface {
    /// Allocates an empty, disabled polyline.
    fn create(&mut self) -> PolylineId;
    /// Replaces the vertices of `id`.
    fn set_vertices(&mut self, id: PolylineId, points: &[Vec2]);
    /// Replaces the stroke style of `id`.
    fn set_style(&mut self, id: PolylineId, style: LineStyle);
    /// Shows or hides `id`.
    fn set_enabled(&mut self, id: PolylineId, enabled: bool);
    /// Releases `id`; later calls with it are ignored.
    fn destroy(&mut self, id: PolylineId);
}

/// Stored state of one polyline.
#[derive(Clone, Debug, PartialEq)]
pub struct Polyline {
    /// Vertices on the grid plane, drawn as consecutive segments.
    pub points: Vec<Vec2>,
    /// Stroke style.
    pub style: LineStyle,
    /// Whether the polyline is drawn.
    pub enabled: bool,
}

/// Slab of polylines. The view sync drains two change sets: `dirty` for
/// geometry or style changes that need a rebuild, `toggled` for visibility
/// flips only.
#[derive(Resource, Default)]
pub struct Polylines {
    next_id: u32,
    lines: HashMap<PolylineId, Polyline>,
    dirty: HashSet<PolylineId>,
    toggled: HashSet<PolylineId>,
}

impl Polylines {
    /// Stored state of `id`, `None` once destroyed.
    pub fn get(&self, id: PolylineId) -> Option<&Polyline> {
        self.lines.get(&id)
    }

    /// Number of live polylines.
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// `true` when no polyline is alive.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Polylines created, reshaped, restyled or destroyed since the last call.
    pub fn take_dirty(&mut self) -> Vec<PolylineId> {
        self.dirty.drain().collect()
    }

    /// Polylines shown or hidden since the last call.
    pub fn take_toggled(&mut self) -> Vec<PolylineId> {
        self.toggled.drain().collect()
    }
}

impl PolylineSurface for Polylines {
    fn create(&mut self) -> PolylineId {
        let id = PolylineId(self.next_id);
        self.next_id += 1;
        self.lines.insert(
            id,
            Polyline {
                points: Vec::new(),
                style: LineStyle {
                    color: Color::WHITE,
                    width: 0.03,
                },
                enabled: false,
            },
        );
        self.dirty.insert(id);
        id
    }

    fn set_vertices(&mut self, id: PolylineId, points: &[Vec2]) {
        if let Some(line) = self.lines.get_mut(&id) {
            line.points.clear();
            line.points.extend_from_slice(points);
            self.dirty.insert(id);
        }
    }

    fn set_style(&mut self, id: PolylineId, style: LineStyle) {
        if let Some(line) = self.lines.get_mut(&id)
            && line.style != style
        {
            line.style = style;
            self.dirty.insert(id);
        }
    }

    fn set_enabled(&mut self, id: PolylineId, enabled: bool) {
        if let Some(line) = self.lines.get_mut(&id)
            && line.enabled != enabled
        {
            line.enabled = enabled;
            self.toggled.insert(id);
        }
    }

    fn destroy(&mut self, id: PolylineId) {
        if self.lines.remove(&id).is_some() {
            self.toggled.remove(&id);
            self.dirty.insert(id);
        }
    }
}

/// Polyline store plus per-frame line mesh sync.
pub struct PolylinePlugin;

impl Plugin for PolylinePlugin {
    fn build(&self, app: &mut App) {
        app.register_type::<PolylineView>()
            .register_type::<PolylineSegment>()
            .init_resource::<Polylines>()
            .init_resource::<PolylineViews>()
            .add_systems(
                Update,
                systems::sync_polyline_views.in_set(EditorSet::Views),
            );
    }
}
