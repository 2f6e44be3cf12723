use bevy::platform::collections::HashMap;
use bevy::prelude::*;

use super::PolylineId;

/// Parent entity rendering one stored polyline.
#[derive(Component, Reflect)]
pub struct PolylineView {
    /// The polyline this view mirrors.
    pub id: PolylineId,
}

/// Cuboid mesh for one segment. Child of a [`PolylineView`].
#[derive(Component, Reflect)]
pub struct PolylineSegment;

/// Maps live polylines to their spawned view entities.
#[derive(Resource, Default)]
pub struct PolylineViews {
    /// Lookup from polyline to view entity.
    pub map: HashMap<PolylineId, Entity>,
}
