use hexx::Hex;

use crate::tilemap::TileId;

/// Transient editing state: edit mode, active brush, and the hovered cell.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct EditSession {
    pub(super) active: bool,
    pub(super) brush: Option<TileId>,
    pub(super) hovered: Option<Hex>,
}

impl EditSession {
    /// Whether edit mode is on.
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Tile painted on placement, if one was selected.
    pub fn brush(&self) -> Option<TileId> {
        self.brush
    }

    /// Occupied cell under the pointer at the last hover update.
    pub fn hovered(&self) -> Option<Hex> {
        self.hovered
    }
}

/// Callback invoked with the new edit-mode state.
pub type EditModeCallback = Box<dyn FnMut(bool) + Send + Sync>;

/// Handle returned by [`EditModeObservers::subscribe`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ObserverId(u32);

/// Registered edit-mode observers, notified synchronously in registration order.
#[derive(Default)]
pub struct EditModeObservers {
    next_id: u32,
    observers: Vec<(ObserverId, EditModeCallback)>,
}

impl EditModeObservers {
    /// Registers `callback` and returns a handle for [`Self::unsubscribe`].
    pub fn subscribe(&mut self, callback: impl FnMut(bool) + Send + Sync + 'static) -> ObserverId {
        let id = ObserverId(self.next_id);
        self.next_id += 1;
        self.observers.push((id, Box::new(callback)));
        id
    }

    /// Removes an observer. Returns `false` if `id` was not registered.
    pub fn unsubscribe(&mut self, id: ObserverId) -> bool {
        let before = self.observers.len();
        self.observers.retain(|(oid, _)| *oid != id);
        self.observers.len() != before
    }

    /// Number of registered observers.
    pub fn len(&self) -> usize {
        self.observers.len()
    }

    /// `true` when nobody is subscribed.
    pub fn is_empty(&self) -> bool {
        self.observers.is_empty()
    }

    pub(super) fn notify(&mut self, active: bool) {
        for (_, callback) in &mut self.observers {
            callback(active);
        }
    }
}
