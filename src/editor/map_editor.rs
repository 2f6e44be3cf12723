use bevy::prelude::*;
use hexx::Hex;

use super::borders::{self, BorderSet};
use super::session::{EditModeObservers, EditSession, ObserverId};
use crate::math;
use crate::polyline::{LineStyle, PolylineId, PolylineSurface};
use crate::tilemap::{GridMap, OverlayMap, TileId};

/// Static editor parameters, resolved from [`super::EditorConfig`].
#[derive(Clone, Debug, PartialEq)]
pub struct EditorSettings {
    /// Hover outline stroke.
    pub outline: LineStyle,
    /// Border segment stroke.
    pub border: LineStyle,
    /// Opacity of the base-tile preview.
    pub preview_alpha: f32,
    /// How far past an edge midpoint the border scan samples the neighbour.
    pub sample_factor: f32,
    /// Hover outline only: no brushes, placement, preview or borders.
    pub hover_only: bool,
}

impl Default for EditorSettings {
    fn default() -> Self {
        Self {
            outline: LineStyle {
                color: Color::BLACK,
                width: 0.03,
            },
            border: LineStyle {
                color: Color::srgb(0.7, 0.7, 0.7),
                width: 0.04,
            },
            preview_alpha: 0.5,
            sample_factor: 1.2,
            hover_only: false,
        }
    }
}

/// The editing core: edit mode, hover outline, preview, placement and borders.
///
/// Holds no ECS handles. Every operation receives the grid, the preview overlay
/// and the polyline surface it works on, so the same code drives the running
/// app and the scenario tests.
#[derive(Resource)]
pub struct MapEditor {
    session: EditSession,
    observers: EditModeObservers,
    settings: EditorSettings,
    sea: Option<TileId>,
    base: Option<TileId>,
    outline: PolylineId,
    borders: BorderSet,
}

impl MapEditor {
    /// Creates an inactive editor and allocates its (hidden) hover outline.
    pub fn new(
        settings: EditorSettings,
        sea: Option<TileId>,
        base: Option<TileId>,
        lines: &mut impl PolylineSurface,
    ) -> Self {
        let outline = lines.create();
        lines.set_style(outline, settings.outline);
        lines.set_enabled(outline, false);
        Self {
            session: EditSession::default(),
            observers: EditModeObservers::default(),
            settings,
            sea,
            base,
            outline,
            borders: BorderSet::default(),
        }
    }

    /// Edit mode, brush and hovered cell.
    pub fn session(&self) -> &EditSession {
        &self.session
    }

    /// Settings the editor was built with.
    pub fn settings(&self) -> &EditorSettings {
        &self.settings
    }

    /// Tile the border scan treats as sea.
    pub fn sea(&self) -> Option<TileId> {
        self.sea
    }

    /// Tile the border scan treats as base.
    pub fn base(&self) -> Option<TileId> {
        self.base
    }

    /// Polyline tracing the hovered cell.
    pub fn outline(&self) -> PolylineId {
        self.outline
    }

    /// Currently displayed border segments.
    pub fn borders(&self) -> &BorderSet {
        &self.borders
    }

    /// Registers an edit-mode observer.
    pub fn subscribe(&mut self, callback: impl FnMut(bool) + Send + Sync + 'static) -> ObserverId {
        self.observers.subscribe(callback)
    }

    /// Removes an edit-mode observer. Returns `false` for an unknown id.
    pub fn unsubscribe(&mut self, id: ObserverId) -> bool {
        self.observers.unsubscribe(id)
    }

    // ── Edit mode ───────────────────────────────────────────────────

    /// Flips edit mode.
    pub fn toggle_edit_mode(&mut self, preview: &mut impl OverlayMap, lines: &mut impl PolylineSurface) {
        let active = !self.session.active;
        self.set_edit_mode(active, preview, lines);
    }

    /// Moves to `active`. Returns `false` (and notifies nobody) when already there.
    ///
    /// Leaving edit mode hides the outline, clears the preview and forgets the
    /// hovered cell before observers run.
    pub fn set_edit_mode(
        &mut self,
        active: bool,
        preview: &mut impl OverlayMap,
        lines: &mut impl PolylineSurface,
    ) -> bool {
        if self.session.active == active {
            return false;
        }
        self.session.active = active;
        if !active {
            lines.set_enabled(self.outline, false);
            preview.clear_all();
            self.session.hovered = None;
        }
        info!("edit mode {}", if active { "on" } else { "off" });
        self.observers.notify(active);
        true
    }

    /// Records `tile` as the active brush, entering edit mode first if needed.
    ///
    /// The preview at the hovered cell is refreshed for the new brush. Ignored
    /// in hover-only mode.
    pub fn select_brush(
        &mut self,
        tile: TileId,
        preview: &mut impl OverlayMap,
        lines: &mut impl PolylineSurface,
    ) {
        if self.settings.hover_only {
            return;
        }
        self.set_edit_mode(true, preview, lines);
        self.session.brush = Some(tile);
        match self.session.hovered {
            Some(cell) => self.show_preview(cell, preview),
            None => preview.clear_all(),
        }
    }

    // ── Hover ───────────────────────────────────────────────────────

    /// Per-frame hover update for the pointer at `pointer` on the grid plane.
    ///
    /// `None` means the pointer position is unavailable and nothing changes.
    pub fn update_hover(
        &mut self,
        pointer: Option<Vec2>,
        grid: &impl GridMap,
        preview: &mut impl OverlayMap,
        lines: &mut impl PolylineSurface,
    ) {
        if !self.session.active {
            return;
        }
        let Some(pointer) = pointer else {
            return;
        };
        let cell = grid.world_to_cell(pointer);
        if !grid.has_tile(cell) {
            lines.set_enabled(self.outline, false);
            self.session.hovered = None;
            preview.clear_all();
            return;
        }
        if self.session.hovered != Some(cell) {
            self.session.hovered = Some(cell);
            let outline = math::hex_outline(grid.cell_center_world(cell), grid.cell_size());
            lines.set_vertices(self.outline, &outline);
            self.show_preview(cell, preview);
        }
        lines.set_enabled(self.outline, true);
    }

    /// Shows the translucent base tile at `cell` when the base brush is
    /// active, otherwise clears the overlay. At most one preview tile exists.
    fn show_preview(&self, cell: Hex, preview: &mut impl OverlayMap) {
        preview.clear_all();
        if self.settings.hover_only {
            return;
        }
        if let Some(base) = self.base
            && self.session.brush == Some(base)
        {
            preview.set_tile(cell, base);
            preview.set_tile_alpha(cell, self.settings.preview_alpha);
        }
    }

    // ── Placement ───────────────────────────────────────────────────

    /// Paints the brush into the occupied cell under `pointer`.
    ///
    /// Returns the painted cell, or `None` when edit mode is off, no brush is
    /// selected, the pointer is unavailable or the cell is empty.
    pub fn place(
        &mut self,
        pointer: Option<Vec2>,
        grid: &mut impl GridMap,
        preview: &mut impl OverlayMap,
        lines: &mut impl PolylineSurface,
    ) -> Option<Hex> {
        if !self.session.active || self.settings.hover_only {
            return None;
        }
        let brush = self.session.brush?;
        let cell = grid.world_to_cell(pointer?);
        if !grid.has_tile(cell) {
            return None;
        }

        grid.set_tile(cell, brush);
        grid.refresh(cell);
        if Some(brush) == self.base {
            self.show_preview(cell, preview);
        }
        debug!("placed {brush:?} at {cell:?}");
        self.rebuild_borders(grid, lines);
        Some(cell)
    }

    // ── Borders ─────────────────────────────────────────────────────

    /// Discards every border segment and regenerates them from `grid`.
    /// Returns the new segment count.
    pub fn rebuild_borders(&mut self, grid: &impl GridMap, lines: &mut impl PolylineSurface) -> usize {
        let (Some(base), Some(sea)) = (self.base, self.sea) else {
            self.borders.clear(lines);
            return 0;
        };
        if self.settings.hover_only {
            self.borders.clear(lines);
            return 0;
        }
        let segments = borders::synthesize_borders(
            grid,
            base,
            sea,
            self.settings.sample_factor,
            self.settings.border,
        );
        self.borders.replace(segments, lines);
        let count = self.borders.segments().len();
        debug!("rebuilt {count} border segments");
        count
    }
}
