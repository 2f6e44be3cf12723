//! The map editor: fills the map at startup, then drives edit mode, hover
//! outline, brush preview, placement and border synthesis from input.
//!
//! [`MapEditor`] holds all editing logic and talks to the tilemap and
//! polyline stores only through their traits. The systems in this module
//! read input, borrow the stores from the world and hand them to it.

mod borders;
mod entities;
mod fill;
mod map_editor;
mod session;
mod systems;

pub use borders::{BorderSegment, BorderSet, synthesize_borders};
pub use entities::{EditModeChanged, EditModeFeed, PointerOverUi, PointerPosition, PointerWorld, SelectBrush};
pub use fill::fill_grid;
pub use map_editor::{EditorSettings, MapEditor};
pub use session::{EditModeCallback, EditModeObservers, EditSession, ObserverId};

use bevy::prelude::*;

use crate::error::ConfigError;
use crate::polyline::LineStyle;
use crate::tilemap::TileStyle;
use crate::{EditorSet, GameState};

/// Largest number of cells a filled map may hold.
pub const MAX_MAP_CELLS: u64 = 4_000_000;

/// Editor configuration: map extent, tiles, strokes and bindings.
#[derive(Resource, Clone, Debug, Reflect)]
pub struct EditorConfig {
    /// Filled map width in cells.
    pub width: u32,
    /// Filled map height in cells.
    pub height: u32,
    /// World point whose cell becomes the base cell; `None` is the world origin.
    pub origin: Option<Vec2>,
    /// Cell width and height in world units.
    pub cell_size: Vec2,
    /// Tile stamped over the map. Without it the map stays empty.
    pub sea_tile: Option<TileStyle>,
    /// Tile placed at the origin cell.
    pub base_tile: Option<TileStyle>,
    /// Hover outline stroke.
    pub outline: LineStyle,
    /// Border segment stroke.
    pub border: LineStyle,
    /// Opacity of the base-tile preview.
    pub preview_alpha: f32,
    /// Border scan sample distance, as a multiple of the centre-to-edge distance.
    pub sample_factor: f32,
    /// Fraction of a cell the tile face covers.
    pub tile_inset: f32,
    /// Key flipping edit mode.
    pub toggle_key: KeyCode,
    /// Button painting the brush.
    pub place_button: MouseButton,
    /// Keep only the hover outline.
    pub hover_only: bool,
}

impl Default for EditorConfig {
    fn default() -> Self {
        let settings = EditorSettings::default();
        Self {
            width: 30,
            height: 30,
            origin: None,
            cell_size: Vec2::new(0.866_025_4, 1.0),
            sea_tile: Some(TileStyle::new("Sea", Color::srgb(0.16, 0.42, 0.72), true)),
            base_tile: Some(TileStyle::new("Base", Color::srgb(0.35, 0.65, 0.3), true)),
            outline: settings.outline,
            border: settings.border,
            preview_alpha: settings.preview_alpha,
            sample_factor: settings.sample_factor,
            tile_inset: 0.96,
            toggle_key: KeyCode::KeyF,
            place_button: MouseButton::Left,
            hover_only: false,
        }
    }
}

impl EditorConfig {
    /// Rejects values the editor cannot work with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.width == 0 || self.height == 0 {
            return Err(ConfigError::ZeroExtent {
                width: self.width,
                height: self.height,
            });
        }
        if u64::from(self.width) * u64::from(self.height) > MAX_MAP_CELLS {
            return Err(ConfigError::ExtentTooLarge {
                width: self.width,
                height: self.height,
                max: MAX_MAP_CELLS,
            });
        }
        let Vec2 { x, y } = self.cell_size;
        if !(x.is_finite() && y.is_finite() && x > 0.0 && y > 0.0) {
            return Err(ConfigError::InvalidCellSize {
                width: x,
                height: y,
            });
        }
        if !(0.0..=1.0).contains(&self.preview_alpha) {
            return Err(ConfigError::PreviewAlpha(self.preview_alpha));
        }
        if !(self.sample_factor.is_finite() && self.sample_factor > 1.0) {
            return Err(ConfigError::SampleFactor(self.sample_factor));
        }
        for (which, style) in [("outline", self.outline), ("border", self.border)] {
            if !(style.width.is_finite() && style.width > 0.0) {
                return Err(ConfigError::LineWidth {
                    which,
                    width: style.width,
                });
            }
        }
        Ok(())
    }

    /// The subset of the config the editing core needs.
    pub fn editor_settings(&self) -> EditorSettings {
        EditorSettings {
            outline: self.outline,
            border: self.border,
            preview_alpha: self.preview_alpha,
            sample_factor: self.sample_factor,
            hover_only: self.hover_only,
        }
    }
}

/// Map fill, edit mode, hover, placement and borders.
pub struct EditorPlugin(pub EditorConfig);

impl Plugin for EditorPlugin {
    fn build(&self, app: &mut App) {
        app.register_type::<EditorConfig>()
            .insert_resource(self.0.clone())
            .init_resource::<EditModeFeed>()
            .init_resource::<PointerOverUi>()
            .init_resource::<PointerPosition>()
            .add_message::<EditModeChanged>()
            .add_message::<SelectBrush>()
            .configure_sets(Update, (EditorSet::Input, EditorSet::Views).chain())
            .add_systems(Startup, systems::setup_map)
            .add_systems(
                Update,
                (
                    systems::handle_toggle_input,
                    systems::apply_brush_requests,
                    systems::track_pointer,
                    systems::place_brush,
                    systems::highlight_hovered_cell,
                    systems::forward_edit_mode_changes,
                )
                    .chain()
                    .in_set(EditorSet::Input)
                    .run_if(in_state(GameState::Editing))
                    .run_if(resource_exists::<MapEditor>),
            );
    }
}
