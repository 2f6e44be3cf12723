//! Brush panel: an egui side panel listing the brushable tiles, shown while
//! edit mode is on.

mod entities;
mod systems;

pub use entities::BrushPanel;

use bevy::prelude::*;
use bevy_egui::EguiPrimaryContextPass;

use crate::{EditorSet, GameState};

/// Brush panel and its edit-mode tracking.
pub struct UiPlugin;

impl Plugin for UiPlugin {
    fn build(&self, app: &mut App) {
        app.register_type::<BrushPanel>()
            .init_resource::<BrushPanel>()
            .add_systems(Update, systems::follow_edit_mode.after(EditorSet::Input))
            .add_systems(
                EguiPrimaryContextPass,
                systems::brush_panel.run_if(in_state(GameState::Editing)),
            );
    }
}
