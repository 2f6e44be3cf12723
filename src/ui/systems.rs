use bevy::prelude::*;
use bevy_egui::{EguiContexts, egui};

use super::entities::BrushPanel;
use crate::editor::{EditModeChanged, MapEditor, PointerOverUi, SelectBrush};
use crate::tilemap::{TileId, TilePalette};

/// Shows the panel while edit mode is on.
pub fn follow_edit_mode(mut changes: MessageReader<EditModeChanged>, mut panel: ResMut<BrushPanel>) {
    if let Some(last) = changes.read().last() {
        panel.visible = last.active;
    }
}

/// Draws one selectable button per brushable tile and records whether the
/// pointer is over any egui area.
pub fn brush_panel(
    mut contexts: EguiContexts,
    panel: Res<BrushPanel>,
    palette: Res<TilePalette>,
    editor: Option<Res<MapEditor>>,
    mut over_ui: ResMut<PointerOverUi>,
    mut requests: MessageWriter<SelectBrush>,
) -> Result {
    let ctx = contexts.ctx_mut()?;

    let hover_only = editor.as_ref().is_some_and(|e| e.settings().hover_only);
    if panel.visible && !hover_only {
        let selected = editor.as_ref().and_then(|e| e.session().brush());
        egui::SidePanel::right("brush_panel")
            .resizable(false)
            .min_width(120.0)
            .show(ctx, |ui| {
                ui.heading("Brushes");
                ui.separator();
                if let Some(tile) = brush_buttons(ui, &palette, selected) {
                    requests.write(SelectBrush(tile));
                }
            });
    }

    over_ui.0 = ctx.is_pointer_over_area();
    Ok(())
}

fn brush_buttons(ui: &mut egui::Ui, palette: &TilePalette, selected: Option<TileId>) -> Option<TileId> {
    let mut clicked = None;
    for (id, style) in palette.brushes() {
        if ui.selectable_label(selected == Some(id), &style.name).clicked() {
            clicked = Some(id);
        }
    }
    clicked
}
