use std::sync::Arc;

use bevy::prelude::*;

use super::entities::{
    EditModeChanged, EditModeFeed, EditorStores, PointerOverUi, PointerPosition, PointerWorld, SelectBrush,
};
use super::{EditorConfig, MapEditor, fill_grid};
use crate::polyline::Polylines;
use crate::tilemap::{HexTilemap, PreviewLayer, TileLayer, TilePalette, TileViews, WorldLayer};

/// Preview tiles float just above the painted map.
const PREVIEW_LIFT: f32 = 0.02;

/// Registers the configured tiles, fills the map, synthesizes the initial
/// borders and spawns the world and preview layers.
pub fn setup_map(
    mut commands: Commands,
    config: Res<EditorConfig>,
    feed: Res<EditModeFeed>,
    mut palette: ResMut<TilePalette>,
    mut lines: ResMut<Polylines>,
) {
    let sea = config.sea_tile.clone().map(|style| palette.register(style));
    let base = config.base_tile.clone().map(|style| palette.register(style));

    let mut world = HexTilemap::new(config.cell_size);
    let preview = HexTilemap::new(config.cell_size);
    let mut editor = MapEditor::new(config.editor_settings(), sea, base, &mut *lines);

    let sink = Arc::clone(&feed.0);
    editor.subscribe(move |active| {
        if let Ok(mut pending) = sink.lock() {
            pending.push(active);
        }
    });

    match sea {
        Some(sea) => {
            let origin = config.origin.unwrap_or(Vec2::ZERO);
            match fill_grid(&mut world, origin, config.width, config.height, sea, base) {
                Ok(origin_cell) => info!(
                    "filled {}x{} map ({} cells), base cell at ({}, {})",
                    config.width,
                    config.height,
                    world.len(),
                    origin_cell.x,
                    origin_cell.y
                ),
                Err(err) => warn!("map left empty: {err}"),
            }
        }
        None => warn!("no sea tile configured, map left empty"),
    }
    editor.rebuild_borders(&world, &mut *lines);

    commands.spawn((
        Name::new("WorldLayer"),
        WorldLayer,
        TileLayer {
            lift: 0.0,
            inset: config.tile_inset,
        },
        world,
        TileViews::default(),
        Transform::default(),
        Visibility::default(),
    ));
    commands.spawn((
        Name::new("PreviewLayer"),
        PreviewLayer,
        TileLayer {
            lift: PREVIEW_LIFT,
            inset: config.tile_inset,
        },
        preview,
        TileViews::default(),
        Transform::default(),
        Visibility::default(),
    ));
    commands.insert_resource(editor);
}

/// Flips edit mode on the configured key.
pub fn handle_toggle_input(keys: Res<ButtonInput<KeyCode>>, config: Res<EditorConfig>, mut stores: EditorStores) {
    if !keys.just_pressed(config.toggle_key) {
        return;
    }
    let EditorStores {
        editor,
        preview,
        lines,
        ..
    } = &mut stores;
    let Ok(mut preview) = preview.single_mut() else {
        return;
    };
    editor.toggle_edit_mode(&mut *preview, &mut **lines);
}

/// Applies brush selections issued by the brush panel.
pub fn apply_brush_requests(mut requests: MessageReader<SelectBrush>, mut stores: EditorStores) {
    let EditorStores {
        editor,
        preview,
        lines,
        ..
    } = &mut stores;
    let Ok(mut preview) = preview.single_mut() else {
        return;
    };
    for SelectBrush(tile) in requests.read() {
        editor.select_brush(*tile, &mut *preview, &mut **lines);
    }
}

/// Samples the cursor's grid-plane position once per frame.
pub fn track_pointer(pointer: PointerWorld, mut position: ResMut<PointerPosition>) {
    position.0 = pointer.world_pos();
}

/// Paints the active brush under the cursor on the place button.
pub fn place_brush(
    mouse: Res<ButtonInput<MouseButton>>,
    config: Res<EditorConfig>,
    over_ui: Res<PointerOverUi>,
    pointer: Res<PointerPosition>,
    mut stores: EditorStores,
) {
    if over_ui.0 || !mouse.just_pressed(config.place_button) {
        return;
    }
    let EditorStores {
        editor,
        world,
        preview,
        lines,
    } = &mut stores;
    let (Ok(mut world), Ok(mut preview)) = (world.single_mut(), preview.single_mut()) else {
        return;
    };
    editor.place(pointer.0, &mut *world, &mut *preview, &mut **lines);
}

/// Tracks the cell under the cursor with the outline and preview.
pub fn highlight_hovered_cell(pointer: Res<PointerPosition>, mut stores: EditorStores) {
    let EditorStores {
        editor,
        world,
        preview,
        lines,
    } = &mut stores;
    let (Ok(world), Ok(mut preview)) = (world.single(), preview.single_mut()) else {
        return;
    };
    editor.update_hover(pointer.0, world, &mut *preview, &mut **lines);
}

/// Turns transitions recorded by the editor's observer into messages.
pub fn forward_edit_mode_changes(feed: Res<EditModeFeed>, mut changed: MessageWriter<EditModeChanged>) {
    let Ok(mut pending) = feed.0.lock() else {
        return;
    };
    for active in pending.drain(..) {
        changed.write(EditModeChanged { active });
    }
}
