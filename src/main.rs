//! Hex map editor binary: parses overrides, validates the config and runs the app.

use bevy::app::AppExit;
use bevy::prelude::*;
use bevy_inspector_egui::quick::WorldInspectorPlugin;

use hex_map_editor::GameState;
use hex_map_editor::camera::{CameraPlugin, ZoomConfig};
use hex_map_editor::editor::{EditorConfig, EditorPlugin};
use hex_map_editor::polyline::PolylinePlugin;
use hex_map_editor::tilemap::TilemapPlugin;
use hex_map_editor::ui::UiPlugin;

fn main() {
    let config = editor_config();
    if let Err(err) = config.validate() {
        eprintln!("invalid configuration: {err}");
        std::process::exit(2);
    }

    let mut app = App::new();

    app.add_plugins(DefaultPlugins.set(WindowPlugin {
        primary_window: Some(Window {
            title: "Hex Map Editor".into(),
            ..default()
        }),
        ..default()
    }))
    .insert_resource(ClearColor(Color::srgb(0.08, 0.09, 0.11)))
    .register_type::<GameState>()
    .init_state::<GameState>()
    .add_plugins(bevy_egui::EguiPlugin::default())
    .add_plugins(TilemapPlugin)
    .add_plugins(PolylinePlugin)
    .add_plugins(EditorPlugin(config))
    .add_plugins(CameraPlugin(ZoomConfig::default()))
    .add_plugins(UiPlugin)
    .add_systems(Update, exit_on_esc)
    .add_systems(Update, toggle_inspector)
    .add_plugins(WorldInspectorPlugin::new().run_if(in_state(GameState::Debugging)));

    app.run();
}

#[cfg(feature = "native")]
fn editor_config() -> EditorConfig {
    use clap::Parser;

    let mut config = EditorConfig::default();
    hex_map_editor::cli::Cli::parse().apply(&mut config);
    config
}

#[cfg(not(feature = "native"))]
fn editor_config() -> EditorConfig {
    EditorConfig::default()
}

fn toggle_inspector(
    keys: Res<ButtonInput<KeyCode>>,
    state: Res<State<GameState>>,
    mut next: ResMut<NextState<GameState>>,
) {
    if keys.just_pressed(KeyCode::Tab) {
        next.set(match state.get() {
            GameState::Editing => GameState::Debugging,
            GameState::Debugging => GameState::Editing,
        });
    }
}

fn exit_on_esc(keys: Res<ButtonInput<KeyCode>>, mut exit: MessageWriter<AppExit>) {
    if keys.just_pressed(KeyCode::Escape) {
        exit.write(AppExit::Success);
    }
}
