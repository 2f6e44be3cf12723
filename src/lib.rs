#![warn(missing_docs)]
//! Interactive hex-grid map editor.
//!
//! Fills a rectangle of point-top hex cells with sea around a single base
//! cell, then lets the user toggle edit mode, hover-highlight cells and paint
//! brushes onto them. Borders between base and sea are regenerated after
//! every placement.

pub mod camera;
#[cfg(feature = "native")]
pub mod cli;
pub mod editor;
pub mod error;
pub mod math;
pub mod polyline;
pub mod tilemap;
pub mod ui;

use bevy::prelude::*;

/// Application-wide state, used for system scheduling.
#[derive(States, Default, Debug, Clone, PartialEq, Eq, Hash, Reflect)]
pub enum GameState {
    /// Editor input is live.
    #[default]
    Editing,
    /// World inspector open (Tab to toggle); editor input paused.
    Debugging,
}

/// Per-frame ordering: input handling mutates the stores, then views catch up.
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub enum EditorSet {
    /// Toggle, brush requests, placement, hover and notification forwarding.
    Input,
    /// Tile and polyline view sync.
    Views,
}
