//! Command-line overrides for [`EditorConfig`].

use bevy::prelude::Vec2;
use clap::Parser;

use crate::editor::EditorConfig;

/// Command-line flags. Each given flag overrides the matching config field.
#[derive(Parser, Debug, Default)]
#[command(name = "hex-map-editor")]
#[command(about = "Paint base tiles onto a hexagonal sea map")]
pub struct Cli {
    /// Map width in cells
    #[arg(short = 'W', long)]
    pub width: Option<u32>,

    /// Map height in cells
    #[arg(short = 'H', long)]
    pub height: Option<u32>,

    /// World X of the anchor whose cell becomes the base cell
    #[arg(long, allow_negative_numbers = true)]
    pub origin_x: Option<f32>,

    /// World Y of the anchor whose cell becomes the base cell
    #[arg(long, allow_negative_numbers = true)]
    pub origin_y: Option<f32>,

    /// Cell width in world units
    #[arg(long)]
    pub cell_width: Option<f32>,

    /// Cell height in world units
    #[arg(long)]
    pub cell_height: Option<f32>,

    /// Only highlight the hovered cell (no brushes, preview or borders)
    #[arg(long)]
    pub hover_only: bool,
}

impl Cli {
    /// Writes every given flag into `config`.
    pub fn apply(&self, config: &mut EditorConfig) {
        if let Some(width) = self.width {
            config.width = width;
        }
        if let Some(height) = self.height {
            config.height = height;
        }
        if self.origin_x.is_some() || self.origin_y.is_some() {
            let current = config.origin.unwrap_or(Vec2::ZERO);
            config.origin = Some(Vec2::new(
                self.origin_x.unwrap_or(current.x),
                self.origin_y.unwrap_or(current.y),
            ));
        }
        if let Some(w) = self.cell_width {
            config.cell_size.x = w;
        }
        if let Some(h) = self.cell_height {
            config.cell_size.y = h;
        }
        if self.hover_only {
            config.hover_only = true;
        }
    }
}
