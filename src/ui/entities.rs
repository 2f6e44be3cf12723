use bevy::prelude::*;

/// Whether the brush panel is shown. Follows edit mode.
#[derive(Resource, Default, Debug, Reflect)]
pub struct BrushPanel {
    /// Panel drawn this frame.
    pub visible: bool,
}
