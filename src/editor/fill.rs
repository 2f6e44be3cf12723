use bevy::prelude::*;
use hexx::Hex;

use crate::error::ConfigError;
use crate::math;
use crate::tilemap::{GridMap, TileId};

/// Stamps a `width` x `height` rectangle of `sea` centred on the cell under
/// `origin`, then overwrites that origin cell with `base`.
///
/// The rectangle starts `width / 2` columns and `height / 2` rows before the
/// origin (integer division), so the origin cell is always inside it whatever
/// the parity. Returns the origin cell.
///
/// Extents that do not fit offset coordinates are rejected before any cell is
/// written.
pub fn fill_grid(
    grid: &mut impl GridMap,
    origin: Vec2,
    width: u32,
    height: u32,
    sea: TileId,
    base: Option<TileId>,
) -> Result<Hex, ConfigError> {
    let (Ok(w), Ok(h)) = (i32::try_from(width), i32::try_from(height)) else {
        return Err(ConfigError::ExtentTooLarge {
            width,
            height,
            max: u64::from(i32::MAX.unsigned_abs()),
        });
    };
    let origin_cell = grid.world_to_cell(origin);
    let start = math::hex_to_offset(origin_cell) - IVec2::new(w / 2, h / 2);

    for y in 0..h {
        for x in 0..w {
            grid.set_tile(math::offset_to_hex(start + IVec2::new(x, y)), sea);
        }
    }
    if let Some(base) = base {
        grid.set_tile(origin_cell, base);
    }
    grid.refresh_all();
    Ok(origin_cell)
}
