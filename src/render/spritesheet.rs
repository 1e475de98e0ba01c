// WGF
// copyright zipxing@hotmail.com 2022～2025

//! Cuts a sheet surface into equally sized tiles.

use crate::{render::surface::Surface, util::{Rect, Size}};
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SpritesheetError {
    /// sheet can't be divided into whole tiles
    UnevenSize { sheet: Size, tile: Size },
    NotPowerOfTwo { columns: u32, rows: u32 },
}

impl fmt::Display for SpritesheetError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SpritesheetError::UnevenSize { sheet, tile } => write!(
                f,
                "Spritesheet {}x{} can't be split into {}x{} tiles",
                sheet.width, sheet.height, tile.width, tile.height
            ),
            SpritesheetError::NotPowerOfTwo { columns, rows } => write!(
                f,
                "Spritesheet grid {}x{} is not a power of two",
                columns, rows
            ),
        }
    }
}

impl std::error::Error for SpritesheetError {}

/// Returns tiles in row-major order: left to right, then top to bottom
pub fn slice(sheet: &Surface, tile: Size) -> Result<Vec<Surface>, SpritesheetError> {
    let size = sheet.size();
    if tile.width == 0
        || tile.height == 0
        || size.width % tile.width != 0
        || size.height % tile.height != 0
    {
        return Err(SpritesheetError::UnevenSize { sheet: size, tile });
    }
    let columns = size.width / tile.width;
    let rows = size.height / tile.height;
    if !columns.is_power_of_two() || !rows.is_power_of_two() {
        return Err(SpritesheetError::NotPowerOfTwo { columns, rows });
    }

    let mut tiles = Vec::with_capacity((columns * rows) as usize);
    for row in 0..rows {
        for col in 0..columns {
            let area = Rect::new(
                (col * tile.width) as i32,
                (row * tile.height) as i32,
                tile.width as i32,
                tile.height as i32,
            );
            tiles.push(sheet.subsurface(area));
        }
    }
    Ok(tiles)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::style::Rgb;

    #[test]
    fn four_tiles_row_major() {
        let mut sheet = Surface::new(Size::new(64, 64));
        sheet.put_pixel(32, 0, Rgb::new(255, 0, 0));
        sheet.put_pixel(0, 32, Rgb::new(0, 0, 255));
        let tiles = slice(&sheet, Size::new(32, 32)).unwrap();
        assert_eq!(tiles.len(), 4);
        assert!(tiles.iter().all(|t| t.size() == Size::new(32, 32)));
        assert_eq!(tiles[1].pixel(0, 0).unwrap().rgb(), Rgb::new(255, 0, 0));
        assert_eq!(tiles[2].pixel(0, 0).unwrap().rgb(), Rgb::new(0, 0, 255));
    }

    #[test]
    fn uneven_tiles_fail() {
        let sheet = Surface::new(Size::new(64, 64));
        assert_eq!(
            slice(&sheet, Size::new(20, 20)),
            Err(SpritesheetError::UnevenSize {
                sheet: Size::new(64, 64),
                tile: Size::new(20, 20)
            })
        );
    }

    #[test]
    fn grid_must_be_power_of_two() {
        let sheet = Surface::new(Size::new(96, 32));
        assert_eq!(
            slice(&sheet, Size::new(32, 32)),
            Err(SpritesheetError::NotPowerOfTwo { columns: 3, rows: 1 })
        );
    }
}
