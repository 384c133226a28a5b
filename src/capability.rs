//! Device capability descriptor that sizes every page's slot tables.

use crate::bitmap::Size;

/// Largest number of touch zones a strip is divided into.
pub const MAX_TOUCH_ZONES: usize = 4;

/// What the attached surface offers. Supplied by the driver; fixed for a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeviceCapability {
    pub button_rows: usize,
    pub button_cols: usize,
    pub dial_count: usize,
    /// Zones the touch strip is divided into; 0 means no strip.
    pub touch_zone_count: usize,
    pub key_pixel_size: Size,
    pub strip_pixel_size: Size,
}

impl DeviceCapability {
    /// 4x2 keys, 4 dials, 800x100 touch strip.
    pub const fn stream_deck_plus() -> Self {
        Self {
            button_rows: 2,
            button_cols: 4,
            dial_count: 4,
            touch_zone_count: MAX_TOUCH_ZONES,
            key_pixel_size: Size::new(120, 120),
            strip_pixel_size: Size::new(800, 100),
        }
    }

    /// 5x3 keys, no dials or strip.
    pub const fn stream_deck_mk2() -> Self {
        Self {
            button_rows: 3,
            button_cols: 5,
            dial_count: 0,
            touch_zone_count: 0,
            key_pixel_size: Size::new(72, 72),
            strip_pixel_size: Size::new(0, 0),
        }
    }

    /// 3x2 keys.
    pub const fn stream_deck_mini() -> Self {
        Self {
            button_rows: 2,
            button_cols: 3,
            dial_count: 0,
            touch_zone_count: 0,
            key_pixel_size: Size::new(80, 80),
            strip_pixel_size: Size::new(0, 0),
        }
    }

    /// 8x4 keys.
    pub const fn stream_deck_xl() -> Self {
        Self {
            button_rows: 4,
            button_cols: 8,
            dial_count: 0,
            touch_zone_count: 0,
            key_pixel_size: Size::new(96, 96),
            strip_pixel_size: Size::new(0, 0),
        }
    }

    pub fn key_count(&self) -> usize {
        self.button_rows * self.button_cols
    }

    pub fn has_strip(&self) -> bool {
        self.touch_zone_count > 0 && !self.strip_pixel_size.is_empty()
    }

    /// Linear device key index for a grid cell.
    pub fn key_index(&self, row: usize, col: usize) -> usize {
        row * self.button_cols + col
    }

    /// Grid cell for a linear device key index.
    pub fn grid_position(&self, index: usize) -> (usize, usize) {
        let cols = self.button_cols.max(1);
        (index / cols, index % cols)
    }
}

impl Default for DeviceCapability {
    fn default() -> Self {
        Self::stream_deck_plus()
    }
}
