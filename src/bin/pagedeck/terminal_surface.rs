//! Surface that paints keys, dial faces, and the touch strip as coloured terminal cells.

use crossterm::{
    cursor::MoveTo,
    queue,
    style::{Color, Print, ResetColor, SetBackgroundColor, SetForegroundColor},
    terminal::{Clear, ClearType},
};
use pagedeck::{Bitmap, DeviceCapability, DeviceError, Size, Surface};
use std::io::Write;

const KEY_CELL_WIDTH: u16 = 8;
const KEY_CELL_HEIGHT: u16 = 3;
const CELL_GAP: u16 = 1;
const DIAL_CELL_HEIGHT: u16 = 2;
const STRIP_ROWS: u16 = 3;
const GRID_TOP: u16 = 2;
const LEFT: u16 = 2;
const BLANK: [u8; 3] = [24, 24, 24];

/// Terminal cells covered by the touch strip bar, and the pixel size they stand for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct StripGeometry {
    pub left: u16,
    pub top: u16,
    pub cols: u16,
    pub rows: u16,
    pub pixels: Size,
}

impl StripGeometry {
    pub(crate) fn contains(&self, column: u16, row: u16) -> bool {
        self.cols > 0
            && (self.left..self.left + self.cols).contains(&column)
            && (self.top..self.top + self.rows).contains(&row)
    }

    /// Strip pixel under a terminal cell, clamped to the bar's edges.
    pub(crate) fn to_pixels(&self, column: u16, row: u16) -> (u32, u32) {
        let col = column
            .saturating_sub(self.left)
            .min(self.cols.saturating_sub(1));
        let row = row.saturating_sub(self.top).min(self.rows.saturating_sub(1));
        let x = u32::from(col) * self.pixels.width / u32::from(self.cols.max(1));
        let y = u32::from(row) * self.pixels.height / u32::from(self.rows.max(1));
        (x, y)
    }
}

/// Cell layout derived from the device capability.
#[derive(Debug, Clone, Copy)]
struct Layout {
    capability: DeviceCapability,
    dial_top: u16,
    strip: StripGeometry,
    help_row: u16,
}

impl Layout {
    fn new(capability: DeviceCapability) -> Self {
        let rows = capability.button_rows as u16;
        let cols = capability.button_cols as u16;
        let grid_width = cols * (KEY_CELL_WIDTH + CELL_GAP);
        let dial_top = GRID_TOP + rows * (KEY_CELL_HEIGHT + CELL_GAP) + 1;
        let strip_top = if capability.dial_count > 0 {
            dial_top + DIAL_CELL_HEIGHT + 2
        } else {
            dial_top
        };
        let strip = if capability.has_strip() {
            StripGeometry {
                left: LEFT,
                top: strip_top,
                cols: grid_width.max(16),
                rows: STRIP_ROWS,
                pixels: capability.strip_pixel_size,
            }
        } else {
            StripGeometry {
                left: LEFT,
                top: strip_top,
                cols: 0,
                rows: 0,
                pixels: Size::default(),
            }
        };
        let help_row = strip.top + strip.rows + 1;
        Self {
            capability,
            dial_top,
            strip,
            help_row,
        }
    }

    fn key_origin(&self, index: usize) -> (u16, u16) {
        let (row, col) = self.capability.grid_position(index);
        (
            LEFT + col as u16 * (KEY_CELL_WIDTH + CELL_GAP),
            GRID_TOP + row as u16 * (KEY_CELL_HEIGHT + CELL_GAP),
        )
    }

    fn dial_origin(&self, index: usize) -> (u16, u16) {
        (
            LEFT + index as u16 * (KEY_CELL_WIDTH * 2 + CELL_GAP),
            self.dial_top,
        )
    }
}

pub(crate) struct TerminalSurface<W: Write> {
    out: W,
    layout: Layout,
    brightness: u8,
}

impl<W: Write> TerminalSurface<W> {
    pub(crate) fn new(capability: DeviceCapability, out: W) -> Self {
        Self {
            out,
            layout: Layout::new(capability),
            brightness: 100,
        }
    }

    pub(crate) fn strip_geometry(&self) -> StripGeometry {
        self.layout.strip
    }

    fn dim(&self, rgb: [u8; 3]) -> Color {
        let scale = |channel: u8| (u16::from(channel) * u16::from(self.brightness) / 100) as u8;
        Color::Rgb {
            r: scale(rgb[0]),
            g: scale(rgb[1]),
            b: scale(rgb[2]),
        }
    }

    fn fill(
        &mut self,
        x: u16,
        y: u16,
        width: u16,
        height: u16,
        rgb: [u8; 3],
    ) -> Result<(), DeviceError> {
        let color = self.dim(rgb);
        let row = " ".repeat(usize::from(width));
        for dy in 0..height {
            queue!(
                self.out,
                MoveTo(x, y + dy),
                SetBackgroundColor(color),
                Print(&row)
            )?;
        }
        queue!(self.out, ResetColor)?;
        Ok(())
    }

    fn caption(&mut self, x: u16, y: u16, text: &str) -> Result<(), DeviceError> {
        queue!(
            self.out,
            MoveTo(x, y),
            SetForegroundColor(Color::DarkGrey),
            Print(text),
            ResetColor
        )?;
        Ok(())
    }

    fn draw_frame(&mut self) -> Result<(), DeviceError> {
        let cap = self.layout.capability;
        queue!(self.out, ResetColor, Clear(ClearType::All))?;
        self.caption(LEFT, 0, "pagedeck")?;
        for index in 0..cap.key_count() {
            let (x, y) = self.layout.key_origin(index);
            self.fill(x, y, KEY_CELL_WIDTH, KEY_CELL_HEIGHT, BLANK)?;
            self.caption(x, y + KEY_CELL_HEIGHT, &format!("key {}", key_hint(index)))?;
        }
        for index in 0..cap.dial_count {
            let (x, y) = self.layout.dial_origin(index);
            self.fill(x, y, KEY_CELL_WIDTH * 2, DIAL_CELL_HEIGHT, BLANK)?;
            self.caption(x, y + DIAL_CELL_HEIGHT, &format!("dial {}", dial_hint(index)))?;
        }
        let strip = self.layout.strip;
        if strip.cols > 0 {
            self.fill(strip.left, strip.top, strip.cols, strip.rows, BLANK)?;
        }
        let help_row = self.layout.help_row;
        self.caption(
            LEFT,
            help_row,
            "1-0 keys | asdf press dials | zxcv/ZXCV turn | click/drag strip | q quit",
        )?;
        self.draw_status()
    }

    fn draw_status(&mut self) -> Result<(), DeviceError> {
        let text = format!("brightness {:>3}%", self.brightness);
        let help_row = self.layout.help_row;
        self.caption(LEFT, help_row + 1, &text)
    }

    fn flush(&mut self) -> Result<(), DeviceError> {
        self.out.flush()?;
        Ok(())
    }
}

impl<W: Write> Surface for TerminalSurface<W> {
    fn render_key(&mut self, index: usize, bitmap: &Bitmap) -> Result<(), DeviceError> {
        if index >= self.layout.capability.key_count() {
            return Err(DeviceError::new(
                "render_key",
                format!("key {index} is not on this device"),
            ));
        }
        let (x, y) = self.layout.key_origin(index);
        self.fill(x, y, KEY_CELL_WIDTH, KEY_CELL_HEIGHT, bitmap.average())?;
        self.flush()
    }

    fn render_dial(&mut self, index: usize, bitmap: &Bitmap) -> Result<(), DeviceError> {
        if index >= self.layout.capability.dial_count {
            return Ok(());
        }
        let (x, y) = self.layout.dial_origin(index);
        self.fill(x, y, KEY_CELL_WIDTH * 2, DIAL_CELL_HEIGHT, bitmap.average())?;
        self.flush()
    }

    fn render_led_strip(&mut self, bitmap: &Bitmap) -> Result<(), DeviceError> {
        let strip = self.layout.strip;
        if strip.cols == 0 {
            return Ok(());
        }
        let size = bitmap.size();
        for column in 0..strip.cols {
            let x = u32::from(column) * size.width / u32::from(strip.cols);
            let rgb = bitmap.pixel(x, size.height / 2).unwrap_or(BLANK);
            let color = self.dim(rgb);
            for row in 0..strip.rows {
                queue!(
                    self.out,
                    MoveTo(strip.left + column, strip.top + row),
                    SetBackgroundColor(color),
                    Print(" ")
                )?;
            }
        }
        queue!(self.out, ResetColor)?;
        self.flush()
    }

    fn clear_all(&mut self) -> Result<(), DeviceError> {
        self.draw_frame()?;
        self.flush()
    }

    fn set_brightness(&mut self, percent: u8) -> Result<(), DeviceError> {
        self.brightness = percent.min(100);
        self.draw_status()?;
        self.flush()
    }

    fn reset(&mut self) -> Result<(), DeviceError> {
        queue!(self.out, ResetColor, Clear(ClearType::All), MoveTo(0, 0))?;
        self.flush()
    }
}

fn key_hint(index: usize) -> String {
    match index {
        0..=8 => (index + 1).to_string(),
        9 => "0".to_string(),
        _ => "-".to_string(),
    }
}

fn dial_hint(index: usize) -> &'static str {
    ["a", "s", "d", "f"].get(index).copied().unwrap_or("-")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strip_cells_map_to_pixels_with_clamping() {
        let geometry = StripGeometry {
            left: 2,
            top: 10,
            cols: 40,
            rows: 4,
            pixels: Size::new(800, 100),
        };
        assert!(geometry.contains(2, 10));
        assert!(!geometry.contains(42, 10));
        assert_eq!(geometry.to_pixels(2, 10), (0, 0));
        assert_eq!(geometry.to_pixels(22, 12), (400, 50));
        assert_eq!(geometry.to_pixels(90, 30), (780, 75));
    }

    #[test]
    fn render_key_rejects_index_outside_grid() {
        let mut surface = TerminalSurface::new(DeviceCapability::stream_deck_plus(), Vec::new());
        let bitmap = Bitmap::blank(Size::new(4, 4));
        assert!(surface.render_key(8, &bitmap).is_err());
        assert!(surface.render_key(7, &bitmap).is_ok());
        assert!(!surface.out.is_empty());
    }

    #[test]
    fn plus_layout_has_a_strip_bar() {
        let surface = TerminalSurface::new(DeviceCapability::stream_deck_plus(), Vec::new());
        assert!(surface.strip_geometry().cols > 0);
        let surface = TerminalSurface::new(DeviceCapability::stream_deck_mk2(), Vec::new());
        assert_eq!(surface.strip_geometry().cols, 0);
    }
}
