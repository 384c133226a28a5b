//! Boundaries to the driver and rasterizer collaborators.
//!
//! The engine never talks to hardware or decodes assets itself. It calls
//! through [`Surface`] to paint finished bitmaps and through [`Rasterizer`] to
//! turn an icon reference into a bitmap of a requested size.

use crate::bitmap::{Bitmap, Size};
use crate::error::DeviceError;
use crate::item::IconRef;

/// Render consumer implemented by the device driver.
pub trait Surface {
    fn render_key(&mut self, index: usize, bitmap: &Bitmap) -> Result<(), DeviceError>;

    fn render_led_strip(&mut self, bitmap: &Bitmap) -> Result<(), DeviceError>;

    /// Blank every key and the touch strip.
    fn clear_all(&mut self) -> Result<(), DeviceError>;

    fn set_brightness(&mut self, percent: u8) -> Result<(), DeviceError>;

    /// Paint a dial's face. Surfaces without per-dial displays ignore it.
    fn render_dial(&mut self, _index: usize, _bitmap: &Bitmap) -> Result<(), DeviceError> {
        Ok(())
    }

    /// Return the device to its power-on state.
    fn reset(&mut self) -> Result<(), DeviceError> {
        self.clear_all()
    }

    /// Release the device handle.
    fn close(&mut self) -> Result<(), DeviceError> {
        Ok(())
    }
}

/// Asset resolution implemented by the rasterizer collaborator.
pub trait Rasterizer {
    /// `None` when the reference cannot be resolved.
    fn rasterize(&self, icon: &IconRef, size: Size) -> Option<Bitmap>;
}

impl<R: Rasterizer + ?Sized> Rasterizer for &R {
    fn rasterize(&self, icon: &IconRef, size: Size) -> Option<Bitmap> {
        (**self).rasterize(icon, size)
    }
}
