//! Recording collaborators for unit tests.

use std::cell::RefCell;
use std::rc::Rc;

use crate::bitmap::{Bitmap, Size};
use crate::error::DeviceError;
use crate::item::IconRef;
use crate::surface::{Rasterizer, Surface};

/// One call observed by [`RecordingSurface`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum SurfaceCall {
    Key(usize),
    Dial(usize),
    Strip,
    ClearAll,
    Brightness(u8),
    Reset,
    Close,
}

#[derive(Debug, Default)]
pub(crate) struct RecordingSurface {
    pub calls: Vec<SurfaceCall>,
    pub last_strip: Option<Bitmap>,
    pub fail_keys: bool,
}

impl RecordingSurface {
    pub fn keys(&self) -> Vec<usize> {
        self.calls
            .iter()
            .filter_map(|call| match call {
                SurfaceCall::Key(index) => Some(*index),
                _ => None,
            })
            .collect()
    }

    pub fn count(&self, wanted: &SurfaceCall) -> usize {
        self.calls.iter().filter(|call| *call == wanted).count()
    }
}

impl Surface for RecordingSurface {
    fn render_key(&mut self, index: usize, _bitmap: &Bitmap) -> Result<(), DeviceError> {
        if self.fail_keys {
            return Err(DeviceError::new("render_key", "unplugged"));
        }
        self.calls.push(SurfaceCall::Key(index));
        Ok(())
    }

    fn render_led_strip(&mut self, bitmap: &Bitmap) -> Result<(), DeviceError> {
        self.calls.push(SurfaceCall::Strip);
        self.last_strip = Some(bitmap.clone());
        Ok(())
    }

    fn clear_all(&mut self) -> Result<(), DeviceError> {
        self.calls.push(SurfaceCall::ClearAll);
        Ok(())
    }

    fn set_brightness(&mut self, percent: u8) -> Result<(), DeviceError> {
        self.calls.push(SurfaceCall::Brightness(percent));
        Ok(())
    }

    fn render_dial(&mut self, index: usize, _bitmap: &Bitmap) -> Result<(), DeviceError> {
        self.calls.push(SurfaceCall::Dial(index));
        Ok(())
    }

    fn reset(&mut self) -> Result<(), DeviceError> {
        self.calls.push(SurfaceCall::Reset);
        Ok(())
    }

    fn close(&mut self) -> Result<(), DeviceError> {
        self.calls.push(SurfaceCall::Close);
        Ok(())
    }
}

/// Paints every icon a solid colour derived from its name.
/// References starting with `missing` resolve to nothing.
#[derive(Debug, Default)]
pub(crate) struct FakeRasterizer;

impl Rasterizer for FakeRasterizer {
    fn rasterize(&self, icon: &IconRef, size: Size) -> Option<Bitmap> {
        if icon.as_str().starts_with("missing") {
            return None;
        }
        let shade = icon.as_str().len() as u8;
        Some(Bitmap::filled(size, [shade, 200, 10]))
    }
}

/// Shared log of what callbacks saw.
pub(crate) type CallLog<T> = Rc<RefCell<Vec<T>>>;

pub(crate) fn call_log<T>() -> CallLog<T> {
    Rc::new(RefCell::new(Vec::new()))
}
