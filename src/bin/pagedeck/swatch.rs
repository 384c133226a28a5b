//! Rasterizer that turns each icon reference into a stable solid colour.
//!
//! With an asset directory configured, references that do not name a file
//! inside it resolve to nothing, so missing icons show up the same way they
//! would on hardware.

use pagedeck::{Bitmap, IconRef, Rasterizer, Size};
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use std::path::PathBuf;

#[derive(Debug, Clone, Default)]
pub(crate) struct SwatchRasterizer {
    asset_dir: Option<PathBuf>,
}

impl SwatchRasterizer {
    pub(crate) fn new(asset_dir: Option<PathBuf>) -> Self {
        Self { asset_dir }
    }
}

impl Rasterizer for SwatchRasterizer {
    fn rasterize(&self, icon: &IconRef, size: Size) -> Option<Bitmap> {
        if let Some(dir) = &self.asset_dir {
            if !dir.join(icon.as_str()).is_file() {
                return None;
            }
        }
        Some(Bitmap::filled(size, swatch_color(icon.as_str())))
    }
}

/// Bright colour derived from the reference text.
pub(crate) fn swatch_color(reference: &str) -> [u8; 3] {
    let mut hasher = DefaultHasher::new();
    reference.hash(&mut hasher);
    let bits = hasher.finish().to_le_bytes();
    // Every channel stays at or above 0x40.
    [bits[0] | 0x40, bits[1] | 0x40, bits[2] | 0x40]
}
