//! Finished RGB bitmaps handed to the surface, plus the blit used by strip canvases.

/// Pixel dimensions of a key, zone, or strip.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Size {
    pub width: u32,
    pub height: u32,
}

impl Size {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    pub const fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    fn pixel_count(&self) -> usize {
        self.width as usize * self.height as usize
    }
}

/// Row-major RGB8 image.
#[derive(Clone, PartialEq, Eq)]
pub struct Bitmap {
    size: Size,
    pixels: Vec<[u8; 3]>,
}

impl Bitmap {
    /// Black image of the given size.
    pub fn blank(size: Size) -> Self {
        Self::filled(size, [0, 0, 0])
    }

    pub fn filled(size: Size, rgb: [u8; 3]) -> Self {
        Self {
            size,
            pixels: vec![rgb; size.pixel_count()],
        }
    }

    pub fn size(&self) -> Size {
        self.size
    }

    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 3]> {
        if x >= self.size.width || y >= self.size.height {
            return None;
        }
        self.pixels
            .get(y as usize * self.size.width as usize + x as usize)
            .copied()
    }

    /// Copy `src` with its top-left corner at (`x`, `y`), clipped to this image.
    pub fn paste(&mut self, src: &Bitmap, x: u32, y: u32) {
        let width = self.size.width as usize;
        for sy in 0..src.size.height {
            let dy = y.saturating_add(sy);
            if dy >= self.size.height {
                break;
            }
            for sx in 0..src.size.width {
                let dx = x.saturating_add(sx);
                if dx >= self.size.width {
                    break;
                }
                let src_idx = sy as usize * src.size.width as usize + sx as usize;
                self.pixels[dy as usize * width + dx as usize] = src.pixels[src_idx];
            }
        }
    }

    /// Paint a black rectangle, clipped to this image.
    pub fn clear_region(&mut self, x: u32, y: u32, size: Size) {
        self.paste(&Bitmap::blank(size), x, y);
    }

    /// Mean colour, used by previews that cannot show full images.
    pub fn average(&self) -> [u8; 3] {
        if self.pixels.is_empty() {
            return [0, 0, 0];
        }
        let mut sums = [0u64; 3];
        for px in &self.pixels {
            for (sum, channel) in sums.iter_mut().zip(px) {
                *sum += u64::from(*channel);
            }
        }
        let count = self.pixels.len() as u64;
        sums.map(|sum| (sum / count) as u8)
    }
}

impl std::fmt::Debug for Bitmap {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Bitmap")
            .field("width", &self.size.width)
            .field("height", &self.size.height)
            .finish()
    }
}
