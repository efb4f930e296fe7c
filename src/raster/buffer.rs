use crate::foundation::core::{Canvas, Rgba8};
use crate::foundation::error::{HeartError, HeartResult};

/// Row-major straight-alpha RGBA8 pixel buffer.
///
/// Every compositing primitive reads and writes this layout: 4 bytes per pixel,
/// `r, g, b, a`, color channels not multiplied by alpha.
#[derive(Clone, PartialEq, Eq)]
pub struct PixelBuffer {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl std::fmt::Debug for PixelBuffer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PixelBuffer")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("data_len", &self.data.len())
            .finish()
    }
}

impl PixelBuffer {
    /// Allocate a fully transparent buffer.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            data: vec![0; (width as usize) * (height as usize) * 4],
        }
    }

    /// Allocate a buffer matching a canvas.
    pub fn for_canvas(canvas: Canvas) -> Self {
        Self::new(canvas.width, canvas.height)
    }

    /// Wrap existing row-major RGBA8 bytes.
    pub fn from_raw(width: u32, height: u32, data: Vec<u8>) -> HeartResult<Self> {
        let expected = (width as usize)
            .checked_mul(height as usize)
            .and_then(|v| v.checked_mul(4))
            .ok_or_else(|| HeartError::validation("pixel buffer size overflow"))?;
        if data.len() != expected {
            return Err(HeartError::validation(format!(
                "pixel buffer expects {expected} bytes for {width}x{height}, got {}",
                data.len()
            )));
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    /// Convert from an `image` RGBA buffer.
    pub fn from_rgba_image(img: image::RgbaImage) -> Self {
        let (width, height) = img.dimensions();
        Self {
            width,
            height,
            data: img.into_raw(),
        }
    }

    /// Copy into an `image` RGBA buffer.
    pub fn to_rgba_image(&self) -> HeartResult<image::RgbaImage> {
        image::RgbaImage::from_raw(self.width, self.height, self.data.clone())
            .ok_or_else(|| HeartError::render("pixel buffer does not match image dimensions"))
    }

    /// Width in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Raw bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    /// Raw bytes, mutable.
    pub fn as_bytes_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }

    /// Consume into raw bytes.
    pub fn into_raw(self) -> Vec<u8> {
        self.data
    }

    /// Whether `(x, y)` addresses a pixel of this buffer.
    pub fn in_bounds(&self, x: i32, y: i32) -> bool {
        x >= 0 && y >= 0 && (x as u32) < self.width && (y as u32) < self.height
    }

    pub(crate) fn offset(&self, x: u32, y: u32) -> usize {
        ((y as usize) * (self.width as usize) + (x as usize)) * 4
    }

    /// Read a pixel; `None` outside the buffer.
    pub fn pixel(&self, x: i32, y: i32) -> Option<Rgba8> {
        if !self.in_bounds(x, y) {
            return None;
        }
        let o = self.offset(x as u32, y as u32);
        let mut px = [0u8; 4];
        px.copy_from_slice(&self.data[o..o + 4]);
        Some(Rgba8::from_array(px))
    }

    /// Overwrite a pixel; silently ignored outside the buffer.
    pub fn put_pixel(&mut self, x: i32, y: i32, c: Rgba8) {
        if !self.in_bounds(x, y) {
            return;
        }
        let o = self.offset(x as u32, y as u32);
        self.data[o..o + 4].copy_from_slice(&c.to_array());
    }

    /// Overwrite every pixel with `c`.
    pub fn fill(&mut self, c: Rgba8) {
        let px = c.to_array();
        for d in self.data.chunks_exact_mut(4) {
            d.copy_from_slice(&px);
        }
    }

    /// Overwrite the rectangle `[x0, x1) x [y0, y1)` with `c`, clipped to the buffer.
    pub fn fill_rect(&mut self, x0: i32, y0: i32, x1: i32, y1: i32, c: Rgba8) {
        let (x0, x1) = self.clip_x(x0, x1);
        let (y0, y1) = self.clip_y(y0, y1);
        let px = c.to_array();
        for y in y0..y1 {
            let start = self.offset(x0, y);
            let end = self.offset(x1, y);
            for d in self.data[start..end].chunks_exact_mut(4) {
                d.copy_from_slice(&px);
            }
        }
    }

    pub(crate) fn clip_x(&self, x0: i32, x1: i32) -> (u32, u32) {
        let w = i64::from(self.width);
        let a = i64::from(x0).clamp(0, w) as u32;
        let b = i64::from(x1).clamp(0, w) as u32;
        (a, b.max(a))
    }

    pub(crate) fn clip_y(&self, y0: i32, y1: i32) -> (u32, u32) {
        let h = i64::from(self.height);
        let a = i64::from(y0).clamp(0, h) as u32;
        let b = i64::from(y1).clamp(0, h) as u32;
        (a, b.max(a))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/raster/buffer.rs"]
mod tests;
