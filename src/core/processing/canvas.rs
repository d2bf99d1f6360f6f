//! Mutable RGBA8 raster that owns its pixel buffer, plus the read-only
//! `PixelSource` view that resamplers and compositing read from.
use image::{DynamicImage, GenericImageView, RgbaImage};

use crate::core::color::Rgba;

/// Read-only per-pixel RGBA access, normalized to 8 bits per channel.
pub trait PixelSource {
    fn dimensions(&self) -> (u32, u32);

    /// Caller guarantees `x < width` and `y < height`.
    fn pixel(&self, x: u32, y: u32) -> Rgba;

    fn width(&self) -> u32 {
        self.dimensions().0
    }

    fn height(&self) -> u32 {
        self.dimensions().1
    }
}

impl PixelSource for DynamicImage {
    fn dimensions(&self) -> (u32, u32) {
        GenericImageView::dimensions(self)
    }

    // 16-bit and float variants are converted to RGBA8 by `image`
    fn pixel(&self, x: u32, y: u32) -> Rgba {
        self.get_pixel(x, y).into()
    }
}

impl PixelSource for RgbaImage {
    fn dimensions(&self) -> (u32, u32) {
        RgbaImage::dimensions(self)
    }

    fn pixel(&self, x: u32, y: u32) -> Rgba {
        (*self.get_pixel(x, y)).into()
    }
}

/// Half-open rectangle `[x0, x1) x [y0, y1)` in destination space. Signed so
/// that placements may hang off the canvas and get clipped.
#[derive(Copy, Clone, PartialEq, Eq, Debug, serde::Serialize, serde::Deserialize)]
pub struct Rect {
    pub x0: i64,
    pub y0: i64,
    pub x1: i64,
    pub y1: i64,
}

impl Rect {
    pub fn new(x0: i64, y0: i64, x1: i64, y1: i64) -> Self {
        Self { x0, y0, x1, y1 }
    }

    pub fn width(&self) -> i64 {
        (self.x1 - self.x0).max(0)
    }

    pub fn height(&self) -> i64 {
        (self.y1 - self.y0).max(0)
    }
}

#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Canvas {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl Canvas {
    /// Zero-initialized (transparent black) canvas.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            data: vec![0u8; width as usize * height as usize * 4],
        }
    }

    pub fn filled(width: u32, height: u32, color: Rgba) -> Self {
        let mut canvas = Self::new(width, height);
        canvas.fill(color);
        canvas
    }

    pub fn fill(&mut self, color: Rgba) {
        for px in self.data.chunks_exact_mut(4) {
            px.copy_from_slice(&color.0);
        }
    }

    /// Wraps an interleaved RGBA8 buffer; `None` when the length does not match.
    pub fn from_raw(width: u32, height: u32, data: Vec<u8>) -> Option<Self> {
        (data.len() == width as usize * height as usize * 4).then_some(Self {
            width,
            height,
            data,
        })
    }

    pub fn as_raw(&self) -> &[u8] {
        &self.data
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    fn offset(&self, x: u32, y: u32) -> usize {
        (y as usize * self.width as usize + x as usize) * 4
    }

    pub fn get_pixel(&self, x: u32, y: u32) -> Rgba {
        let o = self.offset(x, y);
        Rgba([self.data[o], self.data[o + 1], self.data[o + 2], self.data[o + 3]])
    }

    pub fn put_pixel(&mut self, x: u32, y: u32, color: Rgba) {
        let o = self.offset(x, y);
        self.data[o..o + 4].copy_from_slice(&color.0);
    }

    /// Source-over blends `src` into `dst_rect`; the rectangle's top-left
    /// corner reads from `src_origin`. Clipped to both the canvas and `src`.
    pub fn composite_over<S: PixelSource + ?Sized>(
        &mut self,
        dst_rect: Rect,
        src: &S,
        src_origin: (u32, u32),
    ) {
        let (src_w, src_h) = src.dimensions();
        let x_start = dst_rect.x0.max(0);
        let y_start = dst_rect.y0.max(0);
        let x_end = dst_rect.x1.min(self.width as i64);
        let y_end = dst_rect.y1.min(self.height as i64);

        for y in y_start..y_end {
            let sy = src_origin.1 as i64 + (y - dst_rect.y0);
            if sy >= src_h as i64 {
                break;
            }
            for x in x_start..x_end {
                let sx = src_origin.0 as i64 + (x - dst_rect.x0);
                if sx >= src_w as i64 {
                    break;
                }
                let s = src.pixel(sx as u32, sy as u32);
                let d = self.get_pixel(x as u32, y as u32);
                self.put_pixel(x as u32, y as u32, blend_over(s, d));
            }
        }
    }

    pub fn into_rgba_image(self) -> RgbaImage {
        let (w, h) = (self.width, self.height);
        // length invariant is maintained by every constructor
        RgbaImage::from_raw(w, h, self.data).unwrap_or_else(|| RgbaImage::new(w, h))
    }
}

impl PixelSource for Canvas {
    fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    fn pixel(&self, x: u32, y: u32) -> Rgba {
        self.get_pixel(x, y)
    }
}

impl From<RgbaImage> for Canvas {
    fn from(img: RgbaImage) -> Self {
        let (width, height) = img.dimensions();
        Self {
            width,
            height,
            data: img.into_raw(),
        }
    }
}

/// `src * a + dst * (1 - a)` per color channel, alpha as `a + dst_a * (1 - a)`.
fn blend_over(src: Rgba, dst: Rgba) -> Rgba {
    let a = src.0[3] as u32;
    let inv = 255 - a;
    let mix = |s: u8, d: u8| ((s as u32 * a + d as u32 * inv + 127) / 255) as u8;
    Rgba([
        mix(src.0[0], dst.0[0]),
        mix(src.0[1], dst.0[1]),
        mix(src.0[2], dst.0[2]),
        (a + (dst.0[3] as u32 * inv + 127) / 255) as u8,
    ])
}
