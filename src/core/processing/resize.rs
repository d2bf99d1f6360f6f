use fast_image_resize::{FilterType, PixelType, ResizeAlg, ResizeOptions, Resizer, images::Image};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::color::Rgba;
use crate::core::processing::canvas::{Canvas, PixelSource};
use crate::error::{Error, Result};
use crate::types::ResampleAlg;

/// Positive, finite scale factor. Output dimension = `floor(input * rate)`.
#[derive(Copy, Clone, PartialEq, PartialOrd, Debug, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct Rate(f64);

impl Rate {
    pub fn new(rate: f64) -> Result<Self> {
        if rate.is_finite() && rate > 0.0 {
            Ok(Rate(rate))
        } else {
            Err(Error::InvalidArgument {
                arg: "rate",
                value: rate.to_string(),
            })
        }
    }

    pub fn get(self) -> f64 {
        self.0
    }

    pub fn scaled_dimensions(self, width: u32, height: u32) -> (u32, u32) {
        (
            (width as f64 * self.0) as u32,
            (height as f64 * self.0) as u32,
        )
    }
}

impl TryFrom<f64> for Rate {
    type Error = Error;

    fn try_from(v: f64) -> Result<Self> {
        Rate::new(v)
    }
}

impl From<Rate> for f64 {
    fn from(r: Rate) -> f64 {
        r.0
    }
}

impl ResampleAlg {
    /// Resizes `src` by `rate` into a fresh canvas pre-filled with `bg`.
    pub fn resample<S: PixelSource + ?Sized>(&self, src: &S, rate: Rate, bg: Rgba) -> Result<Canvas> {
        let (src_w, src_h) = src.dimensions();
        let (out_w, out_h) = rate.scaled_dimensions(src_w, src_h);
        let mut out = Canvas::filled(out_w, out_h, bg);
        debug!(
            "{} resample {}x{} -> {}x{} (rate {:.6})",
            self,
            src_w,
            src_h,
            out_w,
            out_h,
            rate.get()
        );
        if out.is_empty() || src_w == 0 || src_h == 0 {
            return Ok(out);
        }
        match self {
            ResampleAlg::Nearest => nearest(src, rate.get(), &mut out),
            ResampleAlg::Area => area_average(src, rate.get(), &mut out),
            ResampleAlg::Bilinear => bilinear(src, rate.get(), &mut out),
            ResampleAlg::Lanczos3 => out = lanczos3(src, out_w, out_h)?,
        }
        Ok(out)
    }
}

/// Copies the source pixel at `(floor(x / rate), floor(y / rate))`, clamped
/// to the last source row/column.
fn nearest<S: PixelSource + ?Sized>(src: &S, rate: f64, out: &mut Canvas) {
    let (src_w, src_h) = src.dimensions();
    let (out_w, out_h) = out.dimensions();
    for y in 0..out_h {
        let sy = ((y as f64 / rate) as u32).min(src_h - 1);
        for x in 0..out_w {
            let sx = ((x as f64 / rate) as u32).min(src_w - 1);
            out.put_pixel(x, y, src.pixel(sx, sy));
        }
    }
}

/// Weight of each integer source index overlapping `[lo, hi)`.
///
/// Boundary cells get their fractional overlap, interior cells 1. Indices
/// past `limit` (float overshoot at the right/bottom edge) are dropped.
fn footprint(lo: f64, hi: f64, limit: u32) -> Vec<(u32, f64)> {
    let first = lo.floor() as i64;
    let last = hi.ceil() as i64 - 1;
    let mut cells = Vec::with_capacity((last - first + 1).max(0) as usize);
    for i in first..=last {
        let mut w = 1.0;
        if i == first {
            w -= lo - first as f64;
        }
        if i == last {
            w -= 1.0 + last as f64 - hi;
        }
        if i >= 0 && i < limit as i64 && w > 0.0 {
            cells.push((i as u32, w));
        }
    }
    cells
}

/// Flux-conserving area average: each output pixel integrates the source
/// over its footprint and rescales by `rate^2`.
fn area_average<S: PixelSource + ?Sized>(src: &S, rate: f64, out: &mut Canvas) {
    let (src_w, src_h) = src.dimensions();
    let (out_w, out_h) = out.dimensions();
    let scale = rate * rate;

    let columns: Vec<Vec<(u32, f64)>> = (0..out_w)
        .map(|x| footprint(x as f64 / rate, (x + 1) as f64 / rate, src_w))
        .collect();

    for y in 0..out_h {
        let rows = footprint(y as f64 / rate, (y + 1) as f64 / rate, src_h);
        for (x, cols) in columns.iter().enumerate() {
            let mut acc = [0.0f64; 4];
            for &(sy, yw) in &rows {
                for &(sx, xw) in cols {
                    let weight = xw * yw;
                    let p = src.pixel(sx, sy);
                    for c in 0..4 {
                        acc[c] += p.0[c] as f64 * weight;
                    }
                }
            }
            let px = acc.map(|v| (v * scale).round().clamp(0.0, 255.0) as u8);
            out.put_pixel(x as u32, y, Rgba(px));
        }
    }
}

/// Center-aligned bilinear interpolation with edge clamping.
fn bilinear<S: PixelSource + ?Sized>(src: &S, rate: f64, out: &mut Canvas) {
    let (src_w, src_h) = src.dimensions();
    let (out_w, out_h) = out.dimensions();
    let axis = |i: u32, limit: u32| -> (u32, u32, f64) {
        let pos = ((i as f64 + 0.5) / rate - 0.5).clamp(0.0, (limit - 1) as f64);
        let i0 = pos.floor() as u32;
        let i1 = (i0 + 1).min(limit - 1);
        (i0, i1, pos - i0 as f64)
    };

    for y in 0..out_h {
        let (y0, y1, fy) = axis(y, src_h);
        for x in 0..out_w {
            let (x0, x1, fx) = axis(x, src_w);
            let (p00, p10) = (src.pixel(x0, y0), src.pixel(x1, y0));
            let (p01, p11) = (src.pixel(x0, y1), src.pixel(x1, y1));
            let mut px = [0u8; 4];
            for c in 0..4 {
                let top = p00.0[c] as f64 * (1.0 - fx) + p10.0[c] as f64 * fx;
                let bottom = p01.0[c] as f64 * (1.0 - fx) + p11.0[c] as f64 * fx;
                px[c] = (top * (1.0 - fy) + bottom * fy).round().clamp(0.0, 255.0) as u8;
            }
            out.put_pixel(x, y, Rgba(px));
        }
    }
}

fn lanczos3<S: PixelSource + ?Sized>(src: &S, out_w: u32, out_h: u32) -> Result<Canvas> {
    let (src_w, src_h) = src.dimensions();
    let mut bytes = Vec::with_capacity(src_w as usize * src_h as usize * 4);
    for y in 0..src_h {
        for x in 0..src_w {
            bytes.extend_from_slice(&src.pixel(x, y).0);
        }
    }

    let resize_options =
        ResizeOptions::new().resize_alg(ResizeAlg::Convolution(FilterType::Lanczos3));
    let mut resizer = Resizer::new();

    let src_image =
        Image::from_vec_u8(src_w, src_h, bytes, PixelType::U8x4).map_err(Error::processing)?;
    let mut dst_image = Image::new(out_w, out_h, PixelType::U8x4);
    resizer
        .resize(&src_image, &mut dst_image, &resize_options)
        .map_err(Error::processing)?;

    Canvas::from_raw(out_w, out_h, dst_image.into_vec())
        .ok_or_else(|| Error::processing("resizer returned a buffer of unexpected size"))
}

/// Resizes with the given algorithm after validating `rate`.
pub fn resize_image<S: PixelSource + ?Sized>(
    src: &S,
    rate: f64,
    bg: Rgba,
    alg: ResampleAlg,
) -> Result<Canvas> {
    alg.resample(src, Rate::new(rate)?, bg)
}
