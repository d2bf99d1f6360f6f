//! Uniform-grid collage: aggregate statistics, grid geometry, per-image
//! fit-and-center placement, and compositing onto one canvas.
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::core::color::Rgba;
use crate::core::processing::canvas::{Canvas, PixelSource, Rect};
use crate::core::processing::resize::Rate;
use crate::error::{Error, Result};
use crate::types::ResampleAlg;

/// Mean aspect ratio and mean pixel area over a non-empty image set.
#[derive(Copy, Clone, PartialEq, Debug, Serialize, Deserialize)]
pub struct AggregateStats {
    pub count: usize,
    pub mean_aspect: f64,
    /// Integer-truncated mean of `width * height`.
    pub mean_area: u64,
}

impl AggregateStats {
    pub fn from_dimensions(dims: &[(u32, u32)]) -> Result<Self> {
        if dims.is_empty() {
            return Err(Error::EmptyInput);
        }
        if let Some(&(w, h)) = dims.iter().find(|&&(w, h)| w == 0 || h == 0) {
            return Err(Error::InvalidArgument {
                arg: "image",
                value: format!("{}x{}", w, h),
            });
        }

        let per_image: Vec<(f64, u64)> = dims
            .iter()
            .map(|&(w, h)| (w as f64 / h as f64, w as u64 * h as u64))
            .collect();
        let count = per_image.len();
        let aspect_sum: f64 = per_image.iter().map(|&(a, _)| a).sum();
        let area_sum: u64 = per_image.iter().map(|&(_, px)| px).sum();

        Ok(Self {
            count,
            mean_aspect: aspect_sum / count as f64,
            mean_area: area_sum / count as u64,
        })
    }
}

/// Grid geometry shared by every cell of a collage.
///
/// Cell `index` sits at column `index % columns`, row `index / columns`, so
/// the grid is filled left to right, then top to bottom.
#[derive(Copy, Clone, PartialEq, Debug, Serialize, Deserialize)]
pub struct GridLayout {
    pub columns: u32,
    pub rows: u32,
    pub cell_width: u32,
    pub cell_height: u32,
    pub margin: f64,
}

impl GridLayout {
    pub fn compute(stats: &AggregateStats, margin: f64) -> Result<Self> {
        validate_margin(margin)?;
        let n = stats.count as f64;
        let columns = n.sqrt().ceil() as u32;
        let rows = (n / columns as f64).ceil() as u32;
        let area = stats.mean_area as f64;
        let cell_height = ((area / stats.mean_aspect).sqrt() * margin) as u32;
        let cell_width = ((area * stats.mean_aspect).sqrt() * margin) as u32;
        if cell_width == 0 || cell_height == 0 {
            return Err(Error::InvalidArgument {
                arg: "margin",
                value: margin.to_string(),
            });
        }

        let layout = Self {
            columns,
            rows,
            cell_width,
            cell_height,
            margin,
        };
        layout.checked_canvas_size()?;
        Ok(layout)
    }

    fn checked_canvas_size(&self) -> Result<(u32, u32)> {
        let too_large = || Error::InvalidArgument {
            arg: "margin",
            value: self.margin.to_string(),
        };
        let w = self.cell_width.checked_mul(self.columns).ok_or_else(too_large)?;
        let h = self.cell_height.checked_mul(self.rows).ok_or_else(too_large)?;
        Ok((w, h))
    }

    pub fn canvas_size(&self) -> (u32, u32) {
        (self.cell_width * self.columns, self.cell_height * self.rows)
    }

    pub fn cell_origin(&self, index: usize) -> (i64, i64) {
        let column = (index % self.columns as usize) as i64;
        let row = (index / self.columns as usize) as i64;
        (column * self.cell_width as i64, row * self.cell_height as i64)
    }

    /// Fits wide images to the cell width and tall ones to the cell height,
    /// measured against the collage's mean aspect.
    pub fn fit_rate(&self, stats: &AggregateStats, width: u32, height: u32) -> f64 {
        let aspect = width as f64 / height as f64;
        if aspect >= stats.mean_aspect {
            (self.cell_width as f64 / self.margin) / width as f64
        } else {
            (self.cell_height as f64 / self.margin) / height as f64
        }
    }

    /// Destination rectangle for a resized image in cell `index`: centered with
    /// truncating slack, trailing edge inset by one pixel as a gutter.
    pub fn placement(&self, index: usize, resized_width: u32, resized_height: u32) -> Rect {
        let (ox, oy) = self.cell_origin(index);
        let (cw, ch) = (self.cell_width as i64, self.cell_height as i64);
        let hspace = (cw - resized_width as i64) / 2;
        let vspace = (ch - resized_height as i64) / 2;
        Rect::new(
            ox + hspace,
            oy + vspace,
            ox + cw - 1 - hspace,
            oy + ch - 1 - vspace,
        )
    }
}

pub fn validate_margin(margin: f64) -> Result<()> {
    if margin.is_finite() && margin > 0.0 {
        Ok(())
    } else {
        Err(Error::InvalidArgument {
            arg: "margin",
            value: margin.to_string(),
        })
    }
}

#[derive(Copy, Clone, PartialEq, Debug)]
pub struct CollageOptions {
    pub background: Rgba,
    pub margin: f64,
    pub algorithm: ResampleAlg,
    /// Resize up to `rayon::current_num_threads()` images at a time.
    pub parallel: bool,
}

impl Default for CollageOptions {
    fn default() -> Self {
        Self {
            background: Rgba::WHITE,
            margin: 1.1,
            algorithm: ResampleAlg::Area,
            parallel: false,
        }
    }
}

#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
pub struct Placement {
    pub index: usize,
    pub source_size: (u32, u32),
    pub rate: f64,
    pub resized_size: (u32, u32),
    pub rect: Rect,
}

#[derive(Clone, Debug)]
pub struct Collage {
    pub canvas: Canvas,
    pub stats: AggregateStats,
    pub layout: GridLayout,
    pub placements: Vec<Placement>,
}

/// Lays `images` out on a uniform grid and composites them in index order.
/// Any failing resize aborts the whole collage.
pub fn compose_collage<S>(images: &[S], options: &CollageOptions) -> Result<Collage>
where
    S: PixelSource + Sync,
{
    if images.is_empty() {
        return Err(Error::EmptyInput);
    }
    validate_margin(options.margin)?;

    let dims: Vec<(u32, u32)> = images.iter().map(|img| img.dimensions()).collect();
    let stats = AggregateStats::from_dimensions(&dims)?;
    let layout = GridLayout::compute(&stats, options.margin)?;
    let (canvas_w, canvas_h) = layout.canvas_size();

    info!(
        "Collage of {} images: {}x{} grid, cell {}x{}, canvas {}x{}",
        stats.count, layout.columns, layout.rows, layout.cell_width, layout.cell_height, canvas_w, canvas_h
    );

    let mut canvas = Canvas::filled(canvas_w, canvas_h, options.background);
    let mut placements = Vec::with_capacity(images.len());

    let resize_one = |index: usize, img: &S| -> Result<(f64, Canvas)> {
        let (w, h) = img.dimensions();
        let rate = layout.fit_rate(&stats, w, h);
        let resized = options
            .algorithm
            .resample(img, Rate::new(rate)?, options.background)?;
        debug!("image {} ({}x{}) resized at rate {:.6}", index, w, h, rate);
        Ok((rate, resized))
    };

    let batch_size = if options.parallel {
        rayon::current_num_threads().max(1)
    } else {
        1
    };

    for (batch_index, batch) in images.chunks(batch_size).enumerate() {
        let base = batch_index * batch_size;
        let resized: Vec<(f64, Canvas)> = if options.parallel {
            batch
                .par_iter()
                .enumerate()
                .map(|(k, img)| resize_one(base + k, img))
                .collect::<Result<Vec<_>>>()?
        } else {
            batch
                .iter()
                .enumerate()
                .map(|(k, img)| resize_one(base + k, img))
                .collect::<Result<Vec<_>>>()?
        };

        for (k, (rate, img)) in resized.into_iter().enumerate() {
            let index = base + k;
            let (rw, rh) = img.dimensions();
            let rect = layout.placement(index, rw, rh);
            debug!("image {} placed at {:?}", index, rect);
            canvas.composite_over(rect, &img, (0, 0));
            placements.push(Placement {
                index,
                source_size: dims[index],
                rate,
                resized_size: (rw, rh),
                rect,
            });
        }
    }

    Ok(Collage {
        canvas,
        stats,
        layout,
        placements,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn solid(w: u32, h: u32, c: Rgba) -> Canvas {
        Canvas::filled(w, h, c)
    }

    fn options(margin: f64) -> CollageOptions {
        CollageOptions {
            background: Rgba::BLACK,
            margin,
            ..CollageOptions::default()
        }
    }

    #[test]
    fn stats_are_means_over_all_images() {
        let stats = AggregateStats::from_dimensions(&[(40, 20), (20, 40), (10, 10)]).unwrap();
        assert_eq!(stats.count, 3);
        assert!((stats.mean_aspect - (2.0 + 0.5 + 1.0) / 3.0).abs() < 1e-12);
        assert_eq!(stats.mean_area, (800 + 800 + 100) / 3);
    }

    #[test]
    fn stats_reject_empty_and_degenerate() {
        assert!(matches!(AggregateStats::from_dimensions(&[]), Err(Error::EmptyInput)));
        assert!(AggregateStats::from_dimensions(&[(0, 10)]).is_err());
    }

    #[test]
    fn grid_counts_cover_every_image() {
        for n in 1..=30usize {
            let dims = vec![(10u32, 10u32); n];
            let stats = AggregateStats::from_dimensions(&dims).unwrap();
            let layout = GridLayout::compute(&stats, 1.0).unwrap();
            assert_eq!(layout.columns, (n as f64).sqrt().ceil() as u32);
            assert!((layout.columns * layout.rows) as usize >= n, "n={n}");
        }
    }

    #[test]
    fn cell_size_from_mean_area_and_aspect() {
        let stats = AggregateStats::from_dimensions(&[(40, 20), (40, 20)]).unwrap();
        let layout = GridLayout::compute(&stats, 1.5).unwrap();
        assert_eq!((layout.cell_width, layout.cell_height), (60, 30));
        assert_eq!((layout.columns, layout.rows), (2, 1));
        assert_eq!(layout.canvas_size(), (120, 30));
    }

    #[test]
    fn rejects_bad_margin_and_empty_list() {
        let imgs = vec![solid(4, 4, Rgba::WHITE)];
        for m in [0.0, -1.0, f64::NAN] {
            let err = compose_collage(&imgs, &options(m)).unwrap_err();
            assert_eq!(err.kind(), crate::error::ErrorKind::Input);
        }
        let none: Vec<Canvas> = Vec::new();
        assert!(matches!(compose_collage(&none, &options(1.2)), Err(Error::EmptyInput)));
    }

    #[test]
    fn four_equal_images_make_a_symmetric_two_by_two_grid() {
        let imgs: Vec<Canvas> = (0..4).map(|i| solid(40, 40, Rgba::opaque(50 * i, 10, 10))).collect();
        let collage = compose_collage(&imgs, &options(1.5)).unwrap();

        assert_eq!((collage.layout.columns, collage.layout.rows), (2, 2));
        assert_eq!(collage.canvas.dimensions(), (120, 120));
        for p in &collage.placements {
            assert_eq!(p.resized_size, (40, 40));
            let (ox, oy) = collage.layout.cell_origin(p.index);
            let left = p.rect.x0 - ox;
            let right = ox + 60 - (p.rect.x0 + 40);
            let top = p.rect.y0 - oy;
            let bottom = oy + 60 - (p.rect.y0 + 40);
            assert!((left - right).abs() <= 1 && (top - bottom).abs() <= 1);
        }
        assert_eq!(collage.placements[3].rect, Rect::new(70, 70, 109, 109));
    }

    #[test]
    fn placement_fills_rows_left_to_right_and_keeps_gutter() {
        let colors = [Rgba::opaque(255, 0, 0), Rgba::opaque(0, 255, 0), Rgba::opaque(0, 0, 255)];
        let imgs: Vec<Canvas> = colors.iter().map(|&c| solid(40, 40, c)).collect();
        let collage = compose_collage(&imgs, &options(1.5)).unwrap();
        let canvas = &collage.canvas;

        assert_eq!(canvas.dimensions(), (120, 120));
        assert_eq!(canvas.get_pixel(20, 20), colors[0]);
        assert_eq!(canvas.get_pixel(80, 20), colors[1]);
        assert_eq!(canvas.get_pixel(20, 80), colors[2]);
        // empty fourth cell, gutter column and margins keep the background
        assert_eq!(canvas.get_pixel(80, 80), Rgba::BLACK);
        assert_eq!(canvas.get_pixel(49, 20), Rgba::BLACK);
        assert_eq!(canvas.get_pixel(48, 20), colors[0]);
        assert_eq!(canvas.get_pixel(5, 5), Rgba::BLACK);
    }

    #[test]
    fn wide_images_fit_width_and_tall_images_fit_height() {
        let imgs = vec![solid(40, 20, Rgba::WHITE), solid(20, 40, Rgba::WHITE)];
        let collage = compose_collage(&imgs, &options(2.0)).unwrap();
        assert_eq!((collage.layout.cell_width, collage.layout.cell_height), (63, 50));
        assert_eq!(collage.placements[0].resized_size, (31, 15));
        assert_eq!(collage.placements[1].resized_size, (12, 25));

        // horizontal slack 32 is even and trims one column; vertical slack 35
        // is odd, so the extra pixel lands below the image
        let wide = collage.placements[0].rect;
        assert_eq!(wide, Rect::new(16, 17, 46, 32));
        assert_eq!((wide.width(), wide.height()), (30, 15));
        let tall = collage.placements[1].rect;
        assert_eq!(tall, Rect::new(88, 12, 100, 37));
        assert_eq!((tall.width(), tall.height()), (12, 25));
    }

    #[test]
    fn odd_slack_truncates_leading_space() {
        let layout = GridLayout {
            columns: 2,
            rows: 1,
            cell_width: 11,
            cell_height: 9,
            margin: 1.0,
        };
        // slack 11-4=7 and 9-6=3: leading 3 and 1, trailing 4 and 2 incl. gutter
        assert_eq!(layout.placement(0, 4, 6), Rect::new(3, 1, 7, 7));
        assert_eq!(layout.placement(1, 4, 6), Rect::new(14, 1, 18, 7));
        let r = layout.placement(1, 4, 6);
        assert_eq!((r.width(), r.height()), (4, 6));
        assert_eq!(layout.cell_origin(1).0 + 11 - r.x1, 4);
    }

    #[test]
    fn margin_that_collapses_cells_is_rejected() {
        let imgs = vec![solid(1, 1, Rgba::WHITE), solid(1, 1, Rgba::WHITE)];
        match compose_collage(&imgs, &options(0.5)) {
            Err(Error::InvalidArgument { arg, value }) => {
                assert_eq!(arg, "margin");
                assert_eq!(value, "0.5");
            }
            other => panic!("expected margin error, got {other:?}"),
        }
    }

    #[test]
    fn parallel_matches_sequential() {
        let imgs: Vec<Canvas> = (0..7u8)
            .map(|i| solid(20 + i as u32 * 3, 30 - i as u32 * 2, Rgba::opaque(i * 30, 255 - i * 30, 7)))
            .collect();
        let seq = compose_collage(&imgs, &options(1.3)).unwrap();
        let par = compose_collage(
            &imgs,
            &CollageOptions {
                parallel: true,
                ..options(1.3)
            },
        )
        .unwrap();
        assert_eq!(seq.canvas, par.canvas);
        assert_eq!(seq.placements, par.placements);
    }
}
