use std::path::Path;

use image::{ImageBuffer, Rgba as ImgRgba, RgbaImage};
use imgcollage::{Canvas, Error, ErrorKind, OutputFormat, PixelSource, Rgba, decode_image, save_canvas};

fn gradient(w: u32, h: u32) -> Canvas {
    let mut c = Canvas::new(w, h);
    for y in 0..h {
        for x in 0..w {
            let r = (x * 255 / (w - 1)) as u8;
            let g = (y * 255 / (h - 1)) as u8;
            c.put_pixel(x, y, Rgba::opaque(r, g, 128));
        }
    }
    c
}

fn decoded_canvas(path: &Path) -> Canvas {
    Canvas::from(decode_image(path).unwrap().to_rgba8())
}

#[test]
fn png_round_trip_is_lossless() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("g.png");
    let mut src = gradient(33, 17);
    src.put_pixel(3, 4, Rgba([1, 2, 3, 77]));

    assert_eq!(save_canvas(&src, &path).unwrap(), OutputFormat::Png);
    assert_eq!(decoded_canvas(&path), src);
}

#[test]
fn jpeg_round_trip_stays_within_tolerance() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("g.jpg");
    let src = gradient(64, 48);

    assert_eq!(save_canvas(&src, &path).unwrap(), OutputFormat::Jpeg);
    let back = decoded_canvas(&path);
    assert_eq!(back.dimensions(), src.dimensions());

    let mut total = 0u64;
    let mut worst = 0i32;
    for y in 0..48 {
        for x in 0..64 {
            let (a, b) = (src.get_pixel(x, y), back.get_pixel(x, y));
            for c in 0..3 {
                let d = (a.0[c] as i32 - b.0[c] as i32).abs();
                total += d as u64;
                worst = worst.max(d);
            }
        }
    }
    let mean = total as f64 / (64.0 * 48.0 * 3.0);
    assert!(mean < 4.0, "mean error {mean}");
    assert!(worst < 40, "max error {worst}");
}

#[test]
fn unknown_extension_fails_without_writing() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("g.gif");
    let err = save_canvas(&gradient(4, 4), &path).unwrap_err();
    assert!(matches!(err, Error::UnsupportedFormat { .. }));
    assert_eq!(err.kind(), ErrorKind::Io);
    assert!(!path.exists());
}

#[test]
fn oversized_jpeg_fails_before_creating_the_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("x.jpg");
    let err = save_canvas(&Canvas::new(65536, 1), &path).unwrap_err();
    assert!(matches!(err, Error::Encode(_)), "{err:?}");
    assert_eq!(err.kind(), ErrorKind::Io);
    assert!(!path.exists());

    let tall = dir.path().join("tall.jpeg");
    assert!(matches!(save_canvas(&Canvas::new(1, 65536), &tall), Err(Error::Encode(_))));
    assert!(!tall.exists());
}

#[test]
fn sixteen_bit_sources_are_normalized() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("deep.png");
    let img: ImageBuffer<ImgRgba<u16>, Vec<u16>> =
        ImageBuffer::from_pixel(3, 2, ImgRgba([0xFFFF, 0x8080, 0, 0xFFFF]));
    img.save(&path).unwrap();

    let decoded = decode_image(&path).unwrap();
    assert_eq!(decoded.pixel(2, 1), Rgba([255, 128, 0, 255]));
}

#[test]
fn decode_reports_missing_and_corrupt_files() {
    let dir = tempfile::tempdir().unwrap();
    let missing = decode_image(&dir.path().join("nope.png")).unwrap_err();
    assert!(matches!(missing, Error::Io(_)));

    let corrupt = dir.path().join("bad.png");
    std::fs::write(&corrupt, b"definitely not an image").unwrap();
    let err = decode_image(&corrupt).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Io);

    let ok = dir.path().join("ok.png");
    RgbaImage::from_pixel(2, 2, ImgRgba([9, 8, 7, 255])).save(&ok).unwrap();
    assert_eq!(decode_image(&ok).unwrap().pixel(1, 1), Rgba::opaque(9, 8, 7));
}
