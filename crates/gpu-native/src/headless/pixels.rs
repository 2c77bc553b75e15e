//! Conversion between native pixel formats and the RGBA8 buffers the
//! headless backend stores, plus file IO through the `image` crate.

use image::{DynamicImage, GenericImageView, ImageBuffer, Rgba, RgbaImage};

use crate::coords::{Color, Rect};
use crate::error::{NativeError, Result};
use crate::types::{FileFormat, ImageFormat};

/// Decodes one pixel of `format` starting at `px`.
fn decode_pixel(format: ImageFormat, px: &[u8]) -> Rgba<u8> {
    match format {
        ImageFormat::Luminance => Rgba([px[0], px[0], px[0], 255]),
        ImageFormat::Alpha => Rgba([0, 0, 0, px[0]]),
        ImageFormat::LuminanceAlpha => Rgba([px[0], px[0], px[0], px[1]]),
        ImageFormat::Rg => Rgba([px[0], px[1], 0, 255]),
        ImageFormat::Rgb => Rgba([px[0], px[1], px[2], 255]),
        ImageFormat::Bgr => Rgba([px[2], px[1], px[0], 255]),
        ImageFormat::Rgba => Rgba([px[0], px[1], px[2], px[3]]),
        ImageFormat::Bgra => Rgba([px[2], px[1], px[0], px[3]]),
        ImageFormat::Abgr => Rgba([px[3], px[2], px[1], px[0]]),
        // rejected by `write_bytes` before decoding
        ImageFormat::YCbCr422 | ImageFormat::YCbCr420P => Rgba([0, 0, 0, 0]),
    }
}

/// Copies raw `bytes` laid out as `format` rows into `dst`, restricted to
/// `rect` (whole image when `None`). Rows shorter than `bytes_per_row` or a
/// buffer too small for the region are rejected.
pub fn write_bytes(
    dst: &mut RgbaImage,
    format: ImageFormat,
    rect: Option<Rect>,
    bytes: &[u8],
    bytes_per_row: i32,
) -> Result<()> {
    if matches!(format, ImageFormat::YCbCr422 | ImageFormat::YCbCr420P) {
        return Err(NativeError::Unsupported(format!("byte upload for {format:?}")));
    }

    let bounds = Rect::new(0.0, 0.0, dst.width() as f32, dst.height() as f32);
    let region = match rect {
        Some(r) => r.normalized().intersect(bounds),
        None => Some(bounds),
    };
    let Some(region) = region else {
        return Ok(());
    };

    let x0 = region.x as u32;
    let y0 = region.y as u32;
    let w = region.w as u32;
    let h = region.h as u32;
    let bpp = format.bytes_per_pixel() as usize;
    let pitch = usize::try_from(bytes_per_row).unwrap_or(0);

    if pitch < w as usize * bpp {
        return Err(NativeError::failed("GPU_UpdateImageBytes", "bytes_per_row is smaller than one row"));
    }
    if h > 0 && bytes.len() < pitch * (h as usize - 1) + w as usize * bpp {
        return Err(NativeError::failed("GPU_UpdateImageBytes", "byte buffer is smaller than the region"));
    }

    for row in 0..h {
        let line = &bytes[row as usize * pitch..];
        for col in 0..w {
            let at = col as usize * bpp;
            dst.put_pixel(x0 + col, y0 + row, decode_pixel(format, &line[at..at + bpp]));
        }
    }
    Ok(())
}

/// Loads an image file; returns the RGBA buffer and the native format the
/// file maps to.
pub fn load(path: &str) -> Result<(RgbaImage, ImageFormat)> {
    let img = image::open(path)?;
    let format = match img.color() {
        image::ColorType::L8 | image::ColorType::L16 => ImageFormat::Luminance,
        image::ColorType::La8 | image::ColorType::La16 => ImageFormat::LuminanceAlpha,
        c if c.has_alpha() => ImageFormat::Rgba,
        _ => ImageFormat::Rgb,
    };
    Ok((img.to_rgba8(), format))
}

/// Writes `pixels` to `filename`, reducing channels to what `format` holds.
pub fn save(pixels: &RgbaImage, format: ImageFormat, filename: &str, file_format: FileFormat) -> Result<()> {
    let container = match file_format.resolve(filename) {
        Some(FileFormat::Png) => image::ImageFormat::Png,
        Some(FileFormat::Bmp) => image::ImageFormat::Bmp,
        Some(FileFormat::Tga) => image::ImageFormat::Tga,
        Some(FileFormat::Auto) | None => {
            return Err(NativeError::Unsupported(format!("cannot pick a file format for '{filename}'")));
        }
    };

    let dynamic = DynamicImage::ImageRgba8(pixels.clone());
    let reduced = match format {
        ImageFormat::Luminance => DynamicImage::ImageLuma8(dynamic.to_luma8()),
        ImageFormat::LuminanceAlpha => DynamicImage::ImageLumaA8(dynamic.to_luma_alpha8()),
        ImageFormat::Rgb | ImageFormat::Bgr => DynamicImage::ImageRgb8(dynamic.to_rgb8()),
        _ => dynamic,
    };
    reduced.save_with_format(filename, container)?;
    Ok(())
}

pub fn blank(w: u16, h: u16) -> RgbaImage {
    ImageBuffer::from_pixel(u32::from(w), u32::from(h), Rgba([0, 0, 0, 0]))
}

/// Fills the intersection of `area` and the buffer with `color`.
pub fn fill(dst: &mut RgbaImage, area: Option<Rect>, color: Color) {
    let bounds = Rect::new(0.0, 0.0, dst.width() as f32, dst.height() as f32);
    let Some(region) = area.map_or(Some(bounds), |a| a.normalized().intersect(bounds)) else {
        return;
    };
    let px = Rgba(color.to_array());
    for y in region.y as u32..(region.y + region.h) as u32 {
        for x in region.x as u32..(region.x + region.w) as u32 {
            dst.put_pixel(x, y, px);
        }
    }
}

pub fn read(src: &RgbaImage, x: i16, y: i16) -> Color {
    if x < 0 || y < 0 || !src.in_bounds(x as u32, y as u32) {
        return Color::transparent();
    }
    let [r, g, b, a] = src.get_pixel(x as u32, y as u32).0;
    Color::rgba(r, g, b, a)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rgb_rows_with_padding() {
        let mut img = blank(2, 2);
        // two RGB pixels per row plus two bytes of padding
        let bytes = [
            255, 0, 0, 0, 255, 0, 9, 9, //
            0, 0, 255, 1, 2, 3, 9, 9,
        ];
        write_bytes(&mut img, ImageFormat::Rgb, None, &bytes, 8).unwrap();
        assert_eq!(read(&img, 1, 0), Color::rgba(0, 255, 0, 255));
        assert_eq!(read(&img, 1, 1), Color::rgba(1, 2, 3, 255));
    }

    #[test]
    fn bgra_is_swizzled() {
        let mut img = blank(1, 1);
        write_bytes(&mut img, ImageFormat::Bgra, None, &[10, 20, 30, 40], 4).unwrap();
        assert_eq!(read(&img, 0, 0), Color::rgba(30, 20, 10, 40));
    }

    #[test]
    fn short_buffer_is_rejected() {
        let mut img = blank(4, 4);
        assert!(write_bytes(&mut img, ImageFormat::Rgba, None, &[0; 20], 16).is_err());
    }

    #[test]
    fn region_upload_only_touches_region() {
        let mut img = blank(4, 4);
        let rect = Rect::new(2.0, 2.0, 1.0, 1.0);
        write_bytes(&mut img, ImageFormat::Luminance, Some(rect), &[200], 1).unwrap();
        assert_eq!(read(&img, 2, 2), Color::rgba(200, 200, 200, 255));
        assert_eq!(read(&img, 1, 1), Color::transparent());
    }

    #[test]
    fn fill_respects_area_and_bounds() {
        let mut img = blank(3, 3);
        fill(&mut img, Some(Rect::new(2.0, 2.0, 5.0, 5.0)), Color::white());
        assert_eq!(read(&img, 2, 2), Color::white());
        assert_eq!(read(&img, 1, 1), Color::transparent());
        assert_eq!(read(&img, -1, 0), Color::transparent());
    }

    #[test]
    fn save_then_load_png() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("dot.png");
        let path = path.to_str().unwrap();

        let mut img = blank(2, 1);
        fill(&mut img, Some(Rect::new(1.0, 0.0, 1.0, 1.0)), Color::rgba(1, 2, 3, 4));
        save(&img, ImageFormat::Rgba, path, FileFormat::Auto).unwrap();

        let (loaded, format) = load(path).unwrap();
        assert_eq!(format, ImageFormat::Rgba);
        assert_eq!(loaded.dimensions(), (2, 1));
        assert_eq!(read(&loaded, 1, 0), Color::rgba(1, 2, 3, 4));
    }

    #[test]
    fn unknown_extension_cannot_save() {
        let img = blank(1, 1);
        assert!(save(&img, ImageFormat::Rgba, "shot.xyz", FileFormat::Auto).is_err());
    }
}
