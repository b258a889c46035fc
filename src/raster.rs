//! RGBA pixel buffers and their conversion to and from image files.
//!
//! Buffers are `Array2<Rgba>` indexed `(row, col)`, origin top-left. Every read
//! and write outside the buffer is a no-op: reads return `None`, writes are
//! dropped. Raster edges and the projection pole rely on this.

use std::path::Path;

use image::RgbaImage;
use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::error::MapError;

/// A single 8-bit RGBA pixel.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rgba(pub [u8; 4]);

impl Rgba {
    pub const TRANSPARENT: Rgba = Rgba([0, 0, 0, 0]);
    pub const BLACK: Rgba = Rgba([0, 0, 0, 255]);
    pub const WHITE: Rgba = Rgba([255, 255, 255, 255]);
    pub const RED: Rgba = Rgba([255, 0, 0, 255]);

    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Rgba([r, g, b, a])
    }
}

pub type PixelBuffer = Array2<Rgba>;

/// A buffer of the given size filled with transparent pixels.
pub fn blank(width: usize, height: usize) -> PixelBuffer {
    Array2::from_elem((height, width), Rgba::TRANSPARENT)
}

/// Bounds-checked read. Returns `None` outside `[0, width) × [0, height)`.
pub fn get_pixel(buf: &PixelBuffer, x: i64, y: i64) -> Option<Rgba> {
    if x < 0 || y < 0 {
        return None;
    }
    buf.get((y as usize, x as usize)).copied()
}

/// Bounds-checked write. Writes outside the buffer are dropped.
pub fn put_pixel(buf: &mut PixelBuffer, x: i64, y: i64, color: Rgba) {
    if x < 0 || y < 0 {
        return;
    }
    if let Some(px) = buf.get_mut((y as usize, x as usize)) {
        *px = color;
    }
}

/// Copy `src` into `dst` with its top-left corner at `(dx, dy)`, clipping at the edges.
pub fn blit(dst: &mut PixelBuffer, src: &PixelBuffer, dx: i64, dy: i64) {
    for ((row, col), &px) in src.indexed_iter() {
        put_pixel(dst, col as i64 + dx, row as i64 + dy, px);
    }
}

pub fn from_image(img: &RgbaImage) -> PixelBuffer {
    let (width, height) = img.dimensions();
    Array2::from_shape_fn((height as usize, width as usize), |(row, col)| {
        Rgba(img.get_pixel(col as u32, row as u32).0)
    })
}

pub fn to_image(buf: &PixelBuffer) -> Result<RgbaImage, MapError> {
    let (rows, cols) = buf.dim();
    let raw: Vec<u8> = buf.iter().flat_map(|px| px.0).collect();
    RgbaImage::from_raw(cols as u32, rows as u32, raw)
        .ok_or_else(|| MapError::Shape(format!("cannot build {cols}x{rows} image")))
}

/// Decode an image file into a texture.
pub fn load_texture(path: &Path) -> Result<PixelBuffer, MapError> {
    let img = image::open(path)?.to_rgba8();
    tracing::debug!(
        path = %path.display(),
        width = img.width(),
        height = img.height(),
        "loaded texture"
    );
    Ok(from_image(&img))
}

/// Encode a buffer as PNG.
pub fn save_png(buf: &PixelBuffer, path: &Path) -> Result<(), MapError> {
    to_image(buf)?.save_with_format(path, image::ImageFormat::Png)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_is_transparent() {
        let buf = blank(3, 2);
        assert_eq!(buf.dim(), (2, 3));
        assert!(buf.iter().all(|&p| p == Rgba::TRANSPARENT));
    }

    #[test]
    fn test_out_of_bounds_read() {
        let buf = blank(4, 4);
        assert_eq!(get_pixel(&buf, -1, 0), None);
        assert_eq!(get_pixel(&buf, 0, -1), None);
        assert_eq!(get_pixel(&buf, 4, 0), None);
        assert_eq!(get_pixel(&buf, 0, 4), None);
        assert_eq!(get_pixel(&buf, 3, 3), Some(Rgba::TRANSPARENT));
    }

    #[test]
    fn test_out_of_bounds_write_dropped() {
        let mut buf = blank(2, 2);
        put_pixel(&mut buf, 2, 0, Rgba::RED);
        put_pixel(&mut buf, -1, 1, Rgba::RED);
        put_pixel(&mut buf, 0, 2, Rgba::RED);
        assert!(buf.iter().all(|&p| p == Rgba::TRANSPARENT));

        put_pixel(&mut buf, 1, 0, Rgba::RED);
        assert_eq!(buf[(0, 1)], Rgba::RED);
    }

    #[test]
    fn test_blit_clips_with_offset() {
        let mut dst = blank(3, 3);
        let src = Array2::from_elem((3, 3), Rgba::WHITE);
        blit(&mut dst, &src, 1, -2);
        // Only the bottom row of src lands, on dst row 0, columns 1..3.
        assert_eq!(dst[(0, 0)], Rgba::TRANSPARENT);
        assert_eq!(dst[(0, 1)], Rgba::WHITE);
        assert_eq!(dst[(0, 2)], Rgba::WHITE);
        assert_eq!(dst[(1, 1)], Rgba::TRANSPARENT);
    }

    #[test]
    fn test_image_conversion_preserves_layout() {
        let mut buf = blank(2, 3);
        buf[(2, 1)] = Rgba::RED;
        let img = to_image(&buf).unwrap();
        assert_eq!(img.dimensions(), (2, 3));
        assert_eq!(img.get_pixel(1, 2).0, Rgba::RED.0);

        let back = from_image(&img);
        assert_eq!(back, buf);
    }
}
