//! Drawing surfaces the scene renderer paints onto.
//!
//! [`PixelSurface`] rasterizes into a [`PixelBuffer`]; [`DrawRecorder`] keeps the
//! draw calls themselves, which is what the CLI dumps as JSON and what the
//! scene tests inspect.

use serde::Serialize;

use crate::geo::{ScreenPoint, Viewport};
use crate::raster::{self, PixelBuffer, Rgba};

/// The drawing operations the renderer needs from its host.
pub trait Surface {
    fn size(&self) -> Viewport;

    /// Reset every pixel to transparent and forget drawn text.
    fn clear(&mut self);

    fn draw_polyline(&mut self, points: &[ScreenPoint], color: Rgba);

    fn draw_dot(&mut self, center: ScreenPoint, radius: f64, color: Rgba);

    fn draw_text(&mut self, at: ScreenPoint, text: &str, font: &str, color: Rgba);

    /// Snapshot of the whole surface.
    fn get_pixels(&self) -> PixelBuffer;

    /// Copy `pixels` onto the surface with its top-left corner at `offset`.
    fn put_pixels(&mut self, pixels: &PixelBuffer, offset: (i64, i64));
}

/// A text label placed on a [`PixelSurface`].
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct TextRun {
    pub at: ScreenPoint,
    pub text: String,
    pub font: String,
    pub color: Rgba,
}

/// CPU rasterizer over an RGBA buffer.
///
/// Lines are 1px Bresenham, dots are filled discs, nothing is anti-aliased.
/// Text is kept as a list of [`TextRun`]s instead of being rasterized.
pub struct PixelSurface {
    pixels: PixelBuffer,
    labels: Vec<TextRun>,
}

impl PixelSurface {
    pub fn new(viewport: Viewport) -> Self {
        Self {
            pixels: raster::blank(viewport.width, viewport.height),
            labels: Vec::new(),
        }
    }

    pub fn pixels(&self) -> &PixelBuffer {
        &self.pixels
    }

    pub fn labels(&self) -> &[TextRun] {
        &self.labels
    }

    pub fn into_pixels(self) -> PixelBuffer {
        self.pixels
    }

    fn line(&mut self, from: (i64, i64), to: (i64, i64), color: Rgba) {
        let (mut x0, mut y0) = from;
        let (x1, y1) = to;
        let dx = (x1 - x0).abs();
        let dy = -(y1 - y0).abs();
        let sx = if x0 < x1 { 1 } else { -1 };
        let sy = if y0 < y1 { 1 } else { -1 };
        let mut err = dx + dy;

        loop {
            raster::put_pixel(&mut self.pixels, x0, y0, color);
            if x0 == x1 && y0 == y1 {
                break;
            }
            let e2 = 2 * err;
            if e2 >= dy {
                err += dy;
                x0 += sx;
            }
            if e2 <= dx {
                err += dx;
                y0 += sy;
            }
        }
    }
}

fn to_pixel(p: ScreenPoint) -> Option<(i64, i64)> {
    if p.x.is_finite() && p.y.is_finite() {
        Some((p.x.round() as i64, p.y.round() as i64))
    } else {
        None
    }
}

impl Surface for PixelSurface {
    fn size(&self) -> Viewport {
        let (rows, cols) = self.pixels.dim();
        Viewport::new(cols, rows)
    }

    fn clear(&mut self) {
        self.pixels.fill(Rgba::TRANSPARENT);
        self.labels.clear();
    }

    fn draw_polyline(&mut self, points: &[ScreenPoint], color: Rgba) {
        match points {
            [] => {}
            [single] => {
                if let Some((x, y)) = to_pixel(*single) {
                    raster::put_pixel(&mut self.pixels, x, y, color);
                }
            }
            _ => {
                for pair in points.windows(2) {
                    if let (Some(a), Some(b)) = (to_pixel(pair[0]), to_pixel(pair[1])) {
                        self.line(a, b, color);
                    }
                }
            }
        }
    }

    fn draw_dot(&mut self, center: ScreenPoint, radius: f64, color: Rgba) {
        let Some((cx, cy)) = to_pixel(center) else {
            return;
        };
        let r = radius.max(0.0).round() as i64;
        for dy in -r..=r {
            for dx in -r..=r {
                if dx * dx + dy * dy <= r * r {
                    raster::put_pixel(&mut self.pixels, cx + dx, cy + dy, color);
                }
            }
        }
    }

    fn draw_text(&mut self, at: ScreenPoint, text: &str, font: &str, color: Rgba) {
        self.labels.push(TextRun {
            at,
            text: text.to_string(),
            font: font.to_string(),
            color,
        });
    }

    fn get_pixels(&self) -> PixelBuffer {
        self.pixels.clone()
    }

    fn put_pixels(&mut self, pixels: &PixelBuffer, offset: (i64, i64)) {
        raster::blit(&mut self.pixels, pixels, offset.0, offset.1);
    }
}

/// One recorded draw call.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum DrawCommand {
    Clear,
    Polyline {
        points: Vec<ScreenPoint>,
        color: Rgba,
    },
    Dot {
        center: ScreenPoint,
        radius: f64,
        color: Rgba,
    },
    Text {
        at: ScreenPoint,
        text: String,
        font: String,
        color: Rgba,
    },
    PutPixels {
        width: usize,
        height: usize,
        offset: (i64, i64),
    },
}

/// A surface that only records what was drawn.
#[derive(Debug)]
pub struct DrawRecorder {
    viewport: Viewport,
    pub commands: Vec<DrawCommand>,
}

impl DrawRecorder {
    pub fn new(viewport: Viewport) -> Self {
        Self {
            viewport,
            commands: Vec::new(),
        }
    }

    pub fn polylines(&self) -> impl Iterator<Item = (&[ScreenPoint], Rgba)> + '_ {
        self.commands.iter().filter_map(|c| match c {
            DrawCommand::Polyline { points, color } => Some((points.as_slice(), *color)),
            _ => None,
        })
    }

    pub fn texts(&self) -> impl Iterator<Item = &str> + '_ {
        self.commands.iter().filter_map(|c| match c {
            DrawCommand::Text { text, .. } => Some(text.as_str()),
            _ => None,
        })
    }
}

impl Surface for DrawRecorder {
    fn size(&self) -> Viewport {
        self.viewport
    }

    fn clear(&mut self) {
        self.commands.push(DrawCommand::Clear);
    }

    fn draw_polyline(&mut self, points: &[ScreenPoint], color: Rgba) {
        self.commands.push(DrawCommand::Polyline {
            points: points.to_vec(),
            color,
        });
    }

    fn draw_dot(&mut self, center: ScreenPoint, radius: f64, color: Rgba) {
        self.commands.push(DrawCommand::Dot {
            center,
            radius,
            color,
        });
    }

    fn draw_text(&mut self, at: ScreenPoint, text: &str, font: &str, color: Rgba) {
        self.commands.push(DrawCommand::Text {
            at,
            text: text.to_string(),
            font: font.to_string(),
            color,
        });
    }

    fn get_pixels(&self) -> PixelBuffer {
        raster::blank(self.viewport.width, self.viewport.height)
    }

    fn put_pixels(&mut self, pixels: &PixelBuffer, offset: (i64, i64)) {
        let (height, width) = pixels.dim();
        self.commands.push(DrawCommand::PutPixels {
            width,
            height,
            offset,
        });
    }
}
