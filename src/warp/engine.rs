//! Inverse-mapping texture resampler.
//!
//! For each destination pixel, deprojects back to geographic coordinates and
//! samples the equirectangular source texture. Rows are processed in parallel.

use std::time::Instant;

use ndarray::{Array2, ArrayView2};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::error::MapError;
use crate::geo::{GeoPoint, ScreenPoint};
use crate::proj::approx::LinearApprox;
use crate::proj::Projection;
use crate::raster::{PixelBuffer, Rgba};
use crate::resample::ResamplingMethod;

/// Controls how the projected raster is built.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RasterOptions {
    pub method: ResamplingMethod,
    /// Written wherever the texture is not sampled.
    pub background: Rgba,
    pub min_longitude_deg: f64,
    pub max_longitude_deg: f64,
    pub max_latitude_deg: f64,
    /// Scanline approximation of the inverse; `None` deprojects every pixel.
    pub approx: Option<LinearApprox>,
}

impl Default for RasterOptions {
    fn default() -> Self {
        Self {
            method: ResamplingMethod::Nearest,
            background: Rgba::WHITE,
            min_longitude_deg: 0.0,
            max_longitude_deg: 60.0,
            max_latitude_deg: 70.0,
            approx: None,
        }
    }
}

/// Map a geographic position (degrees) to continuous texture pixel coordinates.
///
/// The texture covers longitude -180..180 left to right and latitude 90..-90
/// top to bottom.
pub fn texture_coords(lat_deg: f64, lon_deg: f64, width: usize, height: usize) -> (f64, f64) {
    let u = (lon_deg + 180.0) / 360.0;
    let v = (lat_deg + 90.0) / 180.0;
    let h = height as f64;
    (u * width as f64, h - v * h)
}

/// Build the projected raster for the projection's viewport.
///
/// # Arguments
/// * `texture` — equirectangular source texture (row-major RGBA)
/// * `projection` — the current projection; its viewport sets the output shape
/// * `options` — window, background and resampling settings
pub fn build_raster<P: Projection + ?Sized>(
    texture: &ArrayView2<'_, Rgba>,
    projection: &P,
    options: &RasterOptions,
) -> Result<PixelBuffer, MapError> {
    if texture.is_empty() {
        return Err(MapError::Shape("texture is empty".into()));
    }
    if options.min_longitude_deg > options.max_longitude_deg {
        return Err(MapError::Resampling(format!(
            "longitude window is inverted: {}..{}",
            options.min_longitude_deg, options.max_longitude_deg
        )));
    }

    let start = Instant::now();
    let viewport = projection.viewport();
    let (rows, cols) = viewport.shape();
    let mut data = vec![options.background; rows * cols];

    if cols > 0 {
        data.par_chunks_mut(cols)
            .enumerate()
            .for_each(|(row, line)| match options.approx {
                Some(approx) => {
                    let mut geo = vec![None; cols];
                    approx.deproject_scanline(projection, row, &mut geo);
                    for (px, g) in line.iter_mut().zip(geo) {
                        *px = shade(g, texture, options);
                    }
                }
                None => {
                    for (col, px) in line.iter_mut().enumerate() {
                        let screen = ScreenPoint::new(col as f64, row as f64);
                        *px = shade(projection.inverse(screen).ok(), texture, options);
                    }
                }
            });
    }

    let raster =
        Array2::from_shape_vec((rows, cols), data).map_err(|e| MapError::Shape(e.to_string()))?;

    tracing::debug!(
        width = cols,
        height = rows,
        method = ?options.method,
        approx = options.approx.is_some(),
        elapsed_ms = start.elapsed().as_millis() as u64,
        "built projected raster"
    );
    Ok(raster)
}

/// Color of one destination pixel given its deprojected position.
fn shade(geo: Option<GeoPoint>, texture: &ArrayView2<'_, Rgba>, options: &RasterOptions) -> Rgba {
    let Some(geo) = geo else {
        return options.background;
    };

    let (lat, lon) = geo.to_degrees();
    if lon < options.min_longitude_deg
        || lon > options.max_longitude_deg
        || lat > options.max_latitude_deg
    {
        return options.background;
    }

    let (x, y) = texture_coords(lat, lon, texture.ncols(), texture.nrows());
    options
        .method
        .sample(texture, x, y)
        .unwrap_or(options.background)
}
