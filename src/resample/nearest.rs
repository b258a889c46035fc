//! Nearest-neighbor resampling kernel.

use ndarray::ArrayView2;

use crate::raster::Rgba;

/// Sample a texture using nearest-neighbor lookup.
///
/// Integer coordinates address pixel indices, so `(x, y)` picks the pixel at
/// `(round(x), round(y))`.
///
/// Returns `None` if the rounded coordinate is outside the texture.
pub fn sample(src: &ArrayView2<'_, Rgba>, x: f64, y: f64) -> Option<Rgba> {
    let col = x.round() as isize;
    let row = y.round() as isize;

    let (rows, cols) = (src.nrows() as isize, src.ncols() as isize);
    if col < 0 || col >= cols || row < 0 || row >= rows {
        return None;
    }

    Some(src[(row as usize, col as usize)])
}
