//! Bilinear interpolation resampling kernel.

use ndarray::ArrayView2;
use num_traits::NumCast;

use crate::raster::Rgba;

/// Sample a texture using bilinear interpolation.
///
/// Integer coordinates sit on pixel indices, matching the nearest kernel.
/// Each channel is interpolated independently over the 2×2 neighborhood.
/// Returns `None` if any of the four neighbors is out of bounds.
pub fn sample(src: &ArrayView2<'_, Rgba>, x: f64, y: f64) -> Option<Rgba> {
    let x0 = x.floor() as isize;
    let y0 = y.floor() as isize;
    let x1 = x0 + 1;
    let y1 = y0 + 1;

    let (rows, cols) = (src.nrows() as isize, src.ncols() as isize);
    if x0 < 0 || x1 >= cols || y0 < 0 || y1 >= rows {
        return None;
    }

    let (x0u, y0u, x1u, y1u) = (x0 as usize, y0 as usize, x1 as usize, y1 as usize);
    let v00 = src[(y0u, x0u)].0;
    let v10 = src[(y0u, x1u)].0;
    let v01 = src[(y1u, x0u)].0;
    let v11 = src[(y1u, x1u)].0;

    let dx = x - x0 as f64;
    let dy = y - y0 as f64;

    let mut out = [0u8; 4];
    for (i, channel) in out.iter_mut().enumerate() {
        let f00: f64 = NumCast::from(v00[i])?;
        let f10: f64 = NumCast::from(v10[i])?;
        let f01: f64 = NumCast::from(v01[i])?;
        let f11: f64 = NumCast::from(v11[i])?;

        let value = f00 * (1.0 - dx) * (1.0 - dy)
            + f10 * dx * (1.0 - dy)
            + f01 * (1.0 - dx) * dy
            + f11 * dx * dy;

        *channel = NumCast::from(value.round().clamp(0.0, 255.0))?;
    }

    Some(Rgba(out))
}
