//! Linear approximation for scanline deprojection.
//!
//! Instead of deprojecting every pixel, computes exact geographic coordinates at
//! a few points per scanline and linearly interpolates between them, recursively
//! subdividing when the interpolation error exceeds a tolerance (in radians).

use serde::{Deserialize, Serialize};

use crate::geo::{GeoPoint, ScreenPoint};
use crate::proj::Projection;

const MAX_DEPTH: usize = 20;

/// Scanline deprojection approximator using recursive subdivision.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct LinearApprox {
    /// Maximum allowed interpolation error in radians. Default: 1e-4 (~0.006°).
    pub tolerance: f64,
}

impl Default for LinearApprox {
    fn default() -> Self {
        Self { tolerance: 1e-4 }
    }
}

impl LinearApprox {
    pub fn new(tolerance: f64) -> Self {
        Self { tolerance }
    }

    /// Deproject a full destination row.
    ///
    /// `out[i]` receives the geographic coordinate of pixel `(i, row)`, or `None`
    /// where the inverse is undefined. Segments touching an undefined point are
    /// always deprojected exactly.
    pub fn deproject_scanline<P: Projection + ?Sized>(
        &self,
        projection: &P,
        row: usize,
        out: &mut [Option<GeoPoint>],
    ) {
        let width = out.len();
        if width == 0 {
            return;
        }

        let y = row as f64;
        let left = exact(projection, 0, y);
        let right = exact(projection, width - 1, y);

        self.subdivide(projection, y, 0, width - 1, left, right, out, 0);
    }

    /// Recursively subdivide and interpolate a scanline segment.
    ///
    /// `left`/`right` are the exact values at `left_idx`/`right_idx`.
    #[allow(clippy::too_many_arguments)]
    fn subdivide<P: Projection + ?Sized>(
        &self,
        projection: &P,
        y: f64,
        left_idx: usize,
        right_idx: usize,
        left: Option<GeoPoint>,
        right: Option<GeoPoint>,
        out: &mut [Option<GeoPoint>],
        depth: usize,
    ) {
        // Base case: adjacent or same pixel
        if right_idx <= left_idx + 1 {
            out[left_idx] = left;
            if right_idx > left_idx {
                out[right_idx] = right;
            }
            return;
        }

        let mid_idx = (left_idx + right_idx) / 2;
        let mid = exact(projection, mid_idx, y);

        let t = (mid_idx - left_idx) as f64 / (right_idx - left_idx) as f64;
        let within = match (left, mid, right) {
            (Some(l), Some(m), Some(r)) => {
                let interp = lerp(l, r, t);
                let err_lat = (m.latitude - interp.latitude).abs();
                let err_lon = (m.longitude - interp.longitude).abs();
                err_lat.max(err_lon) <= self.tolerance
            }
            _ => false,
        };

        if !within && depth < MAX_DEPTH {
            self.subdivide(projection, y, left_idx, mid_idx, left, mid, out, depth + 1);
            self.subdivide(projection, y, mid_idx, right_idx, mid, right, out, depth + 1);
            return;
        }

        match (left, right) {
            (Some(l), Some(r)) => {
                for (offset, slot) in out[left_idx..=right_idx].iter_mut().enumerate() {
                    let t = offset as f64 / (right_idx - left_idx) as f64;
                    *slot = Some(lerp(l, r, t));
                }
                out[left_idx] = left;
                out[right_idx] = right;
                out[mid_idx] = mid;
            }
            _ => {
                for (offset, slot) in out[left_idx..=right_idx].iter_mut().enumerate() {
                    *slot = exact(projection, left_idx + offset, y);
                }
            }
        }
    }
}

fn exact<P: Projection + ?Sized>(projection: &P, col: usize, y: f64) -> Option<GeoPoint> {
    projection.inverse(ScreenPoint::new(col as f64, y)).ok()
}

fn lerp(a: GeoPoint, b: GeoPoint, t: f64) -> GeoPoint {
    GeoPoint::new(
        a.latitude + t * (b.latitude - a.latitude),
        a.longitude + t * (b.longitude - a.longitude),
    )
}
