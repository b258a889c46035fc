pub mod approx;
pub mod radial;

use crate::error::ProjError;
use crate::geo::{GeoPoint, ScreenPoint, Viewport};

/// Trait for map projections supporting forward and inverse transforms.
pub trait Projection: Send + Sync {
    /// Forward: geographic (radians) -> screen pixels
    fn forward(&self, geo: GeoPoint) -> Result<ScreenPoint, ProjError>;

    /// Inverse: screen pixels -> geographic (radians)
    fn inverse(&self, screen: ScreenPoint) -> Result<GeoPoint, ProjError>;

    /// The screen the projection maps onto.
    fn viewport(&self) -> Viewport;

    /// Project a whole polyline.
    fn forward_line(&self, line: &[GeoPoint]) -> Result<Vec<ScreenPoint>, ProjError> {
        line.iter().map(|&p| self.forward(p)).collect()
    }

    /// Batch inverse transform.
    fn inverse_batch(&self, points: &[ScreenPoint]) -> Vec<Result<GeoPoint, ProjError>> {
        points.iter().map(|&p| self.inverse(p)).collect()
    }
}
