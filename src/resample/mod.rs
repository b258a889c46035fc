//! Resampling kernels for the texture resampler.

pub mod bilinear;
pub mod nearest;

use ndarray::ArrayView2;
use serde::{Deserialize, Serialize};

use crate::raster::Rgba;

/// Available resampling methods.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResamplingMethod {
    #[default]
    Nearest,
    Bilinear,
}

impl ResamplingMethod {
    /// Parse from a string name.
    pub fn from_name(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "nearest" => Some(Self::Nearest),
            "bilinear" => Some(Self::Bilinear),
            _ => None,
        }
    }

    /// Sample `src` at continuous pixel coordinates with this kernel.
    pub fn sample(&self, src: &ArrayView2<'_, Rgba>, x: f64, y: f64) -> Option<Rgba> {
        match self {
            Self::Nearest => nearest::sample(src, x, y),
            Self::Bilinear => bilinear::sample(src, x, y),
        }
    }
}
