//! Oblique radial map projection with a labeled graticule, a coastline overlay
//! and a texture resampler ("planet mode") driven by the same projection.

pub mod app;
pub mod config;
pub mod error;
pub mod geo;
pub mod graticule;
pub mod proj;
pub mod raster;
pub mod resample;
pub mod scene;
pub mod surface;
pub mod warp;
