//! JSON configuration. Every field has a default, so `{}` is a valid config.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::MapError;
use crate::proj::radial::RadialParams;
use crate::scene::RenderOptions;
use crate::warp::engine::RasterOptions;

/// Projection parameters as written in the config file, angles in degrees.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectionConfig {
    pub earth_radius: f64,
    pub units_per_height: f64,
    pub central_meridian_deg: f64,
    pub left_meridian_deg: f64,
    pub lowest_latitude_deg: f64,
}

impl Default for ProjectionConfig {
    fn default() -> Self {
        Self {
            earth_radius: 6_371_007.0,
            units_per_height: 9_000_000.0,
            central_meridian_deg: 30.0,
            left_meridian_deg: 0.0,
            lowest_latitude_deg: 30.0,
        }
    }
}

impl ProjectionConfig {
    pub fn to_params(&self) -> RadialParams {
        RadialParams::from_degrees(
            self.earth_radius,
            self.units_per_height,
            self.central_meridian_deg,
            self.left_meridian_deg,
            self.lowest_latitude_deg,
        )
    }
}

/// A mark placed at startup.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MarkConfig {
    pub latitude_deg: f64,
    pub longitude_deg: f64,
    #[serde(default)]
    pub text: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MapConfig {
    pub projection: ProjectionConfig,
    pub raster: RasterOptions,
    pub render: RenderOptions,
    pub marks: Vec<MarkConfig>,
    /// Place an unlabeled mark wherever a click lands.
    pub mark_on_click: bool,
}

impl MapConfig {
    pub fn from_json(text: &str) -> Result<Self, MapError> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn load(path: &Path) -> Result<Self, MapError> {
        let text = fs::read_to_string(path)?;
        let config = Self::from_json(&text)?;
        tracing::debug!(path = %path.display(), marks = config.marks.len(), "loaded config");
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::raster::Rgba;
    use crate::resample::ResamplingMethod;
    use approx::assert_relative_eq;

    #[test]
    fn test_empty_object_is_default() {
        let config = MapConfig::from_json("{}").unwrap();
        assert_eq!(config, MapConfig::default());
        assert_eq!(config.render.vertical_offset, 0);
        assert!(!config.mark_on_click);
    }

    #[test]
    fn test_default_params_match_projection_defaults() {
        let params = ProjectionConfig::default().to_params();
        assert_eq!(params, RadialParams::default());
        assert_relative_eq!(params.lowest_latitude, 30.0_f64.to_radians());
    }

    #[test]
    fn test_partial_override() {
        let config = MapConfig::from_json(
            r#"{
                "projection": { "central_meridian_deg": 40.0 },
                "raster": { "method": "bilinear", "background": [0, 0, 0, 255] },
                "render": { "vertical_offset": -100 },
                "marks": [ { "latitude_deg": 53.54, "longitude_deg": 10.04, "text": "Hamburg" } ],
                "mark_on_click": true
            }"#,
        )
        .unwrap();

        assert_relative_eq!(config.projection.central_meridian_deg, 40.0);
        assert_relative_eq!(config.projection.lowest_latitude_deg, 30.0);
        assert_eq!(config.raster.method, ResamplingMethod::Bilinear);
        assert_eq!(config.raster.background, Rgba::BLACK);
        assert_relative_eq!(config.raster.max_latitude_deg, 70.0);
        assert_eq!(config.render.vertical_offset, -100);
        assert_eq!(config.render.font, RenderOptions::default().font);
        assert_eq!(config.marks[0].text.as_deref(), Some("Hamburg"));
        assert!(config.mark_on_click);
    }

    #[test]
    fn test_invalid_json() {
        assert!(matches!(
            MapConfig::from_json("{ not json"),
            Err(MapError::Config(_))
        ));
    }

    #[test]
    fn test_missing_file() {
        let result = MapConfig::load(Path::new("/nonexistent/planet-map.json"));
        assert!(matches!(result, Err(MapError::Io(_))));
    }
}
