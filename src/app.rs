//! Application state and the event handlers a host drives it with.

use std::path::Path;

use tracing::{debug, info, warn};

use crate::config::MapConfig;
use crate::error::MapError;
use crate::geo::{GeoPoint, Line, Mark, ScreenPoint, Viewport};
use crate::graticule;
use crate::proj::radial::RadialProjection;
use crate::proj::Projection;
use crate::raster::{self, PixelBuffer};
use crate::scene::{RenderMode, Scene};
use crate::surface::Surface;
use crate::warp::engine::build_raster;

/// Everything the map keeps between events.
///
/// The projection is rebuilt on every resize. The projected raster is a cache
/// of the texture under the current projection and is rebuilt with it.
pub struct MapState {
    config: MapConfig,
    projection: RadialProjection,
    graticule: Vec<Line>,
    coast: Line,
    texture: Option<PixelBuffer>,
    raster: Option<PixelBuffer>,
    marks: Vec<Mark>,
    mode: RenderMode,
}

impl MapState {
    pub fn new(config: MapConfig, viewport: Viewport) -> Result<Self, MapError> {
        let projection = RadialProjection::new(config.projection.to_params(), viewport)?;
        let mut state = Self {
            projection,
            graticule: graticule::graticule(),
            coast: graticule::coastline(),
            texture: None,
            raster: None,
            marks: Vec::new(),
            mode: RenderMode::default(),
            config,
        };

        let initial: Vec<_> = state
            .config
            .marks
            .iter()
            .map(|m| (GeoPoint::from_degrees(m.latitude_deg, m.longitude_deg), m.text.clone()))
            .collect();
        for (geo, text) in initial {
            state.add_mark_at(geo, text)?;
        }

        debug!(
            width = viewport.width,
            height = viewport.height,
            marks = state.marks.len(),
            "map state initialized"
        );
        Ok(state)
    }

    pub fn config(&self) -> &MapConfig {
        &self.config
    }

    pub fn projection(&self) -> &RadialProjection {
        &self.projection
    }

    pub fn viewport(&self) -> Viewport {
        self.projection.viewport()
    }

    pub fn mode(&self) -> RenderMode {
        self.mode
    }

    pub fn marks(&self) -> &[Mark] {
        &self.marks
    }

    pub fn raster(&self) -> Option<&PixelBuffer> {
        self.raster.as_ref()
    }

    pub fn has_texture(&self) -> bool {
        self.texture.is_some()
    }

    /// Recompute the projection for a new viewport.
    ///
    /// The cached raster is dropped and rebuilt right away when a texture is loaded.
    pub fn resize(&mut self, viewport: Viewport) -> Result<(), MapError> {
        self.projection = RadialProjection::new(*self.projection.params(), viewport)?;
        self.raster = None;
        debug!(width = viewport.width, height = viewport.height, "viewport resized");
        self.rebuild_raster()
    }

    /// Install a decoded texture and build its projected raster.
    pub fn set_texture(&mut self, texture: PixelBuffer) -> Result<(), MapError> {
        let raster = build_raster(&texture.view(), &self.projection, &self.config.raster)?;
        self.texture = Some(texture);
        self.raster = Some(raster);
        Ok(())
    }

    /// Decode a texture from disk. On failure the state is left unchanged, so
    /// planet mode keeps falling back to the graticule.
    pub fn load_texture(&mut self, path: &Path) -> Result<(), MapError> {
        let loaded = raster::load_texture(path).and_then(|texture| self.set_texture(texture));
        if let Err(e) = &loaded {
            warn!(path = %path.display(), error = %e, "texture not loaded");
        }
        loaded
    }

    pub fn set_mode(&mut self, mode: RenderMode) {
        debug!(?mode, "render mode set");
        self.mode = mode;
    }

    pub fn toggle_mode(&mut self) -> RenderMode {
        self.set_mode(self.mode.toggled());
        self.mode
    }

    /// Deproject a click and report it. Places a mark when `mark_on_click` is set.
    pub fn click(&mut self, at: ScreenPoint) -> Result<GeoPoint, MapError> {
        let geo = self.projection.inverse(at)?;
        let (lat, lon) = geo.to_degrees();
        info!(x = at.x, y = at.y, latitude = lat, longitude = lon, "click");
        if self.config.mark_on_click {
            self.add_mark_at(geo, None)?;
        }
        Ok(geo)
    }

    /// Append a mark, recording where it projects right now.
    pub fn add_mark_at(&mut self, geo: GeoPoint, text: Option<String>) -> Result<&Mark, MapError> {
        let screen = self.projection.forward(geo)?;
        self.marks.push(Mark { screen, geo, text });
        Ok(&self.marks[self.marks.len() - 1])
    }

    /// Redraw the whole scene onto `surface`.
    pub fn redraw<S: Surface + ?Sized>(&self, surface: &mut S) -> Result<(), MapError> {
        let scene = Scene {
            projection: &self.projection,
            graticule: &self.graticule,
            coast: &self.coast,
            raster: self.raster.as_ref(),
            marks: &self.marks,
        };
        scene.render(surface, self.mode, &self.config.render)?;
        Ok(())
    }

    fn rebuild_raster(&mut self) -> Result<(), MapError> {
        if let Some(texture) = &self.texture {
            self.raster = Some(build_raster(
                &texture.view(),
                &self.projection,
                &self.config.raster,
            )?);
        }
        Ok(())
    }
}
