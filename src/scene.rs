//! Scene composition: graticule or planet raster, labels, coastline, marks.

use serde::{Deserialize, Serialize};

use crate::error::ProjError;
use crate::geo::{GeoPoint, Line, Mark};
use crate::proj::Projection;
use crate::raster::{PixelBuffer, Rgba};
use crate::surface::Surface;

pub const GRATICULE_COLOR: Rgba = Rgba::BLACK;
pub const COAST_COLOR: Rgba = Rgba::RED;
pub const LABEL_COLOR: Rgba = Rgba::BLACK;
pub const MARK_COLOR: Rgba = Rgba::BLACK;

/// Latitude along which the longitude labels run.
const LABEL_EDGE_LATITUDE_DEG: f64 = 70.0;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RenderMode {
    #[default]
    Graticule,
    Planet,
}

impl RenderMode {
    pub fn toggled(self) -> Self {
        match self {
            Self::Graticule => Self::Planet,
            Self::Planet => Self::Graticule,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderOptions {
    /// Vertical shift applied to the base layer and its labels after compositing.
    /// Zero by default; -100 reproduces the legacy layout.
    pub vertical_offset: i64,
    pub font: String,
    pub dot_radius: f64,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            vertical_offset: 0,
            font: "15px sans-serif".into(),
            dot_radius: 5.0,
        }
    }
}

/// Everything one redraw reads. Borrowed from the application state so the
/// same projection instance drives every layer.
pub struct Scene<'a, P: Projection + ?Sized> {
    pub projection: &'a P,
    pub graticule: &'a [Line],
    pub coast: &'a [GeoPoint],
    pub raster: Option<&'a PixelBuffer>,
    pub marks: &'a [Mark],
}

impl<P: Projection + ?Sized> Scene<'_, P> {
    pub fn render_graticule<S: Surface + ?Sized>(&self, surface: &mut S) -> Result<(), ProjError> {
        for line in self.graticule {
            let points = self.projection.forward_line(line)?;
            surface.draw_polyline(&points, GRATICULE_COLOR);
        }
        Ok(())
    }

    /// Degree labels along the top parallel and the left meridian.
    pub fn render_labels<S: Surface + ?Sized>(
        &self,
        surface: &mut S,
        options: &RenderOptions,
    ) -> Result<(), ProjError> {
        let shift = options.vertical_offset as f64;
        let along_top = (0..=60)
            .step_by(10)
            .map(|lon| (GeoPoint::from_degrees(LABEL_EDGE_LATITUDE_DEG, lon as f64), lon));
        let along_left = (0..=60)
            .step_by(10)
            .map(|lat| (GeoPoint::from_degrees(lat as f64, 0.0), lat));

        for (geo, degrees) in along_top.chain(along_left) {
            let mut at = self.projection.forward(geo)?;
            at.y += shift;
            surface.draw_text(at, &format!("{degrees}°"), &options.font, LABEL_COLOR);
        }
        Ok(())
    }

    pub fn render_coast<S: Surface + ?Sized>(&self, surface: &mut S) -> Result<(), ProjError> {
        let points = self.projection.forward_line(self.coast)?;
        surface.draw_polyline(&points, COAST_COLOR);
        Ok(())
    }

    /// Marks follow the current projection; the stored screen position is only
    /// used if the mark can no longer be projected.
    pub fn render_marks<S: Surface + ?Sized>(&self, surface: &mut S, options: &RenderOptions) {
        for mark in self.marks {
            let at = self.projection.forward(mark.geo).unwrap_or(mark.screen);
            surface.draw_dot(at, options.dot_radius, MARK_COLOR);
            if let Some(text) = &mark.text {
                surface.draw_text(at, text, &options.font, LABEL_COLOR);
            }
        }
    }

    /// Full redraw.
    ///
    /// Planet mode blits the cached raster when there is one and falls back to
    /// the graticule otherwise. The coastline and marks are overlaid in every mode.
    pub fn render<S: Surface + ?Sized>(
        &self,
        surface: &mut S,
        mode: RenderMode,
        options: &RenderOptions,
    ) -> Result<(), ProjError> {
        surface.clear();

        match (mode, self.raster) {
            (RenderMode::Planet, Some(raster)) => surface.put_pixels(raster, (0, 0)),
            _ => self.render_graticule(surface)?,
        }

        if options.vertical_offset != 0 {
            let base = surface.get_pixels();
            surface.clear();
            surface.put_pixels(&base, (0, options.vertical_offset));
        }

        self.render_labels(surface, options)?;
        self.render_coast(surface)?;
        self.render_marks(surface, options);
        Ok(())
    }
}
