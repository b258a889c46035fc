//! Oblique radial ("equirectangular-style") projection.
//!
//! Parallels are concentric arcs around a pole placed above the bottom edge of
//! the viewport, meridians are rays out of that pole.
//!
//! forward: b = a·(λ - λc)/(λc - λl), r = yc·(π/2 - φ)/(π/2 - φ₀)
//!          x = w/2 + r·sin(b), y = h - yc + r·cos(b)
//! inverse: b = atan(dx/dy), r = dx/sin(b) = dy/cos(b)
//!          λ = λc + b/a·(λc - λl), φ = π/2 - r/yc·(π/2 - φ₀)

use std::f64::consts::FRAC_PI_2;

use crate::error::ProjError;
use crate::geo::{GeoPoint, ScreenPoint, Viewport};
use crate::proj::Projection;

/// Fixed reference values of the projection. Angles in radians.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RadialParams {
    /// Sphere radius in map units.
    pub earth_radius: f64,
    /// Map units covered by the viewport height.
    pub units_per_height: f64,
    /// Meridian drawn vertically through the viewport centre.
    pub central_meridian: f64,
    /// Meridian that reaches the left viewport edge at the lowest latitude.
    pub left_meridian: f64,
    /// Latitude that touches the bottom edge on the central meridian.
    pub lowest_latitude: f64,
}

impl RadialParams {
    pub fn from_degrees(
        earth_radius: f64,
        units_per_height: f64,
        central_meridian_deg: f64,
        left_meridian_deg: f64,
        lowest_latitude_deg: f64,
    ) -> Self {
        Self {
            earth_radius,
            units_per_height,
            central_meridian: central_meridian_deg.to_radians(),
            left_meridian: left_meridian_deg.to_radians(),
            lowest_latitude: lowest_latitude_deg.to_radians(),
        }
    }
}

impl Default for RadialParams {
    fn default() -> Self {
        Self::from_degrees(6_371_007.0, 9_000_000.0, 30.0, 0.0, 30.0)
    }
}

/// The radial projection bound to one viewport.
///
/// All derived constants live here, so a resize means building a new instance.
#[derive(Clone, Debug)]
pub struct RadialProjection {
    params: RadialParams,
    viewport: Viewport,
    scale: f64,       // pixels per map unit
    yc: f64,          // distance from the pole to the bottom edge
    a: f64,           // half opening angle of the fan
    half_width: f64,
    span: f64,        // λc - λl
    colatitude0: f64, // π/2 - φ₀
}

impl RadialProjection {
    pub fn new(params: RadialParams, viewport: Viewport) -> Result<Self, ProjError> {
        if viewport.width == 0 || viewport.height == 0 {
            return Err(ProjError::InvalidParameter(format!(
                "viewport must be non-empty, got {}x{}",
                viewport.width, viewport.height
            )));
        }
        if !(params.earth_radius > 0.0) || !(params.units_per_height > 0.0) {
            return Err(ProjError::InvalidParameter(
                "earth radius and units per height must be positive".into(),
            ));
        }
        let span = params.central_meridian - params.left_meridian;
        if span.abs() < f64::EPSILON {
            return Err(ProjError::InvalidParameter(
                "central and left meridian must differ".into(),
            ));
        }
        let colatitude0 = FRAC_PI_2 - params.lowest_latitude;
        if colatitude0.abs() < f64::EPSILON {
            return Err(ProjError::InvalidParameter(
                "lowest latitude must not be the pole".into(),
            ));
        }

        let width = viewport.width as f64;
        let height = viewport.height as f64;
        let scale = height / params.units_per_height;
        let yc = scale * params.earth_radius * colatitude0;
        let a = (width / (2.0 * yc)).atan();

        Ok(Self {
            params,
            viewport,
            scale,
            yc,
            a,
            half_width: width / 2.0,
            span,
            colatitude0,
        })
    }

    pub fn params(&self) -> &RadialParams {
        &self.params
    }

    pub fn scale(&self) -> f64 {
        self.scale
    }

    pub fn yc(&self) -> f64 {
        self.yc
    }

    pub fn a(&self) -> f64 {
        self.a
    }

    /// Screen position of the pole, the only point where `inverse` is undefined.
    pub fn pole(&self) -> ScreenPoint {
        ScreenPoint::new(self.half_width, self.viewport.height as f64 - self.yc)
    }
}

impl Projection for RadialProjection {
    fn forward(&self, geo: GeoPoint) -> Result<ScreenPoint, ProjError> {
        if !geo.latitude.is_finite() || !geo.longitude.is_finite() {
            return Err(ProjError::NonFinite(geo.latitude, geo.longitude));
        }
        if geo.latitude.abs() > FRAC_PI_2 + 1e-12 {
            return Err(ProjError::LatitudeOutOfRange(geo.latitude));
        }

        let b = self.a * (geo.longitude - self.params.central_meridian) / self.span;
        let r = self.yc * (FRAC_PI_2 - geo.latitude) / self.colatitude0;

        let x = self.half_width + r * b.sin();
        let y = self.viewport.height as f64 - self.yc + r * b.cos();
        Ok(ScreenPoint::new(x, y))
    }

    fn inverse(&self, screen: ScreenPoint) -> Result<GeoPoint, ProjError> {
        if !screen.x.is_finite() || !screen.y.is_finite() {
            return Err(ProjError::NonFinite(screen.x, screen.y));
        }

        let pole = self.pole();
        let dx = screen.x - pole.x;
        let dy = screen.y - pole.y;
        if dx == 0.0 && dy == 0.0 {
            return Err(ProjError::Singular {
                x: screen.x,
                y: screen.y,
            });
        }

        // dy == 0 gives atan(±inf) = ±π/2, which the sin branch handles.
        let b = (dx / dy).atan();
        let (sin_b, cos_b) = b.sin_cos();
        let r = if sin_b.abs() > cos_b.abs() {
            dx / sin_b
        } else {
            dy / cos_b
        };

        let longitude = b / self.a * self.span + self.params.central_meridian;
        let latitude = FRAC_PI_2 - r / self.yc * self.colatitude0;
        // Above the pole row r turns negative and the latitude runs past 90°N;
        // far enough from the pole it runs past 90°S.
        if !(-FRAC_PI_2..=FRAC_PI_2).contains(&latitude) {
            return Err(ProjError::OutsideDomain {
                x: screen.x,
                y: screen.y,
            });
        }
        Ok(GeoPoint::new(latitude, longitude))
    }

    fn viewport(&self) -> Viewport {
        self.viewport
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    fn proj(width: usize, height: usize) -> RadialProjection {
        RadialProjection::new(RadialParams::default(), Viewport::new(width, height)).unwrap()
    }

    #[test]
    fn test_derived_constants() {
        let p = proj(800, 600);
        let scale = 600.0 / 9_000_000.0;
        let yc = scale * 6_371_007.0 * 60.0_f64.to_radians();
        assert_relative_eq!(p.scale(), scale, epsilon = 1e-15);
        assert_relative_eq!(p.yc(), yc, epsilon = 1e-9);
        assert_relative_eq!(p.a(), (800.0 / (2.0 * yc)).atan(), epsilon = 1e-12);
    }

    #[test]
    fn test_roundtrip_random() {
        let p = proj(800, 600);
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..1000 {
            let lon = rng.random_range(0.0..=60.0_f64).to_radians();
            let lat = rng.random_range(-89.0..=71.0_f64).to_radians();
            let screen = p.forward(GeoPoint::new(lat, lon)).unwrap();
            let back = p.inverse(screen).unwrap();
            assert_relative_eq!(back.longitude, lon, epsilon = 1e-6);
            assert_relative_eq!(back.latitude, lat, epsilon = 1e-6);
        }
    }

    #[test]
    fn test_roundtrip_central_meridian() {
        // The column x == width/2 is well defined.
        let p = proj(800, 600);
        for lat_deg in [-80.0, -30.0, 0.0, 30.0, 60.0, 85.0] {
            let geo = GeoPoint::from_degrees(lat_deg, 30.0);
            let screen = p.forward(geo).unwrap();
            assert_relative_eq!(screen.x, 400.0, epsilon = 1e-9);
            let back = p.inverse(screen).unwrap();
            assert_relative_eq!(back.latitude, geo.latitude, epsilon = 1e-9);
            assert_relative_eq!(back.longitude, geo.longitude, epsilon = 1e-9);
        }
    }

    #[test]
    fn test_inverse_exact_center_column() {
        let p = proj(800, 600);
        let geo = p.inverse(ScreenPoint::new(400.0, 600.0)).unwrap();
        assert!(geo.latitude.is_finite() && geo.longitude.is_finite());
        assert_relative_eq!(geo.longitude, 30.0_f64.to_radians(), epsilon = 1e-12);
        assert_relative_eq!(geo.latitude, 30.0_f64.to_radians(), epsilon = 1e-12);
    }

    #[test]
    fn test_lowest_latitude_touches_bottom() {
        let p = proj(800, 600);
        let s = p.forward(GeoPoint::from_degrees(30.0, 30.0)).unwrap();
        assert_eq!(s.x, 400.0);
        assert_relative_eq!(s.y, 600.0, epsilon = 1e-9);
    }

    #[test]
    fn test_pole_maps_to_pole_point() {
        let p = proj(800, 600);
        let s = p.forward(GeoPoint::from_degrees(90.0, 12.0)).unwrap();
        let pole = p.pole();
        assert_relative_eq!(s.x, pole.x, epsilon = 1e-9);
        assert_relative_eq!(s.y, pole.y, epsilon = 1e-9);
        assert_relative_eq!(pole.y, 600.0 - p.yc(), epsilon = 1e-12);
    }

    #[test]
    fn test_inverse_singular_at_pole() {
        let p = proj(800, 600);
        let err = p.inverse(p.pole()).unwrap_err();
        assert!(matches!(err, ProjError::Singular { .. }));
    }

    #[test]
    fn test_inverse_on_pole_row() {
        // dy == 0 but dx != 0: the ray is horizontal, still finite.
        let p = proj(800, 600);
        let pole = p.pole();
        let geo = p.inverse(ScreenPoint::new(pole.x + 50.0, pole.y)).unwrap();
        assert!(geo.latitude.is_finite() && geo.longitude.is_finite());
    }

    #[test]
    fn test_inverse_above_pole_is_outside_domain() {
        let p = proj(800, 600);
        for at in [
            ScreenPoint::new(400.0, 50.0),
            ScreenPoint::new(10.0, 0.0),
            ScreenPoint::new(790.0, p.pole().y - 0.5),
        ] {
            assert!(matches!(
                p.inverse(at),
                Err(ProjError::OutsideDomain { .. })
            ));
        }
    }

    #[test]
    fn test_inverse_sweep_is_finite_or_tagged() {
        // Height chosen so the pole lands on row 50.
        let params = RadialParams {
            units_per_height: 6_371_007.0 * (FRAC_PI_2 - 30.0_f64.to_radians()) * 2.0,
            ..RadialParams::default()
        };
        let p = RadialProjection::new(params, Viewport::new(200, 100)).unwrap();
        let (mut defined, mut outside) = (0, 0);

        for row in 0..100 {
            for col in 0..200 {
                match p.inverse(ScreenPoint::new(col as f64, row as f64)) {
                    Ok(geo) => {
                        assert!(geo.latitude.is_finite() && geo.longitude.is_finite());
                        assert!(geo.latitude.abs() <= FRAC_PI_2, "({col}, {row})");
                        defined += 1;
                    }
                    Err(ProjError::Singular { .. } | ProjError::OutsideDomain { .. }) => {
                        outside += 1
                    }
                    Err(e) => panic!("({col}, {row}): unexpected {e}"),
                }
            }
        }
        assert!(p.inverse(p.pole()).is_err());
        assert!(defined > 0);
        // every row above the pole, plus the far bottom corners past 90°S
        assert!(outside >= 200 * 50);
    }

    #[test]
    fn test_mirror_symmetry_800x600() {
        let p = proj(800, 600);
        let left = p.forward(GeoPoint::from_degrees(30.0, 0.0)).unwrap();
        let right = p.forward(GeoPoint::from_degrees(30.0, 60.0)).unwrap();
        assert_relative_eq!(left.x - 400.0, 400.0 - right.x, epsilon = 1e-9);
        assert_relative_eq!(left.y, right.y, epsilon = 1e-9);
    }

    #[test]
    fn test_left_meridian_reaches_left_edge() {
        let p = proj(800, 600);
        let s = p.forward(GeoPoint::from_degrees(30.0, 0.0)).unwrap();
        // r = yc at the lowest latitude, so x = w/2 - yc·sin(a) and tan(a) = w/(2yc).
        assert!(s.x > 0.0 && s.x < 400.0);
        assert_relative_eq!(s.x, 400.0 - p.yc() * p.a().sin(), epsilon = 1e-9);
    }

    #[test]
    fn test_forward_rejects_bad_latitude() {
        let p = proj(800, 600);
        assert!(matches!(
            p.forward(GeoPoint::new(2.0, 0.0)),
            Err(ProjError::LatitudeOutOfRange(_))
        ));
        assert!(matches!(
            p.forward(GeoPoint::new(f64::NAN, 0.0)),
            Err(ProjError::NonFinite(..))
        ));
    }

    #[test]
    fn test_invalid_parameters() {
        let vp = Viewport::new(800, 600);
        assert!(RadialProjection::new(RadialParams::default(), Viewport::new(0, 600)).is_err());

        let same = RadialParams::from_degrees(6_371_007.0, 9_000_000.0, 10.0, 10.0, 30.0);
        assert!(RadialProjection::new(same, vp).is_err());

        let polar = RadialParams::from_degrees(6_371_007.0, 9_000_000.0, 30.0, 0.0, 90.0);
        assert!(RadialProjection::new(polar, vp).is_err());

        let flat = RadialParams {
            earth_radius: 0.0,
            ..RadialParams::default()
        };
        assert!(RadialProjection::new(flat, vp).is_err());
    }

    #[test]
    fn test_resize_changes_constants() {
        let small = proj(400, 300);
        let large = proj(1600, 1200);
        assert_relative_eq!(large.yc(), 4.0 * small.yc(), epsilon = 1e-9);
        // Same aspect ratio keeps the fan angle.
        assert_relative_eq!(large.a(), small.a(), epsilon = 1e-12);
    }
}
