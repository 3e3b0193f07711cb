use crate::config::MapConfig;
use glam::{DAffine2, DVec2};

/// Linear lon/lat to reference-canvas mapping inside a fixed bounding box.
/// No clamping: points outside the box land outside the canvas.
#[derive(Clone, Debug)]
pub struct CoordinateMapper {
    min_lon: f64,
    max_lon: f64,
    min_lat: f64,
    max_lat: f64,
    ref_width: f64,
    ref_height: f64,
    margin: f64,
    marker_size: i32,
}

impl CoordinateMapper {
    pub fn new(config: &MapConfig) -> Self {
        Self {
            min_lon: config.min_lon,
            max_lon: config.max_lon,
            min_lat: config.min_lat,
            max_lat: config.max_lat,
            ref_width: config.reference_width(),
            ref_height: config.reference_height(),
            margin: config.margin,
            marker_size: config.marker_size,
        }
    }

    /// Project a geographic coordinate to the top-left corner of its marker
    pub fn project(&self, lon: f64, lat: f64) -> (i32, i32) {
        let fx = (lon - self.min_lon) / (self.max_lon - self.min_lon);
        // North is up
        let fy = 1.0 - (lat - self.min_lat) / (self.max_lat - self.min_lat);

        let half = self.marker_size / 2;
        let x = (fx * self.ref_width + self.margin) as i32 - half;
        let y = (fy * self.ref_height + self.margin) as i32 - half;
        (x, y)
    }

    pub fn marker_size(&self) -> i32 {
        self.marker_size
    }
}

/// Uniform scale + centering from reference canvas to view pixels
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MapTransform {
    forward: DAffine2,
    inverse: DAffine2,
}

impl MapTransform {
    /// Fit a `ref_width x ref_height` canvas into `width x height` view pixels.
    /// Returns `None` when the view has no area (nothing to invert).
    pub fn fit(ref_width: f64, ref_height: f64, width: f64, height: f64) -> Option<Self> {
        let fac_x = width / ref_width;
        let fac_y = height / ref_height;
        let fac = fac_x.min(fac_y);
        if !(fac > 0.0) || !fac.is_finite() {
            return None;
        }

        // Center along the axis with spare room
        let mut delta = DVec2::ZERO;
        if fac_x < fac_y {
            delta.y = (height - ref_height * fac) / 2.0;
        } else if fac_x > fac_y {
            delta.x = (width - ref_width * fac) / 2.0;
        }

        let forward = DAffine2::from_translation(delta) * DAffine2::from_scale(DVec2::splat(fac));
        Some(Self {
            forward,
            inverse: forward.inverse(),
        })
    }

    pub fn scale(&self) -> f64 {
        self.forward.matrix2.x_axis.x
    }

    /// Reference canvas point to view pixels
    pub fn apply(&self, x: f64, y: f64) -> (f64, f64) {
        let p = self.forward.transform_point2(DVec2::new(x, y));
        (p.x, p.y)
    }

    /// View pixels back to reference canvas point
    pub fn invert(&self, px: f64, py: f64) -> (f64, f64) {
        let p = self.inverse.transform_point2(DVec2::new(px, py));
        (p.x, p.y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mapper() -> CoordinateMapper {
        CoordinateMapper::new(&MapConfig::default())
    }

    #[test]
    fn test_project_corners() {
        let m = mapper();
        // South-west corner: left edge, bottom edge
        assert_eq!(m.project(7.4, 47.4), (5 - 10, 878 + 5 - 10));
        // North-east corner: right edge, top edge
        assert_eq!(m.project(10.6, 49.9), (763 + 5 - 10, 5 - 10));
    }

    #[test]
    fn test_project_is_monotonic() {
        let m = mapper();
        let mut prev_x = i32::MIN;
        let mut prev_y = i32::MAX;
        for step in 0..=30 {
            let lon = 7.0 + step as f64 * 0.1;
            let lat = 47.0 + step as f64 * 0.1;
            let (x, _) = m.project(lon, 48.0);
            let (_, y) = m.project(8.0, lat);
            assert!(x >= prev_x, "x must grow with longitude");
            assert!(y <= prev_y, "y must shrink as latitude grows");
            prev_x = x;
            prev_y = y;
        }
        assert!(m.project(10.0, 48.0).0 > m.project(7.0, 48.0).0);
        assert!(m.project(8.0, 50.0).1 < m.project(8.0, 47.0).1);
    }

    #[test]
    fn test_project_outside_box_is_not_clamped() {
        let (x, y) = mapper().project(7.0, 50.0);
        assert!(x < 0);
        assert!(y < 0);
    }

    #[test]
    fn test_fit_centers_wide_view() {
        let t = MapTransform::fit(100.0, 200.0, 400.0, 200.0).unwrap();
        assert_eq!(t.scale(), 1.0);
        assert_eq!(t.apply(0.0, 0.0), (150.0, 0.0));
        assert_eq!(t.apply(100.0, 200.0), (250.0, 200.0));
    }

    #[test]
    fn test_fit_centers_tall_view() {
        let t = MapTransform::fit(100.0, 100.0, 50.0, 150.0).unwrap();
        assert_eq!(t.scale(), 0.5);
        assert_eq!(t.apply(0.0, 0.0), (0.0, 50.0));
    }

    #[test]
    fn test_invert_round_trips() {
        let t = MapTransform::fit(763.0, 878.0, 160.0, 96.0).unwrap();
        let (px, py) = t.apply(300.0, 400.0);
        let (x, y) = t.invert(px, py);
        assert!((x - 300.0).abs() < 1e-9);
        assert!((y - 400.0).abs() < 1e-9);
    }

    #[test]
    fn test_fit_empty_view() {
        assert!(MapTransform::fit(763.0, 878.0, 0.0, 96.0).is_none());
        assert!(MapTransform::fit(763.0, 878.0, 0.0, 0.0).is_none());
    }
}
