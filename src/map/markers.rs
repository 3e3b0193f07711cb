use crate::map::projection::CoordinateMapper;
use crate::model::{Site, SiteId};
use ratatui::style::Color;
use std::collections::HashMap;
use tracing::debug;

/// Fraction of the red threshold reached by `value`, clamped to [0, 1]
pub fn fill_ratio(value: u64, threshold: f64) -> f64 {
    if threshold <= 0.0 {
        return 1.0;
    }
    (value as f64 / threshold).clamp(0.0, 1.0)
}

/// Green (0) to red (1) ramp
pub fn ramp_color(ratio: f64) -> Color {
    let ratio = ratio.clamp(0.0, 1.0);
    let red = (ratio * 255.0).round() as u8;
    let green = ((1.0 - ratio) * 255.0).round() as u8;
    Color::Rgb(red, green, 0)
}

/// A plant's square on the map, in reference canvas pixels
#[derive(Clone, Debug)]
pub struct Marker {
    pub site: SiteId,
    /// Top-left corner, fixed at creation
    pub x: i32,
    pub y: i32,
    pub value: u64,
    pub color: Color,
    title: String,
}

impl Marker {
    fn set_value(&mut self, value: u64, threshold: f64) {
        self.value = value;
        self.color = ramp_color(fill_ratio(value, threshold));
    }

    /// Half-open containment test for a `size x size` square
    pub fn contains(&self, x: f64, y: f64, size: i32) -> bool {
        x >= self.x as f64
            && x < (self.x + size) as f64
            && y >= self.y as f64
            && y < (self.y + size) as f64
    }

    pub fn tooltip(&self) -> String {
        format!("{}, {}ppp total", self.title, self.value)
    }
}

/// Whether an upsert created a marker or updated one in place
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Upsert {
    Created,
    Updated,
}

/// Markers in insertion order, keyed by site identity
pub struct MarkerRegistry {
    markers: Vec<Marker>,
    index: HashMap<SiteId, usize>,
    threshold: f64,
    /// Set on every change, cleared by the renderer's owner
    dirty: bool,
}

impl MarkerRegistry {
    pub fn new(threshold: f64) -> Self {
        Self {
            markers: Vec::new(),
            index: HashMap::new(),
            threshold,
            dirty: false,
        }
    }

    /// Update the marker of `site`, or create it at the site's projected position
    pub fn upsert(&mut self, site: &Site, value: u64, mapper: &CoordinateMapper) -> Upsert {
        self.dirty = true;

        if let Some(&idx) = self.index.get(&site.id) {
            self.markers[idx].set_value(value, self.threshold);
            debug!(site = %site.name, value, "marker updated");
            return Upsert::Updated;
        }

        let (x, y) = mapper.project(site.lon, site.lat);
        let mut marker = Marker {
            site: site.id,
            x,
            y,
            value,
            color: Color::Reset,
            title: site.title(),
        };
        marker.set_value(value, self.threshold);

        self.index.insert(site.id, self.markers.len());
        self.markers.push(marker);
        debug!(site = %site.name, value, x, y, "marker created");
        Upsert::Created
    }

    /// Topmost marker under a reference canvas point (latest drawn wins)
    pub fn hit(&self, x: f64, y: f64, size: i32) -> Option<&Marker> {
        self.markers.iter().rev().find(|m| m.contains(x, y, size))
    }

    pub fn get(&self, site: SiteId) -> Option<&Marker> {
        self.index.get(&site).map(|&idx| &self.markers[idx])
    }

    pub fn iter(&self) -> impl Iterator<Item = &Marker> {
        self.markers.iter()
    }

    pub fn len(&self) -> usize {
        self.markers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.markers.is_empty()
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    /// Consume the re-render trigger
    pub fn take_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::MapConfig;

    fn mapper() -> CoordinateMapper {
        CoordinateMapper::new(&MapConfig::default())
    }

    fn site(id: usize, lon: f64, lat: f64) -> Site {
        Site::new(SiteId(id), &format!("Plant {id}"), 1000, lon, lat).unwrap()
    }

    #[test]
    fn test_color_ramp_endpoints() {
        assert_eq!(ramp_color(fill_ratio(0, 500.0)), Color::Rgb(0, 255, 0));
        assert_eq!(ramp_color(fill_ratio(500, 500.0)), Color::Rgb(255, 0, 0));
        assert_eq!(ramp_color(fill_ratio(9_000, 500.0)), Color::Rgb(255, 0, 0));
        assert_eq!(ramp_color(fill_ratio(250, 500.0)), Color::Rgb(128, 128, 0));
    }

    #[test]
    fn test_upsert_same_value_is_idempotent() {
        let mut reg = MarkerRegistry::new(500.0);
        let s = site(0, 8.0, 48.0);
        assert_eq!(reg.upsert(&s, 120, &mapper()), Upsert::Created);
        let before = reg.get(s.id).unwrap().color;
        assert_eq!(reg.upsert(&s, 120, &mapper()), Upsert::Updated);

        assert_eq!(reg.len(), 1);
        assert_eq!(reg.get(s.id).unwrap().color, before);
    }

    #[test]
    fn test_upsert_keys_on_identity_not_name() {
        let mut reg = MarkerRegistry::new(500.0);
        let a = site(0, 8.0, 48.0);
        let mut b = a.clone();
        b.id = SiteId(1);
        reg.upsert(&a, 10, &mapper());
        reg.upsert(&b, 20, &mapper());
        assert_eq!(reg.len(), 2);
    }

    #[test]
    fn test_update_keeps_position_and_recolors() {
        let mut reg = MarkerRegistry::new(500.0);
        let s = site(0, 8.5, 48.5);
        reg.upsert(&s, 0, &mapper());
        let (x, y) = {
            let m = reg.get(s.id).unwrap();
            (m.x, m.y)
        };
        reg.upsert(&s, 500, &mapper());

        let m = reg.get(s.id).unwrap();
        assert_eq!((m.x, m.y), (x, y));
        assert_eq!(m.color, Color::Rgb(255, 0, 0));
        assert_eq!(m.tooltip(), "Plant 0 (1000 people), 500ppp total");
    }

    #[test]
    fn test_hit_prefers_latest_marker() {
        let mut reg = MarkerRegistry::new(500.0);
        let first = site(0, 8.0, 48.0);
        let second = site(1, 8.01, 48.0);
        reg.upsert(&first, 1, &mapper());
        reg.upsert(&second, 2, &mapper());

        let m = reg.get(second.id).unwrap();
        let (x, y) = (m.x as f64 + 1.0, m.y as f64 + 1.0);
        assert_eq!(reg.hit(x, y, 20).map(|m| m.site), Some(second.id));

        // Far corner is exclusive
        let (x, y) = (m.x as f64 + 20.0, m.y as f64 + 20.0);
        assert!(reg.hit(x, y, 20).is_none());
    }

    #[test]
    fn test_dirty_flag() {
        let mut reg = MarkerRegistry::new(500.0);
        assert!(!reg.take_dirty());
        reg.upsert(&site(0, 8.0, 48.0), 1, &mapper());
        assert!(reg.take_dirty());
        assert!(!reg.take_dirty());
    }
}
