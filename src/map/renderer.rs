use crate::braille::BrailleCanvas;
use crate::config::{LegendConfig, MapConfig};
use crate::map::geometry::{draw_path, draw_rect, fill_polygon, fill_rect};
use crate::map::markers::{MarkerRegistry, Upsert};
use crate::map::projection::{CoordinateMapper, MapTransform};
use crate::map::region::RegionGeometry;
use crate::model::Site;
use ratatui::style::Color;

/// One marker's dots, filled square plus outline
pub struct MarkerLayer {
    pub fill: BrailleCanvas,
    pub outline: BrailleCanvas,
    pub color: Color,
}

/// Legend placement in character cells
pub struct LegendLayout {
    pub col: u16,
    pub row: u16,
    pub cols: u16,
    pub rows: u16,
    pub outline: BrailleCanvas,
    /// Caption text anchored at (column, row)
    pub captions: Vec<(u16, u16, String)>,
}

/// Everything needed to paint one frame, back to front
pub struct MapLayers {
    pub region_fill: BrailleCanvas,
    pub region_outline: BrailleCanvas,
    pub lake_fill: BrailleCanvas,
    pub lake_outline: BrailleCanvas,
    pub markers: Vec<MarkerLayer>,
    pub legend: Option<LegendLayout>,
}

/// Map surface: region geometry, markers and legend fitted to a resizable view
pub struct MapView {
    mapper: CoordinateMapper,
    geometry: RegionGeometry,
    markers: MarkerRegistry,
    legend: LegendConfig,
    ref_width: f64,
    ref_height: f64,
    transform: Option<MapTransform>,
    /// Surface size in character cells
    cols: usize,
    rows: usize,
}

impl MapView {
    pub fn new(config: &MapConfig, geometry: RegionGeometry) -> Self {
        Self {
            mapper: CoordinateMapper::new(config),
            geometry,
            markers: MarkerRegistry::new(config.max_threshold),
            legend: config.legend,
            ref_width: config.reference_width(),
            ref_height: config.reference_height(),
            transform: None,
            cols: 0,
            rows: 0,
        }
    }

    /// Recompute the scale + centering transform for a new surface size.
    /// Braille gives 2x4 pixels per character cell.
    pub fn resize(&mut self, cols: usize, rows: usize) {
        if self.transform.is_some() && cols == self.cols && rows == self.rows {
            return;
        }
        self.cols = cols;
        self.rows = rows;
        self.transform = MapTransform::fit(
            self.ref_width,
            self.ref_height,
            (cols * 2) as f64,
            (rows * 4) as f64,
        );
    }

    pub fn transform(&self) -> Option<&MapTransform> {
        self.transform.as_ref()
    }

    pub fn markers(&self) -> &MarkerRegistry {
        &self.markers
    }

    /// Insert or update the marker of `site` with its latest total
    pub fn set_marker(&mut self, site: &Site, value: u64) -> Upsert {
        self.markers.upsert(site, value, &self.mapper)
    }

    /// True once per batch of marker changes
    pub fn take_dirty(&mut self) -> bool {
        self.markers.take_dirty()
    }

    /// Tooltip for a pointer position in view pixels
    pub fn tooltip(&self, px: f64, py: f64) -> Option<String> {
        let transform = self.transform.as_ref()?;
        let (x, y) = transform.invert(px, py);
        self.markers
            .hit(x, y, self.mapper.marker_size())
            .map(|m| m.tooltip())
    }

    /// Tooltip for a character cell, sampled at the cell center
    pub fn tooltip_at_cell(&self, col: u16, row: u16) -> Option<String> {
        let px = col as f64 * 2.0 + 1.0;
        let py = row as f64 * 4.0 + 2.0;
        self.tooltip(px, py)
    }

    /// Render all layers for the current surface size.
    /// Without a transform every layer is blank.
    pub fn render(&self) -> MapLayers {
        let blank = || BrailleCanvas::new(self.cols, self.rows);
        let mut layers = MapLayers {
            region_fill: blank(),
            region_outline: blank(),
            lake_fill: blank(),
            lake_outline: blank(),
            markers: Vec::with_capacity(self.markers.len()),
            legend: None,
        };

        let Some(transform) = self.transform.as_ref() else {
            return layers;
        };
        let to_view = |points: &[(f64, f64)]| -> Vec<(f64, f64)> {
            points.iter().map(|&(x, y)| transform.apply(x, y)).collect()
        };

        let outline = to_view(&self.geometry.outline);
        let enclave = to_view(&self.geometry.enclave);
        let lake = to_view(&self.geometry.lake);

        fill_polygon(&mut layers.region_fill, &outline);
        fill_polygon(&mut layers.region_fill, &enclave);
        draw_path(&mut layers.region_outline, &outline, false);
        draw_path(&mut layers.region_outline, &enclave, true);
        fill_polygon(&mut layers.lake_fill, &lake);
        draw_path(&mut layers.lake_outline, &lake, true);

        let size = self.mapper.marker_size() as f64;
        for marker in self.markers.iter() {
            let (x0, y0) = transform.apply(marker.x as f64, marker.y as f64);
            let (x1, y1) = transform.apply(marker.x as f64 + size, marker.y as f64 + size);
            let (left, top) = (x0.floor() as i32, y0.floor() as i32);
            let right = (x1.ceil() as i32 - 1).max(left);
            let bottom = (y1.ceil() as i32 - 1).max(top);

            let mut fill = blank();
            let mut edge = blank();
            fill_rect(&mut fill, left, top, right, bottom);
            draw_rect(&mut edge, left, top, right, bottom);
            layers.markers.push(MarkerLayer {
                fill,
                outline: edge,
                color: marker.color,
            });
        }

        layers.legend = self.layout_legend(transform);
        layers
    }

    fn layout_legend(&self, transform: &MapTransform) -> Option<LegendLayout> {
        let legend = &self.legend;
        let (x0, y0) = transform.apply(legend.x, legend.y);
        let (x1, y1) = transform.apply(legend.x + legend.width, legend.y + legend.height);
        if x0 < 0.0 || y0 < 0.0 {
            return None;
        }

        let col = (x0 / 2.0).floor() as u16;
        let row = (y0 / 4.0).floor() as u16;
        let cols = ((x1 / 2.0).ceil() as u16).saturating_sub(col).max(1);
        let rows = ((y1 / 4.0).ceil() as u16).saturating_sub(row).max(1);

        let mut outline = BrailleCanvas::new(self.cols, self.rows);
        draw_rect(
            &mut outline,
            x0.round() as i32,
            y0.round() as i32,
            x1.round() as i32,
            y1.round() as i32,
        );

        let threshold = self.markers.threshold();
        let mut captions = Vec::with_capacity(2);
        if row > 0 {
            captions.push((col, row - 1, "0 ppp".to_string()));
        }
        let (bx, _) = transform.apply(legend.x - 15.0, legend.y + legend.height);
        let bottom_col = (bx / 2.0).floor().max(0.0) as u16;
        captions.push((bottom_col, row + rows, format!(">{} ppp", threshold as i64)));

        Some(LegendLayout {
            col,
            row,
            cols,
            rows,
            outline,
            captions,
        })
    }
}
