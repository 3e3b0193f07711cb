mod geometry;
mod markers;
mod projection;
mod region;
mod renderer;

pub use markers::{fill_ratio, ramp_color, Marker, MarkerRegistry, Upsert};
pub use projection::{CoordinateMapper, MapTransform};
pub use region::RegionGeometry;
pub use renderer::{LegendLayout, MapLayers, MapView, MarkerLayer};
