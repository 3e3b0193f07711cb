use chrono::{DateTime, Local};
use std::collections::BTreeMap;
use std::fmt;
use thiserror::Error;

/// Accepted longitude range for a plant (coarse bounding box)
pub const SITE_LON_RANGE: (f64, f64) = (7.0, 10.0);
/// Accepted latitude range for a plant (coarse bounding box)
pub const SITE_LAT_RANGE: (f64, f64) = (47.0, 50.0);

#[derive(Debug, Error, PartialEq)]
pub enum SiteError {
    #[error("expected 4 fields separated by ';', found {0}")]
    FieldCount(usize),
    #[error("invalid population {0:?}")]
    Population(String),
    #[error("invalid coordinate {0:?}")]
    Coordinate(String),
    #[error("out of bounds: {lon} {lat}")]
    OutOfBounds { lon: f64, lat: f64 },
}

/// Stable identity of a plant, assigned in load order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SiteId(pub usize);

/// A sewage plant reporting measurements
#[derive(Debug, Clone, PartialEq)]
pub struct Site {
    pub id: SiteId,
    pub name: String,
    pub population: u64,
    pub lon: f64,
    pub lat: f64,
}

impl Site {
    pub fn new(id: SiteId, name: &str, population: u64, lon: f64, lat: f64) -> Result<Self, SiteError> {
        let (min_lon, max_lon) = SITE_LON_RANGE;
        let (min_lat, max_lat) = SITE_LAT_RANGE;
        // Negated range checks so NaN is rejected as well
        if !(lon >= min_lon && lon <= max_lon && lat >= min_lat && lat <= max_lat) {
            return Err(SiteError::OutOfBounds { lon, lat });
        }
        Ok(Self {
            id,
            name: name.to_string(),
            population,
            lon,
            lat,
        })
    }

    /// Window/tab title: name and population served
    pub fn title(&self) -> String {
        format!("{} ({} people)", self.name, self.population)
    }
}

/// Tracked variant labels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Category {
    Alpha,
    Beta,
    Gamma,
    Delta,
    Lambda,
}

impl Category {
    pub const ALL: [Category; 5] = [
        Category::Alpha,
        Category::Beta,
        Category::Gamma,
        Category::Delta,
        Category::Lambda,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Category::Alpha => "ALPHA",
            Category::Beta => "BETA",
            Category::Gamma => "GAMMA",
            Category::Delta => "DELTA",
            Category::Lambda => "LAMBDA",
        }
    }

    /// Pango lineage designation
    pub fn designation(self) -> &'static str {
        match self {
            Category::Alpha => "B.1.1.7",
            Category::Beta => "B.1.351",
            Category::Gamma => "P.1",
            Category::Delta => "B.1.617",
            Category::Lambda => "C.37",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name(), self.designation())
    }
}

/// One submission from a plant: a count per category
#[derive(Debug, Clone)]
pub struct Measurement {
    pub site: Site,
    pub recorded_at: DateTime<Local>,
    pub values: BTreeMap<Category, u32>,
}

impl Measurement {
    pub fn new(site: Site, values: BTreeMap<Category, u32>) -> Self {
        Self::at(site, Local::now(), values)
    }

    pub fn at(site: Site, recorded_at: DateTime<Local>, values: BTreeMap<Category, u32>) -> Self {
        Self {
            site,
            recorded_at,
            values,
        }
    }

    /// Sum over all categories
    pub fn total(&self) -> u64 {
        self.values.values().map(|&v| v as u64).sum()
    }

    /// Value for a category (0 when the category was not submitted)
    pub fn value(&self, category: Category) -> u32 {
        self.values.get(&category).copied().unwrap_or(0)
    }

    /// Log line: `<name> (<timestamp>): {<category>=<value>, ...}`
    pub fn log_line(&self) -> String {
        let values = self
            .values
            .iter()
            .map(|(category, value)| format!("{category}={value}"))
            .collect::<Vec<_>>()
            .join(", ");
        format!(
            "{} ({}): {{{}}}",
            self.site.name,
            self.recorded_at.format("%Y-%m-%d %H:%M:%S"),
            values
        )
    }
}
