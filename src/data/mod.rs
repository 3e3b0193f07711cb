use crate::map::RegionGeometry;
use crate::model::{Site, SiteError, SiteId};
use anyhow::{bail, Context, Result};
use geojson::{GeoJson, Geometry, Value};
use rand::seq::SliceRandom;
use rand::Rng;
use std::fs;
use std::path::Path;
use tracing::{info, warn};

/// Load plants from a `name;population;longitude;latitude` file
pub fn load_sites(path: &Path) -> Result<Vec<Site>> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read plant file: {:?}", path))?;
    let sites = parse_sites(&content);
    info!(path = %path.display(), count = sites.len(), "plants loaded");
    Ok(sites)
}

/// Parse every line, skipping (and reporting) malformed or out-of-bounds ones.
/// Ids are assigned in order of acceptance.
pub fn parse_sites(content: &str) -> Vec<Site> {
    let mut sites = Vec::new();
    for (line_no, line) in content.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        match parse_site_line(SiteId(sites.len()), line) {
            Ok(site) => sites.push(site),
            Err(e) => warn!(line = line_no + 1, text = line, error = %e, "skipping plant"),
        }
    }
    sites
}

pub fn parse_site_line(id: SiteId, line: &str) -> Result<Site, SiteError> {
    let parts: Vec<&str> = line.split(';').map(str::trim).collect();
    if parts.len() != 4 {
        return Err(SiteError::FieldCount(parts.len()));
    }

    let population = parts[1]
        .parse::<u64>()
        .map_err(|_| SiteError::Population(parts[1].to_string()))?;
    let coordinate = |s: &str| {
        s.parse::<f64>()
            .map_err(|_| SiteError::Coordinate(s.to_string()))
    };
    let lon = coordinate(parts[2])?;
    let lat = coordinate(parts[3])?;

    Site::new(id, parts[0], population, lon, lat)
}

/// Random subset of at most `count` plants
pub fn choose_sites<R: Rng + ?Sized>(mut sites: Vec<Site>, count: usize, rng: &mut R) -> Vec<Site> {
    sites.shuffle(rng);
    sites.truncate(count);
    sites
}

/// Load region geometry from GeoJSON. Features are matched by their `role`
/// property (`region`, `enclave`, `lake`); coordinates are reference canvas
/// pixels, not degrees.
pub fn load_region_geometry(path: &Path) -> Result<RegionGeometry> {
    let mut bytes =
        fs::read(path).with_context(|| format!("Failed to read geometry file: {:?}", path))?;
    let geojson: GeoJson = simd_json::serde::from_slice(&mut bytes)
        .with_context(|| format!("Failed to parse GeoJSON: {:?}", path))?;
    region_from_geojson(&geojson)
}

pub fn region_from_geojson(geojson: &GeoJson) -> Result<RegionGeometry> {
    let GeoJson::FeatureCollection(fc) = geojson else {
        bail!("region geometry must be a FeatureCollection");
    };

    let mut region = RegionGeometry::default();
    for feature in &fc.features {
        let role = feature
            .property("role")
            .and_then(|v| v.as_str())
            .unwrap_or_default();
        let Some(ring) = feature.geometry.as_ref().and_then(first_ring) else {
            warn!(role, "feature without usable geometry");
            continue;
        };
        match role {
            "region" => region.outline = ring,
            "enclave" => region.enclave = ring,
            "lake" => region.lake = ring,
            other => warn!(role = other, "ignoring feature with unknown role"),
        }
    }

    if region.is_empty() {
        bail!("no feature with role \"region\"");
    }
    Ok(region)
}

/// Exterior ring of a polygon, or the points of a line
fn first_ring(geometry: &Geometry) -> Option<Vec<(f64, f64)>> {
    let coords = match &geometry.value {
        Value::Polygon(rings) => rings.first()?,
        Value::LineString(line) => line,
        _ => return None,
    };
    let points: Vec<(f64, f64)> = coords
        .iter()
        .filter(|c| c.len() >= 2)
        .map(|c| (c[0], c[1]))
        .collect();
    (!points.is_empty()).then_some(points)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::io::Write;

    #[test]
    fn test_parse_site_line() {
        let site = parse_site_line(SiteId(4), "Bruchsal;50000;8.594;49.142").unwrap();
        assert_eq!(site.id, SiteId(4));
        assert_eq!(site.name, "Bruchsal");
        assert_eq!(site.population, 50_000);
        assert_eq!((site.lon, site.lat), (8.594, 49.142));
    }

    #[test]
    fn test_parse_site_line_errors() {
        assert_eq!(parse_site_line(SiteId(0), "Only;two"), Err(SiteError::FieldCount(2)));
        assert_eq!(
            parse_site_line(SiteId(0), "A;many;8.0;48.0"),
            Err(SiteError::Population("many".into()))
        );
        assert_eq!(
            parse_site_line(SiteId(0), "A;10;east;48.0"),
            Err(SiteError::Coordinate("east".into()))
        );
        assert!(matches!(
            parse_site_line(SiteId(0), "A;10;20.0;60.0"),
            Err(SiteError::OutOfBounds { .. })
        ));
    }

    #[test]
    fn test_parse_sites_skips_bad_lines() {
        let sites = parse_sites("X;1000;8.0;48.0\n\nbroken line\nY;2000;20.0;60.0\nZ;5;9.0;49.0\n");
        let names: Vec<_> = sites.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, ["X", "Z"]);
        assert_eq!(sites[1].id, SiteId(1));
    }

    #[test]
    fn test_load_sites_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "Karlsruhe-Neureut;350000;8.359;49.046").unwrap();
        writeln!(file, "Bruchsal;50000;8.594;49.142").unwrap();
        let sites = load_sites(file.path()).unwrap();
        assert_eq!(sites.len(), 2);

        assert!(load_sites(Path::new("/definitely/not/here.txt")).is_err());
    }

    #[test]
    fn test_choose_sites_takes_subset() {
        let sites = parse_sites("A;1;8.0;48.0\nB;1;8.1;48.0\nC;1;8.2;48.0\nD;1;8.3;48.0");
        let mut rng = StdRng::seed_from_u64(7);
        let chosen = choose_sites(sites.clone(), 3, &mut rng);
        assert_eq!(chosen.len(), 3);
        assert!(chosen.iter().all(|c| sites.contains(c)));

        let all = choose_sites(sites, 10, &mut rng);
        assert_eq!(all.len(), 4);
    }

    #[test]
    fn test_load_region_geometry() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"type":"FeatureCollection","features":[
                {{"type":"Feature","properties":{{"role":"region"}},
                  "geometry":{{"type":"Polygon","coordinates":[[[0,0],[100,0],[100,100],[0,100],[0,0]]]}}}},
                {{"type":"Feature","properties":{{"role":"lake"}},
                  "geometry":{{"type":"LineString","coordinates":[[10,10],[20,10],[20,20]]}}}}
            ]}}"#
        )
        .unwrap();

        let region = load_region_geometry(file.path()).unwrap();
        assert_eq!(region.outline.len(), 5);
        assert_eq!(region.lake, vec![(10.0, 10.0), (20.0, 10.0), (20.0, 20.0)]);
        assert!(region.enclave.is_empty());
    }

    #[test]
    fn test_region_requires_outline() {
        let geojson: GeoJson = r#"{"type":"FeatureCollection","features":[
            {"type":"Feature","properties":{"role":"lake"},
             "geometry":{"type":"LineString","coordinates":[[1,1],[2,2]]}}
        ]}"#
        .parse()
        .unwrap();
        assert!(region_from_geojson(&geojson).is_err());
    }
}
