use std::collections::HashMap;
use std::path::Path;

use anyhow::{Context, Result};

use crate::data::loader::normalize_header;

// ---------------------------------------------------------------------------
// District coordinates
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeoPoint {
    pub latitude: f64,
    pub longitude: f64,
}

/// Resolves a (state, district) pair to map coordinates.
pub trait Geocoder {
    fn locate(&self, region: &str, district: &str) -> Option<GeoPoint>;
}

/// Used when no coordinate table is configured: nothing is placed.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoGeocoder;

impl Geocoder for NoGeocoder {
    fn locate(&self, _region: &str, _district: &str) -> Option<GeoPoint> {
        None
    }
}

/// Coordinate lookup keyed by lower-cased (state, district).
#[derive(Debug, Default, Clone)]
pub struct CoordinateTable {
    points: HashMap<(String, String), GeoPoint>,
}

fn key(region: &str, district: &str) -> (String, String) {
    (region.trim().to_lowercase(), district.trim().to_lowercase())
}

impl CoordinateTable {
    pub fn insert(&mut self, region: &str, district: &str, point: GeoPoint) {
        self.points.insert(key(region, district), point);
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Read a CSV with `state`, `district`, `latitude` and `longitude`
    /// columns. Rows with unparsable or out-of-range coordinates are skipped.
    pub fn from_csv(path: &Path) -> Result<Self> {
        let mut reader = csv::Reader::from_path(path)
            .with_context(|| format!("opening coordinate table {}", path.display()))?;
        let headers: Vec<String> = reader
            .headers()
            .context("reading coordinate headers")?
            .iter()
            .map(normalize_header)
            .collect();

        let column = |names: &[&str]| {
            names
                .iter()
                .find_map(|n| headers.iter().position(|h| h == n))
                .with_context(|| format!("coordinate table missing '{}' column", names[0]))
        };
        let state_idx = column(&["state", "state name"])?;
        let district_idx = column(&["district", "district name"])?;
        let lat_idx = column(&["latitude", "lat"])?;
        let lon_idx = column(&["longitude", "lon", "lng"])?;

        let mut table = CoordinateTable::default();
        let mut skipped = 0usize;

        for (row_no, result) in reader.records().enumerate() {
            let row = result.with_context(|| format!("coordinate row {row_no}"))?;
            let coord = |idx: usize| row.get(idx).and_then(|s| s.trim().parse::<f64>().ok());
            match (coord(lat_idx), coord(lon_idx)) {
                (Some(latitude), Some(longitude))
                    if (-90.0..=90.0).contains(&latitude)
                        && (-180.0..=180.0).contains(&longitude) =>
                {
                    table.insert(
                        row.get(state_idx).unwrap_or(""),
                        row.get(district_idx).unwrap_or(""),
                        GeoPoint {
                            latitude,
                            longitude,
                        },
                    );
                }
                _ => skipped += 1,
            }
        }

        if skipped > 0 {
            log::warn!(
                "Skipped {skipped} rows with invalid coordinates in {}",
                path.display()
            );
        }
        log::info!(
            "Loaded {} district coordinates from {}",
            table.len(),
            path.display()
        );
        Ok(table)
    }
}

impl Geocoder for CoordinateTable {
    fn locate(&self, region: &str, district: &str) -> Option<GeoPoint> {
        self.points.get(&key(region, district)).copied()
    }
}
