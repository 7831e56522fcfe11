//! The candidate-region catalog: a built-in set of regions to rank, loading
//! of user-supplied catalogs from CSV, and the spatial-index implementations
//! that let the locator treat regions as R-tree points.

use crate::regions::error::RegionError;
use crate::types::place::{LatLon, Place};
use log::warn;
use polars::prelude::*;
use rstar::{PointDistance, RTreeObject, AABB};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// One candidate from the fixed set of regions evaluated for ranking.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Region {
    pub name: String,
    pub coordinate: LatLon,
}

impl Region {
    pub fn new(name: impl Into<String>, coordinate: LatLon) -> Self {
        Self {
            name: name.into(),
            coordinate,
        }
    }

    /// The region as a named [`Place`], the form the pipeline works with.
    pub fn place(&self) -> Place {
        Place::named(self.coordinate, self.name.clone())
    }

    /// The built-in candidate set: twelve major Indian regions.
    ///
    /// Used whenever the caller does not supply a catalog of their own.
    pub fn builtin() -> Vec<Region> {
        vec![
            Region::new("Delhi", LatLon(28.6139, 77.2090)),
            Region::new("Mumbai", LatLon(19.0760, 72.8777)),
            Region::new("Chennai", LatLon(13.0827, 80.2707)),
            Region::new("Kolkata", LatLon(22.5726, 88.3639)),
            Region::new("Bengaluru", LatLon(12.9716, 77.5946)),
            Region::new("Hyderabad", LatLon(17.3850, 78.4867)),
            Region::new("Ahmedabad", LatLon(23.0225, 72.5714)),
            Region::new("Jaipur", LatLon(26.9124, 75.7873)),
            Region::new("Pune", LatLon(18.5204, 73.8567)),
            Region::new("Lucknow", LatLon(26.8467, 80.9462)),
            Region::new("Bhopal", LatLon(23.2599, 77.4126)),
            Region::new("Nagpur", LatLon(21.1458, 79.0882)),
        ]
    }

    /// Loads a candidate catalog from a CSV file with columns
    /// `region,latitude,longitude`.
    ///
    /// Rows with missing fields or out-of-range coordinates are skipped with
    /// a warning.
    ///
    /// # Errors
    ///
    /// Returns [`RegionError::CsvRead`] when the file cannot be parsed,
    /// [`RegionError::MissingColumn`] when a required column is absent or of
    /// an unusable type, and [`RegionError::NoCandidates`] when no row
    /// survives filtering.
    pub fn load_csv(path: &Path) -> Result<Vec<Region>, RegionError> {
        let df = CsvReadOptions::default()
            .with_has_header(true)
            .try_into_reader_with_file_path(Some(path.to_path_buf()))
            .map_err(|e| RegionError::CsvRead {
                path: path.to_path_buf(),
                source: e,
            })?
            .finish()
            .map_err(|e| RegionError::CsvRead {
                path: path.to_path_buf(),
                source: e,
            })?;

        let names = df
            .column("region")
            .and_then(|c| c.str().map(Clone::clone))
            .map_err(|e| RegionError::MissingColumn {
                path: path.to_path_buf(),
                column: "region",
                source: e,
            })?;
        let latitudes = numeric_column(&df, path, "latitude")?;
        let longitudes = numeric_column(&df, path, "longitude")?;

        let mut regions = Vec::with_capacity(df.height());
        for ((name, lat), lon) in (&names).into_iter().zip(&latitudes).zip(&longitudes) {
            let (Some(name), Some(lat), Some(lon)) = (name, lat, lon) else {
                warn!(
                    "Skipping catalog row with missing fields in {}",
                    path.display()
                );
                continue;
            };
            let coordinate = LatLon(lat, lon);
            if let Err(e) = coordinate.validate() {
                warn!("Skipping region '{}': {}", name, e);
                continue;
            }
            regions.push(Region::new(name, coordinate));
        }

        if regions.is_empty() {
            return Err(RegionError::NoCandidates {
                path: path.to_path_buf(),
            });
        }
        Ok(regions)
    }
}

/// Reads a column as f64, casting when the CSV parser inferred something
/// else (junk cells become nulls and get skipped row-wise).
fn numeric_column(
    df: &DataFrame,
    path: &Path,
    column: &'static str,
) -> Result<Float64Chunked, RegionError> {
    df.column(column)
        .and_then(|c| c.cast(&DataType::Float64))
        .and_then(|c| c.f64().map(Clone::clone))
        .map_err(|e| RegionError::MissingColumn {
            path: path.to_path_buf(),
            column,
            source: e,
        })
}

// --- R-Tree Implementations ---

/// Lets the locator index a `Region` as a point in (latitude, longitude)
/// space.
impl RTreeObject for Region {
    type Envelope = AABB<[f64; 2]>;

    fn envelope(&self) -> Self::Envelope {
        AABB::from_point([self.coordinate.latitude(), self.coordinate.longitude()])
    }
}

/// Squared Euclidean degree distance for R-tree nearest-neighbor ordering.
///
/// An approximation of true ground distance, but fine for picking candidates
/// that a haversine pass then orders precisely.
impl PointDistance for Region {
    fn distance_2(&self, point: &[f64; 2]) -> f64 {
        let dx = self.coordinate.latitude() - point[0];
        let dy = self.coordinate.longitude() - point[1];
        dx * dx + dy * dy
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn builtin_catalog_has_twelve_valid_regions() {
        let regions = Region::builtin();
        assert_eq!(regions.len(), 12);
        for region in &regions {
            assert!(region.coordinate.validate().is_ok(), "{}", region.name);
        }
    }

    #[test]
    fn load_csv_reads_a_well_formed_catalog() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("regions.csv");
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(file, "region,latitude,longitude").unwrap();
        writeln!(file, "Delhi,28.6139,77.2090").unwrap();
        writeln!(file, "Mumbai,19.0760,72.8777").unwrap();
        drop(file);

        let regions = Region::load_csv(&path).unwrap();
        assert_eq!(regions.len(), 2);
        assert_eq!(regions[0].name, "Delhi");
        assert_eq!(regions[1].coordinate, LatLon(19.0760, 72.8777));
    }

    #[test]
    fn load_csv_skips_rows_with_bad_coordinates() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("regions.csv");
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(file, "region,latitude,longitude").unwrap();
        writeln!(file, "Nowhere,95.0,77.0").unwrap();
        writeln!(file, "Delhi,28.6139,77.2090").unwrap();
        drop(file);

        let regions = Region::load_csv(&path).unwrap();
        assert_eq!(regions.len(), 1);
        assert_eq!(regions[0].name, "Delhi");
    }

    #[test]
    fn load_csv_rejects_an_empty_catalog() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("regions.csv");
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(file, "region,latitude,longitude").unwrap();
        writeln!(file, "Nowhere,95.0,77.0").unwrap();
        drop(file);

        let err = Region::load_csv(&path).unwrap_err();
        assert!(matches!(err, RegionError::NoCandidates { .. }));
    }

    #[test]
    fn load_csv_requires_the_region_column() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("regions.csv");
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(file, "name,latitude,longitude").unwrap();
        writeln!(file, "Delhi,28.6139,77.2090").unwrap();
        drop(file);

        let err = Region::load_csv(&path).unwrap_err();
        assert!(matches!(
            err,
            RegionError::MissingColumn {
                column: "region",
                ..
            }
        ));
    }
}
