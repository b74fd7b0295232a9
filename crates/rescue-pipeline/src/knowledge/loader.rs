//! CSV loaders for the knowledge and resource tables
//!
//! Header names are trimmed and lowercased before lookup, so `" Lat_Long"`
//! and `"lat_long"` name the same column.

use std::{
    collections::BTreeSet,
    fs::File,
    io::{self, Read},
    path::Path,
};

use csv::StringRecord;
use rescue_domain::{Coordinates, ResourceCenter};
use tracing::debug;

use super::ResourceTable;
use crate::error::{PipelineError, Result};

const LANDMARK_COLUMN: &str = "location_mentioned";
const LAT_LONG_COLUMN: &str = "lat_long";

const RESOURCE_NAME_COLUMN: &str = "location";
const RESOURCE_LAT_COLUMN: &str = "latitude";
const RESOURCE_LON_COLUMN: &str = "longitude";

/// One landmark mention read from the knowledge table
#[derive(Debug, Clone, PartialEq)]
pub struct LandmarkRecord {
    pub name: String,
    pub coordinates: Option<Coordinates>,
}

/// Open a required input file, reporting a missing file distinctly
pub(crate) fn open_source(path: &Path) -> Result<File> {
    File::open(path).map_err(|e| match e.kind() {
        io::ErrorKind::NotFound => PipelineError::MissingSource {
            path: path.to_path_buf(),
        },
        _ => PipelineError::Io {
            path: path.to_path_buf(),
            source: e,
        },
    })
}

/// Normalized header row with column lookup
pub(crate) struct Columns {
    table: String,
    names: Vec<String>,
}

impl Columns {
    pub(crate) fn read<R: Read>(reader: &mut csv::Reader<R>, table: &str) -> Result<Self> {
        let names = reader
            .headers()?
            .iter()
            .map(|h| h.trim().to_lowercase())
            .collect();
        Ok(Self {
            table: table.to_string(),
            names,
        })
    }

    pub(crate) fn find(&self, column: &str) -> Option<usize> {
        self.names.iter().position(|n| n == column)
    }

    pub(crate) fn require(&self, column: &str) -> Result<usize> {
        self.find(column).ok_or_else(|| PipelineError::MissingColumn {
            column: column.to_string(),
            table: self.table.clone(),
        })
    }

    pub(crate) fn invalid(&self, row: usize, reason: impl Into<String>) -> PipelineError {
        PipelineError::InvalidValue {
            table: self.table.clone(),
            row,
            reason: reason.into(),
        }
    }
}

/// Cell text with missing-value markers mapped to `None`
pub(crate) fn cell<'r>(record: &'r StringRecord, index: Option<usize>) -> Option<&'r str> {
    index
        .and_then(|i| record.get(i))
        .map(str::trim)
        .filter(|v| !v.is_empty() && !v.eq_ignore_ascii_case("nan"))
}

/// Read landmark mentions from a knowledge table
pub fn read_landmarks<R: Read>(reader: R, table: &str) -> Result<Vec<LandmarkRecord>> {
    let mut reader = csv::Reader::from_reader(reader);
    let columns = Columns::read(&mut reader, table)?;
    let name_col = columns.require(LANDMARK_COLUMN)?;
    let coord_col = columns.require(LAT_LONG_COLUMN)?;

    let mut landmarks = Vec::new();
    for (i, record) in reader.records().enumerate() {
        let record = record?;
        let row = i + 1;

        let Some(name) = cell(&record, Some(name_col)) else {
            continue;
        };
        let coordinates = cell(&record, Some(coord_col))
            .map(Coordinates::parse_pair)
            .transpose()
            .map_err(|e| columns.invalid(row, e.to_string()))?;

        landmarks.push(LandmarkRecord {
            name: name.to_lowercase(),
            coordinates,
        });
    }

    debug!("Read {} landmark mentions from {}", landmarks.len(), table);
    Ok(landmarks)
}

/// Load landmark mentions from a knowledge CSV file
pub fn load_landmarks(path: &Path) -> Result<Vec<LandmarkRecord>> {
    read_landmarks(open_source(path)?, &path.display().to_string())
}

/// Read a resource table
///
/// `location`, `latitude` and `longitude` are required; every other column
/// is a capability holding a non-negative unit count (empty means 0).
pub fn read_resources<R: Read>(reader: R, table: &str) -> Result<ResourceTable> {
    let mut reader = csv::Reader::from_reader(reader);
    let columns = Columns::read(&mut reader, table)?;
    let name_col = columns.require(RESOURCE_NAME_COLUMN)?;
    let lat_col = columns.require(RESOURCE_LAT_COLUMN)?;
    let lon_col = columns.require(RESOURCE_LON_COLUMN)?;

    let capability_cols: Vec<(usize, String)> = columns
        .names
        .iter()
        .enumerate()
        .filter(|(i, name)| ![name_col, lat_col, lon_col].contains(i) && !name.is_empty())
        .map(|(i, name)| (i, name.clone()))
        .collect();

    let mut centers = Vec::new();
    for (i, record) in reader.records().enumerate() {
        let record = record?;
        let row = i + 1;

        let name = cell(&record, Some(name_col))
            .ok_or_else(|| columns.invalid(row, "missing center name"))?;
        let latitude = parse_degrees(&columns, &record, lat_col, row)?;
        let longitude = parse_degrees(&columns, &record, lon_col, row)?;
        let coordinates = Coordinates::validated(latitude, longitude)
            .map_err(|e| columns.invalid(row, e.to_string()))?;

        let mut center = ResourceCenter::new(name, coordinates);
        for (col, need) in &capability_cols {
            let units = match cell(&record, Some(*col)) {
                Some(raw) => parse_units(raw).ok_or_else(|| {
                    columns.invalid(row, format!("{}: bad capacity {:?}", need, raw))
                })?,
                None => 0,
            };
            center = center.with_capacity(need, units);
        }
        centers.push(center);
    }

    debug!(
        "Read {} resource centers with {} capabilities from {}",
        centers.len(),
        capability_cols.len(),
        table
    );

    Ok(ResourceTable {
        centers,
        capabilities: capability_cols.into_iter().map(|(_, n)| n).collect::<BTreeSet<_>>(),
    })
}

/// Load a resource table from a CSV file
pub fn load_resources(path: &Path) -> Result<ResourceTable> {
    read_resources(open_source(path)?, &path.display().to_string())
}

fn parse_degrees(columns: &Columns, record: &StringRecord, col: usize, row: usize) -> Result<f64> {
    let raw = cell(record, Some(col)).ok_or_else(|| columns.invalid(row, "missing coordinate"))?;
    raw.parse::<f64>()
        .map_err(|e| columns.invalid(row, format!("{:?}: {}", raw, e)))
}

/// Non-negative whole unit counts; integral floats such as `"3.0"` are accepted
fn parse_units(raw: &str) -> Option<u32> {
    if let Ok(units) = raw.parse::<u32>() {
        return Some(units);
    }
    let value = raw.parse::<f64>().ok()?;
    (value.is_finite() && value >= 0.0 && value.fract() == 0.0 && value <= u32::MAX as f64)
        .then_some(value as u32)
}
