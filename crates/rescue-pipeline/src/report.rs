//! Dispatch report rows and CSV output

use std::{fs::File, io::Write, path::Path};

use rescue_domain::{DispatchRecord, Ticket, TriageColor};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::{PipelineError, Result};

/// One output row, in the report's column order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DispatchReportRow {
    #[serde(rename = "S.No")]
    pub serial: String,
    #[serde(rename = "Triage_Level")]
    pub triage_level: TriageColor,
    #[serde(rename = "Urgency_Score")]
    pub urgency_score: f64,
    #[serde(rename = "Predicted_Need")]
    pub predicted_need: String,
    #[serde(rename = "Quantity")]
    pub quantity: String,
    #[serde(rename = "Predicted_Location")]
    pub predicted_location: String,
    #[serde(rename = "Latitude")]
    pub latitude: f64,
    #[serde(rename = "Longitude")]
    pub longitude: f64,
    #[serde(rename = "Assigned_Resource_Center")]
    pub assigned_resource_center: String,
    #[serde(rename = "Distance_km")]
    pub distance_km: f64,
    #[serde(rename = "Original_Text")]
    pub original_text: String,
}

impl DispatchReportRow {
    pub fn from_record(serial: String, record: &DispatchRecord) -> Self {
        Self {
            serial,
            triage_level: record.triage,
            urgency_score: record.urgency_score,
            predicted_need: record.need.to_string(),
            quantity: record.quantity.clone(),
            predicted_location: record.location.clone(),
            latitude: record.coordinates.latitude,
            longitude: record.coordinates.longitude,
            assigned_resource_center: record.assignment.center_name().to_string(),
            distance_km: record.assignment.distance_km(),
            original_text: record.original_text.clone(),
        }
    }
}

/// Pair records with their tickets and sort by urgency, highest first
///
/// The sort is stable: equal scores keep input order.
pub fn build_report(tickets: &[Ticket], records: &[DispatchRecord]) -> Vec<DispatchReportRow> {
    let mut rows: Vec<DispatchReportRow> = records
        .iter()
        .enumerate()
        .map(|(i, record)| {
            let serial = tickets
                .get(i)
                .and_then(|t| t.serial.clone())
                .unwrap_or_else(|| (i + 1).to_string());
            DispatchReportRow::from_record(serial, record)
        })
        .collect();

    rows.sort_by(|a, b| b.urgency_score.total_cmp(&a.urgency_score));
    rows
}

/// Write rows as CSV with a header line
pub fn write_report<W: Write>(writer: W, rows: &[DispatchReportRow]) -> Result<()> {
    let mut writer = csv::Writer::from_writer(writer);
    for row in rows {
        writer.serialize(row)?;
    }
    writer.flush().map_err(csv::Error::from)?;
    Ok(())
}

/// Write the report to `path`, replacing any existing file
pub fn save_report(path: &Path, rows: &[DispatchReportRow]) -> Result<()> {
    let file = File::create(path).map_err(|e| PipelineError::Io {
        path: path.to_path_buf(),
        source: e,
    })?;
    write_report(file, rows)?;
    info!("Wrote {} report rows to {}", rows.len(), path.display());
    Ok(())
}
