//! Ticket table loader

use std::{io::Read, path::Path};

use rescue_domain::Ticket;
use tracing::debug;

use crate::{
    error::Result,
    knowledge::loader::{cell, open_source, Columns},
};

const TEXT_COLUMN: &str = "text";
const SERIAL_COLUMN: &str = "s.no";
const NEED_COLUMN: &str = "need";
const LOCATION_COLUMN: &str = "location_mentioned";

/// Read tickets in table order
///
/// The text cell is kept verbatim. Only `text` is required. `need` and
/// `location_mentioned`, when present, become ground truth; a missing `s.no`
/// defaults to the 1-based row number.
pub fn read_tickets<R: Read>(reader: R, table: &str) -> Result<Vec<Ticket>> {
    let mut reader = csv::Reader::from_reader(reader);
    let columns = Columns::read(&mut reader, table)?;
    let text_col = columns.require(TEXT_COLUMN)?;
    let serial_col = columns.find(SERIAL_COLUMN);
    let need_col = columns.find(NEED_COLUMN);
    let location_col = columns.find(LOCATION_COLUMN);

    let mut tickets = Vec::new();
    for (i, record) in reader.records().enumerate() {
        let record = record?;
        let row = i + 1;

        let text = record.get(text_col).unwrap_or_default();
        let serial = cell(&record, serial_col)
            .map(str::to_string)
            .unwrap_or_else(|| row.to_string());

        tickets.push(
            Ticket::new(text)
                .with_serial(serial)
                .with_ground_truth(cell(&record, need_col), cell(&record, location_col)),
        );
    }

    debug!("Read {} tickets from {}", tickets.len(), table);
    Ok(tickets)
}

/// Load tickets from a CSV file
pub fn load_tickets(path: &Path) -> Result<Vec<Ticket>> {
    read_tickets(open_source(path)?, &path.display().to_string())
}
