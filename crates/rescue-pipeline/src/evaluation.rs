//! Batch accuracy against ground truth
//!
//! Location accuracy uses exact equality. The containment rate ("actual is a
//! substring of predicted") is reported separately because the fallback name
//! can contain a real landmark name and inflate it.

use rescue_domain::{DispatchRecord, Ticket, QUANTITY_NOT_GIVEN};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::triage::round2;

/// Accuracy metrics in `[0, 1]`; `None` when no row had the ground truth
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AccuracyReport {
    pub tickets: usize,
    pub need_accuracy: Option<f64>,
    pub location_accuracy: Option<f64>,
    pub location_containment_rate: Option<f64>,
    pub quantity_extraction_rate: Option<f64>,
    /// Mean of the available need, location and quantity metrics
    pub overall: Option<f64>,
}

#[derive(Default)]
struct Tally {
    hits: usize,
    total: usize,
}

impl Tally {
    fn record(&mut self, hit: bool) {
        self.total += 1;
        if hit {
            self.hits += 1;
        }
    }

    fn rate(&self) -> Option<f64> {
        (self.total > 0).then(|| self.hits as f64 / self.total as f64)
    }
}

/// Score records against the tickets they were produced from
///
/// Pairs are matched by position; extra entries on either side are ignored.
pub fn evaluate(tickets: &[Ticket], records: &[DispatchRecord]) -> AccuracyReport {
    if tickets.len() != records.len() {
        warn!(
            "Evaluating {} tickets against {} records; extra rows ignored",
            tickets.len(),
            records.len()
        );
    }

    let mut need = Tally::default();
    let mut location = Tally::default();
    let mut containment = Tally::default();
    let mut quantity = Tally::default();

    for (ticket, record) in tickets.iter().zip(records) {
        if let Some(expected) = &ticket.expected_need {
            need.record(record.need.label() == expected);
        }
        if let Some(expected) = &ticket.expected_location {
            location.record(record.location == *expected);
            containment.record(record.location.contains(expected.as_str()));
        }

        let has_digits = ticket.text.chars().any(|c| c.is_ascii_digit());
        quantity.record(!has_digits || record.quantity != QUANTITY_NOT_GIVEN);
    }

    let primary: Vec<f64> = [need.rate(), location.rate(), quantity.rate()]
        .into_iter()
        .flatten()
        .collect();
    let overall = (!primary.is_empty()).then(|| primary.iter().sum::<f64>() / primary.len() as f64);

    let report = AccuracyReport {
        tickets: quantity.total,
        need_accuracy: need.rate(),
        location_accuracy: location.rate(),
        location_containment_rate: containment.rate(),
        quantity_extraction_rate: quantity.rate(),
        overall,
    };

    info!(
        "Evaluated {} tickets: need={:?} location={:?} quantity={:?}",
        report.tickets,
        report.need_accuracy.map(round2),
        report.location_accuracy.map(round2),
        report.quantity_extraction_rate.map(round2)
    );
    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use rescue_domain::{Coordinates, Need, ResourceAssignment, TriageColor};

    fn record(need: Need, location: &str, quantity: &str, text: &str) -> DispatchRecord {
        DispatchRecord {
            need,
            location: location.to_string(),
            coordinates: Coordinates::new(13.0, 80.0),
            quantity: quantity.to_string(),
            urgency_score: 10.0,
            triage: TriageColor::Green,
            assignment: ResourceAssignment::NoResourceDb,
            original_text: text.to_string(),
        }
    }

    #[test]
    fn test_metrics() {
        let tickets = vec![
            Ticket::new("3 people in adyar").with_ground_truth(Some("food"), Some("adyar")),
            Ticket::new("fire at 2nd street")
                .with_ground_truth(Some("fire engine"), Some("general")),
        ];
        let records = vec![
            record(Need::Food, "adyar", "3 people", "3 people in adyar"),
            record(
                Need::Ambulance,
                "chennai general",
                "not given",
                "fire at 2nd street",
            ),
        ];

        let report = evaluate(&tickets, &records);
        assert_eq!(report.tickets, 2);
        assert_eq!(report.need_accuracy, Some(0.5));
        assert_eq!(report.location_accuracy, Some(0.5));
        // The fallback name contains "general"
        assert_eq!(report.location_containment_rate, Some(1.0));
        assert_eq!(report.quantity_extraction_rate, Some(0.5));
        assert_eq!(report.overall, Some(0.5));
    }

    #[test]
    fn test_rows_without_ground_truth_excluded() {
        let tickets = vec![Ticket::new("help please")];
        let records = vec![record(Need::Food, "chennai general", "not given", "help please")];

        let report = evaluate(&tickets, &records);
        assert_eq!(report.need_accuracy, None);
        assert_eq!(report.location_accuracy, None);
        // No digits in the text, so "not given" is correct
        assert_eq!(report.quantity_extraction_rate, Some(1.0));
        assert_eq!(report.overall, Some(1.0));
    }

    #[test]
    fn test_empty() {
        let report = evaluate(&[], &[]);
        assert_eq!(report, AccuracyReport::default());
    }
}
