//! The history document: a JSON array of yearly events with a stability score.
//!
//! Only `year`, `stability_index` and `description` are read. Extra fields the
//! generator writes (per-pillar breakdowns, notes) are ignored. Records are
//! read one by one: a record with odd fields still counts, and only entries
//! that are not objects at all are dropped.

use std::fmt;

use scene::components::EventData;
use serde_json::{Map, Value};
use tracing::warn;

pub const DEFAULT_HISTORY_URL: &str = "data/history_full_v3.json";

/// A year as written in the document: a number (`-50`) or a string (`"1900"`).
///
/// A missing or `null` year is an empty label.
#[derive(Debug, Clone, PartialEq)]
pub enum Year {
    Number(f64),
    Text(String),
}

impl fmt::Display for Year {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Year::Number(n) => write!(f, "{n}"),
            Year::Text(s) => f.write_str(s),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct HistoricalEvent {
    pub year: Year,
    /// `None` when the record has no usable score; such events bucket as low.
    pub stability_index: Option<f64>,
    pub description: Option<String>,
}

impl HistoricalEvent {
    /// An event gets a marker only if it carries a non-empty description.
    pub fn is_major(&self) -> bool {
        self.description.as_deref().is_some_and(|d| !d.is_empty())
    }

    /// Score used for bucketing; NaN when the record has none.
    pub fn score(&self) -> f64 {
        self.stability_index.unwrap_or(f64::NAN)
    }

    pub fn to_event_data(&self) -> EventData {
        EventData::new(
            self.year.to_string(),
            self.score(),
            self.description.clone().unwrap_or_default(),
        )
    }

    fn from_record(index: usize, fields: &Map<String, Value>) -> Self {
        let year = match fields.get("year") {
            None | Some(Value::Null) => Year::Text(String::new()),
            Some(Value::Number(n)) => match n.as_f64() {
                Some(v) => Year::Number(v),
                None => Year::Text(n.to_string()),
            },
            Some(Value::String(s)) => Year::Text(s.clone()),
            Some(other) => {
                warn!(index, year = %other, "history record has a non-scalar year");
                Year::Text(other.to_string())
            }
        };

        let stability_index = match fields.get("stability_index") {
            None | Some(Value::Null) => None,
            Some(Value::Number(n)) => n.as_f64(),
            Some(Value::String(s)) => s.trim().parse::<f64>().ok(),
            Some(other) => {
                warn!(index, stability_index = %other, "history record has an unreadable score");
                None
            }
        };

        let description = match fields.get("description") {
            None | Some(Value::Null) => None,
            Some(Value::String(s)) => Some(s.clone()),
            Some(other) => {
                warn!(index, description = %other, "history record has a non-text description");
                None
            }
        };

        Self {
            year,
            stability_index,
            description,
        }
    }
}

#[derive(Debug)]
pub enum HistoryError {
    Parse(serde_json::Error),
}

impl fmt::Display for HistoryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HistoryError::Parse(err) => write!(f, "History parse error: {err}"),
        }
    }
}

impl std::error::Error for HistoryError {}

/// Parses the whole document.
///
/// Anything but a JSON array is an error. Array entries that are not objects
/// are skipped with a warning.
pub fn parse_history(text: &str) -> Result<Vec<HistoricalEvent>, HistoryError> {
    let records: Vec<Value> = serde_json::from_str(text).map_err(HistoryError::Parse)?;
    let events = records
        .iter()
        .enumerate()
        .filter_map(|(index, record)| match record.as_object() {
            Some(fields) => Some(HistoricalEvent::from_record(index, fields)),
            None => {
                warn!(index, "skipping history record that is not an object");
                None
            }
        })
        .collect();
    Ok(events)
}

/// Qualifying events, in document order.
pub fn major_events(events: &[HistoricalEvent]) -> Vec<&HistoricalEvent> {
    events.iter().filter(|e| e.is_major()).collect()
}

/// `base` with a `v=<timestamp_ms>` query parameter so every load refetches.
pub fn cache_busted_url(base: &str, timestamp_ms: u64) -> String {
    let sep = if base.contains('?') { '&' } else { '?' };
    format!("{base}{sep}v={timestamp_ms}")
}
