use scene::components::EventData;
use scene::radiant::Radiant;
use tracing::debug;

use crate::history::HistoricalEvent;

/// Spawns one marker per qualifying event. Returns the marker count.
pub fn ingest_history(radiant: &mut Radiant, events: &[HistoricalEvent]) -> usize {
    let data: Vec<EventData> = events
        .iter()
        .filter(|e| e.is_major())
        .map(HistoricalEvent::to_event_data)
        .collect();
    debug!(
        total = events.len(),
        qualifying = data.len(),
        "ingesting history"
    );
    radiant.load_events(&data)
}

/// Parses `text` and ingests it; a malformed document leaves zero markers.
pub fn ingest_history_text(radiant: &mut Radiant, text: &str) -> usize {
    match crate::history::parse_history(text) {
        Ok(events) => ingest_history(radiant, &events),
        Err(err) => {
            radiant.load_failed(&err.to_string());
            0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{ingest_history, ingest_history_text};
    use crate::history::parse_history;
    use scene::config::RadiantConfig;
    use scene::radiant::Radiant;
    use scene::severity::Severity;

    fn radiant() -> Radiant {
        Radiant::new(RadiantConfig::default(), 800.0, 600.0)
    }

    #[test]
    fn three_event_example_yields_high_and_medium() {
        let events = parse_history(
            r#"[{"year": -50, "stability_index": 70, "description": "A"},
                {"year": 100, "stability_index": 45, "description": "B"},
                {"year": 500, "stability_index": 10, "description": ""}]"#,
        )
        .expect("parse");
        let mut radiant = radiant();
        assert_eq!(ingest_history(&mut radiant, &events), 2);

        let markers = radiant.world().markers();
        assert_eq!(markers.len(), 2);
        assert_eq!(markers[0].severity, Severity::High);
        assert_eq!(markers[0].visual.color, Severity::High.color());
        assert_eq!(markers[1].severity, Severity::Medium);
        assert_eq!(markers[1].data.year, "100");
    }

    #[test]
    fn malformed_resource_gives_zero_markers() {
        let mut radiant = radiant();
        assert_eq!(ingest_history_text(&mut radiant, r#"{"not": "an array"}"#), 0);
        assert_eq!(radiant.event_count(), 0);
        assert_eq!(radiant.world().drawables().len(), 4);
    }

    #[test]
    fn incomplete_records_still_get_markers() {
        let mut radiant = radiant();
        let count = ingest_history_text(
            &mut radiant,
            r#"[{"year": 1969, "stability_index": 75, "description": "Moon landing"},
                {"year": 1929, "description": "Market crash"},
                {"year": 1945, "stability_index": 30, "description": 5},
                {"year": null, "stability_index": 50, "description": "Undated"}]"#,
        );
        assert_eq!(count, 3);

        let markers = radiant.world().markers();
        let severities: Vec<Severity> = markers.iter().map(|m| m.severity).collect();
        assert_eq!(severities, vec![Severity::High, Severity::Low, Severity::Medium]);
        assert_eq!(markers[1].data.score_label(), "CES: n/a");
        assert_eq!(markers[2].data.year, "");
    }

    #[test]
    fn marker_count_matches_qualifying_events() {
        let text = (0..50)
            .map(|i| {
                let desc = if i % 3 == 0 { "" } else { "event" };
                format!(r#"{{"year": {i}, "stability_index": {}, "description": "{desc}"}}"#, i * 2)
            })
            .collect::<Vec<_>>()
            .join(",");
        let mut radiant = radiant();
        let count = ingest_history_text(&mut radiant, &format!("[{text}]"));
        assert_eq!(count, 33);
        assert_eq!(radiant.event_count(), 33);
    }
}
