/// The slice of a historical event a marker carries for tooltips and logs.
#[derive(Debug, Clone, PartialEq)]
pub struct EventData {
    /// Year as it should be displayed (`"-50"`, `"1969"`).
    pub year: String,
    pub score: f64,
    pub description: String,
}

impl EventData {
    pub fn new(year: impl Into<String>, score: f64, description: impl Into<String>) -> Self {
        Self {
            year: year.into(),
            score,
            description: description.into(),
        }
    }

    /// `CES: 70%` style score label; `CES: n/a` when the event has no score.
    pub fn score_label(&self) -> String {
        if self.score.is_finite() {
            format!("CES: {}%", self.score)
        } else {
            "CES: n/a".to_string()
        }
    }
}
