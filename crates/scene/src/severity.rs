use serde::Serialize;

use crate::components::Rgb;

/// Scores at or above this are `High`.
pub const HIGH_THRESHOLD: f64 = 60.0;
/// Scores at or above this (and below `HIGH_THRESHOLD`) are `Medium`.
pub const MEDIUM_THRESHOLD: f64 = 40.0;

/// Three-bucket stability scale driving marker color.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    High,
    Medium,
    Low,
}

impl Severity {
    /// Buckets a stability index. Both boundaries are inclusive; NaN is `Low`.
    pub fn classify(stability_index: f64) -> Self {
        if stability_index >= HIGH_THRESHOLD {
            Severity::High
        } else if stability_index >= MEDIUM_THRESHOLD {
            Severity::Medium
        } else {
            Severity::Low
        }
    }

    pub fn color(self) -> Rgb {
        match self {
            Severity::High => Rgb(0x00ff9d),
            Severity::Medium => Rgb(0xffee00),
            Severity::Low => Rgb(0xff0055),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Severity::High => "high",
            Severity::Medium => "medium",
            Severity::Low => "low",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Severity;

    #[test]
    fn high_boundary_is_inclusive() {
        assert_eq!(Severity::classify(60.0), Severity::High);
        assert_eq!(Severity::classify(59.999), Severity::Medium);
    }

    #[test]
    fn medium_boundary_is_inclusive() {
        assert_eq!(Severity::classify(40.0), Severity::Medium);
        assert_eq!(Severity::classify(39.999), Severity::Low);
    }

    #[test]
    fn extremes_and_nan() {
        assert_eq!(Severity::classify(100.0), Severity::High);
        assert_eq!(Severity::classify(0.0), Severity::Low);
        assert_eq!(Severity::classify(-5.0), Severity::Low);
        assert_eq!(Severity::classify(f64::NAN), Severity::Low);
    }

    #[test]
    fn each_bucket_has_a_distinct_color() {
        let colors = [
            Severity::High.color(),
            Severity::Medium.color(),
            Severity::Low.color(),
        ];
        assert_ne!(colors[0], colors[1]);
        assert_ne!(colors[1], colors[2]);
        assert_ne!(colors[0], colors[2]);
    }
}
