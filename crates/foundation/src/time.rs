/// Time primitives
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Time(pub f64); // seconds

impl Time {
    pub fn from_millis(ms: f64) -> Self {
        Self(ms / 1000.0)
    }
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct TimeSpan {
    pub start: Time,
    pub end: Time,
}

impl TimeSpan {
    pub fn starting_at(start: Time, duration_s: f64) -> Self {
        Self {
            start,
            end: Time(start.0 + duration_s.max(0.0)),
        }
    }

    /// True once `now` has reached the end of the span.
    pub fn has_elapsed(&self, now: Time) -> bool {
        now.0 >= self.end.0
    }
}

#[cfg(test)]
mod tests {
    use super::{Time, TimeSpan};

    #[test]
    fn from_millis_converts_to_seconds() {
        assert_eq!(Time::from_millis(200.0), Time(0.2));
        assert_eq!(Time::from_millis(1500.0), Time(1.5));
    }

    #[test]
    fn span_elapses_at_end_inclusive() {
        let span = TimeSpan::starting_at(Time(10.0), 0.2);
        assert!(!span.has_elapsed(Time(10.1)));
        assert!(span.has_elapsed(span.end));
        assert!(span.has_elapsed(Time(11.0)));
    }

    #[test]
    fn negative_duration_clamps_to_zero() {
        let span = TimeSpan::starting_at(Time(3.0), -1.0);
        assert_eq!(span.end, span.start);
        assert!(span.has_elapsed(Time(3.0)));
    }
}
