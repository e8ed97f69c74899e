use foundation::time::Time;

/// Deterministic frame metadata.
///
/// One `Frame` per display refresh. Rotation and pulse advance per frame, not
/// per second, so a recorded frame sequence replays identically.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Frame {
    /// 0-based frame index.
    pub index: u64,
    /// Nominal delta time (seconds).
    pub dt_s: f64,
    /// Nominal time at the start of the frame (seconds).
    pub time: Time,
}

impl Frame {
    pub const DEFAULT_DT_S: f64 = 1.0 / 60.0;

    pub fn new(index: u64, dt_s: f64) -> Self {
        Self {
            index,
            dt_s,
            time: Time(index as f64 * dt_s),
        }
    }

    pub fn first() -> Self {
        Self::new(0, Self::DEFAULT_DT_S)
    }

    pub fn next(self) -> Self {
        Self::new(self.index.wrapping_add(1), self.dt_s)
    }
}
