use serde::{Deserialize, Serialize};

/// A time range in seconds within the source recording.
/// Used for both silences and sound segments.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Interval {
    pub start: f64,
    pub end: f64,
}

impl Interval {
    pub fn new(start: f64, end: f64) -> Self {
        Interval { start, end }
    }

    /// Returns the duration of this interval in seconds
    pub fn length(&self) -> f64 {
        self.end - self.start
    }

    pub fn contains(&self, time: f64) -> bool {
        time >= self.start && time < self.end
    }

    /// Converts the boundaries to sample indices at `sample_rate`.
    /// Head padding can put a start before the recording; it maps to sample 0.
    pub fn to_samples(&self, sample_rate: u32) -> (i64, i64) {
        let rate = sample_rate as f64;
        (
            ((self.start * rate).round() as i64).max(0),
            ((self.end * rate).round() as i64).max(0),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_interval_length() {
        let interval = Interval::new(2.5, 7.5);
        assert_eq!(interval.length(), 5.0);
    }

    #[test]
    fn test_contains_is_half_open() {
        let interval = Interval::new(10.0, 20.0);
        assert!(interval.contains(10.0));
        assert!(interval.contains(15.0));
        assert!(!interval.contains(20.0));
    }

    #[test]
    fn test_to_samples_rounds() {
        let interval = Interval::new(3.8, 6.7);
        assert_eq!(interval.to_samples(8000), (30400, 53600));
    }

    #[test]
    fn test_to_samples_clamps_padded_start() {
        let interval = Interval::new(-1.0, 3.0);
        assert_eq!(interval.to_samples(8000), (0, 24000));
    }
}
