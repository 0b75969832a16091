use super::interval::Interval;
use serde::{Deserialize, Serialize};

/// Final sound segments of one recording, ordered and non-overlapping
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SegmentList {
    pub segments: Vec<Interval>,
    /// Sample rate the segment times refer to
    pub sample_rate: u32,
}

impl SegmentList {
    pub fn new(segments: Vec<Interval>, sample_rate: u32) -> Self {
        SegmentList {
            segments,
            sample_rate,
        }
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Interval> {
        self.segments.iter()
    }

    /// Returns the combined length of all segments in seconds
    pub fn total_length(&self) -> f64 {
        self.segments.iter().map(Interval::length).sum()
    }

    /// Index of the segment containing `time`, if any
    pub fn segment_at(&self, time: f64) -> Option<usize> {
        self.segments.iter().position(|s| s.contains(time))
    }
}

impl<'a> IntoIterator for &'a SegmentList {
    type Item = &'a Interval;
    type IntoIter = std::slice::Iter<'a, Interval>;

    fn into_iter(self) -> Self::IntoIter {
        self.segments.iter()
    }
}
