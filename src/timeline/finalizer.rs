use super::interval::Interval;

/// Merges overlapping padded sounds and drops fragments that are too short.
///
/// A candidate overlapping the previous kept segment is absorbed into it
/// whatever its own length; only non-overlapping candidates face the length test.
#[derive(Debug, Clone, Copy)]
pub struct SegmentFinalizer {
    min_sound_length: f64,
}

impl SegmentFinalizer {
    pub fn new(min_sound_length: f64) -> Self {
        SegmentFinalizer { min_sound_length }
    }

    pub fn finalize(&self, candidates: &[Interval]) -> Vec<Interval> {
        let mut segments: Vec<Interval> = Vec::with_capacity(candidates.len());

        for candidate in candidates {
            if let Some(last) = segments.last_mut() {
                if last.end > candidate.start {
                    // Same as taking candidate.end for composer output, whose ends only grow
                    last.end = last.end.max(candidate.end);
                    continue;
                }
            }

            if candidate.length() > self.min_sound_length {
                segments.push(*candidate);
            } else {
                log::debug!(
                    "Dropping short sound {:.2}s - {:.2}s ({:.2}s)",
                    candidate.start,
                    candidate.end,
                    candidate.length()
                );
            }
        }

        segments
    }
}
