use super::interval::Interval;
use crate::analysis::ScanOutcome;

/// Turns the gaps between silences into padded sound intervals.
///
/// Output is ordered by start but neighbours may overlap once padded;
/// [`SegmentFinalizer`](super::SegmentFinalizer) resolves that.
#[derive(Debug, Clone, Copy)]
pub struct SoundComposer {
    head_adjust: f64,
    tail_adjust: f64,
}

impl SoundComposer {
    pub fn new(head_adjust: f64, tail_adjust: f64) -> Self {
        SoundComposer {
            head_adjust,
            tail_adjust,
        }
    }

    pub fn compose(&self, scan: &ScanOutcome) -> Vec<Interval> {
        if !scan.heard_sound {
            log::info!("No window rose above the threshold, recording is silent");
            return Vec::new();
        }

        let mut sounds = Vec::with_capacity(scan.silences.len() + 1);
        // The recording start opens the first sound
        let mut open: Option<f64> = Some(0.0);

        for silence in &scan.silences {
            if let Some(start) = open.take() {
                sounds.push(Interval::new(start, silence.start + self.tail_adjust));
            }
            open = Some(silence.end - self.head_adjust);
        }

        match open {
            Some(start) if start == scan.end_time => {
                log::debug!("Recording ends in silence, dropping empty trailing sound");
            }
            Some(start) => sounds.push(Interval::new(start, scan.end_time + self.tail_adjust)),
            None => {}
        }

        log::debug!("Composed {} candidate sound intervals", sounds.len());
        sounds
    }
}
