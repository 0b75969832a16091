use super::amplitude::Amplitude;
use crate::timeline::Interval;

/// Whether the scan is currently inside a silence
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ScanState {
    Sounding,
    Silent { since: f64 },
}

/// What a finished scan hands to the composer
#[derive(Debug, Clone, PartialEq)]
pub struct ScanOutcome {
    /// Silences longer than the minimum, in time order
    pub silences: Vec<Interval>,
    /// Time of the last window observed
    pub end_time: f64,
    /// Whether any window rose above the threshold
    pub heard_sound: bool,
}

/// Two-state silence/sound scan carried across window reads.
///
/// Amplitudes exactly at the threshold leave the state unchanged.
#[derive(Debug, Clone)]
pub struct SilenceScanner {
    threshold_db: f64,
    min_silence_length: f64,
    state: ScanState,
    silences: Vec<Interval>,
    heard_sound: bool,
}

impl SilenceScanner {
    pub fn new(threshold_db: f64, min_silence_length: f64) -> Self {
        SilenceScanner {
            threshold_db,
            min_silence_length,
            state: ScanState::Sounding,
            silences: Vec::new(),
            heard_sound: false,
        }
    }

    pub fn state(&self) -> ScanState {
        self.state
    }

    /// Feeds the amplitude of the window starting at `time` (seconds)
    pub fn observe(&mut self, amplitude: Amplitude, time: f64) {
        if amplitude.is_above(self.threshold_db) {
            self.heard_sound = true;
        }

        match self.state {
            ScanState::Sounding if amplitude.is_below(self.threshold_db) => {
                self.state = ScanState::Silent { since: time };
            }
            ScanState::Silent { since } if amplitude.is_above(self.threshold_db) => {
                self.close_silence(since, time);
                self.state = ScanState::Sounding;
            }
            _ => {}
        }
    }

    /// Flushes a silence still open at end of stream
    pub fn finalize(mut self, time: f64) -> ScanOutcome {
        if let ScanState::Silent { since } = self.state {
            self.close_silence(since, time);
        }

        log::info!("Detected {} silence ranges", self.silences.len());
        for (i, silence) in self.silences.iter().enumerate() {
            log::debug!(
                "  Silence {}: {:.2}s - {:.2}s ({:.2}s)",
                i + 1,
                silence.start,
                silence.end,
                silence.length()
            );
        }

        ScanOutcome {
            silences: self.silences,
            end_time: time,
            heard_sound: self.heard_sound,
        }
    }

    fn close_silence(&mut self, start: f64, end: f64) {
        let silence = Interval::new(start, end);
        if silence.length() > self.min_silence_length {
            self.silences.push(silence);
        }
    }
}
