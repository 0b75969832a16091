use crate::media::Window;

/// Peak level of one window.
///
/// A window whose peak is exactly zero has no finite dB value, so it is kept
/// as `Floor` and compares below every threshold.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Amplitude {
    Floor,
    Decibels(f64),
}

impl Amplitude {
    /// Converts a linear peak in [0.0, 1.0] to dBFS
    pub fn from_peak(peak: f64) -> Self {
        if peak > 0.0 {
            Amplitude::Decibels(20.0 * peak.log10())
        } else {
            Amplitude::Floor
        }
    }

    pub fn is_below(self, threshold_db: f64) -> bool {
        match self {
            Amplitude::Floor => true,
            Amplitude::Decibels(db) => db < threshold_db,
        }
    }

    pub fn is_above(self, threshold_db: f64) -> bool {
        match self {
            Amplitude::Floor => false,
            Amplitude::Decibels(db) => db > threshold_db,
        }
    }

    pub fn as_db(self) -> f64 {
        match self {
            Amplitude::Floor => f64::NEG_INFINITY,
            Amplitude::Decibels(db) => db,
        }
    }
}

/// Measures the peak amplitude of a window's first channel
pub fn measure_peak(window: &Window) -> Amplitude {
    let mut max = 0.0f64;
    let mut min = 0.0f64;
    for sample in window.first_channel() {
        if sample > max {
            max = sample;
        } else if sample < min {
            min = sample;
        }
    }
    Amplitude::from_peak(max.max(min.abs()))
}
