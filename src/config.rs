use crate::error::DetectorError;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Configuration for sound segment detection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DetectorConfig {
    /// Sound/silence boundary in dBFS (e.g., -15.0)
    pub threshold_db: f64,
    /// Frames per amplitude measurement
    pub window_size: usize,
    /// Silence shorter than this (seconds) is not cut
    pub min_silence_length: f64,
    /// Sound segments shorter than this (seconds) are dropped
    pub min_sound_length: f64,
    /// Seconds pulled off the start of each segment
    pub head_adjust: f64,
    /// Seconds pushed onto the end of each segment
    pub tail_adjust: f64,
}

impl Default for DetectorConfig {
    fn default() -> Self {
        DetectorConfig {
            threshold_db: -15.0,
            window_size: 800,
            min_silence_length: 0.9,
            min_sound_length: 0.5,
            head_adjust: 0.2,
            tail_adjust: 0.7,
        }
    }
}

impl DetectorConfig {
    /// Loads a config from a JSON file. Missing keys fall back to the defaults.
    pub fn from_json_file(path: &Path) -> Result<Self, DetectorError> {
        log::info!("Loading detector config from: {:?}", path);
        let raw = fs::read_to_string(path)?;
        let config: DetectorConfig = serde_json::from_str(&raw)?;
        config.validate()?;
        Ok(config)
    }

    /// Checks the values that can be judged without knowing the recording.
    pub fn validate(&self) -> Result<(), DetectorError> {
        if !self.threshold_db.is_finite() {
            return Err(invalid(format!(
                "threshold_db must be finite, got {}",
                self.threshold_db
            )));
        }
        if self.window_size == 0 {
            return Err(invalid("window_size must be positive".to_string()));
        }
        check_non_negative("min_silence_length", self.min_silence_length)?;
        check_non_negative("min_sound_length", self.min_sound_length)?;
        check_non_negative("head_adjust", self.head_adjust)?;
        check_non_negative("tail_adjust", self.tail_adjust)?;
        Ok(())
    }

    /// Rejects minimum lengths that no interval of this recording could exceed.
    pub fn validate_for_duration(&self, duration: f64) -> Result<(), DetectorError> {
        if self.min_silence_length > duration {
            return Err(invalid(format!(
                "min_silence_length {:.3}s is longer than the recording ({:.3}s)",
                self.min_silence_length, duration
            )));
        }
        if self.min_sound_length > duration {
            return Err(invalid(format!(
                "min_sound_length {:.3}s is longer than the recording ({:.3}s)",
                self.min_sound_length, duration
            )));
        }
        Ok(())
    }
}

fn check_non_negative(name: &str, value: f64) -> Result<(), DetectorError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(invalid(format!("{} must be a non-negative number, got {}", name, value)))
    }
}

fn invalid(message: String) -> DetectorError {
    DetectorError::InvalidConfig(message)
}
