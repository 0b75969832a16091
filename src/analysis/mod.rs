pub mod amplitude;
pub mod silence_detection;

pub use amplitude::{measure_peak, Amplitude};
pub use silence_detection::{ScanOutcome, ScanState, SilenceScanner};
