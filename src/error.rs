use thiserror::Error;

/// Errors produced while analyzing a recording.
///
/// Every variant is fatal to the current analysis; nothing is retried and no
/// partial segment list is returned.
#[derive(Debug, Error)]
pub enum DetectorError {
    /// The detector was configured with values it cannot work with.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// The recording has no frames or no usable sample rate.
    #[error("recording contains no audio")]
    EmptyRecording,

    /// The WAV container could not be opened or its header is malformed.
    #[error("failed to decode audio: {0}")]
    Decode(#[from] hound::Error),

    /// The sample stream broke off while it was being scanned.
    #[error("audio stream failed at frame {frame}: {reason}")]
    Stream { frame: u64, reason: String },

    /// The input path names nothing that can be analyzed.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// Some files of a directory run could not be analyzed.
    #[error("{failed} of {total} files could not be analyzed")]
    Batch { failed: usize, total: usize },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
