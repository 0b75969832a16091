use crate::error::DetectorError;

/// A batch of consecutive frames cut from a decoded stream.
///
/// Samples are interleaved and normalized to [-1.0, 1.0].
#[derive(Debug, Clone, PartialEq)]
pub struct Window {
    /// Index of the first frame of this window within the recording
    pub start_frame: u64,
    pub channels: usize,
    pub samples: Vec<f64>,
}

impl Window {
    pub fn new(start_frame: u64, channels: usize, samples: Vec<f64>) -> Self {
        Window {
            start_frame,
            channels: channels.max(1),
            samples,
        }
    }

    pub fn frame_count(&self) -> usize {
        self.samples.len() / self.channels
    }

    /// Iterates the first channel of every frame
    pub fn first_channel(&self) -> impl Iterator<Item = f64> + '_ {
        self.samples.iter().step_by(self.channels).copied()
    }
}

/// An ordered, finite stream of sample windows plus its format.
pub trait WindowSource {
    fn sample_rate(&self) -> u32;

    fn channels(&self) -> u16;

    /// Total number of frames the stream will yield
    fn total_frames(&self) -> u64;

    /// Reads up to `window_size` frames. `Ok(None)` marks end of stream.
    fn next_window(&mut self, window_size: usize) -> Result<Option<Window>, DetectorError>;
}

/// Interleaved samples that are already decoded and held in memory.
#[derive(Debug, Clone)]
pub struct SampleBuffer {
    samples: Vec<f64>,
    channels: u16,
    sample_rate: u32,
    position: usize,
}

impl SampleBuffer {
    pub fn new(samples: Vec<f64>, channels: u16, sample_rate: u32) -> Self {
        SampleBuffer {
            samples,
            channels: channels.max(1),
            sample_rate,
            position: 0,
        }
    }

    /// Builds a mono buffer
    pub fn mono(samples: Vec<f64>, sample_rate: u32) -> Self {
        Self::new(samples, 1, sample_rate)
    }
}

impl WindowSource for SampleBuffer {
    fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    fn channels(&self) -> u16 {
        self.channels
    }

    fn total_frames(&self) -> u64 {
        (self.samples.len() / self.channels as usize) as u64
    }

    fn next_window(&mut self, window_size: usize) -> Result<Option<Window>, DetectorError> {
        let channels = self.channels as usize;
        let total = self.samples.len() - self.samples.len() % channels;
        if self.position >= total || window_size == 0 {
            return Ok(None);
        }

        let end = self
            .position
            .saturating_add(window_size.saturating_mul(channels))
            .min(total);
        let window = Window::new(
            (self.position / channels) as u64,
            channels,
            self.samples[self.position..end].to_vec(),
        );
        self.position = end;
        Ok(Some(window))
    }
}
