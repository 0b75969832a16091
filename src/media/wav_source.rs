use super::window::{Window, WindowSource};
use crate::error::DetectorError;
use hound::{SampleFormat, WavReader, WavSpec};
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

/// Streams windows out of a WAV file, decoding only what each window needs
pub struct WavWindowSource<R: Read> {
    reader: WavReader<R>,
    spec: WavSpec,
    total_frames: u64,
    frames_read: u64,
}

impl WavWindowSource<BufReader<File>> {
    /// Opens a WAV file from disk
    pub fn open(wav_path: &Path) -> Result<Self, DetectorError> {
        log::info!("Opening WAV file: {:?}", wav_path);
        let reader = WavReader::open(wav_path)?;
        Self::from_reader(reader)
    }
}

impl<R: Read> WavWindowSource<R> {
    pub fn from_reader(reader: WavReader<R>) -> Result<Self, DetectorError> {
        let spec = reader.spec();
        log::info!("WAV spec: {:?}", spec);

        if spec.channels == 0 {
            return Err(DetectorError::Decode(hound::Error::FormatError(
                "WAV file declares zero channels",
            )));
        }

        Ok(WavWindowSource {
            total_frames: reader.duration() as u64,
            reader,
            spec,
            frames_read: 0,
        })
    }

    fn read_samples(&mut self, count: usize) -> Result<Vec<f64>, DetectorError> {
        let frame = self.frames_read;
        let stream_error = move |e: hound::Error| DetectorError::Stream {
            frame,
            reason: e.to_string(),
        };

        match self.spec.sample_format {
            SampleFormat::Float => self
                .reader
                .samples::<f32>()
                .take(count)
                .map(|s| s.map(f64::from).map_err(stream_error))
                .collect(),
            SampleFormat::Int => {
                let full_scale = (1i64 << (self.spec.bits_per_sample.saturating_sub(1))) as f64;
                self.reader
                    .samples::<i32>()
                    .take(count)
                    .map(|s| s.map(|v| v as f64 / full_scale).map_err(stream_error))
                    .collect()
            }
        }
    }
}

impl<R: Read> WindowSource for WavWindowSource<R> {
    fn sample_rate(&self) -> u32 {
        self.spec.sample_rate
    }

    fn channels(&self) -> u16 {
        self.spec.channels
    }

    fn total_frames(&self) -> u64 {
        self.total_frames
    }

    fn next_window(&mut self, window_size: usize) -> Result<Option<Window>, DetectorError> {
        let remaining = self.total_frames - self.frames_read;
        if remaining == 0 || window_size == 0 {
            return Ok(None);
        }

        let channels = self.spec.channels as usize;
        let frames = (window_size as u64).min(remaining) as usize;
        let samples = self.read_samples(frames * channels)?;

        // The header promised more frames than the data chunk holds
        if samples.len() < frames * channels {
            return Err(DetectorError::Stream {
                frame: self.frames_read + (samples.len() / channels) as u64,
                reason: format!(
                    "stream ended early, expected {} frames",
                    self.total_frames
                ),
            });
        }

        let window = Window::new(self.frames_read, channels, samples);
        self.frames_read += frames as u64;
        Ok(Some(window))
    }
}
