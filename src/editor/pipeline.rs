use crate::analysis::{measure_peak, ScanOutcome, SilenceScanner};
use crate::config::DetectorConfig;
use crate::error::DetectorError;
use crate::media::{WavWindowSource, WindowSource};
use crate::timeline::{SegmentFinalizer, SegmentList, SoundComposer};
use std::path::Path;

/// Runs the full detection over one recording:
/// peak meter -> silence scan -> padded sounds -> merged segments.
///
/// Each call owns its scan state, so one detector can be reused across files.
#[derive(Debug, Clone)]
pub struct SegmentDetector {
    config: DetectorConfig,
}

impl SegmentDetector {
    pub fn new(config: DetectorConfig) -> Result<Self, DetectorError> {
        config.validate()?;
        Ok(SegmentDetector { config })
    }

    pub fn config(&self) -> &DetectorConfig {
        &self.config
    }

    /// Detects sound segments in a WAV file on disk
    pub fn find_sound_in_file(&self, wav_path: &Path) -> Result<SegmentList, DetectorError> {
        log::info!("Starting sound detection on: {:?}", wav_path);
        let mut source = WavWindowSource::open(wav_path)?;
        self.find_sound(&mut source)
    }

    /// Detects sound segments in any window source.
    ///
    /// A stream failure aborts the whole scan; no partial list is returned.
    pub fn find_sound<S: WindowSource + ?Sized>(
        &self,
        source: &mut S,
    ) -> Result<SegmentList, DetectorError> {
        let sample_rate = source.sample_rate();
        let total_frames = source.total_frames();
        if sample_rate == 0 || total_frames == 0 {
            return Err(DetectorError::EmptyRecording);
        }

        let duration = total_frames as f64 / sample_rate as f64;
        log::info!(
            "Recording: {} frames, {} channel(s) @ {} Hz ({:.2}s)",
            total_frames,
            source.channels(),
            sample_rate,
            duration
        );
        log::info!(
            "Threshold: {} dB, window: {} frames, min silence: {} s, min sound: {} s",
            self.config.threshold_db,
            self.config.window_size,
            self.config.min_silence_length,
            self.config.min_sound_length
        );
        self.config.validate_for_duration(duration)?;

        if total_frames < self.config.window_size as u64 {
            log::warn!(
                "Recording is shorter than one {}-frame window",
                self.config.window_size
            );
        }

        let scan = self.scan(source, sample_rate)?;

        let candidates =
            SoundComposer::new(self.config.head_adjust, self.config.tail_adjust).compose(&scan);
        let segments = SegmentFinalizer::new(self.config.min_sound_length).finalize(&candidates);

        let segments = SegmentList::new(segments, sample_rate);
        log::info!(
            "Found {} sound segments ({} candidates), {:.2}s of sound",
            segments.len(),
            candidates.len(),
            segments.total_length()
        );
        for (i, segment) in segments.iter().enumerate() {
            log::info!(
                "  Sound {}: {:.2}s - {:.2}s ({:.2}s)",
                i + 1,
                segment.start,
                segment.end,
                segment.length()
            );
        }

        Ok(segments)
    }

    fn scan<S: WindowSource + ?Sized>(
        &self,
        source: &mut S,
        sample_rate: u32,
    ) -> Result<ScanOutcome, DetectorError> {
        let rate = sample_rate as f64;
        let mut scanner =
            SilenceScanner::new(self.config.threshold_db, self.config.min_silence_length);
        let mut current_time = 0.0;

        while let Some(window) = source.next_window(self.config.window_size)? {
            current_time = window.start_frame as f64 / rate;
            scanner.observe(measure_peak(&window), current_time);
        }

        Ok(scanner.finalize(current_time))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::media::{SampleBuffer, Window};
    use crate::timeline::Interval;
    use hound::{SampleFormat, WavSpec, WavWriter};

    const RATE: u32 = 8000;
    /// Peak of about -40 dB
    const QUIET: f64 = 0.01;
    /// Peak of about -6 dB
    const LOUD: f64 = 0.5;

    /// Builds mono samples from (level, seconds) spans, alternating sign
    fn samples(spans: &[(f64, f64)]) -> Vec<f64> {
        spans
            .iter()
            .flat_map(|&(level, seconds)| {
                let count = (seconds * RATE as f64).round() as usize;
                (0..count).map(move |i| if i % 2 == 0 { level } else { -level })
            })
            .collect()
    }

    fn recording(spans: &[(f64, f64)]) -> SampleBuffer {
        SampleBuffer::mono(samples(spans), RATE)
    }

    fn detector(config: DetectorConfig) -> SegmentDetector {
        SegmentDetector::new(config).unwrap()
    }

    fn assert_segments(actual: &SegmentList, expected: &[(f64, f64)]) {
        assert_eq!(actual.len(), expected.len(), "got {:?}", actual.segments);
        for (s, &(start, end)) in actual.iter().zip(expected) {
            assert!(
                (s.start - start).abs() < 1e-9 && (s.end - end).abs() < 1e-9,
                "expected ({}, {}), got {:?}",
                start,
                end,
                s
            );
        }
    }

    /// Lengths that let short padded bursts either stand alone or merge
    fn burst_config() -> DetectorConfig {
        DetectorConfig {
            min_silence_length: 0.5,
            min_sound_length: 1.5,
            ..DetectorConfig::default()
        }
    }

    #[test]
    fn test_sound_between_two_silences() {
        let mut source = recording(&[(QUIET, 4.0), (LOUD, 2.0), (QUIET, 4.0)]);
        let segments = detector(DetectorConfig::default())
            .find_sound(&mut source)
            .unwrap();

        assert_eq!(segments.sample_rate, RATE);
        assert_segments(&segments, &[(0.0, 0.7), (3.8, 6.7), (9.7, 10.6)]);
    }

    #[test]
    fn test_all_silent_recording_is_empty() {
        let mut source = recording(&[(QUIET, 10.0)]);
        let segments = detector(DetectorConfig::default())
            .find_sound(&mut source)
            .unwrap();
        assert!(segments.is_empty());
    }

    #[test]
    fn test_digital_silence_is_empty() {
        let mut source = SampleBuffer::mono(vec![0.0; 8000 * 5], RATE);
        let segments = detector(DetectorConfig::default())
            .find_sound(&mut source)
            .unwrap();
        assert!(segments.is_empty());
    }

    #[test]
    fn test_all_sound_recording_is_one_segment() {
        let mut source = recording(&[(LOUD, 2.0)]);
        let segments = detector(DetectorConfig::default())
            .find_sound(&mut source)
            .unwrap();
        // Last window starts at 1.9s
        assert_segments(&segments, &[(0.0, 2.6)]);
    }

    #[test]
    fn test_isolated_short_burst_is_dropped() {
        let mut source = recording(&[
            (LOUD, 3.0),
            (QUIET, 3.0),
            (LOUD, 0.3),
            (QUIET, 2.7),
            (LOUD, 3.0),
        ]);
        let segments = detector(burst_config()).find_sound(&mut source).unwrap();
        assert_segments(&segments, &[(0.0, 3.7), (8.8, 12.6)]);
    }

    #[test]
    fn test_short_burst_near_sound_is_merged() {
        let mut source = recording(&[
            (LOUD, 3.0),
            (QUIET, 0.6),
            (LOUD, 0.3),
            (QUIET, 5.1),
            (LOUD, 3.0),
        ]);
        let segments = detector(burst_config()).find_sound(&mut source).unwrap();
        assert_segments(&segments, &[(0.0, 4.6), (8.8, 12.6)]);
    }

    #[test]
    fn test_head_padding_before_zero_keeps_full_length() {
        let mut source = recording(&[(QUIET, 1.0), (LOUD, 2.1)]);
        let config = DetectorConfig {
            head_adjust: 2.0,
            tail_adjust: 0.0,
            min_silence_length: 0.5,
            min_sound_length: 3.05,
            ..DetectorConfig::default()
        };
        let segments = detector(config).find_sound(&mut source).unwrap();
        assert_segments(&segments, &[(-1.0, 3.0)]);
    }

    #[test]
    fn test_window_larger_than_recording() {
        let mut source = SampleBuffer::new(samples(&[(LOUD, 2.0)]).repeat(2), 2, RATE);
        let config = DetectorConfig {
            window_size: usize::MAX / 2 + 1,
            ..DetectorConfig::default()
        };
        let segments = detector(config).find_sound(&mut source).unwrap();
        // A single window at 0.0 is the whole scan
        assert_segments(&segments, &[(0.0, 0.7)]);
    }

    #[test]
    fn test_segments_are_ordered_and_long_enough() {
        let mut source = recording(&[
            (LOUD, 1.0),
            (QUIET, 1.0),
            (LOUD, 0.1),
            (QUIET, 1.2),
            (LOUD, 2.0),
            (QUIET, 0.95),
            (LOUD, 0.4),
            (QUIET, 3.0),
        ]);
        let config = DetectorConfig::default();
        let segments = detector(config.clone()).find_sound(&mut source).unwrap();

        assert!(!segments.is_empty());
        for s in segments.iter() {
            assert!(s.length() > config.min_sound_length);
        }
        for pair in segments.segments.windows(2) {
            assert!(pair[0].end <= pair[1].start);
        }
    }

    #[test]
    fn test_repeated_runs_are_identical() {
        let spans = [(QUIET, 1.5), (LOUD, 2.2), (QUIET, 1.3), (LOUD, 0.7), (QUIET, 2.0)];
        let detector = detector(DetectorConfig::default());

        let first = detector.find_sound(&mut recording(&spans)).unwrap();
        let second = detector.find_sound(&mut recording(&spans)).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_only_first_channel_is_inspected() {
        // Left channel quiet, right channel loud
        let interleaved: Vec<f64> = samples(&[(QUIET, 5.0)])
            .into_iter()
            .flat_map(|left| [left, LOUD])
            .collect();
        let mut source = SampleBuffer::new(interleaved, 2, RATE);
        let segments = detector(DetectorConfig::default())
            .find_sound(&mut source)
            .unwrap();
        assert!(segments.is_empty());
    }

    #[test]
    fn test_empty_recording_is_rejected() {
        let mut source = SampleBuffer::mono(Vec::new(), RATE);
        assert!(matches!(
            detector(DetectorConfig::default()).find_sound(&mut source),
            Err(DetectorError::EmptyRecording)
        ));
    }

    #[test]
    fn test_minimum_longer_than_recording_is_rejected() {
        let mut source = recording(&[(LOUD, 0.5)]);
        assert!(matches!(
            detector(DetectorConfig::default()).find_sound(&mut source),
            Err(DetectorError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_invalid_config_is_rejected_up_front() {
        let config = DetectorConfig {
            window_size: 0,
            ..DetectorConfig::default()
        };
        assert!(SegmentDetector::new(config).is_err());
    }

    /// Fails after handing out a fixed number of windows
    struct FailingSource {
        inner: SampleBuffer,
        windows_left: usize,
    }

    impl WindowSource for FailingSource {
        fn sample_rate(&self) -> u32 {
            self.inner.sample_rate()
        }

        fn channels(&self) -> u16 {
            self.inner.channels()
        }

        fn total_frames(&self) -> u64 {
            self.inner.total_frames()
        }

        fn next_window(&mut self, window_size: usize) -> Result<Option<Window>, DetectorError> {
            if self.windows_left == 0 {
                return Err(DetectorError::Stream {
                    frame: 0,
                    reason: "decoder gave up".to_string(),
                });
            }
            self.windows_left -= 1;
            self.inner.next_window(window_size)
        }
    }

    #[test]
    fn test_stream_failure_aborts_scan() {
        let mut source = FailingSource {
            inner: recording(&[(QUIET, 4.0), (LOUD, 2.0), (QUIET, 4.0)]),
            windows_left: 50,
        };
        assert!(matches!(
            detector(DetectorConfig::default()).find_sound(&mut source),
            Err(DetectorError::Stream { .. })
        ));
    }

    #[test]
    fn test_wav_file_end_to_end() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("take.wav");
        let spec = WavSpec {
            channels: 1,
            sample_rate: RATE,
            bits_per_sample: 16,
            sample_format: SampleFormat::Int,
        };
        let mut writer = WavWriter::create(&path, spec).unwrap();
        for s in samples(&[(QUIET, 4.0), (LOUD, 2.0), (QUIET, 4.0)]) {
            writer.write_sample((s * 32767.0).round() as i16).unwrap();
        }
        writer.finalize().unwrap();

        let segments = detector(DetectorConfig::default())
            .find_sound_in_file(&path)
            .unwrap();
        assert_segments(&segments, &[(0.0, 0.7), (3.8, 6.7), (9.7, 10.6)]);
        assert_eq!(segments.segment_at(5.0), Some(1));
        assert!(segments.iter().all(|s: &Interval| s.length() > 0.5));
    }
}
