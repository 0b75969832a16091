use crate::error::DetectorError;
use crate::timeline::SegmentList;
use hound::{Sample, SampleFormat, WavReader, WavWriter};
use std::fs::{self, File};
use std::io::{BufWriter, Read};
use std::path::{Path, PathBuf};

/// Returns the file name of `path` without its extension
pub fn file_stem(path: &Path) -> Result<String, DetectorError> {
    path.file_stem()
        .and_then(|s| s.to_str())
        .map(str::to_string)
        .ok_or_else(|| DetectorError::InvalidInput(format!("invalid file name: {:?}", path)))
}

/// Writes every segment of `wav_path` to `<output_dir>/<stem>_NNN.wav`.
///
/// Boundaries are widened to whole samples (floor start, ceil end) and cut
/// to the recording, so padded segments never clip their own edges.
pub fn write_chunks(
    wav_path: &Path,
    segments: &SegmentList,
    output_dir: &Path,
) -> Result<Vec<PathBuf>, DetectorError> {
    let stem = file_stem(wav_path)?;
    fs::create_dir_all(output_dir)?;
    log::info!("Splitting {:?} into {} chunks", wav_path, segments.len());

    let mut reader = WavReader::open(wav_path)?;
    let spec = reader.spec();
    let total = reader.duration();
    let rate = spec.sample_rate as f64;

    let mut written = Vec::with_capacity(segments.len());
    for (i, segment) in segments.iter().enumerate() {
        let start = ((segment.start * rate).floor().max(0.0) as u32).min(total);
        let end = ((segment.end * rate).ceil().max(0.0) as u32).min(total);
        let count = end.saturating_sub(start) as usize * spec.channels as usize;

        let chunk_path = output_dir.join(format!("{}_{:03}.wav", stem, i));
        reader.seek(start)?;
        let mut writer = WavWriter::create(&chunk_path, spec)?;
        match spec.sample_format {
            SampleFormat::Float => copy_samples::<f32, _>(&mut reader, &mut writer, count)?,
            SampleFormat::Int => copy_samples::<i32, _>(&mut reader, &mut writer, count)?,
        }
        writer.finalize()?;

        log::debug!("  Chunk {}: frames {}..{} -> {:?}", i, start, end, chunk_path);
        written.push(chunk_path);
    }

    Ok(written)
}

fn copy_samples<S: Sample, R: Read>(
    reader: &mut WavReader<R>,
    writer: &mut WavWriter<BufWriter<File>>,
    count: usize,
) -> Result<(), DetectorError> {
    for sample in reader.samples::<S>().take(count) {
        writer.write_sample(sample?)?;
    }
    Ok(())
}
