// Declare modules
pub mod analysis;
pub mod config;
pub mod editor;
pub mod error;
pub mod export;
pub mod media;
pub mod timeline;

use clap::Parser;
use std::fs::{self, File};
use std::io::{self, BufWriter};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

pub use config::DetectorConfig;
pub use editor::SegmentDetector;
pub use error::DetectorError;
pub use timeline::{Interval, SegmentList};

/// Finds the sound segments of WAV recordings and writes them as JSON timings
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub struct Args {
    /// Input WAV file, or a directory whose WAV files are all analyzed
    #[arg(short, long)]
    pub input: PathBuf,

    /// Output JSON file (stdout when omitted). For a directory input this is
    /// the directory `<name>.json` files go to (the input directory when omitted)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Also write each segment as `<dir>/<name>/<name>_NNN.wav` plus an edit list
    #[arg(long)]
    pub chunks: Option<PathBuf>,

    /// JSON file with detector settings
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Threshold in dB
    #[arg(long, allow_hyphen_values = true)]
    pub threshold: Option<f64>,

    /// Number of frames per measurement window
    #[arg(long)]
    pub samples: Option<usize>,

    /// Minimum silence length in seconds
    #[arg(long)]
    pub silence: Option<f64>,

    /// Minimum sound length in seconds
    #[arg(long)]
    pub sound: Option<f64>,

    /// Head adjustment in seconds
    #[arg(long)]
    pub head: Option<f64>,

    /// Tail adjustment in seconds
    #[arg(long)]
    pub tail: Option<f64>,
}

impl Args {
    /// Layers flags over the config file over the defaults
    pub fn detector_config(&self) -> Result<DetectorConfig, DetectorError> {
        let mut config = match &self.config {
            Some(path) => DetectorConfig::from_json_file(path)?,
            None => DetectorConfig::default(),
        };

        if let Some(threshold) = self.threshold {
            config.threshold_db = threshold;
        }
        if let Some(samples) = self.samples {
            config.window_size = samples;
        }
        if let Some(silence) = self.silence {
            config.min_silence_length = silence;
        }
        if let Some(sound) = self.sound {
            config.min_sound_length = sound;
        }
        if let Some(head) = self.head {
            config.head_adjust = head;
        }
        if let Some(tail) = self.tail {
            config.tail_adjust = tail;
        }

        Ok(config)
    }
}

/// Lists the WAV files directly inside `dir`, skipping hidden files, in name order
pub fn collect_inputs(dir: &Path) -> Result<Vec<PathBuf>, DetectorError> {
    let mut inputs = Vec::new();
    for entry in WalkDir::new(dir).min_depth(1).max_depth(1) {
        let entry = entry.map_err(|e| DetectorError::Io(e.into()))?;
        let path = entry.path();
        let hidden = entry.file_name().to_string_lossy().starts_with('.');
        let is_wav = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("wav"));
        if entry.file_type().is_file() && is_wav && !hidden {
            inputs.push(path.to_path_buf());
        }
    }
    inputs.sort();

    if inputs.is_empty() {
        return Err(DetectorError::InvalidInput(format!(
            "no WAV files found in {:?}",
            dir
        )));
    }
    Ok(inputs)
}

/// Analyzes one WAV file and writes its timings, plus chunks when asked
pub fn analyze_file(
    detector: &SegmentDetector,
    input: &Path,
    json_output: Option<&Path>,
    chunk_root: Option<&Path>,
) -> Result<SegmentList, DetectorError> {
    let segments = detector.find_sound_in_file(input)?;
    let timings = export::build_timings(&segments, &input.to_string_lossy());

    match json_output {
        Some(path) => {
            log::info!("Writing timings to: {:?}", path);
            export::write_timings_json(&timings, BufWriter::new(File::create(path)?))?;
        }
        None => export::write_timings_json(&timings, io::stdout().lock())?,
    }

    if let Some(root) = chunk_root {
        let stem = export::file_stem(input)?;
        let chunk_dir = root.join(&stem);
        export::write_chunks(input, &segments, &chunk_dir)?;

        let edit_list = chunk_dir.join(format!("{}_editlist.csv", stem));
        log::info!("Writing edit list to: {:?}", edit_list);
        export::write_edit_list(
            detector.config(),
            &segments,
            BufWriter::new(File::create(edit_list)?),
        )?;
    }

    Ok(segments)
}

/// Analyzes the input named by `args`. A directory input is analyzed file by
/// file; failures are logged and reported together at the end.
pub fn execute(args: &Args) -> Result<Vec<SegmentList>, DetectorError> {
    let detector = SegmentDetector::new(args.detector_config()?)?;
    let input = std::path::absolute(&args.input)?;
    let chunk_root = args.chunks.as_deref();

    if !input.is_dir() {
        let segments = analyze_file(&detector, &input, args.output.as_deref(), chunk_root)?;
        return Ok(vec![segments]);
    }

    let inputs = collect_inputs(&input)?;
    let output_dir = args.output.clone().unwrap_or_else(|| input.clone());
    fs::create_dir_all(&output_dir)?;
    log::info!("Analyzing {} files in {:?}", inputs.len(), input);

    let mut results = Vec::with_capacity(inputs.len());
    let mut failed = 0;
    for path in &inputs {
        let json_path = output_dir.join(format!("{}.json", export::file_stem(path)?));
        match analyze_file(&detector, path, Some(&json_path), chunk_root) {
            Ok(segments) => results.push(segments),
            Err(e) => {
                log::error!("Skipping {:?}: {}", path, e);
                failed += 1;
            }
        }
    }

    if failed > 0 {
        return Err(DetectorError::Batch {
            failed,
            total: inputs.len(),
        });
    }
    Ok(results)
}

pub fn run() -> Result<(), DetectorError> {
    // Initialize logger
    env_logger::init();

    let args = Args::parse();
    log::info!("Starting silence splitter");

    execute(&args)?;
    Ok(())
}
