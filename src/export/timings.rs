use crate::error::DetectorError;
use crate::timeline::SegmentList;
use serde::{Deserialize, Serialize};
use std::io::Write;

/// Editing-timeline ticks per second
pub const TICKS_PER_SECOND: f64 = 254_016_000_000.0;

/// One sound segment in the form an editing timeline consumes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct SoundTiming {
    /// Start in samples
    pub start: i64,
    /// End in samples
    pub end: i64,
    pub rate: u32,
    pub start_tick: String,
    pub end_tick: String,
    /// Source media the samples refer to
    pub path: String,
}

/// Converts segment times to sample indices and timeline ticks
pub fn build_timings(segments: &SegmentList, source_path: &str) -> Vec<SoundTiming> {
    segments
        .iter()
        .map(|segment| {
            let (start, end) = segment.to_samples(segments.sample_rate);
            SoundTiming {
                start,
                end,
                rate: segments.sample_rate,
                start_tick: to_ticks(segment.start),
                end_tick: to_ticks(segment.end),
                path: source_path.to_string(),
            }
        })
        .collect()
}

/// Writes timings as pretty-printed JSON
pub fn write_timings_json<W: Write>(
    timings: &[SoundTiming],
    mut writer: W,
) -> Result<(), DetectorError> {
    serde_json::to_writer_pretty(&mut writer, timings)?;
    writer.write_all(b"\n")?;
    log::info!("Wrote {} timings", timings.len());
    Ok(())
}

fn to_ticks(seconds: f64) -> String {
    format!("{}", (seconds * TICKS_PER_SECOND) as i64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::timeline::Interval;

    fn segments() -> SegmentList {
        SegmentList::new(
            vec![Interval::new(0.0, 0.7), Interval::new(3.8, 6.7)],
            8000,
        )
    }

    #[test]
    fn test_timings_use_rounded_samples() {
        let timings = build_timings(&segments(), "/tmp/take.wav");
        assert_eq!(timings.len(), 2);
        assert_eq!(timings[0].start, 0);
        assert_eq!(timings[0].end, 5600);
        assert_eq!(timings[1].start, 30400);
        assert_eq!(timings[1].end, 53600);
        assert!(timings.iter().all(|t| t.rate == 8000));
        assert_eq!(timings[1].path, "/tmp/take.wav");
    }

    #[test]
    fn test_ticks() {
        let list = SegmentList::new(vec![Interval::new(1.0, 2.5)], 48000);
        let timings = build_timings(&list, "a.wav");
        assert_eq!(timings[0].start_tick, "254016000000");
        assert_eq!(timings[0].end_tick, "635040000000");
    }

    #[test]
    fn test_json_field_names() {
        let timings = build_timings(&segments(), "take.wav");
        let mut out = Vec::new();
        write_timings_json(&timings, &mut out).unwrap();

        let value: serde_json::Value = serde_json::from_slice(&out).unwrap();
        let first = &value[0];
        assert_eq!(first["Start"], 0);
        assert_eq!(first["End"], 5600);
        assert_eq!(first["Rate"], 8000);
        assert_eq!(first["StartTick"], "0");
        assert_eq!(first["Path"], "take.wav");
    }

    #[test]
    fn test_empty_list_writes_empty_array() {
        let list = SegmentList::new(Vec::new(), 44100);
        let mut out = Vec::new();
        write_timings_json(&build_timings(&list, "x.wav"), &mut out).unwrap();
        assert_eq!(String::from_utf8(out).unwrap().trim(), "[]");
    }
}
