use crate::config::DetectorConfig;
use crate::error::DetectorError;
use crate::timeline::SegmentList;
use std::io::Write;

/// Writes the settings line and one `start,end` row (seconds) per segment
pub fn write_edit_list<W: Write>(
    config: &DetectorConfig,
    segments: &SegmentList,
    mut writer: W,
) -> Result<(), DetectorError> {
    // Quoted because the settings contain commas
    writeln!(
        writer,
        "\"# head_adjust={}, tail_adjust={}, threshold_db={}, min_silence_length={}, min_sound_length={}, window_size={}\"",
        config.head_adjust,
        config.tail_adjust,
        config.threshold_db,
        config.min_silence_length,
        config.min_sound_length,
        config.window_size
    )?;
    for segment in segments {
        writeln!(writer, "{},{}", segment.start, segment.end)?;
    }
    writer.flush()?;
    Ok(())
}
