//! WebVTT document generation

use crate::error::{Result, SubtitleError};
use crate::srt::SubtitleRecord;
use crate::vtt::compliance::validate_vtt_format;

/// Mandatory document header: signature plus the empty line
pub const VTT_HEADER: &str = "WEBVTT\n\n";

/// Convert `HH:MM:SS,mmm` to `HH:MM:SS.mmm`.
///
/// Unlike the SRT parser, minutes and seconds are range checked (00-59).
pub fn convert_timestamp(srt_timestamp: &str) -> Result<String> {
    if srt_timestamp.is_empty() {
        return Err(SubtitleError::InvalidTimestamp(
            "Invalid timestamp: must be a non-empty string".to_string(),
        ));
    }

    let caps = regex!(r"^([0-9]{2}):([0-5][0-9]):([0-5][0-9]),([0-9]{3})$")
        .captures(srt_timestamp)
        .ok_or_else(|| {
            SubtitleError::InvalidTimestamp(format!(
                "Invalid SRT timestamp format: {}",
                srt_timestamp
            ))
        })?;

    Ok(format!("{}:{}:{}.{}", &caps[1], &caps[2], &caps[3], &caps[4]))
}

/// Generate a WebVTT document from parsed records.
///
/// Cues are emitted in input order without sequence numbers. Any bad record
/// aborts the whole document.
pub fn generate_vtt(records: &[SubtitleRecord]) -> Result<String> {
    if records.is_empty() {
        return Err(SubtitleError::Generation(
            "No subtitles provided for VTT generation".to_string(),
        ));
    }

    let mut output = String::with_capacity(
        VTT_HEADER.len() + records.iter().map(|r| r.text.len() + 32).sum::<usize>(),
    );
    output.push_str(VTT_HEADER);

    for record in records {
        if record.start_time.is_empty() || record.end_time.is_empty() || record.text.is_empty() {
            return Err(SubtitleError::Generation(format!(
                "Subtitle {} is missing required fields (startTime, endTime, text)",
                record.index
            )));
        }

        let (start, end) = convert_timestamp(&record.start_time)
            .and_then(|start| Ok((start, convert_timestamp(&record.end_time)?)))
            .map_err(|e| {
                SubtitleError::Generation(format!(
                    "Failed to convert timestamps for subtitle {}: {}",
                    record.index, e
                ))
            })?;

        output.push_str(&start);
        output.push_str(" --> ");
        output.push_str(&end);
        output.push('\n');
        output.push_str(&record.text);
        output.push_str("\n\n");
    }

    validate_vtt_format(&output).map_err(|e| {
        SubtitleError::Generation(format!("Generated document failed validation: {}", e))
    })?;

    tracing::debug!("generated WebVTT document with {} cues", records.len());
    Ok(output)
}
