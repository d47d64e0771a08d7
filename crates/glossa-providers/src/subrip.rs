//! SubRip/WebVTT cue parsing
//!
//! Shared by the subtitle-file adapter and the embedded-track engine. Only
//! the cue structure is interpreted; styling tags are passed through
//! untouched.

use glossa_domain::value_objects::SubtitleCue;

/// Parse SubRip or WebVTT text into cues
///
/// Blocks that don't carry a recognizable `start --> end` timing line are
/// skipped, which also drops the `WEBVTT` header and NOTE blocks.
pub fn parse_cues(input: &str) -> Vec<SubtitleCue> {
    let mut cues = Vec::new();
    for block in input.replace("\r\n", "\n").split("\n\n") {
        let lines: Vec<&str> = block.lines().filter(|l| !l.trim().is_empty()).collect();
        let Some(timing_at) = lines.iter().position(|l| l.contains("-->")) else {
            continue;
        };
        let Some((start_ms, end_ms)) = parse_timing(lines[timing_at]) else {
            continue;
        };
        let text = lines[timing_at + 1..].join("\n");
        if text.is_empty() {
            continue;
        }
        cues.push(SubtitleCue {
            index: u32::try_from(cues.len()).unwrap_or(u32::MAX) + 1,
            start_ms,
            end_ms,
            text,
        });
    }
    cues
}

fn parse_timing(line: &str) -> Option<(u64, u64)> {
    let (start, rest) = line.split_once("-->")?;
    // WebVTT may append cue settings after the end timestamp
    let end = rest.trim().split_whitespace().next()?;
    Some((parse_timestamp(start.trim())?, parse_timestamp(end)?))
}

/// Parse "HH:MM:SS,mmm", "HH:MM:SS.mmm" or "MM:SS.mmm" into milliseconds
fn parse_timestamp(stamp: &str) -> Option<u64> {
    let (clock, millis) = stamp.split_once([',', '.'])?;
    let millis: u64 = millis.trim().parse().ok()?;
    let mut seconds = 0u64;
    for part in clock.split(':') {
        seconds = seconds * 60 + part.trim().parse::<u64>().ok()?;
    }
    Some(seconds * 1000 + millis)
}
