//! Subtitle tracks and cues

use serde::{Deserialize, Serialize};

/// A single timed caption
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubtitleCue {
    /// 1-based cue index
    pub index: u32,
    /// Cue start in milliseconds
    pub start_ms: u64,
    /// Cue end in milliseconds
    pub end_ms: u64,
    /// Caption text, possibly multi-line
    pub text: String,
}

/// A generated or extracted subtitle track
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubtitleTrack {
    /// Language of the captions
    pub language: String,
    /// Id of the engine that produced the track
    pub engine_id: String,
    /// Ordered cues
    pub cues: Vec<SubtitleCue>,
}

impl SubtitleTrack {
    /// Create a track
    pub fn new(language: impl Into<String>, engine_id: impl Into<String>, cues: Vec<SubtitleCue>) -> Self {
        Self {
            language: language.into(),
            engine_id: engine_id.into(),
            cues,
        }
    }

    /// Total covered duration in milliseconds (end of the last cue)
    pub fn duration_ms(&self) -> u64 {
        self.cues.last().map_or(0, |c| c.end_ms)
    }
}
