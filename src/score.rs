//! Score loading and note pool selection
//!
//! Scores are MIDI-derived JSON: `{"tracks": [{"notes": [...]}]}`. Only the
//! fields the synthesizer needs are read; everything else is ignored.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::settings::NoteWindow;

/// A single note from the score
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Note {
    /// Display name such as "C#4"
    #[serde(default)]
    pub name: String,
    /// Pitch as a MIDI semitone index (69 = A4)
    pub midi: u8,
    /// Onset in the source recording (seconds)
    pub time: f64,
    /// Gain scalar (0..1)
    pub velocity: f64,
    /// Length in seconds
    pub duration: f64,
}

/// One score track
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Track {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub notes: Vec<Note>,
}

/// A parsed score file
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Score {
    pub tracks: Vec<Track>,
}

impl Score {
    /// Parse a score from JSON text
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Read and parse a score file
    pub fn load(path: &Path) -> Result<Self> {
        let json = fs::read_to_string(path)?;
        let score = Self::from_json(&json)?;
        log::info!(
            "Loaded score {} ({} tracks)",
            path.display(),
            score.tracks.len()
        );
        Ok(score)
    }

    /// Select the working note pool for a window
    pub fn note_pool(&self, window: &NoteWindow) -> Result<NotePool> {
        let track = self.tracks.get(window.track).ok_or(Error::MissingTrack {
            index: window.track,
            available: self.tracks.len(),
        })?;
        Ok(NotePool::from_notes(&track.notes, window))
    }
}

/// The fixed working set of notes bounces cycle through
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NotePool {
    notes: Vec<Note>,
}

impl NotePool {
    /// Keep notes at or after the start offset, then the first `pool_size`
    pub fn from_notes(notes: &[Note], window: &NoteWindow) -> Self {
        let notes: Vec<Note> = notes
            .iter()
            .filter(|n| n.time >= window.start_offset)
            .take(window.pool_size)
            .cloned()
            .collect();

        if notes.is_empty() {
            log::warn!(
                "No notes at or after {:.2}s; bounces will be silent",
                window.start_offset
            );
        } else if notes.len() < window.pool_size {
            log::warn!(
                "Note pool has {} notes, {} requested",
                notes.len(),
                window.pool_size
            );
        }

        Self { notes }
    }

    pub fn len(&self) -> usize {
        self.notes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.notes.is_empty()
    }

    pub fn notes(&self) -> &[Note] {
        &self.notes
    }

    /// `count` notes starting at `start`, wrapping around the pool
    pub fn window(&self, start: usize, count: usize) -> Vec<Note> {
        if self.notes.is_empty() {
            return Vec::new();
        }
        (0..count)
            .map(|i| self.notes[(start + i) % self.notes.len()].clone())
            .collect()
    }

    /// Index after advancing `start` by `stride`, wrapping around the pool
    pub fn advance(&self, start: usize, stride: usize) -> usize {
        if self.notes.is_empty() {
            0
        } else {
            (start + stride) % self.notes.len()
        }
    }
}

impl From<Vec<Note>> for NotePool {
    fn from(notes: Vec<Note>) -> Self {
        Self { notes }
    }
}
