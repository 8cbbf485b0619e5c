//! Precomputation settings
//!
//! Every value defaults to the matching constant in `consts`; the struct
//! exists so tests and callers can vary one knob without touching the rest.

use std::path::PathBuf;

use glam::DVec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Ball and arena physics (units are pixels and frames)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PhysicsParams {
    /// Launch velocity
    pub initial_velocity: DVec2,
    /// Added to vertical velocity every frame
    pub gravity: f64,
    /// Base ball radius before head scaling
    pub ball_radius: f64,
    /// Radius of the bounding circle
    pub circle_radius: f64,
    /// Reflection coefficient (2.0 = elastic)
    pub bounciness: f64,
    /// Head scale with no bounces
    pub head_scale_base: f64,
    /// Head scale growth per bounce
    pub head_scale_per_bounce: f64,
}

impl Default for PhysicsParams {
    fn default() -> Self {
        Self {
            initial_velocity: DVec2::new(BALL_INITIAL_VX, BALL_INITIAL_VY),
            gravity: GRAVITY,
            ball_radius: BALL_RADIUS,
            circle_radius: CIRCLE_RADIUS,
            bounciness: BOUNCINESS,
            head_scale_base: HEAD_SCALE_BASE,
            head_scale_per_bounce: HEAD_SCALE_FACTOR,
        }
    }
}

/// Which notes are used and how bounces walk through them
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NoteWindow {
    /// Score track holding the notes
    pub track: usize,
    /// Notes before this time (seconds) are skipped
    pub start_offset: f64,
    /// Maximum pool size
    pub pool_size: usize,
    /// Notes played per bounce
    pub notes_per_bounce: usize,
    /// Pool index advance per bounce
    pub stride: usize,
}

impl Default for NoteWindow {
    fn default() -> Self {
        Self {
            track: SCORE_TRACK,
            start_offset: SONG_START_TIME,
            pool_size: NOTES_TO_LOAD,
            notes_per_bounce: NOTES_PER_BOUNCE,
            stride: NOTE_INCREMENT,
        }
    }
}

/// Synthesizer voice and mix parameters
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SynthParams {
    pub sample_rate: u32,
    /// Final gain applied to every note
    pub master_volume: f64,
    /// Weight of the fundamental sawtooth (the octave gets `1 - mix`)
    pub fundamental_mix: f64,
    /// Linear attack length in seconds
    pub attack_secs: f64,
    /// Fraction of the note spent decaying from peak to `sustain_level`
    pub early_decay_fraction: f64,
    /// Gain at the end of the early decay
    pub sustain_level: f64,
    /// Gain reached at the end of the note
    pub release_floor: f64,
}

impl Default for SynthParams {
    fn default() -> Self {
        Self {
            sample_rate: SAMPLE_RATE,
            master_volume: MASTER_VOLUME,
            fundamental_mix: 0.7,
            attack_secs: 0.01,
            early_decay_fraction: 0.2,
            sustain_level: 0.3,
            release_floor: 0.01,
        }
    }
}

/// All precomputation settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    pub canvas_width: f64,
    pub canvas_height: f64,
    pub fps: u32,
    /// Number of simulated frames
    pub total_frames: u32,
    pub window: NoteWindow,
    pub physics: PhysicsParams,
    pub synth: SynthParams,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            canvas_width: CANVAS_WIDTH,
            canvas_height: CANVAS_HEIGHT,
            fps: FPS,
            total_frames: GAME_DURATION_FRAMES,
            window: NoteWindow::default(),
            physics: PhysicsParams::default(),
            synth: SynthParams::default(),
        }
    }
}

impl Settings {
    /// Clip length in seconds
    pub fn duration_secs(&self) -> f64 {
        crate::frame_to_secs(self.total_frames, self.fps)
    }

    /// Arena centre; the ball also starts here
    pub fn arena_centre(&self) -> DVec2 {
        crate::canvas_centre(self.canvas_width, self.canvas_height)
    }

    /// Audio buffer length covering the whole clip
    pub fn total_samples(&self) -> usize {
        (self.duration_secs() * self.synth.sample_rate as f64).ceil() as usize
    }
}

/// Where the score is read from and artifacts are written to
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputPaths {
    pub score: PathBuf,
    pub audio: PathBuf,
    pub trace: PathBuf,
}

impl Default for OutputPaths {
    fn default() -> Self {
        Self {
            score: PathBuf::from(SCORE_PATH),
            audio: PathBuf::from(AUDIO_OUT_PATH),
            trace: PathBuf::from(TRACE_OUT_PATH),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_duration_and_samples() {
        let settings = Settings::default();
        assert_eq!(settings.total_frames, 1800);
        assert!((settings.duration_secs() - 30.0).abs() < 1e-12);
        assert_eq!(settings.total_samples(), 30 * 44100);
    }

    #[test]
    fn test_total_samples_rounds_up() {
        let mut settings = Settings {
            total_frames: 90,
            ..Default::default()
        };
        assert_eq!(settings.total_samples(), 66150);

        // 0.5 s at 1001 Hz is 500.5 samples
        settings.total_frames = 30;
        settings.synth.sample_rate = 1001;
        assert_eq!(settings.total_samples(), 501);
    }

    #[test]
    fn test_arena_centre() {
        let settings = Settings::default();
        assert_eq!(settings.arena_centre(), DVec2::new(540.0, 960.0));
    }

    #[test]
    fn test_settings_json_roundtrip() {
        let settings = Settings::default();
        let json = serde_json::to_string(&settings).unwrap();
        let back: Settings = serde_json::from_str(&json).unwrap();
        assert_eq!(back.window, settings.window);
        assert_eq!(back.total_frames, settings.total_frames);
        assert_eq!(back.synth.sample_rate, 44100);
    }
}
