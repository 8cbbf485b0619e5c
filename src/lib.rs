//! Bounce Score - bouncing-ball trace and synchronized piano track
//!
//! Core modules:
//! - `sim`: Deterministic simulation (ball physics, boundary collisions, bounce events)
//! - `audio`: Offline synthesizer rendering bounce notes into a PCM buffer
//! - `score`: Score file loading and note pool selection
//! - `persistence`: WAV and trace serialization
//! - `settings`: Tunable parameters gathered from `consts`
//! - `pipeline`: One-shot precomputation tying everything together
//! - `preview`: Frame-addressed replay for live rendering

pub mod audio;
pub mod error;
pub mod persistence;
pub mod pipeline;
pub mod preview;
pub mod score;
pub mod settings;
pub mod sim;

pub use error::{Error, Result};
pub use settings::{OutputPaths, Settings};

use glam::DVec2;

/// Precomputation constants
pub mod consts {
    /// Canvas dimensions (9:16 vertical video)
    pub const CANVAS_WIDTH: f64 = 1080.0;
    pub const CANVAS_HEIGHT: f64 = 1920.0;

    /// Video frame rate; one simulation step per frame
    pub const FPS: u32 = 60;
    /// Clip length in frames (30 seconds)
    pub const GAME_DURATION_FRAMES: u32 = 30 * FPS;

    /// Score offset (seconds) where the note pool starts
    pub const SONG_START_TIME: f64 = 23.0;
    /// Size of the note pool
    pub const NOTES_TO_LOAD: usize = 300;
    /// Notes triggered by a single bounce
    pub const NOTES_PER_BOUNCE: usize = 5;
    /// How far the pool index advances per bounce
    pub const NOTE_INCREMENT: usize = 5;
    /// Score track used for the pool
    pub const SCORE_TRACK: usize = 0;

    /// Ball defaults (pixels per frame)
    pub const BALL_INITIAL_VX: f64 = 10.0;
    pub const BALL_INITIAL_VY: f64 = 12.0;
    pub const GRAVITY: f64 = 0.2;
    pub const BALL_RADIUS: f64 = 25.0;

    /// Arena boundary
    pub const CIRCLE_RADIUS: f64 = 450.0;
    /// Reflection coefficient (2.0 = perfectly elastic)
    pub const BOUNCINESS: f64 = 2.0;

    /// Head scale at zero bounces
    pub const HEAD_SCALE_BASE: f64 = 1.2;
    /// Head scale growth per bounce
    pub const HEAD_SCALE_FACTOR: f64 = 0.111;

    /// Audio output
    pub const SAMPLE_RATE: u32 = 44100;
    pub const MASTER_VOLUME: f64 = 0.5;

    /// Default artifact locations
    pub const SCORE_PATH: &str = "public/sounds/VisiPiano.json";
    pub const AUDIO_OUT_PATH: &str = "public/sounds/generated-audio.wav";
    pub const TRACE_OUT_PATH: &str = "src/simulation-data.json";
}

/// Centre of a canvas of the given size
#[inline]
pub fn canvas_centre(width: f64, height: f64) -> DVec2 {
    DVec2::new(width / 2.0, height / 2.0)
}

/// Frame index to seconds at the given frame rate
#[inline]
pub fn frame_to_secs(frame: u32, fps: u32) -> f64 {
    frame as f64 / fps as f64
}
