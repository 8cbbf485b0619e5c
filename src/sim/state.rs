//! Simulation state and output records
//!
//! Everything the step function mutates lives in [`Simulation`] so a run can
//! be reset, replayed, or stepped one frame at a time in tests.

use glam::DVec2;
use serde::{Deserialize, Serialize};

use crate::score::{Note, NotePool};
use crate::settings::{NoteWindow, PhysicsParams, Settings};

/// The ball: position and velocity in canvas pixels (per frame)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BallState {
    pub pos: DVec2,
    pub vel: DVec2,
}

/// Snapshot of one frame, taken before that frame's integration
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FrameRecord {
    pub x: f64,
    pub y: f64,
    pub bounce_count: u32,
}

impl FrameRecord {
    pub fn pos(&self) -> DVec2 {
        DVec2::new(self.x, self.y)
    }
}

/// Notes triggered by one boundary collision
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BounceEvent {
    /// Frame the collision was detected on
    pub frame: u32,
    /// `frame / fps`
    pub time: f64,
    pub notes: Vec<Note>,
}

/// Head scale after `bounce_count` bounces
#[inline]
pub fn head_scale(physics: &PhysicsParams, bounce_count: u32) -> f64 {
    physics.head_scale_base + bounce_count as f64 * physics.head_scale_per_bounce
}

/// Collision radius after `bounce_count` bounces
///
/// The drawn head is `2 * ball_radius * scale` across; the collision uses the
/// same figure as a radius, so contact happens when the head visibly overlaps
/// the ring.
#[inline]
pub fn effective_radius(physics: &PhysicsParams, bounce_count: u32) -> f64 {
    physics.ball_radius * 2.0 * head_scale(physics, bounce_count)
}

/// Complete simulation context (deterministic)
#[derive(Debug, Clone)]
pub struct Simulation {
    /// Physics constants
    pub physics: PhysicsParams,
    /// Note cycling parameters
    pub window: NoteWindow,
    /// Arena centre; also the launch position
    pub centre: DVec2,
    pub fps: u32,
    /// Notes bounces draw from
    pub pool: NotePool,
    pub ball: BallState,
    /// Running pool index of the next bounce's first note
    pub note_index: usize,
    pub bounce_count: u32,
    /// Next frame to simulate
    pub frame: u32,
    /// One record per simulated frame
    pub trace: Vec<FrameRecord>,
    /// One event per collision, in frame order
    pub events: Vec<BounceEvent>,
}

impl Simulation {
    pub fn new(settings: &Settings, pool: NotePool) -> Self {
        let centre = settings.arena_centre();
        Self {
            physics: settings.physics,
            window: settings.window,
            centre,
            fps: settings.fps,
            pool,
            ball: BallState {
                pos: centre,
                vel: settings.physics.initial_velocity,
            },
            note_index: 0,
            bounce_count: 0,
            frame: 0,
            trace: Vec::with_capacity(settings.total_frames as usize),
            events: Vec::new(),
        }
    }

    /// Return to the launch state, discarding recorded output
    pub fn reset(&mut self) {
        self.ball = BallState {
            pos: self.centre,
            vel: self.physics.initial_velocity,
        };
        self.note_index = 0;
        self.bounce_count = 0;
        self.frame = 0;
        self.trace.clear();
        self.events.clear();
    }

    /// Current head scale
    pub fn head_scale(&self) -> f64 {
        head_scale(&self.physics, self.bounce_count)
    }

    /// Current collision radius
    pub fn effective_radius(&self) -> f64 {
        effective_radius(&self.physics, self.bounce_count)
    }

    /// Consume the simulation, yielding the trace and bounce events
    pub fn into_output(self) -> (Vec<FrameRecord>, Vec<BounceEvent>) {
        (self.trace, self.events)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_effective_radius_grows_per_bounce() {
        let physics = PhysicsParams::default();
        assert!((effective_radius(&physics, 0) - 60.0).abs() < 1e-9);
        assert!((effective_radius(&physics, 10) - 50.0 * (1.2 + 1.11)).abs() < 1e-9);
        assert!(effective_radius(&physics, 3) > effective_radius(&physics, 2));
    }

    #[test]
    fn test_frame_record_json_keys() {
        let rec = FrameRecord {
            x: 1.5,
            y: 2.0,
            bounce_count: 3,
        };
        let json = serde_json::to_string(&rec).unwrap();
        assert_eq!(json, r#"{"x":1.5,"y":2.0,"bounceCount":3}"#);
    }

    #[test]
    fn test_new_starts_at_centre() {
        let sim = Simulation::new(&Settings::default(), NotePool::default());
        assert_eq!(sim.ball.pos, DVec2::new(540.0, 960.0));
        assert_eq!(sim.ball.vel, DVec2::new(10.0, 12.0));
        assert_eq!(sim.frame, 0);
        assert!(sim.trace.is_empty());
    }
}
