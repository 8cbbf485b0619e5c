//! Frame-addressed access to a live simulation
//!
//! A renderer asks for arbitrary frames (scrubbing, looping back to 0). The
//! simulation only runs forward: later frames are stepped on demand, earlier
//! ones come from the recorded trace, and frame 0 resets the run.

use crate::score::NotePool;
use crate::settings::Settings;
use crate::sim::{BounceEvent, FrameRecord, Simulation};

/// Live preview driver over a [`Simulation`]
#[derive(Debug, Clone)]
pub struct Preview {
    sim: Simulation,
    total_frames: u32,
}

impl Preview {
    pub fn new(settings: &Settings, pool: NotePool) -> Self {
        Self {
            sim: Simulation::new(settings, pool),
            total_frames: settings.total_frames,
        }
    }

    /// Snapshot for `frame`, clamped to the last frame of the clip
    ///
    /// Returns `None` only for an empty clip.
    pub fn seek(&mut self, frame: u32) -> Option<FrameRecord> {
        if self.total_frames == 0 {
            return None;
        }
        let frame = frame.min(self.total_frames - 1);

        // Frame 0 starts a new pass; anything already simulated is in the trace
        if frame == 0 && self.sim.frame > 0 {
            log::debug!("Preview rewinding from frame {}", self.sim.frame);
            self.sim.reset();
        }
        while self.sim.frame <= frame {
            crate::sim::tick(&mut self.sim);
        }
        self.sim.trace.get(frame as usize).copied()
    }

    /// Head scale the renderer should draw at `frame`
    pub fn head_scale(&mut self, frame: u32) -> Option<f64> {
        let record = self.seek(frame)?;
        Some(crate::sim::head_scale(&self.sim.physics, record.bounce_count))
    }

    /// Bounce events detected so far
    pub fn events(&self) -> &[BounceEvent] {
        &self.sim.events
    }

    /// The bounce detected on exactly `frame`, if any
    pub fn bounce_at(&mut self, frame: u32) -> Option<&BounceEvent> {
        self.seek(frame)?;
        self.sim.events.iter().find(|e| e.frame == frame)
    }

    pub fn simulation(&self) -> &Simulation {
        &self.sim
    }
}
