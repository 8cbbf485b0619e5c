//! One-shot precomputation
//!
//! score -> note pool -> simulation -> (trace, events) -> synthesizer ->
//! clipped buffer -> files. Any failure aborts the run; it is a rerunnable
//! build step, so there is nothing to recover.

use crate::audio::{AudioBuffer, Synthesizer};
use crate::error::Result;
use crate::persistence::{save_trace, save_wav};
use crate::score::{NotePool, Score};
use crate::settings::{OutputPaths, Settings};
use crate::sim::{BounceEvent, FrameRecord, Simulation};

/// Everything the renderer and the video composition consume
#[derive(Debug, Clone)]
pub struct Precomputation {
    pub trace: Vec<FrameRecord>,
    pub events: Vec<BounceEvent>,
    /// Finalized (clipped) audio
    pub audio: AudioBuffer,
}

/// Run the simulation and synthesis in memory
pub fn precompute(settings: &Settings, pool: NotePool) -> Precomputation {
    log::info!(
        "Simulating {} frames at {} fps with {} pool notes",
        settings.total_frames,
        settings.fps,
        pool.len()
    );

    let mut sim = Simulation::new(settings, pool);
    sim.run(settings.total_frames);
    let (trace, events) = sim.into_output();
    log::info!("{} bounces", events.len());

    let synth = Synthesizer::new(settings.synth);
    let mut audio = synth.render(&events, settings.total_samples());
    let clipped = audio.finalize();
    if clipped > 0 {
        log::info!("Clipped {clipped} samples");
    }

    Precomputation {
        trace,
        events,
        audio,
    }
}

/// Load the score, precompute, and write both artifacts
pub fn run(settings: &Settings, paths: &OutputPaths) -> Result<Precomputation> {
    let score = Score::load(&paths.score)?;
    let pool = score.note_pool(&settings.window)?;

    let output = precompute(settings, pool);

    save_wav(&paths.audio, &output.audio)?;
    save_trace(&paths.trace, &output.trace)?;
    Ok(output)
}
