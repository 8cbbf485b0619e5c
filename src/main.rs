//! Bounce Score entry point
//!
//! Reads the score, runs the simulation and synthesis once, and writes the
//! audio and trace artifacts to their fixed locations. Set `RUST_LOG=debug`
//! to see every bounce.

use anyhow::Context;

use bounce_score::pipeline;
use bounce_score::{OutputPaths, Settings};

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    log::info!("Bounce Score precomputation starting...");

    let settings = Settings::default();
    let paths = OutputPaths::default();

    let output = pipeline::run(&settings, &paths).with_context(|| {
        format!(
            "precomputation failed (score {}, audio {}, trace {})",
            paths.score.display(),
            paths.audio.display(),
            paths.trace.display()
        )
    })?;

    log::info!(
        "Audio and simulation data generated: {} frames, {} bounces",
        output.trace.len(),
        output.events.len()
    );
    Ok(())
}
