//! Ball trace serialization
//!
//! The renderer replays this file frame by frame instead of re-running the
//! physics: `[{"x": .., "y": .., "bounceCount": ..}, ...]`.

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::error::Result;
use crate::sim::FrameRecord;

/// Serialize the trace as compact JSON
pub fn write_trace<W: Write>(writer: W, trace: &[FrameRecord]) -> Result<()> {
    serde_json::to_writer(writer, trace)?;
    Ok(())
}

/// Write the trace to a file, creating parent directories
pub fn save_trace(path: &Path, trace: &[FrameRecord]) -> Result<()> {
    super::ensure_parent(path)?;
    let mut file = BufWriter::new(File::create(path)?);
    write_trace(&mut file, trace)?;
    file.flush()?;
    log::info!("Wrote {} ({} frames)", path.display(), trace.len());
    Ok(())
}

/// Load a previously written trace
pub fn read_trace(path: &Path) -> Result<Vec<FrameRecord>> {
    let json = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&json)?)
}
