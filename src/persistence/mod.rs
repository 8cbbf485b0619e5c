//! Artifact serialization
//!
//! - `wav`: mono 32-bit float PCM via hound
//! - `trace`: per-frame ball trace as a JSON array
//!
//! Writers take any `Write` (+ `Seek` for WAV) so tests can render to memory
//! and compare bytes.

pub mod trace;
pub mod wav;

pub use trace::{read_trace, save_trace, write_trace};
pub use wav::{save_wav, wav_spec, write_wav};

use std::fs;
use std::path::Path;

use crate::error::Result;

/// Create the parent directory of `path` if it has one
pub(crate) fn ensure_parent(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    Ok(())
}
