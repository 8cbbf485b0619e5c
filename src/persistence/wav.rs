//! WAV encoder using hound
//!
//! Always mono, 32-bit IEEE float.

use std::fs::File;
use std::io::{BufWriter, Seek, Write};
use std::path::Path;

use hound::{SampleFormat, WavSpec, WavWriter};

use crate::audio::AudioBuffer;
use crate::error::Result;

/// Header for a mono float WAV at `sample_rate`
pub fn wav_spec(sample_rate: u32) -> WavSpec {
    WavSpec {
        channels: 1,
        sample_rate,
        bits_per_sample: 32,
        sample_format: SampleFormat::Float,
    }
}

/// Encode the buffer into any seekable writer
pub fn write_wav<W: Write + Seek>(writer: W, buffer: &AudioBuffer) -> Result<()> {
    let mut wav = WavWriter::new(writer, wav_spec(buffer.sample_rate))?;
    for &sample in buffer.samples() {
        wav.write_sample(sample)?;
    }
    wav.finalize()?;
    Ok(())
}

/// Write the buffer to a WAV file, creating parent directories
pub fn save_wav(path: &Path, buffer: &AudioBuffer) -> Result<()> {
    super::ensure_parent(path)?;
    let file = BufWriter::new(File::create(path)?);
    write_wav(file, buffer)?;
    log::info!(
        "Wrote {} ({} samples, {:.2}s)",
        path.display(),
        buffer.len(),
        buffer.len() as f64 / buffer.sample_rate as f64
    );
    Ok(())
}
