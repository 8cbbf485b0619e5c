//! Offline piano-ish synthesizer
//!
//! Each note is two naive sawtooth oscillators (fundamental and octave)
//! shaped by a three-segment envelope, summed straight into one mono
//! buffer. No band limiting, no voice management: the whole clip is
//! rendered in a single pass after the simulation.

use crate::score::Note;
use crate::settings::SynthParams;
use crate::sim::BounceEvent;

/// Equal-tempered frequency of a MIDI pitch (A4 = 69 = 440 Hz)
#[inline]
pub fn midi_to_freq(midi: u8) -> f64 {
    440.0 * 2f64.powf((midi as f64 - 69.0) / 12.0)
}

/// Naive sawtooth in [-1, 1) at time `t` seconds
#[inline]
pub fn saw(t: f64, freq: f64) -> f64 {
    2.0 * (t * freq).rem_euclid(1.0) - 1.0
}

/// Gain of a note `t` seconds after its onset
///
/// Linear attack to 1, linear fall to the sustain level by the end of the
/// early-decay window, then linear fall toward the release floor at the
/// end of the note. Never negative.
pub fn envelope(params: &SynthParams, t: f64, duration: f64) -> f64 {
    let attack = params.attack_secs;
    let decay_end = duration * params.early_decay_fraction;

    let gain = if t < attack {
        t / attack
    } else if t < decay_end {
        let progress = (t - attack) / (decay_end - attack);
        1.0 - progress * (1.0 - params.sustain_level)
    } else {
        let progress = (t - decay_end) / (duration - decay_end);
        params.sustain_level - progress * (params.sustain_level - params.release_floor)
    };

    gain.max(0.0)
}

/// Mono sample buffer covering the whole clip
#[derive(Debug, Clone, PartialEq)]
pub struct AudioBuffer {
    pub sample_rate: u32,
    samples: Vec<f32>,
}

impl AudioBuffer {
    /// Silent buffer of `len` samples
    pub fn new(sample_rate: u32, len: usize) -> Self {
        Self {
            sample_rate,
            samples: vec![0.0; len],
        }
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn samples(&self) -> &[f32] {
        &self.samples
    }

    /// Largest absolute sample value
    pub fn peak(&self) -> f32 {
        self.samples.iter().fold(0.0f32, |acc, s| acc.max(s.abs()))
    }

    /// Hard-clip every sample to [-1, 1]
    ///
    /// Returns how many samples were clipped.
    pub fn finalize(&mut self) -> usize {
        let mut clipped = 0;
        for s in &mut self.samples {
            if *s > 1.0 || *s < -1.0 {
                *s = s.clamp(-1.0, 1.0);
                clipped += 1;
            }
        }
        clipped
    }
}

/// Renders notes into an [`AudioBuffer`]
#[derive(Debug, Clone)]
pub struct Synthesizer {
    params: SynthParams,
}

impl Synthesizer {
    pub fn new(params: SynthParams) -> Self {
        Self { params }
    }

    pub fn params(&self) -> &SynthParams {
        &self.params
    }

    /// Value of a note `t` seconds after onset
    pub fn note_sample(&self, note: &Note, freq: f64, t: f64) -> f64 {
        let osc1 = saw(t, freq);
        let osc2 = saw(t, freq * 2.0);
        let mix = self.params.fundamental_mix;
        let gain = envelope(&self.params, t, note.duration);
        (osc1 * mix + osc2 * (1.0 - mix)) * gain * note.velocity * self.params.master_volume
    }

    /// Add one note starting at `start_time` seconds
    ///
    /// Samples past the end of the buffer are dropped.
    pub fn add_note(&self, buffer: &mut AudioBuffer, note: &Note, start_time: f64) {
        let rate = self.params.sample_rate as f64;
        let start = (start_time * rate).floor() as usize;
        let length = (note.duration * rate).floor().max(0.0) as usize;
        let freq = midi_to_freq(note.midi);

        let end = start.saturating_add(length).min(buffer.samples.len());
        if start >= end {
            return;
        }

        for (i, slot) in buffer.samples[start..end].iter_mut().enumerate() {
            let t = i as f64 / rate;
            *slot = (*slot as f64 + self.note_sample(note, freq, t)) as f32;
        }
    }

    /// Render every note of every event into a fresh buffer of `len` samples
    ///
    /// The buffer is not clipped; call [`AudioBuffer::finalize`] before
    /// writing it out.
    pub fn render(&self, events: &[BounceEvent], len: usize) -> AudioBuffer {
        let mut buffer = AudioBuffer::new(self.params.sample_rate, len);
        for event in events {
            for note in &event.notes {
                self.add_note(&mut buffer, note, event.time);
            }
        }
        log::info!(
            "Rendered {} events into {} samples (peak {:.3})",
            events.len(),
            len,
            buffer.peak()
        );
        buffer
    }
}

impl Default for Synthesizer {
    fn default() -> Self {
        Self::new(SynthParams::default())
    }
}
