//! Audio collaborator interface
//!
//! The quiz never waits on audio. It hands a [`Playable`] to an [`AudioSink`]
//! and carries on whatever the sink reports.

use serde::Serialize;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::info;

use crate::instrument::{FretboardPosition, Tuning};
use crate::pitch::PitchClass;

/// MIDI note of middle C, the octave used for name-only prompts and answers
pub const MIDDLE_C_MIDI: u8 = 60;

/// Recorded samples exist for this MIDI range (low E open to high E fret 24)
pub const SAMPLE_MIDI_RANGE: std::ops::RangeInclusive<u8> = 40..=88;

const SAMPLE_EXTENSION: &str = "mp3";

/// A note the audio collaborator can sound.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Playable {
    pub midi_note: u8,
}

impl Playable {
    /// Sound of a fretboard position.
    pub fn at_position(tuning: &Tuning, position: FretboardPosition) -> Self {
        Self {
            midi_note: tuning.midi_note_at(position),
        }
    }

    /// A pitch class voiced in the octave above middle C.
    pub fn pitch_class(pc: PitchClass) -> Self {
        Self {
            midi_note: MIDDLE_C_MIDI + pc.index(),
        }
    }

    /// Equal-tempered frequency with A4 = 440 Hz.
    pub fn frequency_hz(self) -> f64 {
        440.0 * 2f64.powf((self.midi_note as f64 - 69.0) / 12.0)
    }

    /// Recorded sample id, `None` when the sink has to synthesize the tone.
    pub fn sample_id(self) -> Option<u8> {
        SAMPLE_MIDI_RANGE
            .contains(&self.midi_note)
            .then_some(self.midi_note)
    }

    pub fn sample_path(self, dir: &Path) -> Option<PathBuf> {
        self.sample_id()
            .map(|id| dir.join(format!("{}.{}", id, SAMPLE_EXTENSION)))
    }

    /// Scientific pitch name, e.g. `E4`.
    pub fn pitch_name(self) -> String {
        let pc = PitchClass::wrapping(self.midi_note as i32);
        let octave = self.midi_note as i32 / 12 - 1;
        format!("{}{}", pc.natural_letter().unwrap_or_else(|| sharp_spelling(pc)), octave)
    }
}

fn sharp_spelling(pc: PitchClass) -> &'static str {
    const SHARPS: [&str; 12] = ["C", "C#", "D", "D#", "E", "F", "F#", "G", "G#", "A", "A#", "B"];
    SHARPS[pc.index() as usize]
}

#[derive(Error, Debug)]
pub enum AudioError {
    #[error("No sample loaded for MIDI note {0}")]
    MissingSample(u8),
}

/// Something that can sound a note, fire-and-forget.
pub trait AudioSink {
    fn play(&mut self, note: Playable) -> Result<(), AudioError>;
}

/// Discards every note.
#[derive(Debug, Default)]
pub struct SilentSink;

impl AudioSink for SilentSink {
    fn play(&mut self, _note: Playable) -> Result<(), AudioError> {
        Ok(())
    }
}

/// Writes every note to the log instead of a speaker.
#[derive(Debug, Default)]
pub struct LogSink;

impl AudioSink for LogSink {
    fn play(&mut self, note: Playable) -> Result<(), AudioError> {
        match note.sample_id() {
            Some(id) => info!("♪ {} (sample {})", note.pitch_name(), id),
            None => info!("♪ {} ({:.2} Hz)", note.pitch_name(), note.frequency_hz()),
        }
        Ok(())
    }
}
