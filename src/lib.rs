//! # fretquiz
//!
//! A note-name drill for guitar learners.
//!
//! Two quizzes share one pitch-class model:
//! - **Fretboard**: name the note at a marked (string, fret) position
//! - **Solfège**: translate a note name between letter names and fixed-do solfège
//!
//! ## Pipeline
//! 1. `config` - Read the learner's settings
//! 2. `filter` - Enumerate the positions/pitch classes the settings admit
//! 3. `quiz` - Draw a target, evaluate answers, keep score
//! 4. `view` - Project the target into fretboard geometry for a renderer
//!
//! Rendering and audio live outside this crate; [`view::FretboardView`] and
//! [`audio::AudioSink`] are the seams.

pub mod audio;
pub mod config;
pub mod error;
pub mod filter;
pub mod instrument;
pub mod pitch;
pub mod prompt;
pub mod quiz;
pub mod view;

pub use audio::{AudioError, AudioSink, LogSink, Playable, SilentSink};
pub use config::Settings;
pub use error::QuizError;
pub use filter::{enumerate_valid_pitch_classes, enumerate_valid_positions, FretRange, QuizFilter};
pub use instrument::{Fret, FretboardPosition, StringIndex, Tuning, FRET_COUNT, STRING_COUNT};
pub use pitch::{NamingSystem, PitchClass};
pub use prompt::{AnswerChoice, Prompt};
pub use quiz::{
    evaluate, FretboardSession, FretboardTarget, Phase, QuestionGenerator, QuizController,
    QuizMode, QuizTarget, Session, SolfegeSession, SolfegeTarget, Verdict,
};
pub use view::{DisplayWindow, FretboardView, DISPLAY_FRET_COUNT};

/// Pitch class at a fretboard position in standard tuning.
pub fn pitch_class_at(string: StringIndex, fret: Fret) -> PitchClass {
    Tuning::STANDARD.pitch_class_at(FretboardPosition::new(string, fret))
}
