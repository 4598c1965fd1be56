//! Quiz targets
//!
//! A target is created for each new question and never mutated afterwards;
//! the next question replaces it.

use serde::Serialize;

use crate::instrument::{FretboardPosition, Tuning};
use crate::pitch::PitchClass;
use crate::view::DisplayWindow;

/// Anything that carries the pitch class a learner must name.
pub trait QuizTarget {
    fn answer(&self) -> PitchClass;
}

/// A marked fretboard position with its answer key and the window that shows it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FretboardTarget {
    pub position: FretboardPosition,
    pub pitch_class: PitchClass,
    pub window: DisplayWindow,
}

impl FretboardTarget {
    pub fn new(tuning: &Tuning, position: FretboardPosition) -> Self {
        Self {
            position,
            pitch_class: tuning.pitch_class_at(position),
            window: DisplayWindow::for_fret(position.fret),
        }
    }
}

impl QuizTarget for FretboardTarget {
    fn answer(&self) -> PitchClass {
        self.pitch_class
    }
}

/// A note name to translate into the other naming system.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SolfegeTarget {
    pub pitch_class: PitchClass,
}

impl QuizTarget for SolfegeTarget {
    fn answer(&self) -> PitchClass {
        self.pitch_class
    }
}
