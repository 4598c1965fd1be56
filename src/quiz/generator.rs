//! Question generation
//!
//! Draws one target uniformly at random from the filter policy's valid set.
//! The random source is injected so tests can seed it.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::debug;

use super::target::{FretboardTarget, SolfegeTarget};
use crate::error::QuizError;
use crate::filter::{enumerate_valid_pitch_classes, enumerate_valid_positions, QuizFilter};
use crate::instrument::Tuning;

#[derive(Debug, Clone)]
pub struct QuestionGenerator<R> {
    rng: R,
}

impl QuestionGenerator<StdRng> {
    /// Deterministic generator for reproducible drills and tests.
    pub fn seeded(seed: u64) -> Self {
        Self::new(StdRng::seed_from_u64(seed))
    }

    pub fn from_entropy() -> Self {
        Self::new(StdRng::from_os_rng())
    }
}

impl<R: Rng> QuestionGenerator<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }

    /// Pick a fretboard position admitted by `filter`.
    pub fn next_fretboard(
        &mut self,
        tuning: &Tuning,
        filter: &QuizFilter,
    ) -> Result<FretboardTarget, QuizError> {
        let candidates = enumerate_valid_positions(tuning, filter);
        let position = self.pick(&candidates).ok_or(QuizError::NoEligibleTargets)?;
        let target = FretboardTarget::new(tuning, position);
        debug!(
            candidates = candidates.len(),
            %position,
            pitch_class = %target.pitch_class,
            window_start = target.window.start,
            "fretboard question"
        );
        Ok(target)
    }

    /// Pick a pitch class for the name-translation quiz.
    pub fn next_solfege(&mut self, natural_only: bool) -> Result<SolfegeTarget, QuizError> {
        let candidates = enumerate_valid_pitch_classes(natural_only);
        let pitch_class = self.pick(&candidates).ok_or(QuizError::NoEligibleTargets)?;
        debug!(candidates = candidates.len(), %pitch_class, "solfege question");
        Ok(SolfegeTarget { pitch_class })
    }

    fn pick<T: Copy>(&mut self, candidates: &[T]) -> Option<T> {
        if candidates.is_empty() {
            return None;
        }
        Some(candidates[self.rng.random_range(0..candidates.len())])
    }
}
