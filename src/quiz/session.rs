//! Per-mode session state
//!
//! ```text
//!            present(t)                 submit(pc)
//!   Idle ─────────────────▶ AwaitingAnswer ─────────▶ Answered
//!    ▲                        │   ▲                      │
//!    │ clear()                │   └──── present(t) ──────┘
//!    └────────────────────────┘         (also from AwaitingAnswer,
//!                                        abandoning the open question)
//! ```
//!
//! `submit` outside `AwaitingAnswer` is ignored, which makes answering a
//! resolved question a no-op. The score only ever grows, by one per correct
//! verdict.

use std::mem;
use tracing::debug;

use super::evaluator::{evaluate, Verdict};
use super::target::{FretboardTarget, QuizTarget, SolfegeTarget};
use crate::pitch::PitchClass;

#[derive(Debug, Clone, PartialEq)]
pub enum Phase<T> {
    /// No target: before the first question, or the filters admit nothing
    Idle,
    AwaitingAnswer(T),
    Answered {
        target: T,
        candidate: PitchClass,
        verdict: Verdict,
    },
}

/// One quiz mode's target and score.
#[derive(Debug, Clone, PartialEq)]
pub struct Session<T> {
    phase: Phase<T>,
    score: u32,
}

pub type FretboardSession = Session<FretboardTarget>;
pub type SolfegeSession = Session<SolfegeTarget>;

impl<T> Default for Phase<T> {
    fn default() -> Self {
        Phase::Idle
    }
}

impl<T> Default for Session<T> {
    fn default() -> Self {
        Self {
            phase: Phase::Idle,
            score: 0,
        }
    }
}

impl<T: QuizTarget> Session<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> &Phase<T> {
        &self.phase
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    /// The current target, answered or not.
    pub fn target(&self) -> Option<&T> {
        match &self.phase {
            Phase::Idle => None,
            Phase::AwaitingAnswer(target) => Some(target),
            Phase::Answered { target, .. } => Some(target),
        }
    }

    pub fn is_idle(&self) -> bool {
        matches!(self.phase, Phase::Idle)
    }

    pub fn is_awaiting_answer(&self) -> bool {
        matches!(self.phase, Phase::AwaitingAnswer(_))
    }

    /// The verdict of the resolved question, if any.
    pub fn last_verdict(&self) -> Option<Verdict> {
        match self.phase {
            Phase::Answered { verdict, .. } => Some(verdict),
            _ => None,
        }
    }

    /// Start a new question, replacing whatever came before.
    pub fn present(&mut self, target: T) {
        self.phase = Phase::AwaitingAnswer(target);
    }

    /// Drop the target, keeping the score.
    pub fn clear(&mut self) {
        self.phase = Phase::Idle;
    }

    /// Resolve the open question. Returns `None` when no question is open.
    pub fn submit(&mut self, candidate: PitchClass) -> Option<Verdict> {
        match mem::take(&mut self.phase) {
            Phase::AwaitingAnswer(target) => {
                let verdict = evaluate(candidate, &target);
                if verdict.is_correct() {
                    self.score += 1;
                }
                debug!(%candidate, ?verdict, score = self.score, "answer evaluated");
                self.phase = Phase::Answered {
                    target,
                    candidate,
                    verdict,
                };
                Some(verdict)
            }
            other => {
                debug!(%candidate, "no open question, answer ignored");
                self.phase = other;
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn target(pc: PitchClass) -> SolfegeTarget {
        SolfegeTarget { pitch_class: pc }
    }

    #[test]
    fn test_idle_ignores_answers() {
        let mut session = SolfegeSession::new();
        assert!(session.is_idle());
        assert_eq!(session.submit(PitchClass::C), None);
        assert_eq!(session.score(), 0);
    }

    #[test]
    fn test_correct_answer_scores_once() {
        let mut session = SolfegeSession::new();
        session.present(target(PitchClass::D));
        assert!(session.is_awaiting_answer());
        assert_eq!(session.submit(PitchClass::D), Some(Verdict::Correct));
        assert_eq!(session.score(), 1);
        assert_eq!(session.submit(PitchClass::D), None);
        assert_eq!(session.score(), 1);
        assert_eq!(session.last_verdict(), Some(Verdict::Correct));
    }

    #[test]
    fn test_incorrect_answer_keeps_score() {
        let mut session = SolfegeSession::new();
        session.present(target(PitchClass::A));
        assert_eq!(
            session.submit(PitchClass::B),
            Some(Verdict::Incorrect {
                correct: PitchClass::A
            })
        );
        assert_eq!(session.score(), 0);
        assert_eq!(session.target(), Some(&target(PitchClass::A)));
    }

    #[test]
    fn test_present_abandons_open_question() {
        let mut session = SolfegeSession::new();
        session.present(target(PitchClass::C));
        session.present(target(PitchClass::G));
        assert_eq!(
            session.submit(PitchClass::C),
            Some(Verdict::Incorrect {
                correct: PitchClass::G
            })
        );
    }

    #[test]
    fn test_clear_keeps_score() {
        let mut session = SolfegeSession::new();
        session.present(target(PitchClass::E));
        session.submit(PitchClass::E);
        session.clear();
        assert!(session.is_idle());
        assert!(session.target().is_none());
        assert_eq!(session.score(), 1);
    }
}
