//! Answer evaluation

use serde::Serialize;

use super::target::QuizTarget;
use crate::pitch::PitchClass;

/// Outcome of one submitted answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase", tag = "result")]
pub enum Verdict {
    Correct,
    Incorrect { correct: PitchClass },
}

impl Verdict {
    pub fn is_correct(self) -> bool {
        matches!(self, Verdict::Correct)
    }
}

/// Correct iff `candidate` is the target's pitch class.
///
/// Scoring and the once-per-target guard belong to the session, not here.
pub fn evaluate<T: QuizTarget>(candidate: PitchClass, target: &T) -> Verdict {
    let answer = target.answer();
    if candidate == answer {
        Verdict::Correct
    } else {
        Verdict::Incorrect { correct: answer }
    }
}
