//! # Quiz Module
//!
//! Question generation, answer evaluation and per-mode session state.
//!
//! ## Modes
//! - **Fretboard**: a position is marked on the fretboard; the learner names its note.
//! - **Solfège**: a note name is shown in one naming system; the learner gives it in the other.
//!
//! Each mode has its own [`Session`] holding its target and score. Switching
//! modes only changes which session receives answers and "next" requests.
//!
//! ## Sub-modules
//! - `target` - Quiz targets and the answer key they carry
//! - `generator` - Uniform random selection over the filter policy's valid set
//! - `evaluator` - Compares a submitted pitch class against the target
//! - `session` - Explicit `Idle -> AwaitingAnswer -> Answered` state machine plus score
//! - `controller` - Holds both sessions, the settings and the audio sink
//!
//! ## Example
//! ```rust
//! use fretquiz::{QuizController, Settings, Verdict};
//!
//! let mut quiz = QuizController::seeded(Settings::default(), 42);
//! quiz.next_question()?;
//!
//! let answer = quiz.fretboard().target().unwrap().pitch_class;
//! assert_eq!(quiz.submit_answer(answer), Some(Verdict::Correct));
//! assert_eq!(quiz.fretboard().score(), 1);
//!
//! // A resolved question ignores further answers
//! assert_eq!(quiz.submit_answer(answer), None);
//! # Ok::<(), fretquiz::QuizError>(())
//! ```

mod controller;
mod evaluator;
mod generator;
mod session;
mod target;

pub use controller::{QuizController, QuizMode};
pub use evaluator::{evaluate, Verdict};
pub use generator::QuestionGenerator;
pub use session::{FretboardSession, Phase, Session, SolfegeSession};
pub use target::{FretboardTarget, QuizTarget, SolfegeTarget};
