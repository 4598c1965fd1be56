//! # Error Types
//!
//! This module defines all error types for the fretboard drill.
//!
//! ## Error Types
//! - `NoEligibleTargets` - The active filters exclude every position (recoverable)
//! - `InvalidConfiguration` - A value outside its domain was supplied at the boundary
//! - `SettingsError` - The YAML settings document could not be parsed
//! - `Io` - The settings file could not be read
//!
//! None of these terminate a session. `NoEligibleTargets` leaves the quiz idle
//! until the learner relaxes the filters; the others are reported before a
//! session is ever built.
//!
//! ## Usage
//! ```rust
//! use fretquiz::{PitchClass, QuizController, QuizError, Settings};
//!
//! let mut settings = Settings::default();
//! settings.note_filter = vec![PitchClass::new(1)?]; // C#
//! settings.natural_only = true;               // ...but sharps are hidden
//!
//! let mut quiz = QuizController::seeded(settings, 7);
//! match quiz.next_question() {
//!     Err(QuizError::NoEligibleTargets) => println!("No note matches the current filters"),
//!     Err(e) => eprintln!("Error: {}", e),
//!     Ok(()) => println!("{}", quiz.prompt().question),
//! }
//! # Ok::<(), QuizError>(())
//! ```

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum QuizError {
    /// The filter policy produced an empty candidate set.
    ///
    /// This is an expected end state (e.g. the note allow-list only holds
    /// sharps while natural-only is on). The session stays idle with no target.
    ///
    /// # Example
    /// ```
    /// # use fretquiz::QuizError;
    /// let err = QuizError::NoEligibleTargets;
    /// assert_eq!(err.to_string(), "No note matches the current filters");
    /// ```
    #[error("No note matches the current filters")]
    NoEligibleTargets,

    /// A value outside its domain was supplied from outside the core.
    ///
    /// # Example
    /// ```
    /// # use fretquiz::QuizError;
    /// let err = QuizError::InvalidConfiguration("string number 7 is outside 1..=6".to_string());
    /// assert_eq!(err.to_string(), "Invalid configuration: string number 7 is outside 1..=6");
    /// ```
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// Malformed YAML settings document.
    #[error("Invalid settings: {0}")]
    SettingsError(String),

    /// The settings file could not be read.
    #[error("Failed to read settings file '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
