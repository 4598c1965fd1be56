//! Top-level quiz controller
//!
//! Owns both sessions, the settings snapshot source, the question generator
//! and the audio sink. Every event (next, answer, option change) is handled
//! synchronously; audio is fire-and-forget and its failures are only logged.

use rand::rngs::StdRng;
use rand::Rng;
use serde::Serialize;
use tracing::{debug, warn};

use super::evaluator::Verdict;
use super::generator::QuestionGenerator;
use super::session::{FretboardSession, SolfegeSession};
use crate::audio::{AudioSink, Playable, SilentSink};
use crate::config::Settings;
use crate::error::QuizError;
use crate::filter::FretRange;
use crate::instrument::{StringIndex, Tuning};
use crate::pitch::{NamingSystem, PitchClass};
use crate::prompt::{self, AnswerChoice, Prompt};
use crate::view::FretboardView;

/// Which quiz receives answers and "next" requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum QuizMode {
    #[default]
    Fretboard,
    Solfege,
}

impl QuizMode {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "fretboard" | "fret" => Some(QuizMode::Fretboard),
            "solfege" | "solfège" | "names" => Some(QuizMode::Solfege),
            _ => None,
        }
    }
}

pub struct QuizController<R = StdRng> {
    tuning: Tuning,
    settings: Settings,
    mode: QuizMode,
    fretboard: FretboardSession,
    solfege: SolfegeSession,
    generator: QuestionGenerator<R>,
    audio: Box<dyn AudioSink>,
}

impl QuizController<StdRng> {
    /// Silent controller with a seeded random source.
    pub fn seeded(settings: Settings, seed: u64) -> Self {
        Self::new(
            settings,
            QuestionGenerator::seeded(seed),
            Box::new(SilentSink),
        )
    }
}

impl<R: Rng> QuizController<R> {
    pub fn new(
        settings: Settings,
        generator: QuestionGenerator<R>,
        audio: Box<dyn AudioSink>,
    ) -> Self {
        Self {
            tuning: Tuning::STANDARD,
            settings,
            mode: QuizMode::default(),
            fretboard: FretboardSession::new(),
            solfege: SolfegeSession::new(),
            generator,
            audio,
        }
    }

    pub fn mode(&self) -> QuizMode {
        self.mode
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn tuning(&self) -> &Tuning {
        &self.tuning
    }

    pub fn fretboard(&self) -> &FretboardSession {
        &self.fretboard
    }

    pub fn solfege(&self) -> &SolfegeSession {
        &self.solfege
    }

    pub fn active_score(&self) -> u32 {
        match self.mode {
            QuizMode::Fretboard => self.fretboard.score(),
            QuizMode::Solfege => self.solfege.score(),
        }
    }

    fn active_is_idle(&self) -> bool {
        match self.mode {
            QuizMode::Fretboard => self.fretboard.is_idle(),
            QuizMode::Solfege => self.solfege.is_idle(),
        }
    }

    /// Make `mode` the active quiz. Both sessions keep their target and score;
    /// a session without a target gets its first question.
    pub fn switch_mode(&mut self, mode: QuizMode) -> Result<(), QuizError> {
        debug!(?mode, "switching quiz");
        self.mode = mode;
        if self.active_is_idle() {
            self.next_question()?;
        }
        Ok(())
    }

    /// Replace the active session's target with a fresh one, re-reading the settings.
    ///
    /// On `NoEligibleTargets` the session is left idle with no target.
    pub fn next_question(&mut self) -> Result<(), QuizError> {
        match self.mode {
            QuizMode::Fretboard => {
                let filter = self.settings.quiz_filter();
                match self.generator.next_fretboard(&self.tuning, &filter) {
                    Ok(target) => {
                        self.fretboard.present(target);
                        self.play(Playable::at_position(&self.tuning, target.position));
                    }
                    Err(e) => {
                        self.fretboard.clear();
                        return Err(e);
                    }
                }
            }
            QuizMode::Solfege => match self.generator.next_solfege(self.settings.natural_only) {
                Ok(target) => {
                    self.solfege.present(target);
                    self.play(Playable::pitch_class(target.pitch_class));
                }
                Err(e) => {
                    self.solfege.clear();
                    return Err(e);
                }
            },
        }
        Ok(())
    }

    /// Answer the active question. `None` when it is already resolved or absent.
    pub fn submit_answer(&mut self, candidate: PitchClass) -> Option<Verdict> {
        let verdict = match self.mode {
            QuizMode::Fretboard => self.fretboard.submit(candidate),
            QuizMode::Solfege => self.solfege.submit(candidate),
        }?;
        self.play(Playable::pitch_class(candidate));
        Some(verdict)
    }

    /// Sound the active target again.
    pub fn replay_target(&mut self) {
        let note = match self.mode {
            QuizMode::Fretboard => self
                .fretboard
                .target()
                .map(|t| Playable::at_position(&self.tuning, t.position)),
            QuizMode::Solfege => self
                .solfege
                .target()
                .map(|t| Playable::pitch_class(t.pitch_class)),
        };
        if let Some(note) = note {
            self.play(note);
        }
    }

    /// Fretboard geometry for the renderer, `None` while the fretboard is hidden.
    pub fn recompute_view(&self) -> Option<FretboardView> {
        if self.settings.hide_fretboard {
            return None;
        }
        Some(FretboardView::compute(
            &self.tuning,
            &self.settings,
            self.fretboard.target(),
        ))
    }

    pub fn prompt(&self) -> Prompt {
        match self.mode {
            QuizMode::Fretboard => prompt::fretboard_prompt(self.fretboard.target()),
            QuizMode::Solfege => {
                prompt::solfege_prompt(self.solfege.target(), self.settings.naming_system)
            }
        }
    }

    pub fn answer_choices(&self) -> Vec<AnswerChoice> {
        prompt::answer_choices(self.settings.naming_system, self.settings.natural_only)
    }

    pub fn note_filter_label(&self) -> String {
        prompt::note_filter_label(&self.settings.note_filter)
    }

    /// Replace all settings at once and start a new question under them.
    /// The inactive quiz drops its target and is asked again on activation.
    pub fn apply_settings(&mut self, settings: Settings) -> Result<(), QuizError> {
        self.settings = settings;
        self.clear_inactive();
        self.next_question()
    }

    pub fn set_naming_system(&mut self, system: NamingSystem) {
        self.settings.naming_system = system;
    }

    pub fn set_show_open_strings(&mut self, show: bool) {
        self.settings.show_open_strings = show;
    }

    pub fn set_sound_enabled(&mut self, enabled: bool) {
        self.settings.sound_enabled = enabled;
    }

    pub fn set_hide_fretboard(&mut self, hide: bool) {
        self.settings.hide_fretboard = hide;
    }

    /// Natural-only applies to both quizzes; the active one gets a new question
    /// and the inactive one is asked again on activation.
    pub fn set_natural_only(&mut self, natural_only: bool) -> Result<(), QuizError> {
        self.settings.natural_only = natural_only;
        self.clear_inactive();
        self.next_question()
    }

    pub fn select_all_strings(&mut self) -> Result<(), QuizError> {
        self.settings.strings.clear();
        self.refresh_fretboard()
    }

    pub fn toggle_string(&mut self, string: StringIndex) -> Result<(), QuizError> {
        self.settings.toggle_string(string);
        self.refresh_fretboard()
    }

    pub fn set_fret_range(&mut self, range: FretRange) -> Result<(), QuizError> {
        self.settings.fret_range = range;
        self.refresh_fretboard()
    }

    /// Edits the allow-list without a new question; call [`Self::next_question`]
    /// once the selection is complete.
    pub fn toggle_note_filter(&mut self, pc: PitchClass) {
        self.settings.toggle_note(pc);
        self.drop_hidden_fretboard();
    }

    pub fn clear_note_filter(&mut self) {
        self.settings.note_filter.clear();
        self.drop_hidden_fretboard();
    }

    /// Fretboard filters changed: ask again if the fretboard quiz is on screen,
    /// otherwise drop its target so activation asks again.
    fn refresh_fretboard(&mut self) -> Result<(), QuizError> {
        match self.mode {
            QuizMode::Fretboard => self.next_question(),
            QuizMode::Solfege => {
                self.fretboard.clear();
                Ok(())
            }
        }
    }

    fn drop_hidden_fretboard(&mut self) {
        if self.mode == QuizMode::Solfege {
            self.fretboard.clear();
        }
    }

    /// The inactive session may hold a target the new settings reject.
    fn clear_inactive(&mut self) {
        match self.mode {
            QuizMode::Fretboard => self.solfege.clear(),
            QuizMode::Solfege => self.fretboard.clear(),
        }
    }

    fn play(&mut self, note: Playable) {
        if !self.settings.sound_enabled {
            return;
        }
        if let Err(e) = self.audio.play(note) {
            warn!("could not play {}: {}", note.pitch_name(), e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::AudioError;
    use std::cell::RefCell;
    use std::rc::Rc;

    /// Records every note; optionally fails each call.
    struct RecordingSink {
        played: Rc<RefCell<Vec<u8>>>,
        fail: bool,
    }

    impl AudioSink for RecordingSink {
        fn play(&mut self, note: Playable) -> Result<(), AudioError> {
            self.played.borrow_mut().push(note.midi_note);
            if self.fail {
                Err(AudioError::MissingSample(note.midi_note))
            } else {
                Ok(())
            }
        }
    }

    fn recording(settings: Settings, fail: bool) -> (QuizController, Rc<RefCell<Vec<u8>>>) {
        let played = Rc::new(RefCell::new(Vec::new()));
        let sink = RecordingSink {
            played: Rc::clone(&played),
            fail,
        };
        let quiz = QuizController::new(settings, QuestionGenerator::seeded(5), Box::new(sink));
        (quiz, played)
    }

    #[test]
    fn test_switching_keeps_both_sessions() {
        let mut quiz = QuizController::seeded(Settings::default(), 11);
        quiz.next_question().unwrap();
        let answer = quiz.fretboard().target().unwrap().pitch_class;
        quiz.submit_answer(answer);
        let fretboard_target = *quiz.fretboard().target().unwrap();

        quiz.switch_mode(QuizMode::Solfege).unwrap();
        assert!(quiz.solfege().is_awaiting_answer());
        let solfege_answer = quiz.solfege().target().unwrap().pitch_class;
        assert_eq!(quiz.submit_answer(solfege_answer), Some(Verdict::Correct));

        quiz.switch_mode(QuizMode::Fretboard).unwrap();
        assert_eq!(quiz.fretboard().score(), 1);
        assert_eq!(quiz.solfege().score(), 1);
        assert_eq!(quiz.fretboard().target(), Some(&fretboard_target));
    }

    #[test]
    fn test_no_eligible_targets_leaves_session_idle() {
        let mut quiz = QuizController::seeded(Settings::default(), 1);
        quiz.next_question().unwrap();
        quiz.toggle_note_filter(PitchClass::new(1).unwrap());
        quiz.set_natural_only(true).unwrap_err();
        assert!(quiz.fretboard().is_idle());
        assert_eq!(quiz.prompt().hint, "No note matches the current filters");
        assert_eq!(quiz.submit_answer(PitchClass::C), None);

        let view = quiz.recompute_view().unwrap();
        assert!(view.question_marker.is_none());

        quiz.clear_note_filter();
        quiz.next_question().unwrap();
        assert!(quiz.fretboard().is_awaiting_answer());
    }

    #[test]
    fn test_filter_changes_regenerate_fretboard() {
        let mut quiz = QuizController::seeded(Settings::default(), 3);
        quiz.next_question().unwrap();
        quiz.set_fret_range(FretRange::High).unwrap();
        let target = quiz.fretboard().target().unwrap();
        assert!(target.position.fret.number() >= 13);
        assert_eq!(target.window.start, 12);

        let sixth = StringIndex::from_number(6).unwrap();
        quiz.toggle_string(sixth).unwrap();
        assert_eq!(quiz.fretboard().target().unwrap().position.string, sixth);

        quiz.select_all_strings().unwrap();
        assert!(quiz.settings().strings.is_empty());
    }

    #[test]
    fn test_fretboard_filters_do_not_touch_solfege() {
        let mut quiz = QuizController::seeded(Settings::default(), 8);
        quiz.switch_mode(QuizMode::Solfege).unwrap();
        let before = *quiz.solfege().target().unwrap();
        quiz.set_fret_range(FretRange::All).unwrap();
        assert_eq!(quiz.solfege().target(), Some(&before));
        assert!(quiz.fretboard().is_idle());
    }

    #[test]
    fn test_audio_on_question_and_answer() {
        let (mut quiz, played) = recording(Settings::default(), false);
        quiz.next_question().unwrap();
        let target = *quiz.fretboard().target().unwrap();
        assert_eq!(
            played.borrow().as_slice(),
            &[Tuning::STANDARD.midi_note_at(target.position)]
        );

        quiz.submit_answer(PitchClass::A);
        assert_eq!(played.borrow().last(), Some(&69));

        quiz.replay_target();
        assert_eq!(played.borrow().len(), 3);
    }

    #[test]
    fn test_audio_failure_does_not_block() {
        let (mut quiz, played) = recording(Settings::default(), true);
        quiz.next_question().unwrap();
        let answer = quiz.fretboard().target().unwrap().pitch_class;
        assert_eq!(quiz.submit_answer(answer), Some(Verdict::Correct));
        assert_eq!(played.borrow().len(), 2);
    }

    #[test]
    fn test_sound_disabled() {
        let mut settings = Settings::default();
        settings.sound_enabled = false;
        let (mut quiz, played) = recording(settings, false);
        quiz.next_question().unwrap();
        quiz.replay_target();
        assert!(played.borrow().is_empty());
    }

    #[test]
    fn test_sound_toggle_mutes_and_restores() {
        let (mut quiz, played) = recording(Settings::default(), false);
        quiz.next_question().unwrap();
        assert_eq!(played.borrow().len(), 1);

        quiz.set_sound_enabled(false);
        quiz.replay_target();
        quiz.next_question().unwrap();
        assert_eq!(played.borrow().len(), 1);

        quiz.set_sound_enabled(true);
        quiz.replay_target();
        assert_eq!(played.borrow().len(), 2);
    }

    #[test]
    fn test_natural_only_in_solfege_drops_sharp_fretboard_target() {
        let mut quiz = QuizController::seeded(Settings::default(), 21);
        let mut sharp = false;
        for _ in 0..200 {
            quiz.next_question().unwrap();
            if !quiz.fretboard().target().unwrap().pitch_class.is_natural() {
                sharp = true;
                break;
            }
        }
        assert!(sharp, "no sharp target drawn");

        quiz.switch_mode(QuizMode::Solfege).unwrap();
        quiz.set_natural_only(true).unwrap();
        assert!(quiz.fretboard().is_idle());
        assert!(quiz.solfege().target().unwrap().pitch_class.is_natural());

        quiz.switch_mode(QuizMode::Fretboard).unwrap();
        let answer = quiz.fretboard().target().unwrap().pitch_class;
        assert!(answer.is_natural());
        assert!(quiz.answer_choices().iter().any(|c| c.pitch_class == answer));
    }

    #[test]
    fn test_string_toggle_in_solfege_drops_fretboard_target() {
        let mut quiz = QuizController::seeded(Settings::default(), 4);
        let sixth = StringIndex::from_number(6).unwrap();
        quiz.next_question().unwrap();
        while quiz.fretboard().target().unwrap().position.string == sixth {
            quiz.next_question().unwrap();
        }

        quiz.switch_mode(QuizMode::Solfege).unwrap();
        quiz.toggle_string(sixth).unwrap();
        assert!(quiz.fretboard().is_idle());
        assert!(quiz.solfege().is_awaiting_answer());

        quiz.switch_mode(QuizMode::Fretboard).unwrap();
        let target = *quiz.fretboard().target().unwrap();
        assert_eq!(target.position.string, sixth);
        assert!(quiz.settings().quiz_filter().accepts(&quiz.tuning, target.position));
    }

    #[test]
    fn test_natural_only_in_fretboard_drops_solfege_target() {
        let mut quiz = QuizController::seeded(Settings::default(), 6);
        quiz.switch_mode(QuizMode::Solfege).unwrap();
        let answer = quiz.solfege().target().unwrap().pitch_class;
        quiz.submit_answer(answer);
        quiz.next_question().unwrap();

        quiz.switch_mode(QuizMode::Fretboard).unwrap();
        quiz.set_natural_only(true).unwrap();
        assert!(quiz.solfege().is_idle());
        assert_eq!(quiz.solfege().score(), 1);

        quiz.switch_mode(QuizMode::Solfege).unwrap();
        assert!(quiz.solfege().target().unwrap().pitch_class.is_natural());
    }

    #[test]
    fn test_apply_settings_regenerates_and_keeps_scores() {
        let mut quiz = QuizController::seeded(Settings::default(), 13);
        quiz.next_question().unwrap();
        let answer = quiz.fretboard().target().unwrap().pitch_class;
        quiz.submit_answer(answer);
        quiz.switch_mode(QuizMode::Solfege).unwrap();
        quiz.switch_mode(QuizMode::Fretboard).unwrap();

        let settings = Settings::from_yaml("natural-only: true
strings: [1]").unwrap();
        quiz.apply_settings(settings).unwrap();

        let target = quiz.fretboard().target().unwrap();
        assert_eq!(target.position.string, StringIndex::from_number(1).unwrap());
        assert!(target.pitch_class.is_natural());
        assert!(quiz.fretboard().is_awaiting_answer());
        assert_eq!(quiz.fretboard().score(), 1);
        assert!(quiz.solfege().is_idle());
        assert!(quiz.settings().natural_only);
    }

    #[test]
    fn test_hidden_fretboard_has_no_view() {
        let mut quiz = QuizController::seeded(Settings::default(), 2);
        quiz.next_question().unwrap();
        assert!(quiz.recompute_view().is_some());
        quiz.set_hide_fretboard(true);
        assert!(quiz.recompute_view().is_none());
    }

    #[test]
    fn test_answer_choices_follow_settings() {
        let mut quiz = QuizController::seeded(Settings::default(), 2);
        assert_eq!(quiz.answer_choices().len(), 12);
        quiz.set_naming_system(NamingSystem::Solfege);
        quiz.set_natural_only(true).unwrap();
        let choices = quiz.answer_choices();
        assert_eq!(choices.len(), 7);
        assert_eq!(choices[2].label, "ミ");
    }

    #[test]
    fn test_mode_from_str() {
        assert_eq!(QuizMode::from_str("Solfege"), Some(QuizMode::Solfege));
        assert_eq!(QuizMode::from_str("fretboard"), Some(QuizMode::Fretboard));
        assert_eq!(QuizMode::from_str("piano"), None);
    }
}
