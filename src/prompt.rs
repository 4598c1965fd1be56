//! Learner-facing texts: questions, hints, verdicts, answer choices and the
//! note-filter label.

use serde::Serialize;

use crate::instrument::FretboardPosition;
use crate::pitch::{NamingSystem, PitchClass};
use crate::quiz::{FretboardTarget, SolfegeTarget, Verdict};

/// What the learner is asked.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Prompt {
    pub question: String,
    /// Position hint for the fretboard quiz, explanation when idle
    pub hint: String,
    /// Note name shown for translation (solfège quiz only)
    pub display: Option<&'static str>,
}

/// One answer button.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnswerChoice {
    pub pitch_class: PitchClass,
    pub label: &'static str,
}

pub fn position_hint(position: FretboardPosition) -> String {
    if position.fret.is_open() {
        format!("String {}, open", position.string.number())
    } else {
        format!("String {}, fret {}", position.string.number(), position.fret.number())
    }
}

pub fn fretboard_prompt(target: Option<&FretboardTarget>) -> Prompt {
    match target {
        Some(target) if target.position.fret.is_open() => Prompt {
            question: "What is the name of this open string?".to_string(),
            hint: position_hint(target.position),
            display: None,
        },
        Some(target) => Prompt {
            question: "What is the name of the note at this position?".to_string(),
            hint: position_hint(target.position),
            display: None,
        },
        None => Prompt {
            question: "What is the name of the note at this position?".to_string(),
            hint: "No note matches the current filters".to_string(),
            display: None,
        },
    }
}

/// The target is shown in the system the learner is *not* answering in.
pub fn solfege_prompt(target: Option<&SolfegeTarget>, answer_system: NamingSystem) -> Prompt {
    let question = match answer_system {
        NamingSystem::Letter => "What is this note in letter names?",
        NamingSystem::Solfege => "What is this note in solfège?",
    };
    Prompt {
        question: question.to_string(),
        hint: String::new(),
        display: target.map(|t| t.pitch_class.name(answer_system.other())),
    }
}

pub fn verdict_message(verdict: Verdict, system: NamingSystem) -> String {
    match verdict {
        Verdict::Correct => "Correct!".to_string(),
        Verdict::Incorrect { correct } => {
            format!("Incorrect... the answer is {}", correct.name(system))
        }
    }
}

/// Answer buttons; natural-only hides the altered ones.
pub fn answer_choices(system: NamingSystem, natural_only: bool) -> Vec<AnswerChoice> {
    PitchClass::all()
        .filter(|pc| !natural_only || pc.is_natural())
        .map(|pitch_class| AnswerChoice {
            pitch_class,
            label: pitch_class.name(system),
        })
        .collect()
}

/// Label of the note-filter control, in selection order.
pub fn note_filter_label(filter: &[PitchClass]) -> String {
    let naturals = PitchClass::naturals().count();
    let covers_all_naturals =
        filter.len() == naturals && PitchClass::naturals().all(|pc| filter.contains(&pc));
    if filter.is_empty() || covers_all_naturals {
        return "Filter notes".to_string();
    }
    let names: Vec<&str> = filter
        .iter()
        .map(|pc| pc.natural_letter().unwrap_or_else(|| pc.name(NamingSystem::Letter)))
        .collect();
    format!("Filter: {}", names.join(", "))
}
