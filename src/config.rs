//! # Settings
//!
//! The configuration surface the quiz reads on every new question.
//!
//! ## Format
//! Settings are a YAML document; every key is optional:
//! ```yaml
//! naming-system: solfege   # letter | solfege
//! natural-only: true       # hide sharps/flats
//! show-open-strings: true  # label open strings on the fretboard
//! sound: false
//! hide-fretboard: false
//! strings: [1, 2]          # 1-based string numbers, empty = all
//! fret-range: "13-24"      # "1-12" | "13-24" | "all"
//! note-filter: [C, E]      # note names or indices, empty = no restriction
//! ```
//!
//! ## Validation
//! The raw document is deserialized into [`RawSettings`] and then checked.
//! Out-of-range strings, unknown ranges and unknown note names are rejected
//! here with `QuizError::InvalidConfiguration`, so the filter policy only ever
//! sees valid values.
//!
//! ## Example
//! ```rust
//! use fretquiz::{FretRange, NamingSystem, Settings};
//!
//! let settings = Settings::from_yaml("naming-system: solfege\nfret-range: all\n")?;
//! assert_eq!(settings.naming_system, NamingSystem::Solfege);
//! assert_eq!(settings.fret_range, FretRange::All);
//! # Ok::<(), fretquiz::QuizError>(())
//! ```

use serde::Deserialize;
use std::collections::BTreeSet;
use std::fs;
use std::path::Path;

use crate::error::QuizError;
use crate::filter::{FretRange, QuizFilter};
use crate::instrument::StringIndex;
use crate::pitch::{NamingSystem, PitchClass};

/// Raw settings for YAML deserialization
#[derive(Deserialize, Debug, Default)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct RawSettings {
    pub naming_system: Option<String>,
    pub natural_only: Option<bool>,
    pub show_open_strings: Option<bool>,
    pub sound: Option<bool>,
    pub hide_fretboard: Option<bool>,
    pub strings: Option<Vec<usize>>,
    pub fret_range: Option<String>,
    pub note_filter: Option<Vec<NoteSpec>>,
}

/// A note given either by name or by pitch-class index
#[derive(Deserialize, Debug)]
#[serde(untagged)]
pub enum NoteSpec {
    Index(u8),
    Name(String),
}

impl NoteSpec {
    fn resolve(&self) -> Result<PitchClass, QuizError> {
        match self {
            NoteSpec::Index(i) => PitchClass::new(*i),
            NoteSpec::Name(name) => name.parse(),
        }
    }
}

/// Validated learner settings.
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub naming_system: NamingSystem,
    /// Hides sharps/flats from both quizzes and from the answer choices
    pub natural_only: bool,
    pub show_open_strings: bool,
    pub sound_enabled: bool,
    pub hide_fretboard: bool,
    pub strings: BTreeSet<StringIndex>,
    pub fret_range: FretRange,
    /// Kept in selection order for the filter label
    pub note_filter: Vec<PitchClass>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            naming_system: NamingSystem::Letter,
            natural_only: false,
            show_open_strings: false,
            sound_enabled: true,
            hide_fretboard: false,
            strings: BTreeSet::new(),
            fret_range: FretRange::Low,
            note_filter: Vec::new(),
        }
    }
}

impl Settings {
    /// Parse and validate a YAML settings document.
    pub fn from_yaml(content: &str) -> Result<Self, QuizError> {
        // An empty document deserializes to unit rather than a map
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        let raw: RawSettings =
            serde_yaml::from_str(content).map_err(|e| QuizError::SettingsError(e.to_string()))?;
        Self::from_raw(raw)
    }

    /// Read settings from a YAML file.
    pub fn load(path: &Path) -> Result<Self, QuizError> {
        let content = fs::read_to_string(path).map_err(|source| QuizError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_yaml(&content)
    }

    pub fn from_raw(raw: RawSettings) -> Result<Self, QuizError> {
        let defaults = Self::default();

        let naming_system = match &raw.naming_system {
            Some(name) => NamingSystem::from_str(name).ok_or_else(|| {
                QuizError::InvalidConfiguration(format!("Unknown naming system: {}", name))
            })?,
            None => defaults.naming_system,
        };

        let fret_range = match &raw.fret_range {
            Some(range) => FretRange::from_str(range).ok_or_else(|| {
                QuizError::InvalidConfiguration(format!("Unknown fret range: {}", range))
            })?,
            None => defaults.fret_range,
        };

        let strings = raw
            .strings
            .unwrap_or_default()
            .into_iter()
            .map(StringIndex::from_number)
            .collect::<Result<BTreeSet<_>, _>>()?;

        let mut note_filter = Vec::new();
        for spec in raw.note_filter.unwrap_or_default() {
            let pc = spec.resolve()?;
            if !note_filter.contains(&pc) {
                note_filter.push(pc);
            }
        }

        Ok(Self {
            naming_system,
            natural_only: raw.natural_only.unwrap_or(defaults.natural_only),
            show_open_strings: raw.show_open_strings.unwrap_or(defaults.show_open_strings),
            sound_enabled: raw.sound.unwrap_or(defaults.sound_enabled),
            hide_fretboard: raw.hide_fretboard.unwrap_or(defaults.hide_fretboard),
            strings,
            fret_range,
            note_filter,
        })
    }

    /// Snapshot of the fretboard constraints for one question.
    pub fn quiz_filter(&self) -> QuizFilter {
        QuizFilter {
            strings: self.strings.clone(),
            fret_range: self.fret_range,
            natural_only: self.natural_only,
            allowed: self.note_filter.iter().copied().collect(),
        }
    }

    /// Add the string to the selection, or remove it if already selected.
    pub fn toggle_string(&mut self, string: StringIndex) {
        if !self.strings.remove(&string) {
            self.strings.insert(string);
        }
    }

    /// Add the note to the allow-list, or remove it if already listed.
    pub fn toggle_note(&mut self, pc: PitchClass) {
        if let Some(i) = self.note_filter.iter().position(|&n| n == pc) {
            self.note_filter.remove(i);
        } else {
            self.note_filter.push(pc);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_document_gives_defaults() {
        assert_eq!(Settings::from_yaml("").unwrap(), Settings::default());
        assert_eq!(Settings::from_yaml("{}").unwrap(), Settings::default());
    }

    #[test]
    fn test_full_document() {
        let yaml = r#"
naming-system: solfege
natural-only: true
show-open-strings: true
sound: false
hide-fretboard: true
strings: [1, 6]
fret-range: "13-24"
note-filter: [C, ミ, 7]
"#;
        let settings = Settings::from_yaml(yaml).unwrap();
        assert_eq!(settings.naming_system, NamingSystem::Solfege);
        assert!(settings.natural_only);
        assert!(settings.show_open_strings);
        assert!(!settings.sound_enabled);
        assert!(settings.hide_fretboard);
        assert_eq!(
            settings.strings.iter().map(|s| s.index()).collect::<Vec<_>>(),
            vec![0, 5]
        );
        assert_eq!(settings.fret_range, FretRange::High);
        assert_eq!(
            settings.note_filter,
            vec![PitchClass::C, PitchClass::E, PitchClass::G]
        );
    }

    #[test]
    fn test_string_out_of_range_is_rejected() {
        let result = Settings::from_yaml("strings: [0]");
        assert!(matches!(result, Err(QuizError::InvalidConfiguration(_))));
        let result = Settings::from_yaml("strings: [7]");
        assert!(matches!(result, Err(QuizError::InvalidConfiguration(_))));
    }

    #[test]
    fn test_unknown_values_are_rejected() {
        assert!(matches!(
            Settings::from_yaml("fret-range: 5-9"),
            Err(QuizError::InvalidConfiguration(_))
        ));
        assert!(matches!(
            Settings::from_yaml("note-filter: [H]"),
            Err(QuizError::InvalidConfiguration(_))
        ));
        assert!(matches!(
            Settings::from_yaml("naming-system: kana"),
            Err(QuizError::InvalidConfiguration(_))
        ));
    }

    #[test]
    fn test_malformed_yaml() {
        assert!(matches!(
            Settings::from_yaml("strings: [1, 2"),
            Err(QuizError::SettingsError(_))
        ));
        assert!(matches!(
            Settings::from_yaml("tempo: 120"),
            Err(QuizError::SettingsError(_))
        ));
    }

    #[test]
    fn test_duplicate_notes_collapse() {
        let settings = Settings::from_yaml("note-filter: [C, 0, ド]").unwrap();
        assert_eq!(settings.note_filter, vec![PitchClass::C]);
    }

    #[test]
    fn test_toggles() {
        let mut settings = Settings::default();
        let second = StringIndex::from_number(2).unwrap();
        settings.toggle_string(second);
        assert!(settings.strings.contains(&second));
        settings.toggle_string(second);
        assert!(settings.strings.is_empty());

        settings.toggle_note(PitchClass::E);
        settings.toggle_note(PitchClass::C);
        assert_eq!(settings.note_filter, vec![PitchClass::E, PitchClass::C]);
        settings.toggle_note(PitchClass::E);
        assert_eq!(settings.note_filter, vec![PitchClass::C]);
    }

    #[test]
    fn test_quiz_filter_snapshot() {
        let settings =
            Settings::from_yaml("strings: [3]\nnote-filter: [G]\nnatural-only: true").unwrap();
        let filter = settings.quiz_filter();
        assert!(filter.natural_only);
        assert_eq!(filter.strings.len(), 1);
        assert!(filter.allowed.contains(&PitchClass::G));
    }
}
