//! # Pitch-Class Model
//!
//! The 12 equal-tempered pitch classes and their two spellings.
//!
//! ## Naming Systems
//! Every pitch class has a display name in two systems:
//! - **Letter**: `C`, `C#(Db)`, `D`, ... `B`
//! - **Solfège** (fixed-do): `ド`, `ド#(レb)`, `レ`, ... `シ`
//!
//! Altered pitch classes carry both enharmonic spellings in one label.
//!
//! ## Natural Set
//! The 7 unaltered pitch classes (C D E F G A B) form the natural set. Each of
//! them also has a single-letter name used where a compact label is wanted
//! (e.g. the note-filter button).
//!
//! ## Arithmetic
//! Pitch-class arithmetic is always reduced modulo 12, so a `PitchClass` can
//! never hold a value outside `0..=11`.
//!
//! ## Related Modules
//! - `instrument` - Maps fretboard positions to pitch classes
//! - `filter` - Uses the natural set for the natural-only constraint
//! - `prompt` - Renders names for the learner

use serde::Serialize;
use std::fmt;
use std::str::FromStr;

use crate::error::QuizError;

/// Number of pitch classes in an octave
pub const PITCH_CLASS_COUNT: u8 = 12;

const LETTER_NAMES: [&str; 12] = [
    "C", "C#(Db)", "D", "D#(Eb)", "E", "F", "F#(Gb)", "G", "G#(Ab)", "A", "A#(Bb)", "B",
];

const SOLFEGE_NAMES: [&str; 12] = [
    "ド", "ド#(レb)", "レ", "レ#(ミb)", "ミ", "ファ", "ファ#(ソb)", "ソ", "ソ#(ラb)", "ラ", "ラ#(シb)", "シ",
];

/// Natural pitch classes paired with their single-letter names
const NATURALS: [(u8, &str); 7] = [
    (0, "C"),
    (2, "D"),
    (4, "E"),
    (5, "F"),
    (7, "G"),
    (9, "A"),
    (11, "B"),
];

/// Romanized fixed-do syllables, accepted when parsing
const ROMANIZED_SOLFEGE: [(&str, u8); 8] = [
    ("do", 0),
    ("re", 2),
    ("mi", 4),
    ("fa", 5),
    ("sol", 7),
    ("la", 9),
    ("si", 11),
    ("ti", 11),
];

/// One of the 12 semitone identities within an octave (0 = C).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct PitchClass(u8);

impl PitchClass {
    pub const C: PitchClass = PitchClass(0);
    pub const D: PitchClass = PitchClass(2);
    pub const E: PitchClass = PitchClass(4);
    pub const F: PitchClass = PitchClass(5);
    pub const G: PitchClass = PitchClass(7);
    pub const A: PitchClass = PitchClass(9);
    pub const B: PitchClass = PitchClass(11);

    /// Strict constructor for values coming from outside the core.
    pub fn new(value: u8) -> Result<Self, QuizError> {
        if value < PITCH_CLASS_COUNT {
            Ok(Self(value))
        } else {
            Err(QuizError::InvalidConfiguration(format!(
                "pitch class {} is outside 0..=11",
                value
            )))
        }
    }

    /// Reduce any semitone count to its pitch class.
    pub fn wrapping(semitones: i32) -> Self {
        Self(semitones.rem_euclid(PITCH_CLASS_COUNT as i32) as u8)
    }

    pub fn index(self) -> u8 {
        self.0
    }

    /// Transpose up by `semitones`, reduced modulo 12.
    pub fn transpose(self, semitones: i32) -> Self {
        Self::wrapping(self.0 as i32 + semitones)
    }

    /// All 12 pitch classes in ascending order from C.
    pub fn all() -> impl Iterator<Item = PitchClass> {
        (0..PITCH_CLASS_COUNT).map(PitchClass)
    }

    /// The 7 natural pitch classes in ascending order from C.
    pub fn naturals() -> impl Iterator<Item = PitchClass> {
        NATURALS.iter().map(|&(pc, _)| PitchClass(pc))
    }

    pub fn is_natural(self) -> bool {
        NATURALS.iter().any(|&(pc, _)| pc == self.0)
    }

    /// Single-letter name, only defined for natural pitch classes.
    pub fn natural_letter(self) -> Option<&'static str> {
        NATURALS
            .iter()
            .find(|&&(pc, _)| pc == self.0)
            .map(|&(_, letter)| letter)
    }

    /// Display name in the given naming system (enharmonic pair for altered notes).
    pub fn name(self, system: NamingSystem) -> &'static str {
        match system {
            NamingSystem::Letter => LETTER_NAMES[self.0 as usize],
            NamingSystem::Solfege => SOLFEGE_NAMES[self.0 as usize],
        }
    }
}

impl fmt::Display for PitchClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name(NamingSystem::Letter))
    }
}

impl TryFrom<u8> for PitchClass {
    type Error = QuizError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl FromStr for PitchClass {
    type Err = QuizError;

    /// Parse a note name in either system.
    ///
    /// Accepts full labels (`C#(Db)`, `ド#(レb)`), either half of an enharmonic
    /// pair (`Db`, `レb`), lowercase letters (`c#`), romanized syllables
    /// (`sol`, `ti`, `fa#`), kana with accidentals (`ミ#`, `ドb`) and bare
    /// indices (`0`..`11`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let unknown = || QuizError::InvalidConfiguration(format!("Unknown note name: {}", s));

        if trimmed.is_empty() {
            return Err(unknown());
        }

        if let Ok(index) = trimmed.parse::<u8>() {
            return Self::new(index);
        }

        for pc in Self::all() {
            for system in [NamingSystem::Letter, NamingSystem::Solfege] {
                let label = pc.name(system);
                if label == trimmed || enharmonic_spellings(label).any(|part| part == trimmed) {
                    return Ok(pc);
                }
            }
        }

        parse_spelled(trimmed).ok_or_else(unknown)
    }
}

/// Split `X#(Yb)` into `X#` and `Yb`; natural labels yield nothing.
fn enharmonic_spellings(label: &str) -> impl Iterator<Item = &str> {
    label
        .split_once('(')
        .map(|(sharp, flat)| [sharp, flat.trim_end_matches(')')])
        .into_iter()
        .flatten()
}

/// Letter, romanized solfège or kana stem, with trailing `#`/`b` accidentals.
fn parse_spelled(s: &str) -> Option<PitchClass> {
    let lower = s.to_ascii_lowercase();
    let stem = lower.trim_end_matches(['#', 'b']);
    // "b" alone is the note B, not a flat with an empty stem
    let (stem, accidentals) = if stem.is_empty() {
        (&lower[..1], &lower[1..])
    } else {
        (stem, &lower[stem.len()..])
    };

    let base = match stem {
        "c" => 0,
        "d" => 2,
        "e" => 4,
        "f" => 5,
        "g" => 7,
        "a" => 9,
        "b" => 11,
        _ => ROMANIZED_SOLFEGE
            .iter()
            .find(|&&(syllable, _)| syllable == stem)
            .map(|&(_, pc)| pc)
            .or_else(|| {
                SOLFEGE_NAMES
                    .iter()
                    .position(|&name| name == stem && !name.contains('('))
                    .map(|index| index as u8)
            })?,
    };

    let offset: i32 = accidentals
        .chars()
        .map(|c| if c == '#' { 1 } else { -1 })
        .sum();
    Some(PitchClass::wrapping(base as i32 + offset))
}

/// Which name representation labels notes for the learner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NamingSystem {
    #[default]
    Letter,
    Solfege,
}

impl NamingSystem {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "letter" | "english" => Some(NamingSystem::Letter),
            "solfege" | "solfège" => Some(NamingSystem::Solfege),
            _ => None,
        }
    }

    /// The other naming system.
    pub fn other(self) -> Self {
        match self {
            NamingSystem::Letter => NamingSystem::Solfege,
            NamingSystem::Solfege => NamingSystem::Letter,
        }
    }
}
