//! # Instrument Geometry
//!
//! Strings, frets and the tuning that turns a fretboard position into a pitch class.
//!
//! ## Coordinates
//! - `StringIndex` is 0-based, 0 = the highest (thinnest) string. Learners see
//!   1-based string numbers, so `StringIndex::from_number(1)` is string 0.
//! - `Fret` 0 is the open string, up to `FRET_COUNT`.
//!
//! Both are validated when they are built, so `Tuning::pitch_class_at` is total.
//!
//! ## Standard Tuning
//! ```text
//! string  number  open  MIDI
//!   0       1      E     64
//!   1       2      B     59
//!   2       3      G     55
//!   3       4      D     50
//!   4       5      A     45
//!   5       6      E     40
//! ```

use serde::Serialize;
use std::fmt;

use crate::error::QuizError;
use crate::pitch::PitchClass;

pub const STRING_COUNT: usize = 6;
pub const FRET_COUNT: u8 = 24;

/// One instrument string, 0-based from the highest string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct StringIndex(u8);

impl StringIndex {
    pub fn new(index: usize) -> Result<Self, QuizError> {
        if index < STRING_COUNT {
            Ok(Self(index as u8))
        } else {
            Err(QuizError::InvalidConfiguration(format!(
                "string index {} is outside 0..={}",
                index,
                STRING_COUNT - 1
            )))
        }
    }

    /// Build from the 1-based string number shown to learners.
    pub fn from_number(number: usize) -> Result<Self, QuizError> {
        if (1..=STRING_COUNT).contains(&number) {
            Ok(Self((number - 1) as u8))
        } else {
            Err(QuizError::InvalidConfiguration(format!(
                "string number {} is outside 1..={}",
                number, STRING_COUNT
            )))
        }
    }

    pub fn all() -> impl Iterator<Item = StringIndex> {
        (0..STRING_COUNT as u8).map(StringIndex)
    }

    pub fn index(self) -> usize {
        self.0 as usize
    }

    /// 1-based string number.
    pub fn number(self) -> usize {
        self.0 as usize + 1
    }
}

/// Fret number, 0 = open string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct Fret(u8);

impl Fret {
    pub const OPEN: Fret = Fret(0);

    pub fn new(fret: u8) -> Result<Self, QuizError> {
        if fret <= FRET_COUNT {
            Ok(Self(fret))
        } else {
            Err(QuizError::InvalidConfiguration(format!(
                "fret {} is outside 0..={}",
                fret, FRET_COUNT
            )))
        }
    }

    pub fn number(self) -> u8 {
        self.0
    }

    pub fn is_open(self) -> bool {
        self.0 == 0
    }
}

/// A (string, fret) pair on the fretboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct FretboardPosition {
    pub string: StringIndex,
    pub fret: Fret,
}

impl FretboardPosition {
    pub fn new(string: StringIndex, fret: Fret) -> Self {
        Self { string, fret }
    }
}

impl fmt::Display for FretboardPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "string {} fret {}", self.string.number(), self.fret.number())
    }
}

/// Open-string pitch classes and MIDI notes, one per string.
#[derive(Debug, Clone, PartialEq)]
pub struct Tuning {
    open_strings: [PitchClass; STRING_COUNT],
    open_midi: [u8; STRING_COUNT],
}

impl Tuning {
    /// Standard guitar tuning, E B G D A E from string 1 to string 6.
    pub const STANDARD: Tuning = Tuning {
        open_strings: [
            PitchClass::E,
            PitchClass::B,
            PitchClass::G,
            PitchClass::D,
            PitchClass::A,
            PitchClass::E,
        ],
        open_midi: [64, 59, 55, 50, 45, 40],
    };

    /// Open-string pitch class for a string.
    pub fn open_pitch_class(&self, string: StringIndex) -> PitchClass {
        self.open_strings[string.index()]
    }

    /// `(open pitch class + fret) mod 12`
    pub fn pitch_class_at(&self, position: FretboardPosition) -> PitchClass {
        self.open_pitch_class(position.string)
            .transpose(position.fret.number() as i32)
    }

    /// Absolute MIDI note sounded at a position.
    pub fn midi_note_at(&self, position: FretboardPosition) -> u8 {
        self.open_midi[position.string.index()] + position.fret.number()
    }
}

impl Default for Tuning {
    fn default() -> Self {
        Self::STANDARD
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pos(string: usize, fret: u8) -> FretboardPosition {
        FretboardPosition::new(StringIndex::new(string).unwrap(), Fret::new(fret).unwrap())
    }

    #[test]
    fn test_pitch_class_formula_over_whole_board() {
        let tuning = Tuning::STANDARD;
        let open = [4u8, 11, 7, 2, 9, 4];
        for string in 0..STRING_COUNT {
            for fret in 0..=FRET_COUNT {
                let pc = tuning.pitch_class_at(pos(string, fret));
                assert_eq!(pc.index(), (open[string] + fret) % 12);
                assert!(pc.index() < 12);
            }
        }
    }

    #[test]
    fn test_open_high_e() {
        assert_eq!(Tuning::STANDARD.pitch_class_at(pos(0, 0)), PitchClass::E);
    }

    #[test]
    fn test_low_e_third_fret_is_g() {
        assert_eq!(Tuning::STANDARD.pitch_class_at(pos(5, 3)), PitchClass::G);
    }

    #[test]
    fn test_twelfth_fret_is_octave() {
        for string in StringIndex::all() {
            let open = FretboardPosition::new(string, Fret::OPEN);
            let octave = FretboardPosition::new(string, Fret::new(12).unwrap());
            assert_eq!(
                Tuning::STANDARD.pitch_class_at(open),
                Tuning::STANDARD.pitch_class_at(octave)
            );
            assert_eq!(
                Tuning::STANDARD.midi_note_at(octave),
                Tuning::STANDARD.midi_note_at(open) + 12
            );
        }
    }

    #[test]
    fn test_boundary_rejection() {
        assert!(StringIndex::new(5).is_ok());
        assert!(StringIndex::new(6).is_err());
        assert!(StringIndex::from_number(0).is_err());
        assert_eq!(StringIndex::from_number(6).unwrap().index(), 5);
        assert!(Fret::new(24).is_ok());
        assert!(matches!(Fret::new(25), Err(QuizError::InvalidConfiguration(_))));
    }

    #[test]
    fn test_midi_range() {
        assert_eq!(Tuning::STANDARD.midi_note_at(pos(5, 0)), 40);
        assert_eq!(Tuning::STANDARD.midi_note_at(pos(0, 24)), 88);
    }
}
