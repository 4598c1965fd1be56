//! # Filter Policy
//!
//! Computes the set of valid quiz targets under the learner's active filters.
//!
//! ## Fretboard Mode
//! The candidate set is the cartesian product of the selected strings (all six
//! when none are selected) and the fret range, minus:
//! 1. positions whose pitch class is altered, when natural-only is on
//! 2. positions whose pitch class is not in the note allow-list, when the list is non-empty
//!
//! ## Solfège Mode
//! Natural-only yields exactly the 7 naturals, otherwise all 12 pitch classes.
//!
//! An empty result is a legitimate state, not a failure of this module; the
//! question generator turns it into `QuizError::NoEligibleTargets`.

use serde::Serialize;
use std::collections::BTreeSet;
use std::fmt;
use std::ops::RangeInclusive;

use crate::instrument::{Fret, FretboardPosition, StringIndex, Tuning, FRET_COUNT};
use crate::pitch::PitchClass;

/// Fret span the fretboard quiz draws targets from (bounds inclusive).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum FretRange {
    /// Frets 0-12, labelled "1-12" because the open string rides along
    #[default]
    #[serde(rename = "1-12")]
    Low,
    /// Frets 13-24
    #[serde(rename = "13-24")]
    High,
    /// Frets 0-24
    #[serde(rename = "all")]
    All,
}

impl FretRange {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim() {
            "1-12" | "0-12" | "low" => Some(FretRange::Low),
            "13-24" | "high" => Some(FretRange::High),
            "all" | "0-24" => Some(FretRange::All),
            _ => None,
        }
    }

    pub fn frets(self) -> RangeInclusive<u8> {
        match self {
            FretRange::Low => 0..=12,
            FretRange::High => 13..=FRET_COUNT,
            FretRange::All => 0..=FRET_COUNT,
        }
    }

    pub fn contains(self, fret: Fret) -> bool {
        self.frets().contains(&fret.number())
    }
}

impl fmt::Display for FretRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            FretRange::Low => "1-12",
            FretRange::High => "13-24",
            FretRange::All => "all",
        };
        f.write_str(label)
    }
}

/// Snapshot of the fretboard-mode constraints for one question.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct QuizFilter {
    /// Empty means every string is eligible.
    pub strings: BTreeSet<StringIndex>,
    pub fret_range: FretRange,
    pub natural_only: bool,
    /// Empty means no restriction.
    pub allowed: BTreeSet<PitchClass>,
}

impl QuizFilter {
    /// Whether a string takes part in the quiz.
    pub fn is_string_active(&self, string: StringIndex) -> bool {
        self.strings.is_empty() || self.strings.contains(&string)
    }

    /// Whether a pitch class passes the naturalness and allow-list constraints.
    pub fn admits(&self, pc: PitchClass) -> bool {
        if self.natural_only && !pc.is_natural() {
            return false;
        }
        self.allowed.is_empty() || self.allowed.contains(&pc)
    }

    /// Whether a position satisfies every active constraint.
    pub fn accepts(&self, tuning: &Tuning, position: FretboardPosition) -> bool {
        self.is_string_active(position.string)
            && self.fret_range.contains(position.fret)
            && self.admits(tuning.pitch_class_at(position))
    }
}

/// Every position that satisfies the filter.
pub fn enumerate_valid_positions(tuning: &Tuning, filter: &QuizFilter) -> Vec<FretboardPosition> {
    let strings: Vec<StringIndex> = if filter.strings.is_empty() {
        StringIndex::all().collect()
    } else {
        filter.strings.iter().copied().collect()
    };

    let mut positions = Vec::new();
    for string in strings {
        for fret in filter.fret_range.frets() {
            let Ok(fret) = Fret::new(fret) else {
                continue;
            };
            let position = FretboardPosition::new(string, fret);
            if filter.admits(tuning.pitch_class_at(position)) {
                positions.push(position);
            }
        }
    }
    positions
}

/// Candidate targets for the name-translation quiz.
pub fn enumerate_valid_pitch_classes(natural_only: bool) -> Vec<PitchClass> {
    if natural_only {
        PitchClass::naturals().collect()
    } else {
        PitchClass::all().collect()
    }
}
