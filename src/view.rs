//! # Fretboard View Model
//!
//! Pure projection of the current question into drawable geometry.
//!
//! ## Purpose
//! The renderer never computes coordinates itself. It asks for a
//! [`FretboardView`] and draws what it finds: fret lines, inlays, strings,
//! fret numbers, optional open-string labels and the question marker.
//!
//! ## Layout
//! ```text
//!  x:  0    40   120  200 ...                     1000 1040
//!      |    ‖    |    |                            |    |
//!      open nut  1    2   ...                      12
//!      col
//! ```
//! - 13 columns of `FRET_WIDTH` (the open-string column plus 12 frets)
//! - fret line `i` of the window sits at `(i + 0.5) * FRET_WIDTH`
//! - a fretted note is drawn between its two fret lines, at `i * FRET_WIDTH`
//! - an open-string note is drawn in the narrower open column at `0.25 * FRET_WIDTH`
//! - string `s` runs at `y = (s + 0.5) * FRET_HEIGHT`
//! - fret numbers sit in a strip of `FRET_NUMBER_AREA_HEIGHT` below the strings
//!
//! ## Display Window
//! Only 12 frets are shown at once. The window starts at fret 0 when the
//! target is at or below fret 12, and at fret 12 otherwise, so the target is
//! always visible.
//!
//! The projection holds no state and uses no randomness; computing it twice
//! from the same inputs yields identical geometry.

use serde::Serialize;

use crate::config::Settings;
use crate::instrument::{Fret, StringIndex, Tuning, STRING_COUNT};
use crate::quiz::FretboardTarget;

pub const FRET_WIDTH: f64 = 80.0;
pub const FRET_HEIGHT: f64 = 35.0;
pub const FRET_NUMBER_AREA_HEIGHT: f64 = 30.0;
pub const DISPLAY_FRET_COUNT: u8 = 12;

/// Frets carrying an inlay; 12 and 24 get a double dot
pub const POSITION_MARKERS: [u8; 10] = [3, 5, 7, 9, 12, 15, 17, 19, 21, 24];

const NUT_WIDTH: f64 = 8.0;
const FRET_STROKE: f64 = 3.0;
const OCTAVE_FRET_STROKE: f64 = 5.0;
const INLAY_RADIUS: f64 = 6.0;
const OPEN_COLUMN_X: f64 = 0.25 * FRET_WIDTH;
const OPEN_LABEL_BASELINE: f64 = 6.0;
const FRET_NUMBER_BASELINE: f64 = 5.0;

/// First fret of the 12-fret window on screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DisplayWindow {
    pub start: u8,
}

impl DisplayWindow {
    /// The window that keeps `fret` visible.
    pub fn for_fret(fret: Fret) -> Self {
        let start = if fret.number() > DISPLAY_FRET_COUNT {
            DISPLAY_FRET_COUNT
        } else {
            0
        };
        Self { start }
    }

    pub fn end(self) -> u8 {
        self.start + DISPLAY_FRET_COUNT
    }

    pub fn contains(self, fret: Fret) -> bool {
        (self.start..=self.end()).contains(&fret.number())
    }

    /// Column of `fret` within the window.
    pub fn relative(self, fret: Fret) -> Option<u8> {
        self.contains(fret).then(|| fret.number() - self.start)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FretLineKind {
    Nut,
    Fret,
}

/// A vertical line across the strings. `width` is the nut's rect width or the fret's stroke.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FretLine {
    pub fret: u8,
    pub kind: FretLineKind,
    pub x: f64,
    pub width: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InlayMarker {
    pub fret: u8,
    pub radius: f64,
    pub dots: Vec<Point>,
}

impl InlayMarker {
    pub fn is_double(&self) -> bool {
        self.dots.len() == 2
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StringLine {
    pub string: StringIndex,
    pub y: f64,
    pub x1: f64,
    pub x2: f64,
    pub stroke_width: f64,
    /// In the current selection, or no selection is active
    pub active: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FretNumberLabel {
    pub fret: u8,
    pub x: f64,
    pub y: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OpenStringLabel {
    pub string: StringIndex,
    pub x: f64,
    pub y: f64,
    pub text: &'static str,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionMarker {
    pub string: StringIndex,
    pub fret: Fret,
    pub relative_fret: u8,
    pub cx: f64,
    pub cy: f64,
    pub radius: f64,
}

/// Everything the renderer needs to draw the fretboard.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FretboardView {
    pub width: f64,
    pub height: f64,
    pub board_height: f64,
    pub window: DisplayWindow,
    pub fret_lines: Vec<FretLine>,
    pub inlays: Vec<InlayMarker>,
    pub strings: Vec<StringLine>,
    pub fret_numbers: Vec<FretNumberLabel>,
    pub open_string_labels: Vec<OpenStringLabel>,
    pub question_marker: Option<QuestionMarker>,
}

impl FretboardView {
    /// Project the current target and display settings into geometry.
    ///
    /// With no target the window rests at fret 0 and no marker is drawn.
    pub fn compute(tuning: &Tuning, settings: &Settings, target: Option<&FretboardTarget>) -> Self {
        let window = target.map(|t| t.window).unwrap_or_default();
        let board_height = STRING_COUNT as f64 * FRET_HEIGHT;
        let width = (DISPLAY_FRET_COUNT as f64 + 1.0) * FRET_WIDTH;

        let mut fret_lines = Vec::new();
        let mut inlays = Vec::new();
        for column in 0..=DISPLAY_FRET_COUNT {
            let fret = window.start + column;
            let x = (column as f64 + 0.5) * FRET_WIDTH;
            fret_lines.push(if fret == 0 {
                FretLine {
                    fret,
                    kind: FretLineKind::Nut,
                    x,
                    width: NUT_WIDTH,
                }
            } else {
                FretLine {
                    fret,
                    kind: FretLineKind::Fret,
                    x,
                    width: if fret == 12 { OCTAVE_FRET_STROKE } else { FRET_STROKE },
                }
            });

            if fret != 0 && POSITION_MARKERS.contains(&fret) {
                let cx = x - FRET_WIDTH / 2.0;
                let middle = board_height / 2.0;
                let dots = if fret == 12 || fret == 24 {
                    vec![
                        Point {
                            x: cx,
                            y: middle - FRET_HEIGHT,
                        },
                        Point {
                            x: cx,
                            y: middle + FRET_HEIGHT,
                        },
                    ]
                } else {
                    vec![Point { x: cx, y: middle }]
                };
                inlays.push(InlayMarker {
                    fret,
                    radius: INLAY_RADIUS,
                    dots,
                });
            }
        }

        let strings = StringIndex::all()
            .map(|string| StringLine {
                string,
                y: string_y(string),
                x1: FRET_WIDTH / 2.0,
                x2: width - FRET_WIDTH / 2.0,
                stroke_width: 1.5 + string.index() as f64 * 0.4,
                active: settings.strings.is_empty() || settings.strings.contains(&string),
            })
            .collect();

        let fret_numbers = (1..=DISPLAY_FRET_COUNT)
            .map(|column| FretNumberLabel {
                fret: window.start + column,
                x: column as f64 * FRET_WIDTH,
                y: board_height + FRET_NUMBER_AREA_HEIGHT / 2.0 + FRET_NUMBER_BASELINE,
            })
            .collect();

        let open_string_labels = if settings.show_open_strings && window.start == 0 {
            StringIndex::all()
                // the marker covers an open-string target's own label
                .filter(|&string| {
                    !target.is_some_and(|t| {
                        t.position.fret.is_open() && t.position.string == string
                    })
                })
                .map(|string| OpenStringLabel {
                    string,
                    x: OPEN_COLUMN_X,
                    y: string_y(string) + OPEN_LABEL_BASELINE,
                    text: tuning.open_pitch_class(string).name(settings.naming_system),
                })
                .collect()
        } else {
            Vec::new()
        };

        let question_marker = target.and_then(|t| {
            let relative_fret = window.relative(t.position.fret)?;
            let cx = if t.position.fret.is_open() {
                OPEN_COLUMN_X
            } else {
                relative_fret as f64 * FRET_WIDTH
            };
            Some(QuestionMarker {
                string: t.position.string,
                fret: t.position.fret,
                relative_fret,
                cx,
                cy: string_y(t.position.string),
                radius: FRET_HEIGHT * 0.4,
            })
        });

        Self {
            width,
            height: board_height + FRET_NUMBER_AREA_HEIGHT,
            board_height,
            window,
            fret_lines,
            inlays,
            strings,
            fret_numbers,
            open_string_labels,
            question_marker,
        }
    }
}

fn string_y(string: StringIndex) -> f64 {
    (string.index() as f64 + 0.5) * FRET_HEIGHT
}
