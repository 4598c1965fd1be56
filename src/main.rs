use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use fretquiz::view::{FretLineKind, FretboardView};
use fretquiz::{
    LogSink, PitchClass, QuestionGenerator, QuizController, QuizError, QuizMode, Settings,
    StringIndex, Verdict,
};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "fretquiz")]
#[command(about = "Fretboard and note-name drill", version)]
struct Args {
    /// Path to a YAML settings file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Seed for reproducible questions
    #[arg(short, long)]
    seed: Option<u64>,

    /// Quiz to start with: fretboard or solfege
    #[arg(short, long, default_value = "fretboard")]
    mode: String,
}

const HELP: &str = "\
commands:
  <note>            answer (C, F#, Bb, ド, sol, 7, ...)
  next | n          new question
  tab <mode>        switch to fretboard or solfege
  string <1-6>      toggle a string, 'string all' to clear
  range <r>         1-12, 13-24 or all
  naturals          toggle natural-only
  note <note>       toggle a note in the filter, 'note clear' to reset
  names             toggle letter/solfège names
  open              toggle open-string labels
  sound             toggle audio
  hide              toggle the fretboard drawing
  replay | r        hear the target again
  view              fretboard geometry as JSON
  score             show both scores
  quit | q";

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("fretquiz=info")),
        )
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();

    let settings = match &args.config {
        Some(path) => Settings::load(path)
            .with_context(|| format!("loading settings from {}", path.display()))?,
        None => Settings::default(),
    };
    let mode = QuizMode::from_str(&args.mode)
        .with_context(|| format!("unknown quiz mode '{}'", args.mode))?;

    let generator = match args.seed {
        Some(seed) => {
            info!("Using seed {}", seed);
            QuestionGenerator::seeded(seed)
        }
        None => QuestionGenerator::from_entropy(),
    };
    let mut quiz = QuizController::new(settings, generator, Box::new(LogSink));

    println!("{}\n", HELP);
    report(quiz.switch_mode(mode));
    show_question(&quiz);

    let stdin = io::stdin();
    for line in stdin.lock().lines() {
        let line = line?;
        let mut words = line.split_whitespace();
        let Some(command) = words.next() else {
            continue;
        };
        let argument = words.next();

        match command {
            "quit" | "q" => break,
            "help" | "h" | "?" => println!("{}", HELP),
            "next" | "n" => {
                report(quiz.next_question());
                show_question(&quiz);
            }
            "tab" => match argument.and_then(QuizMode::from_str) {
                Some(mode) => {
                    report(quiz.switch_mode(mode));
                    show_question(&quiz);
                }
                None => println!("usage: tab fretboard|solfege"),
            },
            "string" => {
                let result = match argument {
                    Some("all") => quiz.select_all_strings(),
                    Some(n) => match n.parse::<usize>().ok().map(StringIndex::from_number) {
                        Some(Ok(string)) => quiz.toggle_string(string),
                        Some(Err(e)) => {
                            println!("{}", e);
                            continue;
                        }
                        None => {
                            println!("usage: string <1-6>|all");
                            continue;
                        }
                    },
                    None => {
                        println!("usage: string <1-6>|all");
                        continue;
                    }
                };
                report(result);
                show_question(&quiz);
            }
            "range" => match argument.and_then(fretquiz::FretRange::from_str) {
                Some(range) => {
                    report(quiz.set_fret_range(range));
                    show_question(&quiz);
                }
                None => println!("usage: range 1-12|13-24|all"),
            },
            "naturals" => {
                let natural_only = !quiz.settings().natural_only;
                report(quiz.set_natural_only(natural_only));
                show_question(&quiz);
            }
            "note" => {
                match argument {
                    Some("clear") => quiz.clear_note_filter(),
                    Some(name) => match name.parse::<PitchClass>() {
                        Ok(pc) => quiz.toggle_note_filter(pc),
                        Err(e) => {
                            println!("{}", e);
                            continue;
                        }
                    },
                    None => {
                        println!("usage: note <note>|clear");
                        continue;
                    }
                }
                println!("{}", quiz.note_filter_label());
                if quiz.mode() == QuizMode::Fretboard {
                    report(quiz.next_question());
                    show_question(&quiz);
                }
            }
            "names" => {
                let system = quiz.settings().naming_system.other();
                quiz.set_naming_system(system);
                show_question(&quiz);
            }
            "open" => {
                let show = !quiz.settings().show_open_strings;
                quiz.set_show_open_strings(show);
                show_question(&quiz);
            }
            "sound" => {
                let enabled = !quiz.settings().sound_enabled;
                quiz.set_sound_enabled(enabled);
                println!("sound {}", if enabled { "on" } else { "off" });
            }
            "hide" => {
                let hide = !quiz.settings().hide_fretboard;
                quiz.set_hide_fretboard(hide);
                show_question(&quiz);
            }
            "replay" | "r" => quiz.replay_target(),
            "view" => match quiz.recompute_view() {
                Some(view) => println!("{}", serde_json::to_string_pretty(&view)?),
                None => println!("fretboard hidden"),
            },
            "score" => println!(
                "fretboard: {}  solfège: {}",
                quiz.fretboard().score(),
                quiz.solfege().score()
            ),
            answer => match answer.parse::<PitchClass>() {
                Ok(pc) => match quiz.submit_answer(pc) {
                    Some(verdict) => show_verdict(&quiz, verdict),
                    None => println!("Already answered, type 'next' for a new question"),
                },
                Err(e) => println!("{} (type 'help' for commands)", e),
            },
        }
        io::stdout().flush()?;
    }

    info!(
        "Final scores: fretboard {}, solfège {}",
        quiz.fretboard().score(),
        quiz.solfege().score()
    );
    Ok(())
}

fn report(result: Result<(), QuizError>) {
    match result {
        Ok(()) => {}
        Err(QuizError::NoEligibleTargets) => {}
        Err(e) => warn!("{}", e),
    }
}

fn show_question(quiz: &QuizController) {
    let prompt = quiz.prompt();
    println!();
    if quiz.mode() == QuizMode::Fretboard {
        if let Some(view) = quiz.recompute_view() {
            print!("{}", render(&view));
        }
    }
    println!("{}", prompt.question);
    if let Some(display) = prompt.display {
        println!("    {}", display);
    }
    if !prompt.hint.is_empty() {
        println!("{}", prompt.hint);
    }
    let choices: Vec<&str> = quiz.answer_choices().iter().map(|c| c.label).collect();
    println!("[{}]  score: {}", choices.join(" "), quiz.active_score());
}

fn show_verdict(quiz: &QuizController, verdict: Verdict) {
    println!(
        "{}",
        fretquiz::prompt::verdict_message(verdict, quiz.settings().naming_system)
    );
}

/// Text rendering of the view model, one row per string.
fn render(view: &FretboardView) -> String {
    const CELL: usize = 5;
    let mut out = String::new();

    for string in &view.strings {
        let marker = view
            .question_marker
            .as_ref()
            .filter(|m| m.string == string.string);
        let open_label = view
            .open_string_labels
            .iter()
            .find(|l| l.string == string.string)
            .map(|l| l.text)
            .unwrap_or("");
        let wire = if string.active { '-' } else { '.' };

        let open_cell = match marker {
            Some(m) if m.fret.is_open() => "?".to_string(),
            _ => open_label.to_string(),
        };
        out.push_str(&format!("{:^w$}", open_cell, w = CELL));

        for (column, line) in view.fret_lines.iter().enumerate() {
            out.push(match line.kind {
                FretLineKind::Nut => '‖',
                FretLineKind::Fret => '|',
            });
            if column + 1 == view.fret_lines.len() {
                break;
            }
            let here = marker
                .is_some_and(|m| !m.fret.is_open() && m.relative_fret as usize == column + 1);
            let segment: String = if here {
                format!("{w}{w}?{w}{w}", w = wire)
            } else {
                std::iter::repeat(wire).take(CELL).collect()
            };
            out.push_str(&segment);
        }
        out.push('\n');
    }

    out.push_str(&" ".repeat(CELL + 1));
    for label in &view.fret_numbers {
        out.push_str(&format!("{:^w$}", label.fret, w = CELL));
        out.push(' ');
    }
    out.push('\n');
    out
}
