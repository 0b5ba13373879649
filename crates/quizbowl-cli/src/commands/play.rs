use std::path::PathBuf;

use anyhow::{bail, Result};
use comfy_table::{Cell, Table};
use rand::rngs::StdRng;
use rand::SeedableRng;

use quizbowl_core::engine::Session;
use quizbowl_core::error::{EngineError, SelectionError};
use quizbowl_core::model::Player;
use quizbowl_core::parser;
use quizbowl_core::statistics::{compute_session_stats, SessionStats};
use quizbowl_core::traits::{RngShuffler, Shuffler};
use quizbowl_core::transcript::{BankSummary, Transcript};

use crate::config::{load_config_from, QuizbowlConfig};
use crate::console::{prompt_line, ConsoleObserver, ConsoleSource};

pub fn execute(
    bank: Option<PathBuf>,
    name: Option<String>,
    questions: Option<usize>,
    seed: Option<u64>,
    transcript: Option<PathBuf>,
    config: Option<PathBuf>,
) -> Result<()> {
    let config = load_config_from(config.as_deref())?;

    let player = resolve_player(name)?;
    let bank_path = resolve_bank_path(bank, &config)?;

    let bank = parser::load_bank(&bank_path)?;
    let mut blocking = Vec::new();
    for warning in parser::validate_bank(&bank) {
        if warning.kind.blocks_play() {
            blocking.push(match warning.question {
                Some(n) => format!("question {n}: {}", warning.message),
                None => warning.message,
            });
        } else {
            println!("Warning: {}", warning.message);
        }
    }
    if !blocking.is_empty() {
        bail!(
            "{} is not playable: {}",
            bank_path.display(),
            blocking.join("; ")
        );
    }
    if bank.questions.is_empty() {
        bail!("{} contains no questions", bank_path.display());
    }

    let summary = BankSummary {
        source: bank_path.display().to_string(),
        declared_count: bank.declared_count,
        actual_count: bank.actual_count(),
    };

    let mut session = Session::new(bank.into_questions(), player);
    let available = session.begin_selection()?;
    let selection = match questions {
        Some(n) => {
            session.select_count(n)?;
            n
        }
        None => prompt_selection(&mut session, available)?,
    };
    tracing::debug!(
        "playing {selection} of {available} questions from {}",
        bank_path.display()
    );

    let mut shuffler = build_shuffler(seed.or(config.shuffle_seed));
    session.start(shuffler.as_mut())?;

    let outcomes = session.run(&mut ConsoleSource, &ConsoleObserver)?;

    println!("{}, your game is over!", session.player().full_name());
    println!("Your final score is {} points.", session.final_score());
    println!("Better Luck Next Time!");

    print_summary(&compute_session_stats(&outcomes));

    let destination = transcript.or_else(|| {
        config.transcript_dir.as_ref().map(|dir| {
            dir.join(format!(
                "quizbowl-{}.json",
                chrono::Utc::now().format("%Y-%m-%dT%H%M%S")
            ))
        })
    });
    if let Some(path) = destination {
        let record = Transcript::new(summary, selection, session.player().clone(), outcomes);
        record.save_json(&path)?;
        eprintln!("Transcript saved to: {}", path.display());
    }

    Ok(())
}

/// Player identity from `--name`, or interactively when the flag is absent.
///
/// A flag value splits on the first space into first and last name; a value
/// without a space is a first name only.
fn resolve_player(name: Option<String>) -> Result<Player> {
    if let Some(name) = name {
        let name = name.trim();
        return Ok(match name.split_once(' ') {
            Some((first, last)) => Player::new(first, last.trim()),
            None => Player::new(name, ""),
        });
    }

    let first = require_line("What is your first name? ")?;
    let last = require_line("What is your last name? ")?;
    Ok(Player::new(first, last))
}

/// Bank path from the command line, then the config file, then a prompt.
fn resolve_bank_path(flag: Option<PathBuf>, config: &QuizbowlConfig) -> Result<PathBuf> {
    if let Some(path) = flag {
        return Ok(path);
    }
    if let Some(path) = &config.default_bank {
        return Ok(path.clone());
    }
    let input = require_line("What file stores your questions? ")?;
    Ok(PathBuf::from(input))
}

fn require_line(prompt: &str) -> Result<String> {
    match prompt_line(prompt)? {
        Some(line) => Ok(line),
        None => bail!("input ended at prompt {prompt:?}"),
    }
}

/// Ask for a question count until the input is usable. Out-of-range and
/// non-numeric input each get their own complaint before the retry.
fn prompt_selection(session: &mut Session, available: usize) -> Result<usize> {
    loop {
        let Some(input) = prompt_line(&format!(
            "How many questions would you like (out of {available})? "
        ))?
        else {
            bail!("input ended before a question count was chosen");
        };
        match session.select(&input) {
            Ok(n) => return Ok(n),
            Err(EngineError::Selection(SelectionError::OutOfRange { .. })) => {
                println!("Sorry, that is too many.");
            }
            Err(EngineError::Selection(SelectionError::NotANumber(_))) => {
                println!("Sorry, that is not valid.");
            }
            Err(e) => return Err(e.into()),
        }
    }
}

fn build_shuffler(seed: Option<u64>) -> Box<dyn Shuffler> {
    match seed {
        Some(seed) => Box::new(RngShuffler::new(StdRng::seed_from_u64(seed))),
        None => Box::new(RngShuffler::new(rand::thread_rng())),
    }
}

fn print_summary(stats: &SessionStats) {
    let mut table = Table::new();
    table.set_header(vec!["Verdict", "Questions", "Points"]);
    table.add_row(vec![
        Cell::new("Correct"),
        Cell::new(stats.correct),
        Cell::new(format!("+{}", stats.points_won)),
    ]);
    table.add_row(vec![
        Cell::new("Incorrect"),
        Cell::new(stats.incorrect),
        Cell::new(format!("-{}", stats.points_lost)),
    ]);
    table.add_row(vec![
        Cell::new("Skipped"),
        Cell::new(stats.skipped),
        Cell::new("0"),
    ]);

    eprintln!("\n{table}");
}
