//! Terminal front end for a session: prompts on stdout, answers from stdin.

use std::io::{self, BufRead, Write};

use anyhow::{Context, Result};
use quizbowl_core::model::{Outcome, Question, Verdict};
use quizbowl_core::traits::{ResponseSource, TurnObserver};

/// Prints `prompt` without a trailing newline and reads one line from stdin.
///
/// Returns `Ok(None)` when stdin is exhausted. The line is trimmed of
/// surrounding whitespace.
pub fn prompt_line(prompt: &str) -> Result<Option<String>> {
    print!("{prompt}");
    io::stdout().flush().context("failed to flush stdout")?;

    let mut line = String::new();
    let bytes = io::stdin()
        .lock()
        .read_line(&mut line)
        .context("failed to read from stdin")?;
    if bytes == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim().to_string()))
}

/// Reads answers from stdin, one line per question.
pub struct ConsoleSource;

impl ResponseSource for ConsoleSource {
    fn next_response(&mut self, _question: &Question) -> Result<Option<String>> {
        prompt_line("Your answer: ")
    }
}

/// Prints each question and its outcome to stdout.
pub struct ConsoleObserver;

impl TurnObserver for ConsoleObserver {
    fn on_question(&self, _number: usize, _total: usize, question: &Question) {
        println!();
        println!("Points: {}", question.point_value());
        for line in question.prompt_lines() {
            println!("{line}");
        }
    }

    fn on_outcome(&self, outcome: &Outcome, _running_score: i32) {
        match outcome.verdict {
            Verdict::Correct => {
                println!("Correct! You get {} points.", outcome.question.point_value());
            }
            Verdict::Incorrect => {
                let answer = outcome
                    .correct_answer
                    .as_deref()
                    .unwrap_or(outcome.question.correct_answer_text());
                println!(
                    "Incorrect, the answer was {}. You lose {} points.",
                    answer,
                    outcome.question.point_value()
                );
            }
            Verdict::Skipped => {
                println!("You have elected to skip that question.");
            }
        }
    }
}
