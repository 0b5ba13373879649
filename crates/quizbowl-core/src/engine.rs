//! Quiz session state machine.
//!
//! A [`Session`] walks a fixed path: `NotStarted -> Selecting -> Playing ->
//! Finished`. The deck is shuffled exactly once at start, the first `n`
//! questions of the permutation are played in order, and every response is
//! judged immediately. Verdicts and score changes are never revisited.

use std::fmt;

use anyhow::Result;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, SelectionError};
use crate::model::{Outcome, Player, Question, Verdict};
use crate::traits::{ResponseSource, Shuffler, TurnObserver};

/// Responses equal to this token (any case) skip the current question:
/// zero score change, no correctness check, even if the token would have
/// been the right answer.
pub const SKIP_TOKEN: &str = "SKIP";

/// Lifecycle of a session. Transitions are linear and one-way.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionState {
    NotStarted,
    Selecting,
    Playing,
    Finished,
}

impl fmt::Display for SessionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SessionState::NotStarted => write!(f, "not started"),
            SessionState::Selecting => write!(f, "selecting"),
            SessionState::Playing => write!(f, "playing"),
            SessionState::Finished => write!(f, "finished"),
        }
    }
}

/// Check a raw question-count input against the number of available
/// questions. Pure: the retry loop around bad input belongs to the caller.
///
/// The two failure reasons stay distinct so the caller can phrase its
/// complaint: [`SelectionError::NotANumber`] for unparseable input,
/// [`SelectionError::OutOfRange`] for an integer outside `1..=available`.
pub fn validate_selection(input: &str, available: usize) -> Result<usize, SelectionError> {
    let requested: i64 = input
        .trim()
        .parse()
        .map_err(|_| SelectionError::NotANumber(input.trim().to_string()))?;
    if requested < 1 || requested as u64 > available as u64 {
        return Err(SelectionError::OutOfRange {
            requested,
            available,
        });
    }
    Ok(requested as usize)
}

/// One play-through of a question deck by one player.
///
/// The session owns its deck and player exclusively for its lifetime; the
/// player's score moves only through [`Session::submit_answer`].
pub struct Session {
    deck: Vec<Question>,
    player: Player,
    state: SessionState,
    selected: Option<usize>,
    cursor: usize,
}

impl Session {
    pub fn new(deck: Vec<Question>, player: Player) -> Self {
        Self {
            deck,
            player,
            state: SessionState::NotStarted,
            selected: None,
            cursor: 0,
        }
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn player(&self) -> &Player {
        &self.player
    }

    /// How many questions the deck holds.
    pub fn available(&self) -> usize {
        self.deck.len()
    }

    pub fn is_finished(&self) -> bool {
        self.state == SessionState::Finished
    }

    /// Final (or running) score: the signed sum of all deltas so far.
    pub fn final_score(&self) -> i32 {
        self.player.score()
    }

    /// Move into `Selecting` and report how many questions can be chosen.
    pub fn begin_selection(&mut self) -> Result<usize, EngineError> {
        self.require_state(SessionState::NotStarted)?;
        self.state = SessionState::Selecting;
        Ok(self.deck.len())
    }

    /// Record a selection from raw input. Invalid input leaves the session
    /// in `Selecting` so the caller can try again.
    pub fn select(&mut self, input: &str) -> Result<usize, EngineError> {
        self.require_state(SessionState::Selecting)?;
        let n = validate_selection(input, self.deck.len())?;
        self.selected = Some(n);
        Ok(n)
    }

    /// Record an already-validated selection count.
    pub fn select_count(&mut self, n: usize) -> Result<(), EngineError> {
        self.require_state(SessionState::Selecting)?;
        if n < 1 || n > self.deck.len() {
            return Err(SelectionError::OutOfRange {
                requested: n as i64,
                available: self.deck.len(),
            }
            .into());
        }
        self.selected = Some(n);
        Ok(())
    }

    /// Shuffle the whole deck once and move into `Playing`. The first `n`
    /// questions of the permutation will be played in permuted order.
    pub fn start(&mut self, shuffler: &mut dyn Shuffler) -> Result<(), EngineError> {
        self.require_state(SessionState::Selecting)?;
        let selected = self.selected.ok_or(EngineError::NoSelection)?;
        shuffler.shuffle(&mut self.deck);
        self.state = SessionState::Playing;
        self.cursor = 0;
        tracing::debug!("session started: {selected} of {} questions", self.deck.len());
        Ok(())
    }

    /// The question awaiting a response, while `Playing`.
    pub fn current_question(&self) -> Option<&Question> {
        if self.state == SessionState::Playing {
            self.deck.get(self.cursor)
        } else {
            None
        }
    }

    /// Judge one response and apply its score change immediately.
    ///
    /// A response equal to [`SKIP_TOKEN`] (any case) is a skip: delta 0 and
    /// no correctness check. Otherwise the question judges the response and
    /// the player gains or loses its full point value. After the last
    /// selected question the session is `Finished` and further submissions
    /// are rejected.
    pub fn submit_answer(&mut self, response: &str) -> Result<Outcome, EngineError> {
        self.require_state(SessionState::Playing)?;
        let question = self.deck[self.cursor].clone();

        let (verdict, points_delta, correct_answer) = if response.eq_ignore_ascii_case(SKIP_TOKEN) {
            (Verdict::Skipped, 0, None)
        } else if question.check_answer(response) {
            (Verdict::Correct, question.point_value(), None)
        } else {
            (
                Verdict::Incorrect,
                -question.point_value(),
                Some(question.correct_answer_text().to_string()),
            )
        };

        self.player.apply_delta(points_delta);
        self.cursor += 1;
        if Some(self.cursor) == self.selected {
            self.state = SessionState::Finished;
        }
        tracing::debug!("turn {}: {verdict} ({points_delta:+})", self.cursor);

        Ok(Outcome {
            question,
            response: response.to_string(),
            verdict,
            points_delta,
            correct_answer,
        })
    }

    /// Drive the whole playing phase against a response source.
    ///
    /// Per turn the observer sees the question, the source supplies one
    /// response, and the resulting outcome is both reported and collected.
    /// If the source runs dry the session finishes early and the outcomes
    /// produced so far stand.
    pub fn run(
        &mut self,
        source: &mut dyn ResponseSource,
        observer: &dyn TurnObserver,
    ) -> Result<Vec<Outcome>> {
        self.require_state(SessionState::Playing)?;
        let total = match self.selected {
            Some(n) => n,
            None => return Err(EngineError::NoSelection.into()),
        };

        let mut outcomes = Vec::with_capacity(total);
        while self.state == SessionState::Playing {
            let question = match self.current_question() {
                Some(q) => q.clone(),
                None => break,
            };
            observer.on_question(self.cursor + 1, total, &question);

            let Some(response) = source.next_response(&question)? else {
                tracing::debug!("response source ended after {} turns", outcomes.len());
                self.state = SessionState::Finished;
                break;
            };

            let outcome = self.submit_answer(&response)?;
            observer.on_outcome(&outcome, self.player.score());
            outcomes.push(outcome);
        }

        Ok(outcomes)
    }

    fn require_state(&self, expected: SessionState) -> Result<(), EngineError> {
        if self.state == expected {
            Ok(())
        } else {
            Err(EngineError::WrongState {
                expected,
                actual: self.state,
            })
        }
    }
}
