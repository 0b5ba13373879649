//! Trait seams for shuffling, response input, and turn observation.
//!
//! The session engine depends on these instead of concrete RNGs or stdin so
//! tests can pin the permutation and script the player.

use std::collections::VecDeque;

use rand::seq::SliceRandom;
use rand::Rng;

use crate::model::{Outcome, Question};

// ---------------------------------------------------------------------------
// Deck shuffling
// ---------------------------------------------------------------------------

/// Permutes a deck in place. Called exactly once per session, at start.
pub trait Shuffler {
    fn shuffle(&mut self, deck: &mut [Question]);
}

/// Uniform shuffle backed by any [`rand::Rng`].
pub struct RngShuffler<R: Rng> {
    rng: R,
}

impl<R: Rng> RngShuffler<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl<R: Rng> Shuffler for RngShuffler<R> {
    fn shuffle(&mut self, deck: &mut [Question]) {
        deck.shuffle(&mut self.rng);
    }
}

/// Leaves the deck in source order. Deterministic sessions for tests.
pub struct IdentityShuffler;

impl Shuffler for IdentityShuffler {
    fn shuffle(&mut self, _deck: &mut [Question]) {}
}

// ---------------------------------------------------------------------------
// Response input
// ---------------------------------------------------------------------------

/// Supplies one raw response per question.
///
/// `Ok(None)` means the stream ended (e.g. stdin hit EOF); the session stops
/// early and keeps the outcomes produced so far.
pub trait ResponseSource {
    fn next_response(&mut self, question: &Question) -> anyhow::Result<Option<String>>;
}

/// A fixed queue of responses, handed out in order.
pub struct ScriptedResponses {
    queue: VecDeque<String>,
}

impl ScriptedResponses {
    pub fn new<I, S>(responses: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            queue: responses.into_iter().map(Into::into).collect(),
        }
    }
}

impl ResponseSource for ScriptedResponses {
    fn next_response(&mut self, _question: &Question) -> anyhow::Result<Option<String>> {
        Ok(self.queue.pop_front())
    }
}

// ---------------------------------------------------------------------------
// Turn observation
// ---------------------------------------------------------------------------

/// Watches a session turn by turn. The console front end prints from here;
/// the engine itself never writes to the terminal.
pub trait TurnObserver {
    fn on_question(&self, number: usize, total: usize, question: &Question);
    fn on_outcome(&self, outcome: &Outcome, running_score: i32);
}

/// No-op turn observer.
pub struct NoopObserver;

impl TurnObserver for NoopObserver {
    fn on_question(&self, _: usize, _: usize, _: &Question) {}
    fn on_outcome(&self, _: &Outcome, _: i32) {}
}
