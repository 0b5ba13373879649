//! quizbowl-core — Question model, bank parser, and session engine.
//!
//! This crate defines the question taxonomy, the plain-text bank format, and
//! the session state machine that the `quizbowl` binary builds on. It does
//! no terminal I/O of its own: display and input arrive through the seams in
//! [`traits`].

pub mod engine;
pub mod error;
pub mod model;
pub mod parser;
pub mod statistics;
pub mod traits;
pub mod transcript;
