//! Completion engine.
//!
//! The matcher walks a compiled grammar model against a token stream up to
//! the caret, then the collector gathers what could be typed there.

mod candidates;
mod collect;
mod error;
mod matcher;
mod trace;

#[cfg(test)]
mod matcher_tests;

pub use error::RuntimeError;
pub use matcher::{Completion, FuelLimits, Matcher, MatcherBuilder, RunState};
pub use trace::{NoopTracer, PrintTracer, Tracer, Verbosity};
