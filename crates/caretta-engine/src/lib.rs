//! Caret-aware code completion over compiled grammar models.
//!
//! Given a [`GrammarModel`], the tokens of a partially written text and a
//! caret position, the engine reports which tokens (or special rules) may be
//! typed at the caret and whether the input before it parses completely.

#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

pub mod engine;
pub mod scanner;

#[cfg(test)]
pub mod test_utils;

use caretta_core::GrammarModel;

pub use engine::{
    Completion, FuelLimits, Matcher, MatcherBuilder, NoopTracer, PrintTracer, RunState,
    RuntimeError, Tracer, Verbosity,
};
pub use scanner::{Caret, DEFAULT_CHANNEL, HIDDEN_CHANNEL, Scanner, ScannerBuilder, Token};

/// Completes at `caret` from rule `root` with default limits.
pub fn complete(
    model: &GrammarModel,
    scanner: Scanner,
    caret: Caret,
    root: &str,
) -> Result<Completion, RuntimeError> {
    Matcher::builder(model, scanner, caret).build().complete(root)
}
