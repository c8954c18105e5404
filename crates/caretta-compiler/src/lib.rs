//! Caretta grammar compiler.
//!
//! Turns an already-parsed grammar AST plus a token vocabulary into the
//! immutable [`GrammarModel`] walked by the completion engine:
//! - `compile` - block compilation, optimization and reference resolution
//! - `imports` - loading imported grammars

#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

pub mod compile;
pub mod imports;

#[cfg(test)]
pub mod test_utils;

use caretta_core::grammar::Grammar;
use caretta_core::{GrammarModel, TokenVocabulary};

pub use compile::{CompileError, Compiler, CompilerBuilder};
pub use imports::{DirectoryLoader, GrammarLoader, LoadError};

/// Compiles a grammar without imports or completion configuration.
pub fn compile(vocabulary: &TokenVocabulary, grammar: &Grammar) -> Result<GrammarModel, CompileError> {
    Compiler::builder(vocabulary).build().compile(grammar)
}
