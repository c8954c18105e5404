#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! Core data structures for Caretta.
//!
//! Two layers:
//! - **Grammar AST** (`grammar`): already-parsed grammar definitions, 1:1 with the JSON interchange format
//! - **Grammar model** (`model`): compiled, immutable rule tables walked by the completion engine
//!
//! Both are keyed by the token ids of a [`TokenVocabulary`].

mod config;
pub mod grammar;
mod invariants;
pub mod model;
mod vocabulary;

#[cfg(test)]
mod vocabulary_tests;

pub use config::CompletionConfig;
pub use model::{
    Cardinality, GrammarModel, GrammarNode, GrammarSequence, GrammarSymbol, RuleAlternatives,
    RuleId,
};
pub use vocabulary::{TokenId, TokenVocabulary, VocabularyError};
