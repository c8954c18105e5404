//! Grammar AST types.
//!
//! This module provides the already-parsed form of a grammar (rules, blocks,
//! alternatives, elements), with JSON deserialization and constructors for building grammars in code.

mod build;
mod json;
mod types;


pub use json::GrammarError;
pub use types::{Alternative, AssignOp, Block, Element, Grammar, RuleDef, RuleKind};
