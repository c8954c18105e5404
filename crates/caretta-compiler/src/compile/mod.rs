//! Grammar compilation.
//!
//! Three steps:
//! - `compiler`: walks the grammar and its imports, one top-level rule at a time
//! - `block`: turns each block into an optimized token set or a list of
//!   sequences, splitting nested blocks into synthetic rules
//! - `resolve`: replaces rule names with ids once every rule is known

mod block;
mod compiler;
mod error;
mod resolve;


pub use compiler::{Compiler, CompilerBuilder};
pub use error::CompileError;
