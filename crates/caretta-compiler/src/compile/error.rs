//! Errors raised while building a grammar model.

use crate::imports::LoadError;

/// Fatal configuration error. A model is never produced alongside one.
#[derive(Debug, thiserror::Error)]
pub enum CompileError {
    /// Token name absent from the vocabulary.
    #[error("rule `{rule}` references unknown token `{name}`")]
    UnknownToken { name: String, rule: String },

    /// Grammar construct completion cannot model (embedded actions).
    #[error("rule `{rule}` uses an unsupported construct: {construct}")]
    UnsupportedConstruct {
        construct: &'static str,
        rule: String,
    },

    /// A block without alternatives.
    #[error("rule `{rule}` has an empty block")]
    EmptyBlock { rule: String },

    /// Grammar has import directives but no loader was configured.
    #[error("grammar `{grammar}` has imports but no import loader is configured")]
    MissingImportPath { grammar: String },

    #[error("cannot import grammar `{grammar}`")]
    Import {
        grammar: String,
        #[source]
        source: LoadError,
    },

    #[error("import cycle through grammar `{grammar}`")]
    ImportCycle { grammar: String },

    #[error("rule `{referenced_from}` references undefined rule `{name}`")]
    UndefinedRule {
        name: String,
        referenced_from: String,
    },

    #[error("configured rule `{name}` is not defined by the grammar")]
    UnknownConfiguredRule { name: String },

    #[error("configured token `{name}` is not in the vocabulary")]
    UnknownConfiguredToken { name: String },

    #[error("grammar defines no parser rules")]
    NoParserRules,
}
