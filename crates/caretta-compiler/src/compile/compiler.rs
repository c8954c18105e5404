//! Compiler state and entry points.

use std::collections::HashSet;

use caretta_core::grammar::Grammar;
use caretta_core::{CompletionConfig, GrammarModel, TokenVocabulary};

use crate::imports::GrammarLoader;

use super::block::{BlockBuilder, RuleTable};
use super::error::CompileError;
use super::resolve::resolve;

/// Turns a grammar AST into a [`GrammarModel`].
///
/// Imported grammars are compiled first; rules of the importing grammar
/// replace imported rules of the same name. Lexer rules are skipped.
pub struct Compiler<'a> {
    vocabulary: &'a TokenVocabulary,
    config: CompletionConfig,
    loader: Option<&'a dyn GrammarLoader>,
}

/// Builder for `Compiler`.
pub struct CompilerBuilder<'a> {
    vocabulary: &'a TokenVocabulary,
    config: CompletionConfig,
    loader: Option<&'a dyn GrammarLoader>,
}

impl<'a> CompilerBuilder<'a> {
    pub fn new(vocabulary: &'a TokenVocabulary) -> Self {
        Self {
            vocabulary,
            config: CompletionConfig::default(),
            loader: None,
        }
    }

    /// Special/ignored rule and token names, checked against the compiled grammar.
    pub fn config(mut self, config: CompletionConfig) -> Self {
        self.config = config;
        self
    }

    /// Source for grammars named in import directives. Without one, any
    /// import is an error.
    pub fn import_loader(mut self, loader: &'a dyn GrammarLoader) -> Self {
        self.loader = Some(loader);
        self
    }

    pub fn build(self) -> Compiler<'a> {
        Compiler {
            vocabulary: self.vocabulary,
            config: self.config,
            loader: self.loader,
        }
    }
}

/// Import traversal state.
#[derive(Default)]
struct Imports {
    /// Grammars on the current import path.
    visiting: Vec<String>,
    loaded: HashSet<String>,
}

impl<'a> Compiler<'a> {
    pub fn builder(vocabulary: &'a TokenVocabulary) -> CompilerBuilder<'a> {
        CompilerBuilder::new(vocabulary)
    }

    pub fn compile(&self, grammar: &Grammar) -> Result<GrammarModel, CompileError> {
        let mut rules = RuleTable::new();
        let mut imports = Imports::default();
        imports.visiting.push(grammar.name.clone());
        self.collect(grammar, &mut rules, &mut imports)?;
        resolve(&rules, self.vocabulary, &self.config)
    }

    fn collect(
        &self,
        grammar: &Grammar,
        rules: &mut RuleTable,
        imports: &mut Imports,
    ) -> Result<(), CompileError> {
        for name in &grammar.imports {
            if imports.visiting.contains(name) {
                return Err(CompileError::ImportCycle {
                    grammar: name.clone(),
                });
            }
            if !imports.loaded.insert(name.clone()) {
                continue;
            }

            let loader = self.loader.ok_or_else(|| CompileError::MissingImportPath {
                grammar: grammar.name.clone(),
            })?;
            let imported = loader.load(name).map_err(|source| CompileError::Import {
                grammar: name.clone(),
                source,
            })?;

            imports.visiting.push(name.clone());
            self.collect(&imported, rules, imports)?;
            imports.visiting.pop();
        }

        for rule in grammar.rules.iter().filter(|rule| !rule.is_lexer()) {
            BlockBuilder::new(self.vocabulary, rules, &rule.name).define(&rule.name, &rule.block)?;
        }
        Ok(())
    }
}
