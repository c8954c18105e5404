//! Loading grammars named in import directives.

use std::io;
use std::path::{Path, PathBuf};

use caretta_core::grammar::{Grammar, GrammarError};
use indexmap::IndexMap;

/// Error while loading an imported grammar.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("grammar `{0}` not found")]
    NotFound(String),

    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to decode {}: {source}", path.display())]
    Grammar {
        path: PathBuf,
        #[source]
        source: GrammarError,
    },
}

/// Resolves an import directive to a parsed grammar.
pub trait GrammarLoader {
    fn load(&self, name: &str) -> Result<Grammar, LoadError>;
}

/// Loads `<root>/<name>.json` grammar AST files.
#[derive(Clone, Debug)]
pub struct DirectoryLoader {
    root: PathBuf,
}

impl DirectoryLoader {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl GrammarLoader for DirectoryLoader {
    fn load(&self, name: &str) -> Result<Grammar, LoadError> {
        let path = self.root.join(format!("{name}.json"));
        let json = match std::fs::read_to_string(&path) {
            Ok(json) => json,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                return Err(LoadError::NotFound(name.to_string()));
            }
            Err(source) => return Err(LoadError::Io { path, source }),
        };
        Grammar::from_json(&json).map_err(|source| LoadError::Grammar { path, source })
    }
}

/// In-memory grammars keyed by import name.
impl GrammarLoader for IndexMap<String, Grammar> {
    fn load(&self, name: &str) -> Result<Grammar, LoadError> {
        self.get(name)
            .cloned()
            .ok_or_else(|| LoadError::NotFound(name.to_string()))
    }
}
