//! Token vocabulary: token names to ids, and ids to display names.
//!
//! Parses the `.tokens` listing written by grammar toolchains:
//!
//! ```text
//! SELECT=12
//! T__0=1
//! '('=1
//! ```
//!
//! A token id may appear under several names (a symbolic name and a quoted
//! literal). All of them resolve to the id; the display name is the most
//! readable one.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Token type id as assigned by the lexer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct TokenId(pub i32);

impl TokenId {
    /// End of input.
    pub const EOF: Self = Self(-1);
    /// Sentinel for the wildcard element; never produced by a lexer.
    pub const WILDCARD: Self = Self(-2);
}

impl std::fmt::Display for TokenId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Error while reading a `.tokens` listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VocabularyError {
    /// Line is not `name=id`.
    InvalidLine { line: usize, text: String },
}

impl std::fmt::Display for VocabularyError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidLine { line, text } => {
                write!(f, "invalid token definition on line {line}: `{text}`")
            }
        }
    }
}

impl std::error::Error for VocabularyError {}

/// Name ↔ id tables for one lexer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenVocabulary {
    ids: IndexMap<String, TokenId>,
    display_names: IndexMap<TokenId, String>,
}

impl Default for TokenVocabulary {
    fn default() -> Self {
        Self::new()
    }
}

impl TokenVocabulary {
    /// Empty vocabulary; `EOF` is always registered.
    pub fn new() -> Self {
        let mut vocabulary = Self {
            ids: IndexMap::new(),
            display_names: IndexMap::new(),
        };
        vocabulary.insert("EOF", TokenId::EOF);
        vocabulary
    }

    /// Parse a `.tokens` listing. Blank lines are skipped; each other line is
    /// split at its last `=`.
    pub fn parse(text: &str) -> Result<Self, VocabularyError> {
        let mut vocabulary = Self::new();
        for (index, line) in text.lines().enumerate() {
            let line = line.trim_end();
            if line.is_empty() {
                continue;
            }
            let invalid = || VocabularyError::InvalidLine {
                line: index + 1,
                text: line.to_string(),
            };
            let (name, id) = line.rsplit_once('=').ok_or_else(invalid)?;
            if name.is_empty() {
                return Err(invalid());
            }
            let id: i32 = id.trim().parse().map_err(|_| invalid())?;
            vocabulary.insert(name, TokenId(id));
        }
        Ok(vocabulary)
    }

    /// Register `name` for `id`. Later registrations of the same name win.
    pub fn insert(&mut self, name: impl Into<String>, id: TokenId) {
        let name = name.into();
        let replace = self
            .display_names
            .get(&id)
            .is_none_or(|current| display_rank(&name) < display_rank(current));
        if replace {
            self.display_names.insert(id, name.clone());
        }
        self.ids.insert(name, id);
    }

    /// Resolve a token name (`NUMBER`, `'select'`) to its id.
    pub fn get(&self, name: &str) -> Option<TokenId> {
        self.ids.get(name).copied()
    }

    /// Resolve a quoted literal given without its quotes.
    pub fn get_literal(&self, value: &str) -> Option<TokenId> {
        self.get(&format!("'{value}'"))
    }

    pub fn display_name(&self, id: TokenId) -> Option<&str> {
        self.display_names.get(&id).map(String::as_str)
    }

    /// Display names keyed by id, in registration order.
    pub fn display_names(&self) -> &IndexMap<TokenId, String> {
        &self.display_names
    }

    /// Number of registered names (including `EOF`).
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, TokenId)> {
        self.ids.iter().map(|(name, id)| (name.as_str(), *id))
    }
}

/// Lower is preferred: symbolic names, then literals, then implicit `T__n` names.
fn display_rank(name: &str) -> u8 {
    if name.starts_with('\'') {
        1
    } else if name.starts_with("T__") {
        2
    } else {
        0
    }
}
