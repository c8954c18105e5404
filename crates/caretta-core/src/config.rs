//! Completion tuning shared by the compiler and its hosts.

use serde::Deserialize;

/// Names of rules and tokens that get special treatment during candidate collection.
///
/// Deserializable so hosts can embed it in their own configuration files:
///
/// ```
/// use caretta_core::CompletionConfig;
///
/// let config = CompletionConfig::from_json(
///     r#"{ "special_rules": ["table_ref"], "ignored_tokens": ["COMMA"] }"#,
/// ).unwrap();
/// assert_eq!(config.special_rules, ["table_ref"]);
/// assert!(config.ignored_rules.is_empty());
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CompletionConfig {
    /// Rules surfaced by name instead of being expanded (e.g. `table_ref`).
    pub special_rules: Vec<String>,
    /// Rules never descended into during collection.
    pub ignored_rules: Vec<String>,
    /// Tokens filtered out of every candidate set (e.g. punctuation).
    pub ignored_tokens: Vec<String>,
}

impl CompletionConfig {
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn with_special_rules<S: Into<String>>(mut self, rules: impl IntoIterator<Item = S>) -> Self {
        self.special_rules.extend(rules.into_iter().map(Into::into));
        self
    }

    pub fn with_ignored_rules<S: Into<String>>(mut self, rules: impl IntoIterator<Item = S>) -> Self {
        self.ignored_rules.extend(rules.into_iter().map(Into::into));
        self
    }

    pub fn with_ignored_tokens<S: Into<String>>(
        mut self,
        tokens: impl IntoIterator<Item = S>,
    ) -> Self {
        self.ignored_tokens.extend(tokens.into_iter().map(Into::into));
        self
    }
}
