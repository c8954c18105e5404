//! Compiled grammar model.
//!
//! Produced once by the compiler and read-only afterwards. Rules are stored in
//! an insertion-ordered table; a rule's position is its [`RuleId`]. Token
//! display names travel with the model as a side table so candidates can be
//! rendered without the vocabulary.

mod binary;
mod dump;
mod types;


use std::borrow::Cow;

use indexmap::{IndexMap, IndexSet};
use serde::{Deserialize, Serialize};

use crate::TokenId;

pub use types::{
    Cardinality, GrammarNode, GrammarSequence, GrammarSymbol, RuleAlternatives, RuleId,
};

/// Immutable rule tables plus completion policy.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GrammarModel {
    rules: IndexMap<String, RuleAlternatives>,
    special_rules: IndexSet<RuleId>,
    ignored_rules: IndexSet<RuleId>,
    /// Always contains [`TokenId::WILDCARD`].
    ignored_tokens: IndexSet<TokenId>,
    token_names: IndexMap<TokenId, String>,
}

impl GrammarModel {
    pub fn new(
        rules: IndexMap<String, RuleAlternatives>,
        token_names: IndexMap<TokenId, String>,
    ) -> Self {
        Self {
            rules,
            special_rules: IndexSet::new(),
            ignored_rules: IndexSet::new(),
            ignored_tokens: IndexSet::from([TokenId::WILDCARD]),
            token_names,
        }
    }

    pub fn with_special_rules(mut self, rules: impl IntoIterator<Item = RuleId>) -> Self {
        self.special_rules.extend(rules);
        self
    }

    pub fn with_ignored_rules(mut self, rules: impl IntoIterator<Item = RuleId>) -> Self {
        self.ignored_rules.extend(rules);
        self
    }

    pub fn with_ignored_tokens(mut self, tokens: impl IntoIterator<Item = TokenId>) -> Self {
        self.ignored_tokens.extend(tokens);
        self
    }

    pub fn rule_id(&self, name: &str) -> Option<RuleId> {
        self.rules.get_index_of(name).map(RuleId::new)
    }

    /// Alternatives of a rule. Panics on an id from another model.
    pub fn rule(&self, id: RuleId) -> &RuleAlternatives {
        self.ensure_rule(id).1
    }

    pub fn rule_name(&self, id: RuleId) -> &str {
        self.ensure_rule(id).0
    }

    pub fn get(&self, name: &str) -> Option<&RuleAlternatives> {
        self.rules.get(name)
    }

    pub fn rules(&self) -> impl Iterator<Item = (RuleId, &str, &RuleAlternatives)> {
        self.rules
            .iter()
            .enumerate()
            .map(|(i, (name, alts))| (RuleId::new(i), name.as_str(), alts))
    }

    pub fn rule_count(&self) -> usize {
        self.rules.len()
    }

    pub(crate) fn rules_by_index(&self, index: usize) -> Option<(&str, &RuleAlternatives)> {
        self.rules
            .get_index(index)
            .map(|(name, alts)| (name.as_str(), alts))
    }

    #[inline]
    pub fn is_special_rule(&self, id: RuleId) -> bool {
        self.special_rules.contains(&id)
    }

    #[inline]
    pub fn is_ignored_rule(&self, id: RuleId) -> bool {
        self.ignored_rules.contains(&id)
    }

    #[inline]
    pub fn is_ignored_token(&self, id: TokenId) -> bool {
        self.ignored_tokens.contains(&id)
    }

    pub fn special_rules(&self) -> impl Iterator<Item = RuleId> {
        self.special_rules.iter().copied()
    }

    pub fn ignored_rules(&self) -> impl Iterator<Item = RuleId> {
        self.ignored_rules.iter().copied()
    }

    pub fn ignored_tokens(&self) -> impl Iterator<Item = TokenId> {
        self.ignored_tokens.iter().copied()
    }

    /// Printable name of a token: its vocabulary display name, `.` for the
    /// wildcard, `<id>` when unknown.
    pub fn token_name(&self, id: TokenId) -> Cow<'_, str> {
        match self.token_names.get(&id) {
            Some(name) => Cow::Borrowed(name),
            None if id == TokenId::WILDCARD => Cow::Borrowed("."),
            None if id == TokenId::EOF => Cow::Borrowed("EOF"),
            None => Cow::Owned(format!("<{id}>")),
        }
    }
}
