//! Candidate accumulator.
//!
//! Tokens are kept with the continuation they were offered with, so a
//! mandatory compound like `CREATE TABLE` is only reported when every path
//! reaching `CREATE` agrees on what follows it. Any disagreement falls back to
//! the bare token for good.

use std::collections::BTreeSet;

use caretta_core::{GrammarModel, RuleId, TokenId};
use indexmap::map::Entry;
use indexmap::{IndexMap, IndexSet};

#[derive(Clone, Debug, Default)]
pub(crate) struct CandidateSet {
    tokens: IndexMap<TokenId, Vec<TokenId>>,
    rules: IndexSet<RuleId>,
}

impl CandidateSet {
    /// Offers `lead` followed by the mandatory `continuation` (empty for a bare token).
    pub(crate) fn offer_token(&mut self, lead: TokenId, continuation: &[TokenId]) {
        match self.tokens.entry(lead) {
            Entry::Vacant(entry) => {
                entry.insert(continuation.to_vec());
            }
            Entry::Occupied(mut entry) => {
                if entry.get().as_slice() != continuation {
                    entry.get_mut().clear();
                }
            }
        }
    }

    pub(crate) fn offer_rule(&mut self, rule: RuleId) {
        self.rules.insert(rule);
    }

    /// Display strings: token names, space-joined compounds, rule names.
    pub(crate) fn render(&self, model: &GrammarModel) -> BTreeSet<String> {
        let tokens = self.tokens.iter().map(|(lead, continuation)| {
            std::iter::once(lead)
                .chain(continuation)
                .map(|&id| model.token_name(id))
                .collect::<Vec<_>>()
                .join(" ")
        });
        let rules = self.rules.iter().map(|&rule| model.rule_name(rule).to_string());
        tokens.chain(rules).collect()
    }
}
