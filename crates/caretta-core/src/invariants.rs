//! Invariant checks excluded from coverage reports.

#![cfg_attr(coverage_nightly, coverage(off))]

use crate::{GrammarModel, RuleAlternatives, RuleId};

impl GrammarModel {
    pub(crate) fn ensure_rule(&self, id: RuleId) -> (&str, &RuleAlternatives) {
        self.rules_by_index(id.index()).unwrap_or_else(|| {
            panic!(
                "GrammarModel: rule id {} not found \
                 (rule ids must come from the same model)",
                id.index()
            )
        })
    }
}
