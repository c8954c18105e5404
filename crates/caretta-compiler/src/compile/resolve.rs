//! Final pass: rule names to ids, configuration names to ids.

use caretta_core::{
    CompletionConfig, GrammarModel, RuleAlternatives, RuleId, TokenId, TokenVocabulary,
};
use indexmap::IndexMap;

use super::block::{PendingRule, RuleTable};
use super::error::CompileError;

pub(super) fn resolve(
    rules: &RuleTable,
    vocabulary: &TokenVocabulary,
    config: &CompletionConfig,
) -> Result<GrammarModel, CompileError> {
    if rules.is_empty() {
        return Err(CompileError::NoParserRules);
    }

    let mut resolved = IndexMap::with_capacity(rules.len());
    for (name, pending) in rules {
        let alternatives = match pending {
            PendingRule::Optimized(tokens) => RuleAlternatives::optimized(tokens.clone()),
            PendingRule::Sequences(sequences) => RuleAlternatives::sequences(
                sequences
                    .iter()
                    .map(|sequence| sequence.build(rules, name))
                    .collect::<Result<Vec<_>, CompileError>>()?,
            ),
        };
        resolved.insert(name.clone(), alternatives);
    }

    let special_rules = rule_ids(rules, &config.special_rules)?;
    let ignored_rules = rule_ids(rules, &config.ignored_rules)?;
    let ignored_tokens = config
        .ignored_tokens
        .iter()
        .map(|name| {
            vocabulary
                .get(name)
                .ok_or_else(|| CompileError::UnknownConfiguredToken { name: name.clone() })
        })
        .collect::<Result<Vec<TokenId>, _>>()?;

    Ok(
        GrammarModel::new(resolved, vocabulary.display_names().clone())
            .with_special_rules(special_rules)
            .with_ignored_rules(ignored_rules)
            .with_ignored_tokens(ignored_tokens),
    )
}

fn rule_ids(rules: &RuleTable, names: &[String]) -> Result<Vec<RuleId>, CompileError> {
    names
        .iter()
        .map(|name| {
            rules
                .get_index_of(name)
                .map(RuleId::new)
                .ok_or_else(|| CompileError::UnknownConfiguredRule { name: name.clone() })
        })
        .collect()
}
