//! Candidate collection.
//!
//! Once the caret is reached the walk stops consuming input and gathers every
//! token that could come next, descending into rules until a required node
//! closes each path.

use caretta_core::{GrammarNode, GrammarSequence, GrammarSymbol, RuleAlternatives, RuleId, TokenId};

use super::error::RuntimeError;
use super::matcher::{Run, RunState};
use super::trace::Tracer;

impl<T: Tracer> Run<'_, T> {
    /// Collects the tokens every alternative of `rule` may start with.
    ///
    /// Leaves `CollectionPending` when some alternative can be skipped
    /// entirely, so the enclosing sequence keeps collecting.
    pub(super) fn collect_from_rule(&mut self, rule: RuleId) -> Result<(), RuntimeError> {
        self.burn_fuel()?;
        self.tracer.trace_collect(rule);

        if self.model.is_special_rule(rule) {
            self.tracer.trace_rule_candidate(rule);
            self.candidates.offer_rule(rule);
            self.state = RunState::Matching;
            return Ok(());
        }
        // Ignored rules and re-entry through a recursive rule add nothing.
        if self.model.is_ignored_rule(rule) || self.collecting.contains(&rule) {
            self.state = RunState::Matching;
            return Ok(());
        }

        let model = self.model;
        match model.rule(rule) {
            RuleAlternatives::Optimized(tokens) => {
                for &token in tokens {
                    if !model.is_ignored_token(token) {
                        self.offer(token, &[]);
                    }
                }
                self.state = RunState::Matching;
            }
            RuleAlternatives::Sequences(sequences) => {
                self.check_depth()?;
                self.collecting.push(rule);

                let mut combined = RunState::Matching;
                for sequence in sequences {
                    self.collect_from_alternative(sequence, 0)?;
                    if self.state == RunState::CollectionPending {
                        combined = RunState::CollectionPending;
                    }
                }

                self.collecting.pop();
                self.state = combined;
            }
        }
        Ok(())
    }

    /// Collects from `sequence` starting at node `start`.
    pub(super) fn collect_from_alternative(
        &mut self,
        sequence: &GrammarSequence,
        start: usize,
    ) -> Result<(), RuntimeError> {
        let nodes = sequence.nodes();
        for (i, node) in nodes.iter().enumerate().skip(start) {
            match node.symbol() {
                GrammarSymbol::Token(TokenId::EOF) => {
                    self.state = RunState::Matching;
                    return Ok(());
                }
                GrammarSymbol::Token(token) => {
                    let offerable = !node.is_any() && !self.model.is_ignored_token(token);
                    if offerable {
                        if node.is_required() && !node.is_multiple() {
                            let continuation = self.mandatory_run(&nodes[i + 1..]);
                            self.offer(token, &continuation);
                        } else {
                            self.offer(token, &[]);
                        }
                    }
                    if node.is_required() {
                        self.state = RunState::Matching;
                        return Ok(());
                    }
                }
                GrammarSymbol::Rule(rule) => {
                    self.collect_from_rule(rule)?;
                    if node.is_required() && self.state != RunState::CollectionPending {
                        return Ok(());
                    }
                }
            }
        }

        // Only optional nodes up to the end: the parent must keep collecting.
        self.state = RunState::CollectionPending;
        Ok(())
    }

    /// Leading tokens of `nodes` that must follow a required terminal.
    fn mandatory_run(&self, nodes: &[GrammarNode]) -> Vec<TokenId> {
        nodes
            .iter()
            .map_while(|node| match node.symbol() {
                GrammarSymbol::Token(token)
                    if node.is_required()
                        && !node.is_multiple()
                        && !node.is_any()
                        && token != TokenId::EOF
                        && !self.model.is_ignored_token(token) =>
                {
                    Some(token)
                }
                _ => None,
            })
            .collect()
    }

    fn offer(&mut self, lead: TokenId, continuation: &[TokenId]) {
        self.tracer.trace_token_candidate(lead, continuation);
        self.candidates.offer_token(lead, continuation);
    }
}
