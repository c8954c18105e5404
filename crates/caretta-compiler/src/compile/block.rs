//! Block compilation: grammar AST blocks to pending rule bodies.
//!
//! Builders here are mutable and never leave the compiler. Rule references are
//! kept by name until every import is merged; [`super::resolve`] turns them
//! into model values.

use std::borrow::Cow;

use caretta_core::grammar::{Alternative, Block, Element};
use caretta_core::{Cardinality, GrammarNode, GrammarSequence, RuleId, TokenId, TokenVocabulary};
use indexmap::{IndexMap, IndexSet};

use super::error::CompileError;

/// What a node under construction points at.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(super) enum Target {
    Token(TokenId),
    Wildcard,
    Rule(String),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub(super) struct NodeBuilder {
    target: Target,
    cardinality: Cardinality,
}

impl NodeBuilder {
    fn new(target: Target) -> Self {
        Self {
            target,
            cardinality: Cardinality::ONE,
        }
    }

    fn with_cardinality(mut self, cardinality: Cardinality) -> Self {
        self.cardinality = cardinality;
        self
    }

    fn build(&self, rules: &RuleTable, owner: &str) -> Result<GrammarNode, CompileError> {
        Ok(match &self.target {
            Target::Token(id) => GrammarNode::token(*id, self.cardinality),
            Target::Wildcard => GrammarNode::wildcard(self.cardinality),
            Target::Rule(name) => {
                let index =
                    rules
                        .get_index_of(name)
                        .ok_or_else(|| CompileError::UndefinedRule {
                            name: name.clone(),
                            referenced_from: owner.to_string(),
                        })?;
                GrammarNode::rule(RuleId::new(index), self.cardinality)
            }
        })
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub(super) struct SequenceBuilder {
    nodes: Vec<NodeBuilder>,
    predicate: Option<String>,
}

impl SequenceBuilder {
    pub(super) fn build(
        &self,
        rules: &RuleTable,
        owner: &str,
    ) -> Result<GrammarSequence, CompileError> {
        let nodes = self
            .nodes
            .iter()
            .map(|node| node.build(rules, owner))
            .collect::<Result<Vec<_>, _>>()?;
        let sequence = GrammarSequence::new(nodes);
        Ok(match &self.predicate {
            Some(predicate) => sequence.with_predicate(predicate.clone()),
            None => sequence,
        })
    }
}

/// Rule body before rule references are resolved.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(super) enum PendingRule {
    Optimized(IndexSet<TokenId>),
    Sequences(Vec<SequenceBuilder>),
}

/// All rules collected so far, in model order.
pub(super) type RuleTable = IndexMap<String, PendingRule>;

/// Compiles the blocks of one top-level rule into the shared rule table.
pub(super) struct BlockBuilder<'a> {
    vocabulary: &'a TokenVocabulary,
    rules: &'a mut RuleTable,
    /// Top-level rule being compiled, for diagnostics.
    owner: &'a str,
}

impl<'a> BlockBuilder<'a> {
    pub(super) fn new(
        vocabulary: &'a TokenVocabulary,
        rules: &'a mut RuleTable,
        owner: &'a str,
    ) -> Self {
        Self {
            vocabulary,
            rules,
            owner,
        }
    }

    /// Compiles `block` and stores it as rule `name`, replacing any earlier
    /// rule of that name in place.
    ///
    /// The slot is claimed before compiling so synthetic sub-rules follow
    /// their parent in model order.
    pub(super) fn define(&mut self, name: &str, block: &Block) -> Result<(), CompileError> {
        if block.alternatives.is_empty() {
            return Err(CompileError::EmptyBlock {
                rule: self.owner.to_string(),
            });
        }
        self.rules
            .insert(name.to_string(), PendingRule::Sequences(Vec::new()));

        let body = match self.optimized_tokens(block)? {
            Some(tokens) => PendingRule::Optimized(tokens),
            None => {
                let mut sequences = Vec::with_capacity(block.alternatives.len());
                for (i, alternative) in block.alternatives.iter().enumerate() {
                    sequences.push(self.sequence(&format!("{name}_alt{i}"), alternative)?);
                }
                PendingRule::Sequences(sequences)
            }
        };
        self.rules.insert(name.to_string(), body);
        Ok(())
    }

    /// Token set of a block whose alternatives are all a single terminal.
    fn optimized_tokens(&self, block: &Block) -> Result<Option<IndexSet<TokenId>>, CompileError> {
        let mut tokens = IndexSet::new();
        for alternative in &block.alternatives {
            let [element] = alternative.elements.as_slice() else {
                return Ok(None);
            };
            let Some(name) = element.terminal_name() else {
                return Ok(None);
            };
            tokens.insert(self.token_id(name)?);
        }
        Ok(Some(tokens))
    }

    fn sequence(
        &mut self,
        alt_name: &str,
        alternative: &Alternative,
    ) -> Result<SequenceBuilder, CompileError> {
        let mut sequence = SequenceBuilder::default();
        for (index, element) in alternative.elements.iter().enumerate() {
            match element {
                Element::SemPred(code) | Element::SynPred(code) if index == 0 => {
                    sequence.predicate = Some(code.clone());
                }
                _ => {
                    if let Some(node) = self.node(alt_name, index, element, Cardinality::ONE)? {
                        sequence.nodes.push(node);
                    }
                }
            }
        }
        Ok(sequence)
    }

    /// Node for one element; `None` for elements that match nothing.
    fn node(
        &mut self,
        alt_name: &str,
        index: usize,
        element: &Element,
        cardinality: Cardinality,
    ) -> Result<Option<NodeBuilder>, CompileError> {
        let target = match element {
            Element::Token(_) | Element::Literal(_) | Element::CharSet(_) => {
                Target::Token(self.token_id(element.terminal_name().unwrap_or_default())?)
            }
            Element::Rule(name) => Target::Rule(name.clone()),
            Element::Wildcard => Target::Wildcard,
            // Labels are irrelevant to completion.
            Element::Assign { target, .. } => {
                return self.node(alt_name, index, target, cardinality);
            }
            Element::Optional(block) => {
                return self.sub_block(alt_name, index, block, Cardinality::OPTIONAL);
            }
            Element::Closure(block) => {
                return self.sub_block(alt_name, index, block, Cardinality::ZERO_OR_MORE);
            }
            Element::PositiveClosure(block) => {
                return self.sub_block(alt_name, index, block, Cardinality::ONE_OR_MORE);
            }
            Element::Block(block) => return self.sub_block(alt_name, index, block, cardinality),
            // Predicates past the start are not evaluated.
            Element::SemPred(_) | Element::SynPred(_) | Element::Epsilon => return Ok(None),
            Element::Action(_) => {
                return Err(CompileError::UnsupportedConstruct {
                    construct: element.construct_name(),
                    rule: self.owner.to_string(),
                });
            }
        };
        Ok(Some(NodeBuilder::new(target).with_cardinality(cardinality)))
    }

    /// A parenthesized block collapses into a single node when it holds one
    /// simple element, otherwise it becomes a synthetic rule.
    fn sub_block(
        &mut self,
        alt_name: &str,
        index: usize,
        block: &Block,
        cardinality: Cardinality,
    ) -> Result<Option<NodeBuilder>, CompileError> {
        if let Some(element) = block.single_element().filter(|e| is_simple(e)) {
            return self.node(alt_name, index, element, cardinality);
        }

        let name = format!("{alt_name}_block{index}");
        self.define(&name, block)?;
        Ok(Some(
            NodeBuilder::new(Target::Rule(name)).with_cardinality(cardinality),
        ))
    }

    fn token_id(&self, name: Cow<'_, str>) -> Result<TokenId, CompileError> {
        self.vocabulary
            .get(&name)
            .ok_or_else(|| CompileError::UnknownToken {
                name: name.into_owned(),
                rule: self.owner.to_string(),
            })
    }
}

/// Single terminal or rule reference, possibly labeled.
fn is_simple(element: &Element) -> bool {
    match element {
        Element::Assign { target, .. } => is_simple(target),
        Element::Rule(_) | Element::Wildcard => true,
        _ => element.is_terminal(),
    }
}
