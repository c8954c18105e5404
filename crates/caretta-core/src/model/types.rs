//! Compiled grammar building blocks.

use indexmap::IndexSet;
use serde::{Deserialize, Serialize};

use crate::TokenId;

/// Index of a rule in its [`GrammarModel`](super::GrammarModel).
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct RuleId(u32);

impl RuleId {
    pub fn new(index: usize) -> Self {
        Self(u32::try_from(index).expect("rule count exceeds u32"))
    }

    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// How often a node may match.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Cardinality {
    pub multiple: bool,
    pub required: bool,
}

impl Cardinality {
    /// Exactly once.
    pub const ONE: Self = Self {
        multiple: false,
        required: true,
    };
    /// `?`
    pub const OPTIONAL: Self = Self {
        multiple: false,
        required: false,
    };
    /// `*`
    pub const ZERO_OR_MORE: Self = Self {
        multiple: true,
        required: false,
    };
    /// `+`
    pub const ONE_OR_MORE: Self = Self {
        multiple: true,
        required: true,
    };

    /// Grammar notation suffix: `""`, `?`, `*` or `+`.
    pub fn suffix(self) -> &'static str {
        match (self.multiple, self.required) {
            (false, true) => "",
            (false, false) => "?",
            (true, false) => "*",
            (true, true) => "+",
        }
    }
}

/// What a node refers to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GrammarSymbol {
    Token(TokenId),
    Rule(RuleId),
}

/// One step in a sequence.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GrammarNode {
    symbol: GrammarSymbol,
    cardinality: Cardinality,
    any: bool,
}

impl GrammarNode {
    pub fn token(token: TokenId, cardinality: Cardinality) -> Self {
        Self {
            symbol: GrammarSymbol::Token(token),
            cardinality,
            any: false,
        }
    }

    pub fn rule(rule: RuleId, cardinality: Cardinality) -> Self {
        Self {
            symbol: GrammarSymbol::Rule(rule),
            cardinality,
            any: false,
        }
    }

    /// Matches any token except end-of-input.
    pub fn wildcard(cardinality: Cardinality) -> Self {
        Self {
            symbol: GrammarSymbol::Token(TokenId::WILDCARD),
            cardinality,
            any: true,
        }
    }

    #[inline]
    pub fn symbol(&self) -> GrammarSymbol {
        self.symbol
    }

    #[inline]
    pub fn cardinality(&self) -> Cardinality {
        self.cardinality
    }

    #[inline]
    pub fn is_terminal(&self) -> bool {
        matches!(self.symbol, GrammarSymbol::Token(_))
    }

    #[inline]
    pub fn is_required(&self) -> bool {
        self.cardinality.required
    }

    #[inline]
    pub fn is_multiple(&self) -> bool {
        self.cardinality.multiple
    }

    #[inline]
    pub fn is_any(&self) -> bool {
        self.any
    }

    pub fn token_id(&self) -> Option<TokenId> {
        match self.symbol {
            GrammarSymbol::Token(id) => Some(id),
            GrammarSymbol::Rule(_) => None,
        }
    }

    pub fn rule_id(&self) -> Option<RuleId> {
        match self.symbol {
            GrammarSymbol::Rule(id) => Some(id),
            GrammarSymbol::Token(_) => None,
        }
    }
}

/// One alternative's right-hand side. Empty means epsilon.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GrammarSequence {
    nodes: Vec<GrammarNode>,
    /// Leading validating predicate. Recorded, not evaluated.
    predicate: Option<String>,
}

impl GrammarSequence {
    pub fn new(nodes: Vec<GrammarNode>) -> Self {
        Self {
            nodes,
            predicate: None,
        }
    }

    pub fn with_predicate(mut self, predicate: impl Into<String>) -> Self {
        self.predicate = Some(predicate.into());
        self
    }

    #[inline]
    pub fn nodes(&self) -> &[GrammarNode] {
        &self.nodes
    }

    pub fn predicate(&self) -> Option<&str> {
        self.predicate.as_deref()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// True if every node after `index` is optional.
    pub fn is_satisfied_after(&self, index: usize) -> bool {
        self.nodes
            .get(index + 1..)
            .is_none_or(|rest| rest.iter().all(|n| !n.is_required()))
    }
}

/// Compiled body of one rule.
///
/// Never empty: a token set has at least one token, a sequence list at least
/// one sequence (which may itself be empty).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum RuleAlternatives {
    /// Every alternative is a single terminal: O(1) membership test.
    Optimized(IndexSet<TokenId>),
    Sequences(Vec<GrammarSequence>),
}

impl RuleAlternatives {
    pub fn optimized(tokens: IndexSet<TokenId>) -> Self {
        assert!(!tokens.is_empty(), "optimized rule needs at least one token");
        Self::Optimized(tokens)
    }

    pub fn sequences(sequences: Vec<GrammarSequence>) -> Self {
        assert!(!sequences.is_empty(), "rule needs at least one alternative");
        Self::Sequences(sequences)
    }

    pub fn is_optimized(&self) -> bool {
        matches!(self, Self::Optimized(_))
    }

    /// Token set of an optimized rule.
    pub fn tokens(&self) -> Option<&IndexSet<TokenId>> {
        match self {
            Self::Optimized(tokens) => Some(tokens),
            Self::Sequences(_) => None,
        }
    }

    /// Sequences of a general rule; empty for an optimized one.
    pub fn sequence_list(&self) -> &[GrammarSequence] {
        match self {
            Self::Optimized(_) => &[],
            Self::Sequences(sequences) => sequences,
        }
    }
}
