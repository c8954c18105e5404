//! Grammar type definitions.

use std::borrow::Cow;

use serde::{Deserialize, Serialize};

/// Parsed grammar: rule definitions plus import directives.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Grammar {
    /// Grammar name (e.g., "calc", "mysql").
    pub name: String,
    /// Names of grammars imported by this one, in directive order.
    #[serde(default)]
    pub imports: Vec<String>,
    /// Rule definitions, preserving definition order.
    pub rules: Vec<RuleDef>,
}

/// A single rule definition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleDef {
    pub name: String,
    pub block: Block,
}

/// Whether a rule belongs to the parser or the lexer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuleKind {
    Parser,
    Lexer,
}

impl RuleDef {
    /// Lexer rules start with an uppercase letter, parser rules don't.
    pub fn kind(&self) -> RuleKind {
        if self.name.starts_with(|c: char| c.is_ascii_uppercase()) {
            RuleKind::Lexer
        } else {
            RuleKind::Parser
        }
    }

    pub fn is_lexer(&self) -> bool {
        self.kind() == RuleKind::Lexer
    }
}

/// A rule body or a parenthesized part of one: a list of alternatives.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Block {
    pub alternatives: Vec<Alternative>,
}

/// One alternative of a block: elements matched in order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Alternative {
    pub elements: Vec<Element>,
}

/// Label assignment operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AssignOp {
    /// `label = element`
    Assign,
    /// `label += element`
    PlusAssign,
}

/// Grammar element variants.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Element {
    /// Reference to a lexer token by name (`NUMBER`).
    Token(String),
    /// Quoted literal in a parser rule (`'select'`), stored without quotes.
    Literal(String),
    /// Character set (`[a-z]`), resolved by its verbatim text.
    CharSet(String),
    /// Reference to a parser rule.
    Rule(String),
    /// `( ... )?`
    Optional(Block),
    /// `( ... )*`
    Closure(Block),
    /// `( ... )+`
    PositiveClosure(Block),
    /// Parenthesized group without an operator.
    Block(Block),
    /// Labeled element (`x=ID`, `xs+=expr`).
    Assign {
        label: String,
        op: AssignOp,
        target: Box<Element>,
    },
    /// Semantic predicate (`{...}?`).
    SemPred(String),
    /// Syntactic predicate, already converted to a semantic one by the grammar tool.
    SynPred(String),
    /// Embedded action (`{...}`).
    Action(String),
    /// Empty alternative.
    Epsilon,
    /// Match any token except end-of-input (`.`).
    Wildcard,
}

impl Element {
    /// Terminal reference: token, literal, or character set.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Token(_) | Self::Literal(_) | Self::CharSet(_))
    }

    /// Vocabulary key of a terminal: the token name, the quoted literal, or the
    /// verbatim character set.
    pub fn terminal_name(&self) -> Option<Cow<'_, str>> {
        match self {
            Self::Token(name) | Self::CharSet(name) => Some(Cow::Borrowed(name)),
            Self::Literal(value) => Some(Cow::Owned(format!("'{value}'"))),
            _ => None,
        }
    }

    /// Short construct name used in diagnostics.
    pub fn construct_name(&self) -> &'static str {
        match self {
            Self::Token(_) => "token reference",
            Self::Literal(_) => "string literal",
            Self::CharSet(_) => "character set",
            Self::Rule(_) => "rule reference",
            Self::Optional(_) => "optional block",
            Self::Closure(_) => "closure",
            Self::PositiveClosure(_) => "positive closure",
            Self::Block(_) => "block",
            Self::Assign { .. } => "label assignment",
            Self::SemPred(_) => "semantic predicate",
            Self::SynPred(_) => "syntactic predicate",
            Self::Action(_) => "action",
            Self::Epsilon => "epsilon",
            Self::Wildcard => "wildcard",
        }
    }
}

impl Block {
    /// The element of a block holding exactly one alternative with exactly one element.
    pub fn single_element(&self) -> Option<&Element> {
        match self.alternatives.as_slice() {
            [alt] => match alt.elements.as_slice() {
                [element] => Some(element),
                _ => None,
            },
            _ => None,
        }
    }
}
