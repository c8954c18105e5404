//! JSON deserialization for grammar ASTs.
//!
//! The interchange format uses internally-tagged elements with a `type` field
//! named after the grammar tool's AST node types. Rules map to their list of
//! alternatives; each alternative is a list of elements.

use indexmap::IndexMap;
use serde::Deserialize;

use super::types::{Alternative, AssignOp, Block, Element, Grammar, RuleDef};

/// Error during grammar decoding.
#[derive(Debug)]
pub enum GrammarError {
    Json(serde_json::Error),
    Binary(postcard::Error),
}

impl std::fmt::Display for GrammarError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Json(e) => write!(f, "JSON parse error: {e}"),
            Self::Binary(e) => write!(f, "binary decode error: {e}"),
        }
    }
}

impl std::error::Error for GrammarError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Json(e) => Some(e),
            Self::Binary(e) => Some(e),
        }
    }
}

impl Grammar {
    /// Parse grammar from JSON string.
    pub fn from_json(json: &str) -> Result<Self, GrammarError> {
        let raw: RawGrammar = serde_json::from_str(json).map_err(GrammarError::Json)?;
        Ok(raw.into())
    }
}

type RawBlock = Vec<Vec<RawElement>>;

#[derive(Debug, Deserialize)]
struct RawGrammar {
    name: String,
    #[serde(default)]
    imports: Vec<String>,
    rules: IndexMap<String, RawBlock>,
}

impl From<RawGrammar> for Grammar {
    fn from(raw: RawGrammar) -> Self {
        // IndexMap keeps definition order; the start rule is usually first.
        Self {
            name: raw.name,
            imports: raw.imports,
            rules: raw
                .rules
                .into_iter()
                .map(|(name, block)| RuleDef {
                    name,
                    block: block_from_raw(block),
                })
                .collect(),
        }
    }
}

fn block_from_raw(raw: RawBlock) -> Block {
    Block {
        alternatives: raw
            .into_iter()
            .map(|elements| Alternative {
                elements: elements.into_iter().map(Into::into).collect(),
            })
            .collect(),
    }
}

#[derive(Debug, Deserialize)]
#[serde(tag = "type")]
#[allow(clippy::upper_case_acronyms, non_camel_case_types)]
enum RawElement {
    TOKEN_REF { name: String },
    STRING_LITERAL { value: String },
    CHAR_SET { value: String },
    RULE_REF { name: String },
    OPTIONAL { alternatives: RawBlock },
    CLOSURE { alternatives: RawBlock },
    POSITIVE_CLOSURE { alternatives: RawBlock },
    BLOCK { alternatives: RawBlock },
    ASSIGN { label: String, target: Box<RawElement> },
    PLUS_ASSIGN { label: String, target: Box<RawElement> },
    SEMPRED { code: String },
    SYNPRED { code: String },
    ACTION { code: String },
    EPSILON,
    WILDCARD,
}

impl From<RawElement> for Element {
    fn from(raw: RawElement) -> Self {
        #[allow(clippy::boxed_local)] // Fields are Box<RawElement>, output needs Box<Element>
        fn conv(target: Box<RawElement>) -> Box<Element> {
            Box::new(Element::from(*target))
        }

        match raw {
            RawElement::TOKEN_REF { name } => Element::Token(name),
            RawElement::STRING_LITERAL { value } => Element::Literal(value),
            RawElement::CHAR_SET { value } => Element::CharSet(value),
            RawElement::RULE_REF { name } => Element::Rule(name),
            RawElement::OPTIONAL { alternatives } => Element::Optional(block_from_raw(alternatives)),
            RawElement::CLOSURE { alternatives } => Element::Closure(block_from_raw(alternatives)),
            RawElement::POSITIVE_CLOSURE { alternatives } => {
                Element::PositiveClosure(block_from_raw(alternatives))
            }
            RawElement::BLOCK { alternatives } => Element::Block(block_from_raw(alternatives)),
            RawElement::ASSIGN { label, target } => Element::Assign {
                label,
                op: AssignOp::Assign,
                target: conv(target),
            },
            RawElement::PLUS_ASSIGN { label, target } => Element::Assign {
                label,
                op: AssignOp::PlusAssign,
                target: conv(target),
            },
            RawElement::SEMPRED { code } => Element::SemPred(code),
            RawElement::SYNPRED { code } => Element::SynPred(code),
            RawElement::ACTION { code } => Element::Action(code),
            RawElement::EPSILON => Element::Epsilon,
            RawElement::WILDCARD => Element::Wildcard,
        }
    }
}
