//! Constructors for assembling grammars in code.
//!
//! Hosts that already have a grammar parser produce [`Grammar`] values directly;
//! these helpers keep hand-written grammars (tests, small DSLs) readable:
//!
//! ```
//! use caretta_core::grammar::{Alternative, Block, Element, Grammar};
//!
//! let grammar = Grammar::new("calc").with_rule(
//!     "equation",
//!     [Alternative::new([
//!         Element::token("NUMBER"),
//!         Element::Block(Block::choice([Element::token("PLUS"), Element::token("MINUS")])),
//!         Element::token("NUMBER"),
//!     ])],
//! );
//! assert_eq!(grammar.rules.len(), 1);
//! ```

use super::types::{Alternative, AssignOp, Block, Element, Grammar, RuleDef};

impl Grammar {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            imports: Vec::new(),
            rules: Vec::new(),
        }
    }

    pub fn with_import(mut self, name: impl Into<String>) -> Self {
        self.imports.push(name.into());
        self
    }

    pub fn with_rule(
        mut self,
        name: impl Into<String>,
        alternatives: impl IntoIterator<Item = Alternative>,
    ) -> Self {
        self.rules.push(RuleDef {
            name: name.into(),
            block: Block::new(alternatives),
        });
        self
    }

    /// Looks up a rule definition by name.
    pub fn rule(&self, name: &str) -> Option<&RuleDef> {
        self.rules.iter().find(|r| r.name == name)
    }
}

impl Block {
    pub fn new(alternatives: impl IntoIterator<Item = Alternative>) -> Self {
        Self {
            alternatives: alternatives.into_iter().collect(),
        }
    }

    /// One alternative per element: `(A | B | C)`.
    pub fn choice(elements: impl IntoIterator<Item = Element>) -> Self {
        Self::new(elements.into_iter().map(|e| Alternative::new([e])))
    }

    /// A single alternative: `(A B C)`.
    pub fn sequence(elements: impl IntoIterator<Item = Element>) -> Self {
        Self::new([Alternative::new(elements)])
    }
}

impl Alternative {
    pub fn new(elements: impl IntoIterator<Item = Element>) -> Self {
        Self {
            elements: elements.into_iter().collect(),
        }
    }

    /// The empty alternative.
    pub fn epsilon() -> Self {
        Self::new([Element::Epsilon])
    }
}

impl From<Vec<Element>> for Alternative {
    fn from(elements: Vec<Element>) -> Self {
        Self { elements }
    }
}

impl Element {
    pub fn token(name: impl Into<String>) -> Self {
        Self::Token(name.into())
    }

    pub fn literal(value: impl Into<String>) -> Self {
        Self::Literal(value.into())
    }

    pub fn rule(name: impl Into<String>) -> Self {
        Self::Rule(name.into())
    }

    /// `label = target`
    pub fn assign(label: impl Into<String>, target: Element) -> Self {
        Self::Assign {
            label: label.into(),
            op: AssignOp::Assign,
            target: Box::new(target),
        }
    }

    /// `label += target`
    pub fn plus_assign(label: impl Into<String>, target: Element) -> Self {
        Self::Assign {
            label: label.into(),
            op: AssignOp::PlusAssign,
            target: Box::new(target),
        }
    }

    /// Wraps `self` as `(self)?`.
    pub fn optional(self) -> Self {
        Self::Optional(Block::sequence([self]))
    }

    /// Wraps `self` as `(self)*`.
    pub fn closure(self) -> Self {
        Self::Closure(Block::sequence([self]))
    }

    /// Wraps `self` as `(self)+`.
    pub fn positive_closure(self) -> Self {
        Self::PositiveClosure(Block::sequence([self]))
    }
}
