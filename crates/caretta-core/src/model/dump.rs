//! Human-readable model dump for debugging and snapshot tests.
//!
//! One entry per rule, in model order:
//!
//! ```text
//! equation =
//!   | NUMBER equation_alt0_block1 NUMBER
//! equation_alt0_block1 = {PLUS, MINUS}
//! ```
//!
//! Node suffixes follow grammar notation (`?`, `*`, `+`), the wildcard prints
//! as `.`, an empty sequence as `ε`. Special and ignored rules are tagged.

use std::fmt::Write as _;

use crate::TokenId;

use super::{GrammarModel, GrammarNode, GrammarSequence, GrammarSymbol, RuleAlternatives};

impl GrammarModel {
    pub fn dump(&self) -> String {
        let mut out = String::new();

        for (id, name, alts) in self.rules() {
            out.push_str(name);
            if self.is_special_rule(id) {
                out.push_str(" [special]");
            }
            if self.is_ignored_rule(id) {
                out.push_str(" [ignored]");
            }

            match alts {
                RuleAlternatives::Optimized(tokens) => {
                    let names: Vec<_> = tokens.iter().map(|t| self.token_name(*t)).collect();
                    writeln!(out, " = {{{}}}", names.join(", ")).unwrap();
                }
                RuleAlternatives::Sequences(sequences) => {
                    out.push_str(" =\n");
                    for sequence in sequences {
                        writeln!(out, "  | {}", self.format_sequence(sequence)).unwrap();
                    }
                }
            }
        }

        let ignored: Vec<_> = self
            .ignored_tokens()
            .filter(|t| *t != TokenId::WILDCARD)
            .map(|t| self.token_name(t))
            .collect();
        if !ignored.is_empty() {
            writeln!(out, "ignored tokens: {}", ignored.join(", ")).unwrap();
        }

        out
    }

    fn format_sequence(&self, sequence: &GrammarSequence) -> String {
        let mut parts = Vec::new();
        if let Some(predicate) = sequence.predicate() {
            parts.push(format!("{{{predicate}}}?"));
        }
        if sequence.is_empty() {
            parts.push("ε".to_string());
        }
        parts.extend(sequence.nodes().iter().map(|n| self.format_node(n)));
        parts.join(" ")
    }

    fn format_node(&self, node: &GrammarNode) -> String {
        let name = match node.symbol() {
            GrammarSymbol::Token(_) if node.is_any() => ".".into(),
            GrammarSymbol::Token(id) => self.token_name(id),
            GrammarSymbol::Rule(id) => self.rule_name(id).into(),
        };
        format!("{name}{}", node.cardinality().suffix())
    }
}
