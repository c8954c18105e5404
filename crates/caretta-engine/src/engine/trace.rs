//! Tracing infrastructure for debugging completion runs.
//!
//! # Design: Zero-Cost Abstraction
//!
//! With `NoopTracer` every trait method is an `#[inline(always)]` empty
//! function, so the calls and their arguments compile away. The matcher keeps
//! no tracing state of its own; [`PrintTracer`] tracks nesting depth itself.

use caretta_core::{GrammarModel, RuleId, TokenId};

use super::matcher::RunState;

/// Verbosity level for trace output.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Verbosity {
    /// Rule entry/exit, caret, recursion guards and candidates.
    #[default]
    Default,
    /// Also alternative results, memo hits and collection steps.
    Verbose,
}

/// Instrumentation hooks called by the matcher and collector.
///
/// Methods receive raw ids and scanner positions; name resolution and
/// formatting belong to the implementation.
pub trait Tracer {
    /// Before matching `rule` at `position`.
    fn trace_enter_rule(&mut self, rule: RuleId, position: usize);

    /// After matching `rule`; `position` is where the winning alternative ended.
    fn trace_exit_rule(&mut self, rule: RuleId, matched: bool, position: usize, state: RunState);

    /// After one alternative of the current rule was tried.
    fn trace_alternative(&mut self, index: usize, matched: bool, position: usize);

    /// A cached result for `rule` at `position` was reused.
    fn trace_memo_hit(&mut self, rule: RuleId, position: usize);

    /// `rule` was re-entered at `position` while still being matched there.
    fn trace_left_recursion(&mut self, rule: RuleId, position: usize);

    /// The caret was reached; matching switches to collection.
    fn trace_caret_reached(&mut self, position: usize);

    /// Collection descends into `rule`.
    fn trace_collect(&mut self, rule: RuleId);

    /// A token candidate was offered, with its mandatory continuation.
    fn trace_token_candidate(&mut self, lead: TokenId, continuation: &[TokenId]);

    /// A special rule was offered as a candidate.
    fn trace_rule_candidate(&mut self, rule: RuleId);
}

/// No-op tracer that gets optimized away completely.
pub struct NoopTracer;

impl Tracer for NoopTracer {
    #[inline(always)]
    fn trace_enter_rule(&mut self, _rule: RuleId, _position: usize) {}

    #[inline(always)]
    fn trace_exit_rule(&mut self, _rule: RuleId, _matched: bool, _position: usize, _state: RunState) {
    }

    #[inline(always)]
    fn trace_alternative(&mut self, _index: usize, _matched: bool, _position: usize) {}

    #[inline(always)]
    fn trace_memo_hit(&mut self, _rule: RuleId, _position: usize) {}

    #[inline(always)]
    fn trace_left_recursion(&mut self, _rule: RuleId, _position: usize) {}

    #[inline(always)]
    fn trace_caret_reached(&mut self, _position: usize) {}

    #[inline(always)]
    fn trace_collect(&mut self, _rule: RuleId) {}

    #[inline(always)]
    fn trace_token_candidate(&mut self, _lead: TokenId, _continuation: &[TokenId]) {}

    #[inline(always)]
    fn trace_rule_candidate(&mut self, _rule: RuleId) {}
}

/// Tracer that collects an indented, human-readable log.
///
/// ```text
/// > equation @0
///   caret @2
///   + PLUS
///   + MINUS
/// < equation failed @0
/// ```
pub struct PrintTracer<'m> {
    model: &'m GrammarModel,
    verbosity: Verbosity,
    lines: Vec<String>,
    depth: usize,
}

impl<'m> PrintTracer<'m> {
    pub fn new(model: &'m GrammarModel, verbosity: Verbosity) -> Self {
        Self {
            model,
            verbosity,
            lines: Vec::new(),
            depth: 0,
        }
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// The whole trace, one line per event.
    pub fn output(&self) -> String {
        self.lines.join("\n")
    }

    /// Print the trace to stderr.
    pub fn print(&self) {
        for line in &self.lines {
            eprintln!("{line}");
        }
    }

    fn push(&mut self, line: String) {
        self.lines.push(format!("{}{line}", "  ".repeat(self.depth)));
    }

    fn verbose(&self) -> bool {
        self.verbosity == Verbosity::Verbose
    }
}

fn outcome(matched: bool) -> &'static str {
    if matched { "matched" } else { "failed" }
}

impl Tracer for PrintTracer<'_> {
    fn trace_enter_rule(&mut self, rule: RuleId, position: usize) {
        self.push(format!("> {} @{position}", self.model.rule_name(rule)));
        self.depth += 1;
    }

    fn trace_exit_rule(&mut self, rule: RuleId, matched: bool, position: usize, state: RunState) {
        self.depth = self.depth.saturating_sub(1);
        let pending = match state {
            RunState::Matching => "",
            RunState::CollectionPending => " (collection pending)",
        };
        self.push(format!(
            "< {} {} @{position}{pending}",
            self.model.rule_name(rule),
            outcome(matched)
        ));
    }

    fn trace_alternative(&mut self, index: usize, matched: bool, position: usize) {
        if self.verbose() {
            self.push(format!("alt {index} {} @{position}", outcome(matched)));
        }
    }

    fn trace_memo_hit(&mut self, rule: RuleId, position: usize) {
        if self.verbose() {
            self.push(format!("memo {} @{position}", self.model.rule_name(rule)));
        }
    }

    fn trace_left_recursion(&mut self, rule: RuleId, position: usize) {
        self.push(format!("left recursion {} @{position}", self.model.rule_name(rule)));
    }

    fn trace_caret_reached(&mut self, position: usize) {
        self.push(format!("caret @{position}"));
    }

    fn trace_collect(&mut self, rule: RuleId) {
        if self.verbose() {
            self.push(format!("collect {}", self.model.rule_name(rule)));
        }
    }

    fn trace_token_candidate(&mut self, lead: TokenId, continuation: &[TokenId]) {
        let names: Vec<_> = std::iter::once(&lead)
            .chain(continuation)
            .map(|&id| self.model.token_name(id))
            .collect();
        self.push(format!("+ {}", names.join(" ")));
    }

    fn trace_rule_candidate(&mut self, rule: RuleId) {
        self.push(format!("+ {} (rule)", self.model.rule_name(rule)));
    }
}
