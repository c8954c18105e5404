//! Caret-aware matcher.
//!
//! `match_rule` and `match_alternative` walk the model against the scanner
//! until the caret is reached, then hand over to the collector (see
//! `collect.rs`). Alternatives are tried independently from the same position;
//! the one that gets furthest wins.

use std::collections::{BTreeSet, HashMap};

use caretta_core::{GrammarModel, GrammarNode, GrammarSequence, GrammarSymbol, RuleAlternatives, RuleId};

use crate::scanner::{Caret, Scanner};

use super::candidates::CandidateSet;
use super::error::RuntimeError;
use super::trace::{NoopTracer, Tracer};

/// Runtime limits for one completion request.
#[derive(Clone, Copy, Debug)]
pub struct FuelLimits {
    /// Maximum rule visits, matching and collecting (default: 1,000,000).
    pub(crate) exec_fuel: u32,
    /// Maximum rule nesting depth (default: 1,024).
    pub(crate) recursion_limit: u32,
}

impl Default for FuelLimits {
    fn default() -> Self {
        Self {
            exec_fuel: 1_000_000,
            recursion_limit: 1024,
        }
    }
}

impl FuelLimits {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn exec_fuel(mut self, fuel: u32) -> Self {
        self.exec_fuel = fuel;
        self
    }

    pub fn recursion_limit(mut self, limit: u32) -> Self {
        self.recursion_limit = limit;
        self
    }

    pub fn get_exec_fuel(&self) -> u32 {
        self.exec_fuel
    }

    pub fn get_recursion_limit(&self) -> u32 {
        self.recursion_limit
    }
}

/// Whether the walk still consumes input or is gathering candidates.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RunState {
    Matching,
    /// Collection reached the end of a rule with only optional nodes; the
    /// enclosing sequence must keep collecting after it.
    CollectionPending,
}

/// Result of a completion request.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Completion {
    /// Token names, mandatory compounds (`CREATE TABLE`) and special rule names.
    pub candidates: BTreeSet<String>,
    /// The root rule matched and every token before the caret was consumed.
    pub fully_parsed: bool,
    /// Already-typed prefix of the word under the caret.
    pub typed_part: Option<String>,
}

/// Completion engine for one token stream and caret.
pub struct Matcher<'m> {
    model: &'m GrammarModel,
    scanner: Scanner,
    caret: Caret,
    limits: FuelLimits,
}

/// Builder for `Matcher`.
pub struct MatcherBuilder<'m> {
    model: &'m GrammarModel,
    scanner: Scanner,
    caret: Caret,
    limits: FuelLimits,
}

impl<'m> MatcherBuilder<'m> {
    pub fn new(model: &'m GrammarModel, scanner: Scanner, caret: Caret) -> Self {
        Self {
            model,
            scanner,
            caret,
            limits: FuelLimits::default(),
        }
    }

    pub fn limits(mut self, limits: FuelLimits) -> Self {
        self.limits = limits;
        self
    }

    pub fn exec_fuel(mut self, fuel: u32) -> Self {
        self.limits = self.limits.exec_fuel(fuel);
        self
    }

    pub fn recursion_limit(mut self, limit: u32) -> Self {
        self.limits = self.limits.recursion_limit(limit);
        self
    }

    pub fn build(self) -> Matcher<'m> {
        Matcher {
            model: self.model,
            scanner: self.scanner,
            caret: self.caret,
            limits: self.limits,
        }
    }
}

impl<'m> Matcher<'m> {
    pub fn builder(model: &'m GrammarModel, scanner: Scanner, caret: Caret) -> MatcherBuilder<'m> {
        MatcherBuilder::new(model, scanner, caret)
    }

    /// Candidates at the caret when parsing from rule `root`.
    pub fn complete(&mut self, root: &str) -> Result<Completion, RuntimeError> {
        self.complete_with(root, &mut NoopTracer)
    }

    /// Like [`complete`](Self::complete), reporting every step to `tracer`.
    pub fn complete_with<T: Tracer>(
        &mut self,
        root: &str,
        tracer: &mut T,
    ) -> Result<Completion, RuntimeError> {
        let rule = self
            .model
            .rule_id(root)
            .ok_or_else(|| RuntimeError::UnknownRule(root.to_string()))?;

        self.scanner.reset();
        self.scanner.skip_hidden();

        let mut run = Run::new(self.model, &mut self.scanner, self.caret, self.limits, tracer);
        let matched = run.match_rule(rule)?;
        let fully_parsed = matched && run.caret_reached();
        let candidates = run.candidates.render(self.model);

        Ok(Completion {
            candidates,
            fully_parsed,
            typed_part: self.scanner.typed_part(self.caret).map(str::to_string),
        })
    }

    pub fn scanner(&self) -> &Scanner {
        &self.scanner
    }
}

/// Cached outcome of matching a rule at a position.
#[derive(Clone, Copy, Debug)]
struct Memo {
    outcome: Outcome,
    /// Seed of a left-recursive rule that is still growing.
    growing: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct Outcome {
    matched: bool,
    end: usize,
    state: RunState,
}

/// A rule being matched.
#[derive(Debug)]
struct Frame {
    rule: RuleId,
    start: usize,
    /// Re-entered at `start` while active.
    recursed: bool,
    /// Depends on an enclosing frame's in-progress result; not cacheable.
    tainted: bool,
}

/// State of one completion request.
pub(super) struct Run<'r, T: Tracer> {
    pub(super) model: &'r GrammarModel,
    pub(super) scanner: &'r mut Scanner,
    caret: Caret,
    pub(super) state: RunState,
    pub(super) candidates: CandidateSet,
    frames: Vec<Frame>,
    /// Rules collection is currently descending through.
    pub(super) collecting: Vec<RuleId>,
    memo: HashMap<(RuleId, usize), Memo>,
    exec_fuel: u32,
    limits: FuelLimits,
    pub(super) tracer: &'r mut T,
}

impl<'r, T: Tracer> Run<'r, T> {
    fn new(
        model: &'r GrammarModel,
        scanner: &'r mut Scanner,
        caret: Caret,
        limits: FuelLimits,
        tracer: &'r mut T,
    ) -> Self {
        Self {
            model,
            scanner,
            caret,
            state: RunState::Matching,
            candidates: CandidateSet::default(),
            frames: Vec::new(),
            collecting: Vec::new(),
            memo: HashMap::new(),
            exec_fuel: limits.exec_fuel,
            limits,
            tracer,
        }
    }

    pub(super) fn burn_fuel(&mut self) -> Result<(), RuntimeError> {
        if self.exec_fuel == 0 {
            return Err(RuntimeError::ExecFuelExhausted(self.limits.exec_fuel));
        }
        self.exec_fuel -= 1;
        Ok(())
    }

    pub(super) fn check_depth(&self) -> Result<(), RuntimeError> {
        if self.frames.len() + self.collecting.len() >= self.limits.recursion_limit as usize {
            return Err(RuntimeError::RecursionLimitExceeded(self.limits.recursion_limit));
        }
        Ok(())
    }

    pub(super) fn caret_reached(&self) -> bool {
        self.scanner.is_cursor_at_or_after_current_token(self.caret)
    }

    /// Matches `rule` at the current position. Collects from it instead when
    /// the caret is already reached.
    fn match_rule(&mut self, rule: RuleId) -> Result<bool, RuntimeError> {
        if self.state != RunState::Matching {
            return Ok(false);
        }
        self.burn_fuel()?;
        let start = self.scanner.position();

        if self.caret_reached() {
            self.tracer.trace_caret_reached(start);
            self.collect_from_rule(rule)?;
            return Ok(false);
        }

        if let Some(memo) = self.memo.get(&(rule, start)).copied() {
            self.tracer.trace_memo_hit(rule, start);
            if memo.growing {
                self.mark_recursion(rule, start);
            }
            self.scanner.seek(memo.outcome.end);
            self.state = memo.outcome.state;
            return Ok(memo.outcome.matched);
        }

        if self.frames.iter().any(|f| f.rule == rule && f.start == start) {
            self.tracer.trace_left_recursion(rule, start);
            self.mark_recursion(rule, start);
            return Ok(false);
        }

        self.check_depth()?;
        self.tracer.trace_enter_rule(rule, start);
        self.frames.push(Frame {
            rule,
            start,
            recursed: false,
            tainted: false,
        });

        let mut outcome = self.match_body(rule, start)?;
        if self.frames.last().is_some_and(|f| f.recursed) {
            outcome = self.grow(rule, start, outcome)?;
        }

        if self.frames.pop().is_some_and(|f| f.tainted) {
            self.memo.remove(&(rule, start));
        } else {
            self.memo.insert(
                (rule, start),
                Memo {
                    outcome,
                    growing: false,
                },
            );
        }

        self.scanner.seek(outcome.end);
        self.state = outcome.state;
        self.tracer
            .trace_exit_rule(rule, outcome.matched, outcome.end, outcome.state);
        Ok(outcome.matched)
    }

    /// Flags the active frame for `rule` at `start` as left-recursive and every
    /// frame above it as depending on its unfinished result.
    fn mark_recursion(&mut self, rule: RuleId, start: usize) {
        let Some(index) = self
            .frames
            .iter()
            .rposition(|f| f.rule == rule && f.start == start)
        else {
            return;
        };
        self.frames[index].recursed = true;
        for frame in &mut self.frames[index + 1..] {
            frame.tainted = true;
        }
    }

    fn match_body(&mut self, rule: RuleId, start: usize) -> Result<Outcome, RuntimeError> {
        let model = self.model;
        match model.rule(rule) {
            RuleAlternatives::Optimized(tokens) => {
                let matched = tokens.contains(&self.scanner.kind());
                let mut state = RunState::Matching;
                if matched {
                    self.scanner.advance(true);
                    if self.caret_reached() {
                        state = RunState::CollectionPending;
                    }
                }
                Ok(Outcome {
                    matched,
                    end: self.scanner.position(),
                    state,
                })
            }
            RuleAlternatives::Sequences(sequences) => {
                let mut matched_any = false;
                let mut best: Option<(usize, RunState)> = None;

                for (index, sequence) in sequences.iter().enumerate() {
                    self.scanner.seek(start);
                    self.state = RunState::Matching;
                    let matched = self.match_alternative(sequence)?;
                    let end = self.scanner.position();
                    self.tracer.trace_alternative(index, matched, end);

                    matched_any |= matched;
                    let candidate = matched || self.state != RunState::Matching;
                    // Longest wins; ties keep the first.
                    if candidate && best.is_none_or(|(best_end, _)| end > best_end) {
                        best = Some((end, self.state));
                    }
                }

                let (end, state) = best.unwrap_or((start, RunState::Matching));
                self.scanner.seek(end);
                Ok(Outcome {
                    matched: matched_any,
                    end,
                    state,
                })
            }
        }
    }

    /// Grows a left-recursive rule: re-matches it with the previous result
    /// cached as the inner call's answer until it stops getting longer.
    fn grow(&mut self, rule: RuleId, start: usize, seed: Outcome) -> Result<Outcome, RuntimeError> {
        let mut best = seed;
        loop {
            self.memo.insert(
                (rule, start),
                Memo {
                    outcome: best,
                    growing: true,
                },
            );
            self.scanner.seek(start);
            self.state = RunState::Matching;

            let next = self.match_body(rule, start)?;
            let usable = next.matched || next.state != RunState::Matching;
            if !usable || next.end <= best.end {
                break;
            }
            best = next;
        }
        Ok(best)
    }

    /// Collects after a repeated node `i` matched up to the caret: one more
    /// repetition or whatever follows it.
    fn collect_after_repeat(
        &mut self,
        sequence: &GrammarSequence,
        i: usize,
    ) -> Result<(), RuntimeError> {
        self.collect_from_alternative(sequence, i)?;
        // An optional node already let collection run past it.
        if sequence.nodes()[i].is_required() {
            self.collect_from_alternative(sequence, i + 1)?;
        }
        Ok(())
    }

    fn match_alternative(&mut self, sequence: &GrammarSequence) -> Result<bool, RuntimeError> {
        let nodes = sequence.nodes();
        if nodes.is_empty() {
            return Ok(true);
        }

        let mut i = 0;
        loop {
            // Node allows repetition and matched at least once.
            let mut matched_loop = false;

            // Skip optional nodes that don't match.
            let (node, matched) = loop {
                let node = &nodes[i];
                let matched = self.match_node(node)?;

                if self.state != RunState::Matching {
                    if node.is_multiple() {
                        self.collect_from_alternative(sequence, i)?;
                    }
                    self.collect_from_alternative(sequence, i + 1)?;
                    return Ok(matched && sequence.is_satisfied_after(i));
                }

                if matched && node.is_multiple() {
                    matched_loop = true;
                }
                if matched || node.is_required() {
                    break (node, matched);
                }

                i += 1;
                if i == nodes.len() {
                    return Ok(true);
                }
            };

            if matched {
                if node.is_terminal() {
                    self.scanner.advance(true);
                }
                if self.caret_reached() {
                    self.tracer.trace_caret_reached(self.scanner.position());
                    if node.is_multiple() {
                        self.collect_after_repeat(sequence, i)?;
                    } else {
                        self.collect_from_alternative(sequence, i + 1)?;
                    }
                    return Ok(sequence.is_satisfied_after(i));
                }

                // Greedy repetition.
                if node.is_multiple() {
                    while !self.scanner.is_end_of_input() {
                        let before = self.scanner.position();
                        let matched = self.match_node(node)?;

                        if self.state == RunState::CollectionPending {
                            self.collect_from_alternative(sequence, i)?;
                            self.collect_from_alternative(sequence, i + 1)?;
                            return Ok(sequence.is_satisfied_after(i));
                        }
                        if !matched {
                            break;
                        }
                        if node.is_terminal() {
                            self.scanner.advance(true);
                            if self.caret_reached() {
                                self.tracer.trace_caret_reached(self.scanner.position());
                                self.collect_after_repeat(sequence, i)?;
                                return Ok(sequence.is_satisfied_after(i));
                            }
                        }
                        if self.scanner.position() == before {
                            break;
                        }
                    }
                }
            } else if !matched_loop {
                return Ok(false);
            }

            i += 1;
            if i == nodes.len() {
                return Ok(true);
            }
        }
    }

    /// Whether `node` matches at the current position. Rule nodes consume
    /// their input; terminal nodes leave advancing to the caller.
    fn match_node(&mut self, node: &GrammarNode) -> Result<bool, RuntimeError> {
        match node.symbol() {
            GrammarSymbol::Token(_) if node.is_any() => Ok(!self.scanner.is_end_of_input()),
            GrammarSymbol::Token(id) => Ok(self.scanner.kind() == id),
            GrammarSymbol::Rule(rule) => self.match_rule(rule),
        }
    }
}
