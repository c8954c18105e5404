use caretta_core::GrammarModel;
use caretta_core::grammar::{Alternative, Element, Grammar};

use crate::test_utils::{candidates, complete, equation, expr, model, scanner, split_caret, sql};
use crate::{Completion, FuelLimits, Matcher, RuntimeError};

fn run(
    model: &GrammarModel,
    root: &str,
    marked: &str,
    limits: FuelLimits,
) -> Result<Completion, RuntimeError> {
    let (text, caret) = split_caret(marked);
    Matcher::builder(model, scanner(&text), caret)
        .limits(limits)
        .build()
        .complete(root)
}

#[test]
fn equation_after_first_number_offers_operators() {
    let model = model(&equation());

    let completion = complete(&model, "equation", "3 |");

    assert_eq!(Vec::from_iter(completion.candidates), ["MINUS", "PLUS"]);
    assert!(!completion.fully_parsed);
    assert_eq!(completion.typed_part, None);
}

#[test]
fn equation_at_start_offers_number() {
    let model = model(&equation());

    assert_eq!(candidates(&model, "equation", "|3"), ["NUMBER"]);
    assert_eq!(candidates(&model, "equation", "|"), ["NUMBER"]);
}

#[test]
fn equation_after_operator_offers_number() {
    let model = model(&equation());

    assert_eq!(candidates(&model, "equation", "3 + |"), ["NUMBER"]);
    assert_eq!(candidates(&model, "equation", "3-|"), ["NUMBER"]);
}

#[test]
fn complete_equation_is_fully_parsed() {
    let model = model(&equation());

    for marked in ["3+4 |", "3+4\n|", "3 - 4   |"] {
        let completion = complete(&model, "equation", marked);
        assert!(completion.candidates.is_empty(), "{marked}");
        assert!(completion.fully_parsed, "{marked}");
    }
}

#[test]
fn caret_touching_last_word_completes_that_word() {
    let model = model(&equation());

    let completion = complete(&model, "equation", "3+4|");

    assert_eq!(Vec::from_iter(completion.candidates), ["NUMBER"]);
    assert!(!completion.fully_parsed);
    assert_eq!(completion.typed_part.as_deref(), Some("4"));
}

#[test]
fn optional_token_falls_through_to_what_follows() {
    let model = model(&sql());

    assert_eq!(
        candidates(&model, "stmt", "SELECT |"),
        ["DISTINCT", "ID", "STAR"]
    );
    assert_eq!(candidates(&model, "stmt", "SELECT\n  |"), ["DISTINCT", "ID", "STAR"]);
    assert_eq!(candidates(&model, "stmt", "select distinct |"), ["ID", "STAR"]);
}

#[test]
fn repetition_consumes_every_occurrence() {
    let model = model(&sql());

    assert_eq!(candidates(&model, "stmt", "SELECT a, b, c FROM |"), ["ID"]);
    assert_eq!(candidates(&model, "stmt", "SELECT a, b, |"), ["ID", "STAR"]);
}

#[test]
fn repeated_rule_reaching_caret_keeps_collecting() {
    let model = model(&sql());

    let completion = complete(&model, "stmt", "SELECT a, b, c |");

    assert_eq!(
        Vec::from_iter(completion.candidates),
        ["COMMA", "DOT ID", "FROM"]
    );
    assert!(completion.fully_parsed);
}

#[test]
fn repeated_token_reaching_caret_offers_itself_and_what_follows() {
    let grammar = Grammar::new("ids").with_rule(
        "stmt",
        [Alternative::new([
            Element::token("SELECT"),
            Element::token("ID").positive_closure(),
            Element::token("SEMI"),
        ])],
    );
    let model = model(&grammar);

    assert_eq!(candidates(&model, "stmt", "SELECT a |"), ["ID", "SEMI"]);

    let completion = complete(&model, "stmt", "SELECT a b |");
    assert_eq!(Vec::from_iter(completion.candidates), ["ID", "SEMI"]);
    assert!(!completion.fully_parsed);
}

#[test]
fn optional_suffix_offers_its_continuation() {
    let model = model(&sql());

    assert_eq!(candidates(&model, "stmt", "SELECT a.|"), ["ID"]);
}

#[test]
fn input_past_the_grammar_is_not_fully_parsed() {
    let model = model(&sql());

    let completion = complete(&model, "stmt", "SELECT a b |");

    assert!(completion.candidates.is_empty());
    assert!(!completion.fully_parsed);
}

#[test]
fn text_after_the_caret_is_ignored() {
    let model = model(&sql());

    assert_eq!(
        candidates(&model, "stmt", "SELECT | FROM t"),
        ["DISTINCT", "ID", "STAR"]
    );
}

#[test]
fn left_recursive_rule_grows_to_longest_match() {
    let model = model(&expr());

    assert_eq!(candidates(&model, "expr", "1 + 2 - |"), ["NUMBER", "OPEN_PAR"]);
    assert_eq!(candidates(&model, "expr", "(1 + |"), ["NUMBER", "OPEN_PAR"]);
}

#[test]
fn left_recursive_rule_offers_continuations_when_complete() {
    let model = model(&expr());

    let completion = complete(&model, "expr", "1 + 2 |");

    assert_eq!(Vec::from_iter(completion.candidates), ["MINUS", "PLUS"]);
    assert!(completion.fully_parsed);
}

#[test]
fn wildcard_is_matched_but_never_offered() {
    let grammar = Grammar::new("any").with_rule(
        "stmt",
        [Alternative::new([
            Element::token("SELECT"),
            Element::Wildcard.positive_closure(),
            Element::token("SEMI"),
        ])],
    );
    let model = model(&grammar);

    assert_eq!(candidates(&model, "stmt", "SELECT a 1 + |"), ["SEMI"]);
    assert!(candidates(&model, "stmt", "SELECT |").is_empty());
}

#[test]
fn end_of_input_is_never_offered() {
    let grammar = Grammar::new("eof").with_rule(
        "stmt",
        [Alternative::new([
            Element::token("SELECT"),
            Element::token("ID"),
            Element::token("EOF"),
        ])],
    );
    let model = model(&grammar);

    assert!(candidates(&model, "stmt", "SELECT a |").is_empty());
    assert_eq!(candidates(&model, "stmt", "SELECT |"), ["ID"]);
}

#[test]
fn longest_alternative_wins() {
    let grammar = Grammar::new("alts").with_rule(
        "stmt",
        [
            Alternative::new([Element::token("ID")]),
            Alternative::new([Element::token("ID"), Element::token("DOT"), Element::token("ID")]),
            Alternative::new([Element::token("ID"), Element::token("DOT"), Element::token("STAR")]),
        ],
    );
    let model = model(&grammar);

    let completion = complete(&model, "stmt", "a.b |");
    assert!(completion.fully_parsed);

    assert_eq!(candidates(&model, "stmt", "a.|"), ["ID", "STAR"]);
}

#[test]
fn completion_is_deterministic() {
    let model = model(&sql());

    let first = complete(&model, "stmt", "SELECT a, |");
    for _ in 0..5 {
        assert_eq!(complete(&model, "stmt", "SELECT a, |"), first);
    }
}

#[test]
fn unknown_root_rule_is_an_error() {
    let model = model(&sql());

    let err = run(&model, "query", "|", FuelLimits::default()).unwrap_err();

    assert_eq!(err, RuntimeError::UnknownRule("query".into()));
    insta::assert_snapshot!(err.to_string(), @"unknown rule `query`");
}

#[test]
fn exhausted_fuel_is_an_error() {
    let model = model(&equation());

    let err = run(&model, "equation", "3 |", FuelLimits::new().exec_fuel(1)).unwrap_err();

    assert_eq!(err, RuntimeError::ExecFuelExhausted(1));
    insta::assert_snapshot!(err.to_string(), @"completion step limit of 1 exceeded");
}

#[test]
fn deep_nesting_is_an_error() {
    let model = model(&sql());

    let err = run(&model, "stmt", "SELECT |", FuelLimits::new().recursion_limit(2)).unwrap_err();

    assert_eq!(err, RuntimeError::RecursionLimitExceeded(2));
    insta::assert_snapshot!(err.to_string(), @"completion recursion limit of 2 exceeded");
}

#[test]
fn default_limits_handle_deep_input() {
    let model = model(&expr());
    let marked = format!("{}1{} + |", "(".repeat(50), ")".repeat(50));

    assert_eq!(candidates(&model, "expr", &marked), ["NUMBER", "OPEN_PAR"]);
}

#[test]
fn fuel_limits_accessors() {
    let limits = FuelLimits::default();
    assert_eq!(limits.get_exec_fuel(), 1_000_000);
    assert_eq!(limits.get_recursion_limit(), 1024);

    let limits = FuelLimits::new().exec_fuel(10).recursion_limit(3);
    assert_eq!((limits.get_exec_fuel(), limits.get_recursion_limit()), (10, 3));
}

#[test]
fn crate_level_complete_uses_default_limits() {
    let model = model(&equation());
    let (text, caret) = split_caret("3 |");

    let completion = crate::complete(&model, scanner(&text), caret, "equation").unwrap();

    assert_eq!(Vec::from_iter(completion.candidates), ["MINUS", "PLUS"]);
}
