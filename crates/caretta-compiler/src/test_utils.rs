//! Test utilities and snapshot macros.

use caretta_core::TokenVocabulary;

/// Token listing shared by the compiler tests.
pub const TOKENS: &str = "\
NUMBER=1
PLUS=2
MINUS=3
SELECT=4
DISTINCT=5
FROM=6
ID=7
COMMA=8
DOT=9
'+'=2
'-'=3
'select'=4
','=8
'.'=9
";

pub fn vocabulary() -> TokenVocabulary {
    TokenVocabulary::parse(TOKENS).expect("test vocabulary should parse")
}

/// Inline snapshot of a compiled grammar's dump.
#[macro_export]
macro_rules! shot_model {
    ($grammar:expr, @$snapshot:literal) => {{
        let model = $crate::compile(&$crate::test_utils::vocabulary(), &$grammar)
            .expect("grammar should compile");
        insta::assert_snapshot!(model.dump(), @$snapshot);
    }};
}

/// Inline snapshot of a compile error message.
#[macro_export]
macro_rules! shot_compile_error {
    ($grammar:expr, @$snapshot:literal) => {{
        let err = $crate::compile(&$crate::test_utils::vocabulary(), &$grammar)
            .expect_err("grammar should be rejected");
        insta::assert_snapshot!(err.to_string(), @$snapshot);
    }};
}
