//! Test utilities: a small SQL-ish lexer, fixture grammars and snapshot macros.

use caretta_compiler::Compiler;
use caretta_core::grammar::{Alternative, Block, Element, Grammar};
use caretta_core::{CompletionConfig, GrammarModel, TokenId, TokenVocabulary};
use logos::Logos;

use crate::{Caret, Completion, HIDDEN_CHANNEL, Matcher, Scanner, Token};

/// `.tokens` listing matching [`SqlToken::id`].
pub const TOKENS: &str = "\
SELECT=1
DISTINCT=2
FROM=3
CREATE=4
TABLE=5
VIEW=6
NUMBER=7
ID=8
PLUS=9
MINUS=10
STAR=11
COMMA=12
DOT=13
OPEN_PAR=14
CLOSE_PAR=15
SEMI=16
WS=17
'+'=9
'-'=10
'*'=11
','=12
'.'=13
'('=14
')'=15
';'=16
";

#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SqlToken {
    #[token("select", ignore(case))]
    Select,

    #[token("distinct", ignore(case))]
    Distinct,

    #[token("from", ignore(case))]
    From,

    #[token("create", ignore(case))]
    Create,

    #[token("table", ignore(case))]
    Table,

    #[token("view", ignore(case))]
    View,

    #[regex("[0-9]+")]
    Number,

    #[regex("[A-Za-z_][A-Za-z0-9_]*")]
    Id,

    #[token("+")]
    Plus,

    #[token("-")]
    Minus,

    #[token("*")]
    Star,

    #[token(",")]
    Comma,

    #[token(".")]
    Dot,

    #[token("(")]
    OpenPar,

    #[token(")")]
    ClosePar,

    #[token(";")]
    Semi,

    #[regex(r"[ \t\r\n]+")]
    Whitespace,
}

impl SqlToken {
    pub fn id(self) -> TokenId {
        TokenId(match self {
            Self::Select => 1,
            Self::Distinct => 2,
            Self::From => 3,
            Self::Create => 4,
            Self::Table => 5,
            Self::View => 6,
            Self::Number => 7,
            Self::Id => 8,
            Self::Plus => 9,
            Self::Minus => 10,
            Self::Star => 11,
            Self::Comma => 12,
            Self::Dot => 13,
            Self::OpenPar => 14,
            Self::ClosePar => 15,
            Self::Semi => 16,
            Self::Whitespace => 17,
        })
    }
}

/// Operators and punctuation: `+ - * , . ( ) ;`.
pub fn separators() -> impl Iterator<Item = TokenId> {
    (9..=16).map(TokenId)
}

pub fn vocabulary() -> TokenVocabulary {
    TokenVocabulary::parse(TOKENS).expect("test vocabulary should parse")
}

/// Lexes `source`, tracking lines and columns. Whitespace goes to the hidden
/// channel, unknown characters are dropped, and a trailing `EOF` sits at the
/// very end of the text.
pub fn lex(source: &str) -> Vec<Token> {
    let mut tokens = Vec::new();
    let mut lexer = SqlToken::lexer(source);
    let (mut line, mut column, mut offset) = (1, 0, 0);

    while let Some(result) = lexer.next() {
        let span = lexer.span();
        advance_position(&source[offset..span.start], &mut line, &mut column);
        let text = lexer.slice();
        if let Ok(kind) = result {
            let token = Token::new(kind.id(), text, line, column);
            tokens.push(match kind {
                SqlToken::Whitespace => token.on_channel(HIDDEN_CHANNEL),
                _ => token,
            });
        }
        advance_position(text, &mut line, &mut column);
        offset = span.end;
    }
    advance_position(&source[offset..], &mut line, &mut column);
    tokens.push(Token::eof(line, column));
    tokens
}

fn advance_position(text: &str, line: &mut usize, column: &mut usize) {
    for ch in text.chars() {
        if ch == '\n' {
            *line += 1;
            *column = 0;
        } else {
            *column += 1;
        }
    }
}

/// Splits `marked` at its `|` into the text and the caret position.
pub fn split_caret(marked: &str) -> (String, Caret) {
    let byte = marked.find('|').expect("input should contain a `|` caret marker");
    let offset = marked[..byte].chars().count();
    let text = marked.replacen('|', "", 1);
    let caret = Caret::from_offset(&text, offset);
    (text, caret)
}

pub fn scanner(source: &str) -> Scanner {
    Scanner::builder(lex(source)).separators(separators()).build()
}

/// Runs a completion for `marked` (text with a `|` caret) from rule `root`.
pub fn complete(model: &GrammarModel, root: &str, marked: &str) -> Completion {
    let (text, caret) = split_caret(marked);
    Matcher::builder(model, scanner(&text), caret)
        .build()
        .complete(root)
        .expect("completion should succeed")
}

/// Candidate strings in sorted order.
pub fn candidates(model: &GrammarModel, root: &str, marked: &str) -> Vec<String> {
    complete(model, root, marked).candidates.into_iter().collect()
}

pub fn model(grammar: &Grammar) -> GrammarModel {
    model_with(grammar, CompletionConfig::default())
}

pub fn model_with(grammar: &Grammar, config: CompletionConfig) -> GrammarModel {
    Compiler::builder(&vocabulary())
        .config(config)
        .build()
        .compile(grammar)
        .expect("grammar should compile")
}

/// `equation: NUMBER (PLUS | MINUS) NUMBER;`
pub fn equation() -> Grammar {
    Grammar::new("calc").with_rule(
        "equation",
        [Alternative::new([
            Element::token("NUMBER"),
            Element::Block(Block::choice([Element::token("PLUS"), Element::token("MINUS")])),
            Element::token("NUMBER"),
        ])],
    )
}

/// Left-recursive arithmetic:
///
/// ```text
/// expr: expr '+' term | expr '-' term | term;
/// term: NUMBER | '(' expr ')';
/// ```
pub fn expr() -> Grammar {
    Grammar::new("expr")
        .with_rule(
            "expr",
            [
                Alternative::new([Element::rule("expr"), Element::literal("+"), Element::rule("term")]),
                Alternative::new([Element::rule("expr"), Element::literal("-"), Element::rule("term")]),
                Alternative::new([Element::rule("term")]),
            ],
        )
        .with_rule(
            "term",
            [
                Alternative::new([Element::token("NUMBER")]),
                Alternative::new([
                    Element::literal("("),
                    Element::rule("expr"),
                    Element::literal(")"),
                ]),
            ],
        )
}

/// ```text
/// stmt: select_stmt | create_stmt;
/// select_stmt: SELECT DISTINCT? column (COMMA column)* (FROM table_ref)?;
/// column: ID (DOT ID)? | STAR;
/// table_ref: ID (DOT ID)?;
/// create_stmt: CREATE TABLE table_ref OPEN_PAR ID (COMMA ID)* CLOSE_PAR;
/// ```
pub fn sql() -> Grammar {
    let qualified = || {
        Alternative::new([
            Element::token("ID"),
            Element::Optional(Block::sequence([Element::token("DOT"), Element::token("ID")])),
        ])
    };
    Grammar::new("sql")
        .with_rule(
            "stmt",
            [
                Alternative::new([Element::rule("select_stmt")]),
                Alternative::new([Element::rule("create_stmt")]),
            ],
        )
        .with_rule(
            "select_stmt",
            [Alternative::new([
                Element::token("SELECT"),
                Element::token("DISTINCT").optional(),
                Element::rule("column"),
                Element::Closure(Block::sequence([Element::token("COMMA"), Element::rule("column")])),
                Element::Optional(Block::sequence([
                    Element::token("FROM"),
                    Element::rule("table_ref"),
                ])),
            ])],
        )
        .with_rule(
            "column",
            [qualified(), Alternative::new([Element::token("STAR")])],
        )
        .with_rule("table_ref", [qualified()])
        .with_rule(
            "create_stmt",
            [Alternative::new([
                Element::token("CREATE"),
                Element::token("TABLE"),
                Element::rule("table_ref"),
                Element::token("OPEN_PAR"),
                Element::token("ID"),
                Element::Closure(Block::sequence([Element::token("COMMA"), Element::token("ID")])),
                Element::token("CLOSE_PAR"),
            ])],
        )
}

/// Inline snapshot of the default-verbosity trace of a completion.
#[macro_export]
macro_rules! shot_trace {
    ($model:expr, $root:expr, $marked:expr, @$snapshot:literal) => {{
        $crate::shot_trace!($model, $root, $marked, $crate::Verbosity::Default, @$snapshot)
    }};
    ($model:expr, $root:expr, $marked:expr, $verbosity:expr, @$snapshot:literal) => {{
        let model = &$model;
        let (text, caret) = $crate::test_utils::split_caret($marked);
        let mut tracer = $crate::PrintTracer::new(model, $verbosity);
        $crate::Matcher::builder(model, $crate::test_utils::scanner(&text), caret)
            .build()
            .complete_with($root, &mut tracer)
            .expect("completion should succeed");
        insta::assert_snapshot!(tracer.output(), @$snapshot);
    }};
}
