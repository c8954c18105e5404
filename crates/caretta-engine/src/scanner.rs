//! Buffered token stream with random access.
//!
//! The whole tokenization is materialized up front: the matcher tries every
//! alternative from the same position and rolls back, so positions are plain
//! indices and checkpoints are O(1).

use std::collections::HashSet;

use caretta_core::TokenId;

/// Channel of tokens the grammar sees.
pub const DEFAULT_CHANNEL: u32 = 0;
/// Conventional channel for whitespace and comments.
pub const HIDDEN_CHANNEL: u32 = 1;

/// One lexed token. Lines are 1-based, columns 0-based, `end` exclusive.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenId,
    pub text: String,
    pub line: usize,
    pub start: usize,
    pub end: usize,
    pub channel: u32,
}

impl Token {
    /// Token on the default channel; `end` is derived from the text length.
    pub fn new(kind: TokenId, text: impl Into<String>, line: usize, start: usize) -> Self {
        let text = text.into();
        let end = start + text.chars().count();
        Self {
            kind,
            text,
            line,
            start,
            end,
            channel: DEFAULT_CHANNEL,
        }
    }

    pub fn on_channel(mut self, channel: u32) -> Self {
        self.channel = channel;
        self
    }

    /// Zero-width end-of-input marker.
    pub fn eof(line: usize, column: usize) -> Self {
        Self::new(TokenId::EOF, "", line, column)
    }

    pub fn is_hidden(&self) -> bool {
        self.channel != DEFAULT_CHANNEL
    }
}

/// Position completion is requested for. Line 1-based, column 0-based.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub struct Caret {
    pub line: usize,
    pub column: usize,
}

impl Caret {
    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }

    /// Caret before the `offset`-th character of `text`. Offsets past the end
    /// land after the last character.
    pub fn from_offset(text: &str, offset: usize) -> Self {
        let mut caret = Self::new(1, 0);
        for ch in text.chars().take(offset) {
            if ch == '\n' {
                caret.line += 1;
                caret.column = 0;
            } else {
                caret.column += 1;
            }
        }
        caret
    }
}

type SeparatorPredicate = Box<dyn Fn(TokenId) -> bool + Send + Sync>;

/// Seekable cursor over a token buffer that always ends with `EOF`.
pub struct Scanner {
    tokens: Vec<Token>,
    index: usize,
    is_separator: SeparatorPredicate,
}

/// Builder for `Scanner`.
pub struct ScannerBuilder {
    tokens: Vec<Token>,
    is_separator: SeparatorPredicate,
}

impl ScannerBuilder {
    pub fn new(tokens: impl IntoIterator<Item = Token>) -> Self {
        Self {
            tokens: tokens.into_iter().collect(),
            is_separator: Box::new(|_| false),
        }
    }

    /// Token kinds that separate other tokens without whitespace (commas,
    /// dots, parentheses). A caret right after one is outside it.
    pub fn separators(self, kinds: impl IntoIterator<Item = TokenId>) -> Self {
        let kinds: HashSet<TokenId> = kinds.into_iter().collect();
        self.separator_predicate(move |kind| kinds.contains(&kind))
    }

    pub fn separator_predicate(
        mut self,
        predicate: impl Fn(TokenId) -> bool + Send + Sync + 'static,
    ) -> Self {
        self.is_separator = Box::new(predicate);
        self
    }

    /// Appends an `EOF` token after the last one when the lexer did not.
    pub fn build(mut self) -> Scanner {
        if self.tokens.last().is_none_or(|t| t.kind != TokenId::EOF) {
            let eof = match self.tokens.last() {
                Some(last) => Token::eof(last.line, last.end),
                None => Token::eof(1, 0),
            };
            self.tokens.push(eof);
        }
        Scanner {
            tokens: self.tokens,
            index: 0,
            is_separator: self.is_separator,
        }
    }
}

impl Scanner {
    pub fn builder(tokens: impl IntoIterator<Item = Token>) -> ScannerBuilder {
        ScannerBuilder::new(tokens)
    }

    /// Moves to the next token, optionally skipping hidden-channel tokens.
    /// Stays on `EOF`.
    pub fn advance(&mut self, skip_hidden: bool) {
        if self.is_end_of_input() {
            return;
        }
        self.index += 1;
        if skip_hidden {
            self.skip_hidden();
        }
    }

    /// Moves forward while the current token is hidden.
    pub fn skip_hidden(&mut self) {
        while !self.is_end_of_input() && self.current().is_hidden() {
            self.index += 1;
        }
    }

    #[inline]
    pub fn position(&self) -> usize {
        self.index
    }

    /// Restores a position from [`position`](Self::position). Clamps to `EOF`.
    #[inline]
    pub fn seek(&mut self, index: usize) {
        self.index = index.min(self.tokens.len() - 1);
    }

    pub fn reset(&mut self) {
        self.index = 0;
    }

    #[inline]
    pub fn current(&self) -> &Token {
        &self.tokens[self.index]
    }

    #[inline]
    pub fn kind(&self) -> TokenId {
        self.current().kind
    }

    #[inline]
    pub fn is_end_of_input(&self) -> bool {
        self.index + 1 >= self.tokens.len()
    }

    pub fn is_separator_type(&self, kind: TokenId) -> bool {
        (self.is_separator)(kind)
    }

    /// Whether the caret sits at or before the end of the current token, i.e.
    /// input from here on must not be consumed.
    ///
    /// On the caret's line a separator only counts when the caret is strictly
    /// inside it; any other token also counts when the caret touches its end,
    /// since typing there extends the token.
    pub fn is_cursor_at_or_after_current_token(&self, caret: Caret) -> bool {
        if self.is_end_of_input() {
            return true;
        }
        let token = self.current();
        match token.line.cmp(&caret.line) {
            std::cmp::Ordering::Greater => true,
            std::cmp::Ordering::Less => false,
            std::cmp::Ordering::Equal if self.is_separator_type(token.kind) => {
                token.end > caret.column
            }
            std::cmp::Ordering::Equal => token.end >= caret.column,
        }
    }

    /// Visible, non-separator token the caret is inside of or touching the end of.
    pub fn token_at_caret(&self, caret: Caret) -> Option<&Token> {
        self.tokens[..self.tokens.len() - 1].iter().find(|t| {
            !t.is_hidden()
                && !self.is_separator_type(t.kind)
                && t.line == caret.line
                && t.start < caret.column
                && caret.column <= t.end
        })
    }

    /// The part of the token under the caret that is already typed.
    pub fn typed_part(&self, caret: Caret) -> Option<&str> {
        let token = self.token_at_caret(caret)?;
        let typed = caret.column - token.start;
        Some(match token.text.char_indices().nth(typed) {
            Some((byte, _)) => &token.text[..byte],
            None => &token.text,
        })
    }

    /// All tokens, including hidden ones and the trailing `EOF`.
    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }
}

impl std::fmt::Debug for Scanner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Scanner")
            .field("index", &self.index)
            .field("tokens", &self.tokens)
            .finish_non_exhaustive()
    }
}
