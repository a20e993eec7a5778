//! Lexical token model.
//!
//! Tokens come in two shapes, mirroring PHP's `token_get_all()` output:
//! bare punctuation is a plain [`Token::Text`] string, while everything the
//! lexer can classify carries a [`TokenKind`], its literal text, and the
//! source line it starts on.  Concatenating the text of every token in a
//! stream reproduces the source byte-for-byte.

/// Classification of a lexed token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    /// A `/** ... */` documentation comment.
    DocComment,
    /// The `function` keyword (matched case-insensitively).
    FunctionKeyword,
    /// A run of whitespace.
    Whitespace,
    /// A `$variable`, text includes the `$` prefix.
    Variable,
    /// Any other identifier-shaped token (names, keywords, type hints).
    Identifier,
    /// Everything else the lexer groups into one token: string literals,
    /// numbers, non-doc comments, open/close tags, inline HTML.
    Other,
}

/// A single lexical token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    /// A bare piece of punctuation with no semantic payload (`(`, `,`, `=`,
    /// `;`, ...).  Always a single character as produced by the lexer.
    Text(String),
    /// A classified token with its literal text and 1-based starting line.
    Classified {
        kind: TokenKind,
        text: String,
        line: u32,
    },
}

impl Token {
    /// The literal source text of this token.
    pub fn text(&self) -> &str {
        match self {
            Token::Text(text) => text,
            Token::Classified { text, .. } => text,
        }
    }

    /// The classification, or `None` for bare punctuation.
    pub fn kind(&self) -> Option<TokenKind> {
        match self {
            Token::Text(_) => None,
            Token::Classified { kind, .. } => Some(*kind),
        }
    }

    /// The 1-based source line for classified tokens.
    pub fn line(&self) -> Option<u32> {
        match self {
            Token::Text(_) => None,
            Token::Classified { line, .. } => Some(*line),
        }
    }

    /// True when this is a bare punctuation token with exactly this text.
    pub fn is_text(&self, expected: &str) -> bool {
        matches!(self, Token::Text(text) if text == expected)
    }
}
