//! Best-effort PHP lexer.
//!
//! This is the adapter that feeds the signature rewriter: it turns raw
//! source text into the flat [`Token`] stream described in [`crate::token`].
//! It is deliberately not a full PHP lexer — its only obligations are that
//! every byte of input lands in exactly one token (so concatenating the
//! stream reproduces the source), and that the handful of kinds the
//! rewriter cares about (doc comments, the `function` keyword, whitespace,
//! variables) are classified correctly.  String literals, heredocs, and
//! comments are lumped into single opaque tokens so that a `$var` or a
//! `function` inside them can never reach the rewriter as a real token.
//!
//! Malformed input never fails: unterminated literals and comments simply
//! run to end of input.

use memchr::memmem;

use crate::token::{Token, TokenKind};

/// Lex a full PHP source text into a token stream.
///
/// Text outside `<?php` / `<?=` open tags (and after a `?>` close tag) is
/// passed through as opaque inline-HTML tokens.
pub fn tokenize(source: &str) -> Vec<Token> {
    Lexer::new(source).run()
}

struct Lexer<'a> {
    source: &'a str,
    /// Byte offset of the next unconsumed character.
    pos: usize,
    /// 1-based line of the next unconsumed character.
    line: u32,
    in_php: bool,
    tokens: Vec<Token>,
}

impl<'a> Lexer<'a> {
    fn new(source: &'a str) -> Self {
        Self {
            source,
            pos: 0,
            line: 1,
            in_php: false,
            tokens: Vec::new(),
        }
    }

    fn run(mut self) -> Vec<Token> {
        while self.pos < self.source.len() {
            if self.in_php {
                self.lex_php_token();
            } else {
                self.lex_html();
            }
        }
        self.tokens
    }

    // ─── Emission ───────────────────────────────────────────────────────

    /// Emit everything from `start` to the current position as one token.
    /// `kind: None` produces a bare `Token::Text`.
    fn emit(&mut self, kind: Option<TokenKind>, start: usize) {
        let text = &self.source[start..self.pos];
        if text.is_empty() {
            return;
        }
        let line = self.line;
        self.line += text.bytes().filter(|&b| b == b'\n').count() as u32;
        let token = match kind {
            Some(kind) => Token::Classified {
                kind,
                text: text.to_string(),
                line,
            },
            None => Token::Text(text.to_string()),
        };
        self.tokens.push(token);
    }

    // ─── Cursor helpers ─────────────────────────────────────────────────

    fn rest(&self) -> &'a str {
        &self.source[self.pos..]
    }

    fn peek(&self) -> Option<char> {
        self.rest().chars().next()
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += c.len_utf8();
        Some(c)
    }

    // ─── HTML mode ──────────────────────────────────────────────────────

    /// Consume inline HTML up to the next open tag, or the open tag itself.
    fn lex_html(&mut self) {
        let start = self.pos;
        match memmem::find(self.rest().as_bytes(), b"<?") {
            Some(0) => {
                let after = &self.rest().as_bytes()[2..];
                let tag_len = if after.len() >= 3 && after[..3].eq_ignore_ascii_case(b"php") {
                    5
                } else if after.first() == Some(&b'=') {
                    3
                } else {
                    2
                };
                self.pos += tag_len;
                self.emit(Some(TokenKind::Other), start);
                self.in_php = true;
            }
            Some(offset) => {
                self.pos += offset;
                self.emit(Some(TokenKind::Other), start);
            }
            None => {
                self.pos = self.source.len();
                self.emit(Some(TokenKind::Other), start);
            }
        }
    }

    // ─── PHP mode ───────────────────────────────────────────────────────

    /// Consume exactly one PHP-mode token.
    fn lex_php_token(&mut self) {
        let start = self.pos;
        let rest = self.rest();
        let Some(c) = self.peek() else { return };

        // Whitespace run.
        if c.is_ascii_whitespace() {
            while self.peek().is_some_and(|ch| ch.is_ascii_whitespace()) {
                self.bump();
            }
            self.emit(Some(TokenKind::Whitespace), start);
            return;
        }

        // Doc comment: `/**` not immediately closed (`/**/` is an ordinary
        // empty block comment).
        if rest.starts_with("/**") && !rest.starts_with("/**/") {
            self.pos += 3;
            self.consume_until("*/");
            self.emit(Some(TokenKind::DocComment), start);
            return;
        }

        // Block comment.
        if rest.starts_with("/*") {
            self.pos += 2;
            self.consume_until("*/");
            self.emit(Some(TokenKind::Other), start);
            return;
        }

        // Line comment, `//` or `#`, up to (excluding) the newline.
        if rest.starts_with("//") || c == '#' {
            match rest.find('\n') {
                Some(nl) => self.pos += nl,
                None => self.pos = self.source.len(),
            }
            self.emit(Some(TokenKind::Other), start);
            return;
        }

        // Quoted literals: single, double, and backtick (shell-exec), with
        // backslash escapes.  Lumped whole so their contents stay inert.
        if c == '\'' || c == '"' || c == '`' {
            self.consume_quoted(c);
            self.emit(Some(TokenKind::Other), start);
            return;
        }

        // Heredoc / nowdoc.
        if rest.starts_with("<<<") {
            if let Some(len) = heredoc_len(rest) {
                self.pos += len;
                self.emit(Some(TokenKind::Other), start);
                return;
            }
            // Not actually a heredoc opener; fall through to punctuation.
        }

        // Close tag returns to HTML mode.
        if rest.starts_with("?>") {
            self.pos += 2;
            self.emit(Some(TokenKind::Other), start);
            self.in_php = false;
            return;
        }

        // Variable.
        if c == '$' {
            let after = &self.source[self.pos + 1..];
            if after.chars().next().is_some_and(is_ident_start) {
                self.bump();
                self.consume_ident_run();
                self.emit(Some(TokenKind::Variable), start);
                return;
            }
        }

        // Identifier or keyword.  PHP treats bytes >= 0x80 as name chars.
        if is_ident_start(c) {
            self.consume_ident_run();
            let kind = if self.source[start..self.pos].eq_ignore_ascii_case("function") {
                TokenKind::FunctionKeyword
            } else {
                TokenKind::Identifier
            };
            self.emit(Some(kind), start);
            return;
        }

        // Number run (decimal, hex, binary, simple floats).
        if c.is_ascii_digit() {
            self.bump();
            while let Some(ch) = self.peek() {
                if ch.is_ascii_alphanumeric() || ch == '_' {
                    self.bump();
                } else if ch == '.'
                    && self.source[self.pos + 1..].starts_with(|d: char| d.is_ascii_digit())
                {
                    self.bump();
                } else {
                    break;
                }
            }
            self.emit(Some(TokenKind::Other), start);
            return;
        }

        // Anything else: one bare punctuation character.  `(`, `,`, and `)`
        // must come out as standalone Text tokens for the rewriter.
        self.bump();
        self.emit(None, start);
    }

    /// Advance past the next occurrence of `terminator` (or to end of input
    /// when unterminated).
    fn consume_until(&mut self, terminator: &str) {
        match self.rest().find(terminator) {
            Some(idx) => self.pos += idx + terminator.len(),
            None => self.pos = self.source.len(),
        }
    }

    /// Consume a quoted literal starting at the current position.
    fn consume_quoted(&mut self, quote: char) {
        self.bump();
        while let Some(ch) = self.bump() {
            if ch == '\\' {
                self.bump();
            } else if ch == quote {
                break;
            }
        }
    }

    fn consume_ident_run(&mut self) {
        while self.peek().is_some_and(is_ident_continue) {
            self.bump();
        }
    }
}

fn is_ident_start(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '_' || !c.is_ascii()
}

fn is_ident_continue(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_' || !c.is_ascii()
}

/// Byte length of a heredoc/nowdoc token starting at `rest` (which begins
/// with `<<<`), or `None` when what follows is not a valid opener.
///
/// The returned span runs through the closing identifier, including any
/// indentation before it (as PHP's own T_END_HEREDOC does).  An
/// unterminated heredoc swallows the remaining input.
fn heredoc_len(rest: &str) -> Option<usize> {
    let bytes = rest.as_bytes();
    let mut i = 3;
    while i < bytes.len() && (bytes[i] == b' ' || bytes[i] == b'\t') {
        i += 1;
    }

    // Optional quote for nowdoc (`'ID'`) or quoted heredoc (`"ID"`).
    let quote = match bytes.get(i).copied() {
        Some(q @ (b'\'' | b'"')) => {
            i += 1;
            Some(q)
        }
        _ => None,
    };

    let ident_start = i;
    while i < bytes.len() && (bytes[i].is_ascii_alphanumeric() || bytes[i] == b'_') {
        i += 1;
    }
    if i == ident_start {
        return None;
    }
    let first = bytes[ident_start];
    if !(first.is_ascii_alphabetic() || first == b'_') {
        return None;
    }
    let ident = &rest[ident_start..i];

    if let Some(q) = quote {
        if bytes.get(i) != Some(&q) {
            return None;
        }
        i += 1;
    }
    if bytes.get(i) == Some(&b'\r') {
        i += 1;
    }
    if bytes.get(i) != Some(&b'\n') {
        return None;
    }
    i += 1;

    // Scan body lines for the closing identifier.
    loop {
        let line_start = i;
        let mut j = line_start;
        while j < bytes.len() && (bytes[j] == b' ' || bytes[j] == b'\t') {
            j += 1;
        }
        if rest[j..].starts_with(ident) {
            let after = j + ident.len();
            let closed = match bytes.get(after) {
                Some(&b) => !(b.is_ascii_alphanumeric() || b == b'_'),
                None => true,
            };
            if closed {
                return Some(after);
            }
        }
        match rest[line_start..].find('\n') {
            Some(nl) => i = line_start + nl + 1,
            None => return Some(rest.len()),
        }
    }
}

// ─── Tests ──────────────────────────────────────────────────────────────
