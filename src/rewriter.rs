//! The signature rewriter.
//!
//! A single-pass state machine over the token stream.  Outside function
//! signatures it is a pure identity transform; inside a parameter list it
//! buffers each parameter's tokens and, when the parameter closes, injects
//! the docblock-declared type in front of the variable (unless the
//! signature already carries a hint).  After the closing `)` it appends the
//! docblock's declared return type, if any.
//!
//! Correlation between docblock and parameters is positional and unchecked:
//! the `i`-th `@param` tag is assumed to describe the `i`-th declared
//! parameter.  Reordering either side silently misattributes types.

use std::mem;

use tracing::trace;

use crate::docblock::{self, DocblockTypes};
use crate::policy;
use crate::reporter::Reporter;
use crate::token::{Token, TokenKind};
use crate::tokenizer::tokenize;

/// Convenience entry point: tokenize `source` and rewrite it in one pass.
pub fn rewrite(source: &str, reporter: &mut Reporter) -> String {
    let mut rewriter = Rewriter::new(reporter);
    for token in tokenize(source) {
        rewriter.push(token);
    }
    rewriter.finish()
}

/// Where the pass currently is in the token stream.
///
/// `InParameterList` is only reachable from `AfterFunctionKeyword` via a
/// literal `(`, and always returns to `Outside` via the literal `)` that
/// flushes the final parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    /// Ordinary code; everything passes through.
    Outside,
    /// Between the `function` keyword and the opening `(` of its
    /// parameter list (function name, `&`, whitespace).
    AfterFunctionKeyword,
    /// Buffering parameter tokens until a `,` or `)` closes the group.
    InParameterList,
}

/// The token-stream state machine.  Consumes tokens one at a time via
/// [`Rewriter::push`] and accumulates the rewritten source in an owned,
/// append-only buffer.
pub struct Rewriter<'a> {
    state: State,
    /// Types extracted from the most recent docblock.  Overwritten on every
    /// doc comment seen outside a signature; cleared when a parameter list
    /// closes, so an annotation never leaks into the next function.
    pending: DocblockTypes,
    /// Tokens of the parameter currently being buffered, not yet emitted.
    param_buffer: Vec<Token>,
    /// Parameter groups flushed so far in the current list; doubles as the
    /// index into `pending.param_types`.
    param_index: usize,
    output: String,
    reporter: &'a mut Reporter,
}

impl<'a> Rewriter<'a> {
    pub fn new(reporter: &'a mut Reporter) -> Self {
        Self {
            state: State::Outside,
            pending: DocblockTypes::default(),
            param_buffer: Vec::new(),
            param_index: 0,
            output: String::new(),
            reporter,
        }
    }

    /// Consume one token.  Most tokens are appended to the output verbatim;
    /// parameter-list tokens are buffered until their group closes.
    pub fn push(&mut self, token: Token) {
        match self.state {
            State::Outside => self.push_outside(token),
            State::AfterFunctionKeyword => self.push_after_keyword(token),
            State::InParameterList => self.push_in_parameter_list(token),
        }
    }

    /// Finish the pass and hand back the accumulated output.
    pub fn finish(self) -> String {
        self.output
    }

    // ─── State handlers ─────────────────────────────────────────────────

    fn push_outside(&mut self, token: Token) {
        match token.kind() {
            Some(TokenKind::DocComment) => {
                self.pending = docblock::extract_types(token.text());
                trace!(
                    line = token.line(),
                    params = self.pending.param_types.len(),
                    has_return = self.pending.return_type.is_some(),
                    "docblock annotations extracted"
                );
                self.emit(token.text());
            }
            Some(TokenKind::FunctionKeyword) => {
                trace!(line = token.line(), "function declaration");
                self.emit(token.text());
                self.state = State::AfterFunctionKeyword;
            }
            _ => self.emit(token.text()),
        }
    }

    fn push_after_keyword(&mut self, token: Token) {
        if token.is_text("(") {
            self.emit("(");
            self.param_buffer.clear();
            self.param_index = 0;
            self.state = State::InParameterList;
        } else {
            // Function name, `&`, whitespace, or a stray doc comment: all
            // pass through without touching the pending annotations.
            self.emit(token.text());
        }
    }

    fn push_in_parameter_list(&mut self, token: Token) {
        if token.is_text(",") {
            self.flush_parameter();
            self.emit(",");
        } else if token.is_text(")") {
            self.flush_parameter();
            self.emit(")");
            self.inject_return_hint();
            // Function-scope reset: annotations never span two functions.
            self.pending = DocblockTypes::default();
            self.state = State::Outside;
        } else {
            self.param_buffer.push(token);
        }
    }

    // ─── Parameter injection ────────────────────────────────────────────

    /// Flush the buffered tokens as one parameter group, injecting the
    /// docblock type ahead of the variable when the group has no hint of
    /// its own.
    fn flush_parameter(&mut self) {
        let group = mem::take(&mut self.param_buffer);
        let index = self.param_index;
        self.param_index += 1;

        let Some(doc_type) = self.pending.param_types.get(index).cloned() else {
            self.reporter.warn("No typehint in annotation".to_string());
            for token in &group {
                self.emit(token.text());
            }
            return;
        };

        let mut has_existing_hint = false;
        let mut seen_variable = false;
        for token in &group {
            if seen_variable {
                // Default values and anything else after the variable.
                self.emit(token.text());
                continue;
            }
            match token.kind() {
                Some(TokenKind::Variable) => {
                    if !has_existing_hint {
                        self.inject_param_hint(&doc_type);
                    }
                    self.emit(token.text());
                    seen_variable = true;
                }
                Some(TokenKind::Whitespace) => self.emit(token.text()),
                _ => {
                    // The author already wrote something ahead of the
                    // variable — treat it as the existing type hint.  The
                    // comparison uses the raw docblock name, not the
                    // canonicalized one.
                    self.emit(token.text());
                    if !has_existing_hint {
                        if token.text() != doc_type {
                            self.reporter.warn(format!(
                                "Docblock type '{}' does not match function signature type '{}'",
                                doc_type,
                                token.text()
                            ));
                        }
                        has_existing_hint = true;
                    }
                }
            }
        }
    }

    /// Emit `canonicalize(T)` plus one space, unless `T` is blacklisted.
    fn inject_param_hint(&mut self, doc_type: &str) {
        if policy::is_blacklisted(doc_type) {
            self.reporter
                .warn(format!("Skipping blacklisted annotation '{doc_type}'"));
            return;
        }
        self.output.push_str(policy::canonicalize(doc_type));
        self.output.push(' ');
    }

    /// Append `: T` after the closing parenthesis.  Unlike parameter
    /// injection this applies neither the blacklist nor canonicalization.
    fn inject_return_hint(&mut self) {
        if let Some(return_type) = self.pending.return_type.take() {
            self.output.push_str(": ");
            self.output.push_str(&return_type);
        }
    }

    fn emit(&mut self, text: &str) {
        self.output.push_str(text);
    }
}

// ─── Tests ──────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn run(source: &str) -> (String, Vec<String>) {
        let mut reporter = Reporter::capturing();
        let output = rewrite(source, &mut reporter);
        (output, reporter.captured().to_vec())
    }

    #[test]
    fn injects_before_variable() {
        let source = "<?php\n/** @param int $x */\nfunction f($x) {}\n";
        let (output, warnings) = run(source);
        assert!(output.contains("function f(int $x)"), "output: {output}");
        assert!(warnings.is_empty());
    }

    #[test]
    fn keeps_default_value_expressions() {
        let source = "<?php\n/** @param int $x */\nfunction f($x = 10) {}\n";
        let (output, _) = run(source);
        assert!(output.contains("(int $x = 10)"), "output: {output}");
    }

    #[test]
    fn annotations_do_not_leak_into_next_function() {
        let source = "<?php\n/** @param int $a */\nfunction f($a) {}\nfunction g($b) {}\n";
        let (output, warnings) = run(source);
        assert!(output.contains("f(int $a)"));
        assert!(output.contains("g($b)"), "output: {output}");
        assert_eq!(warnings, ["No typehint in annotation"]);
    }

    #[test]
    fn docblock_is_overwritten_by_the_next_one() {
        let source = "<?php\n/** @param int $a */\n/** @param string $a */\nfunction f($a) {}\n";
        let (output, _) = run(source);
        assert!(output.contains("f(string $a)"), "output: {output}");
    }

    #[test]
    fn empty_parameter_list_flushes_one_empty_group() {
        let (output, warnings) = run("<?php\nfunction f() {}\n");
        assert!(output.contains("function f()"));
        assert_eq!(warnings, ["No typehint in annotation"]);
    }

    #[test]
    fn reference_parameter_counts_as_existing_hint() {
        // The `&` ahead of the variable is a bare text token, so it takes
        // the existing-hint path: mismatch warning, no injection.
        let source = "<?php\n/** @param int $x */\nfunction f(&$x) {}\n";
        let (output, warnings) = run(source);
        assert!(output.contains("f(&$x)"), "output: {output}");
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].contains("does not match"));
    }

    #[test]
    fn return_hint_is_injected_verbatim() {
        // No blacklist and no coercion on the return side: `boolean` stays.
        let source = "<?php\n/** @return boolean */\nfunction f() {}\n";
        let (output, _) = run(source);
        assert!(output.contains("f(): boolean"), "output: {output}");
    }

    #[test]
    fn function_keyword_inside_strings_is_inert() {
        let source = "<?php $s = 'function f($x)'; $t = \"function g($y)\";";
        let (output, warnings) = run(source);
        assert_eq!(output, source);
        assert!(warnings.is_empty());
    }
}
