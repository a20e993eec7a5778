//! php7ize — rewrites PHPDoc `@param` / `@return` annotations into native
//! PHP 7 type declarations.
//!
//! The pass reads a source file as a flat token stream, remembers the types
//! declared in the docblock preceding each function, and injects them into
//! the matching parameter positions and the return position.  Every token
//! it does not intentionally alter is reproduced byte-for-byte, so the
//! output differs from the input only at the injection points.
//!
//! ```no_run
//! use php7ize::Converter;
//!
//! let converted = Converter::new("legacy.php")
//!     .quiet(true)
//!     .echo(false)
//!     .convert()
//!     .unwrap();
//! assert!(converted.contains("function"));
//! ```
//!
//! The interesting pieces live in [`rewriter`] (the state machine),
//! [`docblock`] (annotation extraction), and [`policy`] (the blacklist and
//! coercion tables).  [`tokenizer`] is a best-effort PHP lexer whose only
//! real obligation is byte fidelity.

use std::fs;
use std::io;
use std::path::PathBuf;

use thiserror::Error;
use tracing::debug;

pub mod docblock;
pub mod policy;
pub mod reporter;
pub mod rewriter;
pub mod token;
pub mod tokenizer;

pub use docblock::DocblockTypes;
pub use reporter::Reporter;
pub use rewriter::{Rewriter, rewrite};
pub use token::{Token, TokenKind};
pub use tokenizer::tokenize;

/// Fatal conditions.  Everything the rewriting core itself notices is
/// non-fatal (warn and continue); only the file boundaries can fail.
#[derive(Error, Debug)]
pub enum ConvertError {
    #[error("failed to read {}: {source}", path.display())]
    ReadSource {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to write {}: {source}", path.display())]
    WriteOutput {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// One conversion run: a source file in, rewritten text out, with optional
/// file write and stdout echo.
///
/// Where the output goes is entirely the caller's choice — the rewriting
/// core only ever produces the text buffer.
pub struct Converter {
    source_file: PathBuf,
    output_file: Option<PathBuf>,
    should_echo: bool,
    is_quiet: bool,
}

impl Converter {
    /// A converter for the given source file.  Defaults: echo to stdout,
    /// no output file, warnings enabled.
    pub fn new(source_file: impl Into<PathBuf>) -> Self {
        Self {
            source_file: source_file.into(),
            output_file: None,
            should_echo: true,
            is_quiet: false,
        }
    }

    /// Also write the converted source to this file.
    pub fn output_file(mut self, path: Option<PathBuf>) -> Self {
        self.output_file = path;
        self
    }

    /// Whether to print the converted source to stdout.
    pub fn echo(mut self, should_echo: bool) -> Self {
        self.should_echo = should_echo;
        self
    }

    /// Suppress warnings.
    pub fn quiet(mut self, is_quiet: bool) -> Self {
        self.is_quiet = is_quiet;
        self
    }

    /// Run the conversion: read, rewrite, write/echo, and return the
    /// converted text.
    pub fn convert(&self) -> Result<String, ConvertError> {
        debug!(path = %self.source_file.display(), "reading source");
        let source = fs::read_to_string(&self.source_file).map_err(|e| {
            ConvertError::ReadSource {
                path: self.source_file.clone(),
                source: e,
            }
        })?;

        let mut reporter = Reporter::new(self.is_quiet);
        let output = rewrite(&source, &mut reporter);

        if let Some(path) = &self.output_file {
            debug!(path = %path.display(), "writing output");
            fs::write(path, &output).map_err(|e| ConvertError::WriteOutput {
                path: path.clone(),
                source: e,
            })?;
        }
        if self.should_echo {
            print!("{output}");
        }
        Ok(output)
    }
}
