#![allow(dead_code)]

use php7ize::{Reporter, rewrite};

/// Run the rewriter over `source` with a capturing reporter, returning the
/// converted text and the warnings it produced.
pub fn convert(source: &str) -> (String, Vec<String>) {
    let mut reporter = Reporter::capturing();
    let output = rewrite(source, &mut reporter);
    (output, reporter.captured().to_vec())
}
