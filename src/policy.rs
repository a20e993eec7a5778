//! Type-hint injection policy.
//!
//! Two static tables decide what may be written into a signature: a
//! blacklist of names that must never become native hints, and a coercion
//! table mapping verbose legacy spellings to their short form.  Both apply
//! only when *injecting* a new hint — an existing hint in the signature is
//! compared against the raw docblock name, untouched by either table.

/// Type names that must never be injected as native hints.  Mostly PHP 7
/// reserved words with no scalar-type-hint counterpart; `scalar` is
/// included pre-emptively since it may yet become reserved.
const BLACKLISTED_HINTS: &[&str] = &[
    "mixed", "resource", "numeric", "object", "scalar", "null", "false", "true",
];

/// True when `name` may never be injected.  Case-sensitive exact match.
pub fn is_blacklisted(name: &str) -> bool {
    BLACKLISTED_HINTS.contains(&name)
}

/// Normalize a verbose legacy spelling to its canonical short form.
/// Anything a class could legitimately be named passes through unchanged —
/// an uppercase `Integer` is assumed to mean a class of that name.
pub fn canonicalize(name: &str) -> &str {
    match name {
        "integer" => "int",
        "double" => "float",
        "boolean" => "bool",
        other => other,
    }
}
