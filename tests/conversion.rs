//! End-to-end conversion tests over the public API.
//!
//! Each section exercises one guaranteed behavior of the pass: identity
//! outside signatures, injection, coercion, the blacklist, never
//! overwriting an existing hint, return injection, positional correlation,
//! and idempotence.

mod common;

use common::convert;

// ─── Identity outside signatures ────────────────────────────────────────

#[test]
fn input_without_functions_passes_through_unchanged() {
    let source = "<?php\n// mentions function calls in a comment\n$a = 'function f($x)';\necho $a . \"\\n\";\n";
    let (output, warnings) = convert(source);
    assert_eq!(output, source);
    assert!(warnings.is_empty());
}

#[test]
fn inline_html_passes_through_unchanged() {
    let source = "<ul>\n<li><?php echo $item; ?></li>\n</ul>\n";
    let (output, warnings) = convert(source);
    assert_eq!(output, source);
    assert!(warnings.is_empty());
}

// ─── Injection ──────────────────────────────────────────────────────────

#[test]
fn injects_documented_type_before_untyped_parameter() {
    let source = "<?php\n/** @param int $x */\nfunction f($x) {}\n";
    let (output, warnings) = convert(source);
    assert!(output.contains("function f(int $x)"), "output: {output}");
    // The docblock itself is untouched.
    assert!(output.contains("/** @param int $x */"));
    assert!(warnings.is_empty());
}

#[test]
fn injects_into_class_methods() {
    let source = "<?php\nclass Greeter {\n    /**\n     * @param string $name\n     * @return string\n     */\n    public function greet($name) {\n        return \"Hello $name\";\n    }\n}\n";
    let (output, warnings) = convert(source);
    assert!(
        output.contains("public function greet(string $name): string {"),
        "output: {output}"
    );
    assert!(warnings.is_empty());
}

#[test]
fn injects_namespaced_class_names() {
    let source = "<?php\n/** @param \\Psr\\Log\\LoggerInterface $logger */\nfunction setLogger($logger) {}\n";
    let (output, _) = convert(source);
    assert!(
        output.contains("setLogger(\\Psr\\Log\\LoggerInterface $logger)"),
        "output: {output}"
    );
}

// ─── Coercion ───────────────────────────────────────────────────────────

#[test]
fn verbose_spellings_are_canonicalized_on_injection() {
    let source = "<?php\n/**\n * @param integer $n\n * @param double $d\n * @param boolean $b\n */\nfunction f($n, $d, $b) {}\n";
    let (output, warnings) = convert(source);
    assert!(output.contains("f(int $n, float $d, bool $b)"), "output: {output}");
    assert!(warnings.is_empty());
}

// ─── Blacklist ──────────────────────────────────────────────────────────

#[test]
fn blacklisted_type_is_skipped_with_one_diagnostic() {
    let source = "<?php\n/** @param mixed $x */\nfunction f($x) {}\n";
    let (output, warnings) = convert(source);
    assert!(output.contains("function f($x)"), "output: {output}");
    assert_eq!(warnings, ["Skipping blacklisted annotation 'mixed'"]);
}

#[test]
fn blacklist_does_not_apply_to_other_parameters() {
    let source = "<?php\n/**\n * @param object $o\n * @param int $i\n */\nfunction f($o, $i) {}\n";
    let (output, warnings) = convert(source);
    assert!(output.contains("f($o, int $i)"), "output: {output}");
    assert_eq!(warnings, ["Skipping blacklisted annotation 'object'"]);
}

// ─── Existing hints are never overwritten ───────────────────────────────

#[test]
fn conflicting_existing_hint_is_kept_with_mismatch_diagnostic() {
    let source = "<?php\n/** @param int $x */\nfunction f(string $x) {}\n";
    let (output, warnings) = convert(source);
    assert!(output.contains("function f(string $x)"), "output: {output}");
    assert_eq!(
        warnings,
        ["Docblock type 'int' does not match function signature type 'string'"]
    );
}

#[test]
fn matching_existing_hint_produces_no_diagnostic() {
    let source = "<?php\n/** @param string $x */\nfunction f(string $x) {}\n";
    let (output, warnings) = convert(source);
    assert_eq!(output, source);
    assert!(warnings.is_empty());
}

// ─── Return injection ───────────────────────────────────────────────────

#[test]
fn return_type_is_appended_after_closing_paren() {
    let source = "<?php\n/**\n * @param int $x\n * @return string\n */\nfunction f($x) {}\n";
    let (output, warnings) = convert(source);
    assert!(output.contains("function f(int $x): string {"), "output: {output}");
    assert!(warnings.is_empty());
}

#[test]
fn return_type_alone_is_enough() {
    let source = "<?php\n/** @return void */\nfunction f() {}\n";
    let (output, warnings) = convert(source);
    assert!(output.contains("f(): void"), "output: {output}");
    // The empty parameter group still flushes without an annotation.
    assert_eq!(warnings, ["No typehint in annotation"]);
}

// ─── Positional correlation ─────────────────────────────────────────────

#[test]
fn undocumented_trailing_parameter_passes_through_with_diagnostic() {
    let source = "<?php\n/** @param int $a */\nfunction f($a, $b) {}\n";
    let (output, warnings) = convert(source);
    assert!(output.contains("f(int $a, $b)"), "output: {output}");
    assert_eq!(warnings, ["No typehint in annotation"]);
}

#[test]
fn extra_annotations_beyond_the_parameter_count_are_ignored() {
    let source = "<?php\n/**\n * @param int $a\n * @param string $b\n */\nfunction f($a) {}\n";
    let (output, warnings) = convert(source);
    assert!(output.contains("f(int $a)"), "output: {output}");
    assert!(warnings.is_empty());
}

#[test]
fn correlation_is_positional_not_name_based() {
    // The names in the docblock are never consulted; swapped tags
    // misattribute the types silently.
    let source = "<?php\n/**\n * @param string $b\n * @param int $a\n */\nfunction f($a, $b) {}\n";
    let (output, warnings) = convert(source);
    assert!(output.contains("f(string $a, int $b)"), "output: {output}");
    assert!(warnings.is_empty());
}

// ─── Idempotence ────────────────────────────────────────────────────────

#[test]
fn rerunning_on_converted_output_is_a_fixed_point() {
    let source = "<?php\n/**\n * @param int $a\n * @param string $b\n */\nfunction add($a, $b) {\n    return $a . $b;\n}\n";
    let (first, first_warnings) = convert(source);
    assert!(first.contains("add(int $a, string $b)"), "output: {first}");
    assert!(first_warnings.is_empty());

    let (second, second_warnings) = convert(&first);
    assert_eq!(second, first);
    assert!(second_warnings.is_empty());
}

// ─── Multiple functions ─────────────────────────────────────────────────

#[test]
fn each_function_consumes_its_own_docblock() {
    let source = "<?php\n/** @param int $a */\nfunction f($a) {}\n\n/** @param string $b */\nfunction g($b) {}\n";
    let (output, warnings) = convert(source);
    assert!(output.contains("f(int $a)"), "output: {output}");
    assert!(output.contains("g(string $b)"), "output: {output}");
    assert!(warnings.is_empty());
}
