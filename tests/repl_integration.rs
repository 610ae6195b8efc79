// ABOUTME: Integration tests for multi-file execution and test-mode behavior (spec §6)
//
// The REPL prompt/line-reading loop itself lives in main.rs (the CLI, an
// external collaborator per spec §1) and isn't exercised here; what's
// testable through the library is the shared-environment and test-mode
// semantics the CLI builds on top of `Interpreter` and `test_runner`.

use gclisp::interpreter::Interpreter;
use gclisp::test_runner::run_test_file;
use gclisp::value::Obj;

#[test]
fn forms_across_separate_read_eval_calls_share_one_root_environment() {
    // Models "each [file] is read and executed in order, sharing one
    // interpreter/root environment across files" (SPEC_FULL §2.1).
    let mut interp = Interpreter::new();
    interp.load_stdlib();
    interp.read_eval("(define shared 1)");
    interp.read_eval("(define shared (+ shared 1))");
    let r = interp.read_eval("shared");
    assert_eq!(interp.heap.print(*r.last().unwrap()), "2");
}

#[test]
fn a_later_file_sees_definitions_from_an_earlier_one() {
    let mut interp = Interpreter::new();
    interp.load_stdlib();
    // "file A"
    interp.read_eval("(define greeting \"hi\")");
    // "file B"
    let r = interp.read_eval("greeting");
    assert_eq!(interp.heap.print(*r.last().unwrap()), "hi");
}

#[test]
fn test_mode_counts_deftest_results_and_reports_a_summary() {
    let mut interp = Interpreter::new();
    interp.load_stdlib();
    let summary = run_test_file(
        &mut interp,
        r#"
        (define x 10)
        (deftest x-is-ten (= x 10))
        (deftest x-is-not-eleven (not (= x 11)))
        (deftest this-one-fails (= x 999))
        "#,
    );
    assert_eq!(summary.passed_count(), 2);
    assert_eq!(summary.failed_count(), 1);
    assert!(!summary.all_passed());
    assert!(summary.summary_line().contains("2 passed"));
}

#[test]
fn test_mode_with_every_assertion_passing_reports_all_passed() {
    let mut interp = Interpreter::new();
    interp.load_stdlib();
    let summary = run_test_file(&mut interp, "(deftest trivial true)");
    assert!(summary.all_passed());
}

#[test]
fn error_value_surfaced_mid_batch_does_not_crash_the_process() {
    let mut interp = Interpreter::new();
    let results = interp.read_eval("(+ 1 (undefined-name))");
    assert!(matches!(
        interp.heap.get(*results.last().unwrap()),
        Obj::Error(_)
    ));
}
