// ABOUTME: `deftest` test runner — recognises deftest forms and counts boolean results
//
// This is deliberately outside the evaluator's special-form table (spec §1):
// `deftest` is not a language construct, it is a convention this runner scans
// for in a file whose basename ends in `_test.lisp`. It consumes only the
// `Interpreter::eval` entry point, exactly like any other external caller.

use crate::gc;
use crate::interpreter::Interpreter;
use crate::list;
use crate::reader::Reader;
use crate::value::Obj;

pub struct TestOutcome {
    pub name: String,
    pub passed: bool,
}

pub struct TestSummary {
    pub outcomes: Vec<TestOutcome>,
    /// Set if a non-deftest top-level form produced an `Error`, aborting the
    /// remainder of the file per spec §7.
    pub aborted_with_error: Option<String>,
}

impl TestSummary {
    pub fn passed_count(&self) -> usize {
        self.outcomes.iter().filter(|o| o.passed).count()
    }

    pub fn failed_count(&self) -> usize {
        self.outcomes.len() - self.passed_count()
    }

    pub fn all_passed(&self) -> bool {
        self.aborted_with_error.is_none() && self.failed_count() == 0
    }

    pub fn summary_line(&self) -> String {
        format!(
            "{} passed, {} failed ({} total)",
            self.passed_count(),
            self.failed_count(),
            self.outcomes.len()
        )
    }
}

/// Runs every top-level form in `src` against `interp`'s root environment.
/// `(deftest name expr)` forms are evaluated and their result counted as a
/// pass only when it is exactly `true`; every other form is evaluated for
/// effect (so a test file can `define` fixtures ahead of its `deftest`s).
pub fn run_test_file(interp: &mut Interpreter, src: &str) -> TestSummary {
    let mut reader = Reader::new(src);
    let mut outcomes = Vec::new();
    let mut aborted_with_error = None;

    while let Some(form) = reader.read_form(&mut interp.heap) {
        let head_is_deftest = match interp.heap.get(form) {
            Obj::Cons { car, .. } => {
                matches!(interp.heap.get(*car), Obj::Symbol(s) if s == "deftest")
            }
            _ => false,
        };

        if head_is_deftest {
            let (items, _) = list::list_to_vec(&interp.heap, form);
            if items.len() != 3 {
                outcomes.push(TestOutcome {
                    name: "<malformed deftest>".to_string(),
                    passed: false,
                });
            } else {
                let name = interp.heap.print(items[1]);
                let result = interp.eval(items[2], interp.root);
                let passed = matches!(interp.heap.get(result), Obj::Bool(true));
                outcomes.push(TestOutcome { name, passed });
            }
        } else {
            let result = interp.eval(form, interp.root);
            if let Obj::Error(msg) = interp.heap.get(result) {
                aborted_with_error = Some(msg.clone());
                gc::maybe_collect(&mut interp.heap, interp.root, &[]);
                break;
            }
        }
        gc::maybe_collect(&mut interp.heap, interp.root, &[]);
    }

    TestSummary {
        outcomes,
        aborted_with_error,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_passing_and_failing_deftests() {
        let mut interp = Interpreter::new();
        let summary = run_test_file(
            &mut interp,
            r#"
            (deftest addition-works (= (+ 1 1) 2))
            (deftest this-fails (= 1 2))
            "#,
        );
        assert_eq!(summary.passed_count(), 1);
        assert_eq!(summary.failed_count(), 1);
        assert!(!summary.all_passed());
    }

    #[test]
    fn non_boolean_results_count_as_failures() {
        let mut interp = Interpreter::new();
        let summary = run_test_file(&mut interp, "(deftest not-a-bool (+ 1 1))");
        assert_eq!(summary.failed_count(), 1);
    }

    #[test]
    fn defines_ahead_of_deftests_are_visible() {
        let mut interp = Interpreter::new();
        let summary = run_test_file(
            &mut interp,
            r#"
            (define answer 42)
            (deftest uses-fixture (= answer 42))
            "#,
        );
        assert!(summary.all_passed());
    }

    #[test]
    fn error_in_a_plain_form_aborts_remaining_forms() {
        let mut interp = Interpreter::new();
        let summary = run_test_file(
            &mut interp,
            r#"
            (car 1)
            (deftest never-runs true)
            "#,
        );
        assert!(summary.aborted_with_error.is_some());
        assert!(summary.outcomes.is_empty());
    }
}
