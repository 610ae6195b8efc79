// ABOUTME: End-to-end scenarios and invariants from the language specification

use gclisp::interpreter::Interpreter;
use gclisp::value::Obj;

fn run(src: &str) -> String {
    let mut interp = Interpreter::new();
    interp.load_stdlib();
    let results = interp.read_eval(src);
    let last = *results.last().expect("at least one form");
    interp.heap.print(last)
}

#[test]
fn scenario_1_let_binds_a_string() {
    assert_eq!(run(r#"(let (x "hello") x)"#), "hello");
}

#[test]
fn scenario_2_let_with_two_bindings_and_arithmetic() {
    assert_eq!(run("(let (a 5 b 7) (+ a b))"), "12");
}

#[test]
fn scenario_3_quasiquote_splices_a_bound_value() {
    assert_eq!(run("(let (c 5) `(a b ,c))"), "(a b 5)");
}

#[test]
fn scenario_4_lambda_definition_and_call() {
    assert_eq!(
        run("(define double (lambda (a) (+ a a))) (double 10)"),
        "20"
    );
}

#[test]
fn scenario_5_rest_parameter_collects_trailing_arguments() {
    assert_eq!(run("((lambda (a b &) &) 1 2 3 4 5)"), "(3 4 5)");
}

#[test]
fn scenario_6_macroexpand_one_level_and_to_fixpoint() {
    let mut interp = Interpreter::new();
    interp.load_stdlib();
    interp.read_eval("(define m1 (macro (x) `(m2 ,x))) (define m2 (macro (y) `(+ ,y ,y)))");
    let one = interp.read_eval("(macroexpand-1 '(m1 6))");
    assert_eq!(interp.heap.print(*one.last().unwrap()), "(m2 6)");
    let full = interp.read_eval("(macroexpand '(m1 6))");
    assert_eq!(interp.heap.print(*full.last().unwrap()), "(+ 6 6)");
}

#[test]
fn scenario_7_dotimes_increments_a_root_binding_n_times() {
    let mut interp = Interpreter::new();
    interp.load_stdlib();
    interp.read_eval("(define x 0)");
    interp.read_eval("(dotimes (define x (+ x 1)) 5)");
    let r = interp.read_eval("x");
    assert_eq!(interp.heap.print(*r.last().unwrap()), "5");
}

#[test]
fn scenario_8_quote_with_extra_arguments_is_an_error() {
    let mut interp = Interpreter::new();
    let r = interp.read_eval("(quote a b c)");
    assert!(matches!(interp.heap.get(*r.last().unwrap()), Obj::Error(_)));
}

#[test]
fn law_equal_is_reflexive_for_non_callables() {
    assert_eq!(run("(= (list 1 2 3) (list 1 2 3))"), "true");
}

#[test]
fn law_quote_shorthand_matches_explicit_quote() {
    let mut interp = Interpreter::new();
    let shorthand = interp.read_eval("'(1 2 3)");
    let explicit = interp.read_eval("(quote (1 2 3))");
    assert_eq!(
        interp.heap.print(*shorthand.last().unwrap()),
        interp.heap.print(*explicit.last().unwrap())
    );
}

#[test]
fn law_quasiquote_without_unquote_is_identity() {
    assert_eq!(run("`(a b c)"), "(a b c)");
}

#[test]
fn law_append_is_length_additive() {
    assert_eq!(run("(len (append (list 1 2 3) (list 4 5)))"), "5");
}

#[test]
fn law_append_of_a_non_list_is_a_type_error() {
    assert!(run("(append 5 (list 1))").contains("type error"));
}

#[test]
fn gc_soundness_survives_allocation_pressure_across_many_forms() {
    let mut interp = Interpreter::new();
    interp.load_stdlib();
    interp.read_eval("(define acc nil)");
    for i in 0..500 {
        interp.read_eval(&format!("(define acc (cons {i} acc))"));
        interp.read_eval(&format!("(define tmp-{i} (list 1 2 3 4 5))"));
    }
    let r = interp.read_eval("(len acc)");
    assert_eq!(interp.heap.print(*r.last().unwrap()), "500");
}

#[test]
fn gc_soundness_closure_survives_collection_pressure() {
    let mut interp = Interpreter::new();
    interp.load_stdlib();
    interp.read_eval(
        "(define counter
           (let (n 0)
             (lambda () (do (set n (+ n 1)) n))))",
    );
    for _ in 0..300 {
        interp.read_eval("(list 1 2 3 4 5 6 7 8 9 10)");
    }
    let r = interp.read_eval("(counter) (counter) (counter)");
    assert_eq!(interp.heap.print(*r.last().unwrap()), "3");
}

#[test]
fn name_error_for_undefined_function_in_application_head() {
    let mut interp = Interpreter::new();
    let r = interp.read_eval("(totally-undefined 1 2)");
    match interp.heap.get(*r.last().unwrap()) {
        Obj::Error(msg) => assert!(msg.contains("name error")),
        other => panic!("expected a name error, got {other:?}"),
    }
}

#[test]
fn errors_propagate_unchanged_through_enclosing_expressions() {
    let mut interp = Interpreter::new();
    let r = interp.read_eval("(+ 1 (car 5))");
    assert!(matches!(interp.heap.get(*r.last().unwrap()), Obj::Error(_)));
}

#[test]
fn a_batch_stops_at_the_first_top_level_error() {
    let mut interp = Interpreter::new();
    let results = interp.read_eval("(car 1) (define should-not-run 1)");
    assert_eq!(results.len(), 1);
    let lookup = interp.read_eval("should-not-run");
    assert!(matches!(interp.heap.get(*lookup.last().unwrap()), Obj::Nil));
}

#[test]
fn stdlib_map_filter_reduce_compose() {
    let mut interp = Interpreter::new();
    interp.load_stdlib();
    let r = interp.read_eval(
        "(reduce + 0 (filter (lambda (x) (> x 2)) (map (lambda (x) (+ x 1)) (list 1 2 3 4))))",
    );
    // map -> (2 3 4 5); filter (> x 2) -> (3 4 5); reduce + 0 -> 12
    assert_eq!(interp.heap.print(*r.last().unwrap()), "12");
}

#[test]
fn stdlib_and_short_circuits_via_if_expansion() {
    let mut interp = Interpreter::new();
    interp.load_stdlib();
    let r = interp.read_eval("(and false (car 1))");
    assert_eq!(interp.heap.print(*r.last().unwrap()), "false");
}

#[test]
fn stdlib_while_loops_until_condition_is_false() {
    let mut interp = Interpreter::new();
    interp.load_stdlib();
    interp.read_eval("(define n 0)");
    interp.read_eval("(while (< n 5) (set n (+ n 1)))");
    let r = interp.read_eval("n");
    assert_eq!(interp.heap.print(*r.last().unwrap()), "5");
}
