// ABOUTME: Arithmetic builtins — +, -, *, /

use super::util::{arity_error, expect_number, overflow_error};
use crate::interpreter::Interpreter;
use crate::value::Ref;

pub fn register(interp: &mut Interpreter) {
    interp.register_builtin("+", add);
    interp.register_builtin("-", sub);
    interp.register_builtin("*", mul);
    interp.register_builtin("/", div);
}

fn numbers(interp: &mut Interpreter, name: &str, args: &[Ref]) -> Result<Vec<i64>, Ref> {
    args.iter()
        .map(|&a| expect_number(&mut interp.heap, name, a))
        .collect()
}

/// A number value becoming an `Error` is still just another value per
/// spec §7 — overflow is a checked, reported failure, never a process
/// panic.
fn add(interp: &mut Interpreter, args: &[Ref]) -> Ref {
    let ns = match numbers(interp, "+", args) {
        Ok(ns) => ns,
        Err(e) => return e,
    };
    let mut acc: i64 = 0;
    for n in ns {
        acc = match acc.checked_add(n) {
            Some(v) => v,
            None => return overflow_error(&mut interp.heap, "+"),
        };
    }
    interp.heap.new_number(acc)
}

fn mul(interp: &mut Interpreter, args: &[Ref]) -> Ref {
    let ns = match numbers(interp, "*", args) {
        Ok(ns) => ns,
        Err(e) => return e,
    };
    let mut acc: i64 = 1;
    for n in ns {
        acc = match acc.checked_mul(n) {
            Some(v) => v,
            None => return overflow_error(&mut interp.heap, "*"),
        };
    }
    interp.heap.new_number(acc)
}

fn sub(interp: &mut Interpreter, args: &[Ref]) -> Ref {
    if args.is_empty() {
        return arity_error(&mut interp.heap, "-", "at least 1 argument", 0);
    }
    let ns = match numbers(interp, "-", args) {
        Ok(ns) => ns,
        Err(e) => return e,
    };
    if ns.len() == 1 {
        return match ns[0].checked_neg() {
            Some(v) => interp.heap.new_number(v),
            None => overflow_error(&mut interp.heap, "-"),
        };
    }
    let mut acc = ns[0];
    for n in &ns[1..] {
        acc = match acc.checked_sub(*n) {
            Some(v) => v,
            None => return overflow_error(&mut interp.heap, "-"),
        };
    }
    interp.heap.new_number(acc)
}

fn div(interp: &mut Interpreter, args: &[Ref]) -> Ref {
    if args.is_empty() {
        return arity_error(&mut interp.heap, "/", "at least 1 argument", 0);
    }
    let ns = match numbers(interp, "/", args) {
        Ok(ns) => ns,
        Err(e) => return e,
    };
    let (first, rest) = ns.split_first().unwrap();
    if rest.is_empty() {
        if *first == 0 {
            return interp.heap.new_error("arity error: / division by zero");
        }
        return match 1i64.checked_div(*first) {
            Some(v) => interp.heap.new_number(v),
            None => overflow_error(&mut interp.heap, "/"),
        };
    }
    let mut acc = *first;
    for n in rest {
        if *n == 0 {
            return interp.heap.new_error("arity error: / division by zero");
        }
        acc = match acc.checked_div(*n) {
            Some(v) => v,
            None => return overflow_error(&mut interp.heap, "/"),
        };
    }
    interp.heap.new_number(acc)
}

#[cfg(test)]
mod tests {
    use crate::interpreter::Interpreter;

    #[test]
    fn add_sums_all_arguments() {
        let mut interp = Interpreter::new();
        let r = interp.read_eval("(+ 1 2 3)");
        assert_eq!(interp.heap.print(*r.last().unwrap()), "6");
    }

    #[test]
    fn sub_with_one_argument_negates() {
        let mut interp = Interpreter::new();
        let r = interp.read_eval("(- 5)");
        assert_eq!(interp.heap.print(*r.last().unwrap()), "-5");
    }

    #[test]
    fn div_by_zero_is_an_error() {
        let mut interp = Interpreter::new();
        let r = interp.read_eval("(/ 1 0)");
        assert_eq!(interp.heap.print(*r.last().unwrap()), "arity error: / division by zero");
    }

    #[test]
    fn type_mismatch_reports_type_error() {
        let mut interp = Interpreter::new();
        let r = interp.read_eval(r#"(+ 1 "x")"#);
        let printed = interp.heap.print(*r.last().unwrap());
        assert!(printed.contains("type error"));
    }

    #[test]
    fn multiply_overflow_is_an_error_value_not_a_panic() {
        let mut interp = Interpreter::new();
        let r = interp.read_eval("(* 99999999999 99999999999)");
        let printed = interp.heap.print(*r.last().unwrap());
        assert!(printed.contains("overflow error"), "got {printed}");
    }

    #[test]
    fn add_overflow_is_an_error_value() {
        let mut interp = Interpreter::new();
        let r = interp.read_eval("(+ 9223372036854775807 1)");
        let printed = interp.heap.print(*r.last().unwrap());
        assert!(printed.contains("overflow error"), "got {printed}");
    }

    #[test]
    fn negating_the_minimum_i64_is_an_overflow_error() {
        let mut interp = Interpreter::new();
        let r = interp.read_eval("(- -9223372036854775808)");
        let printed = interp.heap.print(*r.last().unwrap());
        assert!(printed.contains("overflow error"), "got {printed}");
    }
}
