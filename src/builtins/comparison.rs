// ABOUTME: Comparison builtins — =, <, >

use super::util::{arity_error, expect_number};
use crate::interpreter::Interpreter;
use crate::value::Ref;

pub fn register(interp: &mut Interpreter) {
    interp.register_builtin("=", eq);
    interp.register_builtin("<", lt);
    interp.register_builtin(">", gt);
}

fn eq(interp: &mut Interpreter, args: &[Ref]) -> Ref {
    if args.len() != 2 {
        return arity_error(&mut interp.heap, "=", "2 arguments", args.len());
    }
    let result = interp.heap.values_equal(args[0], args[1]);
    interp.heap.new_bool(result)
}

fn lt(interp: &mut Interpreter, args: &[Ref]) -> Ref {
    order(interp, "<", args, |a, b| a < b)
}

fn gt(interp: &mut Interpreter, args: &[Ref]) -> Ref {
    order(interp, ">", args, |a, b| a > b)
}

fn order(interp: &mut Interpreter, name: &str, args: &[Ref], op: fn(i64, i64) -> bool) -> Ref {
    if args.len() != 2 {
        return arity_error(&mut interp.heap, name, "2 arguments", args.len());
    }
    let a = match expect_number(&mut interp.heap, name, args[0]) {
        Ok(n) => n,
        Err(e) => return e,
    };
    let b = match expect_number(&mut interp.heap, name, args[1]) {
        Ok(n) => n,
        Err(e) => return e,
    };
    interp.heap.new_bool(op(a, b))
}
