// ABOUTME: Console and reader builtins — print, read

use super::util::{arity_error, expect_string};
use crate::interpreter::Interpreter;
use crate::reader;
use crate::value::Ref;

pub fn register(interp: &mut Interpreter) {
    interp.register_builtin("print", print_fn);
    interp.register_builtin("read", read_fn);
}

/// Writes the printed representation of its argument to stdout followed
/// by a newline and returns the argument unchanged, so `print` can be
/// threaded inside an expression (spec 4.A, 6).
fn print_fn(interp: &mut Interpreter, args: &[Ref]) -> Ref {
    if args.len() != 1 {
        return arity_error(&mut interp.heap, "print", "1 argument", args.len());
    }
    println!("{}", interp.heap.print(args[0]));
    args[0]
}

/// `(read s)` parses the first form out of the string `s` and returns it
/// unevaluated, using the same reader the top level uses (spec 4.B). An
/// empty/whitespace-only string reads as nil.
fn read_fn(interp: &mut Interpreter, args: &[Ref]) -> Ref {
    if args.len() != 1 {
        return arity_error(&mut interp.heap, "read", "1 argument", args.len());
    }
    let bytes = match expect_string(&interp.heap, args[0]) {
        Some(b) => b.to_vec(),
        None => return super::util::type_error(&mut interp.heap, "read", "a string", args[0]),
    };
    let src = String::from_utf8_lossy(&bytes).into_owned();
    match reader::read_one(&mut interp.heap, &src) {
        Some(form) => form,
        None => interp.heap.new_nil(),
    }
}
