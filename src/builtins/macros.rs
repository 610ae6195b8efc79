// ABOUTME: macroexpand / macroexpand-1 — expand a macro call without evaluating the result

use super::util::arity_error;
use crate::env;
use crate::interpreter::Interpreter;
use crate::list;
use crate::value::{CallableKind, Obj, Ref};

pub fn register(interp: &mut Interpreter) {
    interp.register_builtin("macroexpand-1", macroexpand_1_fn);
    interp.register_builtin("macroexpand", macroexpand_fn);
}

/// If `form` is a list whose head names a macro bound in the root
/// environment, apply that macro to the unevaluated tail and return the
/// expansion; otherwise return `form` unchanged. Looked up against the
/// root frame since builtins are not passed the calling lexical
/// environment (spec 4.F contract, value::BuiltinFn).
fn expand_once(interp: &mut Interpreter, form: Ref) -> Ref {
    let (car, cdr) = match interp.heap.get(form) {
        Obj::Cons { car, cdr } => (*car, *cdr),
        _ => return form,
    };
    let name = match interp.heap.get(car) {
        Obj::Symbol(s) => s.clone(),
        _ => return form,
    };
    let head = match env::lookup(&interp.heap, interp.root, &name) {
        Some(h) => h,
        None => return form,
    };
    let callable = match interp.heap.get(head) {
        Obj::Callable(c) if c.kind == CallableKind::Macro => c.clone(),
        _ => return form,
    };
    let (args, _) = list::list_to_vec(&interp.heap, cdr);
    interp.apply_callable(&callable, args)
}

fn macroexpand_1_fn(interp: &mut Interpreter, args: &[Ref]) -> Ref {
    if args.len() != 1 {
        return arity_error(&mut interp.heap, "macroexpand-1", "1 argument", args.len());
    }
    expand_once(interp, args[0])
}

fn macroexpand_fn(interp: &mut Interpreter, args: &[Ref]) -> Ref {
    if args.len() != 1 {
        return arity_error(&mut interp.heap, "macroexpand", "1 argument", args.len());
    }
    let mut cur = args[0];
    loop {
        let next = expand_once(interp, cur);
        if next == cur {
            return cur;
        }
        cur = next;
    }
}
