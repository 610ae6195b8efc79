// ABOUTME: apply — variadic function application with a trailing spliced-or-consed argument

use super::util::{arity_error, type_error};
use crate::interpreter::Interpreter;
use crate::list;
use crate::value::{Obj, Ref};

pub fn register(interp: &mut Interpreter) {
    interp.register_builtin("apply", apply_fn);
}

/// `(apply f x1 … xk last)`: `last` is spliced after `x1..xk` if it is a
/// cons, otherwise consed onto the end as a single argument (spec 4.D).
/// The result is not re-evaluated even if `f` is a macro.
fn apply_fn(interp: &mut Interpreter, args: &[Ref]) -> Ref {
    if args.len() < 2 {
        return arity_error(
            &mut interp.heap,
            "apply",
            "a function and at least one argument",
            args.len(),
        );
    }
    let f = args[0];
    let rest = &args[1..];
    let (xs, last_slice) = rest.split_at(rest.len() - 1);
    let last = last_slice[0];

    let mut final_args: Vec<Ref> = xs.to_vec();
    if matches!(interp.heap.get(last), Obj::Cons { .. }) {
        let (items, _) = list::list_to_vec(&interp.heap, last);
        final_args.extend(items);
    } else {
        final_args.push(last);
    }

    let callable = match interp.heap.get(f) {
        Obj::Callable(c) => c.clone(),
        _ => return type_error(&mut interp.heap, "apply", "a callable", f),
    };
    interp.apply_callable(&callable, final_args)
}
