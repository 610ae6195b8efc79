// ABOUTME: List primitives — cons, car, cdr, setcar, setcdr, list, append, len, find, last, copy

use super::util::{arity_error, type_error};
use crate::interpreter::Interpreter;
use crate::list;
use crate::value::{Obj, Ref};

pub fn register(interp: &mut Interpreter) {
    interp.register_builtin("cons", cons);
    interp.register_builtin("car", car);
    interp.register_builtin("cdr", cdr);
    interp.register_builtin("setcar", setcar);
    interp.register_builtin("setcdr", setcdr);
    interp.register_builtin("list", list_fn);
    interp.register_builtin("append", append);
    interp.register_builtin("len", len);
    interp.register_builtin("find", find);
    interp.register_builtin("last", last);
    interp.register_builtin("copy", copy);
}

fn cons(interp: &mut Interpreter, args: &[Ref]) -> Ref {
    if args.len() != 2 {
        return arity_error(&mut interp.heap, "cons", "2 arguments", args.len());
    }
    interp.heap.new_cons(args[0], args[1])
}

fn car(interp: &mut Interpreter, args: &[Ref]) -> Ref {
    if args.len() != 1 {
        return arity_error(&mut interp.heap, "car", "1 argument", args.len());
    }
    match interp.heap.get(args[0]) {
        Obj::Cons { car, .. } => *car,
        Obj::Nil => interp.heap.new_nil(),
        _ => type_error(&mut interp.heap, "car", "a cons or nil", args[0]),
    }
}

fn cdr(interp: &mut Interpreter, args: &[Ref]) -> Ref {
    if args.len() != 1 {
        return arity_error(&mut interp.heap, "cdr", "1 argument", args.len());
    }
    match interp.heap.get(args[0]) {
        Obj::Cons { cdr, .. } => *cdr,
        Obj::Nil => interp.heap.new_nil(),
        _ => type_error(&mut interp.heap, "cdr", "a cons or nil", args[0]),
    }
}

fn setcar(interp: &mut Interpreter, args: &[Ref]) -> Ref {
    if args.len() != 2 {
        return arity_error(&mut interp.heap, "setcar", "2 arguments", args.len());
    }
    match interp.heap.get_mut(args[0]) {
        Obj::Cons { car, .. } => {
            *car = args[1];
        }
        _ => return type_error(&mut interp.heap, "setcar", "a cons", args[0]),
    }
    args[0]
}

fn setcdr(interp: &mut Interpreter, args: &[Ref]) -> Ref {
    if args.len() != 2 {
        return arity_error(&mut interp.heap, "setcdr", "2 arguments", args.len());
    }
    match interp.heap.get_mut(args[0]) {
        Obj::Cons { cdr, .. } => {
            *cdr = args[1];
        }
        _ => return type_error(&mut interp.heap, "setcdr", "a cons", args[0]),
    }
    args[0]
}

fn list_fn(interp: &mut Interpreter, args: &[Ref]) -> Ref {
    let nil = interp.heap.new_nil();
    list::vec_to_list(&mut interp.heap, args, nil)
}

/// `append` requires every argument but the last to be a proper list (or
/// nil); the last argument becomes the tail of the result, proper or not,
/// matching the concat/length-additive law in spec 8.
fn append(interp: &mut Interpreter, args: &[Ref]) -> Ref {
    if args.is_empty() {
        return interp.heap.new_nil();
    }
    let (init, last) = args.split_at(args.len() - 1);
    let mut items = Vec::new();
    for &a in init {
        if !list::is_proper_list(&interp.heap, a) {
            return type_error(&mut interp.heap, "append", "a list", a);
        }
        let (mut vals, _) = list::list_to_vec(&interp.heap, a);
        items.append(&mut vals);
    }
    list::vec_to_list(&mut interp.heap, &items, last[0])
}

fn len(interp: &mut Interpreter, args: &[Ref]) -> Ref {
    if args.len() != 1 {
        return arity_error(&mut interp.heap, "len", "1 argument", args.len());
    }
    if !list::is_proper_list(&interp.heap, args[0]) {
        return type_error(&mut interp.heap, "len", "a list", args[0]);
    }
    let (items, _) = list::list_to_vec(&interp.heap, args[0]);
    interp.heap.new_number(items.len() as i64)
}

/// `(find pred lst)` — first element for which `pred` is truthy, or nil.
fn find(interp: &mut Interpreter, args: &[Ref]) -> Ref {
    if args.len() != 2 {
        return arity_error(&mut interp.heap, "find", "a predicate and a list", args.len());
    }
    if !list::is_proper_list(&interp.heap, args[1]) {
        return type_error(&mut interp.heap, "find", "a list", args[1]);
    }
    let pred = match interp.heap.get(args[0]) {
        Obj::Callable(c) => c.clone(),
        _ => return type_error(&mut interp.heap, "find", "a callable", args[0]),
    };
    let (items, _) = list::list_to_vec(&interp.heap, args[1]);
    for item in items {
        let result = interp.apply_callable(&pred, vec![item]);
        if interp.heap.is_truthy(result) {
            return item;
        }
    }
    interp.heap.new_nil()
}

fn last(interp: &mut Interpreter, args: &[Ref]) -> Ref {
    if args.len() != 1 {
        return arity_error(&mut interp.heap, "last", "1 argument", args.len());
    }
    if !list::is_proper_list(&interp.heap, args[0]) {
        return type_error(&mut interp.heap, "last", "a list", args[0]);
    }
    let (items, _) = list::list_to_vec(&interp.heap, args[0]);
    items.last().copied().unwrap_or_else(|| interp.heap.new_nil())
}

fn copy(interp: &mut Interpreter, args: &[Ref]) -> Ref {
    if args.len() != 1 {
        return arity_error(&mut interp.heap, "copy", "1 argument", args.len());
    }
    interp.heap.deep_copy(args[0])
}
