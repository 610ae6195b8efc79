// ABOUTME: Shared argument-checking helpers for builtin implementations

use crate::heap::Heap;
use crate::value::{Obj, Ref};

pub fn arity_error(heap: &mut Heap, name: &str, expected: &str, got: usize) -> Ref {
    heap.new_error(format!(
        "arity error: {name} expects {expected}, got {got}"
    ))
}

pub fn type_error(heap: &mut Heap, name: &str, expected: &str, got: Ref) -> Ref {
    heap.new_error(format!(
        "type error: {name} expects {expected}, got {}",
        heap.print(got)
    ))
}

pub fn overflow_error(heap: &mut Heap, name: &str) -> Ref {
    heap.new_error(format!("overflow error: {name} result out of range"))
}

pub fn expect_number(heap: &mut Heap, name: &str, r: Ref) -> Result<i64, Ref> {
    match heap.get(r) {
        Obj::Number(n) => Ok(*n),
        _ => Err(type_error(heap, name, "a number", r)),
    }
}

pub fn expect_string<'h>(heap: &'h Heap, r: Ref) -> Option<&'h [u8]> {
    match heap.get(r) {
        Obj::Str(bytes) => Some(bytes),
        _ => None,
    }
}
