// ABOUTME: Helpers for walking and building cons chains

use crate::heap::Heap;
use crate::value::{Obj, Ref};

/// Walk a cons chain, collecting elements until a non-cons tail is hit.
/// Returns the elements and the tail (nil for a proper list).
pub fn list_to_vec(heap: &Heap, mut r: Ref) -> (Vec<Ref>, Ref) {
    let mut out = Vec::new();
    loop {
        match heap.get(r) {
            Obj::Cons { car, cdr } => {
                out.push(*car);
                r = *cdr;
            }
            _ => return (out, r),
        }
    }
}

/// Build a cons chain from `items`, terminated by `tail`.
pub fn vec_to_list(heap: &mut Heap, items: &[Ref], tail: Ref) -> Ref {
    let mut acc = tail;
    for &item in items.iter().rev() {
        acc = heap.new_cons(item, acc);
    }
    acc
}

pub fn is_proper_list(heap: &Heap, r: Ref) -> bool {
    let (_, tail) = list_to_vec(heap, r);
    matches!(heap.get(tail), Obj::Nil)
}
