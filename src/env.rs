// ABOUTME: Environment chain — per-scope symbol to value bindings

use crate::heap::Heap;
use crate::value::{Obj, Ref};

/// Allocate a fresh frame whose parent is `parent` (spec 4.C).
pub fn new_frame(heap: &mut Heap, parent: Option<Ref>) -> Ref {
    heap.new_frame(parent)
}

fn frame_parent(heap: &Heap, frame: Ref) -> Option<Ref> {
    match heap.get(frame) {
        Obj::Frame { parent, .. } => *parent,
        other => panic!("not a frame: {}", other.type_name()),
    }
}

/// Insert or overwrite `name` in `frame` directly, without walking parents.
pub fn bind(heap: &mut Heap, frame: Ref, name: &str, value: Ref) {
    match heap.get_mut(frame) {
        Obj::Frame { bindings, .. } => {
            bindings.insert(name.to_string(), value);
        }
        other => panic!("not a frame: {}", other.type_name()),
    }
}

/// Search `frame` and its ancestors for `name`, returning its value.
pub fn lookup(heap: &Heap, frame: Ref, name: &str) -> Option<Ref> {
    let mut cur = Some(frame);
    while let Some(f) = cur {
        match heap.get(f) {
            Obj::Frame { bindings, parent } => {
                if let Some(v) = bindings.get(name) {
                    return Some(*v);
                }
                cur = *parent;
            }
            other => panic!("not a frame: {}", other.type_name()),
        }
    }
    None
}

/// Walk to the rootless ancestor of `frame` (the one with no parent) and
/// bind `name` there. Used by `define` (spec 4.D).
pub fn bind_root(heap: &mut Heap, frame: Ref, name: &str, value: Ref) {
    let mut cur = frame;
    loop {
        match frame_parent(heap, cur) {
            Some(p) => cur = p,
            None => break,
        }
    }
    bind(heap, cur, name, value);
}

/// Search the chain starting at `frame` for an existing binding of `name`
/// and update it in place; if none exists, bind it in `frame` itself.
///
/// This is the `set` special form's semantics (spec 4.D), resolving the
/// open question in spec 9 in favour of chain search rather than always
/// writing into the innermost frame.
pub fn set_existing_or_local(heap: &mut Heap, frame: Ref, name: &str, value: Ref) {
    let mut cur = Some(frame);
    while let Some(f) = cur {
        let has = match heap.get(f) {
            Obj::Frame { bindings, .. } => bindings.contains_key(name),
            other => panic!("not a frame: {}", other.type_name()),
        };
        if has {
            bind(heap, f, name, value);
            return;
        }
        cur = frame_parent(heap, f);
    }
    bind(heap, frame, name, value);
}
