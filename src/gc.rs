// ABOUTME: Mark-and-sweep collector over the heap registry

use crate::config::GC_GROWTH_FACTOR;
use crate::heap::Heap;
use crate::value::{Obj, Origin, Ref};

/// Decide whether a collection should run, and run it if so. Called once
/// per top-level form by the interpreter, never mid-evaluation (spec 5).
///
/// `root_env` is the root environment frame; `live_stack` is every frame
/// currently part of an in-flight evaluation (spec 4.E root source #3) —
/// empty whenever this is called, since we only collect between top-level
/// forms, but marked anyway so an implementation that starts collecting
/// opportunistically mid-eval stays sound.
pub fn maybe_collect(heap: &mut Heap, root_env: Ref, live_stack: &[Ref]) {
    let threshold = GC_GROWTH_FACTOR * heap.objects_live_at_last_gc as f64;
    if (heap.allocations_since_last_gc as f64) < threshold {
        return;
    }
    collect(heap, root_env, live_stack);
}

pub fn collect(heap: &mut Heap, root_env: Ref, live_stack: &[Ref]) {
    mark(heap, root_env);
    for &frame in live_stack {
        mark(heap, frame);
    }

    let mut live_count = 0;
    for r in heap.all_refs() {
        if heap.is_marked(r) {
            // Clear the mark now so the next cycle starts from a clean
            // slate — objects allocated after this point, and objects
            // that survive future cycles, are always unmarked going in.
            heap.unmark(r);
            live_count += 1;
        } else {
            heap.free_slot(r);
        }
    }

    heap.objects_live_at_last_gc = live_count;
    heap.allocations_since_last_gc = 0;
}

fn mark(heap: &mut Heap, r: Ref) {
    if !heap.mark(r) {
        return;
    }
    match heap.get(r).clone() {
        Obj::Cons { car, cdr } => {
            mark(heap, car);
            mark(heap, cdr);
        }
        Obj::Callable(c) => {
            if matches!(c.origin, Origin::UserDefined) {
                if let Some(body) = c.body {
                    mark(heap, body);
                }
                if let Some(env) = c.captured_env {
                    mark(heap, env);
                }
            }
        }
        Obj::Frame { parent, bindings } => {
            for v in bindings.values() {
                mark(heap, *v);
            }
            if let Some(p) = parent {
                mark(heap, p);
            }
        }
        _ => {}
    }
}
