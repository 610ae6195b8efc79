// ABOUTME: Interpreter context tying the heap, root environment, and collector together

use crate::config;
use crate::env;
use crate::gc;
use crate::reader::Reader;
use crate::value::{BuiltinFn, Obj, Ref};

/// Everything a running program needs, threaded explicitly through every
/// evaluator entry point rather than kept in globals (spec 9, "interpreter
/// context").
pub struct Interpreter {
    pub heap: crate::heap::Heap,
    pub root: Ref,
}

impl Interpreter {
    pub fn new() -> Self {
        let mut heap = crate::heap::Heap::new();
        let root = env::new_frame(&mut heap, None);
        let mut interp = Interpreter { heap, root };
        interp.bootstrap();
        interp
    }

    fn bootstrap(&mut self) {
        let nil = self.heap.new_nil();
        env::bind(&mut self.heap, self.root, "nil", nil);
        let t = self.heap.new_bool(true);
        env::bind(&mut self.heap, self.root, "true", t);
        let f = self.heap.new_bool(false);
        env::bind(&mut self.heap, self.root, "false", f);
        crate::builtins::register_all(self);
    }

    pub fn register_builtin(&mut self, name: &str, func: BuiltinFn) {
        let r = self.heap.new_builtin_function(name, func);
        env::bind(&mut self.heap, self.root, name, r);
    }

    pub fn register_builtin_macro(&mut self, name: &str, func: BuiltinFn) {
        let r = self.heap.new_builtin_macro(name, func);
        env::bind(&mut self.heap, self.root, name, r);
    }

    /// Load the two stdlib sources shipped with the binary. Skipped by
    /// `--no-stdlib` (spec supplement, §2.1 of SPEC_FULL).
    pub fn load_stdlib(&mut self) {
        self.read_eval(config::STDLIB_CORE);
        self.read_eval(config::STDLIB_ITERATION);
    }

    /// Read and evaluate every top-level form in `src` against the root
    /// environment, stopping (per spec 7) as soon as one produces an
    /// `Error` value. Returns every result produced, including the error
    /// that stopped the batch if there was one.
    pub fn read_eval(&mut self, src: &str) -> Vec<Ref> {
        let mut reader = Reader::new(src);
        let mut results = Vec::new();
        while let Some(form) = reader.read_form(&mut self.heap) {
            let result = self.eval(form, self.root);
            let is_error = matches!(self.heap.get(result), Obj::Error(_));
            results.push(result);
            gc::maybe_collect(&mut self.heap, self.root, &[]);
            if is_error {
                break;
            }
        }
        results
    }

    /// Force a collection now, regardless of the growth-factor threshold.
    /// Exposed for tests and for diagnostics; never called mid-evaluation.
    pub fn collect_garbage(&mut self) {
        gc::collect(&mut self.heap, self.root, &[]);
    }
}

impl Default for Interpreter {
    fn default() -> Self {
        Self::new()
    }
}
