// ABOUTME: error and import — first-class error values and source-file loading

use super::util::{arity_error, expect_string};
use crate::interpreter::Interpreter;
use crate::value::Ref;

pub fn register(interp: &mut Interpreter) {
    interp.register_builtin("error", error_fn);
    interp.register_builtin("import", import_fn);
}

/// Constructs an `Error` value carrying `msg` (spec 4.A, 7). Errors are
/// ordinary data here, not a thrown exception — the caller decides what
/// to do with the result.
fn error_fn(interp: &mut Interpreter, args: &[Ref]) -> Ref {
    if args.len() != 1 {
        return arity_error(&mut interp.heap, "error", "1 argument", args.len());
    }
    let msg = match expect_string(&interp.heap, args[0]) {
        Some(bytes) => String::from_utf8_lossy(bytes).into_owned(),
        None => interp.heap.print(args[0]),
    };
    interp.heap.new_error(msg)
}

/// Reads `path` relative to the current working directory and evaluates
/// every top-level form in it against the root environment, so a
/// `define` inside the imported file becomes globally visible — this is
/// how `core.lisp`/`iteration.lisp` themselves load (SPEC_FULL §3).
/// A file that cannot be opened produces an import-kind `Error` value
/// rather than aborting the process (spec 7).
fn import_fn(interp: &mut Interpreter, args: &[Ref]) -> Ref {
    if args.len() != 1 {
        return arity_error(&mut interp.heap, "import", "1 argument", args.len());
    }
    let path = match expect_string(&interp.heap, args[0]) {
        Some(bytes) => String::from_utf8_lossy(bytes).into_owned(),
        None => return super::util::type_error(&mut interp.heap, "import", "a string", args[0]),
    };
    match std::fs::read_to_string(&path) {
        Ok(src) => {
            interp.read_eval(&src);
            interp.heap.new_nil()
        }
        Err(e) => interp
            .heap
            .new_error(format!("import error: cannot open '{path}': {e}")),
    }
}
