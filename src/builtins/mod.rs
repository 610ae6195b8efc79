// ABOUTME: Built-in surface — registers every F-component primitive in the root frame

pub mod apply;
pub mod arithmetic;
pub mod comparison;
pub mod errors;
pub mod io;
pub mod lists;
pub mod macros;
pub mod types;
mod util;

use crate::interpreter::Interpreter;

/// Registers every builtin the shipped standard library (`core.lisp`,
/// `iteration.lisp`) needs to find pre-bound in the root frame, plus
/// `=`/`<`/`>`/`+`/`-`/`*`/`/` (spec 4.F). `nil`/`true`/`false` are bound
/// directly by `Interpreter::bootstrap`, not here.
pub fn register_all(interp: &mut Interpreter) {
    arithmetic::register(interp);
    comparison::register(interp);
    lists::register(interp);
    types::register(interp);
    io::register(interp);
    apply::register(interp);
    errors::register(interp);
    macros::register(interp);
}
