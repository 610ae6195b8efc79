// ABOUTME: Crate-wide constants — version banner, GC tuning, REPL history file

/// Printed by the REPL on startup.
pub const WELCOME: &str = "gclisp — a small Lisp with closures, macros, and a mark-sweep collector";

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Matches the growth factor in `gc::maybe_collect`; kept here too so the
/// REPL's `(gc-stats)` style diagnostics (if ever added) read from one
/// source of truth rather than a second hardcoded constant.
pub const GC_GROWTH_FACTOR: f64 = 1.25;

pub const HISTORY_FILE: &str = ".gclisp_history";

pub const PROMPT: &str = "> ";

pub const STDLIB_CORE: &str = include_str!("stdlib/core.lisp");
pub const STDLIB_ITERATION: &str = include_str!("stdlib/iteration.lisp");
