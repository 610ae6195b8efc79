// ABOUTME: CLI entry point — REPL, script execution, and the _test.lisp test-mode switch

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::Parser;
use gclisp::config;
use gclisp::error::InterpreterError;
use gclisp::interpreter::Interpreter;
use gclisp::test_runner;
use gclisp::value::Obj;
use rustyline::error::ReadlineError;
use rustyline::{Config, Editor};

/// A small Lisp with closures, unhygienic macros, and a mark-and-sweep
/// collector. With no file arguments, starts an interactive REPL; with one
/// or more file arguments, each is read and evaluated in order against one
/// shared root environment.
#[derive(Parser, Debug)]
#[command(name = "gclisp")]
#[command(version = config::VERSION)]
#[command(about = "A small Lisp interpreter with closures, macros, and GC")]
struct CliArgs {
    /// Source files to execute, in order. A file whose basename ends in
    /// `_test.lisp` runs in test mode instead of printing results.
    #[arg(value_name = "FILE")]
    scripts: Vec<PathBuf>,

    /// Skip loading the shipped core.lisp/iteration.lisp standard library.
    #[arg(long = "no-stdlib")]
    no_stdlib: bool,
}

fn main() -> ExitCode {
    let args = CliArgs::parse();

    let mut interp = Interpreter::new();
    if !args.no_stdlib {
        interp.load_stdlib();
    }

    if args.scripts.is_empty() {
        run_repl(&mut interp);
        return ExitCode::SUCCESS;
    }

    let mut any_test_failed = false;
    for path in &args.scripts {
        match run_file(&mut interp, path) {
            Ok(Some(summary)) => {
                println!("{}: {}", path.display(), summary.summary_line());
                if let Some(msg) = &summary.aborted_with_error {
                    eprintln!("{}: {msg}", path.display());
                }
                if !summary.all_passed() {
                    any_test_failed = true;
                }
            }
            Ok(None) => {}
            Err(e) => eprintln!("{e}"),
        }
    }

    if any_test_failed {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}

fn is_test_file(path: &Path) -> bool {
    path.file_name()
        .and_then(|n| n.to_str())
        .is_some_and(|n| n.ends_with("_test.lisp"))
}

/// Executes one file against `interp`'s shared root environment. Returns
/// `Some(summary)` for a `_test.lisp` file, `None` for an ordinary script
/// (whose non-nil top-level results are printed per spec §6).
fn run_file(
    interp: &mut Interpreter,
    path: &Path,
) -> Result<Option<test_runner::TestSummary>, InterpreterError> {
    let src = std::fs::read_to_string(path).map_err(|source| InterpreterError::ScriptUnreadable {
        path: path.to_path_buf(),
        source,
    })?;

    if is_test_file(path) {
        return Ok(Some(test_runner::run_test_file(interp, &src)));
    }

    for result in interp.read_eval(&src) {
        match interp.heap.get(result) {
            Obj::Nil => {}
            Obj::Error(msg) => eprintln!("{msg}"),
            _ => println!("{}", interp.heap.print(result)),
        }
    }
    Ok(None)
}

fn run_repl(interp: &mut Interpreter) {
    println!("{}", config::WELCOME);

    let rl_config = Config::builder().auto_add_history(true).build();
    let mut rl: Editor<(), rustyline::history::DefaultHistory> = match Editor::with_config(rl_config) {
        Ok(rl) => rl,
        Err(e) => {
            eprintln!("failed to initialize REPL: {e}");
            return;
        }
    };
    let _ = rl.load_history(config::HISTORY_FILE);

    loop {
        match rl.readline(config::PROMPT) {
            Ok(line) => {
                let trimmed = line.trim();
                if trimmed.is_empty() {
                    continue;
                }
                if trimmed == "(exit)" {
                    break;
                }
                for result in interp.read_eval(trimmed) {
                    match interp.heap.get(result) {
                        Obj::Nil => {}
                        Obj::Error(msg) => eprintln!("{msg}"),
                        _ => println!("{}", interp.heap.print(result)),
                    }
                }
            }
            Err(ReadlineError::Interrupted) => continue,
            Err(ReadlineError::Eof) => break,
            Err(e) => {
                eprintln!("{e}");
                break;
            }
        }
    }

    let _ = rl.save_history(config::HISTORY_FILE);
}
