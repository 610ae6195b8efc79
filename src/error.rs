// ABOUTME: Host-level errors — conditions the embedding program must react to in Rust

use std::path::PathBuf;

use thiserror::Error;

/// Errors that cross the boundary out of the Lisp value system entirely.
/// Everything a Lisp program itself can observe is an `Error` value (see
/// `value::Obj::Error`) and never reaches this type.
#[derive(Debug, Error)]
pub enum InterpreterError {
    #[error("could not read script '{path}': {source}")]
    ScriptUnreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("heap allocation failed")]
    OutOfMemory,
}
