// Copyright (c) 2021 James O. D. Hunt.
//
// SPDX-License-Identifier: Apache-2.0
//

use thiserror::Error;

/// The error type.
#[derive(Error, Debug, Clone, Eq, PartialEq)]
pub enum Error {
    //------------------------------
    // Pattern errors (programmer error)
    //------------------------------
    /// The pattern string could not be tokenized. The value is the
    /// original pattern string.
    #[error("parse error for Args: {0}")]
    Parse(String),

    /// A required slot was declared after an optional slot
    /// (`[name] <path>`).
    #[error("optional order")]
    OptionalOrder,

    /// Two slots share the same name (`<name> [name]`).
    #[error("duplicated name")]
    DuplicatedName,

    //------------------------------
    // Registration errors (programmer error)
    //------------------------------
    /// Two commands were registered with the same name.
    #[error("duplicated command: {0}")]
    DuplicatedCommand(String),

    /// No handler means nothing will happen.
    #[error("no handler specified")]
    NoHandler,

    //------------------------------
    // Runtime errors (user error)
    //------------------------------
    /// Fewer arguments were specified than there are required slots.
    #[error("insufficient args")]
    InsufficientArgs,

    /// User specified a command that was never registered.
    #[error("unknown command: {0}")]
    UnknownCommand(String),

    /// A handler tried to run its own command while still running.
    #[error("handler already running")]
    HandlerBusy,

    /// A handler failed.
    #[error("handler error: {0}")]
    HandlerError(String),

    /// Writing to the output sink failed.
    #[error("I/O error: {0}")]
    Io(String),
}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Self {
        Error::Io(e.to_string())
    }
}

/// Convenience type that allows a function to be defined as returning a
/// [Result], but which only requires the success type to be specified,
/// defaulting the error type to this crates `Error` type.
pub type Result<T, E = Error> = std::result::Result<T, E>;
