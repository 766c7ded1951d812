// Copyright (c) 2021 James O. D. Hunt.
//
// SPDX-License-Identifier: Apache-2.0
//

#![deny(missing_docs)]
#![forbid(unsafe_code)]

//! Simple crate for matching positional command-line arguments against a
//! declarative pattern.
//!
//! ---
//!
//! Table of contents:
//!
//! * [Overview](#overview)
//! * [Quickstart](#quickstart)
//! * [Pattern syntax](#pattern-syntax)
//! * [Matching rules](#matching-rules)
//! * [Errors](#errors)
//! * [Logging](#logging)
//! * [Limitations](#limitations)
//!
//! ---
//!
//! # Overview
//!
//! A command declares the positional arguments it accepts with a compact
//! pattern such as `"<id> [path] [name]"`. The pattern is validated once,
//! when the command is registered. Each time the command runs, the
//! arguments are matched against the pattern and the handler can look up
//! the values by name.
//!
//! The matcher can be used on its own:
//!
//! ```rust
//! use slotargs::{validate, Result};
//!
//! fn main() -> Result<()> {
//!     let pattern = validate("<id> [path] [name]")?;
//!
//!     let args = vec!["1234".to_string(), "/tmp".to_string()];
//!
//!     let ctx = pattern.match_args(args)?;
//!
//!     assert_eq!(ctx.arg_for("id"), ("1234", true));
//!     assert_eq!(ctx.arg_for("path"), ("/tmp", true));
//!     assert_eq!(ctx.arg_for("name"), ("", false));
//!
//!     Ok(())
//! }
//! ```
//!
//! # Quickstart
//!
//! 1. Create a `struct` type to represent the handler for a command and
//!    implement the [Handler] trait for it.
//!
//!    ```rust
//!    use slotargs::{Context, Handler, Result};
//!
//!    #[derive(Clone, Debug, Default)]
//!    struct HiHandler {
//!        path: String,
//!    }
//!
//!    impl Handler for &mut HiHandler {
//!        fn handle(&mut self, ctx: Context) -> Result<()> {
//!            self.path = ctx.arg_for("path").0.into();
//!
//!            Ok(())
//!        }
//!    }
//!    ```
//!
//! 1. Create a [Command] with a pattern and the handler, register it with
//!    an [App] and run it:
//!
//!    ```rust
//!    # use slotargs::{App, Command, Context, Handler, Result};
//!    #
//!    # #[derive(Clone, Debug, Default)]
//!    # struct HiHandler {
//!    #     path: String,
//!    # }
//!    #
//!    # impl Handler for &mut HiHandler {
//!    #     fn handle(&mut self, ctx: Context) -> Result<()> {
//!    #         self.path = ctx.arg_for("path").0.into();
//!    #
//!    #         Ok(())
//!    #     }
//!    # }
//!    #
//!    # fn main() -> Result<()> {
//!    let mut handler = HiHandler::default();
//!
//!    let hi = Command::new("hi")
//!        .usage("say hello")
//!        .args("<path> [name]")?
//!        .handler(Box::new(&mut handler));
//!
//!    let app = App::new("my app").command(hi)?;
//!
//!    app.run_with_args(vec!["hi".into(), "/tmp".into()])?;
//!
//!    // Release the borrow of the handler.
//!    drop(app);
//!
//!    assert_eq!(handler.path, "/tmp");
//!    # Ok(())
//!    # }
//!    ```
//!
//! For further examples, try out the programs in the `demos/` directory:
//!
//! ```bash
//! $ cargo run --example positional-only -- 1234 /tmp
//! $ cargo run --example commands -- copy a.txt b.txt
//! $ cargo run --example error-handler -- check 42
//! ```
//!
//! # Pattern syntax
//!
//! A pattern is a whitespace separated list of tokens:
//!
//! - `<name>`: a required slot.
//! - `[name]`: an optional slot.
//! - Anything after the closing bracket (`[path](optional)`) and any token
//!   without brackets (`...`) is an annotation for the reader and is
//!   ignored.
//!
//! A pattern is rejected if:
//!
//! - a token is malformed (`<name`, `<>`, `a<b>`): [Error::Parse];
//! - a required slot follows an optional one (`[name] <path>`):
//!   [Error::OptionalOrder];
//! - two slots share a name (`<name> [name]`): [Error::DuplicatedName].
//!
//! The empty pattern is valid and declares no slots.
//!
//! # Matching rules
//!
//! - There must be at least as many arguments as required slots,
//!   otherwise [Error::InsufficientArgs] is returned and the handler is not
//!   called.
//! - Slots are filled strictly left to right: the slot at position `i`
//!   takes argument `i`.
//! - An empty string is a valid argument: the slot is _present_ with an
//!   empty value. A slot with no argument is _absent_.
//! - Extra arguments are allowed. They are not bound to any slot but can
//!   be accessed with `ctx.args().get(i)`.
//!
//! [Context::arg_for()] returns `("", false)` for both an absent optional
//! slot and a name that was never declared. Use [Context::is_declared()] if
//! the difference matters.
//!
//! # Errors
//!
//! All functions return this crate's [Result] type. The [Error] display
//! strings are stable:
//!
//! ```text
//! parse error for Args: <pattern>
//! optional order
//! duplicated name
//! insufficient args
//! ```
//!
//! # Logging
//!
//! The crate logs through the [`log`](https://crates.io/crates/log) facade
//! (`debug` and `trace` levels). Install any logger in your program to see
//! the records.
//!
//! # Limitations
//!
//! - Options (`-v`, `--foo bar`) are not parsed. Remove them before calling
//!   [App::run_with_args()], for example with the
//!   [`ap`](https://crates.io/crates/ap) crate.
//! - A slot cannot be variadic: use the raw arguments for the tail.
//! - A middle optional slot cannot be skipped.

mod app;
mod context;
mod error;
mod pattern;

pub use error::{Error, Result};

pub use app::{get_args, App, Command, Handler, Settings};
pub use context::{Binding, Context, RawArgs};
pub use pattern::{validate, Pattern, Slot};
