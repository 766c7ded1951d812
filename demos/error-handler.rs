// Copyright (c) 2021 James O. D. Hunt.
//
// SPDX-License-Identifier: Apache-2.0
//

/// An example showing how to return an error from the handler
use slotargs::{App, Command, Context, Error, Handler, Result};

/// The type we will use to handle the "check" command.
#[derive(Clone, Debug, Default)]
struct CheckHandler {}

impl Handler for &mut CheckHandler {
    /// The handler must return `Ok(())` on success, or one of the crates
    /// Error::* values on error. If the errors defined are not appropriate,
    /// use `Error::HandlerError(string)` to return a more specific error.
    fn handle(&mut self, ctx: Context) -> Result<()> {
        let (value, _) = ctx.arg_for("number");

        // Only accept even numbers.
        match value.parse::<i64>() {
            Ok(n) if n % 2 == 0 => Ok(()),
            Ok(n) => Err(Error::HandlerError(format!("{} is not even", n))),
            Err(e) => Err(Error::HandlerError(format!("{:?}: {}", value, e))),
        }
    }
}

fn main() -> Result<()> {
    env_logger::init();

    let mut handler = CheckHandler::default();

    let app = App::new("error-handler").command(
        Command::new("check")
            .usage("check a number is even")
            .args("<number>")?
            .handler(Box::new(&mut handler)),
    )?;

    app.run()
}
