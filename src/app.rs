// Copyright (c) 2021 James O. D. Hunt.
//
// SPDX-License-Identifier: Apache-2.0
//

use std::cell::RefCell;
use std::env;
use std::fmt;
use std::io::Write;
use std::rc::Rc;

use log::{debug, warn};

use crate::context::Context;
use crate::error::{Error, Result};
use crate::pattern::{validate, Pattern};

const USAGE_PREFIX_SPACES: &str = "    ";

/// Prefix for the usage line of a command.
const COMMAND_USAGE_PREFIX: &str = "command";

/// Trait that a command handler must implement.
pub trait Handler {
    /// Function called with the matched arguments when a command runs.
    ///
    /// Since the handler is provided with a mutable reference to itself,
    /// it can store and modify its state when called.
    ///
    /// # Parameters
    ///
    /// `ctx` - The [Context] holding the arguments bound to the
    ///         command's slots.
    ///
    /// # Return value
    //
    /// - If the handler logic succeeds, return `Ok(())`.
    /// - If the handler needs to fail, it should return one of the [Error]
    ///   values. If the main errors are not appropriate, make the handler
    ///   return [Error::HandlerError].
    ///
    /// # Notes
    ///
    /// The handler is never called if the arguments do not match the
    /// command's pattern.
    fn handle(&mut self, ctx: Context) -> Result<()>;
}

impl<'a> fmt::Debug for dyn Handler + 'a {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Handler: {:p}", self)
    }
}

type SharedHandler<'a> = Rc<RefCell<Box<dyn Handler + 'a>>>;

/// Where usage and help text is written.
#[derive(Clone)]
struct Output<'a>(Rc<RefCell<Box<dyn Write + 'a>>>);

impl<'a> fmt::Debug for Output<'a> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Output: {:p}", self.0)
    }
}

/// Settings used to control the dispatch behaviour.
#[derive(Clone, Copy, Debug, Eq, Ord, PartialOrd, Default, PartialEq)]
pub struct Settings {
    /// If set, don't write a usage statement when a command is run
    /// with insufficient arguments (the error is still returned).
    quiet: bool,
}

impl Settings {
    /// Create a new settings object.
    pub fn new() -> Self {
        Settings::default()
    }

    /// Specify that no usage statement should be written on error.
    pub fn quiet(self) -> Self {
        Settings { quiet: true }
    }
}

/// Get a list of all command-line arguments specified to the program with
/// the program name (the first argument) removed.
///
/// # Note
///
/// Used with [App::run_with_args()]. However, this isn't usually
/// required: just call [App::run()].
pub fn get_args() -> Vec<String> {
    env::args().skip(1).collect()
}

/// A named command with a positional argument pattern and a handler.
#[derive(Clone, Debug, Default)]
pub struct Command<'a> {
    name: String,
    usage: String,
    pattern: Pattern,
    handler: Option<SharedHandler<'a>>,
}

impl<'a> Command<'a> {
    /// Create a new command that accepts no positional arguments.
    pub fn new(name: &str) -> Self {
        Command {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Specify a one line description of the command.
    pub fn usage(self, usage: &str) -> Self {
        Command {
            usage: usage.into(),
            ..self
        }
    }

    /// Specify the positional arguments the command accepts, for example
    /// `"<id> [path] [name]"`.
    ///
    /// The pattern is validated immediately: see [validate()].
    pub fn args(self, pattern: &str) -> Result<Self> {
        let pattern = validate(pattern)?;

        Ok(Command { pattern, ..self })
    }

    /// Specify the handler for the command which must implement the
    /// [Handler] trait.
    ///
    /// # Note
    ///
    /// If the handler needs to modify its own state when called,
    /// the specified boxed trait must provide a mutable reference.
    pub fn handler(self, boxed_handler: Box<dyn Handler + 'a>) -> Self {
        Command {
            handler: Some(Rc::new(RefCell::new(boxed_handler))),
            ..self
        }
    }

    /// Name of the command.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The validated argument pattern.
    pub fn pattern(&self) -> &Pattern {
        &self.pattern
    }

    fn usage_line(&self) -> String {
        format!("{} {}", self.name, self.pattern.source().trim())
            .trim_end()
            .to_string()
    }
}

/// The main object used to represent the program.
///
/// An application either has its own handler and pattern (for programs
/// without sub-commands), or a list of [Command]s selected by the first
/// argument, or both.
#[derive(Clone, Default, Debug)]
pub struct App<'a> {
    name: String,
    version: String,
    summary: String,
    settings: Settings,
    pattern: Pattern,
    handler: Option<SharedHandler<'a>>,
    commands: Vec<Command<'a>>,
    output: Option<Output<'a>>,
}

impl<'a> App<'a> {
    /// Create a new application object.
    pub fn new(name: &str) -> Self {
        App {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Specify the version of the program.
    pub fn version(self, version: &str) -> Self {
        App {
            version: version.into(),
            ..self
        }
    }

    /// Specify brief explanatory text for the program.
    pub fn summary(self, summary: &str) -> Self {
        App {
            summary: summary.into(),
            ..self
        }
    }

    /// Specify any settings for the program.
    pub fn settings(self, settings: Settings) -> Self {
        App { settings, ..self }
    }

    /// Don't write a usage statement when arguments are missing.
    ///
    /// # Note
    ///
    /// This is an alternative to calling the `settings()` method.
    pub fn quiet(self) -> Self {
        App {
            settings: self.settings.quiet(),
            ..self
        }
    }

    /// Specify where usage and help text is written (stdout by default).
    pub fn output(self, writer: Box<dyn Write + 'a>) -> Self {
        App {
            output: Some(Output(Rc::new(RefCell::new(writer)))),
            ..self
        }
    }

    /// Specify the positional arguments the program accepts when it is
    /// not run with a command.
    ///
    /// The pattern is validated immediately: see [validate()].
    pub fn args(self, pattern: &str) -> Result<Self> {
        let pattern = validate(pattern)?;

        Ok(App { pattern, ..self })
    }

    /// Specify the handler used when the program is not run with a command.
    pub fn handler(self, boxed_handler: Box<dyn Handler + 'a>) -> Self {
        App {
            handler: Some(Rc::new(RefCell::new(boxed_handler))),
            ..self
        }
    }

    /// Register a command.
    ///
    /// # Errors
    ///
    /// [Error::DuplicatedCommand] if a command with the same name has
    /// already been registered.
    pub fn command(mut self, command: Command<'a>) -> Result<Self> {
        if self.find_command(&command.name).is_some() {
            return Err(Error::DuplicatedCommand(command.name));
        }

        debug!(
            "registered command {:?} with pattern {:?}",
            command.name,
            command.pattern.source()
        );

        self.commands.push(command);

        Ok(self)
    }

    fn find_command(&self, name: &str) -> Option<&Command<'a>> {
        self.commands.iter().find(|c| c.name == name)
    }

    fn display_name(&self) -> String {
        if self.name.is_empty() {
            env::args().next().unwrap_or_default()
        } else {
            self.name.clone()
        }
    }

    fn app_usage_line(&self) -> String {
        format!("{} {}", self.display_name(), self.pattern.source().trim())
            .trim_end()
            .to_string()
    }

    /// Generate a help statement from the registered commands.
    pub fn generate_help<W>(&self, writer: &mut W) -> Result<()>
    where
        W: Write,
    {
        let mut lines = Vec::<String>::new();

        let line = format!("NAME:\n{}{}\n", USAGE_PREFIX_SPACES, self.display_name());
        lines.push(line);

        if !self.version.is_empty() {
            let line = format!("VERSION:\n{}{}\n", USAGE_PREFIX_SPACES, self.version);
            lines.push(line);
        }

        if !self.summary.is_empty() {
            let line = format!("SUMMARY:\n{}{}\n", USAGE_PREFIX_SPACES, self.summary.trim());
            lines.push(line);
        }

        lines.push("USAGE:".into());

        if self.handler.is_some() {
            lines.push(format!("{}{}", USAGE_PREFIX_SPACES, self.app_usage_line()));
        }

        if !self.commands.is_empty() {
            lines.push(format!(
                "{}{} <command> [ARGUMENT..]",
                USAGE_PREFIX_SPACES,
                self.display_name()
            ));

            lines.push("\nCOMMANDS:".into());

            for command in self.commands.iter() {
                let line = match command.usage.is_empty() {
                    true => format!("{}{}", USAGE_PREFIX_SPACES, command.usage_line()),
                    false => format!(
                        "{}{} # {}",
                        USAGE_PREFIX_SPACES,
                        command.usage_line(),
                        command.usage.trim()
                    ),
                };

                lines.push(line);
            }
        }

        // Join all the lines together, remove white space at either and and
        // finally append a single newline.
        let mut final_lines = lines.join("\n").trim().to_string();
        final_lines.push('\n');

        write!(writer, "{}", final_lines)?;

        Ok(())
    }

    fn write_output(&self, text: &str) -> Result<()> {
        match &self.output {
            Some(output) => output.0.borrow_mut().write_all(text.as_bytes())?,
            None => std::io::stdout().write_all(text.as_bytes())?,
        }

        Ok(())
    }

    fn write_usage(&self, description: &str, usage_line: &str) -> Result<()> {
        let mut lines = Vec::<String>::new();

        let name = match description.is_empty() {
            true => self.display_name(),
            false => format!("{} - {}", self.display_name(), description.trim()),
        };

        lines.push(format!("NAME:\n{}{}\n", USAGE_PREFIX_SPACES, name));
        lines.push(format!("USAGE:\n{}{}\n", USAGE_PREFIX_SPACES, usage_line));

        self.write_output(&lines.join("\n"))
    }

    /// Match `args` against `pattern` and call the handler.
    fn invoke(
        &self,
        pattern: &Pattern,
        handler: Option<&SharedHandler<'a>>,
        args: Vec<String>,
        description: &str,
        usage_line: &str,
    ) -> Result<()> {
        let handler = handler.ok_or(Error::NoHandler)?;

        let ctx = match pattern.match_args(args) {
            Ok(ctx) => ctx,
            Err(e) => {
                if e == Error::InsufficientArgs && !self.settings.quiet {
                    if let Err(write_err) = self.write_usage(description, usage_line) {
                        warn!("failed to write usage: {}", write_err);
                    }
                }

                return Err(e);
            }
        };

        // Fails if the handler re-runs its own command.
        let mut handler = handler.try_borrow_mut().map_err(|_| Error::HandlerBusy)?;

        handler.handle(ctx)
    }

    /// Run the program with a set of command line arguments (without the
    /// program name).
    ///
    /// # Arguments
    ///
    /// - `cli_args`: Vector of positional arguments. Flags must already have
    ///    been removed. Specify your own, or call [get_args()].
    ///
    /// # Behaviour
    ///
    /// - If the first argument names a registered [Command], the remaining
    ///   arguments are matched against that command's pattern.
    /// - Otherwise, if a handler was specified for the app, all the
    ///   arguments are matched against the app's pattern.
    /// - Otherwise, if no arguments were specified, a help statement is
    ///   written.
    pub fn run_with_args(&self, cli_args: Vec<String>) -> Result<()> {
        if let Some(command) = cli_args.first().and_then(|n| self.find_command(n)) {
            debug!("running command {:?}", command.name);

            let args = cli_args[1..].to_vec();

            let usage_line = format!("{} {}", COMMAND_USAGE_PREFIX, command.usage_line());

            return self.invoke(
                &command.pattern,
                command.handler.as_ref(),
                args,
                &command.usage,
                &usage_line,
            );
        }

        if self.handler.is_some() {
            debug!("running app {:?}", self.name);

            return self.invoke(
                &self.pattern,
                self.handler.as_ref(),
                cli_args,
                &self.summary,
                &self.app_usage_line(),
            );
        }

        match cli_args.first() {
            None => {
                let mut buf = Vec::<u8>::new();

                self.generate_help(&mut buf)?;

                self.write_output(&String::from_utf8_lossy(&buf))
            }
            Some(name) => Err(Error::UnknownCommand(name.clone())),
        }
    }

    /// Simplest interface to the dispatcher.
    pub fn run(&self) -> Result<()> {
        let args = get_args();

        self.run_with_args(args)
    }
}
