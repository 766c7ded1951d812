// Copyright (c) 2021 James O. D. Hunt.
//
// SPDX-License-Identifier: Apache-2.0
//

/// An example showing a program with several commands, each with its own
/// positional arguments.
use slotargs::{App, Command, Context, Handler, Result};

/// Records which command ran and what it was given.
#[derive(Clone, Debug, Default)]
struct Recorder {
    calls: Vec<String>,
}

impl Handler for &mut Recorder {
    fn handle(&mut self, ctx: Context) -> Result<()> {
        let values: Vec<String> = ctx
            .pattern()
            .slots()
            .iter()
            .map(|s| {
                let (value, present) = ctx.arg_for(&s.name);

                match present {
                    true => format!("{}={:?}", s.name, value),
                    false => format!("{}=<absent>", s.name),
                }
            })
            .collect();

        self.calls.push(values.join(", "));

        Ok(())
    }
}

fn main() -> Result<()> {
    env_logger::init();

    let mut copy = Recorder::default();
    let mut list = Recorder::default();

    let app = App::new("commands")
        .version("0.1.0")
        .summary("copy and list things")
        .command(
            Command::new("copy")
                .usage("copy a file")
                .args("<from> <to>")?
                .handler(Box::new(&mut copy)),
        )?
        .command(
            Command::new("list")
                .usage("list a directory")
                .args("[dir](default: .)")?
                .handler(Box::new(&mut list)),
        )?;

    let result = app.run();

    drop(app);

    println!("INFO: copy: {:?}", copy.calls);
    println!("INFO: list: {:?}", list.calls);

    result
}
