// Copyright (c) 2021 James O. D. Hunt.
//
// SPDX-License-Identifier: Apache-2.0
//

/// An example showing a program without commands that accepts one required
/// and two optional positional arguments.
use slotargs::{App, Context, Handler, Result};

#[derive(Clone, Debug, Default)]
struct MyHandler {
    id: String,
    path: Option<String>,
    name: Option<String>,
    extra: Vec<String>,
}

impl Handler for &mut MyHandler {
    fn handle(&mut self, ctx: Context) -> Result<()> {
        println!("INFO: MyHandler: ctx: {:?}", ctx);

        self.id = ctx.arg_for("id").0.into();
        self.path = ctx.value_of("path").map(String::from);
        self.name = ctx.value_of("name").map(String::from);

        // Anything after the declared slots
        self.extra = ctx.args().iter().skip(ctx.pattern().len()).cloned().collect();

        Ok(())
    }
}

fn main() -> Result<()> {
    env_logger::init();

    let mut handler = MyHandler::default();

    let app = App::new("positional-only")
        .summary("show how positional arguments are bound")
        .args("<id> [path] [name] ...")?
        .handler(Box::new(&mut handler));

    let result = app.run();

    // XXX: essential!
    drop(app);

    println!("INFO: Final value of handler: {:?}", handler);

    result
}
