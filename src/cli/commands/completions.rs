//! `stk completions` - shell completion scripts

use clap::CommandFactory;
use clap_complete::generate;
use miette::Result;
use std::io;

use crate::cli::args::{Cli, CompletionsArgs};

pub fn run(args: CompletionsArgs) -> Result<()> {
    let mut cmd = Cli::command();
    generate(args.shell, &mut cmd, "stk", &mut io::stdout());
    Ok(())
}
