//! `stk edit` - open a sheet in the configured editor

use console::style;
use miette::{IntoDiagnostic, Result};

use crate::cli::args::EditArgs;
use crate::core::Config;

pub fn run(args: EditArgs) -> Result<()> {
    if !args.file.exists() {
        return Err(miette::miette!(
            "No such sheet file: {}",
            args.file.display()
        ));
    }

    let config = Config::load();
    println!(
        "Opening {} in {}...",
        style(args.file.display()).cyan(),
        style(config.editor()).yellow()
    );
    config.run_editor(&args.file).into_diagnostic()
}
