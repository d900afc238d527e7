use clap::Parser;
use miette::Result;
use stk::cli::{Cli, Commands};

fn main() -> Result<()> {
    // Install miette's fancy error handler for beautiful diagnostics
    miette::set_hook(Box::new(|_| {
        Box::new(
            miette::MietteHandlerOpts::new()
                .terminal_links(true)
                .unicode(true)
                .context_lines(2)
                .tab_width(4)
                .build(),
        )
    }))?;

    let cli = Cli::parse();

    match cli.command {
        Commands::New(args) => stk::cli::commands::new::run(args, &cli.global),
        Commands::Show(args) => stk::cli::commands::show::run(args, &cli.global),
        Commands::Edit(args) => stk::cli::commands::edit::run(args),
        Commands::Analyze(args) => stk::cli::commands::analyze::run(args, &cli.global),
        Commands::Report(args) => stk::cli::commands::report::run(args, &cli.global),
        Commands::List(args) => stk::cli::commands::list::run(args, &cli.global),
        Commands::Completions(args) => stk::cli::commands::completions::run(args),
    }
}
