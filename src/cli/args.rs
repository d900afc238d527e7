//! CLI argument definitions

use clap::{Parser, Subcommand, ValueEnum};
use clap_complete::Shell;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "stk",
    version,
    about = "Tolerance stack-up analysis over plain-text stackup sheets"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[command(flatten)]
    pub global: GlobalOpts,
}

#[derive(clap::Args, Debug)]
pub struct GlobalOpts {
    /// Output format
    #[arg(long, short = 'f', global = true, default_value = "auto")]
    pub format: OutputFormat,
}

/// Output format selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Styled text for terminals
    Auto,
    /// Plain table output
    Table,
    /// JSON
    Json,
    /// YAML
    Yaml,
    /// Markdown
    Md,
    /// CSV
    Csv,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Create a new stackup sheet
    New(NewArgs),

    /// Show a sheet: metadata, rows, and any stored analysis
    Show(ShowArgs),

    /// Open a sheet in your editor
    Edit(EditArgs),

    /// Run the stack-up analysis and record the figures in the sheet
    Analyze(AnalyzeArgs),

    /// Render a full report for hand-off
    Report(ReportArgs),

    /// List stackup sheets under a directory
    List(ListArgs),

    /// Generate shell completion scripts
    Completions(CompletionsArgs),
}

#[derive(clap::Args, Debug)]
pub struct NewArgs {
    /// Analysis title
    #[arg(long, short = 't')]
    pub title: Option<String>,

    /// Project name/code
    #[arg(long, short = 'p')]
    pub project: Option<String>,

    /// Linear units label for the sheet
    #[arg(long, short = 'u')]
    pub units: Option<String>,

    /// Report date (free text, YYYY/MM/DD by convention)
    #[arg(long)]
    pub date: Option<String>,

    /// Target specification (± limit)
    #[arg(long)]
    pub target: Option<f64>,

    /// Author name recorded in the sheet
    #[arg(long, env = "STK_AUTHOR")]
    pub author: Option<String>,

    /// Seed the sheet with the worked connector example
    #[arg(long)]
    pub example: bool,

    /// Output file or directory (default: ./<ID>.stk.yaml)
    #[arg(long, short = 'o')]
    pub output: Option<PathBuf>,

    /// Open the new sheet in your editor
    #[arg(long, conflicts_with = "no_edit")]
    pub edit: bool,

    /// Do not open an editor (the default; kept for script symmetry)
    #[arg(long)]
    pub no_edit: bool,

    /// Prompt for the sheet fields interactively
    #[arg(long, short = 'i')]
    pub interactive: bool,
}

#[derive(clap::Args, Debug)]
pub struct ShowArgs {
    /// Sheet file to show
    pub file: PathBuf,
}

#[derive(clap::Args, Debug)]
pub struct EditArgs {
    /// Sheet file to edit
    pub file: PathBuf,
}

#[derive(clap::Args, Debug)]
pub struct AnalyzeArgs {
    /// Sheet file to analyze
    pub file: PathBuf,

    /// Do not write the analysis record back into the sheet
    #[arg(long)]
    pub no_save: bool,
}

#[derive(clap::Args, Debug)]
pub struct ReportArgs {
    /// Sheet file to report on
    pub file: PathBuf,

    /// Write the report to a file instead of stdout
    #[arg(long, short = 'o')]
    pub output: Option<PathBuf>,
}

#[derive(clap::Args, Debug)]
pub struct ListArgs {
    /// Directory to scan (default: current directory)
    pub dir: Option<PathBuf>,
}

#[derive(clap::Args, Debug)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    pub shell: Shell,
}
