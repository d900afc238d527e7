//! `stk show` - render a stackup sheet

use console::style;
use miette::{IntoDiagnostic, Result, WrapErr};
use std::fs;

use crate::cli::args::{GlobalOpts, OutputFormat, ShowArgs};
use crate::cli::helpers::{
    contributions_table, format_cpk, format_magnitude, format_yield,
};
use crate::stackup::sheet::StackupSheet;
use crate::yaml::parse_yaml;

pub fn run(args: ShowArgs, global: &GlobalOpts) -> Result<()> {
    let content = fs::read_to_string(&args.file)
        .into_diagnostic()
        .wrap_err_with(|| format!("reading {}", args.file.display()))?;
    let sheet: StackupSheet = parse_yaml(&content, &args.file.display().to_string())?;

    match global.format {
        OutputFormat::Yaml => {
            // The document itself, as written
            print!("{content}");
        }
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&sheet).into_diagnostic()?;
            println!("{json}");
        }
        _ => print_pretty(&sheet, global.format == OutputFormat::Md),
    }

    Ok(())
}

fn print_pretty(sheet: &StackupSheet, markdown: bool) {
    println!("{}", style("─".repeat(60)).dim());
    println!(
        "{}: {}",
        style("ID").bold(),
        style(sheet.id.to_string()).cyan()
    );
    println!("{}: {}", style("Title").bold(), style(&sheet.title).yellow());
    println!("{}: {}", style("Project").bold(), sheet.project);
    println!(
        "{}: {} | {}: {}",
        style("Date").bold(),
        sheet.date,
        style("Units").bold(),
        sheet.units
    );
    println!("{}", style("─".repeat(60)).dim());

    println!();
    if sheet.contributions.is_empty() {
        println!("{}", style("No contribution rows.").dim());
    } else {
        println!(
            "{} ({}):",
            style("Contributions").bold(),
            sheet.contributions.len()
        );
        println!("{}", contributions_table(sheet, markdown));
    }

    println!();
    println!(
        "{}: {}",
        style("Target").bold(),
        format_magnitude(sheet.target_spec_value(), &sheet.units)
    );

    if let Some(ref analysis) = sheet.analysis {
        println!();
        println!(
            "{} ({}):",
            style("Analysis").bold(),
            analysis.analyzed_at.format("%Y-%m-%d %H:%M UTC")
        );
        println!(
            "  Worst Case: {}",
            format_magnitude(analysis.worst_case, &sheet.units)
        );
        println!(
            "  RSS Total:  {}",
            format_magnitude(analysis.rss_total, &sheet.units)
        );
        println!("  Est. Cpk:   {}", format_cpk(analysis.estimated_cpk));
        println!(
            "  Est. Yield: {}",
            format_yield(analysis.estimated_yield_percent)
        );
        if !analysis.excluded_rows.is_empty() {
            println!(
                "  {} {} row(s) were excluded from the sums",
                style("!").yellow(),
                analysis.excluded_rows.len()
            );
        }
    }

    if !sheet.tags.is_empty() {
        println!();
        println!("{}: {}", style("Tags").bold(), sheet.tags.join(", "));
    }

    println!("{}", style("─".repeat(60)).dim());
    println!(
        "{}: {} | {}: {} | {}: {}",
        style("Author").dim(),
        sheet.author,
        style("Created").dim(),
        sheet.created.format("%Y-%m-%d %H:%M"),
        style("Revision").dim(),
        sheet.revision
    );
}
