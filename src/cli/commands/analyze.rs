//! `stk analyze` - run the stack-up calculation on a sheet
//!
//! Loads the sheet, computes the four figures, prints them, and (unless
//! `--no-save`) writes the analysis record back into the sheet file.

use chrono::Utc;
use console::style;
use miette::{IntoDiagnostic, Result, WrapErr};
use std::fs;

use crate::cli::args::{AnalyzeArgs, GlobalOpts, OutputFormat};
use crate::cli::helpers::{
    conclusion, format_cpk, format_magnitude, format_yield, tolerance_cell,
};
use crate::stackup::analysis::StackupResult;
use crate::stackup::sheet::{AnalysisRecord, StackupSheet};

pub fn run(args: AnalyzeArgs, global: &GlobalOpts) -> Result<()> {
    let mut sheet = StackupSheet::load(&args.file)?;
    let result = sheet.analyze();

    match global.format {
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&result).into_diagnostic()?;
            println!("{json}");
        }
        OutputFormat::Yaml => {
            let yaml = serde_yml::to_string(&result).into_diagnostic()?;
            print!("{yaml}");
        }
        OutputFormat::Csv => print_rows_csv(&sheet, &result)?,
        _ => print_summary(&sheet, &result),
    }

    if !args.no_save {
        sheet.analysis = Some(AnalysisRecord::from_result(&result, Utc::now()));
        let yaml = serde_yml::to_string(&sheet).into_diagnostic()?;
        fs::write(&args.file, yaml)
            .into_diagnostic()
            .wrap_err_with(|| format!("writing {}", args.file.display()))?;
    }

    Ok(())
}

fn print_summary(sheet: &StackupSheet, result: &StackupResult) {
    println!(
        "{} Analyzing {} with {} row(s)...",
        style("⚙").cyan(),
        style(&sheet.title).cyan(),
        sheet.contributions.len()
    );

    for &i in &result.excluded {
        let row = &sheet.contributions[i];
        let label = if row.seq.is_empty() {
            format!("#{}", i + 1)
        } else {
            row.seq.clone()
        };
        let cell = tolerance_cell(row);
        let cell = if cell.is_empty() {
            "(blank)".to_string()
        } else {
            format!("'{cell}'")
        };
        println!(
            "{} Row {} ({}) excluded: tolerance {} is not a usable number",
            style("!").yellow(),
            style(label).yellow(),
            row.part,
            cell
        );
    }

    if sheet.contributions.is_empty() {
        println!(
            "{}",
            style("Sheet has no contribution rows; all figures are zero.").dim()
        );
    }

    println!(
        "{} Analysis complete for {}",
        style("✓").green(),
        style(&sheet.title).cyan()
    );

    println!();
    println!(
        "   Worst Case: {}",
        format_magnitude(result.worst_case, &sheet.units)
    );
    println!(
        "   RSS Total:  {}",
        format_magnitude(result.rss_total, &sheet.units)
    );
    println!("   Est. Cpk:   {}", format_cpk(result.estimated_cpk));
    println!(
        "   Est. Yield: {}",
        format_yield(result.estimated_yield_percent)
    );

    println!();
    println!(
        "{}",
        conclusion(sheet.target_spec_value(), &sheet.units, result)
    );
}

/// Row-by-row CSV with an included/excluded status column
fn print_rows_csv(sheet: &StackupSheet, result: &StackupResult) -> Result<()> {
    let mut wtr = csv::Writer::from_writer(vec![]);
    wtr.write_record([
        "seq",
        "part",
        "description",
        "required_cpk",
        "tolerance",
        "status",
    ])
    .into_diagnostic()?;

    for (i, row) in sheet.contributions.iter().enumerate() {
        let status = if result.excluded.contains(&i) {
            "excluded"
        } else {
            "included"
        };
        wtr.write_record([
            row.seq.clone(),
            row.part.clone(),
            row.description.clone(),
            row.required_cpk.map(|c| c.to_string()).unwrap_or_default(),
            tolerance_cell(row),
            status.to_string(),
        ])
        .into_diagnostic()?;
    }

    let data = wtr.into_inner().map_err(|e| miette::miette!("{e}"))?;
    print!("{}", String::from_utf8(data).into_diagnostic()?);
    Ok(())
}
