//! `stk report` - render a hand-off report for a sheet
//!
//! The report re-renders the contribution rows verbatim for traceability
//! and recomputes the figures fresh; it never trusts a stale stored
//! record. Output is unstyled so it can be written straight to a file.

use miette::{IntoDiagnostic, Result, WrapErr};
use std::fs;

use crate::cli::args::{GlobalOpts, OutputFormat, ReportArgs};
use crate::cli::helpers::{
    conclusion, contributions_table, format_cpk, format_magnitude, format_yield, tolerance_cell,
};
use crate::stackup::analysis::StackupResult;
use crate::stackup::sheet::StackupSheet;

pub fn run(args: ReportArgs, global: &GlobalOpts) -> Result<()> {
    let sheet = StackupSheet::load(&args.file)?;
    let result = sheet.analyze();

    let rendered = match global.format {
        OutputFormat::Md => render_markdown(&sheet, &result),
        OutputFormat::Csv => render_csv(&sheet)?,
        OutputFormat::Json => {
            let mut json = serde_json::to_string_pretty(&report_doc(&sheet, &result))
                .into_diagnostic()?;
            json.push('\n');
            json
        }
        OutputFormat::Yaml => {
            serde_yml::to_string(&report_doc(&sheet, &result)).into_diagnostic()?
        }
        _ => render_text(&sheet, &result),
    };

    match args.output {
        Some(ref path) => {
            fs::write(path, rendered)
                .into_diagnostic()
                .wrap_err_with(|| format!("writing {}", path.display()))?;
            println!("Report written to {}", path.display());
        }
        None => print!("{rendered}"),
    }

    Ok(())
}

/// Sheet plus freshly computed figures, for machine-readable output
fn report_doc(sheet: &StackupSheet, result: &StackupResult) -> serde_json::Value {
    serde_json::json!({
        "sheet": sheet,
        "result": result,
    })
}

fn render_text(sheet: &StackupSheet, result: &StackupResult) -> String {
    let mut out = String::new();
    let rule = "─".repeat(60);

    out.push_str(&rule);
    out.push('\n');
    out.push_str("Design Tolerance Stack-up Analysis\n");
    out.push_str(&rule);
    out.push('\n');
    out.push_str(&format!("Title:    {}\n", sheet.title));
    out.push_str(&format!("Project:  {}\n", sheet.project));
    out.push_str(&format!(
        "Date:     {} | Units: {} | Sheet: {}\n",
        sheet.date, sheet.units, sheet.id
    ));
    out.push_str(&format!(
        "Author:   {} | Revision: {}\n",
        sheet.author, sheet.revision
    ));
    out.push('\n');

    if sheet.contributions.is_empty() {
        out.push_str("No contribution rows.\n");
    } else {
        out.push_str("Contributions:\n");
        out.push_str(&contributions_table(sheet, false));
        out.push('\n');
    }
    if !result.excluded.is_empty() {
        out.push_str(&format!(
            "Note: {} row(s) had no usable tolerance and were excluded from the sums.\n",
            result.excluded.len()
        ));
    }
    out.push('\n');

    out.push_str("Results:\n");
    out.push_str(&format!(
        "  Worst Case: {}\n",
        format_magnitude(result.worst_case, &sheet.units)
    ));
    out.push_str(&format!(
        "  RSS Total:  {}\n",
        format_magnitude(result.rss_total, &sheet.units)
    ));
    out.push_str(&format!("  Est. Cpk:   {}\n", format_cpk(result.estimated_cpk)));
    out.push_str(&format!(
        "  Est. Yield: {}\n",
        format_yield(result.estimated_yield_percent)
    ));
    out.push('\n');

    out.push_str(&conclusion(sheet.target_spec_value(), &sheet.units, result));
    out.push('\n');
    out
}

fn render_markdown(sheet: &StackupSheet, result: &StackupResult) -> String {
    let mut out = String::new();

    out.push_str("# Design Tolerance Stack-up Analysis\n\n");
    out.push_str(&format!("**Title:** {}  \n", sheet.title));
    out.push_str(&format!("**Project:** {}  \n", sheet.project));
    out.push_str(&format!(
        "**Date:** {} | **Units:** {} | **Sheet:** {}  \n",
        sheet.date, sheet.units, sheet.id
    ));
    out.push_str(&format!(
        "**Author:** {} | **Revision:** {}\n\n",
        sheet.author, sheet.revision
    ));

    out.push_str("## Contributions\n\n");
    if sheet.contributions.is_empty() {
        out.push_str("No contribution rows.\n\n");
    } else {
        out.push_str(&contributions_table(sheet, true));
        out.push_str("\n\n");
    }
    if !result.excluded.is_empty() {
        out.push_str(&format!(
            "*{} row(s) had no usable tolerance and were excluded from the sums.*\n\n",
            result.excluded.len()
        ));
    }

    out.push_str("## Results\n\n");
    out.push_str(&format!(
        "- Worst Case: {}\n",
        format_magnitude(result.worst_case, &sheet.units)
    ));
    out.push_str(&format!(
        "- RSS Total: {}\n",
        format_magnitude(result.rss_total, &sheet.units)
    ));
    out.push_str(&format!("- Est. Cpk: {}\n", format_cpk(result.estimated_cpk)));
    out.push_str(&format!(
        "- Est. Yield: {}\n\n",
        format_yield(result.estimated_yield_percent)
    ));

    out.push_str(&conclusion(sheet.target_spec_value(), &sheet.units, result));
    out.push('\n');
    out
}

fn render_csv(sheet: &StackupSheet) -> Result<String> {
    let mut wtr = csv::Writer::from_writer(vec![]);
    wtr.write_record(["seq", "part", "description", "required_cpk", "tolerance"])
        .into_diagnostic()?;
    for row in &sheet.contributions {
        wtr.write_record([
            row.seq.clone(),
            row.part.clone(),
            row.description.clone(),
            row.required_cpk.map(|c| c.to_string()).unwrap_or_default(),
            tolerance_cell(row),
        ])
        .into_diagnostic()?;
    }
    let data = wtr.into_inner().map_err(|e| miette::miette!("{e}"))?;
    String::from_utf8(data).into_diagnostic()
}
