//! `stk list` - find stackup sheets under a directory
//!
//! Walks the tree for `*.stk.yaml` files and tabulates each sheet with
//! its stored results when an analysis record is present. The sheets are
//! plain files; there is no index to refresh, every run re-reads them.

use console::style;
use miette::{IntoDiagnostic, Result};
use serde::Serialize;
use std::path::PathBuf;
use tabled::builder::Builder;
use tabled::settings::Style;
use walkdir::WalkDir;

use crate::cli::args::{GlobalOpts, ListArgs, OutputFormat};
use crate::cli::helpers::{format_cpk, format_yield, truncate_str};
use crate::stackup::sheet::StackupSheet;

/// One sheet as it appears in list output
#[derive(Debug, Serialize)]
struct SheetEntry {
    path: String,
    id: String,
    title: String,
    project: String,
    rows: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    worst_case: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    rss_total: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    estimated_cpk: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    estimated_yield_percent: Option<f64>,
}

pub fn run(args: ListArgs, global: &GlobalOpts) -> Result<()> {
    let dir = args.dir.unwrap_or_else(|| PathBuf::from("."));

    let mut entries = Vec::new();
    let mut skipped = 0usize;
    for entry in WalkDir::new(&dir)
        .into_iter()
        .filter_entry(|e| {
            let name = e.file_name().to_string_lossy();
            !name.starts_with('.') || e.depth() == 0
        })
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
    {
        let path = entry.path();
        if !path.to_string_lossy().ends_with(".stk.yaml") {
            continue;
        }
        match StackupSheet::load(path) {
            Ok(sheet) => entries.push(SheetEntry {
                path: path.display().to_string(),
                id: sheet.id.to_string(),
                title: sheet.title.clone(),
                project: sheet.project.clone(),
                rows: sheet.contributions.len(),
                worst_case: sheet.analysis.as_ref().map(|a| a.worst_case),
                rss_total: sheet.analysis.as_ref().map(|a| a.rss_total),
                estimated_cpk: sheet.analysis.as_ref().map(|a| a.estimated_cpk),
                estimated_yield_percent: sheet
                    .analysis
                    .as_ref()
                    .map(|a| a.estimated_yield_percent),
            }),
            Err(_) => skipped += 1,
        }
    }
    entries.sort_by(|a, b| a.path.cmp(&b.path));

    match global.format {
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&entries).into_diagnostic()?;
            println!("{json}");
        }
        OutputFormat::Yaml => {
            let yaml = serde_yml::to_string(&entries).into_diagnostic()?;
            print!("{yaml}");
        }
        OutputFormat::Csv => print_csv(&entries)?,
        _ => print_table(&entries, skipped),
    }

    Ok(())
}

fn print_table(entries: &[SheetEntry], skipped: usize) {
    if entries.is_empty() {
        println!("No stackup sheets found");
    } else {
        let mut builder = Builder::default();
        builder.push_record(["FILE", "TITLE", "PROJECT", "ROWS", "W/C", "CPK", "YIELD"]);
        for e in entries {
            builder.push_record([
                truncate_str(&e.path, 40),
                truncate_str(&e.title, 30),
                truncate_str(&e.project, 20),
                e.rows.to_string(),
                e.worst_case.map(|v| format!("{v:.3}")).unwrap_or_default(),
                e.estimated_cpk.map(format_cpk).unwrap_or_default(),
                e.estimated_yield_percent
                    .map(format_yield)
                    .unwrap_or_default(),
            ]);
        }
        let mut table = builder.build();
        table.with(Style::sharp());
        println!("{table}");
        println!();
        println!("{} sheet(s)", style(entries.len()).cyan());
    }

    if skipped > 0 {
        println!(
            "{} skipped {} unreadable file(s)",
            style("!").yellow(),
            skipped
        );
    }
}

fn print_csv(entries: &[SheetEntry]) -> Result<()> {
    let mut wtr = csv::Writer::from_writer(vec![]);
    wtr.write_record([
        "path",
        "id",
        "title",
        "project",
        "rows",
        "worst_case",
        "rss_total",
        "estimated_cpk",
        "estimated_yield_percent",
    ])
    .into_diagnostic()?;
    for e in entries {
        wtr.write_record([
            e.path.clone(),
            e.id.clone(),
            e.title.clone(),
            e.project.clone(),
            e.rows.to_string(),
            e.worst_case.map(|v| v.to_string()).unwrap_or_default(),
            e.rss_total.map(|v| v.to_string()).unwrap_or_default(),
            e.estimated_cpk.map(|v| v.to_string()).unwrap_or_default(),
            e.estimated_yield_percent
                .map(|v| v.to_string())
                .unwrap_or_default(),
        ])
        .into_diagnostic()?;
    }
    let data = wtr.into_inner().map_err(|e| miette::miette!("{e}"))?;
    print!("{}", String::from_utf8(data).into_diagnostic()?);
    Ok(())
}
