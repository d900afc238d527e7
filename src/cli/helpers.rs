//! Shared helper functions for CLI commands
//!
//! Fixed-decimal formatting lives here: three places for tolerance
//! magnitudes, two for Cpk and yield. The engine itself never rounds;
//! these are the presentation of its full-precision figures.

use tabled::builder::Builder;
use tabled::settings::Style;

use crate::stackup::analysis::StackupResult;
use crate::stackup::sheet::{Contribution, StackupSheet};

/// Format a tolerance magnitude with its units, e.g. `± 0.475 mm`
pub fn format_magnitude(value: f64, units: &str) -> String {
    format!("± {value:.3} {units}")
}

/// Format a Cpk figure
pub fn format_cpk(value: f64) -> String {
    format!("{value:.2}")
}

/// Format a yield percentage, e.g. `98.72 %`
pub fn format_yield(value: f64) -> String {
    format!("{value:.2} %")
}

/// Truncate a string to max_len characters, adding "..." if truncated
///
/// Counts and cuts on `char` boundaries; part and description cells are
/// free text and routinely multibyte.
pub fn truncate_str(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let cut: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{cut}...")
    }
}

/// The tolerance cell exactly as written in the row, or blank
pub fn tolerance_cell(row: &Contribution) -> String {
    row.tolerance
        .as_ref()
        .map(|t| t.to_string())
        .unwrap_or_default()
}

/// Render the contribution rows verbatim as a table
///
/// Cells are reproduced as written in the sheet, including non-numeric
/// tolerance text; nothing here is recomputed.
pub fn contributions_table(sheet: &StackupSheet, markdown: bool) -> String {
    let mut builder = Builder::default();
    builder.push_record(["NO.", "PART", "DESCRIPTION", "REQ. CPK", "± TOL"]);

    for row in &sheet.contributions {
        let req_cpk = row
            .required_cpk
            .map(|c| format!("{c:.2}"))
            .unwrap_or_default();
        builder.push_record([
            row.seq.clone(),
            row.part.clone(),
            truncate_str(&row.description, 40),
            req_cpk,
            tolerance_cell(row),
        ]);
    }

    let mut table = builder.build();
    if markdown {
        table.with(Style::markdown());
    } else {
        table.with(Style::sharp());
    }
    table.to_string()
}

/// The report's closing sentence: target, estimated yield, Cpk
pub fn conclusion(target_spec: f64, units: &str, result: &StackupResult) -> String {
    format!(
        "Conclusion: at a specification of {} the estimated yield is about {} with Cpk {}.",
        format_magnitude(target_spec, units),
        format_yield(result.estimated_yield_percent),
        format_cpk(result.estimated_cpk)
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stackup::analysis::compute_stackup;
    use crate::stackup::sheet::{Contribution, TolValue};

    #[test]
    fn test_format_magnitude() {
        assert_eq!(format_magnitude(0.475, "mm"), "± 0.475 mm");
        assert_eq!(format_magnitude(0.058125_f64.sqrt(), "mm"), "± 0.241 mm");
        assert_eq!(format_magnitude(0.0, "in"), "± 0.000 in");
    }

    #[test]
    fn test_format_cpk() {
        assert_eq!(format_cpk(0.829561), "0.83");
        assert_eq!(format_cpk(1.0), "1.00");
        assert_eq!(format_cpk(0.0), "0.00");
    }

    #[test]
    fn test_format_yield() {
        assert_eq!(format_yield(98.7178), "98.72 %");
        assert_eq!(format_yield(0.0), "0.00 %");
    }

    #[test]
    fn test_truncate_str() {
        assert_eq!(truncate_str("hello", 10), "hello");
        assert_eq!(truncate_str("hello world", 8), "hello...");
        assert_eq!(truncate_str("hi", 2), "hi");
    }

    #[test]
    fn test_truncate_str_multibyte() {
        // A cut point landing inside a CJK character must not panic
        let exact = format!("{}位置公差", "a".repeat(36));
        assert_eq!(truncate_str(&exact, 40), exact);

        let long = format!("{}位置公差分析", "a".repeat(36));
        assert_eq!(truncate_str(&long, 40), format!("{}位...", "a".repeat(36)));
        assert_eq!(truncate_str("公差分析報告書", 6), "公差分...");
    }

    #[test]
    fn test_tolerance_cell() {
        let row = Contribution::new("PCB", "a", "", 0.1);
        assert_eq!(tolerance_cell(&row), "0.1");

        let text = Contribution {
            tolerance: Some(TolValue::Text("TBD".into())),
            ..row.clone()
        };
        assert_eq!(tolerance_cell(&text), "TBD");

        let blank = Contribution {
            tolerance: None,
            ..row
        };
        assert_eq!(tolerance_cell(&blank), "");
    }

    #[test]
    fn test_contributions_table_cjk_description() {
        let mut sheet = StackupSheet::default();
        sheet.contributions = vec![Contribution::new(
            "連接器",
            "a",
            "連接器Y方向位置公差".repeat(5),
            0.125,
        )];
        let table = contributions_table(&sheet, false);
        assert!(table.contains("連接器"));
        assert!(table.contains("..."));
    }

    #[test]
    fn test_contributions_table_verbatim_cells() {
        let mut sheet = StackupSheet::default();
        sheet.contributions = vec![
            Contribution::new("PCB", "a", "Panel mark to unit mark", 0.1).with_required_cpk(1.33),
            Contribution {
                tolerance: Some(TolValue::Text("TBD".into())),
                ..Contribution::new("SMT", "b", "SMT tolerance", 0.0)
            },
        ];
        let table = contributions_table(&sheet, false);
        assert!(table.contains("PCB"));
        assert!(table.contains("1.33"));
        // The bad cell is shown as written, not recomputed or hidden
        assert!(table.contains("TBD"));

        let md = contributions_table(&sheet, true);
        assert!(md.contains('|'));
        assert!(md.contains("TBD"));
    }

    #[test]
    fn test_conclusion_sentence() {
        let rows = vec![
            Contribution::new("PCB", "a", "", 0.1),
            Contribution::new("PCB", "b", "", 0.1),
            Contribution::new("SMT", "c", "", 0.15),
            Contribution::new("Connector", "d", "", 0.125),
        ];
        let result = compute_stackup(&rows, 0.2);
        let line = conclusion(0.2, "mm", &result);
        assert_eq!(
            line,
            "Conclusion: at a specification of ± 0.200 mm the estimated yield is about 98.72 % with Cpk 0.83."
        );
    }
}
