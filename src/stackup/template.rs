//! New-sheet document generation
//!
//! Renders the YAML text written by `stk new`. The generated document
//! carries comment guidance for hand editing, so it is built as text
//! rather than serialized from a struct; the round-trip test below pins
//! it to the document shape in `sheet.rs`.

use chrono::{DateTime, Local, Utc};

use crate::core::identity::SheetId;

/// Field values for a new sheet document
#[derive(Debug, Clone)]
pub struct SheetTemplate {
    pub id: SheetId,
    pub author: String,
    pub created: DateTime<Utc>,
    pub project: String,
    pub title: String,
    pub date: String,
    pub units: String,
    pub target_spec: f64,
    pub example_rows: bool,
}

impl SheetTemplate {
    pub fn new(id: SheetId, author: String) -> Self {
        Self {
            id,
            author,
            created: Utc::now(),
            project: String::new(),
            title: "New Stackup".to_string(),
            date: Local::now().format("%Y/%m/%d").to_string(),
            units: "mm".to_string(),
            target_spec: 0.0,
            example_rows: false,
        }
    }

    /// The worked example: a connector Y-position stack from PCB panel
    /// marks through SMT placement to the housing, against ±0.200 mm
    pub fn example(id: SheetId, author: String) -> Self {
        Self {
            project: "TM-P4125-001".to_string(),
            title: "Connector Y-Position Analysis".to_string(),
            target_spec: 0.2,
            example_rows: true,
            ..Self::new(id, author)
        }
    }

    pub fn with_project(mut self, project: impl Into<String>) -> Self {
        self.project = project.into();
        self
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn with_date(mut self, date: impl Into<String>) -> Self {
        self.date = date.into();
        self
    }

    pub fn with_units(mut self, units: impl Into<String>) -> Self {
        self.units = units.into();
        self
    }

    pub fn with_target(mut self, target_spec: f64) -> Self {
        self.target_spec = target_spec;
        self
    }

    /// Render the YAML document text
    pub fn render(&self) -> String {
        let rows = if self.example_rows {
            EXAMPLE_ROWS
        } else {
            BLANK_ROWS
        };

        format!(
            r#"# Stackup: {title_comment}
# Run `stk analyze <file>` after editing to refresh the figures.

id: {id}
project: {project}
title: {title}
date: {date}
units: {units}

{rows}
# Target specification (± limit, same units as the rows)
target_spec: {target:.3}

tags: []

created: {created}
author: {author}
revision: 1
"#,
            title_comment = self.title.replace(['\n', '\r'], " "),
            id = self.id,
            project = yaml_quoted(&self.project),
            title = yaml_quoted(&self.title),
            date = yaml_quoted(&self.date),
            units = yaml_quoted(&self.units),
            rows = rows,
            target = self.target_spec,
            created = self.created.to_rfc3339(),
            author = yaml_quoted(&self.author),
        )
    }
}

/// Double-quoted YAML scalar with the field text escaped
fn yaml_quoted(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('"');
    for c in s.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            _ => out.push(c),
        }
    }
    out.push('"');
    out
}

const BLANK_ROWS: &str = r#"# Contribution rows: one entry per source of variation.
# tolerance is the symmetric ± magnitude in the sheet units. A blank or
# non-numeric tolerance keeps the row out of the sums without failing
# the analysis. required_cpk is informational only.
contributions: []
#  - part: ""
#    required_cpk: 1.33
#    seq: a
#    description: ""
#    tolerance: 0.000
"#;

const EXAMPLE_ROWS: &str = r#"# Contribution rows: one entry per source of variation.
contributions:
  - part: PCB
    required_cpk: 1.33
    seq: a
    description: Panel mark to unit mark
    tolerance: 0.100
  - part: PCB
    required_cpk: 1.33
    seq: b
    description: Unit mark to soldering pad
    tolerance: 0.100
  - part: SMT
    required_cpk: 1.00
    seq: c
    description: SMT tolerance
    tolerance: 0.150
  - part: Connector
    required_cpk: 1.33
    seq: d
    description: Connector housing (0.25/2)
    tolerance: 0.125
"#;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stackup::sheet::StackupSheet;

    #[test]
    fn test_blank_template_parses() {
        let tpl = SheetTemplate::new(SheetId::new(), "tester".to_string())
            .with_project("PRJ-1")
            .with_title("Gap analysis")
            .with_units("mm")
            .with_target(0.25);
        let yaml = tpl.render();

        let sheet: StackupSheet = serde_yml::from_str(&yaml).unwrap();
        assert_eq!(sheet.id, tpl.id);
        assert_eq!(sheet.project, "PRJ-1");
        assert_eq!(sheet.title, "Gap analysis");
        assert_eq!(sheet.author, "tester");
        assert!(sheet.contributions.is_empty());
        assert_eq!(sheet.target_spec_value(), 0.25);
    }

    #[test]
    fn test_quoted_fields_roundtrip() {
        let tpl = SheetTemplate::new(SheetId::new(), r#"J. "Doc" Brown"#.to_string())
            .with_project(r#"PRJ\2024"#)
            .with_title(r#"Housing "rev B" gap"#);
        let yaml = tpl.render();

        let sheet: StackupSheet = serde_yml::from_str(&yaml).unwrap();
        assert_eq!(sheet.title, r#"Housing "rev B" gap"#);
        assert_eq!(sheet.project, r#"PRJ\2024"#);
        assert_eq!(sheet.author, r#"J. "Doc" Brown"#);
    }

    #[test]
    fn test_example_template_matches_worked_figures() {
        let tpl = SheetTemplate::example(SheetId::new(), "tester".to_string());
        let yaml = tpl.render();

        let sheet: StackupSheet = serde_yml::from_str(&yaml).unwrap();
        assert_eq!(sheet.project, "TM-P4125-001");
        assert_eq!(sheet.contributions.len(), 4);

        let result = sheet.analyze();
        assert!((result.worst_case - 0.475).abs() < 1e-12);
        assert!((result.rss_total - 0.058125_f64.sqrt()).abs() < 1e-12);
        assert!((result.estimated_cpk - 0.82956).abs() < 1e-4);
        assert!((result.estimated_yield_percent - 98.718).abs() < 1e-2);
    }
}
