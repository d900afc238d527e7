//! The stackup sheet document
//!
//! A sheet is one plain-text YAML file: project metadata, the ordered
//! tolerance contributions, the target specification, and (after an
//! analysis) the recorded figures. Hand edits are expected; every cell
//! that holds a tolerance value tolerates text, and validation happens
//! row-locally at computation time rather than at load time.

use chrono::{DateTime, Local, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;

use crate::core::identity::SheetId;
use crate::stackup::analysis::{compute_stackup, StackupResult};
use crate::yaml::{parse_yaml_file, YamlError};

/// A tolerance cell as written in the document: a number, or raw text
/// that may or may not coerce to one
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TolValue {
    Number(f64),
    Text(String),
}

impl TolValue {
    /// Numeric coercion; `None` for non-numeric text and non-finite values
    pub fn as_number(&self) -> Option<f64> {
        let v = match self {
            TolValue::Number(n) => *n,
            TolValue::Text(s) => s.trim().parse().ok()?,
        };
        v.is_finite().then_some(v)
    }

    /// A usable tolerance magnitude: coercible, finite, and non-negative
    pub fn magnitude(&self) -> Option<f64> {
        self.as_number().filter(|v| *v >= 0.0)
    }
}

impl fmt::Display for TolValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TolValue::Number(n) => write!(f, "{n}"),
            TolValue::Text(s) => f.write_str(s),
        }
    }
}

/// One row of the stack: a single source of dimensional variation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Contribution {
    /// Contributing part or process
    #[serde(default)]
    pub part: String,

    /// Required process capability for this source (informational only;
    /// never enters the calculation)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub required_cpk: Option<f64>,

    /// Short reference label ("a", "b", ...) used in reports
    #[serde(default)]
    pub seq: String,

    /// Description of the dimension/feature
    #[serde(default)]
    pub description: String,

    /// Symmetric ± tolerance magnitude; blank or non-numeric rows are
    /// excluded from the sums at computation time
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tolerance: Option<TolValue>,
}

impl Contribution {
    pub fn new(
        part: impl Into<String>,
        seq: impl Into<String>,
        description: impl Into<String>,
        tolerance: f64,
    ) -> Self {
        Self {
            part: part.into(),
            required_cpk: None,
            seq: seq.into(),
            description: description.into(),
            tolerance: Some(TolValue::Number(tolerance)),
        }
    }

    pub fn with_required_cpk(mut self, cpk: f64) -> Self {
        self.required_cpk = Some(cpk);
        self
    }

    /// Valid tolerance magnitude per the row-validation rule, if any
    pub fn tolerance_magnitude(&self) -> Option<f64> {
        self.tolerance.as_ref().and_then(TolValue::magnitude)
    }
}

/// Figures recorded in the sheet by the most recent analysis
/// (auto-calculated; overwritten whole on every run)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisRecord {
    /// Worst-case (linear) stack
    pub worst_case: f64,

    /// RSS (root sum square) stack
    pub rss_total: f64,

    /// Estimated Cpk against the target
    pub estimated_cpk: f64,

    /// Estimated assembly yield
    pub estimated_yield_percent: f64,

    /// Indices of rows excluded for a missing or non-numeric tolerance
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub excluded_rows: Vec<usize>,

    /// Analysis timestamp
    pub analyzed_at: DateTime<Utc>,
}

impl AnalysisRecord {
    pub fn from_result(result: &StackupResult, analyzed_at: DateTime<Utc>) -> Self {
        Self {
            worst_case: result.worst_case,
            rss_total: result.rss_total,
            estimated_cpk: result.estimated_cpk,
            estimated_yield_percent: result.estimated_yield_percent,
            excluded_rows: result.excluded.clone(),
            analyzed_at,
        }
    }
}

/// Stackup sheet - one tolerance stack-up worksheet
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StackupSheet {
    /// Unique identifier (STK-...); generated when a hand-written sheet
    /// omits it
    #[serde(default)]
    pub id: SheetId,

    /// Project name/code
    #[serde(default)]
    pub project: String,

    /// Analysis title
    #[serde(default)]
    pub title: String,

    /// Report date as entered (YYYY/MM/DD by convention)
    #[serde(default = "default_date")]
    pub date: String,

    /// Linear units label; display only, never enters the calculation
    #[serde(default = "default_units")]
    pub units: String,

    /// Ordered tolerance contributions
    #[serde(default)]
    pub contributions: Vec<Contribution>,

    /// Target specification (± limit), same units as the rows
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_spec: Option<TolValue>,

    /// Most recent analysis (auto-calculated)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub analysis: Option<AnalysisRecord>,

    /// Classification tags
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,

    /// Creation timestamp
    #[serde(default = "Utc::now")]
    pub created: DateTime<Utc>,

    /// Author name
    #[serde(default)]
    pub author: String,

    /// Revision counter
    #[serde(default = "default_revision")]
    pub revision: u32,
}

pub(crate) fn default_units() -> String {
    "mm".to_string()
}

pub(crate) fn default_date() -> String {
    Local::now().format("%Y/%m/%d").to_string()
}

fn default_revision() -> u32 {
    1
}

impl Default for StackupSheet {
    fn default() -> Self {
        Self {
            id: SheetId::new(),
            project: String::new(),
            title: String::new(),
            date: default_date(),
            units: default_units(),
            contributions: Vec::new(),
            target_spec: None,
            analysis: None,
            tags: Vec::new(),
            created: Utc::now(),
            author: String::new(),
            revision: 1,
        }
    }
}

impl StackupSheet {
    /// Load a sheet from a YAML file
    pub fn load(path: &Path) -> Result<Self, YamlError> {
        parse_yaml_file(path)
    }

    /// Effective numeric target: missing, non-numeric, or negative → 0
    pub fn target_spec_value(&self) -> f64 {
        self.target_spec
            .as_ref()
            .and_then(TolValue::magnitude)
            .unwrap_or(0.0)
    }

    /// Run the stack-up calculation over the current rows and target
    pub fn analyze(&self) -> StackupResult {
        compute_stackup(&self.contributions, self.target_spec_value())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tol_value_coercion() {
        assert_eq!(TolValue::Number(0.15).magnitude(), Some(0.15));
        assert_eq!(TolValue::Text("0.15".into()).magnitude(), Some(0.15));
        assert_eq!(TolValue::Text(" 0.2 ".into()).magnitude(), Some(0.2));
        assert_eq!(TolValue::Text("TBD".into()).magnitude(), None);
        assert_eq!(TolValue::Text("".into()).magnitude(), None);
        assert_eq!(TolValue::Number(f64::NAN).magnitude(), None);
        assert_eq!(TolValue::Number(f64::INFINITY).magnitude(), None);
        // Negative values coerce as numbers but are not valid magnitudes
        assert_eq!(TolValue::Number(-0.1).as_number(), Some(-0.1));
        assert_eq!(TolValue::Number(-0.1).magnitude(), None);
    }

    #[test]
    fn test_tolerance_cell_shapes_from_yaml() {
        let yaml = r#"
contributions:
  - part: PCB
    tolerance: 0.1
  - part: PCB
    tolerance: "0.15"
  - part: SMT
    tolerance: TBD
  - part: Connector
  - part: Housing
    tolerance: .nan
"#;
        let sheet: StackupSheet = serde_yml::from_str(yaml).unwrap();
        let mags: Vec<Option<f64>> = sheet
            .contributions
            .iter()
            .map(|c| c.tolerance_magnitude())
            .collect();
        assert_eq!(mags, vec![Some(0.1), Some(0.15), None, None, None]);
    }

    #[test]
    fn test_target_spec_value() {
        let mut sheet = StackupSheet::default();
        assert_eq!(sheet.target_spec_value(), 0.0);

        sheet.target_spec = Some(TolValue::Number(0.2));
        assert_eq!(sheet.target_spec_value(), 0.2);

        sheet.target_spec = Some(TolValue::Text("not a number".into()));
        assert_eq!(sheet.target_spec_value(), 0.0);

        sheet.target_spec = Some(TolValue::Number(-0.5));
        assert_eq!(sheet.target_spec_value(), 0.0);
    }

    #[test]
    fn test_yaml_roundtrip() {
        let mut sheet = StackupSheet {
            project: "TM-P4125-001".to_string(),
            title: "Connector Y-Position Analysis".to_string(),
            author: "test".to_string(),
            ..Default::default()
        };
        sheet.contributions = vec![
            Contribution::new("PCB", "a", "Panel mark to unit mark", 0.1).with_required_cpk(1.33),
            Contribution::new("SMT", "c", "SMT tolerance", 0.15),
        ];
        sheet.target_spec = Some(TolValue::Number(0.2));

        let yaml = serde_yml::to_string(&sheet).unwrap();
        let parsed: StackupSheet = serde_yml::from_str(&yaml).unwrap();

        assert_eq!(parsed.id, sheet.id);
        assert_eq!(parsed.title, sheet.title);
        assert_eq!(parsed.contributions, sheet.contributions);
        assert_eq!(parsed.target_spec, sheet.target_spec);
        assert_eq!(parsed.revision, 1);
    }

    #[test]
    fn test_minimal_sheet_parses_with_defaults() {
        let yaml = "title: Bare minimum\n";
        let sheet: StackupSheet = serde_yml::from_str(yaml).unwrap();
        assert_eq!(sheet.title, "Bare minimum");
        assert_eq!(sheet.units, "mm");
        assert!(sheet.contributions.is_empty());
        assert!(sheet.analysis.is_none());
        assert!(sheet.id.to_string().starts_with("STK-"));
    }

    #[test]
    fn test_sheet_analyze_uses_coerced_target() {
        let mut sheet = StackupSheet::default();
        sheet.contributions = vec![Contribution::new("A", "a", "", 0.1)];
        sheet.target_spec = Some(TolValue::Text("bogus".into()));
        let result = sheet.analyze();
        assert_eq!(result.estimated_cpk, 0.0);
        assert_eq!(result.estimated_yield_percent, 0.0);
        assert!((result.worst_case - 0.1).abs() < 1e-12);
    }
}
