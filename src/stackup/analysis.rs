//! The stack-up calculation
//!
//! One pure function turns the current rows and target into the four
//! stack-up figures. All validation is row-local and every input shape
//! produces a well-formed result; nothing here reads files, logs, or
//! keeps state between calls.

use serde::{Deserialize, Serialize};

use crate::core::stats::normal_cdf;
use crate::stackup::sheet::Contribution;

/// Combined stack-up figures for one sheet
///
/// Values are full-precision f64; fixed-decimal rounding is a display
/// concern and happens at the presentation layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StackupResult {
    /// Worst case: linear sum of the valid tolerance magnitudes
    pub worst_case: f64,

    /// RSS: root of the sum of squares of the same magnitudes
    pub rss_total: f64,

    /// Estimated Cpk: target / RSS, guarded to 0 when RSS is 0
    pub estimated_cpk: f64,

    /// Estimated yield: (2·Φ(3·Cpk) − 1) × 100
    pub estimated_yield_percent: f64,

    /// Indices of rows excluded by the tolerance validation rule
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub excluded: Vec<usize>,
}

/// Compute worst-case, RSS, Cpk and yield for a set of contributions.
///
/// A row whose tolerance is missing, non-numeric, negative, or non-finite
/// is excluded from the sums and reported in `excluded`; one bad row never
/// aborts the computation or affects its neighbors. A non-finite target is
/// treated as 0. When the RSS total is 0 (no valid rows, or all zero) the
/// Cpk division is guarded to 0 and the yield formula falls through to 0%.
pub fn compute_stackup(contributions: &[Contribution], target_spec: f64) -> StackupResult {
    let mut worst_case = 0.0;
    let mut sum_squares = 0.0;
    let mut excluded = Vec::new();

    for (index, row) in contributions.iter().enumerate() {
        match row.tolerance_magnitude() {
            Some(tol) => {
                worst_case += tol;
                sum_squares += tol * tol;
            }
            None => excluded.push(index),
        }
    }

    let rss_total = sum_squares.sqrt();
    let target = if target_spec.is_finite() {
        target_spec
    } else {
        0.0
    };

    let estimated_cpk = if rss_total > 0.0 {
        target / rss_total
    } else {
        0.0
    };
    let estimated_yield_percent = (2.0 * normal_cdf(3.0 * estimated_cpk) - 1.0) * 100.0;

    StackupResult {
        worst_case,
        rss_total,
        estimated_cpk,
        estimated_yield_percent,
        excluded,
    }
}
