//! Stackup sheets and the stack-up calculation

pub mod analysis;
pub mod sheet;
pub mod template;

pub use analysis::{compute_stackup, StackupResult};
pub use sheet::{AnalysisRecord, Contribution, StackupSheet, TolValue};
pub use template::SheetTemplate;
