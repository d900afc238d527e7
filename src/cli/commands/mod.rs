//! Command implementations

pub mod analyze;
pub mod completions;
pub mod edit;
pub mod list;
pub mod new;
pub mod report;
pub mod show;
