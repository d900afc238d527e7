//! Core module - fundamental types and utilities

pub mod config;
pub mod identity;
pub mod stats;

pub use config::Config;
pub use identity::{IdParseError, SheetId};
pub use stats::normal_cdf;
