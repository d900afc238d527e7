//! stk: Tolerance Stack-up Toolkit
//!
//! A Unix-style tool for tolerance stack-up analysis over plain text
//! stackup sheets kept under git version control.

pub mod cli;
pub mod core;
pub mod stackup;
pub mod yaml;
