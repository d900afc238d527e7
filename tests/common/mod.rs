//! Shared test helpers for integration tests

#![allow(dead_code)]

use assert_cmd::cargo;
use assert_cmd::Command;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

/// Helper to get an stk command
pub fn stk() -> Command {
    Command::new(cargo::cargo_bin!("stk"))
}

/// The worked connector example as a hand-written sheet file
pub const CONNECTOR_SHEET: &str = r#"id: STK-01HQ5V2KRMJ0B9XYZ3NTWPGQ4E
project: "TM-P4125-001"
title: "Connector Y-Position Analysis"
date: "2025/12/17"
units: "mm"
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
target_spec: 0.200
created: 2025-12-17T00:00:00Z
author: "tester"
revision: 1
"#;

/// Write a sheet file into the temp directory and return its path
pub fn write_sheet(tmp: &TempDir, name: &str, content: &str) -> PathBuf {
    let path = tmp.path().join(name);
    fs::write(&path, content).unwrap();
    path
}

/// Write the connector example sheet into the temp directory
pub fn write_connector_sheet(tmp: &TempDir) -> PathBuf {
    write_sheet(tmp, "connector.stk.yaml", CONNECTOR_SHEET)
}
