//! User configuration: author, editor, default units
//!
//! Values resolve from environment variables first, then the optional
//! config file in the platform config directory (e.g.
//! `~/.config/stk/config.yaml`), then built-in defaults.

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::io;
use std::path::{Path, PathBuf};
use std::process::Command;

/// On-disk shape of the optional config file
#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(default)]
struct ConfigFile {
    author: Option<String>,
    editor: Option<String>,
    units: Option<String>,
}

/// Resolved user configuration
#[derive(Debug, Clone)]
pub struct Config {
    author: String,
    editor: String,
    units: String,
}

impl Config {
    /// Load configuration; a missing or unreadable file falls back to defaults
    pub fn load() -> Self {
        let file = Self::config_path()
            .and_then(|p| std::fs::read_to_string(p).ok())
            .and_then(|s| serde_yml::from_str::<ConfigFile>(&s).ok())
            .unwrap_or_default();

        let author = std::env::var("STK_AUTHOR")
            .ok()
            .or(file.author)
            .or_else(|| std::env::var("USER").ok())
            .or_else(|| std::env::var("USERNAME").ok())
            .unwrap_or_else(|| "unknown".to_string());

        let editor = std::env::var("STK_EDITOR")
            .ok()
            .or(file.editor)
            .or_else(|| std::env::var("VISUAL").ok())
            .or_else(|| std::env::var("EDITOR").ok())
            .unwrap_or_else(|| "vi".to_string());

        let units = file.units.unwrap_or_else(|| "mm".to_string());

        Self {
            author,
            editor,
            units,
        }
    }

    /// Location of the optional config file
    pub fn config_path() -> Option<PathBuf> {
        ProjectDirs::from("", "", "stk").map(|dirs| dirs.config_dir().join("config.yaml"))
    }

    pub fn author(&self) -> String {
        self.author.clone()
    }

    pub fn editor(&self) -> &str {
        &self.editor
    }

    /// Default linear units for new sheets
    pub fn units(&self) -> &str {
        &self.units
    }

    /// Open a file in the configured editor, inheriting the terminal
    pub fn run_editor(&self, path: &Path) -> io::Result<()> {
        let status = Command::new(&self.editor).arg(path).status()?;
        if !status.success() {
            return Err(io::Error::new(
                io::ErrorKind::Other,
                format!("editor '{}' exited with {}", self.editor, status),
            ));
        }
        Ok(())
    }
}
