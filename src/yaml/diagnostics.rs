//! Rich YAML error diagnostics
//!
//! Maps serde_yml errors onto miette diagnostics so a bad sheet file is
//! reported with the offending line underlined instead of a bare
//! "at line 12 column 3".

use miette::{Diagnostic, NamedSource, SourceSpan};
use thiserror::Error;

/// Errors produced when loading YAML documents
#[derive(Debug, Error, Diagnostic)]
pub enum YamlError {
    #[error("failed to read {path}")]
    #[diagnostic(code(stk::yaml::io))]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    #[diagnostic(transparent)]
    Syntax(#[from] YamlSyntaxError),
}

/// A YAML syntax or shape error with source context attached
#[derive(Debug, Error, Diagnostic)]
#[error("invalid YAML in {filename}")]
#[diagnostic(code(stk::yaml::syntax))]
pub struct YamlSyntaxError {
    filename: String,
    #[source_code]
    src: NamedSource<String>,
    #[label("{message}")]
    span: Option<SourceSpan>,
    message: String,
}

impl YamlSyntaxError {
    /// Build a diagnostic from a serde_yml error and the content it came from
    pub fn from_serde_error(err: &serde_yml::Error, content: &str, filename: &str) -> Self {
        let message = err.to_string();
        // Spans past the end of the source (EOF errors) are dropped
        let span = err.location().and_then(|loc| {
            let idx = loc.index();
            (idx < content.len()).then(|| SourceSpan::from(idx..idx + 1))
        });
        Self {
            filename: filename.to_string(),
            src: NamedSource::new(filename, content.to_string()),
            span,
            message,
        }
    }

    /// The underlying parser message
    pub fn message(&self) -> &str {
        &self.message
    }
}
