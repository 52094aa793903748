//! Error taxonomy for stub generation.
//!
//! Every failure is fatal: a mismatch between what a generator expects and what the scraped
//! `.rst` page contains aborts the run so a maintainer can update the generator.

use std::path::PathBuf;

/// Returned by [`crate::cursor::LineCursor::pull`] when no lines remain.
///
/// Loops use it as their termination signal; operations that needed a line turn it into a
/// [`ParseError`] carrying what they were looking for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("no more lines")]
pub struct Exhausted;

#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    #[error("expected {expected}, but reached end-of-file before finding it")]
    MarkerNotFound { expected: String },

    #[error("expected {expected}, got `{found}`")]
    UnexpectedLine { expected: String, found: String },

    #[error("no documentation found before {end}")]
    EmptyDocumentation { end: String },

    #[error("malformed sub-heading inside documentation: {detail}")]
    MalformedHeading { detail: String },

    #[error("declared names {found:?} do not match expected names {expected:?}")]
    NameMismatch {
        expected: Vec<String>,
        found: Vec<String>,
    },

    #[error("no signature given for `{name}` (declared with `{cmd}`)")]
    UnknownDeclaration { cmd: String, name: String },

    #[error("no signatures found after `{cmd}`")]
    NoSignatures { cmd: String },

    #[error("not all input lines of module `{module}` processed; remaining: {remaining:?}")]
    UnconsumedInput {
        module: String,
        remaining: Vec<String>,
    },

    #[error("class record has no class definition")]
    MissingClassDefinition,

    #[error("no module is open; call `module` first")]
    NoModule,

    #[error("module `{0}` is still open; call `write` before starting another")]
    ModuleOpen(String),

    #[error("no class has been declared to receive {what}")]
    NoClass { what: String },

    #[error("cannot derive a class name from `{0}`")]
    BadClassFile(String),

    #[error("failed to fetch `{url}`: {reason}")]
    Fetch { url: String, reason: String },

    #[error("failed to serialize the stub tree")]
    Serialize(#[from] serde_json::Error),

    #[error("failed to write {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

pub type Result<T, E = ParseError> = std::result::Result<T, E>;

impl ParseError {
    pub(crate) fn marker(expected: impl Into<String>) -> Self {
        ParseError::MarkerNotFound {
            expected: expected.into(),
        }
    }

    pub(crate) fn unexpected(expected: impl Into<String>, found: impl Into<String>) -> Self {
        ParseError::UnexpectedLine {
            expected: expected.into(),
            found: found.into(),
        }
    }
}
