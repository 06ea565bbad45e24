use thiserror::Error;

use crate::core::cycle::CycleReport;

#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("TOML serialize error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    #[error("No home directory")]
    NoHomeDir,

    #[error("Invalid task: {0}")]
    InvalidTask(String),

    #[error("Invalid date: {0}")]
    InvalidDate(String),

    #[error("Unknown strategy: {0}")]
    UnknownStrategy(String),

    #[error("Circular dependencies detected: {0}")]
    CyclicDependency(CycleReport),
}

impl Error {
    /// Stable machine-readable code for callers that cannot match on the enum.
    pub fn code(&self) -> &'static str {
        match self {
            Error::Io(_) => "io",
            Error::Json(_) => "json",
            Error::TomlParse(_) | Error::TomlSerialize(_) | Error::NoHomeDir => "config",
            Error::InvalidTask(_) => "invalid_task",
            Error::InvalidDate(_) => "invalid_date",
            Error::UnknownStrategy(_) => "unknown_strategy",
            Error::CyclicDependency(_) => "cyclic_dependency",
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
