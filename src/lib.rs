pub mod analysis;
pub mod config;
pub mod core;
pub mod error;
pub mod log;
pub mod report;
pub mod scoring;

pub use analysis::{Analysis, AnalysisClock, Analyzer, AnalyzerOptions, ScoredTask};
pub use error::{Error, Result};
pub use scoring::Strategy;
