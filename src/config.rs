use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use crate::analysis::AnalyzerOptions;
use crate::core::task::TaskId;
use crate::scoring::Strategy;
use crate::{tlog_debug, Error, Result};

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct Config {
    /// Strategy used when the command line does not name one.
    pub default_strategy: Option<String>,
    /// Task ids treated as finished when judging dependency readiness.
    #[serde(default)]
    pub completed: Vec<TaskId>,
}

impl Config {
    pub fn taskrank_dir() -> Result<PathBuf> {
        Ok(dirs::home_dir().ok_or(Error::NoHomeDir)?.join(".taskrank"))
    }

    pub fn config_path() -> Result<PathBuf> {
        Ok(Self::taskrank_dir()?.join("taskrank.toml"))
    }

    /// Resolve the strategy to use, preferring an explicit choice.
    ///
    /// A misspelled configured strategy is an error, never a silent default.
    pub fn effective_strategy(&self, explicit: Option<&str>) -> Result<Strategy> {
        match explicit.or(self.default_strategy.as_deref()) {
            Some(name) => name.parse(),
            None => Ok(Strategy::default()),
        }
    }

    /// Set the fallback strategy after checking that it names one.
    pub fn set_default_strategy(&mut self, name: &str) -> Result<Strategy> {
        let strategy: Strategy = name.parse()?;
        self.default_strategy = Some(strategy.as_str().to_string());
        Ok(strategy)
    }

    /// Record `id` as finished. Returns false if it already was.
    pub fn mark_completed(&mut self, id: TaskId) -> bool {
        if self.completed.contains(&id) {
            return false;
        }
        self.completed.push(id);
        self.completed.sort();
        true
    }

    /// Forget that `id` was finished. Returns false if it was not recorded.
    pub fn reopen(&mut self, id: &TaskId) -> bool {
        let before = self.completed.len();
        self.completed.retain(|done| done != id);
        self.completed.len() != before
    }

    pub fn analyzer_options(&self) -> AnalyzerOptions {
        AnalyzerOptions {
            completed: self.completed.iter().cloned().collect::<HashSet<_>>(),
        }
    }

    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        tlog_debug!("Config::load path={}", path.display());
        if !path.exists() {
            tlog_debug!("Config file not found, using defaults");
            return Ok(Self::default());
        }
        let config: Self = toml::from_str(&fs::read_to_string(path)?)?;
        tlog_debug!(
            "Config loaded: default_strategy={:?}, completed={}",
            config.default_strategy,
            config.completed.len()
        );
        Ok(config)
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(dir) = path.parent() {
            if !dir.exists() {
                tlog_debug!("Creating config directory: {}", dir.display());
                fs::create_dir_all(dir)?;
            }
        }
        fs::write(path, toml::to_string_pretty(self)?)?;
        tlog_debug!("Config saved to {}", path.display());
        Ok(())
    }
}
