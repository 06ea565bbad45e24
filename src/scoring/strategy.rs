//! Named prioritization strategies.

use crate::error::Error;
use serde::{Deserialize, Serialize};

/// Which task attributes dominate the priority score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Strategy {
    /// Balanced blend of urgency, importance, effort and dependents.
    SmartBalance,
    /// Low-effort tasks first; importance breaks ties.
    FastestWins,
    /// Tasks that unblock the most other work, then importance.
    HighImpact,
    /// Earliest due date first; undated tasks last.
    DeadlineDriven,
}

impl Strategy {
    pub const ALL: [Strategy; 4] = [
        Strategy::SmartBalance,
        Strategy::FastestWins,
        Strategy::HighImpact,
        Strategy::DeadlineDriven,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Strategy::SmartBalance => "smart_balance",
            Strategy::FastestWins => "fastest_wins",
            Strategy::HighImpact => "high_impact",
            Strategy::DeadlineDriven => "deadline_driven",
        }
    }

    /// Display label used in terminal output.
    pub fn label(&self) -> &'static str {
        match self {
            Strategy::SmartBalance => "Smart Balance",
            Strategy::FastestWins => "Fastest Wins",
            Strategy::HighImpact => "High Impact",
            Strategy::DeadlineDriven => "Deadline Driven",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Strategy::SmartBalance => {
                "Weighs urgency, importance, effort and blocked work together"
            }
            Strategy::FastestWins => "Surfaces quick wins: lowest estimated effort first",
            Strategy::HighImpact => "Favors tasks many others depend on, then importance",
            Strategy::DeadlineDriven => "Orders strictly by due date; undated tasks last",
        }
    }
}

impl Default for Strategy {
    fn default() -> Self {
        Self::SmartBalance
    }
}

impl std::fmt::Display for Strategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for Strategy {
    type Err = Error;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Strategy::ALL
            .into_iter()
            .find(|strategy| strategy.as_str() == s)
            .ok_or_else(|| Error::UnknownStrategy(s.to_string()))
    }
}
