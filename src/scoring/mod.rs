//! Priority scoring under a chosen [`Strategy`].
//!
//! Every strategy is a pure function of the task, its graph metrics and the
//! analysis date, returning a score and a task-specific explanation.
//!
//! Ordering guarantees:
//! - `smart_balance`: non-decreasing in importance, non-increasing in effort
//!   and in days until due
//! - `fastest_wins`: at equal importance, less effort scores strictly higher
//!   anywhere in the accepted estimate range
//! - `high_impact`: strictly increasing in dependent count, all else equal
//! - `deadline_driven`: an earlier due date always scores strictly higher;
//!   undated tasks score below every dated task

pub mod factors;
pub mod strategy;

pub use strategy::Strategy;

use crate::core::metrics::GraphMetrics;
use crate::core::task::Task;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Share of the smart_balance score kept while a task still waits on work.
const BLOCKED_FACTOR: f64 = 0.9;

/// A priority score with its explanation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Score {
    pub value: f64,
    pub explanation: String,
}

/// Score one task. `today` must be fixed for the whole analysis call.
pub fn score_task(
    strategy: Strategy,
    task: &Task,
    metrics: &GraphMetrics,
    today: NaiveDate,
) -> Score {
    let days = task.days_until_due(today);
    let urgency = factors::urgency(days);
    let importance = factors::importance(task.importance);
    let effort = factors::effort(task.estimated_hours);
    let dependents = factors::dependents(metrics.dependent_count);

    let mut why = Explanation::default();

    let value = match strategy {
        Strategy::SmartBalance => {
            let mut value = 0.35 * urgency + 0.30 * importance + 0.20 * effort + 0.15 * dependents;
            why.urgency(days, urgency);
            why.importance(task.importance);
            why.effort_if_notable(task.estimated_hours, effort);
            why.blocks_if_any(metrics.dependent_count);
            if !metrics.satisfied {
                value *= BLOCKED_FACTOR;
                why.waiting(metrics);
            }
            value
        }
        Strategy::FastestWins => {
            why.effort(task.estimated_hours, effort);
            why.importance(task.importance);
            0.8 * factors::effort_curve(task.estimated_hours) + 0.2 * importance
        }
        Strategy::HighImpact => {
            why.blocks(metrics.dependent_count);
            why.importance(task.importance);
            if urgency >= 0.8 {
                why.urgency(days, urgency);
            }
            0.45 * dependents + 0.35 * importance + 0.10 * urgency + 0.10 * effort
        }
        Strategy::DeadlineDriven => {
            why.due(days);
            why.importance(task.importance);
            match days {
                // The importance tie-break stays below one day's proximity step.
                Some(days) => {
                    let tie_break = 0.5 * factors::proximity_step() * importance;
                    0.5 + 0.5 * (factors::deadline_proximity(days) + tie_break)
                }
                None => 0.45 * importance,
            }
        }
    };

    Score {
        value,
        explanation: why.finish(),
    }
}

/// Collects the factors that drove a score into one readable line.
#[derive(Default)]
struct Explanation {
    parts: Vec<String>,
}

impl Explanation {
    fn push(&mut self, part: String) {
        self.parts.push(part);
    }

    fn due(&mut self, days: Option<i64>) {
        let text = match days {
            None => "no due date".to_string(),
            Some(0) => "due today".to_string(),
            Some(1) => "due tomorrow".to_string(),
            Some(d) if d < 0 => format!("overdue by {} day(s)", -d),
            Some(d) => format!("due in {} days", d),
        };
        self.push(text);
    }

    fn urgency(&mut self, days: Option<i64>, urgency: f64) {
        let band = if urgency >= 0.8 {
            "high urgency"
        } else if urgency >= 0.5 {
            "moderate urgency"
        } else {
            "low urgency"
        };
        let when = match days {
            None => "no due date".to_string(),
            Some(0) => "due today".to_string(),
            Some(d) if d < 0 => format!("overdue by {} day(s)", -d),
            Some(d) => format!("due in {} day(s)", d),
        };
        self.push(format!("{} ({})", band, when));
    }

    fn importance(&mut self, value: u8) {
        let band = if value >= 8 {
            "high importance"
        } else if value >= 5 {
            "moderate importance"
        } else {
            "low importance"
        };
        self.push(format!("{} ({}/10)", band, value));
    }

    fn effort(&mut self, hours: f64, effort: f64) {
        let text = if hours <= 0.0 {
            "unestimated effort".to_string()
        } else if effort >= 0.8 {
            format!("quick win ({}h)", hours)
        } else if effort <= 0.3 {
            format!("high effort ({}h)", hours)
        } else {
            format!("estimated {}h", hours)
        };
        self.push(text);
    }

    fn effort_if_notable(&mut self, hours: f64, effort: f64) {
        if hours > 0.0 && (effort >= 0.8 || effort <= 0.3) {
            self.effort(hours, effort);
        }
    }

    fn blocks(&mut self, count: usize) {
        if count == 0 {
            self.push("no other tasks depend on it".to_string());
        } else {
            self.push(format!("blocks {} task(s)", count));
        }
    }

    fn blocks_if_any(&mut self, count: usize) {
        if count > 0 {
            self.blocks(count);
        }
    }

    fn waiting(&mut self, metrics: &GraphMetrics) {
        self.push(format!(
            "waiting on {} unfinished dependenc{} (chain depth {})",
            metrics.pending_dependencies,
            if metrics.pending_dependencies == 1 { "y" } else { "ies" },
            metrics.depth
        ));
    }

    fn finish(self) -> String {
        self.parts.join(", ")
    }
}
