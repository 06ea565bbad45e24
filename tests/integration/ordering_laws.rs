//! Strategy ordering guarantees checked through the full analyzer.
//!
//! Scores are compared between tasks that differ in a single field, so a
//! failure points at exactly one factor.

use taskrank::core::task::{parse_due_date, Task, TaskId};
use taskrank::Strategy;

use crate::fixtures::{analyze, due_in, ranked_ids, score_of, web_project};

#[test]
fn test_deadline_driven_sooner_due_ranks_first() {
    let tasks = vec![
        Task::new("b", "Renew certificate").with_due_date(due_in(10)),
        Task::new("a", "File taxes").with_due_date(due_in(1)),
    ];
    let analysis = analyze(&tasks, Strategy::DeadlineDriven);
    assert!(score_of(&analysis, "a") > score_of(&analysis, "b"));
    assert_eq!(ranked_ids(&analysis)[0], TaskId::from("a"));
}

#[test]
fn test_deadline_driven_overdue_beats_due_today() {
    let tasks = vec![
        Task::new(1, "today").with_due_date(due_in(0)).with_importance(10),
        Task::new(2, "late").with_due_date(due_in(-2)).with_importance(1),
    ];
    let analysis = analyze(&tasks, Strategy::DeadlineDriven);
    assert!(score_of(&analysis, 2) > score_of(&analysis, 1));
    assert!(analysis.results[0].explanation.starts_with("overdue by 2 day(s)"));
}

#[test]
fn test_deadline_driven_full_calendar_range() {
    let tasks = vec![
        Task::new(1, "undated").with_importance(10),
        Task::new(2, "far").with_due_date(parse_due_date("9999-12-31").unwrap()),
        Task::new(3, "ancient").with_due_date(parse_due_date("0001-01-01").unwrap()),
        Task::new(4, "soon").with_due_date(due_in(2)),
    ];
    let analysis = analyze(&tasks, Strategy::DeadlineDriven);
    let expected: Vec<TaskId> = [3, 4, 2, 1].into_iter().map(TaskId::Num).collect();
    assert_eq!(ranked_ids(&analysis), expected);
}

#[test]
fn test_fastest_wins_smaller_estimate_ranks_first() {
    let tasks = vec![
        Task::new(1, "Refactor billing").with_hours(8.0).with_importance(6),
        Task::new(2, "Fix typo in banner").with_hours(2.0).with_importance(6),
    ];
    let analysis = analyze(&tasks, Strategy::FastestWins);
    assert!(score_of(&analysis, 2) > score_of(&analysis, 1));
    assert_eq!(ranked_ids(&analysis), vec![TaskId::from(2), TaskId::from(1)]);
}

#[test]
fn test_fastest_wins_strict_across_estimates() {
    let hours = [0.25, 0.5, 1.0, 2.0, 3.0, 5.0, 8.0, 13.0, 40.0];
    let tasks: Vec<Task> = hours
        .iter()
        .enumerate()
        .map(|(i, h)| Task::new(i as i64, "t").with_hours(*h))
        .collect();
    let analysis = analyze(&tasks, Strategy::FastestWins);
    for pair in analysis.results.windows(2) {
        assert!(pair[0].score > pair[1].score);
        assert!(pair[0].task.estimated_hours < pair[1].task.estimated_hours);
    }
}

#[test]
fn test_high_impact_new_dependent_raises_score() {
    let base = vec![Task::new("a", "Pick vendor"), Task::new("b", "Unrelated")];
    let before = score_of(&analyze(&base, Strategy::HighImpact), "a");

    let mut grown = base.clone();
    grown.push(Task::new("c", "Sign contract").depends_on("a"));
    let after = score_of(&analyze(&grown, Strategy::HighImpact), "a");

    assert!(after > before);
}

#[test]
fn test_high_impact_counts_transitive_dependents() {
    let chain = vec![
        Task::new(1, "root"),
        Task::new(2, "middle").depends_on(1),
        Task::new(3, "leaf").depends_on(2),
        Task::new(4, "lonely"),
    ];
    let analysis = analyze(&chain, Strategy::HighImpact);
    assert_eq!(ranked_ids(&analysis)[0], TaskId::from(1));
    assert!(score_of(&analysis, 1) > score_of(&analysis, 2));
    assert!(score_of(&analysis, 2) > score_of(&analysis, 3));
}

#[test]
fn test_smart_balance_orders_by_single_field() {
    let base = Task::new(0, "base").with_hours(4.0).with_due_date(due_in(6));

    let tasks = vec![
        base.clone().with_importance(3),
        Task { id: TaskId::from(1), ..base.clone().with_importance(9) },
    ];
    let analysis = analyze(&tasks, Strategy::SmartBalance);
    assert!(score_of(&analysis, 1) >= score_of(&analysis, 0));

    let tasks = vec![
        base.clone().with_due_date(due_in(30)),
        Task { id: TaskId::from(1), ..base.clone().with_due_date(due_in(1)) },
    ];
    let analysis = analyze(&tasks, Strategy::SmartBalance);
    assert!(score_of(&analysis, 1) >= score_of(&analysis, 0));

    let tasks = vec![
        base.clone().with_hours(24.0),
        Task { id: TaskId::from(1), ..base.clone().with_hours(1.0) },
    ];
    let analysis = analyze(&tasks, Strategy::SmartBalance);
    assert!(score_of(&analysis, 1) >= score_of(&analysis, 0));
}

#[test]
fn test_strategies_disagree_on_backlog() {
    let tasks = web_project();
    let fastest = ranked_ids(&analyze(&tasks, Strategy::FastestWins));
    let impact = ranked_ids(&analyze(&tasks, Strategy::HighImpact));
    assert_ne!(fastest, impact);
    assert_eq!(fastest[0], TaskId::from(5));
    assert_eq!(impact[0], TaskId::from(1));
}
