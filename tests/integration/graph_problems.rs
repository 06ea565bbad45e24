//! Cycles, unresolved references and large graphs.

use taskrank::core::task::{tasks_from_json, Task, TaskId};
use taskrank::report::{CheckResponse, ErrorResponse};
use taskrank::{Analyzer, Error, Strategy};

use crate::fixtures::{analyze, score_of, today, two_cycles};

#[test]
fn test_two_disjoint_cycles_reported_exactly() {
    for strategy in Strategy::ALL {
        let err = Analyzer::default()
            .analyze(&two_cycles(), strategy, today())
            .unwrap_err();
        let Error::CyclicDependency(report) = err else {
            panic!("expected a cycle failure under {}", strategy);
        };
        assert_eq!(report.len(), 2);
        assert_eq!(
            report.cycles(),
            &[
                vec![TaskId::Num(1), TaskId::Num(2)],
                vec![TaskId::Num(3), TaskId::Num(4)],
            ]
        );
    }
}

#[test]
fn test_cycle_failure_body_names_every_cycle() {
    let err = Analyzer::default()
        .analyze(&two_cycles(), Strategy::SmartBalance, today())
        .unwrap_err();
    let body = serde_json::to_value(ErrorResponse::from(&err)).unwrap();
    assert_eq!(body["code"], "cyclic_dependency");
    assert_eq!(body["cycles"], serde_json::json!([[1, 2], [3, 4]]));
    assert!(body.get("tasks").is_none());
}

#[test]
fn test_cycle_through_string_ids() {
    let tasks = tasks_from_json(
        r#"[
          {"id": "deploy", "title": "Deploy", "dependencies": ["test"]},
          {"id": "test", "title": "Test", "dependencies": ["build"]},
          {"id": "build", "title": "Build", "dependencies": ["deploy"]}
        ]"#,
    )
    .unwrap();
    let err = Analyzer::default()
        .analyze(&tasks, Strategy::DeadlineDriven, today())
        .unwrap_err();
    let Error::CyclicDependency(report) = err else {
        panic!("expected a cycle failure");
    };
    // Rotated to start at the smallest id, following dependency edges.
    assert_eq!(
        report.cycles(),
        &[vec![
            TaskId::from("build"),
            TaskId::from("deploy"),
            TaskId::from("test"),
        ]]
    );
    assert_eq!(report.to_string(), "build -> deploy -> test -> build");
}

#[test]
fn test_check_lists_cycles_without_failing() {
    let diagnostics = Analyzer::default().check(&two_cycles()).unwrap();
    let response = CheckResponse::from(&diagnostics);
    assert!(!response.ok);
    assert_eq!(response.cycles.len(), 2);
    assert!(response.warnings.is_empty());
}

#[test]
fn test_unresolved_dependency_is_warning_not_edge() {
    let tasks = vec![
        Task::new(1, "Ship release").depends_on("ghost"),
        Task::new(2, "Write changelog"),
    ];
    for strategy in Strategy::ALL {
        let analysis = analyze(&tasks, strategy);
        assert_eq!(analysis.total_tasks, 2);
        assert_eq!(analysis.warnings.len(), 1);
        assert_eq!(analysis.warnings[0].task, TaskId::Num(1));
        assert_eq!(analysis.warnings[0].missing, TaskId::from("ghost"));
        assert!(analysis.warnings[0].to_string().contains("ghost"));

        let ship = analysis
            .results
            .iter()
            .find(|r| r.task.id == TaskId::Num(1))
            .unwrap();
        assert!(ship.score.is_finite());
        assert_eq!(ship.metrics.depth, 0);
        assert!(ship.metrics.satisfied);
    }
}

#[test]
fn test_unresolved_dependency_scores_like_no_dependency() {
    let with_ghost = vec![Task::new(1, "a").depends_on("ghost")];
    let plain = vec![Task::new(1, "a")];
    for strategy in Strategy::ALL {
        assert_eq!(
            score_of(&analyze(&with_ghost, strategy), 1),
            score_of(&analyze(&plain, strategy), 1)
        );
    }
}

#[test]
fn test_large_chain_analyzes() {
    let n = 2_000i64;
    let tasks: Vec<Task> = (0..n)
        .map(|i| {
            let task = Task::new(i, "step");
            if i + 1 < n {
                task.depends_on(i + 1)
            } else {
                task
            }
        })
        .collect();
    let analysis = analyze(&tasks, Strategy::HighImpact);
    assert_eq!(analysis.total_tasks, n as usize);

    // The last task is the base of the chain; everything depends on it.
    let base = &analysis.results[0];
    assert_eq!(base.task.id, TaskId::Num(n - 1));
    assert_eq!(base.metrics.dependent_count, (n - 1) as usize);
}

#[test]
fn test_large_cycle_detected() {
    let n = 10_000i64;
    let tasks: Vec<Task> = (0..n)
        .map(|i| Task::new(i, "step").depends_on((i + 1) % n))
        .collect();
    let err = Analyzer::default()
        .analyze(&tasks, Strategy::SmartBalance, today())
        .unwrap_err();
    let Error::CyclicDependency(report) = err else {
        panic!("expected a cycle failure");
    };
    assert_eq!(report.len(), 1);
    assert_eq!(report.cycles()[0].len(), n as usize);
    assert_eq!(report.cycles()[0][0], TaskId::Num(0));
}
