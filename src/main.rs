use std::fs;
use std::io::{self, Read};

use chrono::NaiveDate;
use clap::{Parser, Subcommand};

use taskrank::analysis::{Analysis, AnalysisClock, Analyzer, GraphDiagnostics};
use taskrank::config::Config;
use taskrank::core::task::{parse_due_date, tasks_from_json, TaskId};
use taskrank::report::{AnalysisResponse, CheckResponse, ErrorResponse};
use taskrank::{tlog, tlog_error, Error, Result, Strategy};

/// Taskrank - dependency-aware task prioritization
#[derive(Parser, Debug)]
#[command(name = "taskrank")]
#[command(version, about, long_about = None)]
#[command(
    after_help = "ENVIRONMENT:\n    TASKRANK_DEBUG=1     Enable debug logging (alternative to --debug)"
)]
pub struct Cli {
    /// Enable debug logging (writes to ~/.taskrank/taskrank.log)
    #[arg(short = 'd', long, global = true)]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Command {
    /// Rank tasks from a JSON file (use - for stdin)
    Analyze {
        /// JSON array of tasks
        file: String,

        /// Prioritization strategy (see `taskrank strategies`)
        #[arg(short, long)]
        strategy: Option<String>,

        /// Analysis date as YYYY-MM-DD (defaults to today)
        #[arg(long)]
        today: Option<String>,

        /// Task id to treat as already complete (repeatable)
        #[arg(long = "completed", value_name = "ID")]
        completed: Vec<String>,

        /// Print the JSON response instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Report unresolved dependencies and cycles without scoring
    Check {
        /// JSON array of tasks
        file: String,

        /// Print the JSON response instead of text
        #[arg(long)]
        json: bool,
    },

    /// List available strategies
    Strategies,

    /// Show or update ~/.taskrank/taskrank.toml
    Config {
        /// Strategy used when `analyze` is not given one
        #[arg(long, value_name = "STRATEGY")]
        default_strategy: Option<String>,

        /// Record a task id as complete (repeatable)
        #[arg(long = "complete", value_name = "ID")]
        complete: Vec<String>,

        /// Forget that a task id was complete (repeatable)
        #[arg(long = "reopen", value_name = "ID")]
        reopen: Vec<String>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    taskrank::log::init_with_debug(cli.debug);
    if cli.debug {
        tlog!("taskrank starting (debug mode enabled)");
    }

    let (outcome, json) = match cli.command {
        Command::Analyze {
            file,
            strategy,
            today,
            completed,
            json,
        } => (run_analyze(&file, strategy, today, completed, json), json),
        Command::Check { file, json } => (run_check(&file, json), json),
        Command::Strategies => (run_strategies(), false),
        Command::Config {
            default_strategy,
            complete,
            reopen,
        } => (run_config(default_strategy, complete, reopen), false),
    };

    if let Err(err) = outcome {
        tlog_error!("Command failed: {}", err);
        report_failure(&err, json);
        std::process::exit(1);
    }
    Ok(())
}

fn read_input(file: &str) -> Result<String> {
    if file == "-" {
        let mut buf = String::new();
        io::stdin().read_to_string(&mut buf)?;
        Ok(buf)
    } else {
        Ok(fs::read_to_string(file)?)
    }
}

fn run_analyze(
    file: &str,
    strategy: Option<String>,
    today: Option<String>,
    completed: Vec<String>,
    json: bool,
) -> Result<()> {
    let config = Config::load()?;
    let strategy = config.effective_strategy(strategy.as_deref())?;
    let today = match today {
        Some(raw) => parse_due_date(&raw)?,
        None => AnalysisClock::today(),
    };

    let mut options = config.analyzer_options();
    options
        .completed
        .extend(completed.into_iter().map(TaskId::from));

    let tasks = tasks_from_json(&read_input(file)?)?;
    if tasks.is_empty() && !json {
        println!("No tasks to analyze.");
        return Ok(());
    }

    let analysis = Analyzer::new(options).analyze(&tasks, strategy, today)?;

    if json {
        let response = AnalysisResponse::from(&analysis);
        println!("{}", serde_json::to_string_pretty(&response)?);
    } else {
        print_analysis(&analysis, today);
    }
    Ok(())
}

fn print_analysis(analysis: &Analysis, today: NaiveDate) {
    println!();
    println!(
        "  Strategy: {} | Total Tasks: {}",
        analysis.strategy.label(),
        analysis.total_tasks
    );
    println!("─────────────────────────────────────────────────────────────");

    for (rank, scored) in analysis.results.iter().enumerate() {
        let task = &scored.task;
        println!(
            "{:>3}. {}  [score {:.4}]",
            rank + 1,
            task.title,
            scored.score
        );

        let mut meta = vec![format!("id {}", task.id)];
        if let Some(due) = task.due_date {
            let marker = if task.is_overdue(today) { " (OVERDUE)" } else { "" };
            meta.push(format!("due {}{}", due.format("%b %-d, %Y"), marker));
        }
        if task.estimated_hours > 0.0 {
            meta.push(format!("{}h", task.estimated_hours));
        }
        meta.push(format!("importance {}/10", task.importance));
        if !task.dependencies.is_empty() {
            let deps: Vec<String> = task.dependencies.iter().map(ToString::to_string).collect();
            meta.push(format!("depends on {}", deps.join(", ")));
        }
        println!("     {}", meta.join(" · "));
        println!("     {}", scored.explanation);
    }

    if !analysis.warnings.is_empty() {
        println!();
        for warning in &analysis.warnings {
            eprintln!("Warning: {}", warning);
        }
    }
}

fn run_check(file: &str, json: bool) -> Result<()> {
    let tasks = tasks_from_json(&read_input(file)?)?;
    let diagnostics = Analyzer::default().check(&tasks)?;

    if json {
        let response = CheckResponse::from(&diagnostics);
        println!("{}", serde_json::to_string_pretty(&response)?);
    } else {
        print_diagnostics(tasks.len(), &diagnostics);
    }

    if diagnostics.cycles.is_empty() {
        Ok(())
    } else {
        // Already reported above.
        std::process::exit(1);
    }
}

fn print_diagnostics(task_count: usize, diagnostics: &GraphDiagnostics) {
    println!("Checked {} task(s)", task_count);
    if diagnostics.is_clean() {
        println!("  No dependency problems found.");
        return;
    }
    for unresolved in &diagnostics.unresolved {
        println!("  Warning: {}", unresolved);
    }
    for cycle in diagnostics.cycles.cycles() {
        let ids: Vec<String> = cycle.iter().map(ToString::to_string).collect();
        let first = ids.first().cloned().unwrap_or_default();
        println!("  Cycle: {} -> {}", ids.join(" -> "), first);
    }
}

fn run_strategies() -> Result<()> {
    for strategy in Strategy::ALL {
        println!("  {:<16} {}", strategy.as_str(), strategy.description());
    }
    Ok(())
}

fn run_config(
    default_strategy: Option<String>,
    complete: Vec<String>,
    reopen: Vec<String>,
) -> Result<()> {
    let path = Config::config_path()?;
    let mut config = Config::load_from(&path)?;
    let changed = default_strategy.is_some() || !complete.is_empty() || !reopen.is_empty();

    if let Some(name) = default_strategy {
        let strategy = config.set_default_strategy(&name)?;
        tlog!("Default strategy set to {}", strategy);
    }
    for id in complete.into_iter().map(TaskId::from) {
        if !config.mark_completed(id.clone()) {
            eprintln!("Task {} is already complete", id);
        }
    }
    for id in reopen.into_iter().map(TaskId::from) {
        if !config.reopen(&id) {
            eprintln!("Task {} was not marked complete", id);
        }
    }

    if changed {
        config.save()?;
        tlog!("Config updated at {}", path.display());
    }

    println!("Config: {}", path.display());
    println!(
        "  default_strategy: {}",
        config.effective_strategy(None)?.as_str()
    );
    let done: Vec<String> = config.completed.iter().map(ToString::to_string).collect();
    if done.is_empty() {
        println!("  completed: (none)");
    } else {
        println!("  completed: {}", done.join(", "));
    }
    Ok(())
}

fn report_failure(err: &Error, json: bool) {
    if json {
        let response = ErrorResponse::from(err);
        match serde_json::to_string_pretty(&response) {
            Ok(body) => println!("{}", body),
            Err(_) => eprintln!("Error: {}", err),
        }
        return;
    }

    match err {
        Error::CyclicDependency(report) => {
            eprintln!("Error: circular dependencies detected");
            for cycle in report.cycles() {
                let ids: Vec<String> = cycle.iter().map(ToString::to_string).collect();
                let first = ids.first().cloned().unwrap_or_default();
                eprintln!("  {} -> {}", ids.join(" -> "), first);
            }
        }
        Error::UnknownStrategy(_) => {
            eprintln!("Error: {}", ErrorResponse::from(err).error);
        }
        other => eprintln!("Error: {}", other),
    }
}
