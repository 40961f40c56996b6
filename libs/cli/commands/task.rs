use bizdir_core::{
    entities::{TaskRecord, TaskStatus},
    services::{AssigneeOutcome, NewTask, Review},
    Core,
};
use clap::{Args, Subcommand};
use colored::Colorize;

use crate::utils::{
    command_error,
    display::{LogBuilder, LogType},
    time::format_ms,
};

#[derive(Args, Debug)]
pub struct Command {
    #[command(subcommand)]
    action: Action,
}

#[derive(Subcommand, Debug)]
enum Action {
    /// Assign a task to one or more employees
    Create(CreateArgs),
    /// List tasks, employees only see their own
    List(ListArgs),
    /// Mark one of your tasks as completed
    Complete(TaskArgs),
    /// Approve or reject a completed task
    Review(ReviewArgs),
}

#[derive(Args, Debug)]
struct CreateArgs {
    business_id: String,

    #[clap(short, long)]
    title: String,

    #[clap(short, long)]
    description: Option<String>,

    /// Employee receiving the task, can be repeated
    #[clap(short, long = "assignee", required = true)]
    assignees: Vec<String>,
}

#[derive(Args, Debug)]
struct ListArgs {
    business_id: String,
}

#[derive(Args, Debug)]
struct TaskArgs {
    business_id: String,
    task_id: String,
}

#[derive(Args, Debug)]
struct ReviewArgs {
    business_id: String,
    task_id: String,

    #[clap(long, conflicts_with = "reject", required_unless_present = "reject")]
    approve: bool,

    #[clap(long)]
    reject: bool,
}

pub async fn handle(command: Command, core: &Core) -> command_error::Result<()> {
    let tasks = core.tasks();

    match command.action {
        Action::Create(args) => {
            let task = NewTask {
                title: args.title,
                description: args.description.unwrap_or_default(),
            };
            let report = tasks
                .create_for_assignees(&args.business_id, task, &args.assignees)
                .await?;

            let mut log = LogBuilder::new(
                if report.is_complete() {
                    LogType::Success
                } else {
                    LogType::Warning
                },
                format!(
                    "{} of {} tasks created",
                    report.created().count(),
                    report.outcomes.len()
                ),
            );
            for (assignee, outcome) in report.outcomes.iter() {
                log = match outcome {
                    AssigneeOutcome::Created { task_id } => {
                        log.with_branch("Assigned", format!("{assignee} ({task_id})"))
                    }
                    AssigneeOutcome::Failed { reason } => {
                        log.with_branch("Failed", format!("{assignee}: {}", reason.red()))
                    }
                };
            }
            log.print();
        }
        Action::List(args) => {
            let list = tasks.list(&args.business_id).await?;
            if list.is_empty() {
                LogBuilder::new(LogType::Info, "No task").print();
            }
            for task in list {
                print_task(task);
            }
        }
        Action::Complete(args) => {
            tasks.complete(&args.business_id, &args.task_id).await?;
            LogBuilder::new(LogType::Success, "Task completed")
                .with_branch("ID", args.task_id)
                .print();
        }
        Action::Review(args) => {
            let (review, message) = if args.approve {
                (Review::Approve, "Task approved")
            } else {
                (Review::Reject, "Task rejected")
            };
            tasks.review(&args.business_id, &args.task_id, review).await?;
            LogBuilder::new(LogType::Success, message)
                .with_branch("ID", args.task_id)
                .print();
        }
    };

    Ok(())
}

fn print_task(task: TaskRecord) {
    let status = match task.status {
        TaskStatus::Pending => task.status.to_string().yellow(),
        TaskStatus::Completed => task.status.to_string().blue(),
        TaskStatus::Approved => task.status.to_string().green(),
        TaskStatus::Rejected => task.status.to_string().red(),
    };

    LogBuilder::new(LogType::Task, task.title)
        .with_branch("ID", task.id)
        .with_branch("Assignee", task.assigned_to)
        .with_branch("Status", status)
        .with_branch("Created", format_ms(task.created_at))
        .with_optional_branch("Completed", task.completed_at.map(format_ms))
        .with_optional_branch(
            "Details",
            Some(task.description).filter(|d| !d.is_empty()),
        )
        .print();
}
