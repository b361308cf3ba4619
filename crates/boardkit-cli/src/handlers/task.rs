use super::parse_bag;
use crate::cli::{TaskAction, TaskAddArgs};
use crate::context::CliContext;
use crate::output;
use boardkit_core::BoardError;
use boardkit_domain::{NewTask, TaskId, TaskMetrics, TaskUpdate};
use chrono::Utc;
use serde::Serialize;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct TaskMetricsView {
    task_id: TaskId,
    column_id: String,
    #[serde(flatten)]
    metrics: TaskMetrics,
}

pub async fn handle(ctx: &mut CliContext, action: TaskAction) -> anyhow::Result<()> {
    match action {
        TaskAction::Add(args) => {
            let TaskAddArgs {
                board,
                column,
                title,
                description,
                color,
            } = args;
            let draft = NewTask {
                title,
                description,
                color,
            };
            let task = ctx
                .with_board(&board, |c| c.add_task(column, draft))
                .await?;
            output::output_success(&task);
        }
        TaskAction::Update { board, id, patch } => {
            let updates = TaskUpdate::from_bag(&parse_bag(&patch, "patch")?)?;
            let task = ctx
                .with_board(&board, |c| c.update_task(id, updates))
                .await?;
            output::output_success(&task);
        }
        TaskAction::Move {
            board,
            id,
            to,
            index,
        } => {
            let task = ctx
                .with_board(&board, |c| {
                    let from = c
                        .board()
                        .find_task(id)
                        .map(|t| t.column_id.clone())
                        .ok_or_else(|| BoardError::not_found(format!("Task {}", id)))?;
                    let index = index.unwrap_or_else(|| {
                        c.board().column(&to).map_or(0, |col| col.tasks.len())
                    });
                    c.move_task(id, from, to, index)
                })
                .await?;
            output::output_success(&task);
        }
        TaskAction::Toggle { board, id } => {
            let task = ctx
                .with_board(&board, |c| c.toggle_complete(id))
                .await?;
            output::output_success(&task);
        }
        TaskAction::Remove { board, id } => {
            let task = ctx
                .with_board(&board, |c| c.remove_task(id))
                .await?;
            output::output_success(serde_json::json!({"deleted": task.id}));
        }
        TaskAction::List { board, column } => {
            let board = ctx.load_board(&board).await?;
            let tasks = match column {
                Some(column_id) => board
                    .column(&column_id)
                    .ok_or_else(|| BoardError::not_found(format!("Column {}", column_id)))?
                    .tasks
                    .clone(),
                None => board.flatten_tasks(),
            };
            output::output_list(tasks);
        }
        TaskAction::Metrics { board, id } => {
            let board = ctx.load_board(&board).await?;
            let task = board
                .find_task(id)
                .ok_or_else(|| BoardError::not_found(format!("Task {}", id)))?;
            output::output_success(TaskMetricsView {
                task_id: task.id,
                column_id: task.column_id.clone(),
                metrics: TaskMetrics::compute(task, &ctx.page.components, Utc::now()),
            });
        }
    }
    Ok(())
}
