use crate::cli::ColumnAction;
use crate::context::CliContext;
use crate::output;
use boardkit_core::BoardError;
use boardkit_domain::commands::CreateColumn;
use boardkit_domain::{ColumnUpdate, FieldUpdate};

pub async fn handle(ctx: &mut CliContext, action: ColumnAction) -> anyhow::Result<()> {
    match action {
        ColumnAction::Create { board, title, id } => {
            let column = ctx
                .with_board(&board, |c| {
                    c.execute(Box::new(CreateColumn { id, title }))?
                        .into_column()
                        .ok_or_else(|| BoardError::Internal("no column created".into()))
                })
                .await?;
            output::output_success(&column);
        }
        ColumnAction::Delete { board, id } => {
            let column = ctx
                .with_board(&board, |c| c.delete_column(id))
                .await?;
            output::output_success(serde_json::json!({
                "deleted": column.id,
                "removedTasks": column.tasks.len(),
            }));
        }
        ColumnAction::Rename {
            board,
            id,
            title,
            background_color,
            clear_color,
        } => {
            let background_color = match (background_color, clear_color) {
                (Some(color), _) => FieldUpdate::Set(color),
                (None, true) => FieldUpdate::Clear,
                (None, false) => FieldUpdate::NoChange,
            };
            if title.is_none() && !background_color.is_change() {
                anyhow::bail!("Nothing to update: pass --title, --background-color or --clear-color");
            }
            let updates = ColumnUpdate {
                title,
                background_color,
            };
            let column = ctx
                .with_board(&board, |c| c.update_column(id, updates))
                .await?;
            output::output_success(&column);
        }
        ColumnAction::Reorder { board, order } => {
            let summary = ctx
                .with_board(&board, |c| {
                    c.reorder_columns(order)?;
                    Ok(c.board().summary())
                })
                .await?;
            output::output_list(summary.columns);
        }
        ColumnAction::List { board } => {
            let board = ctx.load_board(&board).await?;
            output::output_list(board.summary().columns);
        }
    }
    Ok(())
}
