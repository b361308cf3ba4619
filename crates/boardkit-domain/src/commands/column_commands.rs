use super::{Command, CommandContext, CommandOutcome};
use crate::{ColumnId, ColumnUpdate};
use boardkit_core::BoardResult;

/// Append a new column
pub struct CreateColumn {
    /// Caller-chosen id; generated when `None`.
    pub id: Option<ColumnId>,
    pub title: String,
}

impl Command for CreateColumn {
    fn execute(&self, context: &mut CommandContext) -> BoardResult<CommandOutcome> {
        let column = match &self.id {
            Some(id) => context
                .board
                .create_column_with_id(id.clone(), self.title.clone())?,
            None => context.board.create_column(self.title.clone()),
        };
        Ok(CommandOutcome::Column(column))
    }

    fn description(&self) -> String {
        format!("Create column: '{}'", self.title)
    }
}

/// Update column title or background
pub struct UpdateColumn {
    pub column_id: ColumnId,
    pub updates: ColumnUpdate,
}

impl Command for UpdateColumn {
    fn execute(&self, context: &mut CommandContext) -> BoardResult<CommandOutcome> {
        let column = context
            .board
            .update_column(&self.column_id, self.updates.clone())?;
        Ok(CommandOutcome::Column(column))
    }

    fn description(&self) -> String {
        format!("Update column {}", self.column_id)
    }
}

/// Delete a column and every task in it
pub struct DeleteColumn {
    pub column_id: ColumnId,
}

impl Command for DeleteColumn {
    fn execute(&self, context: &mut CommandContext) -> BoardResult<CommandOutcome> {
        let column = context.board.delete_column(&self.column_id)?;
        Ok(CommandOutcome::Column(column))
    }

    fn description(&self) -> String {
        format!("Delete column {}", self.column_id)
    }
}

/// Replace the column display order
pub struct ReorderColumns {
    pub order: Vec<ColumnId>,
}

impl Command for ReorderColumns {
    fn execute(&self, context: &mut CommandContext) -> BoardResult<CommandOutcome> {
        context.board.reorder_columns(&self.order);
        Ok(CommandOutcome::Reordered)
    }

    fn description(&self) -> String {
        format!("Reorder columns: {}", self.order.join(", "))
    }
}
