use crate::cli::BoardAction;
use crate::context::CliContext;
use crate::output;
use boardkit_core::BoardError;
use boardkit_domain::{
    Board, BoardMode, BoardSummary, Column, ComponentNode, KanbanStyle, ResolvedKanbanStyle,
    KANBAN_COMPONENT_TYPE,
};
use serde::Serialize;

#[derive(Serialize)]
struct BoardView {
    id: String,
    name: String,
    mode: BoardMode,
    columns: Vec<Column>,
    style: ResolvedKanbanStyle,
    summary: BoardSummary,
}

impl BoardView {
    fn new(board: Board, style: ResolvedKanbanStyle) -> Self {
        let summary = board.summary();
        Self {
            id: board.component_id,
            name: board.name,
            mode: board.mode,
            columns: board.columns,
            style,
            summary,
        }
    }
}

pub async fn handle(ctx: &mut CliContext, action: BoardAction) -> anyhow::Result<()> {
    match action {
        BoardAction::Create { id, name, columns } => {
            if ctx.page.find(&id).is_some() {
                return Err(BoardError::Validation(format!("Component {} already exists", id)).into());
            }
            let mut board = Board::new(id.clone(), name.clone());
            for title in columns.into_iter().filter(|t| !t.trim().is_empty()) {
                board.create_column(title.trim().to_string());
            }
            let mut node = ComponentNode::new(id.clone(), KANBAN_COMPONENT_TYPE).with_name(name);
            node.props = board.to_props_patch()?;
            ctx.page.components.push(node);
            ctx.save().await?;
            ctx.replicate(&id)?;
            output::output_success(BoardView::new(board, KanbanStyle::default().resolve()));
        }
        BoardAction::Show { id } => {
            let board = ctx.load_board(&id).await?;
            let style = KanbanStyle::from_bag(&ctx.node(&id)?.style).resolve();
            output::output_success(BoardView::new(board, style));
        }
    }
    Ok(())
}
