use super::parse_bag;
use crate::cli::BagAction;
use crate::context::CliContext;
use crate::output;
use boardkit_domain::{apply_patch, Board, NodePatch, KANBAN_COMPONENT_TYPE};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BagTarget {
    Style,
    Props,
}

pub async fn handle(ctx: &mut CliContext, target: BagTarget, action: BagAction) -> anyhow::Result<()> {
    match action {
        BagAction::Set { id, patch } => {
            let bag = parse_bag(&patch, "patch")?;
            let node = ctx.node(&id)?;
            let is_board = node.component_type == KANBAN_COMPONENT_TYPE;

            let patch = match target {
                BagTarget::Style => NodePatch::style(bag),
                BagTarget::Props => {
                    if is_board {
                        // Reject props a board could not be read back from
                        Board::from_props(id.clone(), "", &apply_patch(&node.props, &bag))?;
                    }
                    NodePatch::props(bag)
                }
            };
            ctx.commit(&id, &patch).await?;
            if is_board && target == BagTarget::Props {
                ctx.replicate(&id)?;
            }
            output::output_success(ctx.node(&id)?);
        }
    }
    Ok(())
}
