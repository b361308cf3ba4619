use crate::cli::TodoAction;
use crate::context::CliContext;
use crate::output;
use boardkit_core::BoardError;
use boardkit_domain::tree::{add_todo_item, toggle_todo_item};
use boardkit_domain::{find_todo_list_by_id, ComponentNode, TodoItem, TODO_COMPONENT_TYPE};
use serde_json::json;
use uuid::Uuid;

pub async fn handle(ctx: &mut CliContext, action: TodoAction) -> anyhow::Result<()> {
    match action {
        TodoAction::Create { id, name } => {
            if ctx.page.find(&id).is_some() {
                return Err(BoardError::Validation(format!("Component {} already exists", id)).into());
            }
            let mut node = ComponentNode::new(id, TODO_COMPONENT_TYPE).with_name(name);
            node.props.insert("tasks".to_string(), json!([]));
            ctx.page.components.push(node.clone());
            ctx.save().await?;
            output::output_success(&node);
        }
        TodoAction::Add { id, text } => {
            let item = TodoItem {
                id: Uuid::new_v4().to_string(),
                text,
                completed: false,
            };
            let patch = add_todo_item(ctx.node(&id)?, item.clone())?;
            ctx.commit(&id, &patch).await?;
            output::output_success(&item);
        }
        TodoAction::Toggle { id, item } => {
            let patch = toggle_todo_item(ctx.node(&id)?, &item)?;
            ctx.commit(&id, &patch).await?;
            let toggled = find_todo_list_by_id(&ctx.page.components, &id)
                .and_then(|list| list.items.into_iter().find(|i| i.id == item))
                .ok_or_else(|| BoardError::not_found(format!("Todo item {}", item)))?;
            output::output_success(&toggled);
        }
    }
    Ok(())
}
