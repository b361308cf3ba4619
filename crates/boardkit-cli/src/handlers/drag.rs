use super::parse_json;
use crate::context::CliContext;
use crate::output;
use boardkit_domain::DragEndEvent;

pub async fn handle(ctx: &mut CliContext, id: String, event: String) -> anyhow::Result<()> {
    let event: DragEndEvent = parse_json(&event, "drag event")?;
    let moved = ctx.with_board(&id, |c| c.on_drag_end(event)).await?;
    if moved.is_none() {
        tracing::info!("Drop on {} left the board unchanged", id);
    }
    output::output_success(serde_json::json!({
        "changed": moved.is_some(),
        "task": moved,
    }));
    Ok(())
}
