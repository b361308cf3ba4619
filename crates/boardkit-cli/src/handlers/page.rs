use crate::cli::PageAction;
use crate::context::CliContext;
use crate::output;
use std::path::Path;

pub async fn init(path: &Path) -> anyhow::Result<()> {
    CliContext::init(path).await?;
    output::output_success(serde_json::json!({"created": path.display().to_string()}));
    Ok(())
}

pub async fn handle(ctx: &mut CliContext, action: PageAction) -> anyhow::Result<()> {
    match action {
        // Handled before a context exists
        PageAction::Init => anyhow::bail!("Page file already loaded"),
        PageAction::Show => output::output_success(&ctx.page),
    }
    Ok(())
}
