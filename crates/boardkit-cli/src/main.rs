mod cli;
mod context;
mod handlers;
mod output;

use boardkit_core::AppConfig;
use clap::{CommandFactory, Parser};
use cli::{Cli, Commands, PageAction};
use context::CliContext;
use handlers::bag::BagTarget;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    if let Ok(log_path) = std::env::var("BOARDKIT_DEBUG_LOG") {
        let log_file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&log_path)?;

        tracing_subscriber::fmt()
            .with_writer(log_file)
            .with_max_level(tracing::Level::DEBUG)
            .with_target(true)
            .with_thread_ids(true)
            .with_file(true)
            .with_line_number(true)
            .with_ansi(false)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_writer(std::io::stderr)
            .with_max_level(tracing::Level::WARN)
            .init();
    }

    let cli = Cli::parse();
    if let Err(e) = run(cli).await {
        output::output_error(&format!("{:#}", e));
    }
    Ok(())
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    if let Commands::Completions { shell } = cli.command {
        clap_complete::generate(
            shell,
            &mut Cli::command(),
            "boardkit",
            &mut std::io::stdout(),
        );
        return Ok(());
    }

    let page_path = cli
        .page_file
        .ok_or_else(|| anyhow::anyhow!("PAGE_FILE is required (or set BOARDKIT_PAGE)"))?;

    if let Commands::Page(ref page_cmd) = cli.command {
        if matches!(page_cmd.action, PageAction::Init) {
            return handlers::page::init(&page_path).await;
        }
    }

    let mut config = AppConfig::load();
    if let Some(url) = cli.remote_url {
        config.remote_url = Some(url);
    }
    if let Some(dir) = cli.data_dir {
        config.data_dir = Some(dir);
    }

    let mut ctx = CliContext::load(&page_path, &config).await?;

    match cli.command {
        Commands::Page(page_cmd) => {
            handlers::page::handle(&mut ctx, page_cmd.action).await?;
        }
        Commands::Board(board_cmd) => {
            handlers::board::handle(&mut ctx, board_cmd.action).await?;
        }
        Commands::Column(column_cmd) => {
            handlers::column::handle(&mut ctx, column_cmd.action).await?;
        }
        Commands::Task(task_cmd) => {
            handlers::task::handle(&mut ctx, task_cmd.action).await?;
        }
        Commands::Drag { id, event } => {
            handlers::drag::handle(&mut ctx, id, event).await?;
        }
        Commands::Style(bag_cmd) => {
            handlers::bag::handle(&mut ctx, BagTarget::Style, bag_cmd.action).await?;
        }
        Commands::Props(bag_cmd) => {
            handlers::bag::handle(&mut ctx, BagTarget::Props, bag_cmd.action).await?;
        }
        Commands::Todo(todo_cmd) => {
            handlers::todo::handle(&mut ctx, todo_cmd.action).await?;
        }
        Commands::Completions { .. } => {}
    }

    ctx.finish().await?;
    Ok(())
}
