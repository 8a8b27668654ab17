mod input;
mod render;
mod runtime;
mod ui;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use parley_core::{config, tracing_setup, ChatClient, EventQueue};

use crate::runtime::run_app;
use crate::ui::App;

#[derive(Parser)]
#[command(name = "parley", about = "Terminal client for group chat", version)]
struct Args {
    /// Credentials file (defaults to ~/.parleyrc)
    #[arg(long)]
    rcfile: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    tracing_setup::init_tracing()?;

    let rc_path = config::rc_file_path(args.rcfile.as_deref())?;
    let credentials = config::load_credentials(&rc_path)?;
    let client = ChatClient::new(credentials).context("failed to build HTTP client")?;

    // Everything that can fail before the alternate screen flips on should
    // fail here, with a plain error message on a normal terminal.
    let backlog = client
        .unread_messages(10, 10)
        .await
        .context("failed to fetch unread messages")?;
    let channels = match client.subscriptions().await {
        Ok(channels) => channels,
        Err(err) => {
            tracing::warn!(%err, "failed to fetch subscriptions");
            Vec::new()
        }
    };
    let mut queue = EventQueue::open(client.clone())
        .await
        .context("failed to register event queue")?;

    let mut app = App::new(channels);
    for message in backlog {
        app.push_message(message);
    }

    // Restore the terminal before any panic report hits stderr.
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = ui::restore_terminal();
        original_hook(panic_info);
    }));

    let mut terminal = ui::init_terminal()?;
    let result = run_app(&mut terminal, &mut app, &client, &mut queue).await;
    ui::restore_terminal()?;

    if let Err(err) = result {
        eprintln!("Error: {err:#}");
    }

    Ok(())
}
