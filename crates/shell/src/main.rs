//! Terminal front end for the task list
//!
//! Reads one command per line from stdin and redraws the list after each.
//! Logs go to stderr; see `config` for the environment variables.

mod command;
mod config;
mod render;
mod session;

use std::io::IsTerminal;
use std::sync::Arc;

use anyhow::Context;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, BufReader};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use todo_core::app::AppState;
use todo_core::storage::{FileStore, KeyValueStore, MemoryStore};

use crate::command::Command;
use crate::config::ShellConfig;
use crate::session::{Reply, Session};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "todo_shell=info,todo_core=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = ShellConfig::from_env().context("Invalid configuration")?;
    let storage = open_storage(&config).context("Failed to open storage")?;

    let app = AppState::load(storage, config.default_theme);
    let mut session = Session::new(app);
    let color = std::io::stdout().is_terminal();

    let stdin = BufReader::new(tokio::io::stdin());
    let mut stdout = tokio::io::stdout();

    tokio::select! {
        result = run(&mut session, stdin, &mut stdout, color) => result?,
        _ = tokio::signal::ctrl_c() => {}
    }

    stdout.write_all(b"\n").await?;
    stdout.flush().await?;
    Ok(())
}

/// Read commands until EOF or `quit`, redrawing after each
///
/// Lines that are not valid UTF-8 are skipped; only I/O errors end the loop.
async fn run<S, R, W>(
    session: &mut Session<S>,
    mut input: R,
    output: &mut W,
    color: bool,
) -> std::io::Result<()>
where
    S: KeyValueStore,
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    output
        .write_all(render::render(&session.app().view(), color).as_bytes())
        .await?;

    let mut buf = Vec::new();
    loop {
        output.write_all(b"> ").await?;
        output.flush().await?;

        buf.clear();
        if input.read_until(b'\n', &mut buf).await? == 0 {
            break;
        }

        let reply = match std::str::from_utf8(&buf) {
            Ok(line) => match Command::parse(line) {
                Ok(Some(command)) => session.handle(command),
                Ok(None) => continue,
                Err(e) => Reply::Print(e.to_string()),
            },
            Err(e) => {
                tracing::warn!("Ignoring input line: {}", e);
                Reply::Print("Ignored a line that is not valid UTF-8".to_string())
            }
        };

        let text = match reply {
            Reply::Quit => break,
            Reply::Print(text) => format!("{}\n", text),
            Reply::Redraw(status) => {
                let mut screen = render::render(&session.app().view(), color);
                if let Some(status) = status {
                    screen.push_str(&format!("\n{}\n", status));
                }
                screen
            }
        };
        output.write_all(text.as_bytes()).await?;
    }
    output.flush().await
}

fn open_storage(config: &ShellConfig) -> anyhow::Result<Arc<dyn KeyValueStore>> {
    if config.ephemeral {
        tracing::info!("Using in-memory storage; nothing will be saved");
        let storage: Arc<dyn KeyValueStore> =
            Arc::new(MemoryStore::new().with_quota(Some(config.quota_bytes)));
        return Ok(storage);
    }

    std::fs::create_dir_all(&config.data_dir).with_context(|| {
        format!("Cannot create data directory {}", config.data_dir.display())
    })?;
    tracing::info!("Using data directory: {:?}", config.data_dir);

    let storage: Arc<dyn KeyValueStore> =
        Arc::new(FileStore::new(&config.data_dir).with_quota(Some(config.quota_bytes)));
    Ok(storage)
}
