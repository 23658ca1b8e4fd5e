pub mod commands;
pub mod modules;
pub mod shared;

use anyhow::Context;
use tokio::io::{AsyncBufReadExt, AsyncRead, AsyncWrite, AsyncWriteExt, BufReader};

use commands::{handle_line, AppState};
use shared::{config::AppConfig, utils::logger::init_logger};

/// Loads configuration, opens the stores and serves commands over
/// stdin/stdout until the input closes.
pub async fn run() -> anyhow::Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();
    init_logger();

    let config = AppConfig::from_env();
    log_info!(
        "Data directory: {} (reorder policy: {:?})",
        config.data_dir.display(),
        config.reorder_policy
    );

    let state = AppState::from_config(&config);
    serve(&state, tokio::io::stdin(), tokio::io::stdout()).await
}

/// Reads one command envelope per line and writes one reply per line.
/// Commands run one after another in the order they arrive.
pub async fn serve<R, W>(state: &AppState, input: R, mut output: W) -> anyhow::Result<()>
where
    R: AsyncRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut lines = BufReader::new(input).lines();

    while let Some(line) = lines
        .next_line()
        .await
        .context("Failed to read command input")?
    {
        if line.trim().is_empty() {
            continue;
        }

        let reply = handle_line(state, &line).await;
        output
            .write_all(reply.as_bytes())
            .await
            .context("Failed to write reply")?;
        output.write_all(b"\n").await?;
        output.flush().await?;
    }

    log_info!("Command input closed, shutting down");
    Ok(())
}
