use anyhow::Result;
use jsonrpc_v2::{MapRouter, ResponseObjects, Server};
use std::io::Write;
use std::sync::Arc;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tracing::{debug, error};

/// Line-delimited JSON-RPC loop. One request per line, one response line
/// per request; notifications produce no output.
pub async fn run_with_io<R, W>(
    server: Arc<Server<MapRouter>>,
    reader: R,
    mut writer: W,
) -> Result<()>
where
    R: AsyncBufRead + Unpin,
    W: Write,
{
    let mut lines = reader.lines();

    while let Some(line) = lines.next_line().await? {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }
        let response = server.handle(trimmed.as_bytes()).await;
        match response {
            ResponseObjects::Empty => debug!("Notification handled"),
            other => match serde_json::to_string(&other) {
                Ok(s) => {
                    writeln!(writer, "{s}")?;
                    writer.flush()?;
                }
                Err(e) => error!(error = %e, "Failed to serialize JSON-RPC response"),
            },
        }
    }

    debug!("Input closed, shutting down");
    Ok(())
}
