//! IPC server
//!
//! Reads newline-delimited JSON-RPC requests from the UI process and writes
//! one response line per request. Requests are handled in order.

use crate::config::ConfigStore;
use crate::ipc::handlers;
use crate::ipc::protocol::*;
use anyhow::Result;
use serde_json::Value;
use std::sync::Arc;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, BufReader};
use tracing::{debug, info};

pub struct IpcServer {
    store: Arc<ConfigStore>,
}

impl IpcServer {
    pub fn new(store: Arc<ConfigStore>) -> Self {
        Self { store }
    }

    /// Serve on stdin/stdout until the UI closes the stream
    pub async fn run(&self) -> Result<()> {
        info!("IPC server starting on stdio");
        self.serve(BufReader::new(tokio::io::stdin()), tokio::io::stdout())
            .await
    }

    pub async fn serve<R, W>(&self, reader: R, mut writer: W) -> Result<()>
    where
        R: AsyncBufRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        let mut lines = reader.lines();

        while let Some(line) = lines.next_line().await? {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }

            debug!("Received request: {}", line);

            let Some(response) = self.handle_request(line).await else {
                debug!("Notification handled, no response");
                continue;
            };

            let response_json = serde_json::to_string(&response)?;
            writer.write_all(response_json.as_bytes()).await?;
            writer.write_all(b"\n").await?;
            writer.flush().await?;

            debug!("Sent response");
        }

        info!("Client closed connection");
        Ok(())
    }

    /// Handle one request line. Returns `None` for notifications.
    pub async fn handle_request(&self, content: &str) -> Option<JsonRpcResponse> {
        let request: JsonRpcRequest = match serde_json::from_str(content) {
            Ok(req) => req,
            Err(e) => {
                return Some(JsonRpcResponse::failure(
                    Value::Null,
                    JsonRpcError::new(PARSE_ERROR, format!("Parse error: {}", e)),
                ));
            }
        };

        let id = request.id.clone();

        if request.jsonrpc != "2.0" {
            return Some(JsonRpcResponse::failure(
                id.unwrap_or(Value::Null),
                JsonRpcError::new(
                    INVALID_REQUEST,
                    format!("Unsupported jsonrpc version: {}", request.jsonrpc),
                ),
            ));
        }

        let result = handlers::dispatch(&request.method, request.params, &self.store).await;

        let id = id?;
        Some(match result {
            Ok(result) => JsonRpcResponse::success(id, result),
            Err(error) => JsonRpcResponse::failure(id, error),
        })
    }
}
