//! Line-delimited JSON front-end: one request envelope per input line, one
//! `{"status": .., "body": ..}` response per output line.

use crate::app::response::{ApiResponse, ErrorBody};
use crate::app::routes::{ApiRequest, Method, Router};
use crate::domain::ports::{SolveRecordStore, Solver};
use crate::utils::error::Result;
use serde::Deserialize;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};

#[derive(Debug, Clone, Deserialize)]
pub struct RequestEnvelope {
    pub method: Method,
    pub path: String,
    #[serde(default)]
    pub query: HashMap<String, String>,
    #[serde(default)]
    pub headers: HashMap<String, String>,
    /// A JSON string is passed through as the raw body; anything else is
    /// re-serialized.
    #[serde(default)]
    pub body: Option<Value>,
    #[serde(default)]
    pub remote_addr: Option<String>,
}

impl From<RequestEnvelope> for ApiRequest {
    fn from(envelope: RequestEnvelope) -> Self {
        let body = match envelope.body {
            None => Vec::new(),
            Some(Value::String(raw)) => raw.into_bytes(),
            Some(value) => value.to_string().into_bytes(),
        };

        let mut request = ApiRequest::new(envelope.method, envelope.path);
        request.query = envelope.query;
        request.headers = envelope
            .headers
            .into_iter()
            .map(|(name, value)| (name.to_ascii_lowercase(), value))
            .collect();
        request.body = body;
        request.remote_addr = envelope.remote_addr;
        request
    }
}

/// Serves until `input` is exhausted and returns the number of responses written.
pub async fn serve<S, R, I, O>(router: Arc<Router<S, R>>, input: I, mut output: O) -> Result<usize>
where
    S: Solver + 'static,
    R: SolveRecordStore + 'static,
    I: AsyncBufRead + Unpin,
    O: AsyncWrite + Unpin,
{
    let mut lines = input.lines();
    let mut served = 0;

    while let Some(line) = lines.next_line().await? {
        if line.trim().is_empty() {
            continue;
        }

        let response = match serde_json::from_str::<RequestEnvelope>(&line) {
            Ok(envelope) => router.dispatch_guarded(envelope.into()).await,
            Err(e) => {
                tracing::warn!("Rejected request envelope: {}", e);
                ApiResponse::json(400, &ErrorBody::new(format!("Invalid request envelope: {}", e)))
            }
        };

        let mut encoded = serde_json::to_vec(&response)?;
        encoded.push(b'\n');
        output.write_all(&encoded).await?;
        output.flush().await?;
        served += 1;
    }

    Ok(served)
}
