use crate::domain::model::FaceletString;
use crate::domain::ports::{SolveOutcome, Solver};
use crate::utils::error::{CubeError, Result};
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use std::time::Duration;

#[derive(Serialize)]
struct SolveRequestBody<'a> {
    facelets: &'a str,
}

#[derive(Deserialize)]
struct SolveReplyBody {
    solution: String,
}

#[derive(Deserialize)]
struct ErrorReplyBody {
    error: String,
}

/// Solver running behind an HTTP endpoint.
///
/// `POST {"facelets": "..."}` answers 200 `{"solution": "..."}`, 422 for an
/// unsolvable cube and 400 when it rejects the string.
#[derive(Debug, Clone)]
pub struct HttpSolver {
    client: Client,
    endpoint: String,
}

impl HttpSolver {
    pub fn new(endpoint: impl Into<String>, timeout: Option<Duration>) -> Result<Self> {
        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            client: builder.build()?,
            endpoint: endpoint.into(),
        })
    }
}

#[async_trait]
impl Solver for HttpSolver {
    async fn solve(&self, facelets: &FaceletString) -> Result<SolveOutcome> {
        tracing::debug!("Making solver request to: {}", self.endpoint);
        let response = self
            .client
            .post(&self.endpoint)
            .json(&SolveRequestBody {
                facelets: facelets.as_str(),
            })
            .send()
            .await?;

        let status = response.status();
        tracing::debug!("Solver response status: {}", status);

        match status {
            StatusCode::OK => {
                let body: SolveReplyBody = response.json().await?;
                Ok(super::outcome_from_text(&body.solution))
            }
            StatusCode::UNPROCESSABLE_ENTITY => Ok(SolveOutcome::Unsolvable),
            StatusCode::BAD_REQUEST => {
                let text = response.text().await?;
                let details = serde_json::from_str::<ErrorReplyBody>(&text)
                    .map(|body| body.error)
                    .unwrap_or_else(|_| text.trim().to_string());
                Ok(SolveOutcome::InvalidInput(details))
            }
            other => Err(CubeError::SolverError {
                message: format!("solver service returned {}", other),
            }),
        }
    }
}
