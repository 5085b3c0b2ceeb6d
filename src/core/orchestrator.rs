use crate::core::facelet::encode;
use crate::core::validator::{validate, InvalidReason};
use crate::domain::model::{CubeState, FaceletString, MoveSequence, NewSolveRecord};
use crate::domain::ports::{SolveOutcome, SolveRecordStore, Solver};
use crate::utils::error::CubeError;
use chrono::Utc;
use std::time::{Duration, Instant};
use thiserror::Error;

pub const DEFAULT_PERSIST_TIMEOUT: Duration = Duration::from_millis(500);

#[derive(Debug, Clone, PartialEq)]
pub enum SolveSuccess {
    AlreadySolved {
        facelets: FaceletString,
    },
    Solved {
        facelets: FaceletString,
        moves: MoveSequence,
        /// Wall time of the solver call, rounded to two decimals.
        solve_time_ms: f64,
    },
}

impl SolveSuccess {
    pub fn move_count(&self) -> usize {
        match self {
            SolveSuccess::AlreadySolved { .. } => 0,
            SolveSuccess::Solved { moves, .. } => moves.len(),
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum SolveError {
    #[error("Invalid cube state: {0}")]
    InvalidState(InvalidReason),

    #[error("Cube state is unsolvable")]
    Unsolvable,

    #[error("Invalid cube configuration - this cube state is not physically solvable")]
    InvalidConfiguration {
        details: String,
        facelets: FaceletString,
    },

    #[error("Solver error: {0}")]
    SolverFailure(String),
}

/// Runs one cube through validation, encoding and the solver, and records
/// the result.
pub struct SolveService<S: Solver, R: SolveRecordStore> {
    solver: S,
    store: R,
    persist_timeout: Duration,
}

impl<S: Solver, R: SolveRecordStore> SolveService<S, R> {
    pub fn new(solver: S, store: R) -> Self {
        Self {
            solver,
            store,
            persist_timeout: DEFAULT_PERSIST_TIMEOUT,
        }
    }

    pub fn with_persist_timeout(mut self, timeout: Duration) -> Self {
        self.persist_timeout = timeout;
        self
    }

    pub fn store(&self) -> &R {
        &self.store
    }

    /// Validation and encoding only; the solver is never consulted.
    pub fn check(&self, cube: &CubeState) -> Result<FaceletString, InvalidReason> {
        validate(cube).into_result()?;
        Ok(encode(cube))
    }

    pub async fn solve(
        &self,
        cube: &CubeState,
        client_address: Option<String>,
    ) -> Result<SolveSuccess, SolveError> {
        let facelets = self.check(cube).map_err(SolveError::InvalidState)?;
        tracing::debug!(facelets = %facelets, "Cube passed validation");

        if facelets.is_solved() {
            tracing::info!("Cube is already solved, skipping solver");
            self.persist(&facelets, &MoveSequence::default(), 0.0, client_address)
                .await;
            return Ok(SolveSuccess::AlreadySolved { facelets });
        }

        tracing::info!(facelets = %facelets, "Invoking solver");
        let started = Instant::now();
        let outcome = self.solver.solve(&facelets).await;
        let solve_time_ms = started.elapsed().as_secs_f64() * 1000.0;

        let solution = match outcome {
            Ok(SolveOutcome::Solved(solution)) => solution,
            Ok(SolveOutcome::Unsolvable) => {
                tracing::info!(facelets = %facelets, "Solver reported cube as unsolvable");
                return Err(SolveError::Unsolvable);
            }
            Ok(SolveOutcome::InvalidInput(details)) => {
                tracing::info!(facelets = %facelets, details = %details, "Solver rejected facelet string");
                return Err(SolveError::InvalidConfiguration { details, facelets });
            }
            Err(e) => {
                tracing::error!(facelets = %facelets, "Solver failed: {}", e);
                let description = match e {
                    CubeError::SolverError { message } => message,
                    other => other.to_string(),
                };
                return Err(SolveError::SolverFailure(description));
            }
        };

        let moves = MoveSequence::from_solution_text(&solution);
        tracing::info!(
            "Cube solved in {:.2} ms with {} moves",
            solve_time_ms,
            moves.len()
        );

        self.persist(&facelets, &moves, solve_time_ms, client_address)
            .await;

        Ok(SolveSuccess::Solved {
            facelets,
            moves,
            solve_time_ms: round_ms(solve_time_ms),
        })
    }

    // Failures here are logged and dropped; the caller already has its answer.
    async fn persist(
        &self,
        facelets: &FaceletString,
        moves: &MoveSequence,
        solve_time_ms: f64,
        client_address: Option<String>,
    ) {
        let record = NewSolveRecord {
            facelet_string: facelets.to_string(),
            solution: moves.to_text(),
            move_count: u32::try_from(moves.len()).unwrap_or(u32::MAX),
            solve_time_ms,
            timestamp: Utc::now(),
            ip_address: client_address,
        };

        match tokio::time::timeout(self.persist_timeout, self.store.create(record)).await {
            Ok(Ok(saved)) => tracing::debug!(id = saved.id, "Solve record saved"),
            Ok(Err(e)) => tracing::warn!("Failed to save solve record: {}", e),
            Err(_) => tracing::warn!(
                timeout_ms = self.persist_timeout.as_millis() as u64,
                "Saving solve record timed out"
            ),
        }
    }
}

fn round_ms(ms: f64) -> f64 {
    (ms * 100.0).round() / 100.0
}
