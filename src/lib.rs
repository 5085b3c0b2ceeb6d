pub mod adapters;
pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use adapters::store::{JsonlStore, MemoryStore};
pub use adapters::solver::{HttpSolver, ProcessSolver};
pub use app::{ApiRequest, ApiResponse, Method, Router};
pub use config::AppConfig;
pub use crate::core::orchestrator::{SolveError, SolveService, SolveSuccess};
pub use domain::model::{CubeState, FaceletString, FacetColor, MoveSequence, SolveRecord};
pub use domain::ports::{SolveOutcome, SolveRecordStore, Solver};
pub use utils::error::{CubeError, Result};
