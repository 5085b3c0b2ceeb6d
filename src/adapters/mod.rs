// Adapters layer: concrete solvers and history stores behind the domain ports.

pub mod export;
pub mod solver;
pub mod store;

use crate::config::{AppConfig, PersistenceKind, SolverKind, FACELETS_PLACEHOLDER};
use crate::domain::ports::{SolveRecordStore, Solver};
use crate::utils::error::{CubeError, Result};

pub fn build_solver(config: &AppConfig) -> Result<Box<dyn Solver>> {
    match config.solver.kind {
        SolverKind::Process => {
            let command = config
                .solver
                .command
                .clone()
                .ok_or_else(|| CubeError::MissingConfigError {
                    field: "solver.command".to_string(),
                })?;
            let args = config
                .solver
                .args
                .clone()
                .unwrap_or_else(|| vec![FACELETS_PLACEHOLDER.to_string()]);
            Ok(Box::new(
                solver::ProcessSolver::new(command, args).with_timeout(config.solver_timeout()),
            ))
        }
        SolverKind::Http => {
            let endpoint = config
                .solver
                .endpoint
                .clone()
                .ok_or_else(|| CubeError::MissingConfigError {
                    field: "solver.endpoint".to_string(),
                })?;
            Ok(Box::new(solver::HttpSolver::new(endpoint, config.solver_timeout())?))
        }
    }
}

pub fn build_store(config: &AppConfig) -> Result<Box<dyn SolveRecordStore>> {
    match config.persistence.kind {
        PersistenceKind::Memory => Ok(Box::new(store::MemoryStore::new())),
        PersistenceKind::Jsonl => {
            let path = config
                .persistence
                .path
                .clone()
                .ok_or_else(|| CubeError::MissingConfigError {
                    field: "persistence.path".to_string(),
                })?;
            Ok(Box::new(store::JsonlStore::new(path)))
        }
    }
}
