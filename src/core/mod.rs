pub mod facelet;
pub mod orchestrator;
pub mod validator;

pub use crate::domain::model::{CubeState, FaceletString, FacetColor, MoveSequence};
pub use crate::domain::ports::{SolveOutcome, SolveRecordStore, Solver};
pub use crate::utils::error::Result;
