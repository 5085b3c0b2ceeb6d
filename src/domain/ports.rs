use crate::domain::model::{FaceletString, NewSolveRecord, SolveRecord};
use crate::utils::error::Result;
use async_trait::async_trait;
use std::sync::Arc;

/// What the solver said about a facelet string it accepted to look at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SolveOutcome {
    /// Raw solution text, move tokens separated by whitespace.
    Solved(String),
    /// The string is well-formed but no move sequence reaches it.
    Unsolvable,
    /// The solver refused the string; carries its diagnostic.
    InvalidInput(String),
}

/// External solving algorithm. Unexpected failures are returned as `Err`.
#[async_trait]
pub trait Solver: Send + Sync {
    async fn solve(&self, facelets: &FaceletString) -> Result<SolveOutcome>;
}

/// Durable solve history.
#[async_trait]
pub trait SolveRecordStore: Send + Sync {
    async fn create(&self, record: NewSolveRecord) -> Result<SolveRecord>;

    /// Newest first, together with the total number of stored records.
    async fn list(&self, limit: u32, offset: u32) -> Result<(Vec<SolveRecord>, u64)>;
}

#[async_trait]
impl<T: Solver + ?Sized> Solver for Box<T> {
    async fn solve(&self, facelets: &FaceletString) -> Result<SolveOutcome> {
        (**self).solve(facelets).await
    }
}

#[async_trait]
impl<T: Solver + ?Sized> Solver for Arc<T> {
    async fn solve(&self, facelets: &FaceletString) -> Result<SolveOutcome> {
        (**self).solve(facelets).await
    }
}

#[async_trait]
impl<T: SolveRecordStore + ?Sized> SolveRecordStore for Box<T> {
    async fn create(&self, record: NewSolveRecord) -> Result<SolveRecord> {
        (**self).create(record).await
    }

    async fn list(&self, limit: u32, offset: u32) -> Result<(Vec<SolveRecord>, u64)> {
        (**self).list(limit, offset).await
    }
}

#[async_trait]
impl<T: SolveRecordStore + ?Sized> SolveRecordStore for Arc<T> {
    async fn create(&self, record: NewSolveRecord) -> Result<SolveRecord> {
        (**self).create(record).await
    }

    async fn list(&self, limit: u32, offset: u32) -> Result<(Vec<SolveRecord>, u64)> {
        (**self).list(limit, offset).await
    }
}
