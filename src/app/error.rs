use crate::app::response::{ApiResponse, ErrorBody};
use crate::app::schema::SchemaError;
use crate::core::orchestrator::SolveError;
use thiserror::Error;

/// Every way a request can end without a success body.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ApiError {
    #[error(transparent)]
    Schema(#[from] SchemaError),

    #[error(transparent)]
    Solve(#[from] SolveError),

    #[error("Not found")]
    NotFound,

    #[error("Method not allowed")]
    MethodNotAllowed,

    #[error("Server error: {0}")]
    Server(String),
}

impl ApiError {
    pub fn status_code(&self) -> u16 {
        match self {
            ApiError::Schema(_) => 400,
            ApiError::Solve(SolveError::SolverFailure(_)) => 500,
            ApiError::Solve(_) => 400,
            ApiError::NotFound => 404,
            ApiError::MethodNotAllowed => 405,
            ApiError::Server(_) => 500,
        }
    }

    pub fn into_response(self) -> ApiResponse {
        let status = self.status_code();
        let mut body = ErrorBody::new(self.to_string());
        if let ApiError::Solve(SolveError::InvalidConfiguration { details, facelets }) = self {
            body.details = Some(details);
            body.facelet_string = Some(facelets.to_string());
        }
        ApiResponse::json(status, &body)
    }
}
