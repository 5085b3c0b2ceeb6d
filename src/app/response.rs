use crate::domain::model::SolveRecord;
use serde::Serialize;
use serde_json::{json, Value};

pub const STATUS_SUCCESS: &str = "success";
pub const STATUS_ERROR: &str = "error";
pub const ALREADY_SOLVED_MESSAGE: &str = "Cube is already solved";
pub const HEALTH_MESSAGE: &str = "Rubik's Cube Solver API is running";

#[derive(Debug, Clone, PartialEq, Serialize, serde::Deserialize)]
pub struct ApiResponse {
    pub status: u16,
    pub body: Value,
}

impl ApiResponse {
    pub fn json<T: Serialize>(status: u16, body: &T) -> Self {
        match serde_json::to_value(body) {
            Ok(body) => Self { status, body },
            Err(e) => {
                tracing::error!("Failed to serialize response body: {}", e);
                Self {
                    status: 500,
                    body: json!({ "error": "Server error: response serialization failed", "status": STATUS_ERROR }),
                }
            }
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub facelet_string: Option<String>,
    pub status: &'static str,
}

impl ErrorBody {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            details: None,
            facelet_string: None,
            status: STATUS_ERROR,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct SolveBody {
    pub solution: Vec<String>,
    pub move_count: usize,
    pub status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub solve_time_ms: Option<f64>,
    pub facelet_string: String,
}

#[derive(Debug, Serialize)]
pub struct ValidateBody {
    pub valid: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub facelet_string: Option<String>,
    pub status: &'static str,
}

#[derive(Debug, Serialize)]
pub struct HealthBody {
    pub status: &'static str,
    pub message: &'static str,
}

#[derive(Debug, Serialize)]
pub struct HistoryEntry {
    pub id: u64,
    pub facelet_string: String,
    pub solution: Vec<String>,
    pub move_count: u32,
    pub solve_time_ms: f64,
    pub timestamp: String,
    pub ip_address: Option<String>,
}

impl From<&SolveRecord> for HistoryEntry {
    fn from(record: &SolveRecord) -> Self {
        Self {
            id: record.id,
            facelet_string: record.facelet_string.clone(),
            solution: record.moves().tokens().to_vec(),
            move_count: record.move_count,
            solve_time_ms: record.solve_time_ms,
            timestamp: record.timestamp.to_rfc3339(),
            ip_address: record.ip_address.clone(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct HistoryBody {
    pub solves: Vec<HistoryEntry>,
    pub total_count: u64,
    pub limit: u32,
    pub offset: u32,
    pub status: &'static str,
}
