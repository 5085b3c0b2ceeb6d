use crate::app::error::ApiError;
use crate::app::response::{
    ApiResponse, HealthBody, HistoryBody, HistoryEntry, SolveBody, ValidateBody,
    ALREADY_SOLVED_MESSAGE, HEALTH_MESSAGE, STATUS_ERROR, STATUS_SUCCESS,
};
use crate::app::routes::ApiRequest;
use crate::app::schema::{parse_cube_request, parse_history_query};
use crate::core::orchestrator::{SolveService, SolveSuccess};
use crate::domain::ports::{SolveRecordStore, Solver};

pub const UNKNOWN_CLIENT: &str = "unknown";

/// First `X-Forwarded-For` hop, then the peer address, then [`UNKNOWN_CLIENT`].
pub fn client_address(request: &ApiRequest) -> String {
    request
        .header("x-forwarded-for")
        .and_then(|forwarded| forwarded.split(',').next())
        .map(str::trim)
        .filter(|hop| !hop.is_empty())
        .or_else(|| request.remote_addr.as_deref().filter(|addr| !addr.is_empty()))
        .unwrap_or(UNKNOWN_CLIENT)
        .to_string()
}

pub async fn solve<S: Solver, R: SolveRecordStore>(
    service: &SolveService<S, R>,
    request: &ApiRequest,
) -> ApiResponse {
    let cube_request = match parse_cube_request(&request.body) {
        Ok(cube_request) => cube_request,
        Err(e) => return ApiError::from(e).into_response(),
    };

    match service
        .solve(&cube_request.cube, Some(client_address(request)))
        .await
    {
        Ok(SolveSuccess::AlreadySolved { facelets }) => ApiResponse::json(
            200,
            &SolveBody {
                solution: Vec::new(),
                move_count: 0,
                status: STATUS_SUCCESS,
                message: Some(ALREADY_SOLVED_MESSAGE),
                solve_time_ms: None,
                facelet_string: facelets.to_string(),
            },
        ),
        Ok(SolveSuccess::Solved {
            facelets,
            moves,
            solve_time_ms,
        }) => ApiResponse::json(
            200,
            &SolveBody {
                move_count: moves.len(),
                solution: moves.tokens().to_vec(),
                status: STATUS_SUCCESS,
                message: None,
                solve_time_ms: Some(solve_time_ms),
                facelet_string: facelets.to_string(),
            },
        ),
        Err(e) => ApiError::from(e).into_response(),
    }
}

pub fn validate<S: Solver, R: SolveRecordStore>(
    service: &SolveService<S, R>,
    request: &ApiRequest,
) -> ApiResponse {
    let cube_request = match parse_cube_request(&request.body) {
        Ok(cube_request) => cube_request,
        Err(e) => return ApiError::from(e).into_response(),
    };

    match service.check(&cube_request.cube) {
        Ok(facelets) => ApiResponse::json(
            200,
            &ValidateBody {
                valid: true,
                message: "Valid".to_string(),
                facelet_string: Some(facelets.to_string()),
                status: STATUS_SUCCESS,
            },
        ),
        Err(reason) => ApiResponse::json(
            400,
            &ValidateBody {
                valid: false,
                message: reason.to_string(),
                facelet_string: None,
                status: STATUS_ERROR,
            },
        ),
    }
}

pub fn health() -> ApiResponse {
    ApiResponse::json(
        200,
        &HealthBody {
            status: "healthy",
            message: HEALTH_MESSAGE,
        },
    )
}

pub async fn history<S: Solver, R: SolveRecordStore>(
    service: &SolveService<S, R>,
    request: &ApiRequest,
) -> ApiResponse {
    let query = match parse_history_query(&request.query) {
        Ok(query) => query,
        Err(e) => return ApiError::from(e).into_response(),
    };

    match service.store().list(query.limit, query.offset).await {
        Ok((records, total_count)) => ApiResponse::json(
            200,
            &HistoryBody {
                solves: records.iter().map(HistoryEntry::from).collect(),
                total_count,
                limit: query.limit,
                offset: query.offset,
                status: STATUS_SUCCESS,
            },
        ),
        Err(e) => {
            tracing::error!("Failed to load solve history: {}", e);
            ApiError::Server(e.to_string()).into_response()
        }
    }
}
