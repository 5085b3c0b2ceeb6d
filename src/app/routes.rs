use crate::app::error::ApiError;
use crate::app::handlers;
use crate::app::response::ApiResponse;
use crate::core::orchestrator::SolveService;
use crate::domain::ports::{SolveRecordStore, Solver};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Method {
    Get,
    Post,
    Put,
    Patch,
    Delete,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Route {
    Solve,
    Validate,
    Health,
    History,
}

const ROUTES: [(Method, &str, Route); 4] = [
    (Method::Post, "/solve", Route::Solve),
    (Method::Post, "/validate", Route::Validate),
    (Method::Get, "/health", Route::Health),
    (Method::Get, "/history", Route::History),
];

fn resolve(method: Method, path: &str) -> Result<Route, ApiError> {
    let path = match path.trim_end_matches('/') {
        "" => "/",
        trimmed => trimmed,
    };

    let mut path_known = false;
    for (route_method, route_path, route) in ROUTES {
        if route_path == path {
            if route_method == method {
                return Ok(route);
            }
            path_known = true;
        }
    }

    Err(if path_known {
        ApiError::MethodNotAllowed
    } else {
        ApiError::NotFound
    })
}

/// Transport-neutral request as handed over by whatever front-end is in use.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiRequest {
    pub method: Method,
    pub path: String,
    pub query: HashMap<String, String>,
    /// Keys are lower-cased.
    pub headers: HashMap<String, String>,
    pub body: Vec<u8>,
    pub remote_addr: Option<String>,
}

impl ApiRequest {
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            query: HashMap::new(),
            headers: HashMap::new(),
            body: Vec::new(),
            remote_addr: None,
        }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::Get, path)
    }

    pub fn post(path: impl Into<String>, body: impl Into<Vec<u8>>) -> Self {
        Self {
            body: body.into(),
            ..Self::new(Method::Post, path)
        }
    }

    pub fn with_query(mut self, name: &str, value: impl Into<String>) -> Self {
        self.query.insert(name.to_string(), value.into());
        self
    }

    pub fn with_header(mut self, name: &str, value: impl Into<String>) -> Self {
        self.headers.insert(name.to_ascii_lowercase(), value.into());
        self
    }

    pub fn with_remote_addr(mut self, addr: impl Into<String>) -> Self {
        self.remote_addr = Some(addr.into());
        self
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .get(&name.to_ascii_lowercase())
            .map(String::as_str)
    }
}

/// Explicit method + path table in front of the solve service.
pub struct Router<S: Solver, R: SolveRecordStore> {
    service: SolveService<S, R>,
}

impl<S: Solver, R: SolveRecordStore> Router<S, R> {
    pub fn new(service: SolveService<S, R>) -> Self {
        Self { service }
    }

    pub fn service(&self) -> &SolveService<S, R> {
        &self.service
    }

    pub async fn dispatch(&self, request: &ApiRequest) -> ApiResponse {
        tracing::info!(method = ?request.method, path = %request.path, "Request received");

        let route = match resolve(request.method, &request.path) {
            Ok(route) => route,
            Err(e) => return e.into_response(),
        };

        let response = match route {
            Route::Solve => handlers::solve(&self.service, request).await,
            Route::Validate => handlers::validate(&self.service, request),
            Route::Health => handlers::health(),
            Route::History => handlers::history(&self.service, request).await,
        };

        tracing::debug!(status = response.status, "Request finished");
        response
    }
}

impl<S, R> Router<S, R>
where
    S: Solver + 'static,
    R: SolveRecordStore + 'static,
{
    /// Runs the request on its own task so a panic becomes a 500 instead of
    /// taking the caller down.
    pub async fn dispatch_guarded(self: &Arc<Self>, request: ApiRequest) -> ApiResponse {
        let router = Arc::clone(self);
        match tokio::spawn(async move { router.dispatch(&request).await }).await {
            Ok(response) => response,
            Err(e) => {
                tracing::error!("Request handler failed: {}", e);
                ApiError::Server("internal error".to_string()).into_response()
            }
        }
    }
}
