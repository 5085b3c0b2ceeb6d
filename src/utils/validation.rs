use crate::utils::error::{CubeError, Result};
use std::path::Path;
use std::time::Duration;
use url::Url;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

fn invalid(field: &str, value: impl ToString, reason: impl Into<String>) -> CubeError {
    CubeError::InvalidConfigValueError {
        field: field.to_string(),
        value: value.to_string(),
        reason: reason.into(),
    }
}

pub fn require<'a, T>(field: &str, value: &'a Option<T>) -> Result<&'a T> {
    value.as_ref().ok_or_else(|| CubeError::MissingConfigError {
        field: field.to_string(),
    })
}

/// The solver service is posted to directly, so the endpoint must name a
/// route on an http(s) host rather than just the server root.
pub fn validate_solver_endpoint(field: &str, endpoint: &str) -> Result<()> {
    let url = Url::parse(endpoint.trim())
        .map_err(|e| invalid(field, endpoint, format!("Invalid URL format: {}", e)))?;

    if !matches!(url.scheme(), "http" | "https") {
        return Err(invalid(
            field,
            endpoint,
            format!("Unsupported URL scheme: {}", url.scheme()),
        ));
    }
    if url.host_str().map_or(true, str::is_empty) {
        return Err(invalid(field, endpoint, "Solver endpoint has no host"));
    }
    if url.path() == "/" {
        return Err(invalid(
            field,
            endpoint,
            "Solver endpoint needs a path, e.g. http://host:8080/solve",
        ));
    }
    Ok(())
}

/// Program name for the process solver. Arguments go in `solver.args`.
pub fn validate_solver_command(field: &str, command: &str) -> Result<()> {
    let trimmed = command.trim();
    if trimmed.is_empty() {
        return Err(invalid(field, command, "Solver command cannot be empty"));
    }
    if trimmed.contains('\0') {
        return Err(invalid(field, command, "Solver command contains null bytes"));
    }
    if trimmed.split_whitespace().count() > 1 && !Path::new(trimmed).exists() {
        return Err(invalid(
            field,
            command,
            "Solver command must be a single program; put arguments in solver.args",
        ));
    }
    Ok(())
}

/// The history file is created on first write, so only things that would
/// make that write fail for certain are rejected here.
pub fn validate_history_path(field: &str, path: &str) -> Result<()> {
    if path.trim().is_empty() {
        return Err(invalid(field, path, "History path cannot be empty"));
    }
    if path.contains('\0') {
        return Err(invalid(field, path, "History path contains null bytes"));
    }

    let file = Path::new(path);
    if file.is_dir() {
        return Err(invalid(field, path, "History path is a directory"));
    }

    // Nearest existing ancestor must be a directory, or create_dir_all fails.
    if let Some(existing) = file
        .ancestors()
        .skip(1)
        .find(|ancestor| !ancestor.as_os_str().is_empty() && ancestor.exists())
    {
        if !existing.is_dir() {
            return Err(invalid(
                field,
                path,
                format!("{} exists and is not a directory", existing.display()),
            ));
        }
    }
    Ok(())
}

pub fn validate_timeout(field: &str, timeout: Duration, min: Duration, max: Duration) -> Result<()> {
    if timeout < min || timeout > max {
        return Err(invalid(
            field,
            format!("{:?}", timeout),
            format!("Timeout must be between {:?} and {:?}", min, max),
        ));
    }
    Ok(())
}
