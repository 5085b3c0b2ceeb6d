use crate::utils::error::{CubeError, Result};
use crate::utils::validation::{self, Validate};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

pub const FACELETS_PLACEHOLDER: &str = "{facelets}";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub solver: SolverConfig,
    #[serde(default)]
    pub persistence: PersistenceConfig,
    pub logging: Option<LoggingConfig>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SolverKind {
    Process,
    Http,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SolverConfig {
    pub kind: SolverKind,
    pub command: Option<String>,
    pub args: Option<Vec<String>>,
    pub endpoint: Option<String>,
    pub timeout_seconds: Option<u64>,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            kind: SolverKind::Process,
            command: Some("kociemba".to_string()),
            args: Some(vec![FACELETS_PLACEHOLDER.to_string()]),
            endpoint: None,
            timeout_seconds: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PersistenceKind {
    Memory,
    Jsonl,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PersistenceConfig {
    pub kind: PersistenceKind,
    pub path: Option<String>,
    pub timeout_ms: Option<u64>,
}

impl Default for PersistenceConfig {
    fn default() -> Self {
        Self {
            kind: PersistenceKind::Jsonl,
            path: Some("./solves.jsonl".to_string()),
            timeout_ms: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Compact,
    Json,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub level: Option<String>,
    #[serde(default)]
    pub format: LogFormat,
}

impl AppConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(CubeError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| CubeError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${SOLVER_ENDPOINT})
    fn substitute_env_vars(content: &str) -> Result<String> {
        use regex::Regex;
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| CubeError::ConfigValidationError {
            field: "environment".to_string(),
            message: e.to_string(),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn solver_timeout(&self) -> Option<Duration> {
        self.solver.timeout_seconds.map(Duration::from_secs)
    }

    pub fn persist_timeout(&self) -> Option<Duration> {
        self.persistence.timeout_ms.map(Duration::from_millis)
    }

    pub fn log_format(&self) -> LogFormat {
        self.logging.as_ref().map(|l| l.format).unwrap_or_default()
    }

    pub fn log_level(&self) -> Option<&str> {
        self.logging.as_ref().and_then(|l| l.level.as_deref())
    }
}

impl Validate for AppConfig {
    fn validate(&self) -> Result<()> {
        match self.solver.kind {
            SolverKind::Process => {
                let command = validation::require("solver.command", &self.solver.command)?;
                validation::validate_solver_command("solver.command", command)?;
            }
            SolverKind::Http => {
                let endpoint = validation::require("solver.endpoint", &self.solver.endpoint)?;
                validation::validate_solver_endpoint("solver.endpoint", endpoint)?;
            }
        }

        if let Some(timeout) = self.solver_timeout() {
            validation::validate_timeout(
                "solver.timeout_seconds",
                timeout,
                Duration::from_secs(1),
                Duration::from_secs(600),
            )?;
        }

        if self.persistence.kind == PersistenceKind::Jsonl {
            let path = validation::require("persistence.path", &self.persistence.path)?;
            validation::validate_history_path("persistence.path", path)?;
        }

        if let Some(timeout) = self.persist_timeout() {
            validation::validate_timeout(
                "persistence.timeout_ms",
                timeout,
                Duration::from_millis(1),
                Duration::from_secs(60),
            )?;
        }

        Ok(())
    }
}
