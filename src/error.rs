//! Error types for followsync.
//!
//! Provides structured error handling with:
//! - Machine-readable error codes (`ErrorCode`)
//! - Category-based exit codes (4=validation, 6=sync, 7=config, etc.)
//! - Retryability flags for scripted callers
//! - Context-aware recovery hints
//! - Structured JSON output for piped / non-TTY consumers
//!
//! Faults inside the reconciliation engine are absorbed at component
//! boundaries. What reaches this type is configuration, the optional
//! strict-discovery abort, and failures of the standalone commands.

use thiserror::Error;

/// Result type alias for followsync operations.
pub type Result<T> = std::result::Result<T, Error>;

// ── Error Code ────────────────────────────────────────────────

/// Machine-readable error codes grouped by category.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    // Validation (exit 4)
    InvalidArgument,

    // Sync (exit 6)
    DiscoveryError,

    // Config (exit 7)
    MissingConfig,
    ConfigError,

    // I/O (exit 8)
    IoError,
    JsonError,

    // Upstream API (exit 9)
    ApiError,

    // Internal (exit 1)
    InternalError,
}

impl ErrorCode {
    /// Machine-readable SCREAMING_SNAKE code string.
    #[must_use]
    pub const fn as_str(&self) -> &str {
        match self {
            Self::InvalidArgument => "INVALID_ARGUMENT",
            Self::DiscoveryError => "DISCOVERY_ERROR",
            Self::MissingConfig => "MISSING_CONFIG",
            Self::ConfigError => "CONFIG_ERROR",
            Self::IoError => "IO_ERROR",
            Self::JsonError => "JSON_ERROR",
            Self::ApiError => "API_ERROR",
            Self::InternalError => "INTERNAL_ERROR",
        }
    }

    /// Category-based exit code.
    #[must_use]
    pub const fn exit_code(&self) -> u8 {
        match self {
            Self::InternalError => 1,
            Self::InvalidArgument => 4,
            Self::DiscoveryError => 6,
            Self::MissingConfig | Self::ConfigError => 7,
            Self::IoError | Self::JsonError => 8,
            Self::ApiError => 9,
        }
    }

    /// Whether re-running the same command later may succeed.
    ///
    /// Discovery and API failures are usually transient (network,
    /// rate limit). Configuration and validation errors need a fix first.
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        matches!(self, Self::DiscoveryError | Self::ApiError)
    }
}

// ── Error Enum ────────────────────────────────────────────────

/// Errors that can occur in followsync operations.
#[derive(Error, Debug)]
pub enum Error {
    #[error("Missing required configuration: {key}")]
    MissingConfig {
        key: &'static str,
        env: &'static str,
        flag: &'static str,
    },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Discovery failed: {0}")]
    Discovery(String),

    #[error("API error: {0}")]
    Api(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Map this error to its structured `ErrorCode`.
    #[must_use]
    pub const fn error_code(&self) -> ErrorCode {
        match self {
            Self::MissingConfig { .. } => ErrorCode::MissingConfig,
            Self::Config(_) => ErrorCode::ConfigError,
            Self::InvalidArgument(_) => ErrorCode::InvalidArgument,
            Self::Discovery(_) => ErrorCode::DiscoveryError,
            Self::Api(_) => ErrorCode::ApiError,
            Self::Io(_) => ErrorCode::IoError,
            Self::Json(_) => ErrorCode::JsonError,
            Self::Other(_) => ErrorCode::InternalError,
        }
    }

    /// Category-based exit code, delegating to the `ErrorCode`.
    #[must_use]
    pub const fn exit_code(&self) -> u8 {
        self.error_code().exit_code()
    }

    /// Context-aware recovery hint.
    ///
    /// Returns `None` if no actionable suggestion exists.
    #[must_use]
    pub fn hint(&self) -> Option<String> {
        match self {
            Self::MissingConfig { env, flag, .. } => Some(format!(
                "Set {env} in the environment or a .env file, or pass {flag}."
            )),

            Self::Discovery(_) => Some(
                "No mutations were applied. Re-run later, or drop --strict to \
                 proceed with whatever the API returned."
                    .to_string(),
            ),

            Self::InvalidArgument(msg) if msg.contains("page size") => {
                Some("Page size must be between 1 and 100.".to_string())
            }

            Self::Config(_) => Some(
                "Check ~/.followsync/config.json for invalid JSON or unknown value types."
                    .to_string(),
            ),

            Self::InvalidArgument(_)
            | Self::Api(_)
            | Self::Io(_)
            | Self::Json(_)
            | Self::Other(_) => None,
        }
    }

    /// Structured JSON representation for machine consumption.
    #[must_use]
    pub fn to_structured_json(&self) -> serde_json::Value {
        let code = self.error_code();
        let mut obj = serde_json::json!({
            "error": {
                "code": code.as_str(),
                "message": self.to_string(),
                "retryable": code.is_retryable(),
                "exit_code": code.exit_code(),
            }
        });

        if let Some(hint) = self.hint() {
            obj["error"]["hint"] = serde_json::Value::String(hint);
        }

        obj
    }
}
