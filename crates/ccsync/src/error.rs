//! CLI error types with miette diagnostics.
//!
//! Maps config and workflow errors into user-facing errors with help text
//! and a process exit code.

use miette::Diagnostic;
use thiserror::Error;

use ccsync_api::Error as ApiError;
use ccsync_config::ConfigError;
use ccsync_core::CoreError;

/// Process exit codes.
pub mod exit_code {
    pub const GENERAL: i32 = 1;
    pub const CONFIG: i32 = 2;
    pub const AUTH: i32 = 3;
    pub const CONFLICT: i32 = 6;
    pub const CONNECTION: i32 = 7;
}

#[derive(Debug, Error, Diagnostic)]
pub enum CliError {
    // ── Configuration ────────────────────────────────────────────────
    #[error(transparent)]
    #[diagnostic(
        code(ccsync::config),
        help(
            "Set the variable in the environment or in environment.env.\n\
             Optional tuning lives in ccsync.toml or CCSYNC_* variables."
        )
    )]
    Config(#[from] ConfigError),

    // ── Connection ───────────────────────────────────────────────────
    #[error("Could not reach the API")]
    #[diagnostic(
        code(ccsync::connection_failed),
        help(
            "Check CATALYST_CENTER_URL and GITHUB_API_URL.\n\
             For a lab controller with a self-signed certificate set CATALYST_CENTER_VERIFY_TLS=false."
        )
    )]
    ConnectionFailed {
        #[source]
        source: ApiError,
    },

    // ── Authentication ───────────────────────────────────────────────
    #[error("Authentication failed: {message}")]
    #[diagnostic(
        code(ccsync::auth_failed),
        help(
            "Verify CATALYST_CENTER_USER / CATALYST_CENTER_PASS for the controller\n\
             and GITHUB_TOKEN (repo scope) for GitHub."
        )
    )]
    AuthFailed { message: String },

    #[error("GitHub rate limit exceeded: {message}")]
    #[diagnostic(code(ccsync::rate_limited), help("Wait for the rate limit window to reset and run again."))]
    RateLimited { message: String },

    // ── Writes ───────────────────────────────────────────────────────
    #[error("Update rejected: {message}")]
    #[diagnostic(
        code(ccsync::conflict),
        help("The file changed in the repository while this run was pushing it. Run again.")
    )]
    Conflict { message: String },

    #[error("{message}")]
    #[diagnostic(
        code(ccsync::task),
        help(
            "A Catalyst Center task failed or did not finish in time.\n\
             Raise CCSYNC_TASK__MAX_ATTEMPTS or CCSYNC_TASK__MAX_DELAY_MS for slow controllers."
        )
    )]
    Task { message: String },

    // ── API ──────────────────────────────────────────────────────────
    #[error(transparent)]
    #[diagnostic(code(ccsync::api_error))]
    Api(ApiError),

    // ── Local ────────────────────────────────────────────────────────
    #[error(transparent)]
    #[diagnostic(code(ccsync::workflow))]
    Workflow(CoreError),
}

impl CliError {
    /// Map this error to an exit code for process termination.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Config(_) => exit_code::CONFIG,
            Self::AuthFailed { .. } => exit_code::AUTH,
            Self::Conflict { .. } => exit_code::CONFLICT,
            Self::ConnectionFailed { .. } => exit_code::CONNECTION,
            Self::RateLimited { .. } | Self::Task { .. } | Self::Api(_) | Self::Workflow(_) => {
                exit_code::GENERAL
            }
        }
    }
}

// ── API / core errors → CliError ─────────────────────────────────────

impl From<ApiError> for CliError {
    fn from(err: ApiError) -> Self {
        match err {
            ApiError::Authentication { message } => Self::AuthFailed { message },
            ApiError::RateLimited { message } => Self::RateLimited { message },
            ApiError::Conflict { message } => Self::Conflict { message },
            ApiError::TaskFailed { .. } | ApiError::TaskTimeout { .. } => Self::Task {
                message: err.to_string(),
            },
            ApiError::Transport(_) | ApiError::Tls(_) | ApiError::InvalidUrl(_) => {
                Self::ConnectionFailed { source: err }
            }
            other => Self::Api(other),
        }
    }
}

impl From<CoreError> for CliError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::Api(api) => Self::from(api),
            other => Self::Workflow(other),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn auth_errors_exit_with_auth_code() {
        let err = CliError::from(CoreError::Api(ApiError::Authentication {
            message: "Bad credentials".into(),
        }));
        assert_eq!(err.exit_code(), exit_code::AUTH);
    }

    #[test]
    fn stale_sha_exits_with_conflict_code() {
        let err = CliError::from(ApiError::Conflict {
            message: "does not match".into(),
        });
        assert_eq!(err.exit_code(), exit_code::CONFLICT);
    }

    #[test]
    fn missing_setting_exits_with_config_code() {
        let err = CliError::from(ConfigError::Missing {
            field: "GITHUB_TOKEN",
        });
        assert_eq!(err.exit_code(), exit_code::CONFIG);
        assert_eq!(err.to_string(), "GITHUB_TOKEN is not set");
    }

    #[test]
    fn task_timeout_keeps_task_id_in_message() {
        let err = CliError::from(ApiError::TaskTimeout {
            task_id: "task-9".into(),
            attempts: 10,
        });
        assert!(err.to_string().contains("task-9"), "{err}");
        assert_eq!(err.exit_code(), exit_code::GENERAL);
    }

    #[test]
    fn api_errors_other_than_auth_are_general() {
        let err = CliError::from(ApiError::Api {
            status: 500,
            message: "boom".into(),
        });
        assert_eq!(err.exit_code(), exit_code::GENERAL);
    }
}
