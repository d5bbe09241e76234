//! Error types for the management API client and the provisioning workflow.

use thiserror::Error;

/// Failure of a single call against the management API.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("authentication failed: {0}")]
    Auth(#[from] azure_core::Error),
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("unexpected status {status}: {body}")]
    Status { status: u16, body: String },
    #[error("cannot decode response at path={path}: {message}")]
    Decode { path: String, message: String },
    #[error("long running operation ended with status {status}")]
    OperationFailed { status: String },
}

/// Failure of the provisioning workflow.
#[derive(Debug, Error)]
pub enum ProvisionError {
    #[error("environment variable {0} is not set")]
    MissingEnv(String),
    #[error("invalid setting {name}: {reason}")]
    InvalidSetting { name: String, reason: String },
    #[error("{context}: {source}")]
    Remote {
        context: String,
        #[source]
        source: ApiError,
    },
    #[error("network interface '{0}' not found")]
    InterfaceNotFound(String),
    #[error("network interface '{0}' has no IP configuration")]
    MissingIpConfiguration(String),
    #[error("cannot read from stdin: {0}")]
    Prompt(#[from] std::io::Error),
    #[error("background task failed: {0}")]
    Task(String),
}

impl ProvisionError {
    /// Process exit status reported for this error.
    pub fn exit_code(&self) -> u8 {
        1
    }
}

/// Attach an operation label to a failed remote call.
pub trait ResultExt<T> {
    fn context(self, context: &str) -> Result<T, ProvisionError>;
}

impl<T> ResultExt<T> for Result<T, ApiError> {
    fn context(self, context: &str) -> Result<T, ProvisionError> {
        self.map_err(|source| ProvisionError::Remote {
            context: context.to_string(),
            source,
        })
    }
}
