//! Long-running operation tracking for ARM PUT and DELETE calls.
//!
//! ARM answers a slow create or delete with either an `Azure-AsyncOperation`
//! header (poll it until `status` is terminal) or a 202 plus a `Location`
//! header (poll it until it stops answering 202).

use crate::config;
use crate::error::ApiError;
use reqwest::header::{HeaderMap, LOCATION, RETRY_AFTER};
use serde::Deserialize;
use std::time::Duration;

pub const AZURE_ASYNC_OPERATION: &str = "azure-asyncoperation";

/// Where to poll next, if anywhere.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PollTarget {
    AsyncOperation(String),
    Location(String),
    Done,
}

pub fn poll_target(status: u16, headers: &HeaderMap) -> PollTarget {
    let header = |name: &str| {
        headers
            .get(name)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string)
    };
    if let Some(url) = header(AZURE_ASYNC_OPERATION) {
        return PollTarget::AsyncOperation(url);
    }
    if status == 202 {
        if let Some(url) = header(LOCATION.as_str()) {
            return PollTarget::Location(url);
        }
    }
    PollTarget::Done
}

/// Poll interval requested by the server, in seconds, else the default.
pub fn retry_after(headers: &HeaderMap) -> Duration {
    headers
        .get(RETRY_AFTER)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.trim().parse::<u64>().ok())
        .map(Duration::from_secs)
        .unwrap_or(Duration::from_millis(config::POLL_SLEEP_MSEC))
}

/// Body returned by an `Azure-AsyncOperation` URL.
#[derive(Deserialize, Debug)]
pub struct OperationStatus {
    pub status: String,
    #[serde(default)]
    pub error: Option<serde_json::Value>,
}

impl OperationStatus {
    /// `None` while the operation is still running.
    pub fn outcome(&self) -> Option<Result<(), ApiError>> {
        match self.status.as_str() {
            "Succeeded" => Some(Ok(())),
            "Failed" | "Canceled" | "Cancelled" => {
                let status = match &self.error {
                    Some(error) => format!("{} {}", self.status, error),
                    None => self.status.clone(),
                };
                Some(Err(ApiError::OperationFailed { status }))
            }
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::header::HeaderValue;

    #[test]
    fn test_poll_target_async_operation_wins() {
        let mut headers = HeaderMap::new();
        headers.insert(
            AZURE_ASYNC_OPERATION,
            HeaderValue::from_static("https://management.azure.com/op/1"),
        );
        headers.insert(LOCATION, HeaderValue::from_static("https://management.azure.com/loc/1"));
        assert_eq!(
            poll_target(201, &headers),
            PollTarget::AsyncOperation("https://management.azure.com/op/1".to_string())
        );
    }

    #[test]
    fn test_poll_target_location_only_on_202() {
        let mut headers = HeaderMap::new();
        headers.insert(LOCATION, HeaderValue::from_static("https://management.azure.com/loc/1"));
        assert_eq!(
            poll_target(202, &headers),
            PollTarget::Location("https://management.azure.com/loc/1".to_string())
        );
        assert_eq!(poll_target(200, &headers), PollTarget::Done);
        assert_eq!(poll_target(200, &HeaderMap::new()), PollTarget::Done);
    }

    #[test]
    fn test_retry_after() {
        let mut headers = HeaderMap::new();
        assert_eq!(
            retry_after(&headers),
            Duration::from_millis(config::POLL_SLEEP_MSEC)
        );
        headers.insert(RETRY_AFTER, HeaderValue::from_static("7"));
        assert_eq!(retry_after(&headers), Duration::from_secs(7));
    }

    #[test]
    fn test_operation_outcome() {
        let running: OperationStatus = serde_json::from_str(r#"{"status":"InProgress"}"#).unwrap();
        assert!(running.outcome().is_none());
        let done: OperationStatus = serde_json::from_str(r#"{"status":"Succeeded"}"#).unwrap();
        assert!(matches!(done.outcome(), Some(Ok(()))));
        let failed: OperationStatus =
            serde_json::from_str(r#"{"status":"Failed","error":{"code":"QuotaExceeded"}}"#)
                .unwrap();
        match failed.outcome() {
            Some(Err(ApiError::OperationFailed { status })) => {
                assert!(status.contains("QuotaExceeded"))
            }
            other => panic!("unexpected outcome {other:?}"),
        }
    }
}
