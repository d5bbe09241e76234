//! Azure Resource Manager interaction.
//!
//! This module handles all Azure-related operations:
//! - [`api`] - The [`ManagementApi`] trait the workflow is written against
//! - [`auth`] - Service principal bearer tokens
//! - [`client`] - REST implementation of [`ManagementApi`]
//! - [`operation`] - Long-running operation polling

mod api;
mod auth;
mod client;
mod operation;

// Re-export public types and functions
pub use api::ManagementApi;
pub use client::{decode, ArmClient};
pub use operation::{poll_target, retry_after, OperationStatus, PollTarget};
