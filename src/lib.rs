//! Provision and tear down a small Azure network topology: a resource group,
//! a virtual network with three subnets, public IPs, three NICs, a storage
//! account and a VM with the NICs attached.
//!
//! The workflow in [`processing`] is written against the
//! [`azure::ManagementApi`] trait; [`azure::ArmClient`] implements it over the
//! Azure Resource Manager REST API.

pub mod azure;
pub mod config;
pub mod error;
pub mod models;
pub mod output;
pub mod processing;
pub mod prompt;

pub use config::Settings;
pub use error::{ApiError, ProvisionError};
pub use processing::{provision, provision_with_cleanup, run, Context};
