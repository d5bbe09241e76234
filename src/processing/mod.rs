//! Provisioning workflow.
//!
//! Each step is a function over an explicit [`Context`]:
//! - [`group`] - Resource group create and delete
//! - [`network`] - Virtual network, subnets, public IPs and network interfaces
//! - [`storage`] - Storage account, created on its own task
//! - [`vm`] - Virtual machine
//! - [`workflow`] - The ordered run, the join and the cleanup on failure

mod group;
mod network;
mod storage;
mod vm;
mod workflow;

// Re-export public functions
pub use group::{create_resource_group, delete_resource_group};
pub use network::{
    attach_public_ip, build_interface_references, create_network_interfaces, create_public_ip,
    create_subnets, create_virtual_network, delete_interface, list_interfaces,
};
pub use storage::{create_storage_account, spawn_storage_account};
pub use vm::{build_virtual_machine, create_vm};
pub use workflow::{provision, provision_with_cleanup, run, Context};
