//! Domain models for the provisioned Azure resources.
//!
//! The structs mirror the Azure Resource Manager JSON bodies
//! (`{ id, name, location, properties: {...} }`) so they can be sent and
//! received as-is:
//! - [`Ipv4`] - IPv4 address with CIDR notation support
//! - [`network`] - virtual network, subnet, public IP and network interface
//! - [`compute`] - virtual machine and its network interface references
//! - [`storage`] - storage account create parameters

pub mod compute;
mod ipv4;
pub mod network;
mod resource;
pub mod storage;

// Re-export public types
pub use compute::{NetworkInterfaceReference, VirtualMachine};
pub use ipv4::{broadcast_addr, cut_addr, get_cidr_mask, subnet_prefixes, Ipv4, MAX_LENGTH};
pub use network::{IpConfiguration, NetworkInterface, PublicIpAddress, Subnet, VirtualNetwork};
pub use resource::{ResourceGroup, SubResource};
pub use storage::StorageAccountCreate;
