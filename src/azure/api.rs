//! The management operations the workflow depends on.

use crate::error::ApiError;
use crate::models::{
    NetworkInterface, PublicIpAddress, ResourceGroup, StorageAccountCreate, Subnet,
    VirtualMachine, VirtualNetwork,
};
use async_trait::async_trait;

/// Create, read, list and delete calls against Azure Resource Manager.
///
/// Every create is a create-or-update that returns once the long-running
/// operation has finished. Resources are addressed by resource group and name
/// within the subscription the implementation is bound to.
#[async_trait]
pub trait ManagementApi: Send + Sync {
    async fn create_resource_group(
        &self,
        group: &str,
        params: &ResourceGroup,
    ) -> Result<ResourceGroup, ApiError>;

    /// Deletes the group and everything inside it.
    async fn delete_resource_group(&self, group: &str) -> Result<(), ApiError>;

    async fn create_virtual_network(
        &self,
        group: &str,
        name: &str,
        params: &VirtualNetwork,
    ) -> Result<VirtualNetwork, ApiError>;

    async fn create_subnet(
        &self,
        group: &str,
        vnet: &str,
        name: &str,
        params: &Subnet,
    ) -> Result<Subnet, ApiError>;

    async fn get_subnet(&self, group: &str, vnet: &str, name: &str) -> Result<Subnet, ApiError>;

    async fn create_public_ip(
        &self,
        group: &str,
        name: &str,
        params: &PublicIpAddress,
    ) -> Result<PublicIpAddress, ApiError>;

    async fn get_public_ip(&self, group: &str, name: &str) -> Result<PublicIpAddress, ApiError>;

    async fn create_network_interface(
        &self,
        group: &str,
        name: &str,
        params: &NetworkInterface,
    ) -> Result<NetworkInterface, ApiError>;

    async fn get_network_interface(
        &self,
        group: &str,
        name: &str,
    ) -> Result<NetworkInterface, ApiError>;

    async fn list_network_interfaces(&self, group: &str)
        -> Result<Vec<NetworkInterface>, ApiError>;

    async fn delete_network_interface(&self, group: &str, name: &str) -> Result<(), ApiError>;

    async fn create_storage_account(
        &self,
        group: &str,
        name: &str,
        params: &StorageAccountCreate,
    ) -> Result<(), ApiError>;

    async fn create_virtual_machine(
        &self,
        group: &str,
        name: &str,
        params: &VirtualMachine,
    ) -> Result<VirtualMachine, ApiError>;

    async fn delete_virtual_machine(&self, group: &str, name: &str) -> Result<(), ApiError>;
}
