//! In-memory stand-in for Azure Resource Manager.
//!
//! Records every call as `"<operation> <name>"` in a shared log, keeps the
//! created resources, and can be told to fail one operation.

#![allow(dead_code)]

use async_trait::async_trait;
use azure_vm_nics::azure::ManagementApi;
use azure_vm_nics::config::Settings;
use azure_vm_nics::error::{ApiError, ProvisionError};
use azure_vm_nics::models::{
    NetworkInterface, PublicIpAddress, ResourceGroup, StorageAccountCreate, Subnet,
    VirtualMachine, VirtualNetwork,
};
use azure_vm_nics::prompt::Pause;
use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

pub type CallLog = Arc<Mutex<Vec<String>>>;

#[derive(Default)]
struct State {
    subnets: BTreeMap<String, Subnet>,
    pips: BTreeMap<String, PublicIpAddress>,
    nics: BTreeMap<String, NetworkInterface>,
    nic_requests: Vec<NetworkInterface>,
    subnet_requests: Vec<(String, String)>,
    storage: Option<StorageAccountCreate>,
    vm: Option<VirtualMachine>,
    vm_request: Option<VirtualMachine>,
}

#[derive(Default)]
pub struct FakeApi {
    log: CallLog,
    fail_on: Option<String>,
    storage_delay: Option<Duration>,
    state: Mutex<State>,
}

fn resource_id(kind: &str, name: &str) -> String {
    format!("/subscriptions/sub/resourceGroups/group/providers/{kind}/{name}")
}

impl FakeApi {
    pub fn new() -> FakeApi {
        FakeApi::default()
    }

    /// Fail every call of `operation`, e.g. `"create_subnet"`.
    pub fn failing_on(operation: &str) -> FakeApi {
        FakeApi {
            fail_on: Some(operation.to_string()),
            ..FakeApi::default()
        }
    }

    pub fn with_storage_delay(mut self, delay: Duration) -> FakeApi {
        self.storage_delay = Some(delay);
        self
    }

    pub fn log(&self) -> CallLog {
        self.log.clone()
    }

    pub fn calls(&self) -> Vec<String> {
        self.log.lock().unwrap().clone()
    }

    pub fn position(&self, call: &str) -> Option<usize> {
        self.calls().iter().position(|c| c == call)
    }

    pub fn count(&self, operation: &str) -> usize {
        self.calls()
            .iter()
            .filter(|c| c.split(' ').next() == Some(operation))
            .count()
    }

    /// Request bodies sent to create_network_interface, in order.
    pub fn nic_requests(&self) -> Vec<NetworkInterface> {
        self.state.lock().unwrap().nic_requests.clone()
    }

    /// `(name, address prefix)` sent to create_subnet, in order.
    pub fn subnet_requests(&self) -> Vec<(String, String)> {
        self.state.lock().unwrap().subnet_requests.clone()
    }

    pub fn vm(&self) -> Option<VirtualMachine> {
        self.state.lock().unwrap().vm.clone()
    }

    /// Last body sent to create_virtual_machine, kept after deletion.
    pub fn vm_request(&self) -> Option<VirtualMachine> {
        self.state.lock().unwrap().vm_request.clone()
    }

    pub fn nic(&self, name: &str) -> Option<NetworkInterface> {
        self.state.lock().unwrap().nics.get(name).cloned()
    }

    pub fn storage(&self) -> Option<StorageAccountCreate> {
        self.state.lock().unwrap().storage.clone()
    }

    /// Log the call, let other tasks run, then apply the failure rule.
    async fn call(&self, operation: &str, name: &str) -> Result<(), ApiError> {
        self.log
            .lock()
            .unwrap()
            .push(format!("{operation} {name}"));
        tokio::task::yield_now().await;
        if self.fail_on.as_deref() == Some(operation) {
            return Err(ApiError::Status {
                status: 409,
                body: format!("{operation} {name} rejected"),
            });
        }
        Ok(())
    }

    fn not_found(name: &str) -> ApiError {
        ApiError::Status {
            status: 404,
            body: format!("{name} not found"),
        }
    }
}

#[async_trait]
impl ManagementApi for FakeApi {
    async fn create_resource_group(
        &self,
        group: &str,
        params: &ResourceGroup,
    ) -> Result<ResourceGroup, ApiError> {
        self.call("create_resource_group", group).await?;
        Ok(ResourceGroup {
            id: Some(format!("/subscriptions/sub/resourceGroups/{group}")),
            name: Some(group.to_string()),
            location: params.location.clone(),
        })
    }

    async fn delete_resource_group(&self, group: &str) -> Result<(), ApiError> {
        self.call("delete_resource_group", group).await?;
        let mut state = self.state.lock().unwrap();
        state.subnets.clear();
        state.pips.clear();
        state.nics.clear();
        state.vm = None;
        Ok(())
    }

    async fn create_virtual_network(
        &self,
        _group: &str,
        name: &str,
        params: &VirtualNetwork,
    ) -> Result<VirtualNetwork, ApiError> {
        self.call("create_virtual_network", name).await?;
        Ok(VirtualNetwork {
            id: Some(resource_id("Microsoft.Network/virtualNetworks", name)),
            name: Some(name.to_string()),
            ..params.clone()
        })
    }

    async fn create_subnet(
        &self,
        _group: &str,
        vnet: &str,
        name: &str,
        params: &Subnet,
    ) -> Result<Subnet, ApiError> {
        self.call("create_subnet", name).await?;
        let subnet = Subnet {
            id: Some(resource_id(
                "Microsoft.Network/virtualNetworks",
                &format!("{vnet}/subnets/{name}"),
            )),
            name: Some(name.to_string()),
            ..params.clone()
        };
        let mut state = self.state.lock().unwrap();
        let prefix = params
            .properties
            .address_prefix
            .map(|p| p.to_string())
            .unwrap_or_default();
        state.subnet_requests.push((name.to_string(), prefix));
        state.subnets.insert(name.to_string(), subnet);
        // The create response does not carry the id, like the real thing
        // sometimes does not.
        Ok(params.clone())
    }

    async fn get_subnet(&self, _group: &str, _vnet: &str, name: &str) -> Result<Subnet, ApiError> {
        self.call("get_subnet", name).await?;
        let found = self.state.lock().unwrap().subnets.get(name).cloned();
        found.ok_or_else(|| FakeApi::not_found(name))
    }

    async fn create_public_ip(
        &self,
        _group: &str,
        name: &str,
        params: &PublicIpAddress,
    ) -> Result<PublicIpAddress, ApiError> {
        self.call("create_public_ip", name).await?;
        let mut pip = PublicIpAddress {
            id: Some(resource_id("Microsoft.Network/publicIPAddresses", name)),
            name: Some(name.to_string()),
            ..params.clone()
        };
        pip.properties.ip_address = Some("40.112.0.10".to_string());
        self.state
            .lock()
            .unwrap()
            .pips
            .insert(name.to_string(), pip.clone());
        Ok(pip)
    }

    async fn get_public_ip(&self, _group: &str, name: &str) -> Result<PublicIpAddress, ApiError> {
        self.call("get_public_ip", name).await?;
        let found = self.state.lock().unwrap().pips.get(name).cloned();
        found.ok_or_else(|| FakeApi::not_found(name))
    }

    async fn create_network_interface(
        &self,
        _group: &str,
        name: &str,
        params: &NetworkInterface,
    ) -> Result<NetworkInterface, ApiError> {
        self.call("create_network_interface", name).await?;
        let mut state = self.state.lock().unwrap();
        state.nic_requests.push(params.clone());
        let index = state.nics.len() + 1;
        let mut nic = NetworkInterface {
            id: Some(resource_id("Microsoft.Network/networkInterfaces", name)),
            name: Some(name.to_string()),
            ..params.clone()
        };
        nic.properties.mac_address = Some(format!("00-0D-3A-00-00-0{index}"));
        if let Some(config) = nic.first_ip_configuration_mut() {
            config.properties.private_ip_address = Some(format!("172.16.{index}.4"));
        }
        state.nics.insert(name.to_string(), nic.clone());
        Ok(nic)
    }

    async fn get_network_interface(
        &self,
        _group: &str,
        name: &str,
    ) -> Result<NetworkInterface, ApiError> {
        self.call("get_network_interface", name).await?;
        let found = self.state.lock().unwrap().nics.get(name).cloned();
        found.ok_or_else(|| FakeApi::not_found(name))
    }

    async fn list_network_interfaces(
        &self,
        group: &str,
    ) -> Result<Vec<NetworkInterface>, ApiError> {
        self.call("list_network_interfaces", group).await?;
        Ok(self.state.lock().unwrap().nics.values().cloned().collect())
    }

    async fn delete_network_interface(&self, _group: &str, name: &str) -> Result<(), ApiError> {
        self.call("delete_network_interface", name).await?;
        let mut state = self.state.lock().unwrap();
        let nic_id = resource_id("Microsoft.Network/networkInterfaces", name);
        let in_use = state.vm.as_ref().is_some_and(|vm| {
            vm.properties
                .network_profile
                .network_interfaces
                .iter()
                .any(|r| r.id == nic_id)
        });
        if in_use {
            return Err(ApiError::Status {
                status: 400,
                body: format!("NicInUse: {name} is attached to a VM"),
            });
        }
        state.nics.remove(name);
        Ok(())
    }

    async fn create_storage_account(
        &self,
        _group: &str,
        name: &str,
        params: &StorageAccountCreate,
    ) -> Result<(), ApiError> {
        self.call("create_storage_account", name).await?;
        if let Some(delay) = self.storage_delay {
            tokio::time::sleep(delay).await;
        }
        self.state.lock().unwrap().storage = Some(params.clone());
        self.log
            .lock()
            .unwrap()
            .push(format!("create_storage_account:done {name}"));
        Ok(())
    }

    async fn create_virtual_machine(
        &self,
        _group: &str,
        name: &str,
        params: &VirtualMachine,
    ) -> Result<VirtualMachine, ApiError> {
        self.call("create_virtual_machine", name).await?;
        let vm = VirtualMachine {
            id: Some(resource_id("Microsoft.Compute/virtualMachines", name)),
            name: Some(name.to_string()),
            ..params.clone()
        };
        let mut state = self.state.lock().unwrap();
        state.vm_request = Some(params.clone());
        state.vm = Some(vm.clone());
        Ok(vm)
    }

    async fn delete_virtual_machine(&self, _group: &str, name: &str) -> Result<(), ApiError> {
        self.call("delete_virtual_machine", name).await?;
        self.state.lock().unwrap().vm = None;
        Ok(())
    }
}

/// Never blocks, records `pause` in the call log.
pub struct RecordingPause {
    log: CallLog,
    pub messages: Vec<String>,
}

impl RecordingPause {
    pub fn new(log: CallLog) -> RecordingPause {
        RecordingPause {
            log,
            messages: Vec::new(),
        }
    }
}

impl Pause for RecordingPause {
    fn pause(&mut self, message: &str) -> Result<(), ProvisionError> {
        self.log.lock().unwrap().push("pause".to_string());
        self.messages.push(message.to_string());
        Ok(())
    }
}

pub fn env_lookup(key: &str) -> Option<String> {
    match key {
        "AZURE_TENANT_ID" => Some("tenant".to_string()),
        "AZURE_CLIENT_ID" => Some("client".to_string()),
        "AZURE_CLIENT_SECRET" => Some("secret".to_string()),
        "AZURE_SUBSCRIPTION_ID" => Some("sub".to_string()),
        _ => None,
    }
}

pub fn settings() -> Settings {
    Settings::from_lookup(env_lookup).expect("test settings")
}
