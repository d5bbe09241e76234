//! Virtual machine creation.

use super::Context;
use crate::config::{self, Settings};
use crate::error::{ProvisionError, ResultExt};
use crate::models::compute::{
    HardwareProfile, ImageReference, NetworkProfile, OsDisk, OsProfile, StorageProfile,
    VirtualHardDisk, VirtualMachineProperties, CREATE_FROM_IMAGE,
};
use crate::models::{NetworkInterfaceReference, VirtualMachine};

/// Ubuntu VM with its OS disk in the storage account and `references` as
/// its network profile.
pub fn build_virtual_machine(
    settings: &Settings,
    references: Vec<NetworkInterfaceReference>,
) -> VirtualMachine {
    VirtualMachine {
        location: settings.location.clone(),
        properties: VirtualMachineProperties {
            hardware_profile: HardwareProfile {
                vm_size: config::VM_SIZE.to_string(),
            },
            storage_profile: StorageProfile {
                image_reference: Some(ImageReference {
                    publisher: config::IMAGE_PUBLISHER.to_string(),
                    offer: config::IMAGE_OFFER.to_string(),
                    sku: config::IMAGE_SKU.to_string(),
                    version: config::IMAGE_VERSION.to_string(),
                }),
                os_disk: Some(OsDisk {
                    name: config::OS_DISK_NAME.to_string(),
                    vhd: Some(VirtualHardDisk {
                        uri: settings.vhd_uri(),
                    }),
                    create_option: CREATE_FROM_IMAGE.to_string(),
                }),
            },
            os_profile: Some(OsProfile {
                computer_name: config::VM_NAME.to_string(),
                admin_username: config::ADMIN_USERNAME.to_string(),
                admin_password: Some(config::ADMIN_PASSWORD.to_string()),
            }),
            network_profile: NetworkProfile {
                network_interfaces: references,
            },
        },
        ..Default::default()
    }
}

pub async fn create_vm(
    ctx: &Context,
    references: Vec<NetworkInterfaceReference>,
) -> Result<VirtualMachine, ProvisionError> {
    println!("Create VM '{}' with the assigned NICs", config::VM_NAME);
    let params = build_virtual_machine(&ctx.settings, references);
    log::info!(
        "create_virtual_machine({}, size={}, vhd={}, nics={})",
        config::VM_NAME,
        config::VM_SIZE,
        ctx.settings.vhd_uri(),
        params.properties.network_profile.network_interfaces.len()
    );
    ctx.api
        .create_virtual_machine(&ctx.settings.group_name, config::VM_NAME, &params)
        .await
        .context("CreateOrUpdate virtual machine failed")
}
