//! Microsoft.Compute virtual machine with an unmanaged (VHD blob) OS disk.

use serde::{Deserialize, Serialize};

/// Reference from a VM network profile to a network interface.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct NetworkInterfaceReference {
    pub id: String,
    pub properties: NetworkInterfaceReferenceProperties,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct NetworkInterfaceReferenceProperties {
    pub primary: bool,
}

impl NetworkInterfaceReference {
    pub fn new(id: &str, primary: bool) -> NetworkInterfaceReference {
        NetworkInterfaceReference {
            id: id.to_string(),
            properties: NetworkInterfaceReferenceProperties { primary },
        }
    }

    pub fn is_primary(&self) -> bool {
        self.properties.primary
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub struct VirtualMachine {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub location: String,
    #[serde(default)]
    pub properties: VirtualMachineProperties,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default)]
#[serde(rename_all = "camelCase")]
pub struct VirtualMachineProperties {
    #[serde(default)]
    pub hardware_profile: HardwareProfile,
    #[serde(default)]
    pub storage_profile: StorageProfile,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub os_profile: Option<OsProfile>,
    #[serde(default)]
    pub network_profile: NetworkProfile,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default)]
#[serde(rename_all = "camelCase")]
pub struct HardwareProfile {
    pub vm_size: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default)]
#[serde(rename_all = "camelCase")]
pub struct StorageProfile {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_reference: Option<ImageReference>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub os_disk: Option<OsDisk>,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct ImageReference {
    pub publisher: String,
    pub offer: String,
    pub sku: String,
    pub version: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default)]
#[serde(rename_all = "camelCase")]
pub struct OsDisk {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vhd: Option<VirtualHardDisk>,
    pub create_option: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub struct VirtualHardDisk {
    pub uri: String,
}

/// The password never comes back from the server, so it is optional here.
#[derive(Serialize, Deserialize, Clone, Default)]
#[serde(rename_all = "camelCase")]
pub struct OsProfile {
    pub computer_name: String,
    pub admin_username: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub admin_password: Option<String>,
}

impl std::fmt::Debug for OsProfile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OsProfile")
            .field("computer_name", &self.computer_name)
            .field("admin_username", &self.admin_username)
            .field("admin_password", &self.admin_password.as_ref().map(|_| "***"))
            .finish()
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Default)]
#[serde(rename_all = "camelCase")]
pub struct NetworkProfile {
    #[serde(default)]
    pub network_interfaces: Vec<NetworkInterfaceReference>,
}

pub const CREATE_FROM_IMAGE: &str = "FromImage";

impl VirtualMachine {
    pub fn primary_interface(&self) -> Option<&NetworkInterfaceReference> {
        self.properties
            .network_profile
            .network_interfaces
            .iter()
            .find(|r| r.is_primary())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_reference_body() {
        assert_eq!(
            serde_json::to_value(NetworkInterfaceReference::new("/nic/nic1", true)).unwrap(),
            json!({ "id": "/nic/nic1", "properties": { "primary": true } })
        );
    }

    #[test]
    fn test_vm_body_shape() {
        let vm = VirtualMachine {
            location: "westus".to_string(),
            properties: VirtualMachineProperties {
                hardware_profile: HardwareProfile {
                    vm_size: "Standard_D3_v2".to_string(),
                },
                storage_profile: StorageProfile {
                    image_reference: None,
                    os_disk: Some(OsDisk {
                        name: "osDisk".to_string(),
                        vhd: Some(VirtualHardDisk {
                            uri: "https://a.blob.core.windows.net/vhds/vm.vhd".to_string(),
                        }),
                        create_option: CREATE_FROM_IMAGE.to_string(),
                    }),
                },
                os_profile: Some(OsProfile {
                    computer_name: "vm".to_string(),
                    admin_username: "notadmin".to_string(),
                    admin_password: Some("pw".to_string()),
                }),
                network_profile: NetworkProfile {
                    network_interfaces: vec![
                        NetworkInterfaceReference::new("/nic/nic1", true),
                        NetworkInterfaceReference::new("/nic/nic3", false),
                    ],
                },
            },
            ..Default::default()
        };
        let body = serde_json::to_value(&vm).unwrap();
        assert_eq!(body["properties"]["hardwareProfile"]["vmSize"], "Standard_D3_v2");
        assert_eq!(
            body["properties"]["storageProfile"]["osDisk"]["createOption"],
            "FromImage"
        );
        assert_eq!(body["properties"]["osProfile"]["adminUsername"], "notadmin");
        assert_eq!(
            body["properties"]["networkProfile"]["networkInterfaces"][1]["properties"]["primary"],
            false
        );
        assert_eq!(vm.primary_interface().map(|r| r.id.as_str()), Some("/nic/nic1"));
        assert!(!format!("{vm:?}").contains("\"pw\""));
    }
}
