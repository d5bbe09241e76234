//! Microsoft.Network resources: virtual network, subnet, public IP address
//! and network interface.

use super::{Ipv4, SubResource};
use serde::{Deserialize, Serialize};

/// Virtual network with a single address space.
#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub struct VirtualNetwork {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub location: String,
    #[serde(default)]
    pub properties: VirtualNetworkProperties,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default)]
#[serde(rename_all = "camelCase")]
pub struct VirtualNetworkProperties {
    #[serde(default)]
    pub address_space: AddressSpace,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default)]
#[serde(rename_all = "camelCase")]
pub struct AddressSpace {
    #[serde(default)]
    pub address_prefixes: Vec<Ipv4>,
}

impl VirtualNetwork {
    pub fn new(location: &str, cidr: Ipv4) -> VirtualNetwork {
        VirtualNetwork {
            location: location.to_string(),
            properties: VirtualNetworkProperties {
                address_space: AddressSpace {
                    address_prefixes: vec![cidr],
                },
            },
            ..Default::default()
        }
    }
}

/// Subnet of [`VirtualNetwork`].
#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub struct Subnet {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default)]
    pub properties: SubnetProperties,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default)]
#[serde(rename_all = "camelCase")]
pub struct SubnetProperties {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address_prefix: Option<Ipv4>,
}

impl Subnet {
    pub fn new(address_prefix: Ipv4) -> Subnet {
        Subnet {
            properties: SubnetProperties {
                address_prefix: Some(address_prefix),
            },
            ..Default::default()
        }
    }
}

/// Public IP address with a DNS label.
#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub struct PublicIpAddress {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub location: String,
    #[serde(default)]
    pub properties: PublicIpAddressProperties,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default)]
#[serde(rename_all = "camelCase")]
pub struct PublicIpAddressProperties {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dns_settings: Option<DnsSettings>,
    /// Assigned by the server.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ip_address: Option<String>,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default)]
#[serde(rename_all = "camelCase")]
pub struct DnsSettings {
    pub domain_name_label: String,
}

impl PublicIpAddress {
    pub fn new(location: &str, dns_label: &str) -> PublicIpAddress {
        PublicIpAddress {
            location: location.to_string(),
            properties: PublicIpAddressProperties {
                dns_settings: Some(DnsSettings {
                    domain_name_label: dns_label.to_string(),
                }),
                ip_address: None,
            },
            ..Default::default()
        }
    }
}

/// Virtual NIC bound to one subnet through its IP configuration.
#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub struct NetworkInterface {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub location: String,
    #[serde(default)]
    pub properties: NetworkInterfaceProperties,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default)]
#[serde(rename_all = "camelCase")]
pub struct NetworkInterfaceProperties {
    #[serde(
        rename = "enableIPForwarding",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub enable_ip_forwarding: Option<bool>,
    /// Assigned by the server.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mac_address: Option<String>,
    #[serde(default)]
    pub ip_configurations: Vec<IpConfiguration>,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub struct IpConfiguration {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default)]
    pub properties: IpConfigurationProperties,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub struct IpConfigurationProperties {
    #[serde(
        rename = "privateIPAllocationMethod",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub private_ip_allocation_method: Option<String>,
    #[serde(
        rename = "privateIPAddress",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub private_ip_address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subnet: Option<SubResource>,
    #[serde(
        rename = "publicIPAddress",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub public_ip_address: Option<SubResource>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub primary: Option<bool>,
}

pub const ALLOCATION_DYNAMIC: &str = "Dynamic";

impl NetworkInterface {
    /// NIC with one dynamically allocated IP configuration on `subnet_id`.
    pub fn new(location: &str, ip_config_name: &str, subnet_id: &str) -> NetworkInterface {
        NetworkInterface {
            location: location.to_string(),
            properties: NetworkInterfaceProperties {
                ip_configurations: vec![IpConfiguration {
                    name: Some(ip_config_name.to_string()),
                    properties: IpConfigurationProperties {
                        private_ip_allocation_method: Some(ALLOCATION_DYNAMIC.to_string()),
                        subnet: Some(SubResource::new(subnet_id)),
                        ..Default::default()
                    },
                    ..Default::default()
                }],
                ..Default::default()
            },
            ..Default::default()
        }
    }

    pub fn name(&self) -> &str {
        self.name.as_deref().unwrap_or_default()
    }

    /// The first IP configuration, which the workflow treats as primary.
    pub fn first_ip_configuration(&self) -> Option<&IpConfiguration> {
        self.properties.ip_configurations.first()
    }

    pub fn first_ip_configuration_mut(&mut self) -> Option<&mut IpConfiguration> {
        self.properties.ip_configurations.first_mut()
    }

    pub fn is_primary(&self) -> bool {
        self.first_ip_configuration()
            .and_then(|c| c.properties.primary)
            .unwrap_or(false)
    }

    pub fn ip_forwarding(&self) -> bool {
        self.properties.enable_ip_forwarding.unwrap_or(false)
    }

    pub fn public_ip_id(&self) -> Option<&str> {
        self.first_ip_configuration()
            .and_then(|c| c.properties.public_ip_address.as_ref())
            .and_then(|p| p.id.as_deref())
    }
}
