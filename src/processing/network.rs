//! Virtual network, subnets, public IP addresses and network interfaces.

use super::Context;
use crate::config::{self, Settings};
use crate::error::{ProvisionError, ResultExt};
use crate::models::{
    subnet_prefixes, Ipv4, NetworkInterface, NetworkInterfaceReference, PublicIpAddress,
    SubResource, Subnet, VirtualNetwork,
};
use crate::output::print_nic;

pub async fn create_virtual_network(
    ctx: &Context,
    name: &str,
    cidr: Ipv4,
) -> Result<VirtualNetwork, ProvisionError> {
    println!("Create virtual network '{name}' {cidr}");
    log::info!("create_virtual_network({name}, {cidr})");
    let params = VirtualNetwork::new(&ctx.settings.location, cidr);
    ctx.api
        .create_virtual_network(&ctx.settings.group_name, name, &params)
        .await
        .context("CreateOrUpdate virtual network failed")
}

/// Create one subnet per name, in order, each a `/SUBNET_MASK` block of
/// `base`; subnet `i` gets block `i + 1`.
///
/// Every subnet is fetched again after creation to get its server assigned id.
pub async fn create_subnets(
    ctx: &Context,
    vnet: &str,
    names: &[&str],
    base: Ipv4,
) -> Result<Vec<Subnet>, ProvisionError> {
    println!("Create subnets");
    let prefixes = subnet_prefixes(base, names.len(), config::SUBNET_MASK).map_err(|e| {
        ProvisionError::InvalidSetting {
            name: "subnets".to_string(),
            reason: e.to_string(),
        }
    })?;

    let group = &ctx.settings.group_name;
    let mut subnets = Vec::with_capacity(names.len());
    for (name, prefix) in names.iter().zip(prefixes) {
        println!("\tCreate subnet: '{name}' {prefix}");
        log::info!("create_subnet({vnet}, {name}, {prefix})");
        ctx.api
            .create_subnet(group, vnet, name, &Subnet::new(prefix))
            .await
            .context("\tCreateOrUpdate subnet failed")?;

        let subnet = ctx
            .api
            .get_subnet(group, vnet, name)
            .await
            .context("\tGet subnet failed")?;
        log::debug!("subnet {name} id={:?}", subnet.id);
        subnets.push(subnet);
    }
    Ok(subnets)
}

/// Create a public IP with DNS label `azuresample-{name}` and read it back.
pub async fn create_public_ip(ctx: &Context, name: &str) -> Result<PublicIpAddress, ProvisionError> {
    println!("Create public IP address: '{name}'");
    let label = format!("azuresample-{name}");
    log::info!("create_public_ip({name}, dns_label={label})");
    let params = PublicIpAddress::new(&ctx.settings.location, &label);
    let group = &ctx.settings.group_name;
    ctx.api
        .create_public_ip(group, name, &params)
        .await
        .context("CreateOrUpdate public IP failed")?;

    println!("Get public IP address");
    ctx.api
        .get_public_ip(group, name)
        .await
        .context("Get public IP failed")
}

/// Request body for NIC number `index` named `name` on `subnet`.
///
/// Only the front-end NIC gets IP forwarding, the primary flag and `pip`.
fn nic_params(
    settings: &Settings,
    index: usize,
    name: &str,
    subnet: &Subnet,
    pip: &PublicIpAddress,
) -> NetworkInterface {
    let subnet_id = subnet.id.as_deref().unwrap_or_default();
    let mut nic = NetworkInterface::new(
        &settings.location,
        &format!("IPconfig{}", index + 1),
        subnet_id,
    );
    if name == config::NIC_NAME_FRONT_END {
        nic.properties.enable_ip_forwarding = Some(true);
        if let Some(ip_config) = nic.first_ip_configuration_mut() {
            ip_config.properties.primary = Some(true);
            ip_config.properties.public_ip_address = Some(SubResource {
                id: pip.id.clone(),
            });
        }
    }
    nic
}

/// Create the front-end, mid-tier and back-end NICs on the matching subnets.
pub async fn create_network_interfaces(
    ctx: &Context,
    subnets: &[Subnet],
    pip: &PublicIpAddress,
) -> Result<Vec<NetworkInterface>, ProvisionError> {
    println!("Create network interfaces (NICs)");
    if subnets.len() < config::NIC_NAMES.len() {
        return Err(ProvisionError::InvalidSetting {
            name: "subnets".to_string(),
            reason: format!(
                "{} NICs need {} subnets, got {}",
                config::NIC_NAMES.len(),
                config::NIC_NAMES.len(),
                subnets.len()
            ),
        });
    }

    let group = &ctx.settings.group_name;
    let mut nics = Vec::with_capacity(config::NIC_NAMES.len());
    for (i, (name, subnet)) in config::NIC_NAMES.iter().zip(subnets).enumerate() {
        println!(
            "\tCreate NIC '{name}' using subnet '{}'",
            subnet.name.as_deref().unwrap_or_default()
        );
        let params = nic_params(&ctx.settings, i, name, subnet, pip);
        log::info!(
            "create_network_interface({name}, ip_forwarding={}, primary={})",
            params.ip_forwarding(),
            params.is_primary()
        );
        ctx.api
            .create_network_interface(group, name, &params)
            .await
            .context("CreateOrUpdate network interface failed")?;

        let nic = ctx
            .api
            .get_network_interface(group, name)
            .await
            .context("Get network interface failed")?;
        nics.push(nic);
    }
    Ok(nics)
}

/// Reference every NIC for the VM network profile; the front-end NIC is the
/// primary one.
pub fn build_interface_references(nics: &[NetworkInterface]) -> Vec<NetworkInterfaceReference> {
    println!("Assign NICs to network interface references");
    nics.iter()
        .enumerate()
        .map(|(i, nic)| {
            println!("\tAssign NIC '{}' to reference {i}", nic.name());
            let primary = nic.name() == config::NIC_NAME_FRONT_END;
            if primary {
                println!("\t'{}' is the primary reference", nic.name());
            }
            NetworkInterfaceReference::new(nic.id.as_deref().unwrap_or_default(), primary)
        })
        .collect()
}

/// Attach `pip` to the first IP configuration of the NIC called `nic_name`
/// and push the update.
pub async fn attach_public_ip(
    ctx: &Context,
    nic_name: &str,
    nics: &[NetworkInterface],
    pip: &PublicIpAddress,
) -> Result<NetworkInterface, ProvisionError> {
    let mut nic = nics
        .iter()
        .find(|n| n.name() == nic_name)
        .cloned()
        .ok_or_else(|| ProvisionError::InterfaceNotFound(nic_name.to_string()))?;

    println!(
        "Update NIC '{nic_name}' with public IP '{}'",
        pip.name.as_deref().unwrap_or_default()
    );
    let ip_config = nic
        .first_ip_configuration_mut()
        .ok_or_else(|| ProvisionError::MissingIpConfiguration(nic_name.to_string()))?;
    ip_config.properties.public_ip_address = Some(SubResource {
        id: pip.id.clone(),
    });
    ip_config.properties.primary = Some(true);

    log::info!("update_network_interface({nic_name}, public_ip={:?})", pip.id);
    ctx.api
        .create_network_interface(&ctx.settings.group_name, nic_name, &nic)
        .await
        .context("CreateOrUpdate network interface failed")
}

/// Print every NIC in the resource group.
pub async fn list_interfaces(ctx: &Context) -> Result<Vec<NetworkInterface>, ProvisionError> {
    println!("Listing NICs");
    let nics = ctx
        .api
        .list_network_interfaces(&ctx.settings.group_name)
        .await
        .context("List network interfaces failed")?;
    log::info!("list_network_interfaces -> {} NICs", nics.len());

    if nics.is_empty() {
        println!(
            "There are no NICs in {} resource group",
            ctx.settings.group_name
        );
    } else {
        nics.iter().for_each(print_nic);
    }
    Ok(nics)
}

/// Delete a NIC. The VM is deleted first as a NIC cannot be removed while a
/// VM still uses it.
pub async fn delete_interface(ctx: &Context, nic_name: &str) -> Result<(), ProvisionError> {
    let group = &ctx.settings.group_name;
    println!("Delete NIC '{nic_name}'");

    println!("\tFirst, delete the VM");
    log::info!("delete_virtual_machine({})", config::VM_NAME);
    ctx.api
        .delete_virtual_machine(group, config::VM_NAME)
        .await
        .context("Delete virtual machine failed")?;

    println!("\tSecond, delete the NIC");
    log::info!("delete_network_interface({nic_name})");
    ctx.api
        .delete_network_interface(group, nic_name)
        .await
        .context("Delete network interface failed")
}
