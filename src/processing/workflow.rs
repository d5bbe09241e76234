//! The ordered provisioning run.

use super::{
    attach_public_ip, build_interface_references, create_network_interfaces, create_public_ip,
    create_resource_group, create_subnets, create_virtual_network, create_vm, delete_interface,
    delete_resource_group, list_interfaces, spawn_storage_account,
};
use crate::azure::ManagementApi;
use crate::config::{self, Settings};
use crate::error::ProvisionError;
use crate::models::{Ipv4, NetworkInterface};
use crate::prompt::Pause;
use colored::Colorize;
use std::future::Future;
use std::sync::Arc;
use tokio::task::JoinError;

/// Client and settings shared by every step.
#[derive(Clone)]
pub struct Context {
    pub api: Arc<dyn ManagementApi>,
    pub settings: Settings,
}

impl Context {
    pub fn new(api: Arc<dyn ManagementApi>, settings: Settings) -> Context {
        Context { api, settings }
    }
}

fn joined(result: Result<Result<(), ProvisionError>, JoinError>) -> Result<(), ProvisionError> {
    result.map_err(|e| ProvisionError::Task(format!("storage account task: {e}")))?
}

/// Virtual network, subnets, first public IP and the three NICs.
async fn create_networking(ctx: &Context) -> Result<Vec<NetworkInterface>, ProvisionError> {
    let cidr = Ipv4::new(config::VNET_CIDR).map_err(|e| ProvisionError::InvalidSetting {
        name: "VNET_CIDR".to_string(),
        reason: e.to_string(),
    })?;
    create_virtual_network(ctx, config::VNET_NAME, cidr).await?;
    let subnets = create_subnets(ctx, config::VNET_NAME, &config::SUBNET_NAMES, cidr).await?;
    let pip = create_public_ip(ctx, config::PIP_FIRST).await?;
    create_network_interfaces(ctx, &subnets, &pip).await
}

/// Provision everything, pause twice, then tear it all down.
///
/// The storage account is created on its own task while the network is
/// built; the VM is only created once that task has finished. A failure on
/// either path stops the other one.
pub async fn provision(ctx: &Context, pause: &mut dyn Pause) -> Result<(), ProvisionError> {
    create_resource_group(ctx).await?;

    let mut storage = spawn_storage_account(ctx);
    let networking = create_networking(ctx);
    tokio::pin!(networking);

    let mut storage_done = false;
    let nics = loop {
        tokio::select! {
            result = &mut networking => match result {
                Ok(nics) => break nics,
                Err(e) => {
                    storage.abort();
                    return Err(e);
                }
            },
            result = &mut storage, if !storage_done => {
                joined(result)?;
                storage_done = true;
            }
        }
    };
    let references = build_interface_references(&nics);

    if !storage_done {
        log::info!("waiting for the storage account task");
        joined(storage.await)?;
    }
    create_vm(ctx, references).await?;

    let pip = create_public_ip(ctx, config::PIP_SECOND).await?;
    attach_public_ip(ctx, config::NIC_NAME_FRONT_END, &nics, &pip).await?;
    list_interfaces(ctx).await?;

    pause.pause(&format!(
        "Press enter to delete NIC '{}'...\n",
        config::NIC_NAME_MID_TIER
    ))?;
    delete_interface(ctx, config::NIC_NAME_MID_TIER).await?;
    println!("Remaining NICs are...");
    list_interfaces(ctx).await?;

    pause.pause("Press enter to delete all the resources created in this sample...")?;
    delete_resource_group(ctx).await
}

/// [`provision`], deleting the resource group once if anything fails so no
/// billable resources are left behind.
///
/// The outcome of the cleanup is logged, the original error is returned.
pub async fn provision_with_cleanup(
    ctx: &Context,
    pause: &mut dyn Pause,
) -> Result<(), ProvisionError> {
    let err = match provision(ctx, pause).await {
        Ok(()) => return Ok(()),
        Err(e) => e,
    };
    println!("{}: {err}", "FAILED".on_red());
    log::error!("provisioning failed: {err}");

    log::warn!(
        "cleanup: deleting resource group {}",
        ctx.settings.group_name
    );
    if let Err(cleanup) = ctx.api.delete_resource_group(&ctx.settings.group_name).await {
        log::warn!("cleanup of {} failed: {cleanup}", ctx.settings.group_name);
    }
    Err(err)
}

/// Load settings through `lookup`, authenticate with `connect` and run the
/// whole workflow.
///
/// No remote call is made when a setting is missing or invalid.
pub async fn run<L, C, F>(lookup: L, connect: C, pause: &mut dyn Pause) -> Result<(), ProvisionError>
where
    L: Fn(&str) -> Option<String>,
    C: FnOnce(Settings) -> F,
    F: Future<Output = Result<Arc<dyn ManagementApi>, ProvisionError>>,
{
    let settings = Settings::from_lookup(lookup)?;
    log::debug!("settings={settings:?}");

    println!("Authenticate");
    let api = connect(settings.clone()).await?;
    let ctx = Context::new(api, settings);
    provision_with_cleanup(&ctx, pause).await
}
