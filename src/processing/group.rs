//! Resource group lifecycle.

use super::Context;
use crate::error::{ProvisionError, ResultExt};
use crate::models::ResourceGroup;

pub async fn create_resource_group(ctx: &Context) -> Result<ResourceGroup, ProvisionError> {
    let settings = &ctx.settings;
    println!("Create resource group '{}'", settings.group_name);
    log::info!(
        "create_resource_group({}, {})",
        settings.group_name,
        settings.location
    );
    ctx.api
        .create_resource_group(&settings.group_name, &ResourceGroup::new(&settings.location))
        .await
        .context("CreateOrUpdate resource group failed")
}

/// Deletes the group together with everything created in it.
pub async fn delete_resource_group(ctx: &Context) -> Result<(), ProvisionError> {
    println!("Deleting resource group '{}'", ctx.settings.group_name);
    log::info!("delete_resource_group({})", ctx.settings.group_name);
    ctx.api
        .delete_resource_group(&ctx.settings.group_name)
        .await
        .context("Delete resource group failed")
}
