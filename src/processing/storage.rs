//! Storage account backing the VM's OS disk blob.

use super::Context;
use crate::error::{ProvisionError, ResultExt};
use crate::models::StorageAccountCreate;
use tokio::task::JoinHandle;

pub async fn create_storage_account(ctx: &Context) -> Result<(), ProvisionError> {
    let settings = &ctx.settings;
    println!("Starting to create storage account '{}'...", settings.account_name);
    log::info!(
        "create_storage_account({}, sku=Standard_LRS)",
        settings.account_name
    );
    ctx.api
        .create_storage_account(
            &settings.group_name,
            &settings.account_name,
            &StorageAccountCreate::standard_lrs(&settings.location),
        )
        .await
        .context("Create storage account failed")?;
    println!("... storage account created");
    Ok(())
}

/// Run [`create_storage_account`] on its own task.
///
/// The returned handle is the completion signal; it must be awaited once
/// before the VM is created.
pub fn spawn_storage_account(ctx: &Context) -> JoinHandle<Result<(), ProvisionError>> {
    let ctx = ctx.clone();
    tokio::spawn(async move { create_storage_account(&ctx).await })
}
