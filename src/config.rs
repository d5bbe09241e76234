//! Fixed names, network layout and environment driven settings.

use crate::error::ProvisionError;
use regex::Regex;
use std::fmt;
use std::sync::OnceLock;

pub const DEFAULT_LOCATION: &str = "westus";
pub const DEFAULT_GROUP_NAME: &str = "your-azure-sample-group";
pub const DEFAULT_ACCOUNT_NAME: &str = "rustrocksonazure";

pub const VNET_NAME: &str = "vNet";
pub const VNET_CIDR: &str = "172.16.0.0/16";
/// Prefix length of each subnet carved out of [`VNET_CIDR`].
pub const SUBNET_MASK: u8 = 24;
pub const SUBNET_NAMES: [&str; 3] = ["Front-end", "Mid-tier", "Back-end"];

pub const NIC_NAME_FRONT_END: &str = "nic1";
pub const NIC_NAME_MID_TIER: &str = "nic2";
pub const NIC_NAME_BACK_END: &str = "nic3";
pub const NIC_NAMES: [&str; 3] = [NIC_NAME_FRONT_END, NIC_NAME_MID_TIER, NIC_NAME_BACK_END];

pub const PIP_FIRST: &str = "pip1";
pub const PIP_SECOND: &str = "pip2";

pub const VM_NAME: &str = "vm";
pub const VM_SIZE: &str = "Standard_D3_v2";
pub const IMAGE_PUBLISHER: &str = "Canonical";
pub const IMAGE_OFFER: &str = "UbuntuServer";
pub const IMAGE_SKU: &str = "16.04.0-LTS";
pub const IMAGE_VERSION: &str = "latest";
pub const OS_DISK_NAME: &str = "osDisk";
pub const VHD_CONTAINER: &str = "vhds";
pub const STORAGE_ENDPOINT_SUFFIX: &str = "core.windows.net";
// Demo credentials, never use outside of a throw-away sample group.
pub const ADMIN_USERNAME: &str = "notadmin";
pub const ADMIN_PASSWORD: &str = "Pa$$w0rd1975";

pub const MANAGEMENT_ENDPOINT: &str = "https://management.azure.com";
pub const MANAGEMENT_SCOPE: &str = "https://management.azure.com/.default";
pub const USER_AGENT: &str = concat!("azure-vm-nics/", env!("CARGO_PKG_VERSION"));

/// Default wait between long-running-operation polls.
pub const POLL_SLEEP_MSEC: u64 = 2000;

pub const ENV_TENANT_ID: &str = "AZURE_TENANT_ID";
pub const ENV_CLIENT_ID: &str = "AZURE_CLIENT_ID";
pub const ENV_CLIENT_SECRET: &str = "AZURE_CLIENT_SECRET";
pub const ENV_SUBSCRIPTION_ID: &str = "AZURE_SUBSCRIPTION_ID";
pub const ENV_LOCATION: &str = "AZURE_LOCATION";
pub const ENV_RESOURCE_GROUP: &str = "AZURE_RESOURCE_GROUP";
pub const ENV_STORAGE_ACCOUNT: &str = "AZURE_STORAGE_ACCOUNT";

static ACCOUNT_NAME_REGEX: OnceLock<Regex> = OnceLock::new();

fn get_account_name_regex() -> &'static Regex {
    ACCOUNT_NAME_REGEX.get_or_init(|| Regex::new(r"^[a-z0-9]{3,24}$").expect("Invalid Regex"))
}

/// Everything the workflow needs to know about the target subscription.
#[derive(Clone)]
pub struct Settings {
    pub tenant_id: String,
    pub client_id: String,
    pub client_secret: String,
    pub subscription_id: String,
    pub location: String,
    pub group_name: String,
    pub account_name: String,
}

impl Settings {
    /// Read settings from the process environment.
    pub fn from_env() -> Result<Settings, ProvisionError> {
        Settings::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read settings through `lookup`, failing on the first required key
    /// that is absent or empty.
    pub fn from_lookup<F>(lookup: F) -> Result<Settings, ProvisionError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |key: &str| {
            lookup(key)
                .filter(|v| !v.trim().is_empty())
                .ok_or_else(|| ProvisionError::MissingEnv(key.to_string()))
        };
        let optional = |key: &str, default: &str| {
            lookup(key)
                .filter(|v| !v.trim().is_empty())
                .unwrap_or_else(|| default.to_string())
        };

        let settings = Settings {
            tenant_id: required(ENV_TENANT_ID)?,
            client_id: required(ENV_CLIENT_ID)?,
            client_secret: required(ENV_CLIENT_SECRET)?,
            subscription_id: required(ENV_SUBSCRIPTION_ID)?,
            location: optional(ENV_LOCATION, DEFAULT_LOCATION),
            group_name: optional(ENV_RESOURCE_GROUP, DEFAULT_GROUP_NAME),
            account_name: optional(ENV_STORAGE_ACCOUNT, DEFAULT_ACCOUNT_NAME),
        };

        if !get_account_name_regex().is_match(&settings.account_name) {
            return Err(ProvisionError::InvalidSetting {
                name: ENV_STORAGE_ACCOUNT.to_string(),
                reason: format!(
                    "'{}' must be 3-24 lowercase letters or digits",
                    settings.account_name
                ),
            });
        }
        Ok(settings)
    }

    /// URI of the OS disk blob inside the storage account.
    pub fn vhd_uri(&self) -> String {
        format!(
            "https://{account}.blob.{suffix}/{VHD_CONTAINER}/{VM_NAME}.vhd",
            account = self.account_name,
            suffix = STORAGE_ENDPOINT_SUFFIX,
        )
    }
}

impl fmt::Debug for Settings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Settings")
            .field("tenant_id", &self.tenant_id)
            .field("client_id", &self.client_id)
            .field("client_secret", &"***")
            .field("subscription_id", &self.subscription_id)
            .field("location", &self.location)
            .field("group_name", &self.group_name)
            .field("account_name", &self.account_name)
            .finish()
    }
}
