//! Microsoft.Storage account create parameters.

use serde::{Deserialize, Serialize};

pub const SKU_STANDARD_LRS: &str = "Standard_LRS";
pub const KIND_STORAGE: &str = "Storage";

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Sku {
    pub name: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct StorageAccountCreate {
    pub sku: Sku,
    pub kind: String,
    pub location: String,
    #[serde(default)]
    pub properties: serde_json::Map<String, serde_json::Value>,
}

impl StorageAccountCreate {
    /// Standard locally redundant general purpose account.
    pub fn standard_lrs(location: &str) -> StorageAccountCreate {
        StorageAccountCreate {
            sku: Sku {
                name: SKU_STANDARD_LRS.to_string(),
            },
            kind: KIND_STORAGE.to_string(),
            location: location.to_string(),
            properties: Default::default(),
        }
    }
}
