//! Resource group and the shared id-only reference.

use serde::{Deserialize, Serialize};

/// Reference to another resource by its full ARM id.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct SubResource {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
}

impl SubResource {
    pub fn new(id: impl Into<String>) -> SubResource {
        SubResource { id: Some(id.into()) }
    }
}

/// Container for every resource created by the workflow.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct ResourceGroup {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub location: String,
}

impl ResourceGroup {
    pub fn new(location: &str) -> ResourceGroup {
        ResourceGroup {
            location: location.to_string(),
            ..Default::default()
        }
    }
}
