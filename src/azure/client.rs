//! Azure Resource Manager REST client.
//!
//! Implements [`ManagementApi`] with plain HTTPS calls: a bearer token per
//! request, create-or-update via PUT, and a wait on the long-running operation
//! before the resource is read back.

use super::api::ManagementApi;
use super::auth;
use super::operation::{poll_target, retry_after, OperationStatus, PollTarget};
use crate::config::{self, Settings};
use crate::error::ApiError;
use crate::models::{
    NetworkInterface, PublicIpAddress, ResourceGroup, StorageAccountCreate, Subnet,
    VirtualMachine, VirtualNetwork,
};
use async_trait::async_trait;
use azure_core::auth::TokenCredential;
use colored::Colorize;
use reqwest::{Method, Response};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

const API_VERSION_RESOURCES: &str = "2021-04-01";
const API_VERSION_NETWORK: &str = "2023-09-01";
const API_VERSION_STORAGE: &str = "2023-01-01";
const API_VERSION_COMPUTE: &str = "2023-09-01";

/// One page of a list call.
#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
struct Page<T> {
    #[serde(default = "Vec::new")]
    value: Vec<T>,
    #[serde(default)]
    next_link: Option<String>,
}

/// Decode a response body, reporting the JSON path of any mismatch.
pub fn decode<T: DeserializeOwned>(body: &str) -> Result<T, ApiError> {
    let mut deserializer = serde_json::Deserializer::from_str(body);
    serde_path_to_error::deserialize(&mut deserializer).map_err(|e| {
        log::error!("BODY START:\n\n{}\n\nBODY END\n", body);
        ApiError::Decode {
            path: e.path().to_string(),
            message: e.inner().to_string(),
        }
    })
}

pub struct ArmClient {
    http: reqwest::Client,
    credential: Arc<dyn TokenCredential>,
    endpoint: String,
    subscription_id: String,
}

impl ArmClient {
    /// Build a client for the subscription in `settings` and check that a
    /// management token can be obtained.
    pub async fn connect(settings: &Settings) -> Result<ArmClient, ApiError> {
        let client = ArmClient::new(
            auth::client_secret_credential(settings),
            config::MANAGEMENT_ENDPOINT,
            &settings.subscription_id,
        )?;
        auth::bearer_token(client.credential.as_ref()).await?;
        log::info!(
            "Authenticated client_id={} for subscription {}",
            settings.client_id,
            settings.subscription_id
        );
        Ok(client)
    }

    pub fn new(
        credential: Arc<dyn TokenCredential>,
        endpoint: &str,
        subscription_id: &str,
    ) -> Result<ArmClient, ApiError> {
        let http = reqwest::Client::builder()
            .user_agent(config::USER_AGENT)
            .build()?;
        Ok(ArmClient {
            http,
            credential,
            endpoint: endpoint.trim_end_matches('/').to_string(),
            subscription_id: subscription_id.to_string(),
        })
    }

    fn group_url(&self, group: &str) -> String {
        format!(
            "{}/subscriptions/{}/resourcegroups/{}",
            self.endpoint, self.subscription_id, group
        )
    }

    /// `path` is relative to the provider namespace, e.g. `virtualNetworks/vNet`.
    fn provider_url(&self, group: &str, provider: &str, path: &str, api_version: &str) -> String {
        format!(
            "{}/providers/{provider}/{path}?api-version={api_version}",
            self.group_url(group)
        )
    }

    fn network_url(&self, group: &str, path: &str) -> String {
        self.provider_url(group, "Microsoft.Network", path, API_VERSION_NETWORK)
    }

    fn compute_url(&self, group: &str, path: &str) -> String {
        self.provider_url(group, "Microsoft.Compute", path, API_VERSION_COMPUTE)
    }

    fn storage_url(&self, group: &str, path: &str) -> String {
        self.provider_url(group, "Microsoft.Storage", path, API_VERSION_STORAGE)
    }

    /// Send one authenticated request; any non-success status is an error.
    async fn send<B: Serialize + Sync + ?Sized>(
        &self,
        method: Method,
        url: &str,
        body: Option<&B>,
    ) -> Result<Response, ApiError> {
        let token = auth::bearer_token(self.credential.as_ref()).await?;
        log::debug!("{} {}", method.as_str().on_blue(), url);

        let mut request = self.http.request(method.clone(), url).bearer_auth(token);
        if let Some(body) = body {
            request = request.json(body);
        }
        let response = request.send().await?;
        let status = response.status();
        log::debug!("{} {} -> {}", method, url, status);

        if status.is_success() {
            Ok(response)
        } else {
            let body = response.text().await.unwrap_or_default();
            log::warn!("{failed} {method} {url}", failed = "failed".on_red());
            Err(ApiError::Status {
                status: status.as_u16(),
                body,
            })
        }
    }

    async fn get<T: DeserializeOwned>(&self, url: &str) -> Result<T, ApiError> {
        let response = self.send::<()>(Method::GET, url, None).await?;
        let body = response.text().await?;
        log::trace!("GET {url} body={body}");
        decode(&body)
    }

    /// Follow an async operation or a 202 location until it is finished.
    async fn wait_for_operation(&self, response: Response) -> Result<(), ApiError> {
        let mut target = poll_target(response.status().as_u16(), response.headers());
        let mut delay = retry_after(response.headers());

        loop {
            let url = match &target {
                PollTarget::Done => return Ok(()),
                PollTarget::AsyncOperation(url) | PollTarget::Location(url) => url.clone(),
            };
            tokio::time::sleep(delay).await;
            let response = self.send::<()>(Method::GET, &url, None).await?;
            delay = retry_after(response.headers());

            if let PollTarget::AsyncOperation(_) = target {
                let status: OperationStatus = decode(&response.text().await?)?;
                log::debug!("operation status={}", status.status);
                if let Some(outcome) = status.outcome() {
                    return outcome;
                }
            } else {
                if response.status().as_u16() != 202 {
                    return Ok(());
                }
                // Keep polling the previous location unless a new one is given.
                if let PollTarget::Location(next) = poll_target(202, response.headers()) {
                    target = PollTarget::Location(next);
                }
            }
        }
    }

    /// PUT, wait for completion, then read the resource back.
    async fn put<B, T>(&self, url: &str, body: &B) -> Result<T, ApiError>
    where
        B: Serialize + Sync + ?Sized,
        T: DeserializeOwned,
    {
        let response = self.send(Method::PUT, url, Some(body)).await?;
        self.wait_for_operation(response).await?;
        self.get(url).await
    }

    async fn delete(&self, url: &str) -> Result<(), ApiError> {
        let response = self.send::<()>(Method::DELETE, url, None).await?;
        self.wait_for_operation(response).await
    }

    async fn list<T: DeserializeOwned>(&self, url: &str) -> Result<Vec<T>, ApiError> {
        let mut items = Vec::new();
        let mut next = Some(url.to_string());
        while let Some(url) = next {
            let page: Page<T> = self.get(&url).await?;
            log::debug!("got page of {} items", page.value.len());
            items.extend(page.value);
            next = page.next_link;
        }
        Ok(items)
    }
}

#[async_trait]
impl ManagementApi for ArmClient {
    async fn create_resource_group(
        &self,
        group: &str,
        params: &ResourceGroup,
    ) -> Result<ResourceGroup, ApiError> {
        let url = format!(
            "{}?api-version={API_VERSION_RESOURCES}",
            self.group_url(group)
        );
        self.put(&url, params).await
    }

    async fn delete_resource_group(&self, group: &str) -> Result<(), ApiError> {
        let url = format!(
            "{}?api-version={API_VERSION_RESOURCES}",
            self.group_url(group)
        );
        self.delete(&url).await
    }

    async fn create_virtual_network(
        &self,
        group: &str,
        name: &str,
        params: &VirtualNetwork,
    ) -> Result<VirtualNetwork, ApiError> {
        let url = self.network_url(group, &format!("virtualNetworks/{name}"));
        self.put(&url, params).await
    }

    async fn create_subnet(
        &self,
        group: &str,
        vnet: &str,
        name: &str,
        params: &Subnet,
    ) -> Result<Subnet, ApiError> {
        let url = self.network_url(group, &format!("virtualNetworks/{vnet}/subnets/{name}"));
        self.put(&url, params).await
    }

    async fn get_subnet(&self, group: &str, vnet: &str, name: &str) -> Result<Subnet, ApiError> {
        let url = self.network_url(group, &format!("virtualNetworks/{vnet}/subnets/{name}"));
        self.get(&url).await
    }

    async fn create_public_ip(
        &self,
        group: &str,
        name: &str,
        params: &PublicIpAddress,
    ) -> Result<PublicIpAddress, ApiError> {
        let url = self.network_url(group, &format!("publicIPAddresses/{name}"));
        self.put(&url, params).await
    }

    async fn get_public_ip(&self, group: &str, name: &str) -> Result<PublicIpAddress, ApiError> {
        let url = self.network_url(group, &format!("publicIPAddresses/{name}"));
        self.get(&url).await
    }

    async fn create_network_interface(
        &self,
        group: &str,
        name: &str,
        params: &NetworkInterface,
    ) -> Result<NetworkInterface, ApiError> {
        let url = self.network_url(group, &format!("networkInterfaces/{name}"));
        self.put(&url, params).await
    }

    async fn get_network_interface(
        &self,
        group: &str,
        name: &str,
    ) -> Result<NetworkInterface, ApiError> {
        let url = self.network_url(group, &format!("networkInterfaces/{name}"));
        self.get(&url).await
    }

    async fn list_network_interfaces(
        &self,
        group: &str,
    ) -> Result<Vec<NetworkInterface>, ApiError> {
        let url = self.network_url(group, "networkInterfaces");
        self.list(&url).await
    }

    async fn delete_network_interface(&self, group: &str, name: &str) -> Result<(), ApiError> {
        let url = self.network_url(group, &format!("networkInterfaces/{name}"));
        self.delete(&url).await
    }

    async fn create_storage_account(
        &self,
        group: &str,
        name: &str,
        params: &StorageAccountCreate,
    ) -> Result<(), ApiError> {
        let url = self.storage_url(group, &format!("storageAccounts/{name}"));
        let response = self.send(Method::PUT, &url, Some(params)).await?;
        self.wait_for_operation(response).await
    }

    async fn create_virtual_machine(
        &self,
        group: &str,
        name: &str,
        params: &VirtualMachine,
    ) -> Result<VirtualMachine, ApiError> {
        let url = self.compute_url(group, &format!("virtualMachines/{name}"));
        self.put(&url, params).await
    }

    async fn delete_virtual_machine(&self, group: &str, name: &str) -> Result<(), ApiError> {
        let url = self.compute_url(group, &format!("virtualMachines/{name}"));
        self.delete(&url).await
    }
}
