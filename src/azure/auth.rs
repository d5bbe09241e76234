//! Bearer tokens for the management endpoint.

use crate::config::{self, Settings};
use crate::error::ApiError;
use azure_core::auth::TokenCredential;
use azure_identity::{ClientSecretCredential, TokenCredentialOptions};
use std::sync::Arc;

/// Service principal credential built from tenant, client id and secret.
///
/// Authenticates against the public cloud authority, the options default.
pub fn client_secret_credential(settings: &Settings) -> Arc<dyn TokenCredential> {
    Arc::new(ClientSecretCredential::new(
        azure_core::new_http_client(),
        settings.tenant_id.clone(),
        settings.client_id.clone(),
        settings.client_secret.clone(),
        TokenCredentialOptions::default(),
    ))
}

/// Fetch an access token for the management scope.
///
/// The credential caches the token until it expires, so this is called once
/// per request.
pub async fn bearer_token(credential: &dyn TokenCredential) -> Result<String, ApiError> {
    let token = credential.get_token(&[config::MANAGEMENT_SCOPE]).await?;
    log::trace!("Got management token, expires_on={}", token.expires_on);
    Ok(token.token.secret().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings() -> Settings {
        Settings::from_lookup(|key| match key {
            config::ENV_TENANT_ID => Some("tenant".to_string()),
            config::ENV_CLIENT_ID => Some("client".to_string()),
            config::ENV_CLIENT_SECRET => Some("secret".to_string()),
            config::ENV_SUBSCRIPTION_ID => Some("sub".to_string()),
            _ => None,
        })
        .unwrap()
    }

    #[test]
    fn test_client_from_service_principal() {
        let client = crate::azure::ArmClient::new(
            client_secret_credential(&settings()),
            config::MANAGEMENT_ENDPOINT,
            "sub",
        );
        assert!(client.is_ok());
    }
}
