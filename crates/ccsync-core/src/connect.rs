// Client construction from a `SyncConfig`.

use ccsync_api::{ControllerClient, RepoClient};
use tracing::info;

use crate::config::{ControllerConfig, RepoConfig};
use crate::error::CoreError;

/// Build the controller client and exchange credentials for a token.
pub async fn connect_controller(config: &ControllerConfig) -> Result<ControllerClient, CoreError> {
    let client = ControllerClient::new(config.url.as_str(), &config.transport())?;
    client
        .authenticate(&config.username, &config.password)
        .await?;
    info!(url = %config.url, user = %config.username, "authenticated to controller");
    Ok(client)
}

/// Build the repository client. No request is made until first use.
pub fn repo_client(config: &RepoConfig) -> Result<RepoClient, CoreError> {
    Ok(RepoClient::from_token(
        config.api_url.as_str(),
        &config.token,
        config.branch.clone(),
        &config.transport(),
    )?)
}
