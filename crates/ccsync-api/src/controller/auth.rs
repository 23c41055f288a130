// Catalyst Center authentication
//
// Basic credentials are exchanged for a token at the system API; the
// token is stored on the client and sent with every later request.

use secrecy::{ExposeSecret, SecretString};
use tracing::debug;

use crate::controller::client::ControllerClient;
use crate::controller::models::TokenResponse;
use crate::error::Error;

impl ControllerClient {
    /// Authenticate with username/password.
    ///
    /// `POST /dna/system/api/v1/auth/token` with HTTP basic auth.
    pub async fn authenticate(&self, username: &str, password: &SecretString) -> Result<(), Error> {
        let url = self.url("dna/system/api/v1/auth/token")?;
        debug!("requesting token at {}", url);

        let resp = self
            .http()
            .post(url)
            .basic_auth(username, Some(password.expose_secret()))
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(Error::Authentication {
                message: format!("token request failed (HTTP {status}): {body}"),
            });
        }

        let token: TokenResponse = Self::handle_response(resp).await?;
        self.set_token(SecretString::from(token.token));

        debug!("authentication successful");
        Ok(())
    }
}
