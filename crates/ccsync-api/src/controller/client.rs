// Catalyst Center HTTP client
//
// Wraps `reqwest::Client` with token auth, Intent API URL construction,
// and `{ response }` envelope unwrapping. Endpoint groups (templates,
// tasks, inventory, sites) are implemented as inherent methods in
// sibling files to keep this module focused on transport mechanics.

use std::sync::RwLock;

use secrecy::{ExposeSecret, SecretString};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, trace};
use url::Url;

use crate::controller::models::Envelope;
use crate::error::{Error, preview};
use crate::transport::TransportConfig;

const AUTH_HEADER: &str = "X-Auth-Token";

/// Error bodies come in several shapes; pick whatever message is present.
#[derive(serde::Deserialize)]
struct ErrorResponse {
    #[serde(default)]
    response: Option<ErrorDetail>,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    description: Option<String>,
}

#[derive(serde::Deserialize)]
struct ErrorDetail {
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    detail: Option<String>,
}

/// Raw HTTP client for the Catalyst Center Intent API.
///
/// [`authenticate`](Self::authenticate) exchanges basic credentials for a
/// token, which is then attached to every request as `X-Auth-Token`.
pub struct ControllerClient {
    http: reqwest::Client,
    base_url: Url,
    token: RwLock<Option<SecretString>>,
}

impl ControllerClient {
    /// Create a new client from a `TransportConfig`.
    ///
    /// `base_url` is the controller root, e.g. `https://dnac.example.com`.
    pub fn new(base_url: &str, transport: &TransportConfig) -> Result<Self, Error> {
        let http = transport.build_client()?;
        Ok(Self::with_client(http, Self::normalize_base_url(base_url)?))
    }

    /// Create a client with a pre-built `reqwest::Client`.
    pub fn with_client(http: reqwest::Client, base_url: Url) -> Self {
        Self {
            http,
            base_url,
            token: RwLock::new(None),
        }
    }

    /// Ensure the base URL ends with `/` so relative joins keep its path.
    fn normalize_base_url(raw: &str) -> Result<Url, Error> {
        let mut url = Url::parse(raw)?;
        let path = url.path().trim_end_matches('/').to_owned();
        url.set_path(&format!("{path}/"));
        Ok(url)
    }

    /// The underlying HTTP client (for auth flows that need direct access).
    pub(crate) fn http(&self) -> &reqwest::Client {
        &self.http
    }

    /// The controller base URL.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    // ── Token management ─────────────────────────────────────────────

    pub(crate) fn set_token(&self, token: SecretString) {
        trace!("storing auth token");
        *self.token.write().expect("token lock poisoned") = Some(token);
    }

    /// Whether [`authenticate`](Self::authenticate) has succeeded.
    pub fn is_authenticated(&self) -> bool {
        self.token.read().expect("token lock poisoned").is_some()
    }

    fn apply_token(&self, builder: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        let guard = self.token.read().expect("token lock poisoned");
        match guard.as_ref() {
            Some(token) => builder.header(AUTH_HEADER, token.expose_secret()),
            None => builder,
        }
    }

    // ── URL builder ──────────────────────────────────────────────────

    /// Join an API path (e.g. `"dna/intent/api/v1/site"`) onto the base URL.
    pub(crate) fn url(&self, path: &str) -> Result<Url, Error> {
        Ok(self.base_url.join(path)?)
    }

    // ── Request helpers ──────────────────────────────────────────────

    /// GET returning the body as-is (no envelope).
    pub(crate) async fn get_raw<T: DeserializeOwned>(
        &self,
        path: &str,
        params: &[(&str, &str)],
    ) -> Result<T, Error> {
        let url = self.url(path)?;
        debug!("GET {url} params={params:?}");

        let resp = self
            .apply_token(self.http.get(url).query(params))
            .send()
            .await?;
        Self::handle_response(resp).await
    }

    /// GET and unwrap the `{ response }` envelope.
    pub(crate) async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        params: &[(&str, &str)],
    ) -> Result<T, Error> {
        let envelope: Envelope<T> = self.get_raw(path, params).await?;
        Ok(envelope.response)
    }

    /// POST a JSON body and unwrap the `{ response }` envelope.
    pub(crate) async fn post<T: DeserializeOwned>(
        &self,
        path: &str,
        body: &(impl Serialize + Sync),
    ) -> Result<T, Error> {
        let url = self.url(path)?;
        debug!("POST {url}");

        let resp = self
            .apply_token(self.http.post(url).json(body))
            .send()
            .await?;
        let envelope: Envelope<T> = Self::handle_response(resp).await?;
        Ok(envelope.response)
    }

    /// PUT a JSON body and unwrap the `{ response }` envelope.
    pub(crate) async fn put<T: DeserializeOwned>(
        &self,
        path: &str,
        body: &(impl Serialize + Sync),
    ) -> Result<T, Error> {
        let url = self.url(path)?;
        debug!("PUT {url}");

        let resp = self
            .apply_token(self.http.put(url).json(body))
            .send()
            .await?;
        let envelope: Envelope<T> = Self::handle_response(resp).await?;
        Ok(envelope.response)
    }

    // ── Response handling ────────────────────────────────────────────

    pub(crate) async fn handle_response<T: DeserializeOwned>(
        resp: reqwest::Response,
    ) -> Result<T, Error> {
        let status = resp.status();

        if status == reqwest::StatusCode::UNAUTHORIZED {
            return Err(Error::Authentication {
                message: "token expired or invalid credentials".into(),
            });
        }

        if status == reqwest::StatusCode::FORBIDDEN {
            return Err(Error::Authentication {
                message: "insufficient permissions (HTTP 403)".into(),
            });
        }

        if !status.is_success() {
            let raw = resp.text().await.unwrap_or_default();
            return Err(Error::Api {
                status: status.as_u16(),
                message: error_message(&raw).unwrap_or_else(|| {
                    if raw.is_empty() {
                        status.to_string()
                    } else {
                        preview(&raw).to_owned()
                    }
                }),
            });
        }

        let body = resp.text().await?;
        serde_json::from_str(&body).map_err(|e| Error::Deserialization {
            message: format!("{e} (body preview: {:?})", preview(&body)),
            body: body.clone(),
        })
    }
}

fn error_message(raw: &str) -> Option<String> {
    let err: ErrorResponse = serde_json::from_str(raw).ok()?;
    err.response
        .and_then(|r| r.message.or(r.detail))
        .or(err.message)
        .or(err.description)
}
