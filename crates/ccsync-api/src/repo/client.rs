// GitHub API HTTP client
//
// Wraps `reqwest::Client` with bearer-token auth, path-segment URL
// construction, and status-to-error mapping. Endpoint groups (contents,
// commits) are implemented as inherent methods in sibling files.

use reqwest::header::{ACCEPT, AUTHORIZATION, HeaderMap, HeaderValue};
use secrecy::{ExposeSecret, SecretString};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::debug;
use url::Url;

use crate::error::{Error, preview};
use crate::repo::models::RepoSummary;
use crate::transport::TransportConfig;

const GITHUB_JSON: &str = "application/vnd.github+json";

// ── Error response shape ────────────────────────────────────────────

#[derive(serde::Deserialize)]
struct ErrorResponse {
    #[serde(default)]
    message: Option<String>,
}

// ── Client ──────────────────────────────────────────────────────────

/// Async client for the GitHub REST API.
///
/// Every request carries the bearer token and the GitHub JSON media type.
/// Writes go to a single configured branch.
pub struct RepoClient {
    http: reqwest::Client,
    base_url: Url,
    branch: String,
}

impl RepoClient {
    /// Build from a personal access token.
    ///
    /// `base_url` is the API root: `https://api.github.com` for github.com,
    /// `https://host/api/v3` for GitHub Enterprise Server.
    pub fn from_token(
        base_url: &str,
        token: &SecretString,
        branch: impl Into<String>,
        transport: &TransportConfig,
    ) -> Result<Self, Error> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static(GITHUB_JSON));
        let mut auth = HeaderValue::from_str(&format!("Bearer {}", token.expose_secret()))
            .map_err(|e| Error::Authentication {
                message: format!("invalid token header value: {e}"),
            })?;
        auth.set_sensitive(true);
        headers.insert(AUTHORIZATION, auth);

        let http = transport.build_client_with_headers(headers)?;
        Ok(Self {
            http,
            base_url: Url::parse(base_url)?,
            branch: branch.into(),
        })
    }

    /// Wrap an existing `reqwest::Client` (caller manages auth headers).
    pub fn with_client(http: reqwest::Client, base_url: Url, branch: impl Into<String>) -> Self {
        Self {
            http,
            base_url,
            branch: branch.into(),
        }
    }

    /// The branch all writes target.
    pub fn branch(&self) -> &str {
        &self.branch
    }

    // ── URL builder ──────────────────────────────────────────────────

    /// Append path segments to the API root, percent-encoding each one.
    ///
    /// A segment may itself contain `/` (a file path inside the repo);
    /// it is split so the slashes stay literal.
    pub(crate) fn url(&self, segments: &[&str]) -> Result<Url, Error> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| Error::InvalidUrl(url::ParseError::RelativeUrlWithCannotBeABaseBase))?
            .pop_if_empty()
            .extend(segments.iter().flat_map(|s| s.split('/')));
        Ok(url)
    }

    // ── HTTP verbs ───────────────────────────────────────────────────

    pub(crate) async fn get<T: DeserializeOwned>(
        &self,
        url: Url,
        params: &[(&str, &str)],
    ) -> Result<T, Error> {
        debug!("GET {url} params={params:?}");

        let resp = self.http.get(url).query(params).send().await?;
        Self::handle_response(resp).await
    }

    pub(crate) async fn put<T: DeserializeOwned, B: Serialize + Sync>(
        &self,
        url: Url,
        body: &B,
    ) -> Result<T, Error> {
        debug!("PUT {url}");

        let resp = self.http.put(url).json(body).send().await?;
        Self::handle_response(resp).await
    }

    // ── Response handling ────────────────────────────────────────────

    async fn handle_response<T: DeserializeOwned>(resp: reqwest::Response) -> Result<T, Error> {
        let status = resp.status();
        if !status.is_success() {
            return Err(Self::parse_error(status, resp).await);
        }

        let body = resp.text().await?;
        serde_json::from_str(&body).map_err(|e| Error::Deserialization {
            message: format!("{e} (body preview: {:?})", preview(&body)),
            body: body.clone(),
        })
    }

    async fn parse_error(status: reqwest::StatusCode, resp: reqwest::Response) -> Error {
        let rate_limited = status == reqwest::StatusCode::TOO_MANY_REQUESTS
            || (status == reqwest::StatusCode::FORBIDDEN
                && resp
                    .headers()
                    .get("x-ratelimit-remaining")
                    .is_some_and(|v| v.as_bytes() == b"0"));

        let raw = resp.text().await.unwrap_or_default();
        let message = serde_json::from_str::<ErrorResponse>(&raw)
            .ok()
            .and_then(|e| e.message)
            .unwrap_or_else(|| {
                if raw.is_empty() {
                    status.to_string()
                } else {
                    preview(&raw).to_owned()
                }
            });

        if rate_limited {
            return Error::RateLimited { message };
        }

        match status {
            reqwest::StatusCode::UNAUTHORIZED | reqwest::StatusCode::FORBIDDEN => {
                Error::Authentication { message }
            }
            reqwest::StatusCode::CONFLICT => Error::Conflict { message },
            _ => Error::Api {
                status: status.as_u16(),
                message,
            },
        }
    }

    // ━━ Public API ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

    // ── Repositories ─────────────────────────────────────────────────

    /// Names of `owner`'s repositories, most recently updated first.
    ///
    /// `GET /users/{owner}/repos` -- a single page of up to 100.
    pub async fn list_repos(&self, owner: &str) -> Result<Vec<String>, Error> {
        let url = self.url(&["users", owner, "repos"])?;
        let repos: Vec<RepoSummary> = self
            .get(
                url,
                &[("per_page", "100"), ("sort", "updated"), ("direction", "desc")],
            )
            .await?;
        Ok(repos.into_iter().map(|r| r.name).collect())
    }

    /// Names of the authenticated user's private repositories.
    ///
    /// `GET /user/repos?type=private` -- a single page.
    pub async fn list_private_repos(&self) -> Result<Vec<String>, Error> {
        let url = self.url(&["user", "repos"])?;
        let repos: Vec<RepoSummary> = self.get(url, &[("type", "private")]).await?;
        Ok(repos.into_iter().map(|r| r.name).collect())
    }
}
