//! GitHub App credential exchange
//!
//! Converts a long-lived RSA private key into a short-lived installation
//! token usable against the GitHub REST API:
//!
//! 1. Sign a JWT asserting the App's identity (RS256, ten-minute window).
//! 2. Look up the installation id for the target repository.
//! 3. Exchange the assertion for an installation access token.
//!
//! GitHub caps JWT validity at ten minutes. The claim set backdates `iat` by
//! sixty seconds for clock drift and sets `exp` nine minutes out, so the
//! whole window stays within the cap.

use crate::error::{GitHubError, Result};
use crate::repo::RepoRef;
use chrono::{DateTime, Utc};
use jsonwebtoken::{Algorithm, EncodingKey, Header, encode};
use reqwest::header;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::debug;

/// API version header value sent with every request
pub const GITHUB_API_VERSION: &str = "2022-11-28";

const ACCEPT_JSON: &str = "application/vnd.github+json";
const USER_AGENT: &str = concat!("market-watch/", env!("CARGO_PKG_VERSION"));

/// Claim set for the App's signed assertion
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Claims {
    /// Issued-at, backdated for clock drift
    pub iat: i64,
    /// Expiry
    pub exp: i64,
    /// Issuer: the App identifier
    pub iss: String,
}

impl Claims {
    /// Seconds the issued-at claim is backdated to tolerate clock drift
    pub const CLOCK_DRIFT_SECS: i64 = 60;
    /// Assertion lifetime from call time (GitHub caps the window at 10 min)
    pub const VALIDITY_SECS: i64 = 9 * 60;

    /// Build the claim set for a given call time
    pub fn at(now: i64, app_id: &str) -> Self {
        Self {
            iat: now - Self::CLOCK_DRIFT_SECS,
            exp: now + Self::VALIDITY_SECS,
            iss: app_id.to_string(),
        }
    }
}

/// An installation access token and its server-defined expiry
///
/// Scoped to exactly one installation; held in memory only for the duration
/// of the calling operation.
#[derive(Debug, Clone, Deserialize)]
pub struct InstallationToken {
    pub token: String,
    #[serde(default)]
    pub expires_at: Option<DateTime<Utc>>,
}

/// GitHub App authenticator
///
/// Holds the App credential (identifier + private key path) and performs the
/// exchange against the configured API base. A fresh assertion is minted for
/// every outbound call; assertions and tokens are never persisted.
#[derive(Debug)]
pub struct AppAuth {
    app_id: String,
    private_key_path: PathBuf,
    api_base: String,
    client: reqwest::Client,
}

impl AppAuth {
    /// Create a new authenticator
    pub fn new(
        app_id: impl Into<String>,
        private_key_path: impl Into<PathBuf>,
        api_base: impl Into<String>,
        request_timeout: Duration,
    ) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(request_timeout)
            .build()?;

        Ok(Self {
            app_id: app_id.into(),
            private_key_path: private_key_path.into(),
            api_base: api_base.into().trim_end_matches('/').to_string(),
            client,
        })
    }

    /// Create an authenticator from GitHub settings
    ///
    /// Fails before any network call when the App credential is not
    /// configured.
    pub fn from_settings(
        settings: &watch_core::GitHubSettings,
        request_timeout: Duration,
    ) -> Result<Self> {
        let app_id = settings
            .app_id
            .as_deref()
            .filter(|s| !s.is_empty())
            .ok_or_else(|| GitHubError::Config("GITHUB_APP_ID is not configured".to_string()))?;

        let key_path = settings.private_key_path.as_deref().ok_or_else(|| {
            GitHubError::Config("GITHUB_PRIVATE_KEY_PATH is not configured".to_string())
        })?;

        Self::new(app_id, key_path, settings.api_base.clone(), request_timeout)
    }

    /// The App identifier
    pub fn app_id(&self) -> &str {
        &self.app_id
    }

    /// Mint a fresh signed assertion
    ///
    /// Reads the private key file and signs the claim set with RS256. The
    /// assertion is never reused across exchanges.
    pub fn mint_assertion(&self) -> Result<String> {
        let key = read_signing_key(&self.private_key_path)?;
        let claims = Claims::at(Utc::now().timestamp(), &self.app_id);

        encode(&Header::new(Algorithm::RS256), &claims, &key)
            .map_err(|e| GitHubError::Credential(format!("failed to sign assertion: {e}")))
    }

    /// Resolve the installation id for a repository
    ///
    /// Calls `GET /repos/{owner}/{repo}/installation` with the assertion as
    /// bearer auth. A non-200 response (repository not found, or the App is
    /// not installed there) surfaces the status code and body.
    pub async fn installation_id(&self, repo: &RepoRef) -> Result<u64> {
        let assertion = self.mint_assertion()?;
        let url = format!(
            "{}/repos/{}/{}/installation",
            self.api_base, repo.owner, repo.name
        );

        debug!(repository = %repo, "resolving installation id");
        let response = self
            .client
            .get(&url)
            .bearer_auth(&assertion)
            .header(header::ACCEPT, ACCEPT_JSON)
            .header("X-GitHub-Api-Version", GITHUB_API_VERSION)
            .send()
            .await?;

        let status = response.status().as_u16();
        let body = response.text().await?;

        if status != 200 {
            return Err(GitHubError::Lookup {
                owner: repo.owner.clone(),
                repo: repo.name.clone(),
                status,
                body,
            });
        }

        let value: Value = serde_json::from_str(&body)?;
        value
            .get("id")
            .and_then(Value::as_u64)
            .ok_or(GitHubError::Api { status, body })
    }

    /// Exchange a fresh assertion for an installation access token
    ///
    /// Calls `POST /app/installations/{id}/access_tokens`. A non-201 response
    /// surfaces the status code and body.
    pub async fn installation_token(&self, installation_id: u64) -> Result<InstallationToken> {
        let assertion = self.mint_assertion()?;
        let url = format!(
            "{}/app/installations/{installation_id}/access_tokens",
            self.api_base
        );

        debug!(installation_id, "exchanging assertion for installation token");
        let response = self
            .client
            .post(&url)
            .bearer_auth(&assertion)
            .header(header::ACCEPT, ACCEPT_JSON)
            .header("X-GitHub-Api-Version", GITHUB_API_VERSION)
            .send()
            .await?;

        let status = response.status().as_u16();
        let body = response.text().await?;

        if status != 201 {
            return Err(GitHubError::Auth { status, body });
        }

        Ok(serde_json::from_str(&body)?)
    }

    /// Run the full exchange for a repository
    pub async fn token_for(&self, repo: &RepoRef) -> Result<InstallationToken> {
        let installation_id = self.installation_id(repo).await?;
        self.installation_token(installation_id).await
    }

    /// POST a JSON body authenticated with an installation token
    ///
    /// Returns the raw status code and body so callers apply their own
    /// success criteria.
    pub async fn post_as_installation(
        &self,
        path: &str,
        token: &str,
        body: &Value,
    ) -> Result<(u16, String)> {
        let url = format!("{}{path}", self.api_base);

        let response = self
            .client
            .post(&url)
            .bearer_auth(token)
            .header(header::ACCEPT, ACCEPT_JSON)
            .header("X-GitHub-Api-Version", GITHUB_API_VERSION)
            .json(body)
            .send()
            .await?;

        let status = response.status().as_u16();
        let text = response.text().await?;
        Ok((status, text))
    }
}

/// Load and parse the RSA signing key
fn read_signing_key(path: &Path) -> Result<EncodingKey> {
    let pem = std::fs::read(path).map_err(|e| {
        GitHubError::Credential(format!("cannot read private key {}: {e}", path.display()))
    })?;

    EncodingKey::from_rsa_pem(&pem).map_err(|e| {
        GitHubError::Credential(format!("invalid RSA private key {}: {e}", path.display()))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::io::Write;
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const TEST_KEY_PEM: &str = include_str!("../testdata/rsa-2048.pem");

    fn write_test_key() -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(TEST_KEY_PEM.as_bytes()).unwrap();
        file
    }

    fn auth_against(api_base: &str, key_path: &Path) -> AppAuth {
        AppAuth::new("12345", key_path, api_base, Duration::from_secs(5)).unwrap()
    }

    #[test]
    fn test_claims_timing() {
        let now = 1_700_000_000;
        let claims = Claims::at(now, "12345");

        assert_eq!(claims.iat, now - 60);
        assert_eq!(claims.exp, now + 540);
        assert_eq!(claims.exp - claims.iat, 600);
        assert_eq!(claims.iss, "12345");
    }

    #[test]
    fn test_claims_timing_is_independent_of_call_time() {
        for now in [0, 1_000_000, i64::from(u32::MAX)] {
            let claims = Claims::at(now, "app");
            assert_eq!(claims.exp - claims.iat, 600);
            assert_eq!(claims.iat, now - Claims::CLOCK_DRIFT_SECS);
        }
    }

    #[test]
    fn test_mint_assertion_with_valid_key() {
        let key = write_test_key();
        let auth = auth_against("https://api.github.com", key.path());

        let assertion = auth.mint_assertion().unwrap();
        // Compact JWS: three dot-separated base64url segments
        assert_eq!(assertion.split('.').count(), 3);
    }

    #[test]
    fn test_mint_assertion_missing_key_file() {
        let auth = auth_against("https://api.github.com", Path::new("/nonexistent/key.pem"));

        let err = auth.mint_assertion().unwrap_err();
        assert!(matches!(err, GitHubError::Credential(_)));
        assert!(err.to_string().contains("/nonexistent/key.pem"));
    }

    #[test]
    fn test_mint_assertion_malformed_key() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"not a pem key").unwrap();
        let auth = auth_against("https://api.github.com", file.path());

        let err = auth.mint_assertion().unwrap_err();
        assert!(matches!(err, GitHubError::Credential(_)));
    }

    #[tokio::test]
    async fn test_installation_id_resolution() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/repos/octocat/hello-world/installation"))
            .and(header("X-GitHub-Api-Version", GITHUB_API_VERSION))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "id": 4242 })))
            .mount(&server)
            .await;

        let key = write_test_key();
        let auth = auth_against(&server.uri(), key.path());
        let repo = RepoRef::parse_combined("octocat/hello-world").unwrap();

        let id = auth.installation_id(&repo).await.unwrap();
        assert_eq!(id, 4242);
    }

    #[tokio::test]
    async fn test_installation_id_not_found() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/repos/octocat/hello-world/installation"))
            .respond_with(ResponseTemplate::new(404).set_body_string("Not Found"))
            .mount(&server)
            .await;

        let key = write_test_key();
        let auth = auth_against(&server.uri(), key.path());
        let repo = RepoRef::parse_combined("octocat/hello-world").unwrap();

        let err = auth.installation_id(&repo).await.unwrap_err();
        match err {
            GitHubError::Lookup { status, body, .. } => {
                assert_eq!(status, 404);
                assert_eq!(body, "Not Found");
            }
            other => panic!("expected Lookup error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_installation_token_exchange() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/app/installations/4242/access_tokens"))
            .respond_with(ResponseTemplate::new(201).set_body_json(json!({
                "token": "ghs_abcdefg",
                "expires_at": "2026-01-01T00:00:00Z"
            })))
            .mount(&server)
            .await;

        let key = write_test_key();
        let auth = auth_against(&server.uri(), key.path());

        let token = auth.installation_token(4242).await.unwrap();
        assert_eq!(token.token, "ghs_abcdefg");
        assert!(token.expires_at.is_some());
    }

    #[tokio::test]
    async fn test_installation_token_exchange_failure() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/app/installations/4242/access_tokens"))
            .respond_with(ResponseTemplate::new(401).set_body_string("Bad credentials"))
            .mount(&server)
            .await;

        let key = write_test_key();
        let auth = auth_against(&server.uri(), key.path());

        let err = auth.installation_token(4242).await.unwrap_err();
        match err {
            GitHubError::Auth { status, body } => {
                assert_eq!(status, 401);
                assert_eq!(body, "Bad credentials");
            }
            other => panic!("expected Auth error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_from_settings_requires_credentials() {
        let settings = watch_core::GitHubSettings::default();
        let err = AppAuth::from_settings(&settings, Duration::from_secs(5)).unwrap_err();
        assert!(matches!(err, GitHubError::Config(_)));
    }
}
