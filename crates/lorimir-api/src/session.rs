//! Authenticated access to one LORIS instance.

use std::fmt;

use bytes::Bytes;
use reqwest::{Client, StatusCode, header};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{Error, Result};

/// Host serving the open PREVENT-AD release.
pub const HOSTNAME: &str = "openpreventad.loris.ca";

/// Versioned API root every request is issued against.
pub const BASE_URL: &str = "https://openpreventad.loris.ca/api/v0.0.3-dev";

/// Login credentials. `Debug` never prints the password.
#[derive(Clone)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

#[derive(Serialize)]
struct LoginRequest<'a> {
    username: &'a str,
    password: &'a str,
}

#[derive(Deserialize)]
struct LoginReply {
    token: String,
}

/// What a conditional fetch came back with: the tag the server reported
/// for the resource and, when it was modified, the fresh body.
#[derive(Debug, Clone)]
pub struct ConditionalFetch {
    pub etag: String,
    pub body: Option<Bytes>,
}

impl ConditionalFetch {
    pub fn modified(&self) -> bool {
        self.body.is_some()
    }
}

/// Authenticated handle on a LORIS instance: owns the HTTP client, the
/// API base URL and the bearer token issued at login.
#[derive(Clone)]
pub struct Session {
    http: Client,
    base: String,
    token: String,
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("base", &self.base)
            .field("token", &"<redacted>")
            .finish()
    }
}

impl Session {
    /// Exchange credentials for a bearer token at `{base}/login`.
    ///
    /// Any non-200 reply comes back as [`Error::LoginRejected`] carrying
    /// the raw response body so the caller can surface it verbatim.
    pub async fn login(base: &str, credentials: &Credentials) -> Result<Self> {
        let http = Client::builder().build()?;
        let url = format!("{}/login", base.trim_end_matches('/'));
        let reply = http
            .post(&url)
            .json(&LoginRequest {
                username: &credentials.username,
                password: &credentials.password,
            })
            .send()
            .await?;

        let status = reply.status();
        let body = reply.text().await?;
        if status != StatusCode::OK {
            return Err(Error::LoginRejected { status, body });
        }

        let LoginReply { token } =
            serde_json::from_str(&body).map_err(|source| Error::Decode { url, source })?;
        debug!(username = %credentials.username, "token issued");

        Ok(Self {
            http,
            base: base.trim_end_matches('/').to_owned(),
            token,
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base, path.trim_start_matches('/'))
    }

    /// `GET` a JSON resource and decode it into `T`.
    pub async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let url = self.url(path);
        let reply = self.http.get(&url).bearer_auth(&self.token).send().await?;
        let status = reply.status();
        if status != StatusCode::OK {
            return Err(Error::UnexpectedStatus { url, status });
        }
        let body = reply.text().await?;
        serde_json::from_str(&body).map_err(|source| Error::Decode { url, source })
    }

    /// `GET` a resource unconditionally and hand back the raw body.
    pub async fn get_bytes(&self, path: &str) -> Result<Bytes> {
        let url = self.url(path);
        let reply = self.http.get(&url).bearer_auth(&self.token).send().await?;
        let status = reply.status();
        if status != StatusCode::OK {
            return Err(Error::UnexpectedStatus { url, status });
        }
        Ok(reply.bytes().await?)
    }

    /// `GET` a resource with `If-None-Match` carrying `prev_etag`
    /// (omitted when empty). 200 yields the fresh body, 304 means the
    /// local copy still matches; anything else is an error.
    pub async fn get_conditional(&self, path: &str, prev_etag: &str) -> Result<ConditionalFetch> {
        let url = self.url(path);
        let mut request = self.http.get(&url).bearer_auth(&self.token);
        if !prev_etag.is_empty() {
            request = request.header(header::IF_NONE_MATCH, prev_etag);
        }
        let reply = request.send().await?;

        let status = reply.status();
        let etag = reply
            .headers()
            .get(header::ETAG)
            .and_then(|tag| tag.to_str().ok())
            .unwrap_or_default()
            .to_owned();

        match status {
            StatusCode::OK => {
                let body = reply.bytes().await?;
                debug!(%url, bytes = body.len(), "downloaded");
                Ok(ConditionalFetch {
                    etag,
                    body: Some(body),
                })
            }
            StatusCode::NOT_MODIFIED => {
                debug!(%url, "not modified");
                Ok(ConditionalFetch { etag, body: None })
            }
            _ => Err(Error::UnexpectedStatus { url, status }),
        }
    }
}
