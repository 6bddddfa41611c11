//! `reqwest` transport for the results server.

use crate::endpoints::{Method, Request};
use crate::error::{FetchError, FetchResult};
use crate::wire;
use reqwest::{Client, redirect};
use serde::Deserialize;
use util::config::AppConfig;

/// HTTP client bound to one results server.
///
/// Cheap to clone; clones share the underlying connection pool.
#[derive(Clone, Debug)]
pub struct HttpResultClient {
    client: Client,
    base_url: String,
}

impl HttpResultClient {
    /// Builds a client for `base_url` (scheme, host and optional port).
    pub fn new(base_url: &str, user_agent: &str) -> FetchResult<Self> {
        let client = Client::builder()
            .user_agent(user_agent)
            .gzip(true)
            .brotli(true)
            .deflate(true)
            .redirect(redirect::Policy::limited(10))
            .build()
            .map_err(|e| FetchError::Transport(format!("building HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Builds a client from the global [`AppConfig`].
    pub fn from_config(config: &AppConfig) -> FetchResult<Self> {
        Self::new(&config.server_url, &config.user_agent)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Issues `request` and returns the raw body of a 2xx response.
    async fn execute(&self, request: &Request) -> FetchResult<Vec<u8>> {
        let url = format!("{}{}", self.base_url, request.endpoint.path());
        tracing::debug!(
            endpoint = request.endpoint.name(),
            command = request.endpoint.is_command(),
            url = %url,
            "issuing request"
        );

        let builder = match request.endpoint.method() {
            Method::Get => self.client.get(&url).query(&request.params),
            Method::Post => self.client.post(&url).form(&request.params),
        };

        let resp = builder
            .send()
            .await
            .map_err(|e| FetchError::Transport(format!("{} {url}: {e}", request.endpoint.name())))?;

        let status = resp.status();
        if !status.is_success() {
            return Err(FetchError::Transport(format!(
                "{} {url}: status {status}",
                request.endpoint.name()
            )));
        }

        let bytes = resp.bytes().await?;
        Ok(bytes.to_vec())
    }

    /// Fetches `request` and decodes its body as wire shape `W`, normalized to `T`.
    pub async fn fetch<W, T>(&self, request: &Request) -> FetchResult<T>
    where
        W: for<'de> Deserialize<'de>,
        T: TryFrom<W, Error = FetchError>,
    {
        let body = self.execute(request).await?;
        wire::decode::<W, T>(&body).inspect_err(|e| {
            tracing::debug!(endpoint = request.endpoint.name(), error = %e, "decode failed");
        })
    }

    /// Sends a command. Any 2xx response counts as acceptance; the body is ignored.
    pub async fn send(&self, request: &Request) -> FetchResult<()> {
        self.execute(request).await.map(|_| ())
    }

    /// Fetches the raw JSON body of `request` as a map keyed by lab name.
    pub(crate) async fn fetch_map<W>(
        &self,
        request: &Request,
    ) -> FetchResult<std::collections::BTreeMap<String, W>>
    where
        W: for<'de> Deserialize<'de>,
    {
        let body = self.execute(request).await?;
        Ok(serde_json::from_slice(&body)?)
    }
}
