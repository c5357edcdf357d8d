use async_trait::async_trait;
use reqwest::{Client, Method, Url};

use crate::remote::http::{
    build_http_client, classify_reqwest_error, truncate_for_error, HttpConfig, StoreError,
};
use crate::remote::{FileStore, ReadOutcome};

/// reqwest-backed client for the expresso engine.
#[derive(Debug, Clone)]
pub struct HttpFileStore {
    client: Client,
    base_url: Url,
}

impl HttpFileStore {
    pub fn new(base_url: &str, http: HttpConfig) -> anyhow::Result<Self> {
        let client = build_http_client(http, "failed to build expresso HTTP client")?;
        let base_url = Url::parse(base_url.trim_end_matches('/'))
            .map_err(|e| anyhow::anyhow!("invalid base url {base_url}: {e}"))?;
        Ok(Self { client, base_url })
    }

    /// Builds `{base}/{ns}/{segment}` with the segment percent-encoded as a
    /// single path component.
    fn endpoint(&self, namespace: &str, segment: Option<&str>) -> Result<Url, StoreError> {
        let mut url = self.base_url.clone();
        {
            let mut parts = url.path_segments_mut().map_err(|_| StoreError {
                kind: crate::remote::StoreErrorKind::Other,
                http_status: None,
                message: "base url cannot carry path segments".to_string(),
            })?;
            parts.pop_if_empty().push(namespace);
            if let Some(seg) = segment {
                parts.push(seg);
            }
        }
        Ok(url)
    }

    async fn send(
        &self,
        method: Method,
        url: Url,
        body: Option<Vec<u8>>,
        what: &str,
    ) -> Result<reqwest::Response, StoreError> {
        let mut req = self.client.request(method, url);
        if let Some(body) = body {
            req = req.body(body);
        }
        req.send()
            .await
            .map_err(|e| classify_reqwest_error(&e, what))
    }

    /// Maps a non-success response to `StoreError::status`, keeping a short
    /// slice of the body as context.
    async fn expect_success(
        response: reqwest::Response,
        what: &str,
    ) -> Result<reqwest::Response, StoreError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().await.unwrap_or_default();
        Err(StoreError::status(
            status.as_u16(),
            format!("{what}: {}", truncate_for_error(&body, 200)),
        ))
    }
}

#[async_trait]
impl FileStore for HttpFileStore {
    async fn list(&self) -> Result<Vec<String>, StoreError> {
        let url = self.endpoint("files", None)?;
        let response = self.send(Method::GET, url, None, "failed to list files").await?;
        let response = Self::expect_success(response, "list files").await?;
        let text = response
            .text()
            .await
            .map_err(|e| classify_reqwest_error(&e, "failed to read file listing"))?;
        Ok(text
            .split('\n')
            .filter(|name| !name.is_empty())
            .map(|name| name.to_string())
            .collect())
    }

    async fn read(&self, name: &str) -> Result<ReadOutcome, StoreError> {
        let url = self.endpoint("files", Some(name))?;
        let response = self
            .send(Method::GET, url, None, "failed to read file")
            .await?;
        if !response.status().is_success() {
            return Ok(ReadOutcome::NotFound);
        }
        let bytes = response
            .bytes()
            .await
            .map_err(|e| classify_reqwest_error(&e, "failed to read file body"))?;
        Ok(ReadOutcome::Content(bytes.to_vec()))
    }

    async fn write(&self, name: &str, content: &[u8]) -> Result<(), StoreError> {
        let url = self.endpoint("files", Some(name))?;
        let response = self
            .send(
                Method::POST,
                url,
                Some(content.to_vec()),
                "failed to write file",
            )
            .await?;
        Self::expect_success(response, "write file").await?;
        Ok(())
    }

    async fn delete(&self, name: &str) -> Result<(), StoreError> {
        let url = self.endpoint("files", Some(name))?;
        let response = self
            .send(Method::DELETE, url, None, "failed to delete file")
            .await?;
        Self::expect_success(response, "delete file").await?;
        Ok(())
    }

    async fn make_directory(&self, name: &str) -> Result<(), StoreError> {
        let url = self.endpoint("mkdir", Some(name))?;
        let response = self
            .send(Method::POST, url, None, "failed to create directory")
            .await?;
        Self::expect_success(response, "create directory").await?;
        Ok(())
    }

    async fn echo_probe(&self, message: &str) -> Result<String, StoreError> {
        let url = self.endpoint("echo", Some(message))?;
        let response = self.send(Method::GET, url, None, "echo request failed").await?;
        let response = Self::expect_success(response, "echo").await?;
        response
            .text()
            .await
            .map_err(|e| classify_reqwest_error(&e, "failed to read echo body"))
    }

    async fn identity_probe(&self) -> Result<String, StoreError> {
        let url = self.endpoint("user-agent", None)?;
        let response = self
            .send(Method::GET, url, None, "identity probe failed")
            .await?;
        let response = Self::expect_success(response, "identity probe").await?;
        response
            .text()
            .await
            .map_err(|e| classify_reqwest_error(&e, "failed to read identity body"))
    }
}
