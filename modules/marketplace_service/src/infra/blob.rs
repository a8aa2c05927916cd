//! HTTP blob store client
//!
//! Objects are addressed by their public URL. Listing goes through
//! `GET <base>?prefix=`, deletion through `POST <base>/delete` with a
//! `{"urls": [...]}` body. Both carry the read-write token as a bearer.

use crate::domain::providers::BlobStore;
use anyhow::{bail, Context, Result};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Public blob API endpoint used when only a token is configured
pub const DEFAULT_BLOB_API_URL: &str = "https://blob.vercel-storage.com";

pub struct HttpBlobStore {
    client: reqwest::Client,
    base_url: String,
    token: String,
}

#[derive(Serialize)]
struct DeleteRequest<'a> {
    urls: &'a [String],
}

#[derive(Deserialize)]
struct ListResponse {
    #[serde(default)]
    blobs: Vec<ListedBlob>,
}

#[derive(Deserialize)]
struct ListedBlob {
    url: String,
}

impl HttpBlobStore {
    pub fn new(base_url: impl Into<String>, token: impl Into<String>) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .context("failed to build blob store HTTP client")?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            token: token.into(),
        })
    }

    async fn delete_urls(&self, urls: &[String]) -> Result<()> {
        if urls.is_empty() {
            return Ok(());
        }

        let response = self
            .client
            .post(format!("{}/delete", self.base_url))
            .bearer_auth(&self.token)
            .json(&DeleteRequest { urls })
            .send()
            .await
            .context("blob delete request failed")?;

        let status = response.status();
        if !status.is_success() {
            bail!("blob delete returned {status}");
        }
        Ok(())
    }

    async fn list(&self, prefix: &str) -> Result<Vec<String>> {
        let response = self
            .client
            .get(&self.base_url)
            .bearer_auth(&self.token)
            .query(&[("prefix", prefix)])
            .send()
            .await
            .context("blob list request failed")?;

        let status = response.status();
        if !status.is_success() {
            bail!("blob list returned {status}");
        }

        let body: ListResponse = response
            .json()
            .await
            .context("blob list response was not valid JSON")?;
        Ok(body.blobs.into_iter().map(|b| b.url).collect())
    }
}

#[async_trait]
impl BlobStore for HttpBlobStore {
    async fn delete(&self, url: &str) -> Result<()> {
        self.delete_urls(&[url.to_string()]).await?;
        tracing::debug!(url, "Blob deleted");
        Ok(())
    }

    async fn delete_prefix(&self, prefix: &str) -> Result<usize> {
        let urls = self.list(prefix).await?;
        self.delete_urls(&urls).await?;
        tracing::info!(prefix, deleted = urls.len(), "Blob prefix purged");
        Ok(urls.len())
    }
}
