// SPDX-License-Identifier: MIT
//! The client itself: endpoint derivation and the two POST calls.

use reqwest::header;

use crate::error::{ApiError, ApiResult};
use crate::types::{CreateMemoRequest, CreateResourceRequest, Memo, Resource, Visibility};

/// Client for one Memos instance.
///
/// Holds the memo endpoint URL and the full `Authorization` header value.
/// Cloning is cheap; the underlying `reqwest::Client` is an `Arc` internally.
#[derive(Debug, Clone)]
pub struct MemosClient {
    http: reqwest::Client,
    api_url: String,
    token: String,
}

impl MemosClient {
    /// `api_url` is the memo endpoint (e.g. `https://host/api/v1/memos`);
    /// `token` is sent verbatim as the `Authorization` header.
    pub fn new(api_url: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            api_url: api_url.into(),
            token: token.into(),
        }
    }

    /// The resource endpoint, derived by rewriting a trailing `/memos` or
    /// `/memo` path segment to `/resources`. A URL with neither suffix is
    /// returned unchanged.
    pub fn resource_url(&self) -> String {
        for suffix in ["/memos", "/memo"] {
            if let Some(base) = self.api_url.strip_suffix(suffix) {
                return format!("{}/resources", base);
            }
        }
        self.api_url.clone()
    }

    /// Create a memo and return its server-generated `name`.
    pub async fn create_memo(
        &self,
        content: &str,
        visibility: Visibility,
        pinned: bool,
    ) -> ApiResult<String> {
        let body = CreateMemoRequest::new(content, visibility, pinned);
        let resp = self
            .http
            .post(&self.api_url)
            .header(header::ACCEPT, "application/json")
            .header(header::AUTHORIZATION, &self.token)
            .json(&body)
            .send()
            .await?;
        if !resp.status().is_success() {
            return Err(ApiError::Status {
                call: "create memo",
                status: resp.status().as_u16(),
            });
        }
        let memo: Memo = resp.json().await?;
        if memo.name.is_empty() {
            return Err(ApiError::MissingField {
                call: "create memo",
                field: "name",
            });
        }
        Ok(memo.name)
    }

    /// Create a resource bound to an existing memo.
    pub async fn create_resource(&self, body: &CreateResourceRequest) -> ApiResult<Resource> {
        let resp = self
            .http
            .post(self.resource_url())
            .header(header::ACCEPT, "application/json")
            .header(header::AUTHORIZATION, &self.token)
            .json(body)
            .send()
            .await?;
        if !resp.status().is_success() {
            return Err(ApiError::Status {
                call: "upload resource",
                status: resp.status().as_u16(),
            });
        }
        Ok(resp.json().await?)
    }

    /// The full two-step upload: create a memo, then attach `bytes` to it.
    ///
    /// The resource call only happens once the memo call has succeeded. If
    /// the resource call fails the memo stays behind without an attachment;
    /// that is logged and the error is returned as-is.
    pub async fn upload_image(
        &self,
        bytes: &[u8],
        filename: &str,
        mime_type: &str,
        content: &str,
        pinned: bool,
        visibility: Visibility,
    ) -> ApiResult<Resource> {
        let memo_name = self.create_memo(content, visibility, pinned).await?;
        tracing::debug!(memo = %memo_name, filename, "memo created, uploading resource");

        let body = CreateResourceRequest::for_bytes(filename, mime_type, bytes, &memo_name);
        match self.create_resource(&body).await {
            Ok(resource) => Ok(resource),
            Err(err) => {
                tracing::warn!(
                    memo = %memo_name,
                    %err,
                    "resource upload failed; memo left without attachment"
                );
                Err(err)
            }
        }
    }
}
