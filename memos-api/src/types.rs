// SPDX-License-Identifier: MIT
//! Wire types mirroring the Memos API's JSON shapes.
//!
//! These are flat DTOs; the remote service is the source of truth for any
//! invariants beyond field presence.

use base64::{engine::general_purpose, Engine as _};
use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

/// Memo visibility, serialized in the API's upper-case form
/// (`PRIVATE` / `PUBLIC`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Visibility {
    Private,
    Public,
}

/// Body of `POST {api_url}` (create memo).
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateMemoRequest {
    pub state: String,
    pub creator: String,
    pub create_time: String,
    pub update_time: String,
    pub display_time: String,
    pub content: String,
    pub visibility: Visibility,
    pub pinned: bool,
}

impl CreateMemoRequest {
    /// Build a request with the fixed `state`/`creator` the service expects
    /// and all three timestamps set to now (RFC 3339).
    pub fn new(content: &str, visibility: Visibility, pinned: bool) -> Self {
        let now = Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true);
        Self {
            state: "NORMAL".to_string(),
            creator: "auto".to_string(),
            create_time: now.clone(),
            update_time: now.clone(),
            display_time: now,
            content: content.to_string(),
            visibility,
            pinned,
        }
    }
}

/// The slice of the memo response this crate cares about.
#[derive(Debug, Clone, Deserialize)]
pub struct Memo {
    /// Server-generated identifier, e.g. `memos/42`.
    #[serde(default)]
    pub name: String,
}

/// Body of `POST {resource_url}` (create resource bound to a memo).
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateResourceRequest {
    pub filename: String,
    /// File payload as standard (padded) base64.
    pub content: String,
    pub external_link: String,
    #[serde(rename = "type")]
    pub mime_type: String,
    /// Byte count of the original payload, as a decimal string.
    pub size: String,
    /// `name` of the memo this resource attaches to.
    pub memo: String,
}

impl CreateResourceRequest {
    /// Base64-encode `bytes` and fill in the derived fields.
    pub fn for_bytes(filename: &str, mime_type: &str, bytes: &[u8], memo: &str) -> Self {
        Self {
            filename: filename.to_string(),
            content: general_purpose::STANDARD.encode(bytes),
            external_link: String::new(),
            mime_type: mime_type.to_string(),
            size: bytes.len().to_string(),
            memo: memo.to_string(),
        }
    }
}

/// The slice of the resource response this crate cares about.
#[derive(Debug, Clone, Deserialize)]
pub struct Resource {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub filename: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn visibility_serializes_upper_case() {
        assert_eq!(
            serde_json::to_string(&Visibility::Private).unwrap(),
            "\"PRIVATE\""
        );
        assert_eq!(
            serde_json::to_string(&Visibility::Public).unwrap(),
            "\"PUBLIC\""
        );
    }

    #[test]
    fn memo_request_uses_camel_case_keys() {
        let req = CreateMemoRequest::new("hello", Visibility::Private, true);
        let json = serde_json::to_value(&req).unwrap();
        assert_eq!(json["state"], "NORMAL");
        assert_eq!(json["creator"], "auto");
        assert_eq!(json["content"], "hello");
        assert_eq!(json["visibility"], "PRIVATE");
        assert_eq!(json["pinned"], true);
        assert!(json.get("createTime").is_some());
        assert!(json.get("updateTime").is_some());
        assert!(json.get("displayTime").is_some());
        assert!(json.get("create_time").is_none());
    }

    #[test]
    fn resource_request_encodes_payload() {
        let req = CreateResourceRequest::for_bytes("a.webp", "image/webp", b"hello", "memos/7");
        assert_eq!(req.content, "aGVsbG8=");
        assert_eq!(req.size, "5");
        assert_eq!(req.external_link, "");
        assert_eq!(req.memo, "memos/7");

        let json = serde_json::to_value(&req).unwrap();
        assert_eq!(json["type"], "image/webp");
        assert_eq!(json["externalLink"], "");
    }
}
