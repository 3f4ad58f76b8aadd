// SPDX-License-Identifier: MIT
//! # memos-api: Memos REST client
//!
//! A thin client for a [Memos](https://usememos.com)-compatible API, covering
//! the two calls this workspace needs: create a memo, then attach a binary
//! resource to it.
//!
//! ## Upload sequence
//!
//! Uploading a file is a strictly linear, two-request workflow:
//!
//! 1. `POST {api_url}` creates the memo and returns its server-generated
//!    `name` (e.g. `memos/42`).
//! 2. `POST {resource_url}` creates a resource whose JSON body carries the
//!    file as base64 plus the `memo` reference from step 1.
//!
//! The resource endpoint is derived from the memo endpoint by rewriting a
//! trailing `/memos` (or `/memo`) path segment to `/resources`.
//!
//! There is no retry, no timeout beyond reqwest's defaults, and no cleanup:
//! if the second call fails, the memo from step 1 stays behind without an
//! attachment. The client logs that case at `warn` level and returns the
//! error.
//!
//! ## Authorization
//!
//! Both requests send the configured token verbatim in the `Authorization`
//! header; the caller is expected to store it with its `Bearer ` prefix
//! included.
//!
//! ## Example
//!
//! ```rust,no_run
//! use memos_api::{MemosClient, Visibility};
//!
//! # async fn example() -> Result<(), memos_api::ApiError> {
//! let client = MemosClient::new(
//!     "https://memos.example.com/api/v1/memos",
//!     "Bearer eyJhbGci...",
//! );
//! let resource = client
//!     .upload_image(b"...webp bytes...", "20240101_sunset.webp", "image/webp",
//!                   "20240101_sunset", false, Visibility::Public)
//!     .await?;
//! println!("created {}", resource.name);
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod error;
pub mod types;

pub use client::MemosClient;
pub use error::{ApiError, ApiResult};
pub use types::{CreateMemoRequest, CreateResourceRequest, Memo, Resource, Visibility};
