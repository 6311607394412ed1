// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
use async_trait::async_trait;
use bytes::Bytes;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::{Mutex, RwLock};
use tracing::{debug, warn};

use crate::config::BlobBackendConfig;

/// Page size requested from the blob store list endpoint
pub const LIST_PAGE_LIMIT: usize = 1000;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Network error: {0}")]
    NetworkError(String),
    #[error("Invalid path: {0}")]
    InvalidPath(String),
    #[error("Not found: {0}")]
    NotFound(String),
    #[error("Serialization error: {0}")]
    SerializationError(String),
    #[error("Authentication error: {0}")]
    AuthError(String),
    #[error("Server error: {0}")]
    ServerError(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BlobAccess {
    Public,
}

impl BlobAccess {
    pub fn as_str(&self) -> &'static str {
        match self {
            BlobAccess::Public => "public",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PutOptions {
    pub access: BlobAccess,
    pub content_type: String,
}

impl PutOptions {
    /// Publicly readable JPEG, the only kind of object the gallery writes
    pub fn public_jpeg() -> Self {
        Self {
            access: BlobAccess::Public,
            content_type: "image/jpeg".to_string(),
        }
    }
}

/// A stored object as reported by the blob store
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BlobObject {
    pub url: String,
    pub pathname: String,
    #[serde(default)]
    pub content_type: Option<String>,
    #[serde(default)]
    pub size: u64,
    pub uploaded_at: DateTime<Utc>,
}

/// Object payload returned by `get`
#[derive(Debug, Clone)]
pub struct StoredBlob {
    pub data: Bytes,
    pub content_type: Option<String>,
}

#[async_trait]
pub trait BlobStore: Send + Sync {
    /// Upload `data` under `pathname`, returning the stored object with its public URL
    async fn put(
        &self,
        pathname: &str,
        data: Bytes,
        options: PutOptions,
    ) -> Result<BlobObject, StorageError>;

    /// List every stored object
    async fn list(&self) -> Result<Vec<BlobObject>, StorageError>;

    /// Fetch an object's bytes by pathname
    async fn get(&self, pathname: &str) -> Result<StoredBlob, StorageError>;
}

fn validate_path(path: &str) -> Result<(), StorageError> {
    if path.is_empty() {
        return Err(StorageError::InvalidPath("Empty path".to_string()));
    }

    if path.starts_with('/') {
        return Err(StorageError::InvalidPath(
            "Path cannot start with /".to_string(),
        ));
    }

    if path.split('/').any(|segment| segment == "..") {
        return Err(StorageError::InvalidPath(
            "Path traversal not allowed".to_string(),
        ));
    }

    Ok(())
}

#[derive(Debug)]
struct MemoryEntry {
    data: Bytes,
    content_type: String,
    uploaded_at: DateTime<Utc>,
}

/// In-process blob store; objects are served by the gallery server under `/blobs/`
#[derive(Debug, Clone)]
pub struct MemoryBlobStore {
    storage: Arc<RwLock<HashMap<String, MemoryEntry>>>,
    injected_error: Arc<Mutex<Option<StorageError>>>,
    public_base_url: String,
}

impl MemoryBlobStore {
    pub fn new(public_base_url: &str) -> Self {
        Self {
            storage: Arc::new(RwLock::new(HashMap::new())),
            injected_error: Arc::new(Mutex::new(None)),
            public_base_url: public_base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn public_url(&self, pathname: &str) -> String {
        format!("{}/blobs/{}", self.public_base_url, pathname)
    }

    /// Make the next operation fail with `error`
    pub async fn inject_error(&self, error: StorageError) {
        let mut injected_error = self.injected_error.lock().await;
        *injected_error = Some(error);
    }

    async fn check_injected_error(&self) -> Result<(), StorageError> {
        let mut error_opt = self.injected_error.lock().await;
        if let Some(error) = error_opt.take() {
            return Err(error);
        }
        Ok(())
    }
}

#[async_trait]
impl BlobStore for MemoryBlobStore {
    async fn put(
        &self,
        pathname: &str,
        data: Bytes,
        options: PutOptions,
    ) -> Result<BlobObject, StorageError> {
        self.check_injected_error().await?;
        validate_path(pathname)?;

        let entry = MemoryEntry {
            data,
            content_type: options.content_type,
            uploaded_at: Utc::now(),
        };
        let object = BlobObject {
            url: self.public_url(pathname),
            pathname: pathname.to_string(),
            content_type: Some(entry.content_type.clone()),
            size: entry.data.len() as u64,
            uploaded_at: entry.uploaded_at,
        };

        let mut storage = self.storage.write().await;
        storage.insert(pathname.to_string(), entry);

        Ok(object)
    }

    async fn list(&self) -> Result<Vec<BlobObject>, StorageError> {
        self.check_injected_error().await?;

        let storage = self.storage.read().await;
        let mut objects: Vec<BlobObject> = storage
            .iter()
            .map(|(pathname, entry)| BlobObject {
                url: self.public_url(pathname),
                pathname: pathname.clone(),
                content_type: Some(entry.content_type.clone()),
                size: entry.data.len() as u64,
                uploaded_at: entry.uploaded_at,
            })
            .collect();

        objects.sort_by(|a, b| a.pathname.cmp(&b.pathname));
        Ok(objects)
    }

    async fn get(&self, pathname: &str) -> Result<StoredBlob, StorageError> {
        self.check_injected_error().await?;
        validate_path(pathname)?;

        let storage = self.storage.read().await;
        storage
            .get(pathname)
            .map(|entry| StoredBlob {
                data: entry.data.clone(),
                content_type: Some(entry.content_type.clone()),
            })
            .ok_or_else(|| StorageError::NotFound(pathname.to_string()))
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PutBlobResult {
    url: String,
    pathname: String,
    #[serde(default)]
    content_type: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ListBlobResult {
    blobs: Vec<BlobObject>,
    #[serde(default)]
    cursor: Option<String>,
    #[serde(default)]
    has_more: bool,
}

/// Managed blob store reached over its REST API
#[derive(Debug, Clone)]
pub struct HttpBlobStore {
    client: reqwest::Client,
    api_url: String,
    token: String,
}

impl HttpBlobStore {
    pub fn new(api_url: &str, token: &str) -> Result<Self, StorageError> {
        let client = reqwest::Client::builder()
            .build()
            .map_err(|e| StorageError::NetworkError(e.to_string()))?;

        Ok(Self {
            client,
            api_url: api_url.trim_end_matches('/').to_string(),
            token: token.to_string(),
        })
    }

    async fn send(
        &self,
        request_builder: reqwest::RequestBuilder,
    ) -> Result<reqwest::Response, StorageError> {
        let response = request_builder
            .header("Authorization", format!("Bearer {}", self.token))
            .send()
            .await
            .map_err(|e| StorageError::NetworkError(e.to_string()))?;

        let status = response.status();
        if status == reqwest::StatusCode::UNAUTHORIZED || status == reqwest::StatusCode::FORBIDDEN
        {
            return Err(StorageError::AuthError(format!(
                "Blob store rejected credentials: {}",
                status
            )));
        }

        if status.is_server_error() {
            return Err(StorageError::ServerError(format!(
                "Server error: {}",
                status
            )));
        }

        Ok(response)
    }

    async fn list_page(
        &self,
        cursor: Option<&str>,
        prefix: Option<&str>,
    ) -> Result<ListBlobResult, StorageError> {
        let limit = LIST_PAGE_LIMIT.to_string();
        let mut query: Vec<(&str, &str)> = vec![("limit", limit.as_str())];
        if let Some(cursor) = cursor {
            query.push(("cursor", cursor));
        }
        if let Some(prefix) = prefix {
            query.push(("prefix", prefix));
        }

        let response = self
            .send(self.client.get(&self.api_url).query(&query))
            .await?;

        if !response.status().is_success() {
            return Err(StorageError::ServerError(format!(
                "List failed: {}",
                response.status()
            )));
        }

        response
            .json::<ListBlobResult>()
            .await
            .map_err(|e| StorageError::SerializationError(e.to_string()))
    }
}

#[async_trait]
impl BlobStore for HttpBlobStore {
    async fn put(
        &self,
        pathname: &str,
        data: Bytes,
        options: PutOptions,
    ) -> Result<BlobObject, StorageError> {
        validate_path(pathname)?;

        let size = data.len() as u64;
        let url = format!("{}/{}", self.api_url, pathname);
        debug!("Blob upload PUT {} ({} bytes)", url, size);

        let request_builder = self
            .client
            .put(&url)
            .header("x-content-type", options.content_type.as_str())
            .header("x-access", options.access.as_str())
            .header("x-add-random-suffix", "0")
            .body(data);

        let response = self.send(request_builder).await?;

        if !response.status().is_success() {
            return Err(StorageError::ServerError(format!(
                "Upload failed: {}",
                response.status()
            )));
        }

        let result: PutBlobResult = response
            .json()
            .await
            .map_err(|e| StorageError::SerializationError(e.to_string()))?;

        Ok(BlobObject {
            url: result.url,
            pathname: result.pathname,
            content_type: result.content_type.or(Some(options.content_type)),
            size,
            uploaded_at: Utc::now(),
        })
    }

    async fn list(&self) -> Result<Vec<BlobObject>, StorageError> {
        let mut objects = Vec::new();
        let mut cursor: Option<String> = None;

        loop {
            let page = self.list_page(cursor.as_deref(), None).await?;
            objects.extend(page.blobs);

            match page.cursor {
                Some(next) if page.has_more => {
                    if cursor.as_deref() == Some(next.as_str()) {
                        warn!("Blob listing repeated cursor {}, stopping", next);
                        break;
                    }
                    cursor = Some(next);
                }
                _ => break,
            }
        }

        Ok(objects)
    }

    async fn get(&self, pathname: &str) -> Result<StoredBlob, StorageError> {
        validate_path(pathname)?;

        let page = self.list_page(None, Some(pathname)).await?;
        let object = page
            .blobs
            .into_iter()
            .find(|blob| blob.pathname == pathname)
            .ok_or_else(|| StorageError::NotFound(pathname.to_string()))?;

        let response = self
            .client
            .get(&object.url)
            .send()
            .await
            .map_err(|e| StorageError::NetworkError(e.to_string()))?;

        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Err(StorageError::NotFound(pathname.to_string()));
        }
        if !response.status().is_success() {
            return Err(StorageError::ServerError(format!(
                "Download failed: {}",
                response.status()
            )));
        }

        let content_type = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string)
            .or(object.content_type);
        let data = response
            .bytes()
            .await
            .map_err(|e| StorageError::NetworkError(e.to_string()))?;

        Ok(StoredBlob { data, content_type })
    }
}

pub struct BlobClient;

impl BlobClient {
    pub fn create(config: &BlobBackendConfig) -> Result<Arc<dyn BlobStore>, StorageError> {
        match config {
            BlobBackendConfig::Memory { public_base_url } => {
                Ok(Arc::new(MemoryBlobStore::new(public_base_url)))
            }
            BlobBackendConfig::Http { api_url, token } => {
                Ok(Arc::new(HttpBlobStore::new(api_url, token)?))
            }
        }
    }
}
