// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
pub mod blob_client;
pub mod naming;

// Re-export main types for convenience
pub use blob_client::{
    BlobAccess, BlobClient, BlobObject, BlobStore, HttpBlobStore, MemoryBlobStore, PutOptions,
    StorageError, StoredBlob, LIST_PAGE_LIMIT,
};
pub use naming::generate_blob_name;
