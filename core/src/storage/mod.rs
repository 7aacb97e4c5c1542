//! # Remote Store
//!
//! This module defines the storage abstraction the domain components talk
//! to, so different store backends can be used interchangeably: the REST
//! client against the real API, and an in-memory store for development
//! and tests.

use async_trait::async_trait;
use shared::{Bill, BillDraft};
use thiserror::Error;

pub mod memory;
pub mod rest;
#[cfg(test)]
pub(crate) mod test_utils;

pub use memory::MemoryStore;
pub use rest::RestStore;

/// Error raised by a store operation.
///
/// API failures display as `Erreur {status}` — the convention of the
/// backing service. The domain layer surfaces the message verbatim and
/// never parses it.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The store answered with a non-success HTTP-like status
    #[error("Erreur {0}")]
    Api(u16),
    /// The store rejected the operation with a message of its own
    #[error("{0}")]
    Rejected(String),
    /// The request never completed (network, timeout, bad body)
    #[error(transparent)]
    Transport(#[from] reqwest::Error),
    /// A payload could not be encoded for the wire
    #[error(transparent)]
    Encoding(#[from] serde_json::Error),
}

/// Trait defining the interface for store connections.
///
/// Collection-style accessor: a connection hands out the bills collection,
/// which carries the actual operations. This keeps the domain layer
/// ignorant of whether the backend is HTTP or in-memory.
pub trait RemoteStore: Send + Sync {
    /// The type of bills collection this store creates
    type Bills: BillsCollection;

    /// Access the bills collection
    fn bills(&self) -> Self::Bills;
}

/// Operations on the bills collection
#[async_trait]
pub trait BillsCollection: Send + Sync {
    /// List every bill visible to the current user
    async fn list(&self) -> Result<Vec<Bill>, StoreError>;

    /// Persist a draft; the store assigns the id and, when an attachment
    /// rides along, the stored file's URL and name
    async fn create(&self, draft: BillDraft) -> Result<Bill, StoreError>;

    /// Replace an existing bill, matched by id
    async fn update(&self, bill: Bill) -> Result<Bill, StoreError>;
}
