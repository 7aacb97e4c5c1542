//! Store doubles shared by the component tests.

use async_trait::async_trait;
use shared::{Bill, BillDraft};
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;

use super::{BillsCollection, MemoryStore, RemoteStore, StoreError};

/// Store whose every operation rejects with `Erreur {status}`
#[derive(Clone)]
pub struct RejectingStore {
    pub status: u16,
}

impl RemoteStore for RejectingStore {
    type Bills = RejectingBills;

    fn bills(&self) -> RejectingBills {
        RejectingBills {
            status: self.status,
        }
    }
}

pub struct RejectingBills {
    status: u16,
}

#[async_trait]
impl BillsCollection for RejectingBills {
    async fn list(&self) -> Result<Vec<Bill>, StoreError> {
        Err(StoreError::Api(self.status))
    }

    async fn create(&self, _draft: BillDraft) -> Result<Bill, StoreError> {
        Err(StoreError::Api(self.status))
    }

    async fn update(&self, _bill: Bill) -> Result<Bill, StoreError> {
        Err(StoreError::Api(self.status))
    }
}

/// Store that rejects the first N creates, then behaves like a
/// [`MemoryStore`]. Used to exercise the upload-failed-then-submit path.
#[derive(Clone)]
pub struct FlakyCreateStore {
    pub inner: MemoryStore,
    failures_left: Arc<AtomicU32>,
    pub status: u16,
}

impl FlakyCreateStore {
    pub fn failing_once(status: u16) -> Self {
        Self {
            inner: MemoryStore::new(),
            failures_left: Arc::new(AtomicU32::new(1)),
            status,
        }
    }
}

impl RemoteStore for FlakyCreateStore {
    type Bills = FlakyCreateBills;

    fn bills(&self) -> FlakyCreateBills {
        FlakyCreateBills {
            inner: self.inner.clone(),
            failures_left: self.failures_left.clone(),
            status: self.status,
        }
    }
}

pub struct FlakyCreateBills {
    inner: MemoryStore,
    failures_left: Arc<AtomicU32>,
    status: u16,
}

#[async_trait]
impl BillsCollection for FlakyCreateBills {
    async fn list(&self) -> Result<Vec<Bill>, StoreError> {
        self.inner.bills().list().await
    }

    async fn create(&self, draft: BillDraft) -> Result<Bill, StoreError> {
        if self
            .failures_left
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
            .is_ok()
        {
            return Err(StoreError::Api(self.status));
        }
        self.inner.bills().create(draft).await
    }

    async fn update(&self, bill: Bill) -> Result<Bill, StoreError> {
        self.inner.bills().update(bill).await
    }
}
