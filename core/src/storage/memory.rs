//! In-memory bill store, used as the development backend and as the test
//! double for every component test.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use shared::{Bill, BillDraft};
use uuid::Uuid;

use super::{BillsCollection, RemoteStore, StoreError};

/// In-memory store backed by a shared vector of bills.
///
/// Cloning is cheap and every clone sees the same data, so a store can be
/// handed to a component while the test (or the dev server) keeps its own
/// handle for inspection.
#[derive(Clone, Default)]
pub struct MemoryStore {
    bills: Arc<Mutex<Vec<Bill>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store pre-populated with bills
    pub fn with_bills(bills: Vec<Bill>) -> Self {
        Self {
            bills: Arc::new(Mutex::new(bills)),
        }
    }

    /// Snapshot of everything currently stored, in insertion order
    pub fn snapshot(&self) -> Vec<Bill> {
        self.bills.lock().unwrap().clone()
    }
}

impl RemoteStore for MemoryStore {
    type Bills = MemoryBills;

    fn bills(&self) -> MemoryBills {
        MemoryBills {
            bills: self.bills.clone(),
        }
    }
}

pub struct MemoryBills {
    bills: Arc<Mutex<Vec<Bill>>>,
}

#[async_trait]
impl BillsCollection for MemoryBills {
    async fn list(&self) -> Result<Vec<Bill>, StoreError> {
        Ok(self.bills.lock().unwrap().clone())
    }

    async fn create(&self, draft: BillDraft) -> Result<Bill, StoreError> {
        let id = Uuid::new_v4().to_string();
        let (file_url, file_name) = match &draft.attachment {
            Some(upload) => (
                Some(format!(
                    "https://localhost:3000/storage/{}/{}",
                    id, upload.file_name
                )),
                Some(upload.file_name.clone()),
            ),
            None => (None, None),
        };

        let bill = Bill {
            id,
            email: draft.email,
            expense_type: draft.expense_type,
            name: draft.name,
            amount: draft.amount,
            date: draft.date,
            vat: draft.vat,
            pct: draft.pct,
            commentary: draft.commentary,
            file_url,
            file_name,
            status: draft.status,
            comment_admin: None,
        };

        self.bills.lock().unwrap().push(bill.clone());
        Ok(bill)
    }

    async fn update(&self, bill: Bill) -> Result<Bill, StoreError> {
        let mut bills = self.bills.lock().unwrap();
        match bills.iter_mut().find(|stored| stored.id == bill.id) {
            Some(stored) => {
                *stored = bill.clone();
                Ok(bill)
            }
            None => Err(StoreError::Api(404)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::{AttachmentUpload, BillStatus, ExpenseType};

    fn sample_bill(id: &str) -> Bill {
        Bill {
            id: id.to_string(),
            email: "a@a".to_string(),
            expense_type: ExpenseType::HotelAndLodging,
            name: "encore".to_string(),
            amount: 400.0,
            date: "2004-04-04".to_string(),
            vat: Some(80.0),
            pct: 20,
            commentary: "séminaire billed".to_string(),
            file_url: None,
            file_name: None,
            status: BillStatus::Pending,
            comment_admin: None,
        }
    }

    #[tokio::test]
    async fn test_create_assigns_id_and_attachment_fields() {
        let store = MemoryStore::new();
        let draft = BillDraft {
            email: "employee@test.tld".to_string(),
            attachment: Some(AttachmentUpload {
                file_name: "preview.jpg".to_string(),
                content_type: "image/jpeg".to_string(),
                data: vec![0xff, 0xd8],
            }),
            ..Default::default()
        };

        let bill = store.bills().create(draft).await.unwrap();
        assert!(!bill.id.is_empty());
        assert_eq!(bill.file_name.as_deref(), Some("preview.jpg"));
        assert!(bill.file_url.as_deref().unwrap().ends_with("preview.jpg"));
        assert_eq!(store.snapshot().len(), 1);
    }

    #[tokio::test]
    async fn test_update_round_trips_the_payload() {
        let store = MemoryStore::with_bills(vec![sample_bill("47qAXb6fIm2zOKkLzMro")]);

        let mut updated = sample_bill("47qAXb6fIm2zOKkLzMro");
        updated.amount = 348.0;
        updated.comment_admin = Some("ok".to_string());

        let stored = store.bills().update(updated.clone()).await.unwrap();
        assert_eq!(stored, updated);
        assert_eq!(store.snapshot(), vec![updated]);
    }

    #[tokio::test]
    async fn test_update_unknown_id_rejects_with_404() {
        let store = MemoryStore::new();
        let err = store
            .bills()
            .update(sample_bill("missing"))
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "Erreur 404");
    }
}
