//! REST client for the bills API.
//!
//! Create posts a multipart form (`bill` JSON part plus the optional
//! `file` part) because attachments travel with the draft; update is plain
//! JSON. Non-success statuses map to [`StoreError::Api`] so callers see
//! the service's `Erreur {status}` convention.

use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use shared::{Bill, BillDraft};

use super::{BillsCollection, RemoteStore, StoreError};

/// HTTP store client for the expense backend
#[derive(Clone)]
pub struct RestStore {
    base_url: String,
    client: reqwest::Client,
}

impl RestStore {
    /// Create a client against the default local backend
    pub fn new() -> Self {
        Self::with_base_url("http://localhost:3000".to_string())
    }

    /// Create a client with a custom base URL
    pub fn with_base_url(base_url: String) -> Self {
        Self {
            base_url,
            client: reqwest::Client::new(),
        }
    }
}

impl Default for RestStore {
    fn default() -> Self {
        Self::new()
    }
}

impl RemoteStore for RestStore {
    type Bills = RestBills;

    fn bills(&self) -> RestBills {
        RestBills {
            base_url: self.base_url.clone(),
            client: self.client.clone(),
        }
    }
}

pub struct RestBills {
    base_url: String,
    client: reqwest::Client,
}

impl RestBills {
    fn check_status(response: reqwest::Response) -> Result<reqwest::Response, StoreError> {
        if response.status().is_success() {
            Ok(response)
        } else {
            Err(StoreError::Api(response.status().as_u16()))
        }
    }
}

#[async_trait]
impl BillsCollection for RestBills {
    async fn list(&self) -> Result<Vec<Bill>, StoreError> {
        let url = format!("{}/api/bills", self.base_url);
        let response = Self::check_status(self.client.get(&url).send().await?)?;
        Ok(response.json::<Vec<Bill>>().await?)
    }

    async fn create(&self, draft: BillDraft) -> Result<Bill, StoreError> {
        let url = format!("{}/api/bills", self.base_url);

        let mut form = Form::new().text("bill", serde_json::to_string(&draft)?);
        if let Some(upload) = draft.attachment {
            let part = Part::bytes(upload.data)
                .file_name(upload.file_name)
                .mime_str(&upload.content_type)?;
            form = form.part("file", part);
        }

        let response =
            Self::check_status(self.client.post(&url).multipart(form).send().await?)?;
        Ok(response.json::<Bill>().await?)
    }

    async fn update(&self, bill: Bill) -> Result<Bill, StoreError> {
        let url = format!("{}/api/bills/{}", self.base_url, bill.id);
        let response =
            Self::check_status(self.client.put(&url).json(&bill).send().await?)?;
        Ok(response.json::<Bill>().await?)
    }
}
