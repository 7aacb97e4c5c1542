//! # Bills List
//!
//! Fetches the current user's bills from the remote store, orders them
//! most recent first and maps them into view models. Also owns the
//! attachment preview modal and the navigation to the bill-creation view.

use std::cmp::Ordering;
use std::sync::Arc;

use chrono::NaiveDate;
use shared::{Bill, FormattedBill, SessionUser};
use tracing::{info, warn};

use crate::domain::formatting;
use crate::domain::BillError;
use crate::navigation::{Navigator, Route};
use crate::session::{load_session_user, SessionError, SessionStorage};
use crate::storage::{BillsCollection, RemoteStore};

/// State of the justification preview modal.
///
/// A bill without a stored file still opens the modal, in placeholder
/// state, so the eye icon never throws.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AttachmentPreview {
    pub is_open: bool,
    pub file_url: Option<String>,
}

impl AttachmentPreview {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn open(&mut self, file_url: Option<String>) {
        self.is_open = true;
        self.file_url = file_url;
    }

    pub fn close(&mut self) {
        self.is_open = false;
        self.file_url = None;
    }
}

/// The eye-icon element of one table row, carrying that bill's file URL
#[derive(Debug, Clone)]
pub struct PreviewTrigger {
    pub file_url: Option<String>,
}

/// Bills list component
pub struct BillsList<S: RemoteStore> {
    store: S,
    user: SessionUser,
    navigator: Arc<dyn Navigator>,
    /// Preview modal state, rendered by the view layer
    pub preview: AttachmentPreview,
}

impl<S: RemoteStore> BillsList<S> {
    /// Build the component, reading the logged-in user from session
    /// storage up front.
    pub fn new(
        store: S,
        session: &dyn SessionStorage,
        navigator: Arc<dyn Navigator>,
    ) -> Result<Self, SessionError> {
        let user = load_session_user(session)?;
        Ok(Self {
            store,
            user,
            navigator,
            preview: AttachmentPreview::new(),
        })
    }

    /// Fetch all bills and return them fully sorted, most recent first.
    ///
    /// The sort is stable so bills sharing a date keep their fetch order.
    /// A record whose date does not parse is logged and ordered after
    /// every datable record; its raw date string is used for display. A
    /// store failure propagates untouched — the view renders the banner.
    pub async fn get_bills(&self) -> Result<Vec<FormattedBill>, BillError> {
        info!(email = %self.user.email, "loading bills");
        let bills = self
            .store
            .bills()
            .list()
            .await
            .map_err(BillError::Fetch)?;

        let mut entries: Vec<(Option<NaiveDate>, Bill)> = bills
            .into_iter()
            .map(|bill| {
                let sort_key = NaiveDate::parse_from_str(&bill.date, "%Y-%m-%d").ok();
                if sort_key.is_none() {
                    warn!(id = %bill.id, date = %bill.date, "bill date failed to parse, displaying raw");
                }
                (sort_key, bill)
            })
            .collect();

        // Stable: equal dates and undatable records keep fetch order
        entries.sort_by(|a, b| match (a.0, b.0) {
            (Some(left), Some(right)) => right.cmp(&left),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        });

        Ok(entries
            .into_iter()
            .map(|(_, bill)| Self::to_formatted(bill))
            .collect())
    }

    fn to_formatted(bill: Bill) -> FormattedBill {
        FormattedBill {
            id: bill.id,
            expense_type: bill.expense_type,
            name: bill.name,
            formatted_date: formatting::format_date_for_display(&bill.date),
            date: bill.date,
            amount: bill.amount,
            formatted_amount: formatting::format_amount(bill.amount),
            status: bill.status,
            formatted_status: formatting::format_status(bill.status),
            file_url: bill.file_url,
            file_name: bill.file_name,
        }
    }

    /// Navigate to the bill-creation view. Repeated calls just
    /// re-navigate.
    pub fn handle_click_new_bill(&self) {
        self.navigator.navigate(Route::NewBill);
    }

    /// Open the preview modal for one bill's justification file
    pub fn handle_click_icon_eye(&mut self, trigger: &PreviewTrigger) {
        self.preview.open(trigger.file_url.clone());
    }
}
