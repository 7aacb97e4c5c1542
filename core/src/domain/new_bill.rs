//! # New Bill Submission
//!
//! Manages the bill-creation form: validates the selected justification
//! file before anything is uploaded, assembles a bill from the form
//! fields, and submits it to the remote store — update when the upload
//! already created a draft on the store, create otherwise.

use std::sync::Arc;

use shared::{
    AttachmentPolicy, AttachmentUpload, Bill, BillDraft, BillStatus, ExpenseType, SessionUser,
};
use tracing::{info, warn};

use crate::domain::BillError;
use crate::navigation::{Navigator, Route};
use crate::session::{load_session_user, SessionError, SessionStorage};
use crate::storage::{BillsCollection, RemoteStore};

/// Stages of the attachment validation flow
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttachmentStage {
    NoFile,
    Validating,
    Accepted,
    Rejected,
}

/// Whether the draft already exists on the store.
///
/// The upload step creates a server-side draft, so a successful upload
/// switches the form from create to update. Modeled explicitly instead of
/// sniffing an optional id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DraftRef {
    Draft,
    Existing(String),
}

/// A file-selection event from the file input.
///
/// Only the name's extension is authoritative for validation; the name
/// may be a browser fake path.
#[derive(Debug, Clone)]
pub struct FileSelectionEvent {
    pub file_name: String,
    pub content_type: String,
    pub data: Vec<u8>,
}

/// A form-submission event carrying the raw field values
#[derive(Debug, Clone, Default)]
pub struct BillFormEvent {
    pub expense_type: String,
    pub name: String,
    pub amount: String,
    pub date: String,
    pub vat: String,
    pub pct: String,
    pub commentary: String,
}

/// State for managing the bill-creation form
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BillFormState {
    /// Name of the currently selected file, cleared on rejection
    pub selected_file: Option<String>,
    pub error_message: Option<String>,
    pub is_submitting: bool,
}

/// Outcome of a submit attempt
#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome {
    /// The bill was persisted and the user sent back to the bills view
    Saved(Bill),
    /// Submission is still gated on a valid attachment; nothing was sent
    Blocked,
}

/// New-bill form component
pub struct NewBillSubmission<S: RemoteStore> {
    store: S,
    user: SessionUser,
    navigator: Arc<dyn Navigator>,
    policy: AttachmentPolicy,
    /// Form state, rendered by the view layer
    pub form: BillFormState,
    stage: AttachmentStage,
    draft: DraftRef,
    file_url: Option<String>,
    file_name: Option<String>,
}

impl<S: RemoteStore> NewBillSubmission<S> {
    /// Build the component with the default attachment policy, reading
    /// the logged-in user from session storage up front.
    pub fn new(
        store: S,
        session: &dyn SessionStorage,
        navigator: Arc<dyn Navigator>,
    ) -> Result<Self, SessionError> {
        Self::with_policy(store, session, navigator, AttachmentPolicy::default())
    }

    pub fn with_policy(
        store: S,
        session: &dyn SessionStorage,
        navigator: Arc<dyn Navigator>,
        policy: AttachmentPolicy,
    ) -> Result<Self, SessionError> {
        let user = load_session_user(session)?;
        Ok(Self {
            store,
            user,
            navigator,
            policy,
            form: BillFormState::default(),
            stage: AttachmentStage::NoFile,
            draft: DraftRef::Draft,
            file_url: None,
            file_name: None,
        })
    }

    /// Whether the selected attachment passed validation; submission is
    /// gated on this.
    pub fn is_format_valid(&self) -> bool {
        self.stage == AttachmentStage::Accepted
    }

    pub fn attachment_stage(&self) -> AttachmentStage {
        self.stage
    }

    pub fn draft_ref(&self) -> &DraftRef {
        &self.draft
    }

    /// Handle a file selection.
    ///
    /// A file with an unsupported extension is rejected locally: the
    /// selection is cleared, a French error lands on the form, no upload
    /// happens and the result is still `Ok` — validation never becomes an
    /// error value. An accepted file uploads immediately; the store
    /// answers with the draft's id and the stored file's URL and name. An
    /// upload rejection propagates while the attachment stays accepted,
    /// so a later submit falls back to the create path.
    pub async fn handle_change_file(
        &mut self,
        event: FileSelectionEvent,
    ) -> Result<(), BillError> {
        self.stage = AttachmentStage::Validating;

        if let Err(rejected) = self.policy.validate(&event.file_name) {
            warn!(%rejected, "attachment rejected");
            self.stage = AttachmentStage::Rejected;
            self.form.selected_file = None;
            self.form.error_message = Some(
                "Seuls les justificatifs au format jpg, jpeg ou png sont acceptés".to_string(),
            );
            return Ok(());
        }

        self.stage = AttachmentStage::Accepted;
        self.form.selected_file = Some(event.file_name.clone());
        self.form.error_message = None;

        // Upload right away: the store creates a draft bill carrying the
        // stored file, and the submit step updates it with the fields.
        let draft = BillDraft {
            email: self.user.email.clone(),
            attachment: Some(AttachmentUpload {
                file_name: event.file_name,
                content_type: event.content_type,
                data: event.data,
            }),
            ..Default::default()
        };

        let stored = self
            .store
            .bills()
            .create(draft)
            .await
            .map_err(BillError::Write)?;

        info!(id = %stored.id, "attachment uploaded");
        self.file_url = stored.file_url;
        self.file_name = stored.file_name;
        self.draft = DraftRef::Existing(stored.id);
        Ok(())
    }

    /// Handle the form submission.
    ///
    /// Blocked until a valid attachment was chosen. Builds the bill from
    /// the raw form fields, stamps `pending` and the session email, then
    /// updates the store-side draft when the upload created one, or
    /// creates the bill otherwise. Navigates back to the bills view only
    /// on success; a store rejection propagates with its message intact.
    ///
    /// Not reentrant: callers serialize invocations, `is_submitting`
    /// mirrors the in-flight window.
    pub async fn handle_submit(
        &mut self,
        event: BillFormEvent,
    ) -> Result<SubmitOutcome, BillError> {
        if !self.is_format_valid() {
            self.form.error_message = Some(
                "Veuillez joindre un justificatif au format jpg, jpeg ou png".to_string(),
            );
            return Ok(SubmitOutcome::Blocked);
        }

        self.form.is_submitting = true;

        let amount = event.amount.trim().parse::<f64>().unwrap_or(0.0);
        let pct = event.pct.trim().parse::<u32>().unwrap_or(20);
        let vat = event.vat.trim().parse::<f64>().ok();
        let expense_type = ExpenseType::from(event.expense_type);

        let result = match self.draft.clone() {
            DraftRef::Existing(id) => {
                let bill = Bill {
                    id,
                    email: self.user.email.clone(),
                    expense_type,
                    name: event.name,
                    amount,
                    date: event.date,
                    vat,
                    pct,
                    commentary: event.commentary,
                    file_url: self.file_url.clone(),
                    file_name: self.file_name.clone(),
                    status: BillStatus::Pending,
                    comment_admin: None,
                };
                self.store.bills().update(bill).await
            }
            DraftRef::Draft => {
                let draft = BillDraft {
                    email: self.user.email.clone(),
                    expense_type,
                    name: event.name,
                    amount,
                    date: event.date,
                    vat,
                    pct,
                    commentary: event.commentary,
                    status: BillStatus::Pending,
                    attachment: None,
                };
                self.store.bills().create(draft).await
            }
        };

        self.form.is_submitting = false;

        match result {
            Ok(bill) => {
                info!(id = %bill.id, "bill submitted");
                self.navigator.navigate(Route::Bills);
                Ok(SubmitOutcome::Saved(bill))
            }
            Err(err) => Err(BillError::Write(err)),
        }
    }
}
