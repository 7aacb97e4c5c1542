//! # Expense Tracker Core
//!
//! Domain logic for the expense-report tool: listing and chronologically
//! ordering an employee's bills, and validating/submitting a new bill with
//! its justification attachment. The surrounding view layer owns rendering
//! and real browser navigation; it talks to this crate through the
//! `RemoteStore`, `SessionStorage` and `Navigator` seams.

pub mod domain;
pub mod navigation;
pub mod session;
pub mod storage;

pub use domain::bills_list::{AttachmentPreview, BillsList, PreviewTrigger};
pub use domain::new_bill::{
    AttachmentStage, BillFormEvent, BillFormState, DraftRef, FileSelectionEvent,
    NewBillSubmission, SubmitOutcome,
};
pub use domain::BillError;
pub use navigation::{Navigator, RecordingNavigator, Route};
pub use session::{load_session_user, MemorySessionStorage, SessionError, SessionStorage};
pub use storage::{BillsCollection, MemoryStore, RemoteStore, RestStore, StoreError};
