//! Domain components of the expense tool: the bills list and the new-bill
//! submission form.

use thiserror::Error;

use crate::storage::StoreError;

pub mod bills_list;
pub mod formatting;
pub mod new_bill;

pub use bills_list::BillsList;
pub use new_bill::NewBillSubmission;

/// Error surfaced by a bill component to its caller.
///
/// Transparent over the store error so the store's message (`Erreur 404`,
/// `Erreur 500`, ...) reaches the error banner verbatim. The surrounding
/// view renders it; the components never swallow it.
#[derive(Debug, Error)]
pub enum BillError {
    /// Listing bills failed
    #[error(transparent)]
    Fetch(StoreError),
    /// Creating or updating a bill failed
    #[error(transparent)]
    Write(StoreError),
}
