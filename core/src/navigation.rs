//! Navigation seam.
//!
//! The real router lives in the view layer and rewrites the browser
//! location; the components only ever ask for a [`Route`]. Tests plug in
//! a [`RecordingNavigator`] to observe where a handler went.

use std::sync::Mutex;

/// Views reachable from the expense components
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Login,
    Bills,
    NewBill,
    Dashboard,
}

impl Route {
    /// Path segment after the `#` in the browser location
    pub fn path(&self) -> &'static str {
        match self {
            Route::Login => "",
            Route::Bills => "employee/bills",
            Route::NewBill => "employee/bill/new",
            Route::Dashboard => "admin/dashboard",
        }
    }

    /// Full hash fragment, e.g. `#employee/bill/new`
    pub fn hash(&self) -> String {
        format!("#{}", self.path())
    }
}

/// Trait the view layer implements to perform the actual navigation
pub trait Navigator: Send + Sync {
    fn navigate(&self, route: Route);
}

/// Navigator that records every navigation instead of performing one
#[derive(Default)]
pub struct RecordingNavigator {
    visited: Mutex<Vec<Route>>,
}

impl RecordingNavigator {
    pub fn new() -> Self {
        Self::default()
    }

    /// All routes navigated to, in order
    pub fn visited(&self) -> Vec<Route> {
        self.visited.lock().unwrap().clone()
    }

    /// The most recent navigation, if any happened
    pub fn last(&self) -> Option<Route> {
        self.visited.lock().unwrap().last().copied()
    }
}

impl Navigator for RecordingNavigator {
    fn navigate(&self, route: Route) {
        self.visited.lock().unwrap().push(route);
    }
}
