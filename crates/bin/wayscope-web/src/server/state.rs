use std::path::Path;
use std::sync::{Arc, Mutex};

use wayscope_input::catalog::DatasetCatalog;
use wayscope_input::index::ScenarioIndex;
use wayscope_input::session::DatasetSession;

/// Shared server state. The active session lives in a single guarded slot
/// and is replaced wholesale on load; handlers clone the `Arc` out and
/// serialize outside the lock.
#[derive(Clone)]
pub struct AppState {
    pub catalog: Arc<DatasetCatalog>,
    pub index: ScenarioIndex,
    session: Arc<Mutex<Option<Arc<DatasetSession>>>>,
    pub scenario_cap: usize,
}

impl AppState {
    pub fn new(catalog: DatasetCatalog, scenario_cap: usize) -> Self {
        Self {
            catalog: Arc::new(catalog),
            index: ScenarioIndex::new(),
            session: Arc::new(Mutex::new(None)),
            scenario_cap,
        }
    }

    pub fn current_session(&self) -> Option<Arc<DatasetSession>> {
        self.session.lock().expect("session lock poisoned").clone()
    }

    pub fn replace_session(&self, session: Arc<DatasetSession>) {
        *self.session.lock().expect("session lock poisoned") = Some(session);
    }

    /// The session for `path` if it is already the active one.
    pub fn session_for(&self, path: &Path) -> Option<Arc<DatasetSession>> {
        self.current_session().filter(|session| session.path() == path)
    }
}
