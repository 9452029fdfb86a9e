use std::sync::Arc;

use lm_core::WizardState;
use tokio::sync::Mutex;

/// Shared wizard context containing state and dispatch lock.
///
/// ## Lock Ordering
/// When acquiring both locks, acquire `dispatch_lock` first, then `state`.
/// - `dispatch_lock`: Used only for `dispatch` operations to serialize concurrent calls.
/// - `state`: Used for both reading (`get_state`) and writing (during `dispatch`).
#[derive(Clone)]
pub struct WizardContext {
    /// Current wizard state.
    state: Arc<Mutex<WizardState>>,
    /// Serializes dispatch calls so every transition starts from the result of
    /// the previous one.
    dispatch_lock: Arc<Mutex<()>>,
}

impl WizardContext {
    /// Creates a new WizardContext with the given initial state.
    pub fn new(initial_state: WizardState) -> Self {
        Self {
            state: Arc::new(Mutex::new(initial_state)),
            dispatch_lock: Arc::new(Mutex::new(())),
        }
    }

    /// Returns the context wrapped in Arc for shared ownership.
    pub fn arc(self) -> Arc<Self> {
        Arc::new(self)
    }

    /// Returns a copy of the current state.
    ///
    /// This is a lightweight read operation that does NOT acquire `dispatch_lock`.
    pub async fn get_state(&self) -> WizardState {
        self.state.lock().await.clone()
    }

    /// Acquires the dispatch lock.
    ///
    /// Returns a guard that releases the lock when dropped.
    pub async fn acquire_dispatch_lock(&self) -> tokio::sync::MutexGuard<'_, ()> {
        self.dispatch_lock.lock().await
    }

    /// Updates the state to the given value.
    ///
    /// This should only be called after acquiring `dispatch_lock`.
    pub async fn set_state(&self, state: WizardState) {
        let mut guard = self.state.lock().await;
        *guard = state;
    }
}

impl Default for WizardContext {
    /// Fresh flow: step 0, everything empty.
    fn default() -> Self {
        Self::new(WizardState::default())
    }
}
