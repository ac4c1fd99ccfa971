//! Shared Tokio runtime helper for integration tests.

use std::cell::RefCell;
use std::io;
use std::rc::Rc;

use rstest_bdd::Slot;
use tokio::runtime::{Builder, Runtime};

/// Shared runtime wrapper that can be stored in an `rstest-bdd` Slot.
#[derive(Clone)]
pub struct SharedRuntime(Rc<RefCell<Runtime>>);

impl SharedRuntime {
    pub fn new(runtime: Runtime) -> Self {
        Self(Rc::new(RefCell::new(runtime)))
    }

    pub fn block_on<F: std::future::Future>(&self, future: F) -> F::Output {
        self.0.borrow().block_on(future)
    }
}

/// Ensures a current-thread Tokio runtime with a paused clock is initialised.
///
/// Paused time advances instantly whenever the runtime is idle, so
/// debounce windows elapse without real waiting.
///
/// # Errors
///
/// Returns an error if the Tokio runtime cannot be created or if the slot behaves unexpectedly.
pub fn ensure_paused_runtime(runtime: &Slot<SharedRuntime>) -> Result<SharedRuntime, io::Error> {
    if runtime.with_ref(|_| ()).is_none() {
        let built = Builder::new_current_thread()
            .enable_time()
            .start_paused(true)
            .build()?;
        runtime.set(SharedRuntime::new(built));
    }

    runtime
        .get()
        .ok_or_else(|| io::Error::other("runtime not initialised after set"))
}
