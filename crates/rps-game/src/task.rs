use std::future::Future;
use tokio::task::JoinHandle;

/// A recurring local task that can be stopped.
///
/// Stopping is idempotent and also happens on drop. A stopped task is never
/// polled again, so no further tick fires.
#[derive(Debug)]
pub struct TaskHandle {
    handle: Option<JoinHandle<()>>,
}

impl TaskHandle {
    /// Spawn `future` on the current [`LocalSet`](tokio::task::LocalSet).
    ///
    /// # Panics
    ///
    /// Panics if called outside a `LocalSet`, like `tokio::task::spawn_local`.
    pub fn spawn_local<F>(future: F) -> Self
    where
        F: Future<Output = ()> + 'static,
    {
        Self {
            handle: Some(tokio::task::spawn_local(future)),
        }
    }

    pub fn stop(&mut self) {
        if let Some(handle) = self.handle.take() {
            handle.abort();
        }
    }

    /// `true` after [`TaskHandle::stop`] or once the task ran to completion.
    pub fn is_stopped(&self) -> bool {
        self.handle
            .as_ref()
            .is_none_or(|handle| handle.is_finished())
    }
}

impl Drop for TaskHandle {
    fn drop(&mut self) {
        self.stop();
    }
}
