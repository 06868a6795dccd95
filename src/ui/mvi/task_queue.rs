//! Sequential, cancelable queue of background jobs.
//!
//! At most one task runs at a time, in submission order. Each task carries
//! the state to restore if it gets cancelled before it finishes.

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use parking_lot::Mutex;
use tokio::runtime::Handle;
use tokio::sync::mpsc;
use tokio::task::{AbortHandle, JoinHandle};

use super::error::EngineError;
use super::state::UiState;
use super::store::StateStore;
use crate::shutdown::ShutdownHandle;

/// Boxed body of a queued task.
pub type TaskWork = Pin<Box<dyn Future<Output = ()> + Send>>;

/// Where a queued task's future is spawned.
#[derive(Debug, Clone, Default)]
pub enum ExecutionContext {
    /// The runtime the queue runner lives on.
    #[default]
    Current,
    /// A specific runtime, e.g. a dedicated worker runtime.
    Runtime(Handle),
}

impl ExecutionContext {
    fn spawn(&self, work: TaskWork) -> JoinHandle<()> {
        match self {
            ExecutionContext::Current => tokio::spawn(work),
            ExecutionContext::Runtime(handle) => handle.spawn(work),
        }
    }
}

/// A pending unit of background work.
pub struct AsyncTask<S> {
    pub context: ExecutionContext,
    /// State published if the task is cancelled while running.
    pub rollback_state: S,
    pub work: TaskWork,
}

struct ActiveTask<S> {
    id: u64,
    rollback_state: S,
    abort: AbortHandle,
}

pub struct AsyncTaskQueue<S> {
    sender: mpsc::UnboundedSender<AsyncTask<S>>,
    receiver: Mutex<Option<mpsc::UnboundedReceiver<AsyncTask<S>>>>,
    current: Arc<Mutex<Option<ActiveTask<S>>>>,
    store: StateStore<S>,
}

impl<S: UiState> AsyncTaskQueue<S> {
    pub fn new(store: StateStore<S>) -> Self {
        let (sender, receiver) = mpsc::unbounded_channel();
        Self {
            sender,
            receiver: Mutex::new(Some(receiver)),
            current: Arc::new(Mutex::new(None)),
            store,
        }
    }

    /// Queue `work`, rolling back to the state current at this call.
    pub fn enqueue<F>(&self, context: ExecutionContext, work: F) -> Result<(), EngineError>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        self.enqueue_with_rollback(context, self.store.current(), work)
    }

    pub fn enqueue_with_rollback<F>(
        &self,
        context: ExecutionContext,
        rollback_state: S,
        work: F,
    ) -> Result<(), EngineError>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        self.sender
            .send(AsyncTask {
                context,
                rollback_state,
                work: Box::pin(work),
            })
            .map_err(|_| EngineError::ShutDown)
    }

    /// Whether a task is currently running.
    pub fn is_busy(&self) -> bool {
        self.current.lock().is_some()
    }

    /// Cancel the running task and publish its rollback state.
    ///
    /// No-op when nothing is running. Returns whether a task was cancelled.
    pub fn cancel_active_and_restore(&self) -> bool {
        let mut current = self.current.lock();
        let Some(active) = current.take() else {
            return false;
        };
        active.abort.abort();
        self.store.publish(active.rollback_state);
        tracing::debug!(task = active.id, "Cancelled async task and restored state");
        true
    }

    /// Spawn the runner loop. Only the first call has any effect.
    pub fn start(&self, shutdown: ShutdownHandle) -> Result<(), EngineError> {
        let receiver = self
            .receiver
            .lock()
            .take()
            .ok_or(EngineError::AlreadyStarted)?;
        tokio::spawn(run_queue(receiver, Arc::clone(&self.current), shutdown));
        Ok(())
    }
}

async fn run_queue<S: UiState>(
    mut receiver: mpsc::UnboundedReceiver<AsyncTask<S>>,
    current: Arc<Mutex<Option<ActiveTask<S>>>>,
    shutdown: ShutdownHandle,
) {
    let mut next_id: u64 = 0;
    loop {
        let task = tokio::select! {
            _ = shutdown.wait() => break,
            task = receiver.recv() => match task {
                Some(task) => task,
                None => break,
            },
        };

        next_id += 1;
        let id = next_id;
        let mut handle = task.context.spawn(task.work);
        *current.lock() = Some(ActiveTask {
            id,
            rollback_state: task.rollback_state,
            abort: handle.abort_handle(),
        });

        let outcome = tokio::select! {
            _ = shutdown.wait() => {
                handle.abort();
                break;
            }
            outcome = &mut handle => outcome,
        };

        match outcome {
            Ok(()) => tracing::trace!(task = id, "Async task completed"),
            Err(err) if err.is_cancelled() => tracing::debug!(task = id, "Async task cancelled"),
            Err(_) => tracing::warn!(task = id, "Async task panicked"),
        }

        let mut active = current.lock();
        if active.as_ref().is_some_and(|task| task.id == id) {
            *active = None;
        }
    }
    tracing::debug!("Async task queue stopped");
}
