//! The core state engine shared by every screen view-model.
//!
//! Owns the current state, the inbound intent buffer and the outbound
//! view-event stream. A single dispatch loop drains intents in FIFO order
//! and hands each to the handlers registered in an [`IntentRouter`].

use std::future::Future;
use std::sync::Weak;

use parking_lot::Mutex;
use tokio::sync::{broadcast, mpsc, watch};
use tokio::task::JoinHandle;

use super::error::EngineError;
use super::event::{ViewEvent, ViewEventWrapper};
use super::intent::Intent;
use super::router::IntentRouter;
use super::state::UiState;
use super::store::StateStore;
use super::task_queue::AsyncTaskQueue;
use crate::shutdown::ShutdownHandle;

pub const DEFAULT_INTENT_BUFFER: usize = 64;
pub const DEFAULT_EVENT_BUFFER: usize = 64;

/// Channel sizing for a [`StateEngine`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngineSettings {
    /// Intents beyond this many pending ones are dropped.
    pub intent_buffer: usize,
    /// Events an observer may fall behind by before it starts skipping.
    pub event_buffer: usize,
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self {
            intent_buffer: DEFAULT_INTENT_BUFFER,
            event_buffer: DEFAULT_EVENT_BUFFER,
        }
    }
}

pub struct StateEngine<I: Intent, S: UiState, E: ViewEvent> {
    store: StateStore<S>,
    intents: mpsc::Sender<I>,
    intent_receiver: Mutex<Option<mpsc::Receiver<I>>>,
    events: broadcast::Sender<ViewEventWrapper<E>>,
    tasks: AsyncTaskQueue<S>,
    shutdown: ShutdownHandle,
}

impl<I: Intent, S: UiState, E: ViewEvent> StateEngine<I, S, E> {
    pub fn new(initial: S, settings: EngineSettings) -> Self {
        let store = StateStore::new(initial);
        let (intents, intent_receiver) = mpsc::channel(settings.intent_buffer.max(1));
        let (events, _) = broadcast::channel(settings.event_buffer.max(1));
        Self {
            tasks: AsyncTaskQueue::new(store.clone()),
            store,
            intents,
            intent_receiver: Mutex::new(Some(intent_receiver)),
            events,
            shutdown: ShutdownHandle::new(),
        }
    }

    /// Start the dispatch loop and the async task runner.
    ///
    /// The loop holds only a weak reference to `ctx`; once the view-model
    /// is gone the loop ends on its next intent.
    pub fn start<C>(&self, ctx: Weak<C>, router: IntentRouter<C, I>) -> Result<(), EngineError>
    where
        C: Send + Sync + 'static,
    {
        let receiver = self
            .intent_receiver
            .lock()
            .take()
            .ok_or(EngineError::AlreadyStarted)?;
        self.tasks.start(self.shutdown.clone())?;
        tokio::spawn(run_dispatch(receiver, ctx, router, self.shutdown.clone()));
        Ok(())
    }

    pub fn current_state(&self) -> S {
        self.store.current()
    }

    pub fn publish(&self, state: S) {
        self.store.publish(state);
    }

    pub fn subscribe_state(&self) -> watch::Receiver<S> {
        self.store.subscribe()
    }

    pub fn state_matches(&self, predicate: impl FnOnce(&S) -> bool) -> bool {
        self.store.matches(predicate)
    }

    /// Suspends until the state satisfies `predicate`.
    pub async fn await_state(&self, predicate: impl FnMut(&S) -> bool) -> Result<S, EngineError> {
        self.store.await_state(predicate).await
    }

    /// Queue an intent for dispatch without blocking.
    ///
    /// Returns false when the intent was dropped because the buffer is
    /// full or the engine has shut down.
    pub fn submit_intent(&self, intent: I) -> bool {
        match self.intents.try_send(intent) {
            Ok(()) => true,
            Err(mpsc::error::TrySendError::Full(intent)) => {
                tracing::warn!(kind = ?intent.kind(), "Intent buffer full, dropping intent");
                false
            }
            Err(mpsc::error::TrySendError::Closed(intent)) => {
                tracing::debug!(kind = ?intent.kind(), "Engine shut down, dropping intent");
                false
            }
        }
    }

    pub fn subscribe_events(&self) -> broadcast::Receiver<ViewEventWrapper<E>> {
        self.events.subscribe()
    }

    /// Publish a one-shot event. Returns false if nobody is observing.
    pub fn emit_event(&self, event: E) -> bool {
        self.send_wrapper(ViewEventWrapper::new(event)).is_some()
    }

    /// Publish a one-shot event and wait until an observer consumed it.
    ///
    /// Returns false without waiting when nobody is observing, and false if
    /// the engine shuts down first.
    pub async fn emit_event_and_await(&self, event: E) -> bool {
        let Some(wrapper) = self.send_wrapper(ViewEventWrapper::new(event)) else {
            return false;
        };
        tokio::select! {
            _ = wrapper.wait_for_consumption() => true,
            _ = self.shutdown.wait() => false,
        }
    }

    fn send_wrapper(&self, wrapper: ViewEventWrapper<E>) -> Option<ViewEventWrapper<E>> {
        match self.events.send(wrapper.clone()) {
            Ok(_) => Some(wrapper),
            Err(_) => {
                tracing::debug!(event = ?wrapper.peek(), "No event observers, event dropped");
                None
            }
        }
    }

    pub fn tasks(&self) -> &AsyncTaskQueue<S> {
        &self.tasks
    }

    /// Run `work` until it completes or the engine shuts down.
    pub fn launch<F>(&self, work: F) -> JoinHandle<()>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let shutdown = self.shutdown.clone();
        tokio::spawn(async move {
            tokio::select! {
                _ = shutdown.wait() => {}
                _ = work => {}
            }
        })
    }

    pub fn is_shut_down(&self) -> bool {
        self.shutdown.is_shutting_down()
    }

    /// Stop the dispatch loop, the task runner and launched work.
    pub fn shutdown(&self) {
        if self.shutdown.signal() {
            tracing::info!("State engine shutting down");
        }
    }
}

impl<I: Intent, S: UiState, E: ViewEvent> Drop for StateEngine<I, S, E> {
    fn drop(&mut self) {
        self.shutdown.signal();
    }
}

async fn run_dispatch<C, I>(
    mut receiver: mpsc::Receiver<I>,
    ctx: Weak<C>,
    router: IntentRouter<C, I>,
    shutdown: ShutdownHandle,
) where
    C: Send + Sync + 'static,
    I: Intent,
{
    loop {
        let intent = tokio::select! {
            _ = shutdown.wait() => break,
            intent = receiver.recv() => match intent {
                Some(intent) => intent,
                None => break,
            },
        };
        let Some(ctx) = ctx.upgrade() else {
            break;
        };
        tracing::debug!(kind = ?intent.kind(), "Dispatching intent");
        router.dispatch(&ctx, intent).await;
    }
    tracing::debug!("Intent dispatch loop stopped");
}
