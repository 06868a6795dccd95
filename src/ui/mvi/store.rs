//! Single-slot "latest value" state holder.

use std::sync::Arc;

use tokio::sync::watch;

use super::error::EngineError;
use super::state::UiState;

/// Owner of the current UI state.
///
/// Backed by a watch channel: every subscriber sees the latest value,
/// slow subscribers coalesce to it. Clones share the same slot.
#[derive(Debug, Clone)]
pub struct StateStore<S> {
    sender: Arc<watch::Sender<S>>,
}

impl<S: UiState> StateStore<S> {
    pub fn new(initial: S) -> Self {
        let (sender, _) = watch::channel(initial);
        Self {
            sender: Arc::new(sender),
        }
    }

    pub fn current(&self) -> S {
        self.sender.borrow().clone()
    }

    /// Replace the current state wholesale.
    pub fn publish(&self, state: S) {
        self.sender.send_replace(state);
    }

    pub fn subscribe(&self) -> watch::Receiver<S> {
        self.sender.subscribe()
    }

    /// Whether the current state satisfies `predicate`.
    pub fn matches(&self, predicate: impl FnOnce(&S) -> bool) -> bool {
        predicate(&self.sender.borrow())
    }

    /// Suspends until the current state satisfies `predicate`, then returns it.
    pub async fn await_state(
        &self,
        mut predicate: impl FnMut(&S) -> bool,
    ) -> Result<S, EngineError> {
        let mut receiver = self.subscribe();
        let state = receiver
            .wait_for(|state| predicate(state))
            .await
            .map_err(|_| EngineError::ShutDown)?;
        Ok(state.clone())
    }
}
