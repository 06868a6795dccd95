//! Presentation-side consumption of view events.

use tokio::sync::broadcast;
use tokio::sync::broadcast::error::RecvError;

use super::event::{AppViewEvent, ViewEvent, ViewEventWrapper};
use crate::shutdown::ShutdownHandle;

/// Reacts to view events on behalf of a screen.
pub trait ViewEventHandler<E> {
    /// Events shared by all screens (toasts, activity starts, results).
    fn on_app_event(&mut self, event: &AppViewEvent);

    /// Screen-specific events.
    fn on_view_event(&mut self, event: &E);
}

/// Drains an event subscription, consuming each wrapper at most once.
pub struct EventCollector<E> {
    receiver: broadcast::Receiver<ViewEventWrapper<E>>,
}

impl<E: ViewEvent> EventCollector<E> {
    pub fn new(receiver: broadcast::Receiver<ViewEventWrapper<E>>) -> Self {
        Self { receiver }
    }

    /// Wait for the next event and hand it to `handler` if still unconsumed.
    ///
    /// Returns `None` once the event stream is closed. Lagged events are
    /// skipped with a warning.
    pub async fn next<H: ViewEventHandler<E>>(&mut self, handler: &mut H) -> Option<bool> {
        loop {
            match self.receiver.recv().await {
                Ok(wrapper) => {
                    let consumed = wrapper
                        .consume_if_not_handled(|event| {
                            match event.as_app_event() {
                                Some(app_event) => handler.on_app_event(app_event),
                                None => handler.on_view_event(event),
                            }
                            std::future::ready(())
                        })
                        .await;
                    return Some(consumed);
                }
                Err(RecvError::Lagged(skipped)) => {
                    tracing::warn!(skipped, "Event observer lagged, events skipped");
                }
                Err(RecvError::Closed) => return None,
            }
        }
    }

    /// Consume events until the stream closes or `shutdown` is signaled.
    pub async fn run<H: ViewEventHandler<E>>(mut self, handler: &mut H, shutdown: ShutdownHandle) {
        loop {
            tokio::select! {
                _ = shutdown.wait() => break,
                next = self.next(handler) => {
                    if next.is_none() {
                        break;
                    }
                }
            }
        }
    }
}
