//! One-shot view events and their exactly-once delivery envelope.

use std::fmt::Debug;
use std::future::Future;
use std::sync::Arc;

use tokio::sync::{watch, Mutex};

use crate::platform::LaunchDescriptor;

/// A one-shot side effect requested by a view-model.
///
/// Unlike [`UiState`](super::UiState), an event is not re-observable:
/// every instance travels inside a [`ViewEventWrapper`] and is acted on
/// at most once.
pub trait ViewEvent: Debug + Clone + Send + Sync + 'static {
    /// The screen-independent part of this event, if it is one.
    ///
    /// Collectors route these to [`ViewEventHandler::on_app_event`] so
    /// every screen gets toasts and activity starts for free.
    fn as_app_event(&self) -> Option<&AppViewEvent> {
        None
    }
}

/// Events every screen can emit.
#[derive(Debug, Clone, PartialEq)]
pub enum AppViewEvent {
    /// Show a short user-facing message.
    PopupToastMessage(String),
    /// Start whatever the descriptor points at.
    StartActivity(LaunchDescriptor),
    /// Finish the screen with a result code.
    SetResult {
        code: i32,
        descriptor: Option<LaunchDescriptor>,
    },
}

impl ViewEvent for AppViewEvent {
    fn as_app_event(&self) -> Option<&AppViewEvent> {
        Some(self)
    }
}

/// Envelope guaranteeing at-most-one consumption of an event.
///
/// Clones share the same consumption flag, so the wrapper can be fanned
/// out to any number of observers and only the first one to call
/// [`consume_if_not_handled`](Self::consume_if_not_handled) wins.
#[derive(Debug, Clone)]
pub struct ViewEventWrapper<E> {
    inner: Arc<WrapperInner<E>>,
}

#[derive(Debug)]
struct WrapperInner<E> {
    content: E,
    consume_lock: Mutex<()>,
    handled: watch::Sender<bool>,
}

impl<E> ViewEventWrapper<E> {
    pub fn new(content: E) -> Self {
        let (handled, _) = watch::channel(false);
        Self {
            inner: Arc::new(WrapperInner {
                content,
                consume_lock: Mutex::new(()),
                handled,
            }),
        }
    }

    /// Runs `handle` if nobody consumed this event yet.
    ///
    /// The handler runs under the wrapper's lock and the event is marked
    /// consumed once it returns. Returns whether the handler ran.
    pub async fn consume_if_not_handled<'a, F, Fut>(&'a self, handle: F) -> bool
    where
        F: FnOnce(&'a E) -> Fut,
        Fut: Future<Output = ()> + 'a,
    {
        let _guard = self.inner.consume_lock.lock().await;
        if *self.inner.handled.borrow() {
            return false;
        }
        handle(&self.inner.content).await;
        self.inner.handled.send_replace(true);
        true
    }

    pub fn is_handled(&self) -> bool {
        *self.inner.handled.borrow()
    }

    /// Suspends until some observer consumed the event.
    pub async fn wait_for_consumption(&self) {
        let mut handled = self.inner.handled.subscribe();
        // The sender lives as long as `self`, so this cannot observe a closed channel.
        let _ = handled.wait_for(|done| *done).await;
    }

    /// Borrow the payload without consuming it.
    pub fn peek(&self) -> &E {
        &self.inner.content
    }
}
