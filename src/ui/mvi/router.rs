//! Intent routing table.
//!
//! Maps an intent's [`Intent::Kind`] to the handlers a view-model
//! registered for it. Registration happens once, when the view-model is
//! built; dispatch never inspects types at runtime beyond the kind tag.

use std::collections::HashMap;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use super::intent::Intent;

/// Future returned by a registered handler.
pub type HandlerFuture = Pin<Box<dyn Future<Output = anyhow::Result<()>> + Send>>;

/// A registered handler: receives the view-model and the intent.
pub type Handler<C, I> = Arc<dyn Fn(Arc<C>, I) -> HandlerFuture + Send + Sync>;

/// Ordered handler lists keyed by intent kind.
pub struct IntentRouter<C, I: Intent> {
    routes: HashMap<I::Kind, Vec<Handler<C, I>>>,
}

impl<C, I> IntentRouter<C, I>
where
    C: Send + Sync + 'static,
    I: Intent,
{
    pub fn new() -> Self {
        Self {
            routes: HashMap::new(),
        }
    }

    /// Register `handler` for every intent of `kind`.
    ///
    /// Handlers for the same kind run in registration order.
    pub fn route<F, Fut>(mut self, kind: I::Kind, handler: F) -> Self
    where
        F: Fn(Arc<C>, I) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = anyhow::Result<()>> + Send + 'static,
    {
        let boxed: Handler<C, I> =
            Arc::new(move |ctx, intent| Box::pin(handler(ctx, intent)) as HandlerFuture);
        self.routes.entry(kind).or_default().push(boxed);
        self
    }

    /// Handlers registered for `kind`, in registration order.
    ///
    /// Unregistered kinds yield an empty slice.
    pub fn handlers(&self, kind: I::Kind) -> &[Handler<C, I>] {
        self.routes.get(&kind).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn is_routed(&self, kind: I::Kind) -> bool {
        !self.handlers(kind).is_empty()
    }

    /// Runs every handler registered for the intent, one after the other.
    ///
    /// Each handler runs on its own task so an error or a panic ends only
    /// that handler. Returns how many handlers completed successfully.
    pub async fn dispatch(&self, ctx: &Arc<C>, intent: I) -> usize {
        let kind = intent.kind();
        let handlers = self.handlers(kind);
        if handlers.is_empty() {
            tracing::trace!(?kind, "No handler registered, intent ignored");
            return 0;
        }

        let mut succeeded = 0;
        for (index, handler) in handlers.iter().enumerate() {
            let run = handler(Arc::clone(ctx), intent.clone());
            match tokio::spawn(run).await {
                Ok(Ok(())) => succeeded += 1,
                Ok(Err(err)) => {
                    tracing::warn!(?kind, handler = index, error = %format!("{err:#}"), "Intent handler failed");
                }
                Err(join_err) if join_err.is_panic() => {
                    tracing::error!(?kind, handler = index, "Intent handler panicked");
                }
                Err(join_err) => {
                    tracing::warn!(?kind, handler = index, error = %join_err, "Intent handler cancelled");
                }
            }
        }
        succeeded
    }
}

impl<C, I> Default for IntentRouter<C, I>
where
    C: Send + Sync + 'static,
    I: Intent,
{
    fn default() -> Self {
        Self::new()
    }
}
