//! Base trait for intents (user/system actions) in MVI architecture.

use std::fmt::Debug;
use std::hash::Hash;

/// An intent object routed to view-model handlers.
///
/// Intents represent:
/// - User actions (taps, swipes, typed queries)
/// - Lifecycle events (screen created, resumed)
/// - System requests (refresh the installed app list)
///
/// Every intent reports a fieldless [`Intent::Kind`] tag. The tag is the
/// routing key: handlers are registered per kind, not per value.
pub trait Intent: Debug + Clone + Send + Sync + 'static {
    /// Fieldless tag identifying the variant of an intent.
    type Kind: Copy + Eq + Hash + Debug + Send + Sync + 'static;

    /// Runtime variant of this intent.
    fn kind(&self) -> Self::Kind;
}
