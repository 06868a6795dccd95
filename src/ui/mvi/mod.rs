//! Model-View-Intent (MVI) architecture primitives.
//!
//! This module provides the pieces every screen view-model is built from:
//! marker traits, a routing table for intents, a sequential task queue and
//! the engine that ties them to a state stream and an event stream.
//!
//! # Architecture
//!
//! ```text
//! Intent ──→ Router ──→ Handler ──→ State ──→ View
//!    ↑                     │                    │
//!    │                     └──→ ViewEvent ──────┤
//!    └──────────────────────────────────────────┘
//! ```
//!
//! - **State**: Immutable representation of UI state, replaced wholesale
//! - **Intent**: User actions or system events, routed by kind
//! - **Reducer**: Pure function that transforms state based on intents
//! - **ViewEvent**: One-shot side effect, consumed at most once

mod collector;
mod engine;
mod error;
mod event;
mod intent;
mod reducer;
mod router;
mod state;
mod store;
mod task_queue;

pub use collector::{EventCollector, ViewEventHandler};
pub use engine::{EngineSettings, StateEngine, DEFAULT_EVENT_BUFFER, DEFAULT_INTENT_BUFFER};
pub use error::EngineError;
pub use event::{AppViewEvent, ViewEvent, ViewEventWrapper};
pub use intent::Intent;
pub use reducer::Reducer;
pub use router::{Handler, HandlerFuture, IntentRouter};
pub use state::UiState;
pub use store::StateStore;
pub use task_queue::{AsyncTask, AsyncTaskQueue, ExecutionContext, TaskWork};
