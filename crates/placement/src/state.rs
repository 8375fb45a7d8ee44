use std::sync::Arc;

use showcase_core::error::CoreError;
use showcase_core::requester::Requester;
use showcase_core::roles::ROLE_ADMIN;
use showcase_db::Db;
use showcase_events::EventBus;
use tokio_util::sync::CancellationToken;

use crate::guard::WriteGuards;

/// Shared state behind every placement component.
///
/// Cheaply cloneable (everything is behind `Arc` or already `Clone`).
#[derive(Clone)]
pub struct PlacementState {
    /// Backing store handle.
    pub db: Db,
    /// Per-(vertical, kind) single-writer guards.
    pub guards: Arc<WriteGuards>,
    /// Fan-out for placement change events.
    pub event_bus: Arc<EventBus>,
}

impl PlacementState {
    pub fn new(db: Db, event_bus: Arc<EventBus>) -> Self {
        Self {
            db,
            guards: Arc::new(WriteGuards::new()),
            event_bus,
        }
    }
}

/// Per-call context: who is asking, and the signal to abandon the call.
#[derive(Debug, Clone)]
pub struct RequestContext {
    pub requester: Requester,
    pub cancel: CancellationToken,
}

impl RequestContext {
    pub fn new(requester: Requester) -> Self {
        Self {
            requester,
            cancel: CancellationToken::new(),
        }
    }

    /// Admin context for maintenance jobs.
    pub fn system() -> Self {
        Self::new(Requester::new("system", ROLE_ADMIN))
    }

    pub fn with_cancel(mut self, cancel: CancellationToken) -> Self {
        self.cancel = cancel;
        self
    }

    pub fn user_id(&self) -> &str {
        &self.requester.user_id
    }

    /// Mutations need an identified caller.
    pub fn ensure_identified(&self) -> Result<(), CoreError> {
        if self.requester.user_id.trim().is_empty() {
            return Err(CoreError::Unauthorized(
                "A user id is required to change placements".into(),
            ));
        }
        Ok(())
    }
}
