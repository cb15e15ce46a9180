//! Session state structures
//!
//! Defines the handle given to callers and the state a manager keeps about
//! its single cached session.

use chrono::{DateTime, Utc};
use std::ops::Deref;
use std::sync::Arc;

use crate::types::identifiers::SessionId;

/// Shared handle to an engine session owned by a manager
///
/// Dereferences to the engine session so callers can invoke capability
/// operations directly. Cloning is cheap and every clone refers to the same
/// session; the manager alone decides when the session is destroyed.
pub struct SessionHandle<S> {
    inner: Arc<SessionEntry<S>>,
}

struct SessionEntry<S> {
    id: SessionId,
    created_at: DateTime<Utc>,
    session: S,
}

impl<S> SessionHandle<S> {
    pub(crate) fn new(session: S) -> Self {
        Self {
            inner: Arc::new(SessionEntry {
                id: SessionId::new(),
                created_at: Utc::now(),
                session,
            }),
        }
    }

    /// Unique ID of this session
    #[must_use]
    pub fn id(&self) -> SessionId {
        self.inner.id
    }

    /// When the manager installed this session
    #[must_use]
    pub fn created_at(&self) -> DateTime<Utc> {
        self.inner.created_at
    }

    /// Whether both handles refer to the same engine session
    #[must_use]
    pub fn same_session(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }
}

impl<S> Clone for SessionHandle<S> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<S> Deref for SessionHandle<S> {
    type Target = S;

    fn deref(&self) -> &S {
        &self.inner.session
    }
}

impl<S> std::fmt::Debug for SessionHandle<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionHandle")
            .field("id", &self.inner.id)
            .field("created_at", &self.inner.created_at)
            .finish_non_exhaustive()
    }
}

/// Cached session state of one manager
///
/// Written only by the manager's lifecycle worker. `initialized` implies
/// `session` is present, and a present `session` was created from exactly
/// `current_config`.
pub(super) struct LifecycleState<C, S> {
    /// The live session, if any
    pub session: Option<SessionHandle<S>>,

    /// Configuration that produced `session`
    pub current_config: Option<C>,

    /// Whether `session` completed its readiness signal
    pub initialized: bool,
}

impl<C, S> LifecycleState<C, S> {
    pub(super) const fn new() -> Self {
        Self {
            session: None,
            current_config: None,
            initialized: false,
        }
    }

    pub(super) const fn is_ready(&self) -> bool {
        self.initialized && self.session.is_some()
    }

    /// Clear all fields, returning the session that was cached
    pub(super) fn reset(&mut self) -> Option<SessionHandle<S>> {
        self.initialized = false;
        self.current_config = None;
        self.session.take()
    }

    pub(super) fn install(&mut self, config: C, session: SessionHandle<S>) {
        self.current_config = Some(config);
        self.session = Some(session);
        self.initialized = true;
    }
}
