//! Registry of live sessions.
//!
//! The registry only tracks *membership*: which sessions the scheduler should
//! deliver to on the next tick. Each session's outbox is still owned by the
//! dispatcher serving its connection.
//!
//! # Locking
//!
//! A single mutex guards the membership list. Every operation takes it for a
//! bounded amount of work and never across an `.await`. The scheduler iterates
//! a [`snapshot`](SessionRegistry::snapshot) copy, so a concurrent `remove`
//! can never invalidate an iteration in progress.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::domain::foundation::SessionId;

use super::SessionHandle;

/// Insertion-ordered set of live session handles.
#[derive(Debug, Default)]
pub struct SessionRegistry {
    members: Mutex<Vec<Arc<SessionHandle>>>,
}

impl SessionRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    // Membership is a plain Vec, so a panic elsewhere while the guard was held
    // cannot leave it half-updated.
    fn members(&self) -> MutexGuard<'_, Vec<Arc<SessionHandle>>> {
        self.members.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Register a session.
    ///
    /// Identities are unique by construction, so no duplicate check is made.
    pub fn add(&self, handle: Arc<SessionHandle>) {
        let mut members = self.members();
        debug_assert!(
            members.iter().all(|m| m.id() != handle.id()),
            "session registered twice"
        );
        tracing::debug!(session_id = %handle.id(), "Session registered");
        members.push(handle);
    }

    /// Deregister a session.
    ///
    /// Returns `true` if the session was present. Removing an absent session
    /// is a no-op.
    pub fn remove(&self, id: &SessionId) -> bool {
        let mut members = self.members();
        match members.iter().position(|m| m.id() == *id) {
            Some(index) => {
                members.remove(index);
                tracing::debug!(session_id = %id, "Session deregistered");
                true
            }
            None => false,
        }
    }

    /// Copy of the current membership, in registration order.
    pub fn snapshot(&self) -> Vec<Arc<SessionHandle>> {
        self.members().clone()
    }

    pub fn contains(&self, id: &SessionId) -> bool {
        self.members().iter().any(|m| m.id() == *id)
    }

    pub fn len(&self) -> usize {
        self.members().len()
    }

    pub fn is_empty(&self) -> bool {
        self.members().is_empty()
    }
}
