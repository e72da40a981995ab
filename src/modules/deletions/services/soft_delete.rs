//! Soft-delete-with-undo state machine.
//!
//! Deleting a list entry does not call the gateway immediately. The entry is
//! flagged as temporarily deleted and a grace timer starts; until it fires
//! the user can undo at no cost. When the timer fires with the flag still
//! set, exactly one non-cascading remote delete is issued. A conflict
//! response (dependent records) parks the entity in a cascade-decision state
//! instead of failing; any other failure puts the entry back and surfaces a
//! dismissible error.
//!
//! Per-entity transitions:
//!
//! ```text
//! Active -> PendingDelete -> Active            (undo before the timer fires)
//!                         -> Deleting -> removed            (gateway success)
//!                                     -> CascadeDecision    (409 conflict)
//!                                     -> Active             (other failure)
//! CascadeDecision -> CascadeDeleting -> removed             (gateway success)
//!                                    -> Active              (failure)
//!                 -> Active                                 (cancel, no call)
//! ```
//!
//! A confirmed delete is terminal: the entity and its session are both
//! removed, so the session map never accumulates tombstones.
//!
//! Stale timer fires are rejected with a generation token: undo bumps the
//! generation, so a timer that was logically cancelled is a no-op even if its
//! sleep completes. Once `Deleting` is entered the remote call runs to
//! completion and undo has no effect; that race is inherent to the design.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use crate::core::notify::{Notice, Notifier};
use crate::core::{AppError, Result};
use crate::modules::deletions::models::{DeletableEntity, DeleteState, ResourceKind};
use crate::modules::deletions::services::gateway::{DeleteError, DeleteGateway};

struct Session {
    state: DeleteState,
    generation: u64,
}

struct ListState {
    entities: Vec<DeletableEntity>,
    sessions: HashMap<String, Session>,
}

struct Inner {
    state: Mutex<ListState>,
    gateway: Arc<dyn DeleteGateway>,
    notifier: Arc<dyn Notifier>,
    grace_window: Duration,
}

/// A list of deletable entities with one soft-delete session per entity.
///
/// Cheap to clone; all clones share the same list. The interior mutex is
/// never held across an await, so per-entity lifecycles proceed
/// independently while a delete call is in flight for another entity.
#[derive(Clone)]
pub struct SoftDeleteList {
    inner: Arc<Inner>,
}

impl SoftDeleteList {
    pub fn new(
        gateway: Arc<dyn DeleteGateway>,
        notifier: Arc<dyn Notifier>,
        grace_window: Duration,
    ) -> Self {
        Self {
            inner: Arc::new(Inner {
                state: Mutex::new(ListState {
                    entities: Vec::new(),
                    sessions: HashMap::new(),
                }),
                gateway,
                notifier,
                grace_window,
            }),
        }
    }

    /// Add an entity fetched from upstream. Replaces an existing entry with
    /// the same id.
    pub fn insert(&self, entity: DeletableEntity) {
        let mut state = self.lock();
        state.entities.retain(|e| e.id != entity.id);
        state.sessions.insert(
            entity.id.clone(),
            Session {
                state: DeleteState::Active,
                generation: 0,
            },
        );
        state.entities.push(entity);
    }

    /// Snapshot of the current entities, in insertion order. Entities in the
    /// grace window are still present with their flag set; committed deletes
    /// have been spliced out.
    pub fn entities(&self, resource: Option<ResourceKind>) -> Vec<DeletableEntity> {
        let state = self.lock();
        state
            .entities
            .iter()
            .filter(|e| resource.map(|r| e.resource == r).unwrap_or(true))
            .cloned()
            .collect()
    }

    /// Current delete state of an entity. `None` for unknown ids, including
    /// entities whose delete has been committed and removed.
    pub fn state_of(&self, id: &str) -> Option<DeleteState> {
        let state = self.lock();
        state.sessions.get(id).map(|s| s.state)
    }

    /// Start a soft delete: flag the entity, show the undo notice, and arm
    /// the grace timer.
    ///
    /// Precondition: the entity is `Active`. Re-requesting a delete while one
    /// is pending or in flight is rejected rather than armed twice.
    pub fn request_delete(&self, id: &str) -> Result<()> {
        let generation = {
            let mut guard = self.lock();
            let state = &mut *guard;

            let session = state
                .sessions
                .get_mut(id)
                .ok_or_else(|| AppError::not_found(format!("entity {}", id)))?;
            if session.state != DeleteState::Active {
                return Err(AppError::invalid_state(format!(
                    "entity {} already has a delete in progress",
                    id
                )));
            }

            let entity = Self::entity_mut(&mut state.entities, id)?;
            entity.is_temporarily_deleted = true;
            let display_name = entity.display_name.clone();

            session.state = DeleteState::PendingDelete;
            session.generation += 1;

            self.inner.notifier.show(Notice::undo_offer(
                id,
                format!("{} deleted", display_name),
            ));

            session.generation
        };

        let list = self.clone();
        let id = id.to_string();
        tokio::spawn(async move {
            tokio::time::sleep(list.inner.grace_window).await;
            list.commit_delete(&id, generation).await;
        });

        Ok(())
    }

    /// Undo a pending delete before the grace timer fires.
    ///
    /// Returns `true` if the delete was actually reverted. Calling this on an
    /// entity that is not pending (already undone, already committing, or
    /// never deleted) is a harmless no-op.
    pub fn undo(&self, id: &str) -> bool {
        let mut state = self.lock();

        let Some(session) = state.sessions.get_mut(id) else {
            return false;
        };
        if session.state != DeleteState::PendingDelete {
            return false;
        }

        session.state = DeleteState::Active;
        // Invalidates the armed timer: its captured generation is now stale.
        session.generation += 1;

        if let Ok(entity) = Self::entity_mut(&mut state.entities, id) {
            entity.is_temporarily_deleted = false;
        }

        self.inner.notifier.dismiss(id);
        true
    }

    /// Grace-timer callback. A stale generation means undo (or a later
    /// re-delete) intervened, and the fire is ignored.
    async fn commit_delete(&self, id: &str, generation: u64) {
        let resource = {
            let mut state = self.lock();

            let Some(session) = state.sessions.get_mut(id) else {
                return;
            };
            if session.generation != generation || session.state != DeleteState::PendingDelete {
                return;
            }

            session.state = DeleteState::Deleting;
            // The undo affordance lives exactly as long as PendingDelete.
            self.inner.notifier.dismiss(id);

            match Self::entity_mut(&mut state.entities, id) {
                Ok(entity) => entity.resource,
                Err(_) => return,
            }
        };

        let result = self.inner.gateway.delete(resource, id, false).await;
        self.apply_delete_result(id, DeleteState::Deleting, result);
    }

    /// Proceed with the cascading delete after a conflict.
    pub async fn confirm_cascade(&self, id: &str) -> Result<()> {
        let resource = {
            let mut state = self.lock();

            let session = state
                .sessions
                .get_mut(id)
                .ok_or_else(|| AppError::not_found(format!("entity {}", id)))?;
            if session.state != DeleteState::CascadeDecision {
                return Err(AppError::invalid_state(format!(
                    "entity {} has no cascade decision pending",
                    id
                )));
            }

            session.state = DeleteState::CascadeDeleting;
            self.inner.notifier.dismiss(id);

            Self::entity_mut(&mut state.entities, id)?.resource
        };

        let result = self.inner.gateway.delete(resource, id, true).await;
        self.apply_delete_result(id, DeleteState::CascadeDeleting, result);
        Ok(())
    }

    /// Abandon the cascade: the entity returns to the list untouched and no
    /// remote call is made.
    pub fn cancel_cascade(&self, id: &str) -> Result<()> {
        let mut state = self.lock();

        let session = state
            .sessions
            .get_mut(id)
            .ok_or_else(|| AppError::not_found(format!("entity {}", id)))?;
        if session.state != DeleteState::CascadeDecision {
            return Err(AppError::invalid_state(format!(
                "entity {} has no cascade decision pending",
                id
            )));
        }

        session.state = DeleteState::Active;

        if let Ok(entity) = Self::entity_mut(&mut state.entities, id) {
            entity.is_temporarily_deleted = false;
            entity.cascade_candidate_ids.clear();
        }

        self.inner.notifier.dismiss(id);
        Ok(())
    }

    fn apply_delete_result(
        &self,
        id: &str,
        expected: DeleteState,
        result: std::result::Result<(), DeleteError>,
    ) {
        let mut guard = self.lock();
        let state = &mut *guard;

        let Some(session) = state.sessions.get_mut(id) else {
            return;
        };
        if session.state != expected {
            return;
        }

        match result {
            Ok(()) => {
                let dependents = Self::entity_mut(&mut state.entities, id)
                    .map(|e| std::mem::take(&mut e.cascade_candidate_ids))
                    .unwrap_or_default();
                state.entities.retain(|e| e.id != *id);
                if expected == DeleteState::CascadeDeleting {
                    // Dependents listed locally go with the cascade.
                    state.entities.retain(|e| !dependents.contains(&e.id));
                }
                // Terminal: drop the session too, not just the entity.
                state.sessions.remove(id);

                tracing::info!(
                    id = %id,
                    cascade = (expected == DeleteState::CascadeDeleting),
                    "entity deleted"
                );
            }
            Err(DeleteError::Conflict {
                message,
                dependent_ids,
            }) if expected == DeleteState::Deleting => {
                session.state = DeleteState::CascadeDecision;

                if let Ok(entity) = Self::entity_mut(&mut state.entities, id) {
                    entity.cascade_candidate_ids = dependent_ids;
                }

                self.inner
                    .notifier
                    .show(Notice::warning(id, message));
            }
            Err(err) => {
                session.state = DeleteState::Active;

                if let Ok(entity) = Self::entity_mut(&mut state.entities, id) {
                    entity.is_temporarily_deleted = false;
                }

                tracing::warn!(id = %id, error = %err, "remote delete failed");
                self.inner.notifier.show(Notice::error(id, err.to_string()));
            }
        }
    }

    fn entity_mut<'a>(
        entities: &'a mut [DeletableEntity],
        id: &str,
    ) -> Result<&'a mut DeletableEntity> {
        entities
            .iter_mut()
            .find(|e| e.id == id)
            .ok_or_else(|| AppError::not_found(format!("entity {}", id)))
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, ListState> {
        self.inner.state.lock().unwrap_or_else(|e| e.into_inner())
    }
}
