//! In-memory implementation of `DecisionSink`.
//!
//! `InMemoryAccessRecorder` is the reference implementation of the
//! `DecisionSink` trait.  It keeps all events in a `Vec` protected by a
//! `Mutex`, making it safe to pass across threads while the gateway calls
//! `record()` and `seal()`.
//!
//! Use `export_log()` after a session ends to obtain a sealed `AccessLog`,
//! and `verify_integrity()` at any time to confirm the chain has not been
//! tampered with in memory.

use std::sync::{Arc, Mutex};

use chrono::Utc;
use tracing::info;

use custos_contracts::{
    decision::DecisionRecord,
    error::{CustosError, CustosResult},
};
use custos_core::traits::DecisionSink;

use crate::{
    chain::{hash_event, verify_chain},
    event::{AccessEvent, AccessLog},
};

// ── Internal mutable state ────────────────────────────────────────────────────

/// The mutable interior of an `InMemoryAccessRecorder`.
///
/// Kept behind `Arc<Mutex<_>>` so that both `InMemoryAccessRecorder` and
/// any clones of the `Arc` can safely observe or export the accumulated
/// events.
pub(crate) struct RecorderState {
    /// All events written so far, in append order.
    pub(crate) events: Vec<AccessEvent>,

    /// The next sequence number to assign (starts at 0).
    pub(crate) sequence: u64,

    /// The `this_hash` of the last written event, or `GENESIS_HASH` before
    /// any event has been written.
    pub(crate) last_hash: String,
}

// ── Public recorder ───────────────────────────────────────────────────────────

/// An in-memory, append-only decision recorder backed by a SHA-256 hash
/// chain.
///
/// # Thread safety
///
/// `record()` and `seal()` both acquire a `Mutex` internally.  Multiple
/// threads may hold clones of the `Arc<Mutex<RecorderState>>` without
/// additional synchronization.
pub struct InMemoryAccessRecorder {
    session_id: String,
    pub(crate) state: Arc<Mutex<RecorderState>>,
}

impl InMemoryAccessRecorder {
    /// Create a new recorder for the given session.
    ///
    /// The internal `last_hash` is initialized to `AccessEvent::GENESIS_HASH`
    /// so the first event's `prev_hash` is automatically correct.
    pub fn new(session_id: impl Into<String>) -> Self {
        let session_id = session_id.into();
        let state = RecorderState {
            events: Vec::new(),
            sequence: 0,
            last_hash: AccessEvent::GENESIS_HASH.to_string(),
        };
        Self {
            session_id,
            state: Arc::new(Mutex::new(state)),
        }
    }

    /// Export a sealed `AccessLog` containing all events written so far.
    ///
    /// The `terminal_hash` is the `this_hash` of the last event, or an
    /// empty string when no events have been written.
    pub fn export_log(&self) -> AccessLog {
        let state = self.state.lock().expect("recorder state lock poisoned");
        let terminal_hash = state
            .events
            .last()
            .map(|e| e.this_hash.clone())
            .unwrap_or_default();

        AccessLog {
            session_id: self.session_id.clone(),
            events: state.events.clone(),
            sealed_at: Utc::now(),
            terminal_hash,
        }
    }

    /// Verify that the in-memory chain has not been tampered with.
    ///
    /// Delegates to `verify_chain`, which checks both prev-hash linkage and
    /// hash correctness for every event.
    pub fn verify_integrity(&self) -> bool {
        let state = self.state.lock().expect("recorder state lock poisoned");
        verify_chain(&state.events)
    }
}

// ── DecisionSink impl ─────────────────────────────────────────────────────────

impl DecisionSink for InMemoryAccessRecorder {
    /// Append one decision record to the hash chain.
    ///
    /// Computes `this_hash` from (session_id, sequence, prev_hash, record),
    /// wraps the record in an `AccessEvent`, appends it, then advances the
    /// sequence counter and `last_hash`.
    ///
    /// Returns `Err(AuditWriteFailed)` only if the internal mutex is
    /// poisoned, which cannot happen under normal operation.
    fn record(&self, record: &DecisionRecord) -> CustosResult<()> {
        let mut state = self.state.lock().map_err(|e| CustosError::AuditWriteFailed {
            reason: format!("recorder state lock poisoned: {}", e),
        })?;

        let prev_hash = state.last_hash.clone();
        let sequence = state.sequence;

        let this_hash = hash_event(&self.session_id, sequence, record, &prev_hash);

        let event = AccessEvent {
            sequence,
            session_id: self.session_id.clone(),
            record: record.clone(),
            prev_hash,
            this_hash: this_hash.clone(),
        };

        state.events.push(event);
        state.sequence += 1;
        state.last_hash = this_hash;

        Ok(())
    }

    /// Mark the session as finished in the decision log.
    ///
    /// Logs a structured message via `tracing`.  Implementations that
    /// persist to disk or a database would flush/seal here; the in-memory
    /// recorder has nothing to flush.
    fn seal(&self, session_id: &str) -> CustosResult<()> {
        let state = self.state.lock().map_err(|e| CustosError::AuditWriteFailed {
            reason: format!("recorder state lock poisoned: {}", e),
        })?;

        info!(
            session_id = %session_id,
            event_count = state.events.len(),
            terminal_hash = %state.last_hash,
            "access log sealed"
        );

        Ok(())
    }
}
