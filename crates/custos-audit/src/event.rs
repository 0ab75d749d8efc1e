//! Access event and log types.
//!
//! `AccessEvent` is a single entry in the hash chain — it wraps a
//! `DecisionRecord` with sequence numbering and the SHA-256 hashes that
//! make tampering detectable.  `AccessLog` is the sealed record produced
//! when a session finishes.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use custos_contracts::decision::DecisionRecord;

/// A single entry in the SHA-256 hash chain for one session.
///
/// Each event commits to the previous event via `prev_hash`, forming an
/// append-only chain.  Modifying any field — including those of the
/// embedded `record` — invalidates `this_hash` and every subsequent
/// `prev_hash`, which `verify_chain` detects.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccessEvent {
    /// Monotonically increasing position in the chain, starting at 0.
    pub sequence: u64,

    /// The session this event belongs to.
    pub session_id: String,

    /// The immutable decision record produced by the gateway.
    pub record: DecisionRecord,

    /// SHA-256 hash (hex) of the previous event, or `GENESIS_HASH` for the
    /// first event.
    pub prev_hash: String,

    /// SHA-256 hash (hex) of this event's canonical content.
    ///
    /// Computed by `hash_event()` over (session_id, sequence, prev_hash,
    /// canonical JSON of record).
    pub this_hash: String,
}

impl AccessEvent {
    /// The sentinel `prev_hash` used for the first event in every chain.
    ///
    /// 64 hex zeros — a value that can never be the SHA-256 of real data,
    /// making genesis detection unambiguous.
    pub const GENESIS_HASH: &'static str =
        "0000000000000000000000000000000000000000000000000000000000000000";
}

/// A sealed, finalized access log for a single session.
///
/// Produced by `InMemoryAccessRecorder::export_log()` after the session
/// ends.  The `terminal_hash` is the `this_hash` of the last event and can
/// be used as a compact commitment to the entire log.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccessLog {
    /// The session whose decisions are recorded here.
    pub session_id: String,

    /// All access events in chain order (sequence 0 first).
    pub events: Vec<AccessEvent>,

    /// Wall-clock time (UTC) the log was exported / sealed.
    pub sealed_at: DateTime<Utc>,

    /// The `this_hash` of the last event.  Empty string if the log is empty.
    pub terminal_hash: String,
}
