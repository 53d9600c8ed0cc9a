//! Pending force expiries
//!
//! Expiries are ordered by due time, then by scheduling order, so two
//! expiries due at the same millisecond always fire in the order they were
//! scheduled. Each one is addressable through an [`ExpiryHandle`] and can be
//! cancelled, individually or for a whole body.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::body::{BodyId, ForceId};

/// Handle to a scheduled expiry
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ExpiryHandle {
    due_ms: u64,
    seq: u64,
}

impl ExpiryHandle {
    pub fn due_ms(&self) -> u64 {
        self.due_ms
    }
}

/// A force that lapses at `due_ms`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Expiry {
    pub handle: ExpiryHandle,
    pub body: BodyId,
    pub force: ForceId,
}

/// Expiry queue owned by the simulation
#[derive(Debug, Clone, Default)]
pub struct Timers {
    pending: BTreeMap<ExpiryHandle, (BodyId, ForceId)>,
    next_seq: u64,
}

impl Timers {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn schedule(&mut self, due_ms: u64, body: BodyId, force: ForceId) -> ExpiryHandle {
        let handle = ExpiryHandle {
            due_ms,
            seq: self.next_seq,
        };
        self.next_seq += 1;
        self.pending.insert(handle, (body, force));
        handle
    }

    /// Cancel one expiry. Returns the force it targeted if it was still pending.
    pub fn cancel(&mut self, handle: ExpiryHandle) -> Option<(BodyId, ForceId)> {
        self.pending.remove(&handle)
    }

    /// Cancel every expiry targeting `body`; returns how many were dropped
    pub fn cancel_body(&mut self, body: BodyId) -> usize {
        let before = self.pending.len();
        self.pending.retain(|_, (b, _)| *b != body);
        before - self.pending.len()
    }

    /// Pop the earliest expiry due at or before `now_ms`
    pub fn pop_due(&mut self, now_ms: u64) -> Option<Expiry> {
        let (handle, _) = self.pending.first_key_value()?;
        if handle.due_ms > now_ms {
            return None;
        }
        let (handle, (body, force)) = self.pending.pop_first()?;
        Some(Expiry {
            handle,
            body,
            force,
        })
    }

    pub fn is_pending(&self, handle: ExpiryHandle) -> bool {
        self.pending.contains_key(&handle)
    }

    pub fn pending_for(&self, body: BodyId) -> usize {
        self.pending.values().filter(|(b, _)| *b == body).count()
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}
