//! The shared draft store.
//!
//! One logical slot holds the current draft; two UI surfaces read and
//! write it independently. Writes fan out to every subscribed surface
//! except the writer, mirroring how a browser storage event fires only
//! in other execution contexts — a surface never re-observes its own
//! write, which is what prevents feedback loops between the two open
//! surfaces.
//!
//! Persistence is best-effort: a slot failure is logged and swallowed,
//! because losing the local draft cache is not correctness-critical for
//! a single-operator tool. The in-memory draft held by each surface
//! session stays authoritative for that surface either way.

use std::sync::{Arc, Mutex, PoisonError, mpsc};

use proposal_core::{ProposalDraft, apply_defaults};
use serde_json::{Map, Value};

use crate::slot::DraftSlot;

/// The two UI surfaces sharing the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Surface {
    InspectionForm,
    ProposalPreview,
}

/// A change notification pushed to subscribed surfaces. The payload is
/// the raw stored JSON; receivers must re-apply defaulting before
/// adopting it, since the writer is not guaranteed to have produced a
/// fully normalized shape.
#[derive(Debug, Clone)]
pub struct DraftUpdate {
    pub origin: Surface,
    pub payload: Value,
}

struct Inner {
    slot: Box<dyn DraftSlot>,
    subscribers: Mutex<Vec<(Surface, mpsc::Sender<DraftUpdate>)>>,
}

/// Handle to the shared draft slot. Cheap to clone; all clones observe
/// the same slot and subscriber set.
#[derive(Clone)]
pub struct DraftStore {
    inner: Arc<Inner>,
}

impl DraftStore {
    pub fn new(slot: impl DraftSlot + 'static) -> Self {
        Self {
            inner: Arc::new(Inner {
                slot: Box::new(slot),
                subscribers: Mutex::new(Vec::new()),
            }),
        }
    }

    /// Reads the stored draft, defaulted when absent or corrupt.
    /// Malformed stored content is treated as empty, never as an error.
    pub fn read_draft(&self) -> ProposalDraft {
        apply_defaults(&self.read_raw())
    }

    /// Reads the raw stored JSON value. Absent and corrupt content both
    /// come back as `null`, which normalizes to the default draft.
    pub fn read_raw(&self) -> Value {
        let payload = match self.inner.slot.load() {
            Ok(Some(payload)) => payload,
            Ok(None) => return Value::Null,
            Err(e) => {
                tracing::warn!(error = %e, "draft slot unreadable, treating as empty");
                return Value::Null;
            }
        };

        serde_json::from_str(&payload).unwrap_or_else(|e| {
            tracing::warn!(error = %e, "stored draft is not valid JSON, treating as empty");
            Value::Null
        })
    }

    /// Stores a whole draft and notifies the other surfaces.
    pub fn write_draft(&self, origin: Surface, draft: &ProposalDraft) {
        match serde_json::to_value(draft) {
            Ok(value) => self.write_raw(origin, value),
            Err(e) => tracing::warn!(error = %e, "draft failed to serialize, write dropped"),
        }
    }

    /// Merges a partial update onto the stored value, then stores and
    /// notifies. Keys the partial does not mention are left untouched,
    /// so one surface cannot erase fields only the other manages.
    pub fn write_partial(&self, origin: Surface, partial: &Value) {
        let merged = merge_draft(&self.read_raw(), partial);
        self.write_raw(origin, merged);
    }

    /// Subscribes a surface to updates originating from *other* surfaces.
    pub fn subscribe(&self, surface: Surface) -> mpsc::Receiver<DraftUpdate> {
        let (tx, rx) = mpsc::channel();
        self.subscribers().push((surface, tx));
        rx
    }

    /// Stores an already-merged raw value and notifies the other
    /// surfaces. Callers that hold the authoritative draft in memory use
    /// this so a failed save costs only persistence, never their state.
    pub fn write_raw(&self, origin: Surface, value: Value) {
        match serde_json::to_string(&value) {
            Ok(payload) => {
                if let Err(e) = self.inner.slot.save(&payload) {
                    tracing::warn!(error = %e, "draft slot write failed, keeping in-memory copy");
                }
            }
            Err(e) => tracing::warn!(error = %e, "draft failed to serialize, write dropped"),
        }

        self.notify(origin, value);
    }

    fn notify(&self, origin: Surface, payload: Value) {
        let update = DraftUpdate { origin, payload };
        // Disconnected receivers are pruned as a side effect of sending.
        self.subscribers().retain(|(surface, tx)| {
            if *surface == origin {
                true
            } else {
                tx.send(update.clone()).is_ok()
            }
        });
    }

    fn subscribers(&self) -> std::sync::MutexGuard<'_, Vec<(Surface, mpsc::Sender<DraftUpdate>)>> {
        self.inner
            .subscribers
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

/// Shallow merge: keys present and non-`null` in `incoming` overwrite
/// `prev`; everything else is preserved. Non-object inputs degrade to
/// an empty object rather than failing.
pub fn merge_draft(prev: &Value, incoming: &Value) -> Value {
    let mut merged = match prev {
        Value::Object(map) => map.clone(),
        _ => Map::new(),
    };

    if let Value::Object(updates) = incoming {
        for (key, value) in updates {
            if !value.is_null() {
                merged.insert(key.clone(), value.clone());
            }
        }
    }

    Value::Object(merged)
}
