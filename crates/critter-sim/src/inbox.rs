//! Single-writer request queue.
//!
//! Callers on any thread hold a cloned [`Submitter`] and enqueue requests.
//! The simulation owns the [`Inbox`] and drains it once at the start of each
//! tick, so every request is applied by the one simulation thread in arrival
//! order and no locking is needed around world state.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::Arc;

use crate::actions::Request;

/// A request tagged with its submitter's identity.
#[derive(Debug, Clone, PartialEq)]
pub struct Envelope {
    pub id: u64,
    pub persona_tag: String,
    pub request: Request,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("simulation inbox is closed")]
pub struct InboxClosed;

/// Cheap, cloneable handle for enqueueing requests.
#[derive(Debug, Clone)]
pub struct Submitter {
    tx: Sender<Envelope>,
    next_id: Arc<AtomicU64>,
}

impl Submitter {
    /// Enqueue `request` on behalf of `persona_tag`; returns its request id.
    pub fn submit(&self, persona_tag: impl Into<String>, request: Request) -> Result<u64, InboxClosed> {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        self.tx
            .send(Envelope {
                id,
                persona_tag: persona_tag.into(),
                request,
            })
            .map_err(|_| InboxClosed)?;
        Ok(id)
    }
}

#[derive(Debug)]
pub struct Inbox {
    rx: Receiver<Envelope>,
    submitter: Submitter,
}

impl Inbox {
    pub fn new() -> Self {
        let (tx, rx) = mpsc::channel();
        Self {
            rx,
            submitter: Submitter {
                tx,
                next_id: Arc::new(AtomicU64::new(0)),
            },
        }
    }

    pub fn submitter(&self) -> Submitter {
        self.submitter.clone()
    }

    /// Everything queued so far, in arrival order.
    pub fn drain(&self) -> Vec<Envelope> {
        self.rx.try_iter().collect()
    }
}

impl Default for Inbox {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    #[test]
    fn drains_in_arrival_order() {
        let inbox = Inbox::new();
        let tx = inbox.submitter();
        let first = tx.submit("ada", Request::CreatePlayer).unwrap();
        let second = tx
            .submit(
                "ada",
                Request::CreatePet {
                    nickname: "Rex".into(),
                },
            )
            .unwrap();
        let batch = inbox.drain();
        assert_eq!(batch.iter().map(|e| e.id).collect::<Vec<_>>(), vec![first, second]);
        assert!(inbox.drain().is_empty());
    }

    #[test]
    fn submitters_work_across_threads() {
        let inbox = Inbox::new();
        let handles: Vec<_> = (0..4)
            .map(|i| {
                let tx = inbox.submitter();
                thread::spawn(move || tx.submit(format!("p{i}"), Request::CreatePlayer).unwrap())
            })
            .collect();
        let mut ids: Vec<u64> = handles.into_iter().map(|h| h.join().unwrap()).collect();
        ids.sort_unstable();
        assert_eq!(ids, vec![0, 1, 2, 3]);
        assert_eq!(inbox.drain().len(), 4);
    }

    #[test]
    fn submit_after_inbox_dropped_fails() {
        let inbox = Inbox::new();
        let tx = inbox.submitter();
        drop(inbox);
        assert_eq!(tx.submit("ada", Request::CreatePlayer), Err(InboxClosed));
    }
}
