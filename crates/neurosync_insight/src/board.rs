//! The visible insight slot. Only the most recently started request may write it;
//! results from superseded requests are dropped on arrival.

use crate::requestor::{FailureKind, InsightRequestor, RequestFailure};
use arc_swap::ArcSwap;
use neurosync_core::{CheckInMetrics, Insight};
use std::sync::Arc;

/// What the presentation layer should show.
#[derive(Debug, Clone, PartialEq)]
pub enum InsightState {
    /// No check-in submitted yet.
    Empty,
    Pending,
    Ready(Insight),
    /// The latest request failed; show the neutral fallback.
    Unavailable(FailureKind),
}

impl InsightState {
    pub fn insight(&self) -> Option<&Insight> {
        match self {
            InsightState::Ready(insight) => Some(insight),
            _ => None,
        }
    }
}

/// Handed out by `begin`; identifies one submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Ticket(u64);

impl Ticket {
    pub fn generation(self) -> u64 {
        self.0
    }
}

#[derive(Debug)]
struct Slot {
    generation: u64,
    state: InsightState,
}

#[derive(Debug)]
pub struct InsightBoard {
    slot: ArcSwap<Slot>,
}

impl Default for InsightBoard {
    fn default() -> Self {
        Self::new()
    }
}

impl InsightBoard {
    pub fn new() -> Self {
        Self {
            slot: ArcSwap::from_pointee(Slot {
                generation: 0,
                state: InsightState::Empty,
            }),
        }
    }

    /// Start a submission. Supersedes any request still in flight.
    pub fn begin(&self) -> Ticket {
        let prev = self.slot.rcu(|cur| Slot {
            generation: cur.generation + 1,
            state: InsightState::Pending,
        });
        Ticket(prev.generation + 1)
    }

    /// Apply a result if `ticket` is still the latest submission.
    /// Returns false when the result was stale and discarded.
    pub fn settle(&self, ticket: Ticket, result: Result<Insight, RequestFailure>) -> bool {
        let state = match result {
            Ok(insight) => InsightState::Ready(insight),
            Err(e) => InsightState::Unavailable(e.kind()),
        };

        let mut applied = false;
        self.slot.rcu(|cur| {
            applied = cur.generation == ticket.0;
            if applied {
                Arc::new(Slot {
                    generation: cur.generation,
                    state: state.clone(),
                })
            } else {
                Arc::clone(cur)
            }
        });

        if !applied {
            tracing::debug!(
                "Discarding stale insight result (ticket {}, latest {})",
                ticket.0,
                self.generation()
            );
        }
        applied
    }

    /// begin, request, settle. Returns the state visible afterwards, which may
    /// belong to a newer submission.
    pub async fn submit(&self, requestor: &InsightRequestor, metrics: &CheckInMetrics) -> InsightState {
        let ticket = self.begin();
        let result = requestor.request_insight(metrics).await;
        self.settle(ticket, result);
        self.current()
    }

    pub fn current(&self) -> InsightState {
        self.slot.load().state.clone()
    }

    pub fn generation(&self) -> u64 {
        self.slot.load().generation
    }
}
