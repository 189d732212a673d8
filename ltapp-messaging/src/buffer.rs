//! Concurrent message buffer
//!
//! One mutex guards the contents and every counter mutation, so a stats read
//! taken under it always satisfies `size <= total_consumed`. The live size is
//! mirrored into an atomic for lock-free `size()` reads.

use crate::errors::{MessagingError, MessagingResult};
use crate::payload::MessagePayload;
use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use rand::Rng;
use serde::Serialize;
use std::sync::atomic::{AtomicI64, AtomicU64, AtomicUsize, Ordering};

/// Buffer statistics snapshot
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BufferStats {
    /// Accepted outbound sends
    pub total_produced: u64,

    /// Inbound messages absorbed into the buffer
    pub total_consumed: u64,

    /// Messages currently buffered
    pub size: usize,

    /// Most recent produce or consume event
    pub last_activity: Option<DateTime<Utc>>,
}

/// Unordered multiset of in-flight payloads
#[derive(Debug, Default)]
pub struct MessageBuffer {
    messages: Mutex<Vec<MessagePayload>>,
    len: AtomicUsize,
    total_produced: AtomicU64,
    total_consumed: AtomicU64,
    // Unix millis; 0 means no activity yet
    last_activity_ms: AtomicI64,
}

impl MessageBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Absorb an inbound message
    pub fn enqueue(&self, payload: MessagePayload) {
        let mut messages = self.messages.lock();
        self.total_consumed.fetch_add(1, Ordering::Relaxed);
        messages.push(payload);
        self.len.store(messages.len(), Ordering::Release);
        self.touch();
    }

    /// Remove and return a uniformly random message
    pub fn take_one(&self) -> MessagingResult<MessagePayload> {
        self.take_one_with(&mut rand::rng())
    }

    /// [`take_one`](Self::take_one) with a caller-supplied random source
    pub fn take_one_with<R: Rng>(&self, rng: &mut R) -> MessagingResult<MessagePayload> {
        let mut messages = self.messages.lock();

        let index = reservoir_index(messages.len(), rng).ok_or(MessagingError::EmptyBuffer)?;
        let payload = messages.swap_remove(index);
        self.len.store(messages.len(), Ordering::Release);

        Ok(payload)
    }

    /// Up to `limit` buffered payloads, left in place
    pub fn peek_many(&self, limit: usize) -> Vec<MessagePayload> {
        let messages = self.messages.lock();
        messages.iter().take(limit).cloned().collect()
    }

    /// Count one accepted outbound send
    pub fn record_produced(&self) {
        let _messages = self.messages.lock();
        self.total_produced.fetch_add(1, Ordering::Relaxed);
        self.touch();
    }

    pub fn size(&self) -> usize {
        self.len.load(Ordering::Acquire)
    }

    pub fn is_empty(&self) -> bool {
        self.size() == 0
    }

    pub fn stats(&self) -> BufferStats {
        let messages = self.messages.lock();
        BufferStats {
            total_produced: self.total_produced.load(Ordering::Relaxed),
            total_consumed: self.total_consumed.load(Ordering::Relaxed),
            size: messages.len(),
            last_activity: self.last_activity(),
        }
    }

    pub fn last_activity(&self) -> Option<DateTime<Utc>> {
        match self.last_activity_ms.load(Ordering::Relaxed) {
            0 => None,
            millis => DateTime::from_timestamp_millis(millis),
        }
    }

    fn touch(&self) {
        self.last_activity_ms
            .store(Utc::now().timestamp_millis(), Ordering::Relaxed);
    }
}

/// Single-pass reservoir selection over `len` items: the k-th item replaces
/// the current pick with probability 1/k.
fn reservoir_index<R: Rng>(len: usize, rng: &mut R) -> Option<usize> {
    let mut selected = None;
    for seen in 1..=len {
        if rng.random_range(0..seen) == 0 {
            selected = Some(seen - 1);
        }
    }
    selected
}
