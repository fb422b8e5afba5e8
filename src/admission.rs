//! Per-client admission control.
//!
//! Every protected request passes through [`AdmissionController::admit`],
//! which charges the client's request budget for the current window and
//! then claims one of its concurrent-connection slots. Slots are handed
//! back with [`AdmissionController::release`], or automatically by dropping
//! the [`ConnectionPermit`] returned from [`AdmissionController::try_acquire`].

use crate::clock::{Clock, SystemClock};
use crate::config::AdmissionConfig;
use dashmap::DashMap;
use std::borrow::Borrow;
use std::hash::Hash;
use std::sync::Arc;

/// Outcome of a single admission check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Admitted,
    RateLimited,
    ConnectionLimited,
}

/// Why [`AdmissionController::try_acquire`] refused a request.
///
/// The display text is the plain-text body sent back to the client.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum Rejection {
    #[error("Rate limit exceeded. Please try again later.")]
    RateLimited,
    #[error("Too many concurrent connections. Please try again later.")]
    ConnectionLimited,
}

/// Read-only view of one client's counters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClientUsage {
    pub request_count: u32,
    pub window_start: u64,
    pub active: u32,
}

// rate and connection records for one key, kept together so a single
// shard lock covers both
#[derive(Debug)]
struct ClientRecord {
    request_count: u32,
    window_start: u64,
    active: u32,
}

impl ClientRecord {
    fn fresh(now: u64) -> Self {
        Self {
            request_count: 0,
            window_start: now,
            active: 0,
        }
    }

    fn window_expired(&self, now: u64, window_seconds: u64) -> bool {
        now.saturating_sub(self.window_start) > window_seconds
    }
}

/// Shared admission state plus the decision logic around it.
///
/// `K` identifies a client (the server uses the peer IP as a `String`).
/// `C` is the clock, defaulting to [`SystemClock`].
#[derive(Debug)]
pub struct AdmissionController<K, C = SystemClock>
where
    K: Hash + Eq + Clone,
    C: Clock,
{
    config: AdmissionConfig,
    clients: DashMap<K, ClientRecord>,
    clock: C,
}

impl<K, C> AdmissionController<K, C>
where
    K: Hash + Eq + Clone,
    C: Clock,
{
    pub fn new(config: AdmissionConfig, clock: C) -> Self {
        Self {
            config,
            clients: DashMap::new(),
            clock,
        }
    }

    pub fn config(&self) -> &AdmissionConfig {
        &self.config
    }

    /// Charge one request to `key` and try to claim a connection slot.
    ///
    /// The request counter is incremented even when the call is rejected,
    /// so rejected calls keep consuming the window's budget. The rate check
    /// runs before the connection check.
    pub fn admit(&self, key: K) -> Decision {
        // the entry holds the shard lock until `record` is dropped
        let entry = self.clients.entry(key);
        let now = self.clock.now();
        let mut record = entry.or_insert_with(|| ClientRecord::fresh(now));

        if record.window_expired(now, self.config.window_seconds) {
            record.request_count = 0;
            record.window_start = now;
        }

        record.request_count = record.request_count.saturating_add(1);

        if record.request_count > self.config.max_requests_per_window {
            tracing::trace!(count = record.request_count, "rate budget exhausted");
            return Decision::RateLimited;
        }

        if record.active >= self.config.max_concurrent_connections {
            tracing::trace!(active = record.active, "connection slots exhausted");
            return Decision::ConnectionLimited;
        }

        record.active += 1;
        Decision::Admitted
    }

    /// Give back one connection slot for `key`.
    ///
    /// Unknown keys and keys with no active connections are left untouched.
    pub fn release<Q>(&self, key: &Q)
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        if let Some(mut record) = self.clients.get_mut(key) {
            if record.active > 0 {
                record.active -= 1;
            }
        }
    }

    /// Scoped form of [`admit`](Self::admit): the returned permit releases
    /// its slot when dropped.
    pub fn try_acquire(self: &Arc<Self>, key: K) -> Result<ConnectionPermit<K, C>, Rejection> {
        match self.admit(key.clone()) {
            Decision::Admitted => Ok(ConnectionPermit {
                controller: Arc::clone(self),
                key,
            }),
            Decision::RateLimited => Err(Rejection::RateLimited),
            Decision::ConnectionLimited => Err(Rejection::ConnectionLimited),
        }
    }

    pub fn usage<Q>(&self, key: &Q) -> Option<ClientUsage>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.clients.get(key).map(|record| ClientUsage {
            request_count: record.request_count,
            window_start: record.window_start,
            active: record.active,
        })
    }

    /// Drop records that hold no connections and whose window has expired.
    ///
    /// The next `admit` for such a key would reset it anyway, so removing
    /// it changes nothing a caller can observe. Returns how many were removed.
    pub fn sweep(&self) -> usize {
        let now = self.clock.now();
        let window = self.config.window_seconds;
        let mut removed = 0;

        self.clients.retain(|_, record| {
            let keep = record.active > 0 || !record.window_expired(now, window);
            if !keep {
                removed += 1;
            }
            keep
        });

        removed
    }

    pub fn tracked_clients(&self) -> usize {
        self.clients.len()
    }

    pub fn active_connections(&self) -> usize {
        self.clients
            .iter()
            .map(|record| record.active as usize)
            .sum()
    }
}

/// One admitted, not yet released connection slot.
#[must_use = "dropping the permit releases the connection slot immediately"]
#[derive(Debug)]
pub struct ConnectionPermit<K, C = SystemClock>
where
    K: Hash + Eq + Clone,
    C: Clock,
{
    controller: Arc<AdmissionController<K, C>>,
    key: K,
}

impl<K, C> ConnectionPermit<K, C>
where
    K: Hash + Eq + Clone,
    C: Clock,
{
    pub fn key(&self) -> &K {
        &self.key
    }
}

impl<K, C> Drop for ConnectionPermit<K, C>
where
    K: Hash + Eq + Clone,
    C: Clock,
{
    fn drop(&mut self) {
        self.controller.release(&self.key);
    }
}
