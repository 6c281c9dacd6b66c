//! Connection outcome counters.

use std::sync::atomic::{AtomicU64, Ordering};

use crate::server::response::StatusCode;

/// How a single connection ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// A complete response with this status was written.
    Responded(StatusCode),
    /// The client closed the connection before sending a request line.
    ClientClosed,
    /// No request line arrived before the read deadline.
    TimedOut,
}

/// Counters shared by all connection tasks.
#[derive(Debug, Default)]
pub struct ServerStats {
    ok: AtomicU64,
    client_errors: AtomicU64,
    server_errors: AtomicU64,
    client_closed: AtomicU64,
    timed_out: AtomicU64,
    aborted: AtomicU64,
}

/// A point-in-time copy of [`ServerStats`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StatsSnapshot {
    pub ok: u64,
    pub client_errors: u64,
    pub server_errors: u64,
    pub client_closed: u64,
    pub timed_out: u64,
    pub aborted: u64,
}

impl ServerStats {
    /// Count a finished connection.
    pub fn record(&self, outcome: Outcome) {
        let counter = match outcome {
            Outcome::Responded(status) => match status.as_u16() {
                200..=399 => &self.ok,
                400..=499 => &self.client_errors,
                _ => &self.server_errors,
            },
            Outcome::ClientClosed => &self.client_closed,
            Outcome::TimedOut => &self.timed_out,
        };
        counter.fetch_add(1, Ordering::Relaxed);
    }

    /// Count a connection dropped because of an I/O failure.
    pub fn record_aborted(&self) {
        self.aborted.fetch_add(1, Ordering::Relaxed);
    }

    pub fn snapshot(&self) -> StatsSnapshot {
        StatsSnapshot {
            ok: self.ok.load(Ordering::Relaxed),
            client_errors: self.client_errors.load(Ordering::Relaxed),
            server_errors: self.server_errors.load(Ordering::Relaxed),
            client_closed: self.client_closed.load(Ordering::Relaxed),
            timed_out: self.timed_out.load(Ordering::Relaxed),
            aborted: self.aborted.load(Ordering::Relaxed),
        }
    }
}
