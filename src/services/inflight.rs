//! In-flight request tracking
//!
//! Every backend call issued by a view goes through a single-slot tracker.
//! The view keeps the receiving half of a oneshot channel; whoever executes
//! the request gets the sending half wrapped in a [`Ticket`]. Replacing the
//! receiver drops the old one, so a superseded request can still finish on
//! the backend but its result has nowhere to land.

use crate::api::{ClientError, ClientResult};
use std::fmt;
use tokio::sync::oneshot;

/// Completion half of an in-flight request
pub struct Ticket<T> {
    generation: u64,
    tx: oneshot::Sender<ClientResult<T>>,
}

impl<T> Ticket<T> {
    /// Generation of the tracker slot this ticket was issued from
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Whether the view stopped waiting for this result
    pub fn is_superseded(&self) -> bool {
        self.tx.is_closed()
    }

    /// Deliver the result; returns false when it was discarded
    pub fn complete(self, result: ClientResult<T>) -> bool {
        self.tx.send(result).is_ok()
    }
}

impl<T> fmt::Debug for Ticket<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Ticket")
            .field("generation", &self.generation)
            .field("superseded", &self.is_superseded())
            .finish()
    }
}

/// Single-slot tracker for one kind of request
///
/// Mutations use [`InFlight::start`], which refuses while a request is
/// pending. Reads use [`InFlight::restart`], which supersedes the pending
/// request.
pub struct InFlight<T> {
    rx: Option<oneshot::Receiver<ClientResult<T>>>,
    generation: u64,
}

impl<T> Default for InFlight<T> {
    fn default() -> Self {
        Self {
            rx: None,
            generation: 0,
        }
    }
}

impl<T> fmt::Debug for InFlight<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InFlight")
            .field("pending", &self.is_pending())
            .field("generation", &self.generation)
            .finish()
    }
}

impl<T> InFlight<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_pending(&self) -> bool {
        self.rx.is_some()
    }

    /// Number of tickets issued so far
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Issue a ticket unless a request is already pending
    pub fn start(&mut self) -> Option<Ticket<T>> {
        if self.is_pending() {
            return None;
        }
        Some(self.issue())
    }

    /// Issue a ticket, discarding whatever was pending
    pub fn restart(&mut self) -> Ticket<T> {
        if self.is_pending() {
            tracing::debug!(
                "Superseding in-flight request (generation {})",
                self.generation
            );
        }
        self.issue()
    }

    /// Stop waiting for the pending request
    pub fn cancel(&mut self) {
        self.rx = None;
    }

    fn issue(&mut self) -> Ticket<T> {
        let (tx, rx) = oneshot::channel();
        self.generation += 1;
        self.rx = Some(rx);
        Ticket {
            generation: self.generation,
            tx,
        }
    }

    /// Take the result if the pending request has settled
    pub fn poll(&mut self) -> Option<ClientResult<T>> {
        let rx = self.rx.as_mut()?;
        match rx.try_recv() {
            Ok(result) => {
                self.rx = None;
                Some(result)
            }
            Err(oneshot::error::TryRecvError::Empty) => None,
            Err(oneshot::error::TryRecvError::Closed) => {
                self.rx = None;
                Some(Err(ClientError::Unknown(
                    "request was dropped before completing".to_string(),
                )))
            }
        }
    }
}

/// State of a panel backed by a read
#[derive(Debug, Clone, PartialEq)]
pub enum Loadable<T> {
    Idle,
    Loading,
    Ready(T),
    /// Generic retry prompt; the panel stays usable
    Failed(String),
}

impl<T> Default for Loadable<T> {
    fn default() -> Self {
        Loadable::Idle
    }
}

impl<T> Loadable<T> {
    pub fn ready(&self) -> Option<&T> {
        match self {
            Loadable::Ready(value) => Some(value),
            _ => None,
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, Loadable::Loading)
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            Loadable::Failed(msg) => Some(msg),
            _ => None,
        }
    }

    /// Store a settled result
    pub fn apply(&mut self, result: ClientResult<T>) {
        *self = match result {
            Ok(value) => Loadable::Ready(value),
            Err(e) => Loadable::Failed(e.user_message()),
        };
    }
}
