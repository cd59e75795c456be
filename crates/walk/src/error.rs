use std::path::PathBuf;
use std::sync::{Arc, Condvar, Mutex};

use thiserror::Error;

/// Which traversal operation failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TraversalErrorKind {
    /// Reading a directory's contents failed; its subtree is pruned.
    DirRead,
    /// Stat'ing or reading a single entry failed; only that entry is
    /// skipped.
    ItemRead,
}

/// A traversal error, offered to an [`ErrorReporter`] before being recorded.
#[derive(Debug, Error)]
#[error("{kind:?} failed at {path}: {source}")]
pub struct WalkError {
    /// Path relative to the base directory being walked.
    pub path: PathBuf,
    /// Which kind of read failed.
    pub kind: TraversalErrorKind,
    /// Underlying I/O error.
    #[source]
    pub source: std::io::Error,
}

/// The driver's answer to "what should the walk do with this error".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorDecision {
    /// Try the operation again.
    Retry,
    /// Give up and record the error.
    Ignore,
}

/// Funnels traversal errors to a single decision-maker.
///
/// Workers call [`ErrorReporter::report`] and block until a retry/ignore
/// decision comes back, matching the "thread-safe channel with a single
/// consumer" shared-resource policy: every suspendable traversal operation
/// routes through here rather than deciding unilaterally.
pub trait ErrorReporter: Send + Sync {
    /// Reports `error` and returns the decision once one is available.
    fn report(&self, error: &WalkError) -> ErrorDecision;
}

/// An [`ErrorReporter`] that always says ignore — useful for tests and for
/// unattended runs that should never block on a human.
#[derive(Debug, Clone, Copy, Default)]
pub struct AlwaysIgnore;

impl ErrorReporter for AlwaysIgnore {
    fn report(&self, _error: &WalkError) -> ErrorDecision {
        ErrorDecision::Ignore
    }
}

/// An [`ErrorReporter`] backed by a channel and a condition variable: the
/// driver thread receives errors from [`ChannelErrorReporter::inbox`] and
/// answers through [`PendingDecision::resolve`].
pub struct ChannelErrorReporter {
    sender: crossbeam_channel::Sender<PendingDecision>,
    receiver: crossbeam_channel::Receiver<PendingDecision>,
}

impl Default for ChannelErrorReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl ChannelErrorReporter {
    /// Creates a reporter with an unbounded channel.
    #[must_use]
    pub fn new() -> Self {
        let (sender, receiver) = crossbeam_channel::unbounded();
        Self { sender, receiver }
    }

    /// The receiving half the driver thread polls for pending decisions.
    #[must_use]
    pub fn inbox(&self) -> crossbeam_channel::Receiver<PendingDecision> {
        self.receiver.clone()
    }
}

impl ErrorReporter for ChannelErrorReporter {
    fn report(&self, error: &WalkError) -> ErrorDecision {
        let slot = Arc::new((Mutex::new(None), Condvar::new()));
        let pending = PendingDecision {
            path: error.path.clone(),
            kind: error.kind,
            slot: Arc::clone(&slot),
        };
        // Closed channel (driver gone) degrades to ignore rather than
        // hanging a worker forever.
        if self.sender.send(pending).is_err() {
            return ErrorDecision::Ignore;
        }

        let (lock, condvar) = &*slot;
        let mut decision = lock.lock().unwrap_or_else(std::sync::PoisonError::into_inner);
        while decision.is_none() {
            decision = condvar
                .wait(decision)
                .unwrap_or_else(std::sync::PoisonError::into_inner);
        }
        decision.expect("loop invariant: decision is Some after wait returns")
    }
}

/// One error awaiting a retry/ignore decision from the driver.
pub struct PendingDecision {
    /// Path the error occurred at, for display to the driver.
    pub path: PathBuf,
    /// Which kind of read failed.
    pub kind: TraversalErrorKind,
    slot: Arc<(Mutex<Option<ErrorDecision>>, Condvar)>,
}

impl PendingDecision {
    /// Delivers the driver's decision, waking the blocked worker.
    pub fn resolve(self, decision: ErrorDecision) {
        let (lock, condvar) = &*self.slot;
        let mut guard = lock.lock().unwrap_or_else(std::sync::PoisonError::into_inner);
        *guard = Some(decision);
        condvar.notify_one();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    #[test]
    fn always_ignore_never_blocks() {
        let reporter = AlwaysIgnore;
        let error = WalkError {
            path: PathBuf::from("x"),
            kind: TraversalErrorKind::ItemRead,
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "gone"),
        };
        assert_eq!(reporter.report(&error), ErrorDecision::Ignore);
    }

    #[test]
    fn channel_reporter_round_trips_a_decision() {
        let reporter = ChannelErrorReporter::new();
        let inbox = reporter.inbox();

        let driver = thread::spawn(move || {
            let pending = inbox.recv().expect("pending decision");
            assert_eq!(pending.kind, TraversalErrorKind::DirRead);
            pending.resolve(ErrorDecision::Retry);
        });

        let error = WalkError {
            path: PathBuf::from("sub"),
            kind: TraversalErrorKind::DirRead,
            source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        };
        assert_eq!(reporter.report(&error), ErrorDecision::Retry);
        driver.join().unwrap();
    }
}
