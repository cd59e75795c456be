//! Background heartbeat: while a lock is held, periodically appends a byte
//! to the lock file so a waiting process can tell its holder is still
//! alive. Grounded on the `LifeSigns` worker in `dir_lock.cpp`, but
//! redesigned as a cooperative task: the only suspension point is a timed
//! receive on a cancellation channel, never a raw interrupt call, so no
//! platform-specific thread primitive leaks past this module.

use std::fs::OpenOptions;
use std::io::Write;
use std::path::PathBuf;
use std::time::Duration;

use crossbeam_channel::{bounded, Receiver, RecvTimeoutError, Sender};

const EMIT_INTERVAL: Duration = Duration::from_secs(5);

/// Handle for a running heartbeat task. Dropping it cancels the task and
/// waits for it to stop before returning.
pub struct Heartbeat {
    cancel: Sender<()>,
    worker: Option<std::thread::JoinHandle<()>>,
}

impl Heartbeat {
    /// Starts appending one byte to `path` every [`EMIT_INTERVAL`] until
    /// this handle is dropped.
    pub fn start(path: PathBuf) -> Self {
        let (cancel, token) = bounded(0);
        let worker = std::thread::spawn(move || run(&path, &token));
        Self { cancel, worker: Some(worker) }
    }
}

impl Drop for Heartbeat {
    fn drop(&mut self) {
        let _ = self.cancel.send(());
        if let Some(worker) = self.worker.take() {
            let _ = worker.join();
        }
    }
}

fn run(path: &std::path::Path, token: &Receiver<()>) {
    loop {
        match token.recv_timeout(EMIT_INTERVAL) {
            Ok(()) | Err(RecvTimeoutError::Disconnected) => return,
            Err(RecvTimeoutError::Timeout) => emit_life_sign(path),
        }
    }
}

fn emit_life_sign(path: &std::path::Path) {
    if let Ok(mut file) = OpenOptions::new().append(true).open(path) {
        let _ = file.write_all(&[b' ']);
    }
}
