//! Process liveness check, the final step of lock-abandonment detection
//! once [`crate::identity`] has narrowed a lock down to "same machine,
//! different process".

/// Whether a process with the given id could be confirmed running.
///
/// Mirrors FreeFileSync's `getProcessStatus`: a reserved or out-of-range
/// pid is reported as [`Liveness::Unknown`] rather than guessed at, and a
/// pid that matches our own is reported separately so callers don't treat
/// their own lock as abandoned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Liveness {
    /// The process is confirmed running.
    Running,
    /// The process is confirmed not running.
    NotRunning,
    /// The pid belongs to the calling process itself.
    ItsUs,
    /// The platform could not determine liveness for this pid.
    Unknown,
}

/// Checks whether `pid` is currently running.
///
/// `pid == 0` or a pid equal to the calling process's own id are handled
/// specially; every other value is checked against the OS process table.
#[must_use]
pub fn process_alive(pid: u32) -> Liveness {
    if pid == std::process::id() {
        return Liveness::ItsUs;
    }
    if pid == 0 {
        return Liveness::Unknown;
    }
    os_process_alive(pid)
}

#[cfg(unix)]
fn os_process_alive(pid: u32) -> Liveness {
    if std::path::Path::new(&format!("/proc/{pid}")).is_dir() {
        return Liveness::Running;
    }
    // /proc is Linux-specific; on other Unixes fall back to signal 0, which
    // reports ESRCH for a dead pid without actually sending a signal.
    match nix::sys::signal::kill(nix::unistd::Pid::from_raw(pid as i32), None) {
        Ok(()) => Liveness::Running,
        Err(nix::errno::Errno::ESRCH) => Liveness::NotRunning,
        Err(_) => Liveness::Unknown,
    }
}

#[cfg(windows)]
fn os_process_alive(pid: u32) -> Liveness {
    use windows::Win32::Foundation::CloseHandle;
    use windows::Win32::System::Threading::{OpenProcess, PROCESS_QUERY_LIMITED_INFORMATION};

    // SAFETY: OpenProcess/CloseHandle are called with a valid access mask
    // and the handle they return (if any) is closed before returning.
    unsafe {
        match OpenProcess(PROCESS_QUERY_LIMITED_INFORMATION, false, pid) {
            Ok(handle) => {
                let _ = CloseHandle(handle);
                Liveness::Running
            }
            Err(_) => Liveness::NotRunning,
        }
    }
}
