//! Host/user/session/process identity, mirroring the fields FreeFileSync's
//! `dir_lock.cpp` stamps into a lock file to recognize who owns it.

use crate::PlatformError;

/// Identifies the process and login session that created a lock file.
///
/// Two identities are compared field by field, in order, by
/// [`crate::liveness`] callers: `host` and `user` narrow down "is this even
/// plausibly us", `session` narrows down "same login, or a stale lock from
/// before a reboot", and `process_id` is the final pid liveness check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessIdentity {
    /// Hostname, used to tell locks from a different machine on a shared
    /// filesystem apart from locks on this one.
    pub host: String,
    /// Platform user identifier (uid on Unix, SID string on Windows).
    pub user: String,
    /// Login session identifier. On Unix this is the session id from
    /// `getsid(0)`, which changes across reboots; a lock whose session id
    /// doesn't match ours but whose host and user do is from a session
    /// that no longer exists.
    pub session: String,
    /// OS process id of the process that wrote the lock.
    pub process_id: u32,
}

/// Reads the identity of the calling process.
pub fn current_process_identity() -> Result<ProcessIdentity, PlatformError> {
    Ok(ProcessIdentity {
        host: hostname()?,
        user: user_id()?,
        session: session_id()?,
        process_id: std::process::id(),
    })
}

#[cfg(unix)]
fn hostname() -> Result<String, PlatformError> {
    let mut buffer = [0u8; 256];
    nix::unistd::gethostname(&mut buffer)
        .map_err(|e| PlatformError::Os {
            call: "gethostname",
            source: std::io::Error::from_raw_os_error(e as i32),
        })
        .map(|name| name.to_string_lossy().into_owned())
}

#[cfg(unix)]
fn user_id() -> Result<String, PlatformError> {
    Ok(nix::unistd::getuid().to_string())
}

#[cfg(unix)]
fn session_id() -> Result<String, PlatformError> {
    nix::unistd::getsid(None)
        .map(|sid| sid.to_string())
        .map_err(|e| PlatformError::Os {
            call: "getsid",
            source: std::io::Error::from_raw_os_error(e as i32),
        })
}

#[cfg(windows)]
fn hostname() -> Result<String, PlatformError> {
    std::env::var("COMPUTERNAME").map_err(|_| PlatformError::Os {
        call: "GetComputerNameExW",
        source: std::io::Error::new(std::io::ErrorKind::NotFound, "COMPUTERNAME unset"),
    })
}

#[cfg(windows)]
fn user_id() -> Result<String, PlatformError> {
    std::env::var("USERNAME").map_err(|_| PlatformError::Os {
        call: "GetUserNameW",
        source: std::io::Error::new(std::io::ErrorKind::NotFound, "USERNAME unset"),
    })
}

#[cfg(windows)]
fn session_id() -> Result<String, PlatformError> {
    // Windows has no equivalent of POSIX session ids that survives process
    // restarts the same way; the login session SID is stable for the
    // lifetime of the login, which is the property we actually need.
    std::env::var("SESSIONNAME").or_else(|_| Ok("default".to_owned()))
}
