//! Lock file payload: who created the lock, encoded as a small fixed
//! layout so a lock file written on one architecture reads back correctly
//! on another. Grounded on `LockInformation`'s own serialization in
//! `dir_lock.cpp` (`writeLockInfo`/`retrieveLockInfo`), including that
//! struct's choice to widen the process id to a 64-bit field for
//! portability even though no real OS hands out pids that large.

use platform::identity::{current_process_identity, ProcessIdentity};
use uuid::Uuid;

use crate::error::DirLockError;

const FORMAT_TAG: &[u8] = b"TwinSyncLock";
const FORMAT_VERSION: i32 = 1;

/// Contents of a lock file: a unique id for this particular hold, and the
/// identity of the process that wrote it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LockPayload {
    /// Identifies this specific lock hold, independent of the file path —
    /// used to tell "still the same lock" apart from "someone deleted and
    /// recreated it" during re-verification.
    pub lock_id: Uuid,
    /// Who created the lock.
    pub identity: ProcessIdentity,
}

impl LockPayload {
    /// Builds a fresh payload for a lock this process is about to create.
    pub fn for_current_process() -> Result<Self, DirLockError> {
        Ok(Self { lock_id: Uuid::new_v4(), identity: current_process_identity()? })
    }

    /// Encodes this payload as bytes suitable for writing to a lock file.
    #[must_use]
    pub fn encode(&self) -> Vec<u8> {
        let mut buf = Vec::new();
        buf.extend_from_slice(FORMAT_TAG);
        buf.extend_from_slice(&FORMAT_VERSION.to_le_bytes());
        buf.extend_from_slice(self.lock_id.as_bytes());
        write_string(&mut buf, &self.identity.host);
        write_string(&mut buf, &self.identity.user);
        write_string(&mut buf, &self.identity.session);
        buf.extend_from_slice(&u64::from(self.identity.process_id).to_le_bytes());
        buf
    }

    /// Decodes a payload previously written by [`Self::encode`].
    pub fn decode(bytes: &[u8]) -> Result<Self, DirLockError> {
        let mut cursor = Cursor::new(bytes);
        let tag = cursor.take(FORMAT_TAG.len())?;
        if tag != FORMAT_TAG {
            return Err(DirLockError::Corrupt { reason: "bad format tag".to_owned() });
        }
        let version = i32::from_le_bytes(cursor.take(4)?.try_into().expect("take(4) yields 4 bytes"));
        if version != FORMAT_VERSION {
            return Err(DirLockError::IncompatibleVersion { found: version, expected: FORMAT_VERSION });
        }
        let lock_id = Uuid::from_slice(cursor.take(16)?).map_err(|error| DirLockError::Corrupt { reason: error.to_string() })?;
        let host = read_string(&mut cursor)?;
        let user = read_string(&mut cursor)?;
        let session = read_string(&mut cursor)?;
        let process_id = u64::from_le_bytes(cursor.take(8)?.try_into().expect("take(8) yields 8 bytes"));
        let process_id = u32::try_from(process_id).unwrap_or(u32::MAX);
        Ok(Self { lock_id, identity: ProcessIdentity { host, user, session, process_id } })
    }
}

fn write_string(buf: &mut Vec<u8>, value: &str) {
    buf.extend_from_slice(&u32::try_from(value.len()).unwrap_or(u32::MAX).to_le_bytes());
    buf.extend_from_slice(value.as_bytes());
}

fn read_string(cursor: &mut Cursor<'_>) -> Result<String, DirLockError> {
    let len = u32::from_le_bytes(cursor.take(4)?.try_into().expect("take(4) yields 4 bytes")) as usize;
    let bytes = cursor.take(len)?;
    String::from_utf8(bytes.to_vec()).map_err(|error| DirLockError::Corrupt { reason: error.to_string() })
}

struct Cursor<'a> {
    buf: &'a [u8],
    pos: usize,
}

impl<'a> Cursor<'a> {
    const fn new(buf: &'a [u8]) -> Self {
        Self { buf, pos: 0 }
    }

    fn take(&mut self, len: usize) -> Result<&'a [u8], DirLockError> {
        let end = self.pos.checked_add(len).filter(|&end| end <= self.buf.len()).ok_or_else(|| {
            DirLockError::Corrupt { reason: format!("expected {len} more bytes, found {}", self.buf.len() - self.pos) }
        })?;
        let slice = &self.buf[self.pos..end];
        self.pos = end;
        Ok(slice)
    }
}
