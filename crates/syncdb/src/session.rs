//! Header, format version, and the session-GUID-keyed map of opaque byte
//! streams that each per-side database file actually stores on disk.

use indexmap::IndexMap;
use uuid::Uuid;

use crate::error::SyncDbError;
use crate::wire::{ByteReader, ByteWriter};

const FORMAT_TAG: &[u8] = b"TwinSyncDB";
const FORMAT_VERSION: i32 = 1;

/// Serializes a side's session map into the bytes written to its database
/// file: tag, version, then each `(session GUID, opaque stream)` pair.
#[must_use]
pub fn serialize_sessions(sessions: &IndexMap<Uuid, Vec<u8>>) -> Vec<u8> {
    let mut w = ByteWriter::new();
    w.write_bytes(FORMAT_TAG);
    w.write_i32(FORMAT_VERSION);
    w.write_u32(u32::try_from(sessions.len()).unwrap_or(u32::MAX));
    for (guid, stream) in sessions {
        w.write_bytes(guid.as_bytes());
        w.write_u32(u32::try_from(stream.len()).unwrap_or(u32::MAX));
        w.write_bytes(stream);
    }
    w.into_vec()
}

/// Reverses [`serialize_sessions`].
///
/// # Errors
/// Returns [`SyncDbError::Corrupt`] if the tag or a GUID is malformed, or
/// the stream is truncated; [`SyncDbError::IncompatibleVersion`] if the
/// format version does not match what this build writes.
pub fn deserialize_sessions(bytes: &[u8]) -> Result<IndexMap<Uuid, Vec<u8>>, SyncDbError> {
    let mut r = ByteReader::new(bytes);
    let tag = r.read_bytes(FORMAT_TAG.len())?;
    if tag != FORMAT_TAG {
        return Err(SyncDbError::Corrupt { reason: "missing or unrecognized header tag".to_string() });
    }
    let version = r.read_i32()?;
    if version != FORMAT_VERSION {
        return Err(SyncDbError::IncompatibleVersion { found: version, expected: FORMAT_VERSION });
    }

    let count = r.read_u32()?;
    let mut sessions = IndexMap::new();
    for _ in 0..count {
        let guid_bytes = r.read_bytes(16)?;
        let guid = Uuid::from_slice(guid_bytes).map_err(|error| SyncDbError::Corrupt { reason: error.to_string() })?;
        let len = r.read_u32()? as usize;
        let stream = r.read_bytes(len)?.to_vec();
        sessions.insert(guid, stream);
    }
    Ok(sessions)
}
