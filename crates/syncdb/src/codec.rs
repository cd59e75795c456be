//! Splits an [`InSyncDir`] tree into three sub-streams (`left`, `right`,
//! `both`), compresses each independently, then distributes the bytes so
//! that losing either side's database file still leaves the other side
//! with roughly half of the shared data (§4.6).

use compress::zlib::{compress_to_vec, decompress_to_vec, CompressionLevel};
use indexmap::IndexMap;

use crate::error::SyncDbError;
use crate::record::{DirStatus, FileRecord, InSyncDir, InSyncFile, InSyncSymlink, InSyncType, LinkRecord};
use crate::wire::{ByteReader, ByteWriter};

/// Encodes a tree into the pair of byte streams written to the left and
/// right database files.
///
/// # Errors
/// Returns an error if compression fails (only possible on allocation
/// failure; `flate2` itself does not reject any input this crate produces).
pub fn encode_dir(root: &InSyncDir) -> Result<(Vec<u8>, Vec<u8>), SyncDbError> {
    let mut left = ByteWriter::new();
    let mut right = ByteWriter::new();
    let mut both = ByteWriter::new();
    write_dir(root, &mut left, &mut right, &mut both);

    let left_raw = left.into_vec();
    let right_raw = right.into_vec();
    let both_raw = both.into_vec();

    let left_compressed = compress_to_vec(&left_raw, CompressionLevel::Default)?;
    let right_compressed = compress_to_vec(&right_raw, CompressionLevel::Default)?;
    let both_compressed = compress_to_vec(&both_raw, CompressionLevel::Default)?;

    let split = both_compressed.len() / 2;
    let (both_first, both_second) = both_compressed.split_at(split);

    let mut out_left = ByteWriter::new();
    out_left.write_u32(u32::try_from(both_compressed.len()).unwrap_or(u32::MAX));
    out_left.write_bytes(both_first);
    out_left.write_u32(u32::try_from(left_compressed.len()).unwrap_or(u32::MAX));
    out_left.write_bytes(&left_compressed);

    let mut out_right = ByteWriter::new();
    out_right.write_u32(u32::try_from(both_compressed.len()).unwrap_or(u32::MAX));
    out_right.write_bytes(both_second);
    out_right.write_u32(u32::try_from(right_compressed.len()).unwrap_or(u32::MAX));
    out_right.write_bytes(&right_compressed);

    Ok((out_left.into_vec(), out_right.into_vec()))
}

/// Reverses [`encode_dir`]. Both streams are required: this crate has no
/// way to reconstruct a tree from only one side's half of `both`.
///
/// # Errors
/// Returns [`SyncDbError::Corrupt`] if either stream is truncated, the two
/// `both`-length prefixes disagree, or a tag byte does not match a known
/// variant.
pub fn decode_dir(left_stream: &[u8], right_stream: &[u8]) -> Result<InSyncDir, SyncDbError> {
    let mut left_reader = ByteReader::new(left_stream);
    let both_len = left_reader.read_u32()? as usize;
    let left_half_len = half_len(both_len, true);
    let both_first = left_reader.read_bytes(left_half_len)?.to_vec();
    let left_compressed_len = left_reader.read_u32()? as usize;
    let left_raw = decompress_to_vec(left_reader.read_bytes(left_compressed_len)?)?;

    let mut right_reader = ByteReader::new(right_stream);
    let both_len_from_right = right_reader.read_u32()? as usize;
    if both_len_from_right != both_len {
        return Err(SyncDbError::Corrupt {
            reason: format!("left and right disagree on shared-stream length: {both_len} vs {both_len_from_right}"),
        });
    }
    let right_half_len = half_len(both_len, false);
    let both_second = right_reader.read_bytes(right_half_len)?;
    let right_compressed_len = right_reader.read_u32()? as usize;
    let right_raw = decompress_to_vec(right_reader.read_bytes(right_compressed_len)?)?;

    let mut both_compressed = both_first;
    both_compressed.extend_from_slice(both_second);
    let both_raw = decompress_to_vec(&both_compressed)?;

    let mut left_r = ByteReader::new(&left_raw);
    let mut right_r = ByteReader::new(&right_raw);
    let mut both_r = ByteReader::new(&both_raw);
    read_dir(&mut left_r, &mut right_r, &mut both_r)
}

fn half_len(total: usize, first_half: bool) -> usize {
    let split = total / 2;
    if first_half {
        split
    } else {
        total - split
    }
}

fn write_dir(dir: &InSyncDir, left: &mut ByteWriter, right: &mut ByteWriter, both: &mut ByteWriter) {
    both.write_u32(u32::try_from(dir.files.len()).unwrap_or(u32::MAX));
    for (name, file) in &dir.files {
        both.write_string(name);
        both.write_bool(file.sync_type == InSyncType::BinaryEqual);
        both.write_u64(file.size);
        write_file_record(left, &file.left);
        write_file_record(right, &file.right);
    }

    both.write_u32(u32::try_from(dir.symlinks.len()).unwrap_or(u32::MAX));
    for (name, link) in &dir.symlinks {
        both.write_string(name);
        left.write_i64(link.left.mtime);
        right.write_i64(link.right.mtime);
    }

    both.write_u32(u32::try_from(dir.dirs.len()).unwrap_or(u32::MAX));
    for (name, child) in &dir.dirs {
        both.write_string(name);
        both.write_bool(child.status == DirStatus::StrawMan);
        write_dir(child, left, right, both);
    }
}

fn write_file_record(w: &mut ByteWriter, record: &FileRecord) {
    w.write_i64(record.mtime);
    match record.file_id {
        Some(id) => {
            let (device, inode) = id.as_raw();
            w.write_bool(true);
            w.write_u64(device);
            w.write_u64(inode);
        }
        None => {
            w.write_bool(false);
            w.write_u64(0);
            w.write_u64(0);
        }
    }
}

fn read_file_record(r: &mut ByteReader<'_>) -> Result<FileRecord, SyncDbError> {
    let mtime = r.read_i64()?;
    let has_id = r.read_bool()?;
    let device = r.read_u64()?;
    let inode = r.read_u64()?;
    let file_id = has_id.then(|| platform::file_id::FileId::from_raw(device, inode));
    Ok(FileRecord { mtime, file_id })
}

fn read_dir(left: &mut ByteReader<'_>, right: &mut ByteReader<'_>, both: &mut ByteReader<'_>) -> Result<InSyncDir, SyncDbError> {
    let mut dir = InSyncDir::new(DirStatus::InSync);

    let file_count = both.read_u32()?;
    let mut files = IndexMap::new();
    for _ in 0..file_count {
        let name = both.read_string()?;
        let binary_equal = both.read_bool()?;
        let size = both.read_u64()?;
        let left_record = read_file_record(left)?;
        let right_record = read_file_record(right)?;
        files.insert(
            name,
            InSyncFile {
                left: left_record,
                right: right_record,
                sync_type: if binary_equal { InSyncType::BinaryEqual } else { InSyncType::AttributesEqual },
                size,
            },
        );
    }
    dir.files = files;

    let symlink_count = both.read_u32()?;
    let mut symlinks = IndexMap::new();
    for _ in 0..symlink_count {
        let name = both.read_string()?;
        let left_mtime = left.read_i64()?;
        let right_mtime = right.read_i64()?;
        symlinks.insert(
            name,
            InSyncSymlink {
                left: LinkRecord { mtime: left_mtime },
                right: LinkRecord { mtime: right_mtime },
            },
        );
    }
    dir.symlinks = symlinks;

    let dir_count = both.read_u32()?;
    let mut dirs = IndexMap::new();
    for _ in 0..dir_count {
        let name = both.read_string()?;
        let is_straw_man = both.read_bool()?;
        let mut child = read_dir(left, right, both)?;
        child.status = if is_straw_man { DirStatus::StrawMan } else { DirStatus::InSync };
        dirs.insert(name, child);
    }
    dir.dirs = dirs;

    Ok(dir)
}
