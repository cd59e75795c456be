use std::fs::File;
use std::io::{self, BufReader, Read};
use std::path::Path;

/// Decides whether two same-sized files have identical content.
///
/// Injected rather than hard-coded so a caller driving many comparisons
/// concurrently, or one backed by a cache, can supply its own strategy;
/// [`ByteCompare`] is the default used when nothing fancier is needed.
pub trait ContentComparator: Send + Sync {
    /// Returns `Ok(true)` if `left` and `right` have identical content.
    ///
    /// # Errors
    ///
    /// Returns an error if either file cannot be opened or read.
    fn content_equal(&self, left: &Path, right: &Path) -> io::Result<bool>;
}

/// Reads both files in lockstep, chunk by chunk, short-circuiting on the
/// first mismatch.
#[derive(Debug, Default, Clone, Copy)]
pub struct ByteCompare;

const CHUNK: usize = 64 * 1024;

impl ContentComparator for ByteCompare {
    fn content_equal(&self, left: &Path, right: &Path) -> io::Result<bool> {
        let mut left_reader = BufReader::new(File::open(left)?);
        let mut right_reader = BufReader::new(File::open(right)?);
        let mut left_buf = vec![0u8; CHUNK];
        let mut right_buf = vec![0u8; CHUNK];
        loop {
            let left_read = read_fill(&mut left_reader, &mut left_buf)?;
            let right_read = read_fill(&mut right_reader, &mut right_buf)?;
            if left_read != right_read || left_buf[..left_read] != right_buf[..right_read] {
                return Ok(false);
            }
            if left_read == 0 {
                return Ok(true);
            }
        }
    }
}

/// Fills `buf` as far as the reader allows in one call, returning the
/// number of bytes actually read (0 at EOF).
fn read_fill(reader: &mut impl Read, buf: &mut [u8]) -> io::Result<usize> {
    let mut total = 0;
    while total < buf.len() {
        let n = reader.read(&mut buf[total..])?;
        if n == 0 {
            break;
        }
        total += n;
    }
    Ok(total)
}
