#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

//! # Overview
//!
//! Compression primitives shared by the in-sync database writer/reader
//! (`syncdb`). Each DB sub-stream is independently compressed so that losing
//! one half of a split stream never corrupts the other.
//!
//! # Design
//!
//! The crate provides the [`zlib`] module: a streaming encoder/decoder built
//! on [`flate2`](https://docs.rs/flate2) using raw DEFLATE framing (no zlib
//! header/trailer). The API emphasises incremental processing: callers
//! provide scratch buffers that are filled with compressed or decompressed
//! data while the internal state tracks totals for diagnostics.
//!
//! # Invariants
//!
//! - Encoders never allocate internal output buffers beyond what the
//!   underlying writer requires; all output is written into the
//!   caller-provided sink.
//! - Streams are finalised explicitly via
//!   [`zlib::CountingZlibEncoder::finish`], which emits the trailing bytes
//!   and reports the final compressed length.
//! - Errors from the underlying zlib implementation are surfaced as
//!   [`std::io::Error`] values.
//!
//! # Examples
//!
//! ```
//! use compress::zlib::{CompressionLevel, compress_to_vec, decompress_to_vec};
//!
//! # fn main() -> std::io::Result<()> {
//! let data = b"streaming example payload";
//! let compressed = compress_to_vec(data, CompressionLevel::Default)?;
//! let decompressed = decompress_to_vec(&compressed)?;
//! assert_eq!(decompressed, data);
//! # Ok(())
//! # }
//! ```

mod common;
pub mod zlib;

pub use common::CountingSink;
