//! Categorizes paired items.
//!
//! # Overview
//!
//! [`categorize_base_pair`] walks a [`model::BasePair`]'s tree depth-first
//! and assigns every file, symlink, and folder pair a [`model::Category`]:
//! one of eight closed values describing how the two sides relate. Under
//! [`model::CompareVariant::TimestampAndSize`] this never touches file
//! content; under [`model::CompareVariant::Content`] a same-size pair is
//! read in full through an injected [`ContentComparator`].
//!
//! # Design
//!
//! Each pair is categorized independently — a folder pair's category
//! reflects only its own two sides, never its children's. Promoting or
//! downgrading a folder's eventual operation based on what happened inside
//! it (§4.5's "upgrade delete to create" rule) happens later, in the
//! `resolve` crate's bottom-up pass, once every leaf already has a final
//! category.
//!
//! # Examples
//!
//! ```
//! use compare::{categorize_base_pair, ByteCompare};
//! use filters::HardFilter;
//! use model::{BasePair, CompareVariant, FileDescriptor, SymlinkPolicy};
//! use std::path::PathBuf;
//!
//! let mut base_pair = BasePair::new(
//!     0,
//!     PathBuf::from("/left"),
//!     PathBuf::from("/right"),
//!     HardFilter::Null,
//!     CompareVariant::TimestampAndSize,
//!     SymlinkPolicy::Direct,
//!     2,
//!     Vec::new(),
//! );
//! let descriptor = FileDescriptor { mtime: 0, size: 4, file_id: None, followed_symlink: false };
//! let id = base_pair.insert_file(
//!     None,
//!     "report.txt".to_owned(),
//!     Some("report.txt".to_owned()),
//!     None,
//!     Some(descriptor),
//!     None,
//! );
//!
//! categorize_base_pair(&mut base_pair, &ByteCompare);
//! assert_eq!(base_pair.get(id).unwrap().common().category(), Some(model::Category::LeftOnly));
//! ```

#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

mod categorize;
mod content;

pub use categorize::categorize_base_pair;
pub use content::{ByteCompare, ContentComparator};
