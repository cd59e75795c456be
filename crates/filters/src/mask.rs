use std::path::Path;

use globset::{Glob, GlobMatcher};
use thiserror::Error;

/// A single compiled include/exclude glob mask.
///
/// Mask syntax: `*` matches any sequence of characters including empty,
/// `?` matches exactly one character. A mask with no `/` matches the short
/// name at any depth in the tree; a mask containing `/` is anchored to the
/// base directory (a leading `/` is stripped before compiling and has no
/// further effect). A trailing `/` restricts the mask to directories only.
#[derive(Debug, Clone)]
pub struct Mask {
    matcher: GlobMatcher,
    directory_only: bool,
    source: String,
}

/// A mask string that failed to compile as a glob.
#[derive(Debug, Error)]
#[error("invalid filter mask {pattern:?}: {source}")]
pub struct MaskError {
    pattern: String,
    #[source]
    source: globset::Error,
}

impl Mask {
    /// Compiles a mask string.
    pub fn new(pattern: &str) -> Result<Self, MaskError> {
        let directory_only = pattern.ends_with('/') && pattern != "/";
        let trimmed = pattern.strip_suffix('/').unwrap_or(pattern);
        let anchored = trimmed.contains('/');
        let body = trimmed.strip_prefix('/').unwrap_or(trimmed);

        let glob_text = if anchored || body.is_empty() {
            body.to_owned()
        } else {
            format!("**/{body}")
        };

        let glob = Glob::new(&glob_text).map_err(|source| MaskError {
            pattern: pattern.to_owned(),
            source,
        })?;

        Ok(Self {
            matcher: glob.compile_matcher(),
            directory_only,
            source: pattern.to_owned(),
        })
    }

    /// Whether this mask can match a directory at all — used by
    /// [`crate::HardFilter::sub_items_might_match`] to decide if anything
    /// below an excluded directory could still be reachable via a
    /// directory-only mask one level down.
    #[must_use]
    pub fn directory_only(&self) -> bool {
        self.directory_only
    }

    /// Tests `relative_path` (forward-slash separated, relative to the base
    /// directory) against the mask.
    #[must_use]
    pub fn is_match(&self, relative_path: &Path, is_dir: bool) -> bool {
        if self.directory_only && !is_dir {
            return false;
        }
        self.matcher.is_match(relative_path)
    }

    /// The original mask text, for diagnostics.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.source
    }
}
