use std::fs;
use std::path::{Path, PathBuf};

use filters::HardFilter;
use model::SymlinkPolicy;
use platform::file_id::FileId;

use crate::entry::{DirMeta, FileMeta, SymlinkMeta};
use crate::error::{ErrorDecision, ErrorReporter, TraversalErrorKind, WalkError};
use crate::visitor::{DirAction, Visitor};

/// The capability the traversal layer needs from a filesystem.
///
/// The core never opens, reads, or writes file contents through this
/// interface — content comparison is delegated to a binary-compare helper
/// fed by the categorizer, not to the walker.
pub trait AbstractFs {
    /// Walks `root`, invoking `visitor` for every reachable entry in
    /// depth-first, left-first, sorted-by-name order. `filter` prunes
    /// directories that cannot contain anything in scope, and every file,
    /// symlink, and directory is additionally tested against
    /// [`HardFilter::allows`] before it is reported. `symlink_policy`
    /// decides whether a symlink is reported as itself, stat'ed through to
    /// its target, or skipped entirely.
    ///
    /// Returns an error only if `root` itself cannot be read and the
    /// reporter declines to retry; per-entry and per-subdirectory failures
    /// are reported to `visitor` and do not abort the walk.
    fn traverse(
        &self,
        root: &Path,
        filter: &HardFilter,
        symlink_policy: SymlinkPolicy,
        visitor: &mut dyn Visitor,
        errors: &dyn ErrorReporter,
    ) -> Result<(), WalkError>;

    /// Joins a relative path onto a base directory.
    fn append_relative(&self, base: &Path, relative: &Path) -> PathBuf {
        base.join(relative)
    }

    /// The platform-assigned identity of the file at `path`, if any.
    fn file_id(&self, path: &Path) -> Option<FileId>;
}

/// The real filesystem, via `std::fs`.
#[derive(Debug, Clone, Copy, Default)]
pub struct OsFs;

impl AbstractFs for OsFs {
    fn traverse(
        &self,
        root: &Path,
        filter: &HardFilter,
        symlink_policy: SymlinkPolicy,
        visitor: &mut dyn Visitor,
        errors: &dyn ErrorReporter,
    ) -> Result<(), WalkError> {
        walk_dir(root, Path::new(""), filter, symlink_policy, visitor, errors)
    }

    fn file_id(&self, path: &Path) -> Option<FileId> {
        fs::symlink_metadata(path)
            .ok()
            .and_then(|meta| FileId::from_metadata(&meta))
    }
}

fn read_dir_with_retry(
    absolute: &Path,
    relative: &Path,
    errors: &dyn ErrorReporter,
) -> Result<Option<Vec<fs::DirEntry>>, WalkError> {
    loop {
        match fs::read_dir(absolute) {
            Ok(iter) => {
                let mut entries = Vec::new();
                for entry in iter {
                    match entry {
                        Ok(e) => entries.push(e),
                        Err(source) => {
                            let werr = WalkError {
                                path: relative.to_path_buf(),
                                kind: TraversalErrorKind::ItemRead,
                                source,
                            };
                            if errors.report(&werr) == ErrorDecision::Retry {
                                continue;
                            }
                        }
                    }
                }
                entries.sort_by_key(std::fs::DirEntry::file_name);
                return Ok(Some(entries));
            }
            Err(source) => {
                let werr = WalkError {
                    path: relative.to_path_buf(),
                    kind: TraversalErrorKind::DirRead,
                    source,
                };
                if errors.report(&werr) == ErrorDecision::Retry {
                    continue;
                }
                return Err(werr);
            }
        }
    }
}

fn walk_dir(
    absolute: &Path,
    relative: &Path,
    filter: &HardFilter,
    symlink_policy: SymlinkPolicy,
    visitor: &mut dyn Visitor,
    errors: &dyn ErrorReporter,
) -> Result<(), WalkError> {
    let entries = match read_dir_with_retry(absolute, relative, errors) {
        Ok(Some(entries)) => entries,
        Ok(None) => return Ok(()),
        Err(werr) => {
            visitor.on_dir_error(relative, &werr.source);
            return Ok(());
        }
    };

    for entry in entries {
        let name = entry.file_name();
        if is_sync_artifact(&name) {
            continue;
        }
        let child_relative = relative.join(&name);

        let meta = match entry.metadata() {
            Ok(meta) => meta,
            Err(source) => {
                let werr = WalkError {
                    path: child_relative.clone(),
                    kind: TraversalErrorKind::ItemRead,
                    source,
                };
                if errors.report(&werr) == ErrorDecision::Ignore {
                    visitor.on_item_error(&child_relative, &werr.source);
                }
                continue;
            }
        };

        if meta.file_type().is_symlink() {
            match symlink_policy {
                SymlinkPolicy::Exclude => {}
                SymlinkPolicy::Direct => {
                    if filter.allows(&child_relative, false) {
                        let mtime = mtime_secs(&meta);
                        visitor.on_symlink(&child_relative, &SymlinkMeta { mtime });
                    }
                }
                SymlinkPolicy::Follow => {
                    visit_followed_symlink(&entry.path(), &child_relative, filter, symlink_policy, visitor, errors)?;
                }
            }
        } else if meta.is_dir() {
            if !filter.sub_items_might_match(&child_relative) {
                continue;
            }
            if !filter.allows(&child_relative, true) {
                continue;
            }
            let action = visitor.on_directory(&child_relative, &DirMeta { followed_symlink: false });
            if action == DirAction::Descend {
                let child_absolute = entry.path();
                walk_dir(&child_absolute, &child_relative, filter, symlink_policy, visitor, errors)?;
            }
        } else {
            if !filter.allows(&child_relative, false) {
                continue;
            }
            let file_id = FileId::from_metadata(&meta);
            visitor.on_file(
                &child_relative,
                &FileMeta {
                    mtime: mtime_secs(&meta),
                    size: meta.len(),
                    file_id,
                    followed_symlink: false,
                },
            );
        }
    }

    Ok(())
}

/// Resolves a "follow" symlink to its target and reports it as the
/// file/directory it points to (§4.4). A target that cannot be stat'ed
/// (broken link, or a cycle the OS itself refuses to resolve) is offered to
/// `errors` as an item-read failure, same as any other unreadable entry.
fn visit_followed_symlink(
    absolute: &Path,
    relative: &Path,
    filter: &HardFilter,
    symlink_policy: SymlinkPolicy,
    visitor: &mut dyn Visitor,
    errors: &dyn ErrorReporter,
) -> Result<(), WalkError> {
    let target_meta = match fs::metadata(absolute) {
        Ok(meta) => meta,
        Err(source) => {
            let werr = WalkError {
                path: relative.to_path_buf(),
                kind: TraversalErrorKind::ItemRead,
                source,
            };
            if errors.report(&werr) == ErrorDecision::Ignore {
                visitor.on_item_error(relative, &werr.source);
            }
            return Ok(());
        }
    };

    if target_meta.is_dir() {
        if !filter.sub_items_might_match(relative) || !filter.allows(relative, true) {
            return Ok(());
        }
        let action = visitor.on_directory(relative, &DirMeta { followed_symlink: true });
        if action == DirAction::Descend {
            walk_dir(absolute, relative, filter, symlink_policy, visitor, errors)?;
        }
    } else if filter.allows(relative, false) {
        let file_id = FileId::from_metadata(&target_meta);
        visitor.on_file(
            relative,
            &FileMeta {
                mtime: mtime_secs(&target_meta),
                size: target_meta.len(),
                file_id,
                followed_symlink: true,
            },
        );
    }

    Ok(())
}

/// Database and lock-file artifacts never enter the paired tree, on
/// either side, regardless of which filter rules are in effect.
const SYNC_ARTIFACT_SUFFIXES: [&str; 2] = [".twinsync_db", ".twinsync_lock"];

fn is_sync_artifact(name: &std::ffi::OsStr) -> bool {
    name.to_str().is_some_and(|name| SYNC_ARTIFACT_SUFFIXES.iter().any(|suffix| name.ends_with(suffix)))
}

fn mtime_secs(meta: &fs::Metadata) -> i64 {
    meta.modified()
        .ok()
        .and_then(|time| time.duration_since(std::time::UNIX_EPOCH).ok())
        .map_or(0, |d| d.as_secs() as i64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AlwaysIgnore;
    use std::path::PathBuf;

    #[derive(Default)]
    struct RecordingVisitor {
        files: Vec<PathBuf>,
        dirs: Vec<PathBuf>,
        symlinks: Vec<PathBuf>,
        item_errors: Vec<PathBuf>,
    }

    impl Visitor for RecordingVisitor {
        fn on_file(&mut self, relative: &Path, _meta: &FileMeta) {
            self.files.push(relative.to_path_buf());
        }

        fn on_symlink(&mut self, relative: &Path, _meta: &SymlinkMeta) {
            self.symlinks.push(relative.to_path_buf());
        }

        fn on_directory(&mut self, relative: &Path, _meta: &DirMeta) -> DirAction {
            self.dirs.push(relative.to_path_buf());
            DirAction::Descend
        }

        fn on_item_error(&mut self, relative: &Path, _source: &std::io::Error) {
            self.item_errors.push(relative.to_path_buf());
        }
    }

    #[test]
    fn visits_files_in_sorted_order() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("b.txt"), b"b").unwrap();
        std::fs::write(dir.path().join("a.txt"), b"a").unwrap();

        let mut visitor = RecordingVisitor::default();
        OsFs
            .traverse(dir.path(), &HardFilter::Null, SymlinkPolicy::Direct, &mut visitor, &AlwaysIgnore)
            .unwrap();

        assert_eq!(visitor.files, vec![PathBuf::from("a.txt"), PathBuf::from("b.txt")]);
    }

    #[test]
    fn prunes_excluded_directory_without_descending() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir(dir.path().join("build")).unwrap();
        std::fs::write(dir.path().join("build/out.bin"), b"x").unwrap();
        std::fs::create_dir(dir.path().join("src")).unwrap();
        std::fs::write(dir.path().join("src/main.rs"), b"x").unwrap();

        let filter = HardFilter::from_masks([], [filters::Mask::new("/build/").unwrap()]);
        let mut visitor = RecordingVisitor::default();
        OsFs.traverse(dir.path(), &filter, SymlinkPolicy::Direct, &mut visitor, &AlwaysIgnore).unwrap();

        assert!(!visitor.dirs.contains(&PathBuf::from("build")));
        assert_eq!(visitor.files, vec![PathBuf::from("src/main.rs")]);
    }

    #[test]
    fn skips_database_and_lock_artifacts_even_though_no_filter_excludes_them() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("keep.txt"), b"x").unwrap();
        std::fs::write(dir.path().join(".sync.twinsync_db"), b"db").unwrap();
        std::fs::write(dir.path().join("sync.twinsync_lock"), b"lock").unwrap();

        let mut visitor = RecordingVisitor::default();
        OsFs
            .traverse(dir.path(), &HardFilter::Null, SymlinkPolicy::Direct, &mut visitor, &AlwaysIgnore)
            .unwrap();

        assert_eq!(visitor.files, vec![PathBuf::from("keep.txt")]);
    }

    #[test]
    fn an_include_mask_excludes_non_matching_files_even_in_an_in_scope_directory() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("main.rs"), b"x").unwrap();
        std::fs::write(dir.path().join("README.txt"), b"x").unwrap();

        let filter = HardFilter::from_masks([filters::Mask::new("*.rs").unwrap()], []);
        let mut visitor = RecordingVisitor::default();
        OsFs.traverse(dir.path(), &filter, SymlinkPolicy::Direct, &mut visitor, &AlwaysIgnore).unwrap();

        assert_eq!(visitor.files, vec![PathBuf::from("main.rs")]);
    }

    #[test]
    fn a_file_level_exclude_mask_removes_a_matching_file_without_touching_its_siblings() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("keep.txt"), b"x").unwrap();
        std::fs::write(dir.path().join("scratch.tmp"), b"x").unwrap();

        let filter = HardFilter::from_masks([], [filters::Mask::new("*.tmp").unwrap()]);
        let mut visitor = RecordingVisitor::default();
        OsFs.traverse(dir.path(), &filter, SymlinkPolicy::Direct, &mut visitor, &AlwaysIgnore).unwrap();

        assert_eq!(visitor.files, vec![PathBuf::from("keep.txt")]);
    }

    #[cfg(unix)]
    #[test]
    fn exclude_policy_never_reports_a_symlink() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("target.txt"), b"x").unwrap();
        std::os::unix::fs::symlink(dir.path().join("target.txt"), dir.path().join("link")).unwrap();

        let mut visitor = RecordingVisitor::default();
        OsFs
            .traverse(dir.path(), &HardFilter::Null, SymlinkPolicy::Exclude, &mut visitor, &AlwaysIgnore)
            .unwrap();

        assert!(visitor.symlinks.is_empty());
        assert_eq!(visitor.files, vec![PathBuf::from("target.txt")]);
    }

    #[cfg(unix)]
    #[test]
    fn direct_policy_reports_a_symlink_as_itself() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("target.txt"), b"x").unwrap();
        std::os::unix::fs::symlink(dir.path().join("target.txt"), dir.path().join("link")).unwrap();

        let mut visitor = RecordingVisitor::default();
        OsFs
            .traverse(dir.path(), &HardFilter::Null, SymlinkPolicy::Direct, &mut visitor, &AlwaysIgnore)
            .unwrap();

        assert_eq!(visitor.symlinks, vec![PathBuf::from("link")]);
        assert!(visitor.files.iter().all(|f| f != Path::new("link")));
    }

    #[cfg(unix)]
    #[test]
    fn follow_policy_reports_a_symlink_to_a_file_as_the_file_it_points_to() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("target.txt"), b"x").unwrap();
        std::os::unix::fs::symlink(dir.path().join("target.txt"), dir.path().join("link")).unwrap();

        let mut visitor = RecordingVisitor::default();
        OsFs
            .traverse(dir.path(), &HardFilter::Null, SymlinkPolicy::Follow, &mut visitor, &AlwaysIgnore)
            .unwrap();

        assert!(visitor.symlinks.is_empty());
        assert!(visitor.files.contains(&PathBuf::from("link")));
    }

    #[cfg(unix)]
    #[test]
    fn follow_policy_reports_a_dangling_symlink_as_an_item_error() {
        let dir = tempfile::tempdir().unwrap();
        std::os::unix::fs::symlink(dir.path().join("missing.txt"), dir.path().join("broken")).unwrap();

        let mut visitor = RecordingVisitor::default();
        OsFs
            .traverse(dir.path(), &HardFilter::Null, SymlinkPolicy::Follow, &mut visitor, &AlwaysIgnore)
            .unwrap();

        assert!(visitor.files.is_empty());
        assert_eq!(visitor.item_errors, vec![PathBuf::from("broken")]);
    }
}
