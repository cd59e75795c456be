use model::{Direction, FileDescriptor, SymlinkDescriptor};

use crate::db::{DbFileEntry, DbLookup, DbSymlinkEntry};

/// How one side of a pair has moved since the database's last-known-in-sync
/// snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SideChange {
    Unchanged,
    Changed,
    Deleted,
}

/// Mtime tolerance parameters, mirroring the ones `compare` uses, so the
/// database comparison agrees with the categorizer about what counts as
/// "the same timestamp".
#[derive(Debug, Clone, Copy)]
pub struct ToleranceConfig<'a> {
    /// Seconds of mtime drift to ignore outright.
    pub tolerance_secs: i64,
    /// Additional whole-minute shifts (e.g. DST, FAT rounding) to also
    /// treat as equal.
    pub ignored_time_shifts_minutes: &'a [i64],
}

fn times_equal(left: i64, right: i64, tolerance: ToleranceConfig<'_>) -> bool {
    let diff = (left - right).abs();
    if diff <= tolerance.tolerance_secs {
        return true;
    }
    tolerance.ignored_time_shifts_minutes.iter().any(|shift_minutes| {
        let shift_secs = shift_minutes.abs() * 60;
        (diff - shift_secs).abs() <= tolerance.tolerance_secs
    })
}

fn classify_file_side(current: Option<&FileDescriptor>, db: &FileDescriptor, tolerance: ToleranceConfig<'_>) -> SideChange {
    let Some(current) = current else {
        return SideChange::Deleted;
    };
    if let (Some(current_id), Some(db_id)) = (current.file_id, db.file_id) {
        if current_id != db_id {
            return SideChange::Changed;
        }
    }
    if current.size == db.size && times_equal(current.mtime, db.mtime, tolerance) {
        SideChange::Unchanged
    } else {
        SideChange::Changed
    }
}

fn classify_symlink_side(current: Option<&SymlinkDescriptor>, db: &SymlinkDescriptor, tolerance: ToleranceConfig<'_>) -> SideChange {
    let Some(current) = current else {
        return SideChange::Deleted;
    };
    if times_equal(current.mtime, db.mtime, tolerance) {
        SideChange::Unchanged
    } else {
        SideChange::Changed
    }
}

/// Step A's "two-way (DB)" column, worked out for one pair (§4.5).
///
/// Returns the resolved direction and, for the `changed`/`changed` cell,
/// a conflict description (I2: a `Some` description forces the caller to
/// record `Direction::None`, which this function already returns in that
/// case).
fn direction_from_changes(left: SideChange, right: SideChange) -> (Direction, Option<String>) {
    use SideChange::{Changed, Deleted, Unchanged};
    match (left, right) {
        (Unchanged, Unchanged) => (Direction::None, None),
        (Unchanged, Changed) => (Direction::Left, None),
        (Unchanged, Deleted) => (Direction::Left, None),
        (Changed, Unchanged) => (Direction::Right, None),
        (Changed, Changed) => (
            Direction::None,
            Some("both sides changed since last synchronization".to_owned()),
        ),
        (Changed, Deleted) => (Direction::Right, None),
        (Deleted, Unchanged) => (Direction::Right, None),
        (Deleted, Changed) => (Direction::Left, None),
        (Deleted, Deleted) => (Direction::None, None),
    }
}

/// Resolves the two-way direction for a file pair (§4.5 "Two-way
/// (database-derived) direction").
#[must_use]
pub fn two_way_file_direction(
    relative_path: &str,
    left: Option<&FileDescriptor>,
    right: Option<&FileDescriptor>,
    db: &dyn DbLookup,
    tolerance: ToleranceConfig<'_>,
) -> (Direction, Option<String>) {
    match db.file(relative_path) {
        None => direction_for_unrecorded_pair(left.is_some(), right.is_some()),
        Some(DbFileEntry { left: db_left, right: db_right }) => {
            let left_change = classify_file_side(left, &db_left, tolerance);
            let right_change = classify_file_side(right, &db_right, tolerance);
            direction_from_changes(left_change, right_change)
        }
    }
}

/// Resolves the two-way direction for a symlink pair.
#[must_use]
pub fn two_way_symlink_direction(
    relative_path: &str,
    left: Option<&SymlinkDescriptor>,
    right: Option<&SymlinkDescriptor>,
    db: &dyn DbLookup,
    tolerance: ToleranceConfig<'_>,
) -> (Direction, Option<String>) {
    match db.symlink(relative_path) {
        None => direction_for_unrecorded_pair(left.is_some(), right.is_some()),
        Some(DbSymlinkEntry { left: db_left, right: db_right }) => {
            let left_change = classify_symlink_side(left, &db_left, tolerance);
            let right_change = classify_symlink_side(right, &db_right, tolerance);
            direction_from_changes(left_change, right_change)
        }
    }
}

/// §4.5 point 2: absent from the DB entirely, every side's presence is
/// "new". A one-sided pair propagates towards the missing side; a pair
/// present (and differing) on both sides with no record of ever being in
/// sync has nothing to adjudicate it and is a conflict.
fn direction_for_unrecorded_pair(left_exists: bool, right_exists: bool) -> (Direction, Option<String>) {
    match (left_exists, right_exists) {
        (true, false) => (Direction::Right, None),
        (false, true) => (Direction::Left, None),
        _ => (
            Direction::None,
            Some("no record of a previous synchronized state".to_owned()),
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::EmptyDb;

    fn descriptor(mtime: i64, size: u64) -> FileDescriptor {
        FileDescriptor { mtime, size, file_id: None, followed_symlink: false }
    }

    fn tolerance() -> ToleranceConfig<'static> {
        ToleranceConfig { tolerance_secs: 2, ignored_time_shifts_minutes: &[] }
    }

    struct FixedDb(DbFileEntry);
    impl DbLookup for FixedDb {
        fn file(&self, _relative_path: &str) -> Option<DbFileEntry> {
            Some(self.0)
        }
        fn symlink(&self, _relative_path: &str) -> Option<DbSymlinkEntry> {
            None
        }
        fn file_id(&self, _relative_path: &str, _side: model::Side) -> Option<platform::file_id::FileId> {
            None
        }
    }

    #[test]
    fn right_side_deletion_propagates_left_to_right() {
        let db = FixedDb(DbFileEntry { left: descriptor(100, 5), right: descriptor(100, 5) });
        let (direction, conflict) =
            two_way_file_direction("x.txt", Some(&descriptor(100, 5)), None, &db, tolerance());
        assert_eq!(direction, Direction::Left);
        assert!(conflict.is_none());
    }

    #[test]
    fn both_sides_changed_is_a_conflict() {
        let db = FixedDb(DbFileEntry { left: descriptor(50, 5), right: descriptor(50, 5) });
        let (direction, conflict) =
            two_way_file_direction("y.txt", Some(&descriptor(90, 5)), Some(&descriptor(90, 7)), &db, tolerance());
        assert_eq!(direction, Direction::None);
        assert!(conflict.unwrap().contains("both sides changed"));
    }

    #[test]
    fn new_left_only_pair_with_no_db_record_propagates_right() {
        let (direction, conflict) =
            two_way_file_direction("new.txt", Some(&descriptor(0, 1)), None, &EmptyDb, tolerance());
        assert_eq!(direction, Direction::Right);
        assert!(conflict.is_none());
    }

    #[test]
    fn both_sides_present_with_no_db_record_is_a_conflict() {
        let (direction, conflict) = two_way_file_direction(
            "both.txt",
            Some(&descriptor(0, 1)),
            Some(&descriptor(0, 2)),
            &EmptyDb,
            tolerance(),
        );
        assert_eq!(direction, Direction::None);
        assert!(conflict.is_some());
    }
}
