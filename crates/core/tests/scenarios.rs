//! End-to-end coverage of the literal scenarios a single base-pair run must
//! satisfy, driven through [`twinsync_core::engine::run_one`] rather than any one
//! collaborator crate in isolation.

use std::fs;
use std::time::Duration;

use model::{CompareVariant, Operation, SymlinkPolicy};
use resolve::SyncVariant;
use test_support::Pair;
use twinsync_core::config::{BasePairConfig, FilterSpec};
use twinsync_core::engine::run_one;

fn config(pair: &Pair, sync_variant: SyncVariant) -> BasePairConfig {
    BasePairConfig {
        id: 0,
        left_path: pair.left.path().to_path_buf(),
        right_path: pair.right.path().to_path_buf(),
        filter: FilterSpec::default(),
        soft_filter: filters::SoftFilter::accept_all(),
        variant: CompareVariant::Content,
        sync_variant,
        symlink_policy: SymlinkPolicy::Direct,
        tolerance_secs: 2,
        ignored_time_shifts_minutes: Vec::new(),
        use_lock: false,
    }
}

fn operation_of(report: &twinsync_core::engine::BasePairReport, relative: &str) -> Operation {
    let id = *report
        .base_pair
        .root_files()
        .get(relative)
        .unwrap_or_else(|| panic!("{relative} is not a root file in the paired tree"));
    report.base_pair.get(id).unwrap().common().operation().expect("active pair has an operation")
}

/// Scenario 1: an empty right root against a populated left root mirrors
/// everything over, and the database it writes records the left's own
/// descriptors for both sides (nothing existed on the right to record).
#[test]
fn first_time_mirror_creates_every_left_item_on_the_right() {
    let pair = Pair::new();
    pair.left_file("A.txt", b"0123456789");
    pair.left_file("sub/B.txt", b"01234567890123456789");

    let cfg = config(&pair, SyncVariant::Mirror);
    let report = run_one(&cfg).expect("run succeeds");

    assert_eq!(operation_of(&report, "A.txt"), Operation::CreateRight);
    let sub_id = *report.base_pair.root_folders().get("sub").unwrap();
    let sub = report.base_pair.get(sub_id).unwrap();
    assert_eq!(sub.common().operation(), Some(Operation::CreateRight));

    assert!(fs::metadata(pair.left.path().join(".sync.twinsync_db")).is_ok());
    assert!(fs::metadata(pair.right.path().join(".sync.twinsync_db")).is_ok());
}

/// Scenario 2: once both sides genuinely agree, a second run reports pure
/// equality rather than rediscovering work, under the variant most exposed
/// to false positives (two-way).
#[test]
fn a_no_op_second_run_reports_pure_equality() {
    let pair = Pair::new();
    pair.both_file("A.txt", b"0123456789");
    pair.both_file("sub/B.txt", b"01234567890123456789");

    let first = run_one(&config(&pair, SyncVariant::TwoWay)).expect("first run succeeds");
    assert_eq!(operation_of(&first, "A.txt"), Operation::Equal);

    let second = run_one(&config(&pair, SyncVariant::TwoWay)).expect("second run succeeds");
    assert_eq!(operation_of(&second, "A.txt"), Operation::Equal);
    let sub_id = *second.base_pair.root_folders().get("sub").unwrap();
    assert_eq!(second.base_pair.get(sub_id).unwrap().common().operation(), Some(Operation::Equal));
    assert_eq!(second.unresolved_conflict_count, 0);
    assert!(second.stream.iter().all(|entry| entry.operation == Operation::Equal));
}

/// Scenario 3: once a file is recorded on both sides, deleting it from one
/// side alone propagates the deletion to the other under two-way sync.
#[test]
fn two_way_propagates_a_deletion_recorded_on_only_one_side() {
    let pair = Pair::new();
    pair.both_file("X.txt", b"hello");
    run_one(&config(&pair, SyncVariant::TwoWay)).expect("establish recorded state");

    fs::remove_file(pair.right.path().join("X.txt")).unwrap();

    let report = run_one(&config(&pair, SyncVariant::TwoWay)).expect("second run succeeds");
    assert_eq!(operation_of(&report, "X.txt"), Operation::DeleteLeft);
}

/// Scenario 4: once a file is recorded on both sides, independent edits on
/// both sides since that recording are a conflict, not a guess.
#[test]
fn two_way_reports_a_conflict_when_both_sides_changed_since_recording() {
    let pair = Pair::new();
    pair.both_file("Y.txt", b"12345");
    run_one(&config(&pair, SyncVariant::TwoWay)).expect("establish recorded state");

    // Push both mtimes forward so the second run's own before/after
    // comparison on each side sees a real change, not tolerance noise.
    let left_path = pair.left.path().join("Y.txt");
    let right_path = pair.right.path().join("Y.txt");
    fs::write(&left_path, b"123456789").unwrap();
    fs::write(&right_path, b"1234567").unwrap();
    Pair::set_mtime(&left_path, Duration::from_secs(60), false);
    Pair::set_mtime(&right_path, Duration::from_secs(60), false);

    let report = run_one(&config(&pair, SyncVariant::TwoWay)).expect("second run succeeds");
    assert_eq!(operation_of(&report, "Y.txt"), Operation::UnresolvedConflict);
    assert_eq!(report.unresolved_conflict_count, 1);
    let conflict = &report.conflicts[0];
    assert!(conflict.description.contains("both sides changed"), "unexpected description: {}", conflict.description);
}

/// Scenario 6: a file renamed on one side between two runs is recognized as
/// a move (via the filesystem identity recorded the first time it was seen)
/// rather than an unrelated create-and-delete pair.
#[test]
fn a_rename_between_runs_is_recognized_as_a_move_not_a_create_and_delete() {
    let pair = Pair::new();
    pair.both_file("old.bin", b"the same bytes on both sides");
    run_one(&config(&pair, SyncVariant::Mirror)).expect("establish recorded state");

    fs::rename(pair.right.path().join("old.bin"), pair.right.path().join("new.bin")).unwrap();

    let report = run_one(&config(&pair, SyncVariant::Mirror)).expect("second run succeeds");

    assert_eq!(operation_of(&report, "old.bin"), Operation::MoveRightTarget);
    assert_eq!(operation_of(&report, "new.bin"), Operation::MoveRightSource);

    let old_id = *report.base_pair.root_files().get("old.bin").unwrap();
    let new_id = *report.base_pair.root_files().get("new.bin").unwrap();
    let old_item = report.base_pair.get(old_id).unwrap();
    let new_item = report.base_pair.get(new_id).unwrap();
    assert_eq!(old_item.common().move_counterpart(), Some(new_id));
    assert_eq!(new_item.common().move_counterpart(), Some(old_id));
}
