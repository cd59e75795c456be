//! Runs the whole pipeline for one or many base-pairs (§5).
//!
//! [`run`] spawns one thread per base-pair — the outer half of the
//! "worker pool whose size equals the number of base-pairs" — and
//! [`run_one`] spawns the inner half: one thread per side, joined at the
//! barrier before the two sides are merged. Everything after the merge
//! (filter activation, categorization, resolution, database I/O) runs
//! single-threaded against that base-pair's own tree.

use std::path::{Path, PathBuf};
use std::thread;

use compare::{categorize_base_pair, ByteCompare};
use dirlock::DirLock;
use filters::{HardFilter, SoftFilter};
use model::{BasePair, ItemId, Operation, PairedItem, Side};
use resolve::{detect_moves, operation_stream, propagate_container_operations, resolve_base_pair, DbLookup, EmptyDb, StreamEntry, ToleranceConfig};
use syncdb::{load_last_synchronous_state, save_last_synchronous_state, update_last_synchronous_state, DirLookup, DirStatus, InSyncDir};
use view::{comparison_stats, sync_preview_stats, CategoryFilter, ComparisonStats, GridView, OperationFilter, SyncPreviewStats};
use walk::{AbstractFs, AlwaysIgnore, OsFs};

use crate::config::BasePairConfig;
use crate::error::EngineError;
use crate::merge::merge_into;
use crate::message::{Message, Severity, Stage};
use crate::side_tree::SideTreeBuilder;

/// Cap on how many unresolved conflicts a single report carries in full
/// (§6: "conflict list (first N with descriptions)"). The total count is
/// still reported even past this cap.
const MAX_REPORTED_CONFLICTS: usize = 50;

/// One unresolved conflict, summarized for a report.
#[derive(Debug, Clone)]
pub struct ConflictSummary {
    /// Identity of the conflicting pair.
    pub item: ItemId,
    /// Best-effort short name (left's if present, else right's).
    pub name: String,
    /// Why this pair could not be resolved automatically.
    pub description: String,
}

/// Everything produced by running one base-pair through the pipeline.
pub struct BasePairReport {
    /// The fully annotated paired tree: every pair carries a category, and
    /// every active pair a direction and operation.
    pub base_pair: BasePair,
    /// The flattened, ordered action list for an executor (§4.8).
    pub stream: Vec<StreamEntry>,
    /// Aggregate comparison counts, unfiltered.
    pub comparison_stats: ComparisonStats,
    /// Aggregate sync-plan counts, unfiltered.
    pub sync_preview_stats: SyncPreviewStats,
    /// The first [`MAX_REPORTED_CONFLICTS`] unresolved conflicts.
    pub conflicts: Vec<ConflictSummary>,
    /// Total unresolved conflicts, which may exceed `conflicts.len()`.
    pub unresolved_conflict_count: usize,
    /// Diagnostics collected along the way; nothing here stopped the run.
    pub messages: Vec<Message>,
}

/// Runs every base-pair concurrently, one thread each.
///
/// # Panics
///
/// Panics if a base-pair's worker thread itself panics (as opposed to
/// returning an `Err`), since that indicates a bug in this pipeline rather
/// than an expected failure mode.
pub fn run(configs: &[BasePairConfig]) -> Vec<Result<BasePairReport, EngineError>> {
    thread::scope(|scope| {
        let handles: Vec<_> = configs.iter().map(|config| scope.spawn(|| run_one(config))).collect();
        handles.into_iter().map(|handle| handle.join().expect("base-pair worker panicked")).collect()
    })
}

/// Runs a single base-pair through traversal, merge, categorization,
/// resolution, and database update/persist.
pub fn run_one(config: &BasePairConfig) -> Result<BasePairReport, EngineError> {
    let mut messages = Vec::new();
    let filter = config.filter.compile()?;

    let _left_lock = acquire_lock_if_configured(config, &config.left_path, &mut messages)?;
    let _right_lock = acquire_lock_if_configured(config, &config.right_path, &mut messages)?;

    let (left, right) = thread::scope(|scope| {
        let left_handle = scope.spawn(|| traverse_side(&config.left_path, &filter, config.symlink_policy));
        let right_handle = scope.spawn(|| traverse_side(&config.right_path, &filter, config.symlink_policy));
        (
            left_handle.join().expect("left traversal worker panicked"),
            right_handle.join().expect("right traversal worker panicked"),
        )
    });

    for path in left.failed_dirs.iter().chain(right.failed_dirs.iter()) {
        messages.push(
            Message::new(Severity::Warning, "directory could not be read; its contents were skipped")
                .with_stage(Stage::Traversal)
                .with_path(path.clone()),
        );
    }
    for path in left.failed_items.iter().chain(right.failed_items.iter()) {
        messages.push(
            Message::new(Severity::Warning, "entry could not be read; it was skipped")
                .with_stage(Stage::Traversal)
                .with_path(path.clone()),
        );
    }
    left.result?;
    right.result?;

    let mut base_pair = BasePair::new(
        config.id,
        config.left_path.clone(),
        config.right_path.clone(),
        filter,
        config.variant,
        config.symlink_policy,
        config.tolerance_secs,
        config.ignored_time_shifts_minutes.clone(),
    );
    base_pair.failed_dir_reads.extend(left.failed_dirs);
    base_pair.failed_dir_reads.extend(right.failed_dirs);
    base_pair.failed_item_reads.extend(left.failed_items);
    base_pair.failed_item_reads.extend(right.failed_items);

    merge_into(&mut base_pair, None, &left.tree, &right.tree);
    apply_soft_filter(&mut base_pair, &config.soft_filter);

    categorize_base_pair(&mut base_pair, &ByteCompare);

    let db_tree = load_last_synchronous_state(&base_pair);
    if db_tree.is_none() {
        messages.push(
            Message::new(Severity::Info, "no prior synchronized state found; treating as a first-time sync").with_stage(Stage::SyncDb),
        );
    }

    let tolerance = ToleranceConfig {
        tolerance_secs: config.tolerance_secs,
        ignored_time_shifts_minutes: &config.ignored_time_shifts_minutes,
    };
    {
        let lookup: Box<dyn DbLookup + '_> = match &db_tree {
            Some(tree) => Box::new(DirLookup::new(tree)),
            None => Box::new(EmptyDb),
        };
        resolve_base_pair(&mut base_pair, &config.sync_variant, lookup.as_ref());
        propagate_container_operations(&mut base_pair);
        detect_moves(&mut base_pair, lookup.as_ref(), tolerance);
    }

    let mut db_tree = db_tree.unwrap_or_else(|| InSyncDir::new(DirStatus::StrawMan));
    update_last_synchronous_state(&base_pair, &mut db_tree);
    if let Err(error) = save_last_synchronous_state(&base_pair, &db_tree) {
        messages.push(
            Message::new(Severity::Warning, format!("failed to write last-synchronized-state database: {error}")).with_stage(Stage::SyncDb),
        );
    }

    let stream = operation_stream(&base_pair);
    let view = GridView::new(&base_pair);
    let comparison_stats = comparison_stats(&base_pair, view.rows(), &CategoryFilter::all());
    let sync_preview_stats = sync_preview_stats(&base_pair, view.rows(), &OperationFilter::all());
    let (conflicts, unresolved_conflict_count) = collect_conflicts(&base_pair);
    if unresolved_conflict_count > conflicts.len() {
        messages.push(Message::new(
            Severity::Info,
            format!("{} additional unresolved conflicts omitted from this summary", unresolved_conflict_count - conflicts.len()),
        ));
    }

    Ok(BasePairReport {
        base_pair,
        stream,
        comparison_stats,
        sync_preview_stats,
        conflicts,
        unresolved_conflict_count,
        messages,
    })
}

fn acquire_lock_if_configured(config: &BasePairConfig, path: &Path, messages: &mut Vec<Message>) -> Result<Option<DirLock>, EngineError> {
    if !config.use_lock {
        return Ok(None);
    }
    let lock = DirLock::acquire(path)?;
    messages.push(Message::new(Severity::Info, "directory lock acquired").with_stage(Stage::DirLock).with_path(path.to_path_buf()));
    Ok(Some(lock))
}

struct SideOutcome {
    tree: crate::side_tree::SideDir,
    failed_dirs: Vec<PathBuf>,
    failed_items: Vec<PathBuf>,
    result: Result<(), walk::WalkError>,
}

fn traverse_side(root: &Path, filter: &HardFilter, symlink_policy: model::SymlinkPolicy) -> SideOutcome {
    let mut builder = SideTreeBuilder::default();
    let result = OsFs.traverse(root, filter, symlink_policy, &mut builder, &AlwaysIgnore);
    let failed_dirs = std::mem::take(&mut builder.failed_dirs);
    let failed_items = std::mem::take(&mut builder.failed_items);
    SideOutcome {
        tree: builder.into_tree(),
        failed_dirs,
        failed_items,
        result,
    }
}

fn apply_soft_filter(base_pair: &mut BasePair, filter: &SoftFilter) {
    let roots: Vec<ItemId> = base_pair
        .root_files()
        .values()
        .chain(base_pair.root_symlinks().values())
        .chain(base_pair.root_folders().values())
        .copied()
        .collect();
    for id in roots {
        apply_soft_filter_to(base_pair, id, filter);
    }
}

fn apply_soft_filter_to(base_pair: &mut BasePair, id: ItemId, filter: &SoftFilter) {
    let children: Vec<ItemId> = match base_pair.get(id) {
        Some(PairedItem::Folder(folder)) => folder.files.values().chain(folder.symlinks.values()).chain(folder.folders.values()).copied().collect(),
        _ => Vec::new(),
    };
    if let Some(item) = base_pair.get_mut(id) {
        let active = soft_filter_allows(item, filter);
        item.common_mut().set_active(active);
    }
    for child in children {
        apply_soft_filter_to(base_pair, child, filter);
    }
}

/// A pair is active if at least one side that actually exists passes the
/// filter: the threshold is meant to narrow "what changed recently", and a
/// change on either side is still a change worth showing.
fn soft_filter_allows(item: &PairedItem, filter: &SoftFilter) -> bool {
    match item {
        PairedItem::File(pair) => {
            pair.left.is_some_and(|d| filter.allows(d.mtime, d.size, false)) || pair.right.is_some_and(|d| filter.allows(d.mtime, d.size, false))
        }
        PairedItem::Symlink(pair) => {
            pair.left.is_some_and(|d| filter.allows(d.mtime, 0, false)) || pair.right.is_some_and(|d| filter.allows(d.mtime, 0, false))
        }
        PairedItem::Folder(_) => filter.allows(0, 0, true),
    }
}

fn collect_conflicts(base_pair: &BasePair) -> (Vec<ConflictSummary>, usize) {
    let mut conflicts = Vec::new();
    let mut count = 0usize;
    for (id, item) in base_pair.iter() {
        if item.common().operation() != Some(Operation::UnresolvedConflict) {
            continue;
        }
        count += 1;
        if conflicts.len() < MAX_REPORTED_CONFLICTS {
            let name = item
                .common()
                .name_on(Side::Left)
                .or_else(|| item.common().name_on(Side::Right))
                .unwrap_or("<unknown>")
                .to_owned();
            let description = item
                .common()
                .direction_conflict()
                .or_else(|| item.common().conflict_description())
                .unwrap_or("unresolved conflict")
                .to_owned();
            conflicts.push(ConflictSummary { item: id, name, description });
        }
    }
    (conflicts, count)
}
