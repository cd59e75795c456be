//! Programmatic configuration for one [`crate::engine::run_one`] call.
//!
//! There is no file format here — per §6, configuration is "a list of
//! base-pair configurations" plus a synchronization variant, built by
//! whatever external collaborator owns the CLI or config-file surface.
//! Every type here derives `serde::Serialize`/`Deserialize` so that
//! collaborator can be a JSON/TOML/whatever loader without this crate
//! knowing or caring which.

use std::path::PathBuf;

use filters::{HardFilter, Mask, MaskError, SoftFilter};
use model::{CompareVariant, SymlinkPolicy};
use resolve::SyncVariant;
use serde::{Deserialize, Serialize};

/// Include/exclude glob patterns, kept separate from the compiled
/// [`HardFilter`] it builds: `globset`'s compiled matcher type has no
/// `serde` impl, so the serializable form is the source patterns, compiled
/// on demand by [`FilterSpec::compile`].
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FilterSpec {
    /// Include mask patterns. An item passes if any matches, or if this
    /// list is empty.
    pub includes: Vec<String>,
    /// Exclude mask patterns. An item is rejected if any matches.
    pub excludes: Vec<String>,
}

impl FilterSpec {
    /// Compiles every pattern and assembles the resulting [`HardFilter`].
    ///
    /// # Errors
    /// Returns the first pattern that fails to compile as a glob.
    pub fn compile(&self) -> Result<HardFilter, MaskError> {
        let includes = self.includes.iter().map(|pattern| Mask::new(pattern)).collect::<Result<Vec<_>, _>>()?;
        let excludes = self.excludes.iter().map(|pattern| Mask::new(pattern)).collect::<Result<Vec<_>, _>>()?;
        Ok(HardFilter::from_masks(includes, excludes))
    }
}

/// Everything needed to compare, resolve, and persist the state of one
/// base-pair.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BasePairConfig {
    /// Stable id assigned to the resulting `model::BasePair` and to every
    /// [`model::ItemId`] issued within it.
    pub id: u32,
    /// Absolute path of the left root.
    pub left_path: PathBuf,
    /// Absolute path of the right root.
    pub right_path: PathBuf,
    /// Traversal-time scope filter; identical on both sides.
    pub filter: FilterSpec,
    /// Post-pairing activation filter.
    #[serde(default)]
    pub soft_filter: SoftFilter,
    /// Which equality rule the categorizer applies.
    pub variant: CompareVariant,
    /// Which synchronization policy resolves directions.
    pub sync_variant: SyncVariant,
    /// How symlinks are treated during traversal and comparison.
    pub symlink_policy: SymlinkPolicy,
    /// Mtime tolerance, in seconds, before two timestamps are treated as
    /// different.
    #[serde(default = "default_tolerance_secs")]
    pub tolerance_secs: i64,
    /// Whole-minute shifts (DST, FAT rounding) also tolerated.
    #[serde(default)]
    pub ignored_time_shifts_minutes: Vec<i64>,
    /// Whether to hold a directory lock on both roots for the run.
    #[serde(default = "default_use_lock")]
    pub use_lock: bool,
}

const fn default_tolerance_secs() -> i64 {
    2
}

const fn default_use_lock() -> bool {
    true
}

/// Top-level configuration: every base-pair a [`crate::engine::run`] call
/// should process.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EngineConfig {
    /// The base-pairs to process, independently of one another.
    pub base_pairs: Vec<BasePairConfig>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn filter_spec_compiles_valid_patterns() {
        let spec = FilterSpec {
            includes: vec!["*.txt".to_owned()],
            excludes: vec!["/build/".to_owned()],
        };
        assert!(spec.compile().is_ok());
    }

    #[test]
    fn filter_spec_rejects_an_invalid_pattern() {
        let spec = FilterSpec {
            includes: vec!["[".to_owned()],
            excludes: Vec::new(),
        };
        assert!(spec.compile().is_err());
    }

    #[test]
    fn engine_config_round_trips_through_json() {
        let config = EngineConfig {
            base_pairs: vec![BasePairConfig {
                id: 0,
                left_path: PathBuf::from("/left"),
                right_path: PathBuf::from("/right"),
                filter: FilterSpec::default(),
                soft_filter: SoftFilter::accept_all(),
                variant: CompareVariant::Content,
                sync_variant: SyncVariant::Mirror,
                symlink_policy: SymlinkPolicy::Direct,
                tolerance_secs: 2,
                ignored_time_shifts_minutes: vec![60],
                use_lock: true,
            }],
        };
        let json = serde_json::to_string(&config).expect("serialize");
        let round_tripped: EngineConfig = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(round_tripped.base_pairs[0].id, 0);
        assert_eq!(round_tripped.base_pairs[0].ignored_time_shifts_minutes, vec![60]);
    }
}
