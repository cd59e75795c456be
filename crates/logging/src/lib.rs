#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

//! # Overview
//!
//! A small verbosity type that gates how much of the sync engine's
//! `tracing` output reaches the console, the way rsync's `-v`/`-vv` flags
//! gate its own diagnostics. The engine crates emit `tracing` events
//! unconditionally; this crate decides, from a single [`Verbosity`] value,
//! which ones a [`tracing_subscriber`] filter should let through.
//!
//! # Design
//!
//! [`Verbosity`] is a small ordered enum rather than an open-ended integer
//! count, since the sync core only has a handful of genuinely distinct
//! output modes (silence, normal progress, per-item detail, and
//! trace-level diagnostics for debugging the resolver itself).
//!
//! # Examples
//!
//! ```
//! use logging::Verbosity;
//!
//! let verbosity = Verbosity::from_level(2);
//! assert_eq!(verbosity, Verbosity::Debug);
//! assert!(verbosity.allows(Verbosity::Verbose));
//! assert!(!Verbosity::Quiet.allows(Verbosity::Verbose));
//! ```

use std::fmt;

/// How much diagnostic output the engine should produce.
///
/// Ordered from least to most verbose; a higher verbosity allows
/// everything a lower one allows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub enum Verbosity {
    /// Only warnings and errors.
    Quiet,
    /// Per-base-pair progress, the default.
    #[default]
    Normal,
    /// Per-item category/operation detail.
    Verbose,
    /// Internal resolver and database state, for diagnosing this crate.
    Debug,
}

impl Verbosity {
    /// Maps an integer `-v` count (as commonly accepted from a CLI) onto a
    /// verbosity level, saturating at [`Verbosity::Debug`].
    #[must_use]
    pub const fn from_level(level: u8) -> Self {
        match level {
            0 => Self::Normal,
            1 => Self::Verbose,
            _ => Self::Debug,
        }
    }

    /// Whether output at `other`'s level should be emitted when the engine
    /// is configured at `self`.
    #[must_use]
    pub const fn allows(self, other: Self) -> bool {
        (self as u8) >= (other as u8)
    }

    /// The `tracing`/`tracing-subscriber` filter directive equivalent to
    /// this verbosity, for wiring up `EnvFilter`.
    #[cfg(feature = "tracing")]
    #[must_use]
    pub const fn as_filter_directive(self) -> &'static str {
        match self {
            Self::Quiet => "warn",
            Self::Normal => "info",
            Self::Verbose => "debug",
            Self::Debug => "trace",
        }
    }
}

impl fmt::Display for Verbosity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Quiet => "quiet",
            Self::Normal => "normal",
            Self::Verbose => "verbose",
            Self::Debug => "debug",
        };
        f.write_str(label)
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for Verbosity {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for Verbosity {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        match text.as_str() {
            "quiet" => Ok(Self::Quiet),
            "normal" => Ok(Self::Normal),
            "verbose" => Ok(Self::Verbose),
            "debug" => Ok(Self::Debug),
            other => Err(serde::de::Error::unknown_variant(
                other,
                &["quiet", "normal", "verbose", "debug"],
            )),
        }
    }
}

/// Installs a `tracing-subscriber` global subscriber filtered to
/// `verbosity`. Call once, at process startup.
#[cfg(feature = "tracing")]
pub fn init(verbosity: Verbosity) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(verbosity.as_filter_directive()));
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}
