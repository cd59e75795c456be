use std::fmt;

/// Which pipeline stage produced a diagnostic message.
///
/// Where the teacher's message trailer names a network role (sender,
/// receiver, daemon...), this pipeline has no network roles at all — the
/// useful axis here is which stage of compare → resolve → persist emitted
/// the message, since that's what a user debugging a sync run wants to
/// know first.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum Stage {
    /// Directory traversal (`walk`).
    Traversal,
    /// Categorization (`compare`).
    Compare,
    /// Direction/operation resolution (`resolve`).
    Resolve,
    /// In-sync database load/save (`syncdb`).
    SyncDb,
    /// Directory lock acquisition/heartbeat (`dirlock`).
    DirLock,
}

impl Stage {
    /// All stages, in pipeline order.
    ///
    /// # Examples
    ///
    /// ```
    /// use twinsync_core::message::Stage;
    ///
    /// assert_eq!(Stage::ALL.len(), 5);
    /// assert_eq!(Stage::ALL[0], Stage::Traversal);
    /// ```
    pub const ALL: [Self; 5] = [
        Self::Traversal,
        Self::Compare,
        Self::Resolve,
        Self::SyncDb,
        Self::DirLock,
    ];

    /// Lowercase identifier used when formatting messages.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Traversal => "traversal",
            Self::Compare => "compare",
            Self::Resolve => "resolve",
            Self::SyncDb => "syncdb",
            Self::DirLock => "dirlock",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
