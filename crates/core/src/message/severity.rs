use std::fmt;

/// Severity of a diagnostic message.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, PartialOrd, Ord)]
pub enum Severity {
    /// Informational message: progress, a resolved category, a completed
    /// stage.
    Info,
    /// Warning: a non-fatal condition the user should know about (a
    /// corrupt database treated as first-time sync, a DB write that
    /// failed after a successful sync).
    Warning,
    /// Error: a traversal or lock failure that stopped a base-pair.
    Error,
}

impl Severity {
    /// Lowercase label used when rendering the severity.
    ///
    /// # Examples
    ///
    /// ```
    /// use twinsync_core::message::Severity;
    ///
    /// assert_eq!(Severity::Info.as_str(), "info");
    /// assert_eq!(Severity::Warning.as_str(), "warning");
    /// assert_eq!(Severity::Error.as_str(), "error");
    /// ```
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Info => "info",
            Self::Warning => "warning",
            Self::Error => "error",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
