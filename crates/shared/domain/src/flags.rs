use bitflags::bitflags;
use serde::{Deserialize, Serialize};

bitflags! {
    /// Audit log switches of a configurator.
    ///
    /// In human-readable formats the flags are written by name, `"SECRET | CHANGES_ONLY"`.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
    #[serde(transparent)]
    pub struct LogFlags: u8 {
        /// Redact every value in the log line.
        const SECRET = 1 << 0;
        /// Skip the log line when the value did not change.
        const CHANGES_ONLY = 1 << 1;
    }
}

impl Default for LogFlags {
    fn default() -> Self {
        Self::empty()
    }
}
