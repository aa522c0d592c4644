use crate::{RowPolicy, ScoreMode};

/// Settings shared by every profile parsed from one stream
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReaderConfig {
    /// How score tokens are decoded
    pub mode: ScoreMode,

    /// How rows with an unexpected number of fields are handled
    pub policy: RowPolicy,
}
impl ReaderConfig {
    #[must_use]
    pub fn new(mode: ScoreMode, policy: RowPolicy) -> Self {
        Self { mode, policy }
    }
}
