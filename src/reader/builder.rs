use std::io::BufRead;
use std::path::Path;

use crate::error::Result;
use crate::{ReaderConfig, RowPolicy, ScoreMode};

use super::{HmmReader, PathReader};

/// Builder for [`HmmReader`] with a non-default configuration
///
/// ```
/// use hmmer_reader::{HmmReaderBuilder, RowPolicy, ScoreMode};
///
/// let reader = HmmReaderBuilder::new()
///     .mode(ScoreMode::Probability)
///     .policy(RowPolicy::Truncate)
///     .build("".as_bytes());
/// assert_eq!(reader.config().mode, ScoreMode::Probability);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct HmmReaderBuilder {
    mode: Option<ScoreMode>,
    policy: Option<RowPolicy>,
}
impl HmmReaderBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets how score tokens are decoded
    #[must_use]
    pub fn mode(mut self, mode: ScoreMode) -> Self {
        self.mode = Some(mode);
        self
    }

    /// Sets how rows with an unexpected number of fields are handled
    #[must_use]
    pub fn policy(mut self, policy: RowPolicy) -> Self {
        self.policy = Some(policy);
        self
    }

    #[must_use]
    pub fn config(&self) -> ReaderConfig {
        ReaderConfig::new(
            self.mode.unwrap_or_default(),
            self.policy.unwrap_or_default(),
        )
    }

    /// Wraps an already-open stream
    pub fn build<R: BufRead>(self, inner: R) -> HmmReader<R> {
        HmmReader::with_config(inner, self.config())
    }

    /// Opens a (possibly compressed) profile file
    pub fn open<P: AsRef<Path>>(self, path: P) -> Result<HmmReader<PathReader>> {
        HmmReader::from_path_with_config(path, self.config())
    }
}
