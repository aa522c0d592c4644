use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::{Path, PathBuf};

use crate::error::{ReadError, Result};
use crate::parser::{read_profile, LineReader};
use crate::{Profile, ReaderConfig};

/// Buffered, transparently decompressed file handle used by [`HmmReader::from_path`]
pub type PathReader = BufReader<Box<dyn Read>>;

/// Where the stream of an [`HmmReader`] came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Origin {
    /// The reader opened this file itself
    Path(PathBuf),
    /// The caller handed over an already-open stream
    Stream,
}

/// Streaming reader over the profiles of a HMMER3 text file
///
/// Profiles are parsed lazily, one per call to [`read_profile`](HmmReader::read_profile)
/// or per iteration step. End of input is reported as `Ok(None)` (or `None` when
/// iterating) and stays that way on every later call.
///
/// The reader owns its stream and releases it on [`close`](HmmReader::close) or
/// when dropped. Closing is idempotent and does not depend on the last parse
/// having succeeded. To keep a stream open beyond the reader, pass it by
/// reference (`&mut file` or `&mut BufReader`), or recover it with
/// [`into_inner`](HmmReader::into_inner).
#[derive(Debug)]
pub struct HmmReader<R: BufRead> {
    lines: Option<LineReader<R>>,
    origin: Origin,
    config: ReaderConfig,
    n_processed: usize,
    finished: bool,
}
impl HmmReader<PathReader> {
    /// Opens a profile file, decompressing it if needed
    ///
    /// Nothing is parsed until the first profile is requested.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::from_path_with_config(path, ReaderConfig::default())
    }

    pub fn from_path_with_config<P: AsRef<Path>>(path: P, config: ReaderConfig) -> Result<Self> {
        let path = path.as_ref();
        let handle = File::open(path)?;
        let (inner, format) = niffler::get_reader(Box::new(handle))?;
        log::debug!("Opened {} (compression: {:?})", path.display(), format);
        let inner: Box<dyn Read> = inner;
        Ok(Self::build(
            BufReader::new(inner),
            Origin::Path(path.to_path_buf()),
            config,
        ))
    }
}
impl<R: BufRead> HmmReader<R> {
    /// Wraps an already-open stream with the default configuration
    pub fn new(inner: R) -> Self {
        Self::with_config(inner, ReaderConfig::default())
    }

    pub fn with_config(inner: R, config: ReaderConfig) -> Self {
        Self::build(inner, Origin::Stream, config)
    }

    fn build(inner: R, origin: Origin, config: ReaderConfig) -> Self {
        Self {
            lines: Some(LineReader::new(inner)),
            origin,
            config,
            n_processed: 0,
            finished: false,
        }
    }

    /// Parses the next profile
    ///
    /// # Returns
    ///
    /// * `Ok(Some(Profile))` - The next profile in the stream
    /// * `Ok(None)` - The stream is exhausted (repeatable)
    /// * `Err(Error)` - The next profile is malformed, undecodable, or the reader was closed
    pub fn read_profile(&mut self) -> Result<Option<Profile>> {
        if self.finished {
            return Ok(None);
        }
        let Some(lines) = self.lines.as_mut() else {
            return Err(ReadError::StreamClosed(self.n_processed).into());
        };
        match read_profile(lines, self.config)? {
            Some(profile) => {
                self.n_processed += 1;
                Ok(Some(profile))
            }
            None => {
                log::debug!("Finished after {} profiles", self.n_processed);
                self.finished = true;
                Ok(None)
            }
        }
    }

    /// Reads every remaining profile, in file order
    pub fn read_all(&mut self) -> Result<Vec<Profile>> {
        let mut profiles = Vec::new();
        while let Some(profile) = self.read_profile()? {
            profiles.push(profile);
        }
        Ok(profiles)
    }

    /// Releases the underlying stream
    ///
    /// Calling this more than once is a no-op.
    pub fn close(&mut self) {
        if self.lines.take().is_some() {
            log::trace!("Closed stream ({:?})", self.origin);
        }
    }

    /// Closes the reader and hands back the stream, if it was still open
    pub fn into_inner(mut self) -> Option<R> {
        self.lines.take().map(LineReader::into_inner)
    }

    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.lines.is_none()
    }

    /// Returns true once the end of the stream has been reached
    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Returns the number of profiles returned so far
    #[must_use]
    pub fn n_processed(&self) -> usize {
        self.n_processed
    }

    /// Returns the number of lines consumed so far
    #[must_use]
    pub fn line_number(&self) -> usize {
        self.lines.as_ref().map_or(0, LineReader::line_number)
    }

    #[must_use]
    pub fn origin(&self) -> &Origin {
        &self.origin
    }

    /// Returns true if the reader opened its stream itself
    #[must_use]
    pub fn owns_stream(&self) -> bool {
        matches!(self.origin, Origin::Path(_))
    }

    #[must_use]
    pub fn config(&self) -> ReaderConfig {
        self.config
    }
}
impl<R: BufRead> Iterator for HmmReader<R> {
    type Item = Result<Profile>;

    fn next(&mut self) -> Option<Self::Item> {
        self.read_profile().transpose()
    }
}
