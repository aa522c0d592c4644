/// Custom Result type for hmmer-reader operations, wrapping the custom [`Error`] type
pub type Result<T> = std::result::Result<T, Error>;

/// The main error type for the hmmer-reader library, encompassing all possible error cases
/// that can occur while reading profile files.
///
/// Reaching the end of the input is *not* an error: readers report it as `Ok(None)`.
#[derive(thiserror::Error, Debug)]
#[error(transparent)]
pub enum Error {
    /// The text does not follow the profile grammar
    ParseError(#[from] ParseError),
    /// The underlying stream produced bytes that are not valid UTF-8
    EncodingError(#[from] EncodingError),
    /// Errors related to the reader lifecycle
    ReadError(#[from] ReadError),
    /// Errors raised while rendering a parsed profile
    ViewError(#[from] ViewError),
    /// Standard I/O errors from the Rust standard library
    IoError(#[from] std::io::Error),
    /// Errors from the niffler decompression layer
    DecompressionError(#[from] niffler::Error),
}
impl Error {
    /// Returns true if the input does not conform to the profile grammar
    #[must_use]
    pub fn is_parse(&self) -> bool {
        matches!(self, Self::ParseError(_))
    }

    /// Returns true if the input could not be decoded as text
    #[must_use]
    pub fn is_encoding(&self) -> bool {
        matches!(self, Self::EncodingError(_))
    }
}

/// Structural errors: the stream does not follow the profile grammar.
///
/// Line numbers are 1-based and count from the start of the stream,
/// not from the start of the current profile.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum ParseError {
    /// The metadata block ended without an `HMM` alphabet declaration
    ///
    /// # Arguments
    /// * `usize` - The line on which the stream ended
    #[error("Alphabet line not found (stream ended at line {0})")]
    MissingAlphabet(usize),

    /// The alphabet declaration contained no symbols
    #[error("Alphabet declaration on line {0} has no symbols")]
    EmptyAlphabet(usize),

    /// A metadata line could not be split into a key and a value
    #[error("Malformed metadata on line {line}: {content:?}")]
    MalformedMetadata { line: usize, content: String },

    /// A metadata value could not be interpreted
    ///
    /// # Fields
    /// * `profile` - The 1-based position of the profile within its file
    #[error("Invalid value for {key} in profile {profile}: {value:?}")]
    InvalidMetadataValue {
        key: &'static str,
        value: String,
        profile: usize,
    },

    /// A metadata key required by the caller is absent
    ///
    /// # Fields
    /// * `profile` - The 1-based position of the profile within its file
    #[error("Profile {profile} has no {key} field")]
    MissingMetadata { key: &'static str, profile: usize },

    /// The composition row is absent or mislabeled
    #[error("Expected a COMPO row on line {line}, found {found:?}")]
    MissingComposition { line: usize, found: String },

    /// A token could not be decoded as a score
    #[error("Invalid score {token:?} on line {line}")]
    InvalidScore { token: String, line: usize },

    /// A row did not have the number of fields its kind requires
    ///
    /// # Fields
    /// * `row` - The kind of row being decoded
    /// * `expected` - The number of score fields required
    /// * `found` - The number of score fields present
    #[error("Line {line}: {row} row has {found} fields, expected {expected}")]
    FieldCount {
        row: &'static str,
        expected: usize,
        found: usize,
        line: usize,
    },

    /// The stream ended in the middle of a profile
    #[error("Stream ended prematurely on line {line} while reading {context}")]
    UnexpectedEndOfStream { context: &'static str, line: usize },
}

/// The stream produced bytes that cannot be decoded as text
#[derive(thiserror::Error, Debug)]
#[error("Line {line} is not valid UTF-8")]
pub struct EncodingError {
    pub line: usize,
    #[source]
    pub source: std::str::Utf8Error,
}

/// Errors related to the lifecycle of a profile reader
#[derive(thiserror::Error, Debug)]
pub enum ReadError {
    /// A read was requested after the stream was closed
    ///
    /// # Arguments
    /// * `usize` - The number of profiles returned before closing
    #[error("Stream was closed after {0} profiles")]
    StreamClosed(usize),
}

/// Errors raised while rendering a parsed profile
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ViewError {
    /// A node index beyond the model length was requested
    #[error("Index {index} is higher than the model length ({model_length})")]
    NodeOutOfRange { index: usize, model_length: usize },
}
