//! Streaming reader for HMMER3 profile-HMM text files
//!
//! ```no_run
//! use hmmer_reader::HmmReader;
//!
//! # fn main() -> hmmer_reader::Result<()> {
//! let mut reader = HmmReader::from_path("Pfam-A.hmm.gz")?;
//! while let Some(profile) = reader.read_profile()? {
//!     println!("{:?} {}", profile.name(), profile.model_length());
//! }
//! # Ok(())
//! # }
//! ```

mod alphabet;
mod config;
mod error;
mod parser;
mod policy;
mod profile;
mod reader;
mod score;
mod summary;
mod utils;
mod view;

pub mod prelude;

pub use alphabet::{Alphabet, AlphabetFamily};
pub use config::ReaderConfig;
pub use error::{EncodingError, Error, ParseError, ReadError, Result, ViewError};
pub use parser::LineReader;
pub use policy::RowPolicy;
pub use profile::{Emissions, Profile, Transition, Transitions, N_TRANSITIONS};
pub use reader::{HmmReader, HmmReaderBuilder, Origin, PathReader};
pub use score::{num, ScoreMode, IMPOSSIBLE};
pub use summary::{fetch_metadata, num_models, summarize, write_tsv, MetadataRow};
pub use utils::normalize_line;
pub use view::{emission_table, write_table, Space, StateKind};
