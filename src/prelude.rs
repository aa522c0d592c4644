//! Common imports for reading profiles
pub use crate::{
    Alphabet, Emissions, HmmReader, HmmReaderBuilder, Profile, ReaderConfig, RowPolicy,
    ScoreMode, Transition, Transitions,
};
