mod builder;
mod stream;

pub use builder::HmmReaderBuilder;
pub use stream::{HmmReader, Origin, PathReader};
