//! Emission tables for display

use std::fmt;
use std::io::Write;

use crate::error::{Result, ViewError};
use crate::Profile;

/// Which emission row of a node to show
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StateKind {
    Match,
    Insert,
}
impl fmt::Display for StateKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Match => f.write_str("match"),
            Self::Insert => f.write_str("insert"),
        }
    }
}

/// The numeric space table values are reported in
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Space {
    #[default]
    Probability,
    /// Natural log-probability
    Log,
}

/// Builds the `(symbol, value)` rows of one emission row
///
/// Rows follow alphabet order unless `sort` is set, in which case they run from
/// the most to the least probable symbol. Values are converted from whatever
/// [`ScoreMode`](crate::ScoreMode) the profile was read with.
///
/// # Errors
///
/// Returns [`ViewError::NodeOutOfRange`] if `index` is greater than the model length.
pub fn emission_table(
    profile: &Profile,
    state: StateKind,
    index: usize,
    space: Space,
    sort: bool,
) -> Result<Vec<(char, f64)>> {
    let emissions = match state {
        StateKind::Match => profile.match_node(index),
        StateKind::Insert => profile.insert_node(index),
    }
    .ok_or(ViewError::NodeOutOfRange {
        index,
        model_length: profile.model_length(),
    })?;

    let mode = profile.score_mode();
    let mut rows = emissions
        .iter()
        .map(|(symbol, score)| {
            let value = match space {
                Space::Probability => mode.to_probability(score),
                Space::Log => mode.to_log_probability(score),
            };
            (symbol, value)
        })
        .collect::<Vec<_>>();

    // both spaces are monotonic in probability
    if sort {
        rows.sort_by(|a, b| b.1.total_cmp(&a.1));
    }
    Ok(rows)
}

/// Writes one `<symbol> <value>` line per row, with 18 decimals
pub fn write_table<W: Write>(rows: &[(char, f64)], writer: &mut W) -> Result<()> {
    for (symbol, value) in rows {
        writeln!(writer, "{symbol} {value:.18}")?;
    }
    Ok(())
}
