//! Score decoding
//!
//! HMMER3 text files store every emission and transition as `-ln(p)` with five
//! decimals, and use `*` for a probability of zero. The decoder turns those tokens
//! into numbers according to a [`ScoreMode`].

use crate::ParseError;

/// The token HMMER uses for an impossible (zero-probability) event
pub const IMPOSSIBLE: &str = "*";

/// How tokens from the file are converted into stored scores
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ScoreMode {
    /// Natural log-probability: the file value negated (`*` is `-inf`)
    #[default]
    NegLog,
    /// The file value unchanged, i.e. `-ln(p)` (`*` is `+inf`)
    Raw,
    /// Plain probability: `exp(-x)` (`*` is `0`)
    Probability,
}
impl ScoreMode {
    /// The stored value of the `*` sentinel in this mode
    #[must_use]
    pub fn impossible(self) -> f64 {
        match self {
            Self::NegLog => f64::NEG_INFINITY,
            Self::Raw => f64::INFINITY,
            Self::Probability => 0.0,
        }
    }

    /// The stored value of a certain event in this mode
    #[must_use]
    pub fn certain(self) -> f64 {
        match self {
            Self::NegLog | Self::Raw => 0.0,
            Self::Probability => 1.0,
        }
    }

    /// Converts a value from the file (`-ln(p)`) into this mode
    #[must_use]
    pub fn convert_file_value(self, value: f64) -> f64 {
        match self {
            Self::NegLog => -value,
            Self::Raw => value,
            Self::Probability => (-value).exp(),
        }
    }

    /// Converts a score stored in this mode into a natural log-probability
    #[must_use]
    pub fn to_log_probability(self, score: f64) -> f64 {
        match self {
            Self::NegLog => score,
            Self::Raw => -score,
            Self::Probability => score.ln(),
        }
    }

    /// Converts a score stored in this mode into a plain probability
    #[must_use]
    pub fn to_probability(self, score: f64) -> f64 {
        match self {
            Self::NegLog => score.exp(),
            Self::Raw => (-score).exp(),
            Self::Probability => score,
        }
    }

    /// Decodes a single token
    ///
    /// # Arguments
    /// * `token` - A field from a normalized profile row
    /// * `line` - The line the token was read from, used for error reporting
    pub fn decode(self, token: &str, line: usize) -> Result<f64, ParseError> {
        if token == IMPOSSIBLE {
            return Ok(self.impossible());
        }
        match token.parse::<f64>() {
            Ok(value) if !value.is_nan() => Ok(self.convert_file_value(value)),
            _ => Err(ParseError::InvalidScore {
                token: token.to_string(),
                line,
            }),
        }
    }

    /// Decodes a run of tokens into a freshly allocated row
    pub fn decode_row(self, tokens: &[&str], line: usize) -> Result<Vec<f64>, ParseError> {
        tokens.iter().map(|t| self.decode(t, line)).collect()
    }
}

/// Decodes a token with the default [`ScoreMode::NegLog`] semantics
///
/// `*` becomes negative infinity, every other token is parsed and negated.
pub fn num(token: &str) -> Result<f64, ParseError> {
    ScoreMode::NegLog.decode(token, 0)
}
