//! Profile parser
//!
//! A profile is read line by line through a small state machine:
//!
//! ```text
//! Start -> Metadata -> ColumnHeader -> Composition
//!       -> Insert -> Transition -> MatchOrEnd -> (Insert -> Transition -> MatchOrEnd)*
//!       -> End
//! ```
//!
//! Tables are accumulated in a `ProfileBuilder` that is only turned into a
//! [`Profile`] once the `//` terminator has been read, so a failed parse never
//! leaks a partial profile.

use std::io::BufRead;

use crate::error::{EncodingError, ParseError, Result};
use crate::profile::N_TRANSITIONS;
use crate::utils::{normalize_line, split_fields};
use crate::{Alphabet, Profile, ReaderConfig, RowPolicy};

/// Label of the line declaring the alphabet
const ALPHABET_LABEL: &str = "HMM";

/// Label of the composition row
const COMPO_LABEL: &str = "COMPO";

/// Line terminating a profile
const TERMINATOR: &str = "//";

/// Annotation columns (MAP, CONS, RF, MM, CS) that may follow the match scores
const MATCH_ANNOTATIONS: usize = 5;

/// Line-oriented view of a byte stream
///
/// Tracks the 1-based number of the last line returned and rejects lines that
/// are not valid UTF-8. Nothing is buffered beyond the current line.
#[derive(Debug)]
pub struct LineReader<R: BufRead> {
    inner: R,
    buffer: Vec<u8>,
    line: usize,
}
impl<R: BufRead> LineReader<R> {
    pub fn new(inner: R) -> Self {
        Self {
            inner,
            buffer: Vec::with_capacity(256),
            line: 0,
        }
    }

    /// The number of the last line read
    pub fn line_number(&self) -> usize {
        self.line
    }

    /// Reads the next line, or `None` once the stream yields no bytes
    pub fn next_line(&mut self) -> Result<Option<String>> {
        self.buffer.clear();
        if self.inner.read_until(b'\n', &mut self.buffer)? == 0 {
            return Ok(None);
        }
        self.line += 1;
        match std::str::from_utf8(&self.buffer) {
            Ok(text) => Ok(Some(text.to_string())),
            Err(source) => Err(EncodingError {
                line: self.line,
                source,
            }
            .into()),
        }
    }

    /// Reads the next line, treating the end of the stream as an error
    fn expect_line(&mut self, context: &'static str) -> Result<String> {
        match self.next_line()? {
            Some(line) => Ok(line),
            None => Err(ParseError::UnexpectedEndOfStream {
                context,
                line: self.line,
            }
            .into()),
        }
    }

    pub fn into_inner(self) -> R {
        self.inner
    }
}

/// Parser position within a profile
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Start,
    Metadata,
    ColumnHeader,
    Composition,
    Insert,
    Transition,
    MatchOrEnd,
    End,
}

/// Mutable accumulator for the tables of one profile
#[derive(Debug, Default)]
struct ProfileBuilder {
    config: ReaderConfig,
    header: String,
    metadata: Vec<(String, String)>,
    alphabet: Option<Alphabet>,
    compo: Vec<f64>,
    match_nodes: Vec<Vec<f64>>,
    insert_nodes: Vec<Vec<f64>>,
    trans_nodes: Vec<[f64; N_TRANSITIONS]>,
}
impl ProfileBuilder {
    fn new(config: ReaderConfig) -> Self {
        Self {
            config,
            ..Default::default()
        }
    }

    fn alphabet_len(&self) -> usize {
        self.alphabet.as_ref().map_or(0, Alphabet::len)
    }

    /// Splits a metadata line into its key and value
    ///
    /// The value keeps its internal spacing; only the gap after the key is collapsed.
    fn push_metadata(&mut self, trimmed: &str, line: usize) -> Result<()> {
        match trimmed.split_once(' ') {
            Some((key, value)) if !value.trim().is_empty() => {
                self.metadata
                    .push((key.trim().to_string(), value.trim().to_string()));
                Ok(())
            }
            _ => Err(ParseError::MalformedMetadata {
                line,
                content: trimmed.to_string(),
            }
            .into()),
        }
    }

    fn set_alphabet(&mut self, normalized: &str, line: usize) -> Result<()> {
        let fields = split_fields(normalized);
        let alphabet = Alphabet::from_fields(&fields[1..]);
        if alphabet.is_empty() {
            return Err(ParseError::EmptyAlphabet(line).into());
        }
        self.alphabet = Some(alphabet);
        Ok(())
    }

    /// Decodes the composition row and synthesizes the begin node's match row
    fn set_composition(&mut self, normalized: &str, line: usize) -> Result<()> {
        let fields = split_fields(normalized);
        let strict = self.config.policy == RowPolicy::Strict;
        match fields.first() {
            Some(&label) if label == COMPO_LABEL || !strict => {}
            _ => {
                return Err(ParseError::MissingComposition {
                    line,
                    found: normalized.to_string(),
                }
                .into())
            }
        }
        let k = self.alphabet_len();
        let scores = self
            .config
            .policy
            .select("composition", &fields[1..], k, 0, line)?;
        self.compo = self.config.mode.decode_row(scores, line)?;

        let mode = self.config.mode;
        let mut begin = vec![mode.impossible(); k];
        begin[0] = mode.certain();
        self.match_nodes.push(begin);
        Ok(())
    }

    fn push_insert(&mut self, normalized: &str, line: usize) -> Result<()> {
        let fields = split_fields(normalized);
        let scores = self
            .config
            .policy
            .select("insert", &fields, self.alphabet_len(), 0, line)?;
        let row = self.config.mode.decode_row(scores, line)?;
        self.insert_nodes.push(row);
        Ok(())
    }

    fn push_transition(&mut self, normalized: &str, line: usize) -> Result<()> {
        let fields = split_fields(normalized);
        let scores = self
            .config
            .policy
            .select("transition", &fields, N_TRANSITIONS, 0, line)?;
        let mut row = [0.0; N_TRANSITIONS];
        for (slot, token) in row.iter_mut().zip(scores) {
            *slot = self.config.mode.decode(token, line)?;
        }
        self.trans_nodes.push(row);
        Ok(())
    }

    /// Decodes a match row; the leading node index label is dropped
    fn push_match(&mut self, normalized: &str, line: usize) -> Result<()> {
        let fields = split_fields(normalized);
        let k = self.alphabet_len();
        let scores = match fields.split_first() {
            Some((_, rest)) => {
                self.config
                    .policy
                    .select("match", rest, k, MATCH_ANNOTATIONS, line)?
            }
            None => {
                return Err(ParseError::FieldCount {
                    row: "match",
                    expected: k,
                    found: 0,
                    line,
                }
                .into())
            }
        };
        let row = self.config.mode.decode_row(scores, line)?;
        self.match_nodes.push(row);
        Ok(())
    }

    fn finish(self) -> Profile {
        let alphabet = self.alphabet.unwrap_or_else(|| Alphabet::from_fields(&[]));
        Profile::from_parts(
            self.header,
            self.metadata,
            alphabet,
            self.config.mode,
            self.compo,
            self.match_nodes,
            self.insert_nodes,
            self.trans_nodes,
        )
    }
}

/// Reads the next profile from a line source
///
/// Returns `Ok(None)` when the stream is exhausted before the first byte of a
/// new profile. Running out of input anywhere after the header line is an error.
pub fn read_profile<R: BufRead>(
    lines: &mut LineReader<R>,
    config: ReaderConfig,
) -> Result<Option<Profile>> {
    let mut builder = ProfileBuilder::new(config);
    let mut state = State::Start;
    let start_line = lines.line_number() + 1;

    loop {
        state = match state {
            State::Start => match lines.next_line()? {
                Some(line) => {
                    log::trace!("Profile starts on line {start_line}");
                    builder.header = normalize_line(&line);
                    State::Metadata
                }
                None => {
                    log::trace!("End of input after line {}", lines.line_number());
                    return Ok(None);
                }
            },
            State::Metadata => {
                let Some(line) = lines.next_line()? else {
                    return Err(ParseError::MissingAlphabet(lines.line_number()).into());
                };
                let trimmed = line.trim();
                if trimmed.starts_with(ALPHABET_LABEL)
                    && trimmed[ALPHABET_LABEL.len()..].starts_with(' ')
                {
                    builder.set_alphabet(&normalize_line(trimmed), lines.line_number())?;
                    State::ColumnHeader
                } else {
                    builder.push_metadata(trimmed, lines.line_number())?;
                    State::Metadata
                }
            }
            State::ColumnHeader => {
                lines.expect_line("the transition column header")?;
                State::Composition
            }
            State::Composition => {
                let line = lines.expect_line("the composition row")?;
                builder.set_composition(&normalize_line(&line), lines.line_number())?;
                State::Insert
            }
            State::Insert => {
                let line = lines.expect_line("an insert emission row")?;
                builder.push_insert(&normalize_line(&line), lines.line_number())?;
                State::Transition
            }
            State::Transition => {
                let line = lines.expect_line("a transition row")?;
                builder.push_transition(&normalize_line(&line), lines.line_number())?;
                State::MatchOrEnd
            }
            State::MatchOrEnd => {
                let line = lines.expect_line("a match emission row")?;
                let normalized = normalize_line(&line);
                if normalized == TERMINATOR {
                    State::End
                } else {
                    builder.push_match(&normalized, lines.line_number())?;
                    State::Insert
                }
            }
            State::End => {
                let profile = builder.finish();
                log::debug!(
                    "Parsed profile {} (lines {}-{}, M = {})",
                    profile.name().unwrap_or("<unnamed>"),
                    start_line,
                    lines.line_number(),
                    profile.model_length()
                );
                return Ok(Some(profile));
            }
        };
    }
}

#[cfg(test)]
mod testing {
    use super::*;
    use crate::{Error, ScoreMode, Transition};
    use anyhow::Result;

    const NT_PROFILE: &str = "HMMER3/f [3.1b2 | February 2015]
NAME  tiny
LENG  2
ALPH  DNA
STATS LOCAL MSV       -9.9559  0.70785
HMM          A        C        G        T
            m->m     m->i     m->d     i->m     i->i     d->m     d->d
  COMPO   1.30000  1.40000  1.50000  1.20000
          1.38629  1.38629  1.38629  1.38629
          0.10000  4.00000  5.00000  0.61958  0.77255  0.00000        *
      1   0.50000  2.00000  3.00000  4.00000      1 a - - -
          1.38629  1.38629  1.38629  1.38629
          0.20000  4.10000  5.10000  0.61958  0.77255  0.30000  0.40000
      2   4.00000  3.00000  2.00000  0.50000      2 t - - -
          1.38629  1.38629  1.38629  1.38629
          0.01000  4.20000        *  0.61958  0.77255  0.00000        *
//
";

    fn parse(text: &str, config: ReaderConfig) -> crate::Result<Option<Profile>> {
        let mut lines = LineReader::new(text.as_bytes());
        read_profile(&mut lines, config)
    }

    fn parse_err(text: &str) -> ParseError {
        match parse(text, ReaderConfig::default()) {
            Err(Error::ParseError(e)) => e,
            other => panic!("expected a parse error, got {other:?}"),
        }
    }

    #[test]
    fn test_parse_small() -> Result<()> {
        let hmm = parse(NT_PROFILE, ReaderConfig::default())?.expect("one profile");
        assert_eq!(hmm.header(), "HMMER3/f [3.1b2 | February 2015]");
        assert_eq!(hmm.alphabet().to_string(), "ACGT");
        assert_eq!(hmm.model_length(), 2);
        assert_eq!(hmm.num_nodes(), 3);
        assert_eq!(hmm.insert_nodes().count(), 3);
        assert_eq!(hmm.trans_nodes().count(), 3);
        assert_eq!(hmm.metadata_value("STATS"), Some("LOCAL MSV       -9.9559  0.70785"));
        assert_eq!(hmm.compo()['T'], -1.2);
        assert_eq!(hmm.match_node(1).unwrap()['A'], -0.5);
        assert_eq!(hmm.match_node(2).unwrap()['T'], -0.5);
        assert_eq!(hmm.insert_node(0).unwrap()['G'], -1.38629);
        assert_eq!(hmm.trans_node(1).unwrap()[Transition::DD], -0.4);
        assert_eq!(hmm.trans_node(2).unwrap()["MD"], f64::NEG_INFINITY);
        Ok(())
    }

    #[test]
    fn test_begin_node() -> Result<()> {
        let hmm = parse(NT_PROFILE, ReaderConfig::default())?.expect("one profile");
        let begin = hmm.match_node(0).unwrap();
        assert_eq!(begin['A'], 0.0);
        for symbol in ['C', 'G', 'T'] {
            assert_eq!(begin[symbol], f64::NEG_INFINITY);
        }

        let config = ReaderConfig::new(ScoreMode::Probability, RowPolicy::Strict);
        let hmm = parse(NT_PROFILE, config)?.expect("one profile");
        let begin = hmm.match_node(0).unwrap();
        assert_eq!(begin.scores(), &[1.0, 0.0, 0.0, 0.0]);
        Ok(())
    }

    #[test]
    fn test_empty_stream() -> Result<()> {
        assert!(parse("", ReaderConfig::default())?.is_none());
        Ok(())
    }

    #[test]
    fn test_consumes_exactly_one_profile() -> Result<()> {
        let text = format!("{NT_PROFILE}{NT_PROFILE}");
        let mut lines = LineReader::new(text.as_bytes());
        assert!(read_profile(&mut lines, ReaderConfig::default())?.is_some());
        assert_eq!(lines.line_number(), 17);
        assert!(read_profile(&mut lines, ReaderConfig::default())?.is_some());
        assert!(read_profile(&mut lines, ReaderConfig::default())?.is_none());
        Ok(())
    }

    #[test]
    fn test_missing_alphabet() {
        let err = parse_err("HMMER3/f [3.1b2 | February 2015]\nNAME  tiny\nLENG  2\n");
        assert_eq!(err, ParseError::MissingAlphabet(3));
    }

    #[test]
    fn test_malformed_metadata() {
        let err = parse_err("HMMER3/f\nNAME  tiny\nDESC\n");
        assert_eq!(
            err,
            ParseError::MalformedMetadata {
                line: 3,
                content: "DESC".to_string()
            }
        );
    }

    #[test]
    fn test_duplicate_metadata_preserved() -> Result<()> {
        let text = NT_PROFILE.replacen("LENG  2\n", "LENG  2\nCOM   [1] hmmbuild\nCOM   [2] hmmcalibrate\n", 1);
        let hmm = parse(&text, ReaderConfig::default())?.expect("one profile");
        let coms: Vec<&str> = hmm
            .metadata()
            .iter()
            .filter(|(k, _)| k == "COM")
            .map(|(_, v)| v.as_str())
            .collect();
        assert_eq!(coms, vec!["[1] hmmbuild", "[2] hmmcalibrate"]);
        Ok(())
    }

    #[test]
    fn test_truncated_body() {
        let text: String = NT_PROFILE.lines().take(13).map(|l| format!("{l}\n")).collect();
        let err = parse_err(&text);
        assert!(matches!(err, ParseError::UnexpectedEndOfStream { line: 13, .. }));
    }

    #[test]
    fn test_short_row() {
        let text = NT_PROFILE.replacen("      1   0.50000  2.00000  3.00000  4.00000      1 a - - -", "      1   0.50000  2.00000", 1);
        let err = parse_err(&text);
        assert_eq!(
            err,
            ParseError::FieldCount {
                row: "match",
                expected: 4,
                found: 2,
                line: 11
            }
        );
    }

    #[test]
    fn test_extra_fields_follow_policy() -> Result<()> {
        let text = NT_PROFILE.replacen(
            "0.20000  4.10000  5.10000  0.61958  0.77255  0.30000  0.40000",
            "0.20000  4.10000  5.10000  0.61958  0.77255  0.30000  0.40000  9.99999",
            1,
        );
        let err = parse_err(&text);
        assert!(matches!(err, ParseError::FieldCount { row: "transition", found: 8, .. }));

        let config = ReaderConfig::new(ScoreMode::NegLog, RowPolicy::Truncate);
        let hmm = parse(&text, config)?.expect("one profile");
        assert_eq!(hmm.trans_node(1).unwrap()["DD"], -0.4);
        Ok(())
    }

    #[test]
    fn test_invalid_score() {
        let text = NT_PROFILE.replacen("1.30000", "1.3O000", 1);
        let err = parse_err(&text);
        assert_eq!(
            err,
            ParseError::InvalidScore {
                token: "1.3O000".to_string(),
                line: 8
            }
        );
    }

    #[test]
    fn test_missing_composition() {
        let text = NT_PROFILE.replacen("  COMPO ", "  CMOPO ", 1);
        assert!(matches!(
            parse_err(&text),
            ParseError::MissingComposition { line: 8, .. }
        ));
    }

    #[test]
    fn test_composition_label_relaxed() -> Result<()> {
        let text = NT_PROFILE.replacen("  COMPO ", "  CMOPO ", 1);
        let config = ReaderConfig::new(ScoreMode::NegLog, RowPolicy::Truncate);
        let hmm = parse(&text, config)?.expect("one profile");
        assert_eq!(hmm.compo()['A'], -1.3);

        let blank = NT_PROFILE.replacen("  COMPO   1.30000  1.40000  1.50000  1.20000", "", 1);
        assert!(matches!(
            parse(&blank, config),
            Err(Error::ParseError(ParseError::MissingComposition { line: 8, .. }))
        ));
        Ok(())
    }

    #[test]
    fn test_invalid_utf8() {
        let mut bytes = NT_PROFILE.as_bytes().to_vec();
        bytes[40] = 0xff;
        let mut lines = LineReader::new(bytes.as_slice());
        let err = read_profile(&mut lines, ReaderConfig::default()).unwrap_err();
        assert!(err.is_encoding());
        assert!(!err.is_parse());
    }
}
