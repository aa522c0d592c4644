mod node;

use std::fmt;

pub use node::{Emissions, Transition, Transitions, N_TRANSITIONS};

use crate::{Alphabet, ScoreMode};

/// One parsed profile HMM
///
/// A profile is immutable and owns all of its tables. Node `0` is the begin
/// node: its match row is synthesized (certain for the first symbol, impossible
/// for all others) while its insert and transition rows come from the file.
/// Nodes `1..=M` are read from the file, where `M` is the [model length](Profile::model_length).
#[derive(Debug, Clone, PartialEq)]
pub struct Profile {
    header: String,
    metadata: Vec<(String, String)>,
    alphabet: Alphabet,
    mode: ScoreMode,
    compo: Vec<f64>,
    match_nodes: Vec<Vec<f64>>,
    insert_nodes: Vec<Vec<f64>>,
    trans_nodes: Vec<[f64; N_TRANSITIONS]>,
}
impl Profile {
    /// Assembles a profile from fully parsed tables
    ///
    /// The parser guarantees the table shapes; this is checked again in debug builds.
    #[allow(clippy::too_many_arguments)]
    pub(crate) fn from_parts(
        header: String,
        metadata: Vec<(String, String)>,
        alphabet: Alphabet,
        mode: ScoreMode,
        compo: Vec<f64>,
        match_nodes: Vec<Vec<f64>>,
        insert_nodes: Vec<Vec<f64>>,
        trans_nodes: Vec<[f64; N_TRANSITIONS]>,
    ) -> Self {
        debug_assert_eq!(match_nodes.len(), insert_nodes.len());
        debug_assert_eq!(match_nodes.len(), trans_nodes.len());
        debug_assert_eq!(compo.len(), alphabet.len());
        debug_assert!(match_nodes
            .iter()
            .chain(insert_nodes.iter())
            .all(|row| row.len() == alphabet.len()));
        Self {
            header,
            metadata,
            alphabet,
            mode,
            compo,
            match_nodes,
            insert_nodes,
            trans_nodes,
        }
    }

    /// The first line of the profile, identifying the format version
    #[must_use]
    pub fn header(&self) -> &str {
        &self.header
    }

    /// Metadata `(key, value)` pairs in file order, duplicates preserved
    #[must_use]
    pub fn metadata(&self) -> &[(String, String)] {
        &self.metadata
    }

    /// Returns the first value stored under `key`
    #[must_use]
    pub fn metadata_value(&self, key: &str) -> Option<&str> {
        self.metadata
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// The `NAME` metadata value
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        self.metadata_value("NAME")
    }

    /// The `ACC` metadata value
    #[must_use]
    pub fn accession(&self) -> Option<&str> {
        self.metadata_value("ACC")
    }

    /// The `LENG` metadata value, if present and a valid integer
    #[must_use]
    pub fn declared_length(&self) -> Option<usize> {
        self.metadata_value("LENG").and_then(|v| v.parse().ok())
    }

    #[must_use]
    pub fn alphabet(&self) -> &Alphabet {
        &self.alphabet
    }

    /// The decoding mode the scores were stored with
    #[must_use]
    pub fn score_mode(&self) -> ScoreMode {
        self.mode
    }

    /// The model length `M`: the number of nodes read from the file
    #[must_use]
    pub fn model_length(&self) -> usize {
        self.match_nodes.len() - 1
    }

    /// The number of nodes including the begin node (`M + 1`)
    #[must_use]
    pub fn num_nodes(&self) -> usize {
        self.match_nodes.len()
    }

    /// Background residue composition
    #[must_use]
    pub fn compo(&self) -> Emissions<'_> {
        Emissions::new(&self.alphabet, &self.compo)
    }

    /// Match emissions of node `index` (`0..=M`)
    #[must_use]
    pub fn match_node(&self, index: usize) -> Option<Emissions<'_>> {
        self.match_nodes
            .get(index)
            .map(|row| Emissions::new(&self.alphabet, row))
    }

    /// Insert emissions of node `index` (`0..=M`)
    #[must_use]
    pub fn insert_node(&self, index: usize) -> Option<Emissions<'_>> {
        self.insert_nodes
            .get(index)
            .map(|row| Emissions::new(&self.alphabet, row))
    }

    /// Transitions out of node `index` (`0..=M`)
    #[must_use]
    pub fn trans_node(&self, index: usize) -> Option<Transitions<'_>> {
        self.trans_nodes.get(index).map(Transitions::new)
    }

    /// Iterates over the match emissions of every node, begin node first
    pub fn match_nodes(&self) -> impl Iterator<Item = Emissions<'_>> {
        self.match_nodes
            .iter()
            .map(|row| Emissions::new(&self.alphabet, row))
    }

    /// Iterates over the insert emissions of every node, begin node first
    pub fn insert_nodes(&self) -> impl Iterator<Item = Emissions<'_>> {
        self.insert_nodes
            .iter()
            .map(|row| Emissions::new(&self.alphabet, row))
    }

    /// Iterates over the transitions of every node, begin node first
    pub fn trans_nodes(&self) -> impl Iterator<Item = Transitions<'_>> {
        self.trans_nodes.iter().map(Transitions::new)
    }
}
impl fmt::Display for Profile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "File")?;
        writeln!(f, "----")?;
        writeln!(f, "Header       {}", self.header)?;
        writeln!(f, "Alphabet     {}", self.alphabet)?;
        writeln!(f, "Model length {}", self.model_length())?;
        writeln!(f)?;
        writeln!(f, "Metadata")?;
        write!(f, "--------")?;
        for (key, value) in &self.metadata {
            write!(f, "\n{key:<6}{value}")?;
        }
        Ok(())
    }
}
