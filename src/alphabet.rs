use std::fmt;

/// The standard amino acid alphabet in HMMER order
pub const AMINO: &str = "ACDEFGHIKLMNPQRSTVWY";

/// The DNA alphabet in HMMER order
pub const DNA: &str = "ACGT";

/// The RNA alphabet in HMMER order
pub const RNA: &str = "ACGU";

/// Broad classification of an alphabet
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlphabetFamily {
    Amino,
    Dna,
    Rna,
    Unknown,
}
impl AlphabetFamily {
    /// The name HMMER writes on the `ALPH` line for this family
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Amino => "amino",
            Self::Dna => "DNA",
            Self::Rna => "RNA",
            Self::Unknown => "unknown",
        }
    }
}

/// The ordered set of symbols scored at every node of a profile
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alphabet {
    symbols: Vec<char>,
}
impl Alphabet {
    /// Builds an alphabet from the fields of an `HMM` declaration line
    ///
    /// The label is expected to be removed already. Fields are concatenated,
    /// so `["A", "C", "G", "T"]` and `["ACGT"]` produce the same alphabet.
    pub fn from_fields(fields: &[&str]) -> Self {
        Self {
            symbols: fields.iter().flat_map(|f| f.chars()).collect(),
        }
    }

    /// Returns the number of symbols
    #[must_use]
    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    /// Returns the symbols in file order
    #[must_use]
    pub fn symbols(&self) -> &[char] {
        &self.symbols
    }

    /// Returns the position of a symbol, if present
    #[must_use]
    pub fn position(&self, symbol: char) -> Option<usize> {
        self.symbols.iter().position(|&s| s == symbol)
    }

    /// Returns the first symbol
    ///
    /// Alphabets produced by the parser are never empty.
    #[must_use]
    pub fn first(&self) -> Option<char> {
        self.symbols.first().copied()
    }

    /// Classifies the alphabet by its exact symbol sequence
    #[must_use]
    pub fn family(&self) -> AlphabetFamily {
        let symbols: String = self.symbols.iter().collect();
        match symbols.as_str() {
            AMINO => AlphabetFamily::Amino,
            DNA => AlphabetFamily::Dna,
            RNA => AlphabetFamily::Rna,
            _ => AlphabetFamily::Unknown,
        }
    }
}
impl fmt::Display for Alphabet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for symbol in &self.symbols {
            write!(f, "{symbol}")?;
        }
        Ok(())
    }
}
