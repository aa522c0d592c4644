use std::fmt;
use std::ops::Index;
use std::str::FromStr;

use crate::Alphabet;

/// Number of transitions stored per node
pub const N_TRANSITIONS: usize = 7;

/// A transition between the match (M), insert (I) and delete (D) states of adjacent nodes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Transition {
    MM,
    MI,
    MD,
    IM,
    II,
    DM,
    DD,
}
impl Transition {
    /// All transitions in the column order of a profile file
    pub const ALL: [Transition; N_TRANSITIONS] = [
        Self::MM,
        Self::MI,
        Self::MD,
        Self::IM,
        Self::II,
        Self::DM,
        Self::DD,
    ];

    /// The column of this transition within a transition row
    #[must_use]
    pub fn column(self) -> usize {
        self as usize
    }

    /// The spelling used on the column header line of a profile file
    #[must_use]
    pub fn arrow(self) -> &'static str {
        match self {
            Self::MM => "m->m",
            Self::MI => "m->i",
            Self::MD => "m->d",
            Self::IM => "i->m",
            Self::II => "i->i",
            Self::DM => "d->m",
            Self::DD => "d->d",
        }
    }

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::MM => "MM",
            Self::MI => "MI",
            Self::MD => "MD",
            Self::IM => "IM",
            Self::II => "II",
            Self::DM => "DM",
            Self::DD => "DD",
        }
    }
}
impl FromStr for Transition {
    type Err = String;

    /// Accepts both `"MM"` and the column header spelling `"m->m"`
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|t| t.label() == s || t.arrow() == s)
            .ok_or_else(|| format!("Unknown transition label: {s}"))
    }
}
impl fmt::Display for Transition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Borrowed view of one emission row: a score for every alphabet symbol
#[derive(Debug, Clone, Copy)]
pub struct Emissions<'a> {
    alphabet: &'a Alphabet,
    scores: &'a [f64],
}
impl<'a> Emissions<'a> {
    pub(crate) fn new(alphabet: &'a Alphabet, scores: &'a [f64]) -> Self {
        Self { alphabet, scores }
    }

    /// Returns the score of a symbol, or `None` if it is not in the alphabet
    #[must_use]
    pub fn get(&self, symbol: char) -> Option<f64> {
        self.alphabet.position(symbol).map(|i| self.scores[i])
    }

    /// Iterates over `(symbol, score)` pairs in alphabet order
    pub fn iter(&self) -> impl Iterator<Item = (char, f64)> + 'a {
        self.alphabet
            .symbols()
            .iter()
            .copied()
            .zip(self.scores.iter().copied())
    }

    /// Returns the raw scores in alphabet order
    #[must_use]
    pub fn scores(&self) -> &'a [f64] {
        self.scores
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.scores.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.scores.is_empty()
    }
}
impl Index<char> for Emissions<'_> {
    type Output = f64;

    fn index(&self, symbol: char) -> &f64 {
        match self.alphabet.position(symbol) {
            Some(i) => &self.scores[i],
            None => panic!("Symbol {symbol:?} is not in the alphabet {}", self.alphabet),
        }
    }
}

/// Borrowed view of one transition row
#[derive(Debug, Clone, Copy)]
pub struct Transitions<'a> {
    scores: &'a [f64; N_TRANSITIONS],
}
impl<'a> Transitions<'a> {
    pub(crate) fn new(scores: &'a [f64; N_TRANSITIONS]) -> Self {
        Self { scores }
    }

    #[must_use]
    pub fn get(&self, transition: Transition) -> f64 {
        self.scores[transition.column()]
    }

    /// Returns the score of a transition given its label (e.g. `"DD"`)
    #[must_use]
    pub fn get_label(&self, label: &str) -> Option<f64> {
        label.parse::<Transition>().ok().map(|t| self.get(t))
    }

    /// Iterates over `(transition, score)` pairs in file column order
    pub fn iter(&self) -> impl Iterator<Item = (Transition, f64)> + 'a {
        Transition::ALL
            .into_iter()
            .zip(self.scores.iter().copied())
    }

    #[must_use]
    pub fn scores(&self) -> &'a [f64; N_TRANSITIONS] {
        self.scores
    }
}
impl Index<Transition> for Transitions<'_> {
    type Output = f64;

    fn index(&self, transition: Transition) -> &f64 {
        &self.scores[transition.column()]
    }
}
impl Index<&str> for Transitions<'_> {
    type Output = f64;

    fn index(&self, label: &str) -> &f64 {
        match label.parse::<Transition>() {
            Ok(t) => &self.scores[t.column()],
            Err(e) => panic!("{e}"),
        }
    }
}

#[cfg(test)]
mod testing {
    use super::*;

    #[test]
    fn test_transition_labels() {
        for (i, t) in Transition::ALL.into_iter().enumerate() {
            assert_eq!(t.column(), i);
            assert_eq!(t.label().parse::<Transition>(), Ok(t));
            assert_eq!(t.arrow().parse::<Transition>(), Ok(t));
        }
        assert_eq!("m->i".parse::<Transition>(), Ok(Transition::MI));
        assert_eq!("d->d".parse::<Transition>(), Ok(Transition::DD));
        assert!("XX".parse::<Transition>().is_err());
        assert!("m-m".parse::<Transition>().is_err());
    }

    #[test]
    fn test_emissions_view() {
        let abc = Alphabet::from_fields(&["ACGT"]);
        let scores = [-1.0, -2.0, -3.0, f64::NEG_INFINITY];
        let row = Emissions::new(&abc, &scores);
        assert_eq!(row.len(), 4);
        assert_eq!(row.get('C'), Some(-2.0));
        assert_eq!(row.get('U'), None);
        assert_eq!(row['T'], f64::NEG_INFINITY);
        let pairs: Vec<(char, f64)> = row.iter().collect();
        assert_eq!(pairs[2], ('G', -3.0));
    }

    #[test]
    #[should_panic(expected = "not in the alphabet")]
    fn test_emissions_index_panics() {
        let abc = Alphabet::from_fields(&["ACGT"]);
        let scores = [0.0; 4];
        let _ = Emissions::new(&abc, &scores)['X'];
    }

    #[test]
    fn test_transitions_view() {
        let scores = [-0.1, -0.2, -0.3, -0.4, -0.5, -0.6, -0.7];
        let row = Transitions::new(&scores);
        assert_eq!(row.get(Transition::MI), -0.2);
        assert_eq!(row["DD"], -0.7);
        assert_eq!(row["d->d"], -0.7);
        assert_eq!(row.get_label("i->m"), Some(-0.4));
        assert_eq!(row[Transition::IM], -0.4);
        assert_eq!(row.get_label("ZZ"), None);
        assert_eq!(row.iter().count(), N_TRANSITIONS);
    }
}
