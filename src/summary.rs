//! Per-profile metadata summaries
//!
//! Produces one `NAME ACC LENG ALPH` row per profile of a file by running the
//! full parser, so malformed files are reported the same way as everywhere else.

use std::io::{BufRead, Write};
use std::path::Path;

use crate::error::{ParseError, Result};
use crate::{HmmReader, Profile};

/// Placeholder written when a profile has no accession
pub const MISSING_ACCESSION: &str = "-";

/// Column names of the tab-separated summary
pub const COLUMNS: [&str; 4] = ["NAME", "ACC", "LENG", "ALPH"];

/// Summary of one profile
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetadataRow {
    pub name: String,
    pub acc: String,
    pub leng: usize,
    pub alph: String,
}
impl MetadataRow {
    /// Projects the metadata of a profile
    ///
    /// # Arguments
    /// * `profile` - The parsed profile
    /// * `position` - The 1-based position of the profile in its file, used for error reporting
    ///
    /// # Errors
    ///
    /// Returns an error if `NAME` is absent or `LENG` is not an integer.
    pub fn from_profile(profile: &Profile, position: usize) -> std::result::Result<Self, ParseError> {
        let name = profile.name().ok_or(ParseError::MissingMetadata {
            key: "NAME",
            profile: position,
        })?;
        let acc = profile.accession().unwrap_or(MISSING_ACCESSION);
        let leng = match profile.metadata_value("LENG") {
            Some(value) => value
                .parse::<usize>()
                .map_err(|_| ParseError::InvalidMetadataValue {
                    key: "LENG",
                    value: value.to_string(),
                    profile: position,
                })?,
            None => profile.model_length(),
        };
        let alph = profile
            .metadata_value("ALPH")
            .unwrap_or_else(|| profile.alphabet().family().name());
        Ok(Self {
            name: name.to_string(),
            acc: acc.to_string(),
            leng,
            alph: alph.to_string(),
        })
    }
}

/// Summarizes every remaining profile of a reader
pub fn summarize<R: BufRead>(reader: &mut HmmReader<R>) -> Result<Vec<MetadataRow>> {
    let mut rows = Vec::new();
    while let Some(profile) = reader.read_profile()? {
        rows.push(MetadataRow::from_profile(&profile, reader.n_processed())?);
    }
    Ok(rows)
}

/// Summarizes every profile of a (possibly compressed) file
pub fn fetch_metadata<P: AsRef<Path>>(path: P) -> Result<Vec<MetadataRow>> {
    let mut reader = HmmReader::from_path(path)?;
    summarize(&mut reader)
}

/// Counts the profiles of a (possibly compressed) file
pub fn num_models<P: AsRef<Path>>(path: P) -> Result<usize> {
    let mut reader = HmmReader::from_path(path)?;
    while reader.read_profile()?.is_some() {}
    Ok(reader.n_processed())
}

/// Writes rows as tab-separated values, preceded by a header line
pub fn write_tsv<W: Write>(rows: &[MetadataRow], writer: &mut W) -> Result<()> {
    writeln!(writer, "{}", COLUMNS.join("\t"))?;
    for row in rows {
        writeln!(
            writer,
            "{}\t{}\t{}\t{}",
            row.name, row.acc, row.leng, row.alph
        )?;
    }
    Ok(())
}

#[cfg(test)]
mod testing {
    use super::*;
    use crate::Error;
    use anyhow::Result;

    fn profile_text(meta: &str) -> String {
        format!(
            "HMMER3/f [3.1b2 | February 2015]
{meta}HMM          A        C        G        T
            m->m     m->i     m->d     i->m     i->i     d->m     d->d
  COMPO   1.30000  1.40000  1.50000  1.20000
          1.38629  1.38629  1.38629  1.38629
          0.10000  4.00000  5.00000  0.61958  0.77255  0.00000        *
      1   0.50000  2.00000  3.00000  4.00000      1 a - - -
          1.38629  1.38629  1.38629  1.38629
          0.01000  4.20000        *  0.61958  0.77255  0.00000        *
//
"
        )
    }

    #[test]
    fn test_summary_rows() -> Result<()> {
        let text = format!(
            "{}{}",
            profile_text("NAME  first\nACC   PF00001.1\nLENG  1\nALPH  DNA\n"),
            profile_text("NAME  second\n")
        );
        let mut reader = HmmReader::new(text.as_bytes());
        let rows = summarize(&mut reader)?;
        assert_eq!(
            rows,
            vec![
                MetadataRow {
                    name: "first".to_string(),
                    acc: "PF00001.1".to_string(),
                    leng: 1,
                    alph: "DNA".to_string(),
                },
                MetadataRow {
                    name: "second".to_string(),
                    acc: "-".to_string(),
                    leng: 1,
                    alph: "DNA".to_string(),
                },
            ]
        );
        Ok(())
    }

    #[test]
    fn test_missing_name() {
        let text = format!("{}{}", profile_text("NAME  a\n"), profile_text("ACC   x\n"));
        let mut reader = HmmReader::new(text.as_bytes());
        match summarize(&mut reader) {
            Err(Error::ParseError(ParseError::MissingMetadata { key, profile })) => {
                assert_eq!(key, "NAME");
                assert_eq!(profile, 2);
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn test_invalid_length() {
        let text = profile_text("NAME  a\nLENG  many\n");
        let mut reader = HmmReader::new(text.as_bytes());
        assert!(matches!(
            summarize(&mut reader),
            Err(Error::ParseError(ParseError::InvalidMetadataValue { key: "LENG", .. }))
        ));
    }

    #[test]
    fn test_write_tsv() -> Result<()> {
        let rows = vec![MetadataRow {
            name: "Maf".to_string(),
            acc: "PF02545.13".to_string(),
            leng: 166,
            alph: "amino".to_string(),
        }];
        let mut out = Vec::new();
        write_tsv(&rows, &mut out)?;
        assert_eq!(
            String::from_utf8(out)?,
            "NAME\tACC\tLENG\tALPH\nMaf\tPF02545.13\t166\tamino\n"
        );
        Ok(())
    }
}
