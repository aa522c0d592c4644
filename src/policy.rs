use crate::ParseError;

/// Policy for handling rows whose field count does not match the alphabet
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RowPolicy {
    /// Any mismatch in the number of fields is a parse error
    #[default]
    Strict,
    /// Extra trailing fields are dropped; missing fields are still an error
    Truncate,
}
impl RowPolicy {
    /// Selects the score fields of a row according to the policy
    ///
    /// Returns the first `expected` fields. Missing fields are always an error.
    /// Extra fields are an error under [`RowPolicy::Strict`] unless they fit within
    /// `trailing`, the number of non-score columns the row kind is allowed to carry.
    ///
    /// # Arguments
    /// * `row` - The kind of row, used for error reporting
    /// * `fields` - The fields of the row, label already removed
    /// * `expected` - The number of score fields to select
    /// * `trailing` - The number of annotation fields permitted after the scores
    /// * `line` - The line of the row, used for error reporting
    pub fn select<'a, 'b>(
        &self,
        row: &'static str,
        fields: &'a [&'b str],
        expected: usize,
        trailing: usize,
        line: usize,
    ) -> Result<&'a [&'b str], ParseError> {
        let found = fields.len();
        if found < expected {
            return Err(ParseError::FieldCount {
                row,
                expected,
                found,
                line,
            });
        }
        if found > expected + trailing {
            match self {
                Self::Strict => {
                    return Err(ParseError::FieldCount {
                        row,
                        expected,
                        found,
                        line,
                    })
                }
                Self::Truncate => {
                    log::warn!(
                        "Line {line}: dropping {} extra fields from {row} row",
                        found - expected - trailing
                    );
                }
            }
        }
        Ok(&fields[..expected])
    }
}

#[cfg(test)]
mod testing {
    use super::*;
    use anyhow::Result;

    #[test]
    fn test_exact() -> Result<()> {
        let fields = ["1.0", "2.0", "3.0"];
        assert_eq!(RowPolicy::Strict.select("insert", &fields, 3, 0, 1)?, &fields);
        assert_eq!(RowPolicy::Truncate.select("insert", &fields, 3, 0, 1)?, &fields);
        Ok(())
    }

    #[test]
    fn test_short_row_always_fails() {
        let fields = ["1.0", "2.0"];
        for policy in [RowPolicy::Strict, RowPolicy::Truncate] {
            let err = policy.select("insert", &fields, 4, 0, 9).unwrap_err();
            assert_eq!(
                err,
                ParseError::FieldCount {
                    row: "insert",
                    expected: 4,
                    found: 2,
                    line: 9
                }
            );
        }
    }

    #[test]
    fn test_extra_fields() -> Result<()> {
        let fields = ["1.0", "2.0", "3.0", "4.0"];
        assert!(RowPolicy::Strict
            .select("transition", &fields, 3, 0, 1)
            .is_err());
        assert_eq!(
            RowPolicy::Truncate.select("transition", &fields, 3, 0, 1)?,
            &fields[..3]
        );
        Ok(())
    }

    #[test]
    fn test_trailing_annotations_allowed() -> Result<()> {
        let fields = ["1.0", "2.0", "1", "m", "-", "-", "-"];
        assert_eq!(
            RowPolicy::Strict.select("match", &fields, 2, 5, 1)?,
            &fields[..2]
        );
        Ok(())
    }
}
