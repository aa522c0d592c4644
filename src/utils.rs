/// Trims a raw line and collapses every internal run of spaces to a single space
///
/// Profile files align their numeric columns with padding, so every structural
/// split is done on the normalized form where fields are separated by exactly one space.
pub fn normalize_line(line: &str) -> String {
    let mut normalized = String::with_capacity(line.len());
    let mut last_was_space = false;
    for c in line.trim().chars() {
        if c == ' ' {
            if !last_was_space {
                normalized.push(c);
            }
            last_was_space = true;
        } else {
            normalized.push(c);
            last_was_space = false;
        }
    }
    normalized
}

/// Splits a normalized line into its fields
///
/// An empty line has no fields.
pub fn split_fields(normalized: &str) -> Vec<&str> {
    if normalized.is_empty() {
        return Vec::new();
    }
    normalized.split(' ').collect()
}
