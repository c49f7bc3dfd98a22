//! Conversion between zero-based `(row, col)` indexes and `A1`-style cell references.

/// Converts column letters (`"A"`, `"AJ"`) to a zero-based index.
pub fn col_to_index(letters: &str) -> Option<usize> {
    if letters.is_empty() {
        return None;
    }
    let mut index = 0usize;
    for letter in letters.chars() {
        if !letter.is_ascii_alphabetic() {
            return None;
        }
        let digit = (letter.to_ascii_uppercase() as u8 - b'A') as usize + 1;
        index = index.checked_mul(26)?.checked_add(digit)?;
    }
    Some(index - 1)
}

/// Converts a one-based row number (`"12"`) to a zero-based index.
pub fn row_to_index(digits: &str) -> Option<usize> {
    digits.parse::<usize>().ok().filter(|row| *row > 0).map(|row| row - 1)
}

/// Converts a zero-based column index to letters.
pub fn index_to_col(col: usize) -> String {
    let mut col = col + 1;
    let mut letters = Vec::new();
    while col > 0 {
        col -= 1;
        letters.push(b'A' + (col % 26) as u8);
        col /= 26;
    }
    letters.reverse();
    String::from_utf8(letters).unwrap_or_default()
}

/// Returns the `A1`-style reference of a zero-based position.
pub fn index_to_reference(row: usize, col: usize) -> String {
    format!("{}{}", index_to_col(col), row + 1)
}

/// Parses an `A1`-style reference (absolute markers allowed) into a zero-based position.
pub fn reference_to_index(reference: &str) -> Option<(usize, usize)> {
    let reference = reference.replace('$', "");
    let split = reference.find(|c: char| c.is_ascii_digit())?;
    let (letters, digits) = reference.split_at(split);
    Some((row_to_index(digits)?, col_to_index(letters)?))
}

/// Parses a `A1:BR200` dimension into `(first_row, first_col, last_row, last_col)`.
/// A single reference yields a one-cell range.
pub fn range_to_bounds(range: &str) -> Option<(usize, usize, usize, usize)> {
    let (start, end) = range.split_once(':').unwrap_or((range, range));
    let (first_row, first_col) = reference_to_index(start)?;
    let (last_row, last_col) = reference_to_index(end)?;
    Some((first_row, first_col, last_row, last_col))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn converts_columns() {
        assert_eq!(col_to_index("A"), Some(0));
        assert_eq!(col_to_index("Z"), Some(25));
        assert_eq!(col_to_index("AA"), Some(26));
        assert_eq!(col_to_index("AJ"), Some(35));
        assert_eq!(col_to_index("br"), Some(69));
        assert_eq!(col_to_index(""), None);
        assert_eq!(col_to_index("A1"), None);

        assert_eq!(index_to_col(0), "A");
        assert_eq!(index_to_col(25), "Z");
        assert_eq!(index_to_col(26), "AA");
        assert_eq!(index_to_col(48), "AW");
        assert_eq!(index_to_col(702), "AAA");
    }

    #[test]
    fn converts_references() {
        assert_eq!(reference_to_index("A1"), Some((0, 0)));
        assert_eq!(reference_to_index("$BB$7"), Some((6, 53)));
        assert_eq!(reference_to_index("A0"), None);
        assert_eq!(reference_to_index("12"), None);
        assert_eq!(reference_to_index("AB"), None);
        assert_eq!(index_to_reference(6, 53), "BB7");
    }

    #[test]
    fn parses_dimensions() {
        assert_eq!(range_to_bounds("A1:BR200"), Some((0, 0, 199, 69)));
        assert_eq!(range_to_bounds("C3"), Some((2, 2, 2, 2)));
        assert_eq!(range_to_bounds("A1:"), None);
    }
}
