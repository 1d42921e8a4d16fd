//! Utilities for parsing spreadsheet-style cell addresses.
//!
//! Addresses are strict: one or more uppercase ASCII letters followed by one or
//! more ASCII digits (`B2`, `AA10`). Anything else is not an address.

/// Decode column letters as base-26 with `A` = 1 .. `Z` = 26 (`AA` = 27).
///
/// Returns `None` for an empty string, a non-uppercase character, or overflow.
pub fn column_number(letters: &str) -> Option<u32> {
    if letters.is_empty() {
        return None;
    }
    let mut col: u32 = 0;
    for b in letters.bytes() {
        if !b.is_ascii_uppercase() {
            return None;
        }
        col = col
            .checked_mul(26)?
            .checked_add(u32::from(b - b'A') + 1)?;
    }
    Some(col)
}

/// Convert a 1-based column number to its letters (1 -> "A", 27 -> "AA").
///
/// Returns an empty string for 0.
pub fn column_letters(col: u32) -> String {
    let mut letters = Vec::new();
    let mut n = col;
    while n > 0 {
        n -= 1;
        letters.push(b'A' + u8::try_from(n % 26).unwrap_or(0));
        n /= 26;
    }
    letters.reverse();
    String::from_utf8(letters).unwrap_or_default()
}

/// Parse an address like "B2" into 1-based `(row, col)`.
///
/// Row 0 and values that do not fit in `u32` are rejected.
pub fn parse_cell_address(address: &str) -> Option<(u32, u32)> {
    let split = address.find(|c: char| !c.is_ascii_uppercase())?;
    let (letters, digits) = address.split_at(split);
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let col = column_number(letters)?;
    let row: u32 = digits.parse().ok()?;
    if row == 0 {
        return None;
    }
    Some((row, col))
}

/// Format 1-based `(row, col)` as an address like "B2".
pub fn format_cell_address(row: u32, col: u32) -> String {
    format!("{}{}", column_letters(col), row)
}
