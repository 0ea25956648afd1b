//! A1-style cell references ("B5", "aa12") ⇔ 1-based (row, col).

use crate::errors::{AppError, AppResult};

/// Parse an A1 reference into `(row, col)`.
pub fn parse_a1(reference: &str) -> AppResult<(u32, u32)> {
    let invalid = || AppError::InvalidCellRef(reference.to_string());
    let s = reference.trim();

    let split = s
        .find(|c: char| c.is_ascii_digit())
        .filter(|&i| i > 0)
        .ok_or_else(invalid)?;
    let (letters, digits) = s.split_at(split);

    if !letters.chars().all(|c| c.is_ascii_alphabetic()) {
        return Err(invalid());
    }

    let mut col: u32 = 0;
    for c in letters.chars() {
        let v = (c.to_ascii_uppercase() as u32) - ('A' as u32) + 1;
        col = col
            .checked_mul(26)
            .and_then(|n| n.checked_add(v))
            .ok_or_else(invalid)?;
    }

    let row: u32 = digits.parse().map_err(|_| invalid())?;
    if row == 0 {
        return Err(invalid());
    }

    Ok((row, col))
}

pub fn to_a1(row: u32, col: u32) -> String {
    let mut letters = Vec::new();
    let mut n = col;
    while n > 0 {
        let rem = (n - 1) % 26;
        letters.push((b'A' + rem as u8) as char);
        n = (n - 1) / 26;
    }
    letters.iter().rev().collect::<String>() + &row.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_common_references() {
        assert_eq!(parse_a1("A1").unwrap(), (1, 1));
        assert_eq!(parse_a1("b5").unwrap(), (5, 2));
        assert_eq!(parse_a1("Z10").unwrap(), (10, 26));
        assert_eq!(parse_a1("AA3").unwrap(), (3, 27));
    }

    #[test]
    fn rejects_malformed_references() {
        for bad in ["", "5", "B", "B0", "1B", "B5C", "Б5"] {
            assert!(
                matches!(parse_a1(bad), Err(AppError::InvalidCellRef(_))),
                "{bad}"
            );
        }
    }

    #[test]
    fn formats_back() {
        assert_eq!(to_a1(5, 2), "B5");
        assert_eq!(to_a1(3, 27), "AA3");
        assert_eq!(to_a1(1, 702), "ZZ1");
    }
}
