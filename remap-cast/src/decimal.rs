//! Fixed-point formatting over string-held decimals.
//!
//! Decimal values keep their full precision as strings; only outbound
//! formatting reduces them to a declared number of fractional digits.
//! Rounding is half-up, carried digit-wise so precision never passes
//! through a binary float.

use crate::error::{CastError, CastResult};

/// Splits a decimal literal into (negative, integer digits, fraction digits).
///
/// Accepts an optional leading sign, `"12"`, `"12.34"`, `".5"` and `"7."`.
/// No exponents, no grouping separators.
pub(crate) fn split_decimal(raw: &str) -> Option<(bool, &str, &str)> {
    let raw = raw.trim();
    let (negative, rest) = match raw.as_bytes().first()? {
        b'-' => (true, &raw[1..]),
        b'+' => (false, &raw[1..]),
        _ => (false, raw),
    };
    let (int_part, frac_part) = match rest.split_once('.') {
        Some((i, f)) => (i, f),
        None => (rest, ""),
    };
    if int_part.is_empty() && frac_part.is_empty() {
        return None;
    }
    if !int_part.bytes().all(|b| b.is_ascii_digit()) || !frac_part.bytes().all(|b| b.is_ascii_digit())
    {
        return None;
    }
    Some((negative, int_part, frac_part))
}

/// Formats a decimal string to exactly `digits` fractional digits, half-up.
pub fn format_decimal(raw: &str, digits: usize) -> CastResult<String> {
    let (negative, int_part, frac_part) =
        split_decimal(raw).ok_or_else(|| CastError::Unparsable {
            kind: "decimal".into(),
            raw: serde_json::Value::String(raw.into()),
        })?;

    let mut int_digits: Vec<u8> = if int_part.is_empty() {
        vec![0]
    } else {
        int_part.bytes().map(|b| b - b'0').collect()
    };
    let mut frac_digits: Vec<u8> = frac_part.bytes().map(|b| b - b'0').collect();

    if frac_digits.len() > digits {
        let round_up = frac_digits[digits] >= 5;
        frac_digits.truncate(digits);
        if round_up {
            let mut carry = 1u8;
            for d in frac_digits.iter_mut().rev() {
                *d += carry;
                carry = *d / 10;
                *d %= 10;
                if carry == 0 {
                    break;
                }
            }
            if carry > 0 {
                for d in int_digits.iter_mut().rev() {
                    *d += carry;
                    carry = *d / 10;
                    *d %= 10;
                    if carry == 0 {
                        break;
                    }
                }
                if carry > 0 {
                    int_digits.insert(0, carry);
                }
            }
        }
    } else {
        frac_digits.resize(digits, 0);
    }

    // Strip leading zeros but keep a single zero before the point.
    let first_nonzero = int_digits.iter().position(|&d| d != 0);
    let int_str: String = match first_nonzero {
        Some(pos) => int_digits[pos..].iter().map(|d| (d + b'0') as char).collect(),
        None => "0".to_string(),
    };
    let frac_str: String = frac_digits.iter().map(|d| (d + b'0') as char).collect();

    let zero = int_str == "0" && frac_digits.iter().all(|&d| d == 0);
    let sign = if negative && !zero { "-" } else { "" };

    if digits == 0 {
        Ok(format!("{sign}{int_str}"))
    } else {
        Ok(format!("{sign}{int_str}.{frac_str}"))
    }
}
