//! Compact string spellings of small permutations.
//!
//! A permutation of length at most 62 is written one character per point,
//! using the digits, then lower case, then upper case letters. The base-36
//! variant stops after the lower case letters and refuses upper case input.

use super::Permutation;
use crate::error::DessinError;

pub const BASE62_CHARS: &[u8; 62] =
    b"0123456789abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ";

fn digit_value(c: char, base: usize) -> Option<usize> {
    let value = match c {
        '0'..='9' => c as usize - '0' as usize,
        'a'..='z' => c as usize - 'a' as usize + 10,
        'A'..='Z' => c as usize - 'A' as usize + 36,
        _ => return None,
    };
    (value < base).then_some(value)
}

fn digits_from_str(s: &str, base: usize) -> Result<Vec<usize>, DessinError> {
    s.chars()
        .enumerate()
        .map(|(position, c)| {
            digit_value(c, base).ok_or_else(|| DessinError::Decode {
                input: s.to_string(),
                position,
            })
        })
        .collect()
}

fn str_from_digits(seq: &[usize], base: usize) -> Result<String, DessinError> {
    seq.iter()
        .map(|&i| {
            if i < base {
                Ok(BASE62_CHARS[i] as char)
            } else {
                Err(DessinError::InvalidOperand(format!(
                    "{i} has no base-{base} digit"
                )))
            }
        })
        .collect()
}

/// Decodes a base-62 string into its digit values.
///
/// # Examples
///
/// ```
/// # use dessins::permutation::encoding::digits_from_str62;
/// assert_eq!(digits_from_str62("09azAZ").unwrap(), vec![0, 9, 10, 35, 36, 61]);
/// assert!(digits_from_str62("abc$").is_err());
/// ```
pub fn digits_from_str62(s: &str) -> Result<Vec<usize>, DessinError> {
    digits_from_str(s, 62)
}

/// Inverse of [`digits_from_str62`]. Values of 62 and above are rejected.
pub fn str62_from_digits(seq: &[usize]) -> Result<String, DessinError> {
    str_from_digits(seq, 62)
}

/// Decodes and validates a base-62 permutation.
///
/// # Examples
///
/// ```
/// # use dessins::permutation::encoding::perm_from_str62;
/// assert_eq!(perm_from_str62("120").unwrap().map(), &[1, 2, 0]);
/// assert!(perm_from_str62("11").is_err());
/// ```
pub fn perm_from_str62(s: &str) -> Result<Permutation, DessinError> {
    Permutation::try_from_map(digits_from_str62(s)?)
}

pub fn str62_from_perm(perm: &Permutation) -> Result<String, DessinError> {
    str62_from_digits(perm.map())
}

/// Decodes a lower case base-36 permutation (length at most 36).
///
/// # Examples
///
/// ```
/// # use dessins::permutation::encoding::perm_from_str36;
/// assert_eq!(perm_from_str36("1230").unwrap().map(), &[1, 2, 3, 0]);
/// assert!(perm_from_str36("A").is_err());
/// ```
pub fn perm_from_str36(s: &str) -> Result<Permutation, DessinError> {
    Permutation::try_from_map(digits_from_str(s, 36)?)
}

/// Encodes a permutation of length at most 36 in lower case base-36.
///
/// # Examples
///
/// ```
/// # use dessins::permutation::{encoding::str36_from_perm, Permutation};
/// assert_eq!(
///     str36_from_perm(&Permutation::id(36)).unwrap(),
///     "0123456789abcdefghijklmnopqrstuvwxyz"
/// );
/// assert!(str36_from_perm(&Permutation::id(37)).is_err());
/// ```
pub fn str36_from_perm(perm: &Permutation) -> Result<String, DessinError> {
    if perm.len() > 36 {
        return Err(DessinError::InvalidOperand(format!(
            "permutation of length {} is too long for base 36",
            perm.len()
        )));
    }
    str_from_digits(perm.map(), 36)
}
