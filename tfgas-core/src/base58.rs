//! Base58 UID decoding
//!
//! Bricklet UIDs are printed on the device and entered by the user as
//! base58 strings. The alphabet is the Tinkerforge one: digits and
//! letters with 0, O, I and l removed to avoid transcription mistakes.

use crate::error::{Error, Result};

/// Tinkerforge base58 alphabet
pub const ALPHABET: &str = "123456789abcdefghijkmnopqrstuvwxyzABCDEFGHJKLMNPQRSTUVWXYZ";

/// Decode a base58 UID string to its numeric form
///
/// # Errors
///
/// Returns an error if the string is empty, contains a character outside
/// the alphabet, or encodes a value larger than fits in a `u32`.
///
/// # Examples
///
/// ```
/// use tfgas_core::base58;
///
/// let uid = base58::decode("XYZ").unwrap();
/// assert_eq!(uid, 188_325);
/// ```
pub fn decode(uid: &str) -> Result<u32> {
    if uid.is_empty() {
        return Err(Error::InvalidUid {
            uid: uid.to_string(),
            reason: "empty string".to_string(),
        });
    }

    let mut value: u64 = 0;

    for character in uid.chars() {
        let digit = ALPHABET.find(character).ok_or_else(|| Error::InvalidUid {
            uid: uid.to_string(),
            reason: format!("character {character:?} is not in the base58 alphabet"),
        })? as u64;

        value = value * 58 + digit;

        if value > u32::MAX as u64 {
            return Err(Error::InvalidUid {
                uid: uid.to_string(),
                reason: "value does not fit in 32 bits".to_string(),
            });
        }
    }

    Ok(value as u32)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_known_values() {
        assert_eq!(decode("1").unwrap(), 0);
        assert_eq!(decode("a").unwrap(), 9);
        assert_eq!(decode("XYZ").unwrap(), 188_325);
    }

    #[test]
    fn test_decode_empty() {
        assert!(decode("").is_err());
    }

    #[test]
    fn test_decode_rejects_ambiguous_characters() {
        // 0, O, I and l are excluded from the alphabet
        assert!(decode("0").is_err());
        assert!(decode("O").is_err());
        assert!(decode("I").is_err());
        assert!(decode("l").is_err());
    }

    #[test]
    fn test_decode_overflow() {
        // Six Zs already exceed u32::MAX
        assert!(decode("ZZZZZZ").is_err());
    }

    mod properties {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn decode_never_panics(uid in ".{0,16}") {
                let _ = decode(&uid);
            }

            #[test]
            fn short_alphabet_strings_always_decode(
                uid in "[1-9a-km-zA-HJ-NP-Z]{1,5}"
            ) {
                // 58^5 - 1 still fits in a u32
                prop_assert!(decode(&uid).is_ok());
            }
        }
    }
}
