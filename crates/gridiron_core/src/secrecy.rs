//! Secrecy codec for the hidden defensive number
//!
//! The defense commits its number before the offense picks one, so the value
//! has to be unreadable through any normal read path until resolution. This
//! is a fairness control, not a security boundary: a deterministic,
//! reversible, side-effect-free keystream derived from the play id is
//! exactly enough.

use sha2::{Digest, Sha256};

use crate::error::{GameError, Result};
use crate::models::PlayId;

const SEAL_SALT: &[u8] = b"gridiron-defense-seal-v1";

fn keystream(play_id: &PlayId) -> [u8; 2] {
    let mut hasher = Sha256::new();
    hasher.update(play_id.0.as_bytes());
    hasher.update(SEAL_SALT);
    let digest = hasher.finalize();
    [digest[0], digest[1]]
}

/// Seal a plain number under the play's key. Hex output so the stored field
/// is printable but carries no trace of the plain value.
pub fn seal(play_id: &PlayId, number: u16) -> String {
    let key = keystream(play_id);
    let bytes = number.to_le_bytes();
    let sealed = [bytes[0] ^ key[0], bytes[1] ^ key[1]];
    format!("{:02x}{:02x}", sealed[0], sealed[1])
}

/// Open a sealed number. Fails only on malformed ciphertext.
pub fn open(play_id: &PlayId, ciphertext: &str) -> Result<u16> {
    if ciphertext.len() != 4 {
        return Err(GameError::Codec(format!(
            "ciphertext length {} != 4",
            ciphertext.len()
        )));
    }
    let lo = u8::from_str_radix(&ciphertext[0..2], 16)
        .map_err(|e| GameError::Codec(e.to_string()))?;
    let hi = u8::from_str_radix(&ciphertext[2..4], 16)
        .map_err(|e| GameError::Codec(e.to_string()))?;
    let key = keystream(play_id);
    Ok(u16::from_le_bytes([lo ^ key[0], hi ^ key[1]]))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seal_then_open_is_identity() {
        let id = PlayId::new();
        for number in [1u16, 2, 750, 751, 1499, 1500] {
            let sealed = seal(&id, number);
            assert_eq!(open(&id, &sealed).unwrap(), number);
        }
    }

    #[test]
    fn seal_is_deterministic_per_play() {
        let id = PlayId::new();
        assert_eq!(seal(&id, 1234), seal(&id, 1234));
    }

    #[test]
    fn different_plays_use_different_keys() {
        let a = PlayId::new();
        let b = PlayId::new();
        // Equal plain numbers should not produce equal ciphertexts across
        // plays (keystream is id-derived).
        assert_ne!(seal(&a, 777), seal(&b, 777));
    }

    #[test]
    fn sealed_text_does_not_leak_the_number() {
        let id = PlayId::new();
        let sealed = seal(&id, 1500);
        assert!(!sealed.contains("1500"));
    }

    #[test]
    fn malformed_ciphertext_is_rejected() {
        let id = PlayId::new();
        assert!(open(&id, "zz00").is_err());
        assert!(open(&id, "00").is_err());
    }
}
