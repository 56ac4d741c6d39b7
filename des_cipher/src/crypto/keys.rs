//! Key material as exchanged with users: colon-separated hex strings.

use crate::crypto::cipher_types::{Key, KEY_SIZE};
use crate::crypto::error::{CipherError, Result};
use rand::RngCore;

const HEX_KEY_LEN: usize = KEY_SIZE * 2;

/// Parses `hex[:hex:hex]`. Each part is left-padded with zeros and cut to 16
/// hex digits before decoding.
pub fn parse_keys(text: &str) -> Result<Vec<Key>> {
    let parts: Vec<&str> = text.trim().split(':').collect();
    if parts.len() != 1 && parts.len() != 3 {
        return Err(CipherError::InvalidKeyCount(parts.len()));
    }

    parts.into_iter().map(parse_key).collect()
}

fn parse_key(part: &str) -> Result<Key> {
    let padded = format!("{:0>width$}", part, width = HEX_KEY_LEN);
    let digits = padded
        .get(..HEX_KEY_LEN)
        .ok_or_else(|| CipherError::InvalidHexKey(padded.clone()))?;

    let mut key = [0u8; KEY_SIZE];
    hex::decode_to_slice(digits, &mut key)
        .map_err(|_| CipherError::InvalidHexKey(digits.to_string()))?;
    Ok(key)
}

pub fn generate_keys(count: usize) -> Vec<Key> {
    let mut rng = rand::rng();
    (0..count)
        .map(|_| {
            let mut key = [0u8; KEY_SIZE];
            rng.fill_bytes(&mut key);
            key
        })
        .collect()
}

pub fn keys_to_string(keys: &[Key]) -> String {
    keys.iter().map(hex::encode).collect::<Vec<_>>().join(":")
}
