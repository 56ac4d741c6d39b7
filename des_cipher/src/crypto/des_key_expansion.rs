use crate::crypto::cipher_types::{KEY_SIZE, ROUNDS};
use crate::crypto::des_tables::{PC1, PC2, SHIFT_BITS};
use crate::crypto::key_expansion::KeyExpansion;
use crate::crypto::utils::permute;

const HALF_MASK: u32 = 0x0FFF_FFFF;

pub struct DesKeyExpansion;

/// Splits the 56-bit PC-1 output into its 28-bit halves.
///
/// The boundary falls inside byte 3: its high nibble ends C, its low nibble
/// starts D.
pub fn split_halves(permuted: &[u8; 7]) -> (u32, u32) {
    let c = (permuted[0] as u32) << 20
        | (permuted[1] as u32) << 12
        | (permuted[2] as u32) << 4
        | (permuted[3] as u32) >> 4;
    let d = (permuted[3] as u32 & 0x0F) << 24
        | (permuted[4] as u32) << 16
        | (permuted[5] as u32) << 8
        | permuted[6] as u32;
    (c, d)
}

/// Inverse of [`split_halves`].
pub fn join_halves(c: u32, d: u32) -> [u8; 7] {
    [
        (c >> 20) as u8,
        (c >> 12) as u8,
        (c >> 4) as u8,
        ((c << 4) as u8) | ((d >> 24) as u8 & 0x0F),
        (d >> 16) as u8,
        (d >> 8) as u8,
        d as u8,
    ]
}

/// Left rotation inside a 28-bit field.
pub fn rotate_half(half: u32, shift: u32) -> u32 {
    ((half << shift) | (half >> (28 - shift))) & HALF_MASK
}

impl KeyExpansion for DesKeyExpansion {
    fn generate_round_keys(&self, key: &[u8]) -> Vec<Vec<u8>> {
        assert_eq!(key.len(), KEY_SIZE, "DES key must be 8 bytes");

        let mut permuted = [0u8; 7];
        permuted.copy_from_slice(&permute(key, &PC1));
        let (mut c, mut d) = split_halves(&permuted);

        // rotations accumulate, so subkeys come out strictly in round order
        let mut round_keys = Vec::with_capacity(ROUNDS);
        for &shift in &SHIFT_BITS {
            c = rotate_half(c, shift);
            d = rotate_half(d, shift);
            round_keys.push(permute(&join_halves(c, d), &PC2));
        }

        round_keys
    }
}
