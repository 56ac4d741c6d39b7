use crate::crypto::cipher_types::ROUND_KEY_SIZE;
use crate::crypto::des_tables::{E, P, S_BOXES};
use crate::crypto::encryption_transformation::EncryptionTransformation;
use crate::crypto::utils::{permute, xor_bytes};
use bitvec::prelude::*;

/// The DES round function `f(R, K)`.
pub struct DesTransformation;

impl EncryptionTransformation for DesTransformation {
    fn transform(&self, r_block: &[u8], round_key: &[u8]) -> Vec<u8> {
        assert_eq!(r_block.len(), 4, "DES half block must be 4 bytes");
        assert_eq!(round_key.len(), ROUND_KEY_SIZE, "DES round key must be 6 bytes");

        // 1. Expansion
        let expanded = permute(r_block, &E);

        // 2. XOR
        let mixed = xor_bytes(&expanded, round_key);

        // 3. S-boxes
        let mut s_result = [0u8; 4];
        for (box_i, chunk) in mixed.view_bits::<Msb0>().chunks_exact(6).enumerate() {
            let row = (usize::from(chunk[0]) << 1) | usize::from(chunk[5]);
            let col = chunk[1..5]
                .iter()
                .by_vals()
                .fold(0usize, |acc, bit| (acc << 1) | usize::from(bit));
            let nibble = S_BOXES[box_i][row * 16 + col];
            if box_i % 2 == 0 {
                s_result[box_i / 2] |= nibble << 4;
            } else {
                s_result[box_i / 2] |= nibble;
            }
        }

        // 4. P-permutation
        permute(&s_result, &P)
    }
}
