use crate::crypto::encryption_transformation::EncryptionTransformation;
use crate::crypto::utils::xor_bytes;
use std::sync::Arc;

pub struct FeistelNetwork {
    num_round: usize,
    transformation: Arc<dyn EncryptionTransformation + Send + Sync>,
}

impl FeistelNetwork {
    pub fn new(
        num_round: usize,
        transformation: Arc<dyn EncryptionTransformation + Send + Sync>,
    ) -> Self {
        Self {
            num_round,
            transformation,
        }
    }

    /// Runs the rounds in key order and emits `right || left`.
    pub fn encrypt_with_round_keys(&self, block: &[u8], round_keys: &[Vec<u8>]) -> Vec<u8> {
        assert_eq!(block.len() % 2, 0, "Block size must be even");
        assert_eq!(
            round_keys.len(),
            self.num_round,
            "Expected {} round keys",
            self.num_round
        );

        let (left, right) = block.split_at(block.len() / 2);

        let mut left = left.to_vec();
        let mut right = right.to_vec();

        for round_key in round_keys {
            let feistel_out = self.transformation.transform(&right, round_key);
            let new_right = xor_bytes(&left, &feistel_out);
            left = std::mem::replace(&mut right, new_right);
        }

        [right, left].concat()
    }

    /// Same network, round keys consumed back to front.
    pub fn decrypt_with_round_keys(&self, block: &[u8], round_keys: &[Vec<u8>]) -> Vec<u8> {
        let reversed: Vec<Vec<u8>> = round_keys.iter().rev().cloned().collect();
        self.encrypt_with_round_keys(block, &reversed)
    }
}
