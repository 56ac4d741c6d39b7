use crate::crypto::cipher_traits::{CipherAlgorithm, SymmetricCipher};
use crate::crypto::cipher_types::{Direction, Key, BLOCK_SIZE, KEY_SIZE, ROUNDS};
use crate::crypto::des_key_expansion::DesKeyExpansion;
use crate::crypto::des_tables::{FP, IP};
use crate::crypto::des_transformation::DesTransformation;
use crate::crypto::encryption_transformation::EncryptionTransformation;
use crate::crypto::error::{CipherError, Result};
use crate::crypto::feistel_network::FeistelNetwork;
use crate::crypto::key_expansion::KeyExpansion;
use crate::crypto::utils::permute;
use std::sync::{Arc, LazyLock};

static STANDARD_DES: LazyLock<DES> = LazyLock::new(DES::standard);

/// Derives the 16 round subkeys of `key`.
pub fn schedule(key: &[u8]) -> Vec<Vec<u8>> {
    DesKeyExpansion.generate_round_keys(key)
}

/// Encrypts or decrypts one block with an already computed schedule.
///
/// Panics when `block` is not 8 bytes or `round_keys` does not hold 16
/// subkeys.
pub fn transform(block: &[u8], round_keys: &[Vec<u8>], direction: Direction) -> Vec<u8> {
    STANDARD_DES.transform(block, round_keys, direction)
}

pub struct DES {
    feistel_network: FeistelNetwork,
    key_expansion: Arc<dyn KeyExpansion + Send + Sync>,
    round_keys: Vec<Vec<u8>>,
}

impl DES {
    pub fn new(
        key_expansion: Arc<dyn KeyExpansion + Send + Sync>,
        transformation: Arc<dyn EncryptionTransformation + Send + Sync>,
    ) -> Self {
        let feistel_network = FeistelNetwork::new(ROUNDS, transformation);

        DES {
            feistel_network,
            key_expansion,
            round_keys: Vec::new(),
        }
    }

    /// Standard key schedule and round function, no key set yet.
    pub fn standard() -> Self {
        DES::new(Arc::new(DesKeyExpansion), Arc::new(DesTransformation))
    }

    pub fn from_key(key: &Key) -> Self {
        let mut des = DES::standard();
        des.round_keys = des.key_expansion.generate_round_keys(key);
        des
    }

    /// Reuses a schedule computed earlier, e.g. by [`schedule`].
    pub fn from_round_keys(round_keys: Vec<Vec<u8>>) -> Self {
        assert_eq!(round_keys.len(), ROUNDS, "DES schedule must hold 16 round keys");
        let mut des = DES::standard();
        des.round_keys = round_keys;
        des
    }

    pub fn with_key(key: &[u8]) -> Result<Self> {
        let mut des = DES::standard();
        des.set_key(key)?;
        Ok(des)
    }

    pub fn round_keys(&self) -> &[Vec<u8>] {
        &self.round_keys
    }

    pub fn transform(&self, block: &[u8], round_keys: &[Vec<u8>], direction: Direction) -> Vec<u8> {
        assert_eq!(block.len(), BLOCK_SIZE, "DES block must be 8 bytes");

        let permuted = permute(block, &IP);
        let result = match direction {
            Direction::Encrypt => self
                .feistel_network
                .encrypt_with_round_keys(&permuted, round_keys),
            Direction::Decrypt => self
                .feistel_network
                .decrypt_with_round_keys(&permuted, round_keys),
        };
        permute(&result, &FP)
    }

    pub fn encrypt(&self, block: &[u8]) -> Vec<u8> {
        self.transform(block, &self.round_keys, Direction::Encrypt)
    }

    pub fn decrypt(&self, block: &[u8]) -> Vec<u8> {
        self.transform(block, &self.round_keys, Direction::Decrypt)
    }
}

impl CipherAlgorithm for DES {
    fn encrypt(&self, block: &[u8]) -> Vec<u8> {
        DES::encrypt(self, block)
    }
    fn decrypt(&self, block: &[u8]) -> Vec<u8> {
        DES::decrypt(self, block)
    }
}

impl SymmetricCipher for DES {
    fn set_key(&mut self, key: &[u8]) -> Result<()> {
        if key.len() != KEY_SIZE {
            return Err(CipherError::InvalidKeyLength {
                expected: KEY_SIZE,
                actual: key.len(),
            });
        }
        self.round_keys = self.key_expansion.generate_round_keys(key);
        Ok(())
    }

    fn block_size(&self) -> usize {
        BLOCK_SIZE
    }
}
