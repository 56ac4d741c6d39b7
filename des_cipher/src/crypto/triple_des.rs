use crate::crypto::cipher_traits::{CipherAlgorithm, SymmetricCipher};
use crate::crypto::cipher_types::{Key, BLOCK_SIZE, KEY_SIZE};
use crate::crypto::des::{schedule, DES};
use crate::crypto::error::{CipherError, Result};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TripleKeySet {
    /// One key used by all three stages.
    Single(Key),
    Triple(Key, Key, Key),
}

impl TripleKeySet {
    pub fn from_keys(keys: &[Key]) -> Result<Self> {
        match keys {
            [k] => Ok(TripleKeySet::Single(*k)),
            [k1, k2, k3] => Ok(TripleKeySet::Triple(*k1, *k2, *k3)),
            _ => Err(CipherError::InvalidKeyCount(keys.len())),
        }
    }

    /// Splits 8 (one key) or 24 (three keys) raw bytes.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        if bytes.len() != KEY_SIZE && bytes.len() != 3 * KEY_SIZE {
            return Err(CipherError::InvalidKeyLength {
                expected: 3 * KEY_SIZE,
                actual: bytes.len(),
            });
        }
        let keys: Vec<Key> = bytes
            .chunks_exact(KEY_SIZE)
            .map(|chunk| {
                let mut key = [0u8; KEY_SIZE];
                key.copy_from_slice(chunk);
                key
            })
            .collect();
        TripleKeySet::from_keys(&keys)
    }

    /// Stage keys in the order K1, K2, K3.
    pub fn keys(&self) -> [Key; 3] {
        match self {
            TripleKeySet::Single(k) => [*k, *k, *k],
            TripleKeySet::Triple(k1, k2, k3) => [*k1, *k2, *k3],
        }
    }
}

/// Round keys of the three stages, K1 first (48 subkeys in total).
pub fn schedule_triple(keys: &TripleKeySet) -> [Vec<Vec<u8>>; 3] {
    keys.keys().map(|key| schedule(&key))
}

/// Encrypt-decrypt-encrypt composition of three DES stages.
pub struct TripleDes {
    stages: [DES; 3],
}

impl TripleDes {
    pub fn new(keys: &TripleKeySet) -> Self {
        TripleDes::from_schedules(schedule_triple(keys))
    }

    /// Builds the stages from schedules that may be shared with other ciphers.
    pub fn from_schedules(schedules: [Vec<Vec<u8>>; 3]) -> Self {
        TripleDes {
            stages: schedules.map(DES::from_round_keys),
        }
    }

    /// `E(K3, D(K2, E(K1, block)))`
    pub fn encrypt(&self, block: &[u8]) -> Vec<u8> {
        let [first, second, third] = &self.stages;
        third.encrypt(&second.decrypt(&first.encrypt(block)))
    }

    /// `D(K1, E(K2, D(K3, block)))`
    pub fn decrypt(&self, block: &[u8]) -> Vec<u8> {
        let [first, second, third] = &self.stages;
        first.decrypt(&second.encrypt(&third.decrypt(block)))
    }
}

impl CipherAlgorithm for TripleDes {
    fn encrypt(&self, block: &[u8]) -> Vec<u8> {
        TripleDes::encrypt(self, block)
    }
    fn decrypt(&self, block: &[u8]) -> Vec<u8> {
        TripleDes::decrypt(self, block)
    }
}

impl SymmetricCipher for TripleDes {
    fn set_key(&mut self, key: &[u8]) -> Result<()> {
        *self = TripleDes::new(&TripleKeySet::from_bytes(key)?);
        Ok(())
    }

    fn block_size(&self) -> usize {
        BLOCK_SIZE
    }
}
