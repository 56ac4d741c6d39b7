use crate::crypto::error::Result;

/// One-block encryption primitive.
pub trait CipherAlgorithm {
    fn encrypt(&self, block: &[u8]) -> Vec<u8>;
    fn decrypt(&self, block: &[u8]) -> Vec<u8>;
}

pub trait SymmetricCipher: CipherAlgorithm {
    fn set_key(&mut self, key: &[u8]) -> Result<()>;
    fn block_size(&self) -> usize;
}
