/// Size in bytes of one DES block.
pub const BLOCK_SIZE: usize = 8;

/// Size in bytes of one DES key, parity bits included.
pub const KEY_SIZE: usize = 8;

/// Size in bytes of one round subkey.
pub const ROUND_KEY_SIZE: usize = 6;

pub const ROUNDS: usize = 16;

pub type Key = [u8; KEY_SIZE];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Encrypt,
    Decrypt,
}

#[derive(Debug, Clone)]
pub enum CipherInput {
    Bytes(Vec<u8>),
    File(String),
    Stdin,
}

#[derive(Debug)]
pub enum CipherOutput {
    Buffer(Vec<u8>),
    File(String),
    Stdout,
}
