use crate::crypto::cipher_io::{create_file_writer, open_reader, partial_path, read_block};
use crate::crypto::cipher_traits::SymmetricCipher;
use crate::crypto::cipher_types::{CipherInput, CipherOutput, Direction, Key};
use crate::crypto::des::DES;
use crate::crypto::error::{CipherError, Result};
use crate::crypto::triple_des::{TripleDes, TripleKeySet};
use rayon::prelude::*;
use std::fs;
use std::io::{self, BufWriter, Read, Write};
use std::sync::Arc;

// Constants for chunked processing, both multiples of the block size
const CHUNK_SIZE: usize = 64 * 1024;
const PARALLELISM_THRESHOLD: usize = 16 * 1024;

enum Sink {
    Buffer,
    File(String),
    Stdout,
}

/// Streams bytes through a block cipher, one independent block at a time.
///
/// Ciphertext layout: the encrypted blocks, the last of which is zero padded,
/// followed by one unencrypted byte holding the pad length (1..=8). Input whose
/// length is a multiple of the block size still gets a whole padding block.
#[derive(Clone)]
pub struct CipherContext {
    algorithm: Arc<dyn SymmetricCipher + Send + Sync>,
}

impl CipherContext {
    pub fn new(algorithm: Box<dyn SymmetricCipher + Send + Sync>) -> Self {
        Self {
            algorithm: Arc::from(algorithm),
        }
    }

    /// Single DES for one key, Triple-DES for three keys or when `triple` is set.
    pub fn from_keys(keys: &[Key], triple: bool) -> Result<Self> {
        match keys {
            [key] if !triple => Ok(Self::new(Box::new(DES::from_key(key)))),
            _ => {
                let key_set = TripleKeySet::from_keys(keys)?;
                Ok(Self::new(Box::new(TripleDes::new(&key_set))))
            }
        }
    }

    pub fn block_size(&self) -> usize {
        self.algorithm.block_size()
    }

    fn process_blocks(&self, data: &[u8], direction: Direction) -> Vec<u8> {
        let block_size = self.algorithm.block_size();
        debug_assert_eq!(data.len() % block_size, 0);

        let apply = |block: &[u8]| match direction {
            Direction::Encrypt => self.algorithm.encrypt(block),
            Direction::Decrypt => self.algorithm.decrypt(block),
        };

        if data.len() >= PARALLELISM_THRESHOLD {
            data.par_chunks(block_size)
                .map(apply)
                .collect::<Vec<_>>()
                .concat()
        } else {
            data.chunks(block_size).flat_map(apply).collect()
        }
    }

    pub fn encrypt_stream<R: Read, W: Write>(&self, mut reader: R, mut writer: W) -> Result<()> {
        let block_size = self.block_size();
        let mut buffer = vec![0u8; CHUNK_SIZE];
        let mut total = 0usize;

        loop {
            let read = read_block(&mut reader, &mut buffer)?;
            total += read;

            let whole = read - read % block_size;
            if whole > 0 {
                writer.write_all(&self.process_blocks(&buffer[..whole], Direction::Encrypt))?;
            }

            if read < CHUNK_SIZE {
                let tail = &buffer[whole..read];
                let mut last = vec![0u8; block_size];
                last[..tail.len()].copy_from_slice(tail);
                let pad = (block_size - tail.len()) as u8;

                writer.write_all(&self.process_blocks(&last, Direction::Encrypt))?;
                writer.write_all(&[pad])?;
                log::debug!("Encrypted {} bytes, pad length {}", total, pad);
                break;
            }
            log::trace!("Encrypted chunk, {} bytes so far", total);
        }

        writer.flush()?;
        Ok(())
    }

    /// Blocks are written as soon as they are decrypted, so a length or pad
    /// error found at the end leaves earlier plaintext in `writer`.
    pub fn decrypt_stream<R: Read, W: Write>(&self, mut reader: R, mut writer: W) -> Result<()> {
        let block_size = self.block_size();
        // the final block and the pad byte are only known once input ends
        let reserve = block_size + 1;
        let mut buffer = vec![0u8; CHUNK_SIZE];
        let mut pending: Vec<u8> = Vec::with_capacity(CHUNK_SIZE + reserve + block_size);
        let mut total = 0usize;

        loop {
            let read = read_block(&mut reader, &mut buffer)?;
            total += read;
            pending.extend_from_slice(&buffer[..read]);

            if pending.len() > reserve {
                let ready = (pending.len() - reserve) / block_size * block_size;
                if ready > 0 {
                    writer.write_all(&self.process_blocks(&pending[..ready], Direction::Decrypt))?;
                    pending.drain(..ready);
                }
            }

            if read < CHUNK_SIZE {
                break;
            }
            log::trace!("Decrypted chunk, {} bytes so far", total);
        }

        match total % block_size {
            // block-aligned ciphertext without a pad byte
            0 => {
                writer.write_all(&self.process_blocks(&pending, Direction::Decrypt))?;
                log::debug!("Decrypted {} bytes without pad byte", total);
            }
            1 => {
                let pad = pending.pop().unwrap_or_default();
                if pending.is_empty() {
                    return Err(CipherError::TruncatedCiphertext(total));
                }
                if pad == 0 || pad as usize > block_size {
                    return Err(CipherError::InvalidPadding(pad));
                }

                let mut last = self.process_blocks(&pending, Direction::Decrypt);
                last.truncate(last.len() - pad as usize);
                writer.write_all(&last)?;
                log::debug!("Decrypted {} bytes, pad length {}", total, pad);
            }
            _ => return Err(CipherError::TruncatedCiphertext(total)),
        }

        writer.flush()?;
        Ok(())
    }

    fn process_stream<R: Read, W: Write>(
        &self,
        reader: R,
        writer: W,
        direction: Direction,
    ) -> Result<()> {
        match direction {
            Direction::Encrypt => self.encrypt_stream(reader, writer),
            Direction::Decrypt => self.decrypt_stream(reader, writer),
        }
    }

    async fn run(
        &self,
        input: CipherInput,
        output: &mut CipherOutput,
        direction: Direction,
    ) -> Result<()> {
        let this = self.clone();
        let sink = match output {
            CipherOutput::Buffer(_) => Sink::Buffer,
            CipherOutput::File(path) => Sink::File(path.clone()),
            CipherOutput::Stdout => Sink::Stdout,
        };

        let produced = tokio::task::spawn_blocking(move || -> Result<Option<Vec<u8>>> {
            let reader = open_reader(input)?;
            match sink {
                Sink::Buffer => {
                    let mut result = Vec::new();
                    this.process_stream(reader, &mut result, direction)?;
                    Ok(Some(result))
                }
                Sink::File(path) => {
                    // the target only appears once the whole stream succeeded
                    let partial = partial_path(&path);
                    let result = create_file_writer(&partial)
                        .map_err(CipherError::from)
                        .and_then(|writer| this.process_stream(reader, writer, direction));
                    if let Err(e) = result {
                        match fs::remove_file(&partial) {
                            Err(cleanup) if cleanup.kind() != io::ErrorKind::NotFound => {
                                log::warn!("Failed to remove {}: {}", partial, cleanup)
                            }
                            _ => {}
                        }
                        return Err(e);
                    }
                    fs::rename(&partial, &path)?;
                    Ok(None)
                }
                Sink::Stdout => {
                    this.process_stream(reader, BufWriter::new(io::stdout()), direction)?;
                    Ok(None)
                }
            }
        })
        .await
        .map_err(|e| CipherError::Task(e.to_string()))??;

        if let (Some(data), CipherOutput::Buffer(buffer)) = (produced, output) {
            *buffer = data;
        }
        Ok(())
    }

    pub async fn encrypt(&self, input: CipherInput, output: &mut CipherOutput) -> Result<()> {
        self.run(input, output, Direction::Encrypt).await
    }

    pub async fn decrypt(&self, input: CipherInput, output: &mut CipherOutput) -> Result<()> {
        self.run(input, output, Direction::Decrypt).await
    }
}
