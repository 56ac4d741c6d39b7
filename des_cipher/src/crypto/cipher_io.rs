use crate::crypto::cipher_types::CipherInput;
use std::fs::File;
use std::io::{self, BufReader, BufWriter, Cursor, ErrorKind, Read};

pub fn open_reader(input: CipherInput) -> io::Result<Box<dyn Read + Send>> {
    Ok(match input {
        CipherInput::Bytes(data) => Box::new(Cursor::new(data)),
        CipherInput::File(path) => Box::new(BufReader::new(File::open(path)?)),
        CipherInput::Stdin => Box::new(BufReader::new(io::stdin())),
    })
}

pub fn create_file_writer(path: &str) -> io::Result<BufWriter<File>> {
    Ok(BufWriter::new(File::create(path)?))
}

/// Sibling path output is written to until processing succeeds.
pub fn partial_path(path: &str) -> String {
    format!("{}.partial", path)
}

/// Fills `buffer` from `reader`, stopping early only at end of input.
/// Returns the number of bytes read.
pub fn read_block<R: Read + ?Sized>(reader: &mut R, buffer: &mut [u8]) -> io::Result<usize> {
    let mut filled = 0;
    while filled < buffer.len() {
        match reader.read(&mut buffer[filled..]) {
            Ok(0) => break,
            Ok(n) => filled += n,
            Err(e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        }
    }
    Ok(filled)
}
