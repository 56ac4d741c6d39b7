use des_cipher::crypto::cipher_context::CipherContext;
use des_cipher::crypto::cipher_types::{CipherInput, CipherOutput};
use des_cipher::crypto::des::DES;
use des_cipher::CipherError;
use rand::{rng, RngCore};
use std::fs::File;
use std::io::{Read, Write};
use tempfile::NamedTempFile;

const KEY: [u8; 8] = hex_literal::hex!("0123456789ABCDEF");

fn des_context() -> CipherContext {
    CipherContext::new(Box::new(DES::from_key(&KEY)))
}

fn encrypt_bytes(ctx: &CipherContext, data: &[u8]) -> Vec<u8> {
    let mut out = Vec::new();
    ctx.encrypt_stream(data, &mut out).unwrap();
    out
}

fn decrypt_bytes(ctx: &CipherContext, data: &[u8]) -> Result<Vec<u8>, CipherError> {
    let mut out = Vec::new();
    ctx.decrypt_stream(data, &mut out)?;
    Ok(out)
}

fn random_bytes(len: usize) -> Vec<u8> {
    let mut buf = vec![0u8; len];
    rng().fill_bytes(&mut buf);
    buf
}

#[test]
fn test_hello_des_scenario() {
    let ctx = des_context();
    let plaintext = b"HELLO DES!!";

    let encrypted = encrypt_bytes(&ctx, plaintext);
    let mut expected = Vec::new();
    expected.extend_from_slice(&hex_literal::hex!("93DAADA665783418"));
    expected.extend_from_slice(&hex_literal::hex!("EAF0675BE697D6EB"));
    expected.push(5);
    assert_eq!(encrypted, expected);

    assert_eq!(decrypt_bytes(&ctx, &encrypted).unwrap(), plaintext);
}

#[test]
fn test_block_aligned_input_gets_full_padding_block() {
    let ctx = des_context();
    let plaintext = b"ABCDEFGH";

    let encrypted = encrypt_bytes(&ctx, plaintext);
    assert_eq!(encrypted.len(), 17);
    // a zero block encrypted under the key, then a pad length of 8
    assert_eq!(&encrypted[8..16], &hex_literal::hex!("D5D44FF720683D0D"));
    assert_eq!(encrypted[16], 8);

    assert_eq!(decrypt_bytes(&ctx, &encrypted).unwrap(), plaintext);
}

#[test]
fn test_empty_input_roundtrip() {
    let ctx = des_context();
    let encrypted = encrypt_bytes(&ctx, &[]);
    assert_eq!(encrypted.len(), 9);
    assert_eq!(encrypted[8], 8);
    assert!(decrypt_bytes(&ctx, &encrypted).unwrap().is_empty());
}

#[test]
fn test_roundtrip_across_lengths() {
    for key_count in [1usize, 3] {
        let keys = des_cipher::crypto::keys::generate_keys(key_count);
        let ctx = CipherContext::from_keys(&keys, false).unwrap();

        for len in [1usize, 7, 8, 9, 15, 16, 17, 100_003] {
            let data = random_bytes(len);
            let encrypted = encrypt_bytes(&ctx, &data);
            assert_eq!(encrypted.len(), (len / 8 + 1) * 8 + 1);
            assert_eq!(decrypt_bytes(&ctx, &encrypted).unwrap(), data);
        }
    }
}

#[test]
fn test_large_input_keeps_block_order() {
    // big enough for the parallel path and several chunks
    let ctx = des_context();
    let data = random_bytes(300_000);
    let encrypted = encrypt_bytes(&ctx, &data);

    let des = DES::from_key(&KEY);
    for (i, block) in data.chunks_exact(8).enumerate().step_by(997) {
        assert_eq!(&encrypted[i * 8..i * 8 + 8], des.encrypt(block).as_slice());
    }
    assert_eq!(decrypt_bytes(&ctx, &encrypted).unwrap(), data);
}

#[test]
fn test_decrypt_without_pad_byte() {
    let ctx = des_context();
    let des = DES::from_key(&KEY);
    let ciphertext = [des.encrypt(b"12345678"), des.encrypt(b"abcdefgh")].concat();

    assert_eq!(decrypt_bytes(&ctx, &ciphertext).unwrap(), b"12345678abcdefgh");
}

#[test]
fn test_decrypt_rejects_truncated_ciphertext() {
    let ctx = des_context();
    let mut encrypted = encrypt_bytes(&ctx, b"HELLO DES!!");
    encrypted.truncate(12);

    assert!(matches!(
        decrypt_bytes(&ctx, &encrypted),
        Err(CipherError::TruncatedCiphertext(12))
    ));
    assert!(matches!(
        decrypt_bytes(&ctx, &[8]),
        Err(CipherError::TruncatedCiphertext(1))
    ));
}

#[test]
fn test_decrypt_rejects_bad_pad_byte() {
    let ctx = des_context();
    let mut encrypted = encrypt_bytes(&ctx, b"HELLO DES!!");
    *encrypted.last_mut().unwrap() = 9;

    assert!(matches!(
        decrypt_bytes(&ctx, &encrypted),
        Err(CipherError::InvalidPadding(9))
    ));
}

#[test]
fn test_from_keys_selects_cipher() {
    let keys = des_cipher::crypto::keys::parse_keys("0123456789ABCDEF").unwrap();
    let single = CipherContext::from_keys(&keys, false).unwrap();
    let triple = CipherContext::from_keys(&keys, true).unwrap();

    // one key repeated through E-D-E gives the same blocks as single DES
    assert_eq!(encrypt_bytes(&single, b"HELLO DES!!"), encrypt_bytes(&triple, b"HELLO DES!!"));

    assert!(matches!(
        CipherContext::from_keys(&[KEY, KEY], false),
        Err(CipherError::InvalidKeyCount(2))
    ));
}

#[tokio::test]
async fn test_async_bytes_roundtrip() {
    let ctx = des_context();
    let data = random_bytes(4096 + 3);

    let mut encrypted = CipherOutput::Buffer(Vec::new());
    ctx.encrypt(CipherInput::Bytes(data.clone()), &mut encrypted)
        .await
        .unwrap();
    let encrypted = match encrypted {
        CipherOutput::Buffer(buf) => buf,
        _ => panic!("Expected buffer output"),
    };

    let mut decrypted = CipherOutput::Buffer(Vec::new());
    ctx.decrypt(CipherInput::Bytes(encrypted), &mut decrypted)
        .await
        .unwrap();
    match decrypted {
        CipherOutput::Buffer(buf) => assert_eq!(buf, data),
        _ => panic!("Expected buffer output"),
    }
}

#[tokio::test]
async fn test_async_file_roundtrip() {
    let ctx = des_context();
    let data = random_bytes(70_001);

    let mut input_file = NamedTempFile::new().unwrap();
    input_file.write_all(&data).unwrap();
    let input_path = input_file.path().to_string_lossy().into_owned();

    let encrypted_file = NamedTempFile::new().unwrap();
    let encrypted_path = encrypted_file.path().to_string_lossy().into_owned();
    let decrypted_file = NamedTempFile::new().unwrap();
    let decrypted_path = decrypted_file.path().to_string_lossy().into_owned();

    ctx.encrypt(
        CipherInput::File(input_path),
        &mut CipherOutput::File(encrypted_path.clone()),
    )
    .await
    .unwrap();
    ctx.decrypt(
        CipherInput::File(encrypted_path),
        &mut CipherOutput::File(decrypted_path.clone()),
    )
    .await
    .unwrap();

    let mut result = Vec::new();
    File::open(decrypted_path)
        .unwrap()
        .read_to_end(&mut result)
        .unwrap();
    assert_eq!(result, data);
}

#[tokio::test]
async fn test_async_missing_input_file() {
    let ctx = des_context();
    let result = ctx
        .encrypt(
            CipherInput::File("/nonexistent/des/input".to_string()),
            &mut CipherOutput::Buffer(Vec::new()),
        )
        .await;
    assert!(matches!(result, Err(CipherError::Io(_))));
}

#[tokio::test]
async fn test_failed_file_decrypt_leaves_no_output() {
    let ctx = des_context();
    let mut encrypted = encrypt_bytes(&ctx, &random_bytes(40));
    encrypted.truncate(27);

    let dir = tempfile::tempdir().unwrap();
    let fresh_path = dir.path().join("plain.bin").to_string_lossy().into_owned();

    let result = ctx
        .decrypt(
            CipherInput::Bytes(encrypted.clone()),
            &mut CipherOutput::File(fresh_path.clone()),
        )
        .await;
    assert!(matches!(result, Err(CipherError::TruncatedCiphertext(27))));
    assert!(!std::path::Path::new(&fresh_path).exists());
    assert!(!std::path::Path::new(&format!("{}.partial", fresh_path)).exists());

    // an existing target keeps its contents
    let existing_path = dir.path().join("old.bin").to_string_lossy().into_owned();
    std::fs::write(&existing_path, b"previous contents").unwrap();
    let result = ctx
        .decrypt(
            CipherInput::Bytes(encrypted),
            &mut CipherOutput::File(existing_path.clone()),
        )
        .await;
    assert!(result.is_err());
    assert_eq!(std::fs::read(&existing_path).unwrap(), b"previous contents");
}
