// Copyright 2020 - developers of the `grammers` project.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// https://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or https://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.
use aes::cipher::generic_array::GenericArray;
use aes::cipher::KeyInit;
use aes::Aes128;
use getrandom::getrandom;
use grammers_ige::{aes as ige_aes, BlockMode, Decryptor, Encryptor, Error, IgeChain};
use hex_literal::hex;
use simple_logger::SimpleLogger;

fn init_logging() {
    let _ = SimpleLogger::new()
        .with_level(log::LevelFilter::Trace)
        .init();
}

fn aes128(key: &[u8; 16]) -> Aes128 {
    Aes128::new(GenericArray::from_slice(key))
}

fn random_bytes(len: usize) -> Vec<u8> {
    let mut buffer = vec![0; len];
    getrandom(&mut buffer).expect("failed to generate random test data");
    buffer
}

fn encrypt(key: &[u8; 16], iv: &[u8], plaintext: &[u8]) -> Vec<u8> {
    let mut ciphertext = vec![0; plaintext.len()];
    IgeChain::new(aes128(key), iv)
        .unwrap()
        .encrypt_blocks(&mut ciphertext, plaintext)
        .unwrap();
    ciphertext
}

fn decrypt(key: &[u8; 16], iv: &[u8], ciphertext: &[u8]) -> Vec<u8> {
    let mut plaintext = vec![0; ciphertext.len()];
    IgeChain::new(aes128(key), iv)
        .unwrap()
        .decrypt_blocks(&mut plaintext, ciphertext)
        .unwrap();
    plaintext
}

// Vectors from "AES IGE mode", as published alongside OpenSSL's implementation.
#[test]
fn openssl_vector_zero_plaintext() {
    init_logging();
    let key = hex!("000102030405060708090a0b0c0d0e0f");
    let iv = hex!("000102030405060708090a0b0c0d0e0f101112131415161718191a1b1c1d1e1f");
    let plaintext = [0u8; 32];
    let expected = hex!("1a8519a6557be652e9da8e43da4ef4453cf456b4ca488aa383c79c98b34797cb");

    assert_eq!(encrypt(&key, &iv, &plaintext), expected);
    assert_eq!(decrypt(&key, &iv, &expected), plaintext);
}

#[test]
fn openssl_vector_text() {
    let key = *b"This is an imple";
    let iv = *b"mentation of IGE mode for OpenSS";
    let plaintext = hex!("99706487a1cde613bc6de0b6f24b1c7aa448c8b9c3403e3467a8cad89340f53b");
    let expected = *b"L. Let's hope Ben got it right!\n";

    assert_eq!(encrypt(&key, &iv, &plaintext), expected);
    assert_eq!(decrypt(&key, &iv, &expected), plaintext);
}

#[test]
fn aes256_helpers() {
    let key = {
        let mut buffer = [0u8; 32];
        buffer
            .iter_mut()
            .enumerate()
            .for_each(|(i, x)| *x = i as u8);
        buffer
    };
    let iv = {
        let mut buffer = [0u8; 32];
        buffer
            .iter_mut()
            .enumerate()
            .for_each(|(i, x)| *x = 32 + i as u8);
        buffer
    };
    let mut plaintext = b"Hello, world! This data should remain secure!".to_vec();
    plaintext.resize(48, 0);
    let expected = hex!(
        "e1584b75c15fcadd9f9f75e650a4e728"
        "bd30b0393e0a57f50245763b420532d8"
        "6a7625e4fa843f92f5665ac44685ed9b"
    );

    let ciphertext = ige_aes::ige_encrypt(&plaintext, &key, &iv).unwrap();
    assert_eq!(ciphertext, expected);
    assert_eq!(ige_aes::ige_decrypt(&ciphertext, &key, &iv).unwrap(), plaintext);
}

#[test]
fn random_round_trips() {
    for blocks in 0..20 {
        let key: [u8; 16] = random_bytes(16).try_into().unwrap();
        let iv = random_bytes(32);
        let plaintext = random_bytes(blocks * 16);

        let ciphertext = encrypt(&key, &iv, &plaintext);
        assert_eq!(decrypt(&key, &iv, &ciphertext), plaintext);
        assert_eq!(encrypt(&key, &iv, &plaintext), ciphertext);
    }
}

#[test]
fn every_iv_bit_changes_first_block() {
    let key = [0x24; 16];
    let iv = [0x42; 32];
    let plaintext = [0x17; 32];
    let reference = encrypt(&key, &iv, &plaintext);

    for bit in 0..iv.len() * 8 {
        let mut tweaked = iv;
        tweaked[bit / 8] ^= 1 << (bit % 8);
        let ciphertext = encrypt(&key, &tweaked, &plaintext);
        assert_ne!(ciphertext[..16], reference[..16], "flipped iv bit {}", bit);
    }
}

#[test]
fn corruption_garbles_all_later_blocks() {
    let key = hex!("000102030405060708090a0b0c0d0e0f");
    let iv = hex!("000102030405060708090a0b0c0d0e0f101112131415161718191a1b1c1d1e1f");
    let plaintext = (0..128).map(|i| i as u8).collect::<Vec<_>>();
    let mut ciphertext = encrypt(&key, &iv, &plaintext);

    let corrupted_block = 2;
    ciphertext[corrupted_block * 16 + 5] ^= 0x01;
    let garbled = decrypt(&key, &iv, &ciphertext);

    for (i, (got, original)) in garbled.chunks(16).zip(plaintext.chunks(16)).enumerate() {
        if i < corrupted_block {
            assert_eq!(got, original, "block {} should be intact", i);
        } else {
            assert_ne!(got, original, "block {} should be garbled", i);
        }
    }
}

#[test]
fn chunked_stream_matches_single_call() {
    init_logging();
    let key: [u8; 16] = random_bytes(16).try_into().unwrap();
    let iv = random_bytes(32);
    let plaintext = random_bytes(16 * 10);
    let whole = encrypt(&key, &iv, &plaintext);

    let mut chain = IgeChain::new(aes128(&key), &iv).unwrap();
    let mut ciphertext = vec![0; plaintext.len()];
    let mut offset = 0;
    for blocks in [1, 0, 3, 2, 4] {
        let end = offset + blocks * 16;
        chain
            .encrypt_blocks(&mut ciphertext[offset..end], &plaintext[offset..end])
            .unwrap();
        offset = end;
    }
    assert_eq!(ciphertext, whole);

    let mut decryptor = Decryptor::new(aes128(&key), &iv).unwrap();
    let (head, tail) = ciphertext.split_at_mut(48);
    decryptor.crypt_blocks_in_place(head).unwrap();
    decryptor.crypt_blocks_in_place(tail).unwrap();
    assert_eq!(ciphertext, plaintext);
}

#[test]
fn set_iv_matches_fresh_chain() {
    let key = [7; 16];
    let iv = random_bytes(32);
    let plaintext = random_bytes(64);

    let mut chain = IgeChain::new(aes128(&key), &[0; 32]).unwrap();
    let mut scratch = vec![0; 64];
    chain.encrypt_blocks(&mut scratch, &plaintext).unwrap();

    chain.set_iv(&iv).unwrap();
    let mut ciphertext = vec![0; 64];
    chain.encrypt_blocks(&mut ciphertext, &plaintext).unwrap();
    assert_eq!(ciphertext, encrypt(&key, &iv, &plaintext));
}

#[test]
fn exported_state_resumes_stream() {
    let key = [9; 16];
    let iv = random_bytes(32);
    let plaintext = random_bytes(96);
    let whole = encrypt(&key, &iv, &plaintext);

    let mut first = Encryptor::new(aes128(&key), &iv).unwrap();
    let mut ciphertext = vec![0; 96];
    first
        .crypt_blocks(&mut ciphertext[..32], &plaintext[..32])
        .unwrap();
    let state = first.into_chain().iv().to_vec();

    let mut second = IgeChain::new(aes128(&key), &state).unwrap();
    second
        .encrypt_blocks(&mut ciphertext[32..], &plaintext[32..])
        .unwrap();
    assert_eq!(ciphertext, whole);
}

#[test]
fn length_checks() {
    let key = [1; 16];
    assert_eq!(
        IgeChain::new(aes128(&key), &[0; 16]).err(),
        Some(Error::InvalidIvLength {
            expected: 32,
            actual: 16
        })
    );

    let iv = [2; 32];
    let mut chain = IgeChain::new(aes128(&key), &iv).unwrap();
    let mut output = [0; 32];
    assert_eq!(
        chain.decrypt_blocks(&mut output, &[0; 20]),
        Err(Error::InvalidInputLength {
            block_size: 16,
            actual: 20
        })
    );
    assert_eq!(
        chain.encrypt_blocks(&mut output[..16], &[0; 32]),
        Err(Error::InsufficientOutputBuffer {
            required: 32,
            actual: 16
        })
    );
    assert_eq!(chain.iv(), &iv[..]);
    assert_eq!(output, [0; 32]);
}
