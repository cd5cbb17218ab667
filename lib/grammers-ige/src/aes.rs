// Copyright 2020 - developers of the `grammers` project.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// https://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or https://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! AES-256-IGE, the flavour used by MTProto, for callers that have a key
//! and a buffer rather than a long-lived chain.
use crate::chain::IgeChain;
use crate::errors::Error;
use ::aes::cipher::generic_array::GenericArray;
use ::aes::cipher::KeyInit;
use ::aes::Aes256;

fn new_chain(key: &[u8; 32], iv: &[u8; 32]) -> Result<IgeChain<Aes256>, Error> {
    let cipher = Aes256::new(GenericArray::from_slice(key));
    IgeChain::new(cipher, iv)
}

/// Encrypt the input plaintext using the AES-IGE mode.
///
/// The plaintext must already be padded to 16 bytes.
pub fn ige_encrypt(plaintext: &[u8], key: &[u8; 32], iv: &[u8; 32]) -> Result<Vec<u8>, Error> {
    let mut ciphertext = vec![0; plaintext.len()];
    new_chain(key, iv)?.encrypt_blocks(&mut ciphertext, plaintext)?;
    Ok(ciphertext)
}

/// Decrypt the input ciphertext using the AES-IGE mode.
pub fn ige_decrypt(ciphertext: &[u8], key: &[u8; 32], iv: &[u8; 32]) -> Result<Vec<u8>, Error> {
    let mut plaintext = vec![0; ciphertext.len()];
    new_chain(key, iv)?.decrypt_blocks(&mut plaintext, ciphertext)?;
    Ok(plaintext)
}

/// Encrypt `buffer` in place, then store the final chaining state in `iv`
/// so that a later call continues the same stream.
///
/// On error, neither `buffer` nor `iv` are modified.
pub fn ige_encrypt_in_place(
    buffer: &mut [u8],
    key: &[u8; 32],
    iv: &mut [u8; 32],
) -> Result<(), Error> {
    let mut chain = new_chain(key, iv)?;
    chain.encrypt_blocks_in_place(buffer)?;
    iv.copy_from_slice(chain.iv());
    Ok(())
}

/// Decrypt `buffer` in place, then store the final chaining state in `iv`
/// so that a later call continues the same stream.
///
/// On error, neither `buffer` nor `iv` are modified.
pub fn ige_decrypt_in_place(
    buffer: &mut [u8],
    key: &[u8; 32],
    iv: &mut [u8; 32],
) -> Result<(), Error> {
    let mut chain = new_chain(key, iv)?;
    chain.decrypt_blocks_in_place(buffer)?;
    iv.copy_from_slice(chain.iv());
    Ok(())
}
