// Copyright 2020 - developers of the `grammers` project.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// https://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or https://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.
use crate::errors::Error;
use crate::BlockCipher;
use log::{debug, trace};

/// A stateful IGE chain over some block cipher.
///
/// The chain remembers the last plaintext and ciphertext blocks it saw, so
/// a single logical message may be processed across several calls, as long
/// as every call is given whole blocks.
///
/// Encryption and decryption share the same chaining state. After either
/// operation, the state always holds the last (plaintext, ciphertext) pair,
/// no matter which side of the pair was the input.
pub struct IgeChain<C> {
    cipher: C,
    block_size: usize,
    /// The previous ciphertext block followed by the previous plaintext
    /// block, which is the same layout as the initialization vector.
    state: Vec<u8>,
}

impl<C: BlockCipher> IgeChain<C> {
    /// Create a new chain. The `iv` must be exactly twice the block size
    /// of the `cipher`: the first half is used as the previous ciphertext
    /// block, and the second half as the previous plaintext block.
    pub fn new(cipher: C, iv: &[u8]) -> Result<Self, Error> {
        let block_size = cipher.block_size();
        assert_ne!(block_size, 0, "block ciphers must have a non-zero block size");
        check_iv(block_size, iv)?;

        trace!("created ige chain with {}-byte blocks", block_size);
        Ok(Self {
            cipher,
            block_size,
            state: iv.to_vec(),
        })
    }

    pub fn block_size(&self) -> usize {
        self.block_size
    }

    /// The current chaining state, in the same layout as the initialization
    /// vector. Creating a new chain with it continues the current stream.
    pub fn iv(&self) -> &[u8] {
        &self.state
    }

    /// Discard the chaining state and start over from a new `iv`.
    pub fn set_iv(&mut self, iv: &[u8]) -> Result<(), Error> {
        check_iv(self.block_size, iv)?;
        self.state.copy_from_slice(iv);
        trace!("reset ige chain state");
        Ok(())
    }

    pub fn cipher(&self) -> &C {
        &self.cipher
    }

    pub fn into_inner(self) -> C {
        self.cipher
    }

    /// Encrypt the plaintext blocks in `src` into `dst`.
    ///
    /// Only the first `src.len()` bytes of `dst` are written.
    pub fn encrypt_blocks(&mut self, dst: &mut [u8], src: &[u8]) -> Result<(), Error> {
        let buffer = self.stage(dst, src)?;
        self.encrypt(buffer);
        Ok(())
    }

    /// Decrypt the ciphertext blocks in `src` into `dst`.
    ///
    /// Only the first `src.len()` bytes of `dst` are written.
    pub fn decrypt_blocks(&mut self, dst: &mut [u8], src: &[u8]) -> Result<(), Error> {
        let buffer = self.stage(dst, src)?;
        self.decrypt(buffer);
        Ok(())
    }

    /// Encrypt the plaintext blocks in `buffer`, overwriting them.
    pub fn encrypt_blocks_in_place(&mut self, buffer: &mut [u8]) -> Result<(), Error> {
        self.check_input(buffer.len())?;
        self.encrypt(buffer);
        Ok(())
    }

    /// Decrypt the ciphertext blocks in `buffer`, overwriting them.
    pub fn decrypt_blocks_in_place(&mut self, buffer: &mut [u8]) -> Result<(), Error> {
        self.check_input(buffer.len())?;
        self.decrypt(buffer);
        Ok(())
    }

    fn check_input(&self, len: usize) -> Result<(), Error> {
        if len % self.block_size != 0 {
            debug!(
                "rejected {} bytes of input for {}-byte blocks",
                len, self.block_size
            );
            return Err(Error::InvalidInputLength {
                block_size: self.block_size,
                actual: len,
            });
        }
        Ok(())
    }

    // Validate both buffers and copy the input over, so that the rest of
    // the work can happen in place.
    fn stage<'a>(&self, dst: &'a mut [u8], src: &[u8]) -> Result<&'a mut [u8], Error> {
        self.check_input(src.len())?;
        if dst.len() < src.len() {
            debug!(
                "rejected {}-byte output for {} bytes of input",
                dst.len(),
                src.len()
            );
            return Err(Error::InsufficientOutputBuffer {
                required: src.len(),
                actual: dst.len(),
            });
        }

        let buffer = &mut dst[..src.len()];
        buffer.copy_from_slice(src);
        Ok(buffer)
    }

    fn encrypt(&mut self, buffer: &mut [u8]) {
        trace!("encrypting {} ige blocks", buffer.len() / self.block_size);
        let cipher = &self.cipher;
        let (prev_cipher, prev_plain) = self.state.split_at_mut(self.block_size);
        garble(prev_cipher, prev_plain, buffer, |block| cipher.encrypt_block(block));
    }

    // Decryption is the same recurrence as encryption with the registers
    // swapped: the input is mixed with the previous plaintext and the
    // output with the previous ciphertext.
    fn decrypt(&mut self, buffer: &mut [u8]) {
        trace!("decrypting {} ige blocks", buffer.len() / self.block_size);
        let cipher = &self.cipher;
        let (prev_cipher, prev_plain) = self.state.split_at_mut(self.block_size);
        garble(prev_plain, prev_cipher, buffer, |block| cipher.decrypt_block(block));
    }
}

fn check_iv(block_size: usize, iv: &[u8]) -> Result<(), Error> {
    let expected = 2 * block_size;
    if iv.len() != expected {
        debug!("rejected {}-byte iv, expected {}", iv.len(), expected);
        return Err(Error::InvalidIvLength {
            expected,
            actual: iv.len(),
        });
    }
    Ok(())
}

/// Run the IGE recurrence over every block of `buffer`, in place:
///
/// ```text
/// out = transform(in XOR pre) XOR post
/// ```
///
/// After each block, `pre` holds that block's output and `post` its input.
/// `buffer` must be made of whole blocks, `pre.len()` bytes each.
fn garble<F>(pre: &mut [u8], post: &mut [u8], buffer: &mut [u8], transform: F)
where
    F: Fn(&mut [u8]),
{
    if buffer.is_empty() {
        return;
    }

    let mut input = vec![0; pre.len()];
    for block in buffer.chunks_exact_mut(pre.len()) {
        input.copy_from_slice(block);

        xor(block, pre);
        transform(block);
        xor(block, post);

        post.copy_from_slice(&input);
        pre.copy_from_slice(block);
    }
}

fn xor(block: &mut [u8], other: &[u8]) {
    block
        .iter_mut()
        .zip(other.iter())
        .for_each(|(b, o)| *b ^= *o);
}
