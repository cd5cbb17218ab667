// Copyright 2020 - developers of the `grammers` project.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// https://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or https://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! An implementation of the [Infinite Garble Extension] (IGE) block cipher
//! mode, the mode used by Telegram's Mobile Transport Protocol.
//!
//! Every block depends on both the previous plaintext and the previous
//! ciphertext block, so corrupting a single ciphertext block garbles every
//! block decrypted after it. This is *not* authentication: garbled
//! ciphertext silently decrypts to garbage, and callers must verify
//! integrity on their own (MTProto does so with `msg_key`).
//!
//! The initialization vector is twice the block size. Its first half seeds
//! the "previous ciphertext" register and its second half the "previous
//! plaintext" register, which is the layout used by OpenSSL and MTProto.
//!
//! ```
//! use aes::cipher::KeyInit;
//! use grammers_ige::IgeChain;
//!
//! let key = [0u8; 16];
//! let iv = [1u8; 32];
//! let mut message = *b"sixteen byte msgsixteen byte msg";
//!
//! let mut chain = IgeChain::new(aes::Aes128::new(&key.into()), &iv).unwrap();
//! chain.encrypt_blocks_in_place(&mut message).unwrap();
//!
//! chain.set_iv(&iv).unwrap();
//! chain.decrypt_blocks_in_place(&mut message).unwrap();
//! assert_eq!(&message, b"sixteen byte msgsixteen byte msg");
//! ```
//!
//! [Infinite Garble Extension]: https://www.links.org/files/openssl-ige.pdf
pub mod aes;
mod chain;
pub mod errors;
mod mode;

use ::aes::cipher::generic_array::GenericArray;
use ::aes::cipher::{BlockDecrypt, BlockEncrypt, BlockSizeUser};

pub use chain::IgeChain;
pub use errors::Error;
pub use mode::{BlockMode, Decryptor, Encryptor};

/// A primitive able to encrypt and decrypt exactly one block at a time.
///
/// Every cipher from the RustCrypto project (such as `aes::Aes256`)
/// implements this trait already.
pub trait BlockCipher {
    /// The size of a single block, in bytes. Must be non-zero and must never
    /// change during the lifetime of the value.
    fn block_size(&self) -> usize;

    /// Encrypt `block` in place. Its length is always `block_size()`.
    fn encrypt_block(&self, block: &mut [u8]);

    /// Decrypt `block` in place, undoing `encrypt_block`.
    fn decrypt_block(&self, block: &mut [u8]);
}

impl<C: BlockEncrypt + BlockDecrypt> BlockCipher for C {
    fn block_size(&self) -> usize {
        <C as BlockSizeUser>::block_size()
    }

    fn encrypt_block(&self, block: &mut [u8]) {
        BlockEncrypt::encrypt_block(self, GenericArray::from_mut_slice(block));
    }

    fn decrypt_block(&self, block: &mut [u8]) {
        BlockDecrypt::decrypt_block(self, GenericArray::from_mut_slice(block));
    }
}
