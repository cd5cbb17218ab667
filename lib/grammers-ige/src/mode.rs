// Copyright 2020 - developers of the `grammers` project.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// https://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or https://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.
use crate::chain::IgeChain;
use crate::errors::Error;
use crate::BlockCipher;

/// A block mode fixed to a single direction, so that code which only moves
/// data one way can be written without caring whether it encrypts or
/// decrypts.
pub trait BlockMode {
    fn block_size(&self) -> usize;

    /// Transform the whole blocks in `src` into `dst`.
    fn crypt_blocks(&mut self, dst: &mut [u8], src: &[u8]) -> Result<(), Error>;

    /// Transform the whole blocks in `buffer`, overwriting them.
    fn crypt_blocks_in_place(&mut self, buffer: &mut [u8]) -> Result<(), Error>;

    /// Restart the stream from a new initialization vector.
    fn set_iv(&mut self, iv: &[u8]) -> Result<(), Error>;
}

/// An IGE chain that only encrypts.
pub struct Encryptor<C> {
    chain: IgeChain<C>,
}

/// An IGE chain that only decrypts.
pub struct Decryptor<C> {
    chain: IgeChain<C>,
}

impl<C: BlockCipher> Encryptor<C> {
    pub fn new(cipher: C, iv: &[u8]) -> Result<Self, Error> {
        IgeChain::new(cipher, iv).map(|chain| Self { chain })
    }

    pub fn into_chain(self) -> IgeChain<C> {
        self.chain
    }
}

impl<C: BlockCipher> Decryptor<C> {
    pub fn new(cipher: C, iv: &[u8]) -> Result<Self, Error> {
        IgeChain::new(cipher, iv).map(|chain| Self { chain })
    }

    pub fn into_chain(self) -> IgeChain<C> {
        self.chain
    }
}

impl<C: BlockCipher> BlockMode for Encryptor<C> {
    fn block_size(&self) -> usize {
        self.chain.block_size()
    }

    fn crypt_blocks(&mut self, dst: &mut [u8], src: &[u8]) -> Result<(), Error> {
        self.chain.encrypt_blocks(dst, src)
    }

    fn crypt_blocks_in_place(&mut self, buffer: &mut [u8]) -> Result<(), Error> {
        self.chain.encrypt_blocks_in_place(buffer)
    }

    fn set_iv(&mut self, iv: &[u8]) -> Result<(), Error> {
        self.chain.set_iv(iv)
    }
}

impl<C: BlockCipher> BlockMode for Decryptor<C> {
    fn block_size(&self) -> usize {
        self.chain.block_size()
    }

    fn crypt_blocks(&mut self, dst: &mut [u8], src: &[u8]) -> Result<(), Error> {
        self.chain.decrypt_blocks(dst, src)
    }

    fn crypt_blocks_in_place(&mut self, buffer: &mut [u8]) -> Result<(), Error> {
        self.chain.decrypt_blocks_in_place(buffer)
    }

    fn set_iv(&mut self, iv: &[u8]) -> Result<(), Error> {
        self.chain.set_iv(iv)
    }
}
