// Copyright 2020 - developers of the `grammers` project.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// https://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or https://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Errors that can occur when driving an IGE chain.

use std::error::Error as StdError;
use std::fmt;
use std::io;

/// The error type for every fallible operation of the crate.
///
/// All of them are precondition violations. When one is returned, the
/// chain it came from has not been modified in any way.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Error {
    /// The initialization vector must be exactly twice the block size.
    InvalidIvLength { expected: usize, actual: usize },

    /// The input is not made of whole blocks.
    InvalidInputLength { block_size: usize, actual: usize },

    /// The destination buffer cannot hold the output.
    InsufficientOutputBuffer { required: usize, actual: usize },
}

impl StdError for Error {}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Self::InvalidIvLength { expected, actual } => write!(
                f,
                "bad iv length: expected {expected} bytes, got {actual}"
            ),
            Self::InvalidInputLength { block_size, actual } => write!(
                f,
                "input not full blocks: {actual} bytes is not a multiple of {block_size}"
            ),
            Self::InsufficientOutputBuffer { required, actual } => write!(
                f,
                "output smaller than input: need {required} bytes, got {actual}"
            ),
        }
    }
}

impl From<Error> for io::Error {
    fn from(error: Error) -> Self {
        io::Error::new(io::ErrorKind::InvalidInput, error)
    }
}
