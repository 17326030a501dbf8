//! Core error handling for tokensim.

pub mod error;

pub use error::{Result, TokensimError};
