//! Tokenizer implementations for tokentally.
//!
//! [`TiktokenTokenizer`] maps OpenAI model identifiers to their BPE encodings
//! using `tiktoken-rs`.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod tiktoken;

pub use tiktoken::{TiktokenEncoder, TiktokenTokenizer};
