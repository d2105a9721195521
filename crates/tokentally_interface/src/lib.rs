//! Trait definitions for tokentally.
//!
//! The usage engine consumes tokenization as a capability. Implementations live
//! in other crates (`tokentally_models` for tiktoken) or in tests.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod traits;

pub use traits::{Token, TokenEncoder, Tokenizer};
