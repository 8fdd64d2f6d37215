//! Cross-chain holder snapshot library
//!
//! Collects the holders of a collection (or a supplied address list), maps
//! them to identity clusters and lists each holder's cluster addresses on a
//! chosen target chain.

pub mod chain;
pub mod cli;
pub mod clusters;
pub mod config;
pub mod error;
pub mod export;
pub mod http;
pub mod pipeline;
pub mod source;
pub mod target;

// Re-export commonly used types
pub use config::Config;
pub use error::{Error, Result};
