//! Shared error plumbing and string utilities used across all hatrack crates.

pub mod error;
pub mod suggest;

pub use {
    error::FromMessage,
    suggest::{levenshtein, suggest},
};
