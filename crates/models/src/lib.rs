//! Model alias expansion and per-hat model/backend resolution.
//!
//! Override cascade (precedence, per field):
//! 1. Hat-level `model` / `backend` (when set and non-empty)
//! 2. Process-wide `cli.model` / `cli.backend` (when set and non-empty)
//! 3. Built-in [`DEFAULT_MODEL`] / [`DEFAULT_BACKEND`]
//!
//! The chosen model is then expanded through the [`AliasTable`] scoped to the
//! chosen backend. Unknown model names pass through verbatim: checking that a
//! model actually exists is left to the backend at call time.

pub mod alias;
pub mod resolve;

pub use {
    alias::AliasTable,
    resolve::{DEFAULT_BACKEND, DEFAULT_MODEL, Layer, Resolver, Selection},
};
