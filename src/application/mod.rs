//! Application layer orchestrating the letter-of-credit workflow.
//!
//! This module defines the `LetterEngine`, the primary entry point for
//! processing actions. It loads the addressed letter, resolves the acting
//! participants, applies the matching domain transition and persists the result.

pub mod engine;
