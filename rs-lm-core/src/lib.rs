//! Character-level sliding-window text generation library.
//!
//! This crate provides:
//! - A per-window distribution of successor characters
//! - A language model trained on a raw text corpus
//! - Reproducible generation driven by a seedable random generator
//!
//! Corpus loading is kept internal; use `LanguageModel::train_from_file`.

/// Language model and successor distributions.
pub mod model;

/// Error type shared by the model and its distributions.
pub mod error;

/// I/O utilities (corpus loading).
///
/// Not exposed
pub(crate) mod io;

pub use error::ModelError;
pub use model::char_distribution::{CharData, CharDistribution};
pub use model::language_model::{FIXED_SEED, LanguageModel, Seed};
