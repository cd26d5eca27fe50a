//! Sliding-window language model.
//!
//! - Per-window successor distributions (`CharDistribution`)
//! - The window → distribution model with training and generation
//!   (`LanguageModel`)

/// Ordered successor counts and probabilities for a single window.
///
/// Supports increment-or-insert, indexed access and inverse-CDF sampling.
pub mod char_distribution;

/// Window → distribution mapping, training over a corpus and
/// seeded text generation.
pub mod language_model;
