use thiserror::Error;

/// Errors raised by the language model and its distributions.
///
/// Reaching a window that was never seen during generation is not an
/// error: generation simply stops there.
#[derive(Debug, Error)]
pub enum ModelError {
	/// A model needs at least one character of context.
	#[error("window length must be >= 1")]
	InvalidWindowLength,

	/// Indexed access past the end of a distribution.
	#[error("index {index} out of range for distribution of size {size}")]
	IndexOutOfRange { index: usize, size: usize },

	/// Probabilities were requested for a distribution holding no counts.
	#[error("cannot compute probabilities of an empty distribution")]
	EmptyDistribution,

	/// The corpus could not be read.
	#[error("failed to read corpus: {0}")]
	Io(#[from] std::io::Error),
}
