use std::num::ParseIntError;
use std::path::PathBuf;

use rs_lm_core::{FIXED_SEED, Seed};
use thiserror::Error;

pub const USAGE: &str = "usage: rs-lm <window_length> <initial_text> <text_length> <fixed|random> <corpus_file>";

/// Problems found while reading the command line.
#[derive(Debug, Error)]
pub enum ConfigError {
	#[error("expected 5 arguments, got {0}")]
	ArgumentCount(usize),

	#[error("{name} must be an integer, got {value:?}: {source}")]
	NotAnInteger {
		name: &'static str,
		value: String,
		source: ParseIntError,
	},

	#[error("window_length must be >= 1")]
	WindowLength,

	#[error("text_length ({text_length}) is shorter than initial_text ({initial_length} characters)")]
	TextLength { text_length: usize, initial_length: usize },

	#[error("mode must be 'fixed' or 'random', got {0:?}")]
	Mode(String),
}

/// Settings of one run, read from the positional arguments.
///
/// # Invariants
/// - `window_length >= 1`
/// - `text_length` >= number of characters of `initial_text`
#[derive(Debug, PartialEq)]
pub struct RunConfig {
	pub window_length: usize,
	pub initial_text: String,
	pub text_length: usize,
	pub seed: Seed,
	pub corpus: PathBuf,
}

impl RunConfig {
	/// Builds a configuration from the arguments following the program name.
	///
	/// # Errors
	/// Returns a [`ConfigError`] describing the first invalid argument.
	pub fn from_args<I>(args: I) -> Result<Self, ConfigError>
	where
		I: IntoIterator<Item = String>,
	{
		let args: Vec<String> = args.into_iter().collect();
		let [window_length, initial_text, text_length, mode, corpus] = <[String; 5]>::try_from(args)
			.map_err(|args| ConfigError::ArgumentCount(args.len()))?;

		let window_length = parse_integer("window_length", &window_length)?;
		if window_length == 0 {
			return Err(ConfigError::WindowLength);
		}

		let text_length = parse_integer("text_length", &text_length)?;
		let initial_length = initial_text.chars().count();
		if text_length < initial_length {
			return Err(ConfigError::TextLength { text_length, initial_length });
		}

		let seed = match mode.to_lowercase().as_str() {
			"fixed" => Seed::Fixed(FIXED_SEED),
			"random" => Seed::Time,
			_ => return Err(ConfigError::Mode(mode)),
		};

		Ok(Self { window_length, initial_text, text_length, seed, corpus: PathBuf::from(corpus) })
	}
}

fn parse_integer(name: &'static str, value: &str) -> Result<usize, ConfigError> {
	value.trim().parse().map_err(|source| ConfigError::NotAnInteger { name, value: value.to_owned(), source })
}
