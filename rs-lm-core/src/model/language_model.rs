use std::collections::HashMap;
use std::fmt;
use std::path::Path;
use std::time::{SystemTime, UNIX_EPOCH};

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use super::char_distribution::CharDistribution;
use crate::error::ModelError;
use crate::io::read_corpus;

/// Seed used by the command line in fixed mode.
pub const FIXED_SEED: u64 = 20;

/// How the random generator of a model is initialized.
///
/// # Variants
/// - `Fixed(u64)`: reproducible sampling, the same seed replays the same text.
/// - `Time`: seeded from the system clock, every run differs.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Seed {
	Fixed(u64),
	Time,
}

impl Seed {
	/// Resolves the seed to a concrete value.
	fn value(self) -> u64 {
		match self {
			Seed::Fixed(seed) => seed,
			Seed::Time => SystemTime::now()
				.duration_since(UNIX_EPOCH)
				.map(|elapsed| elapsed.as_nanos() as u64)
				.unwrap_or_default(),
		}
	}
}

/// Character-level sliding-window language model.
///
/// Maps every window (a substring of exactly `window_length` characters)
/// seen in the corpus to the distribution of characters that followed it.
///
/// # Responsibilities
/// - Count successor characters for each window (`train`)
/// - Keep probabilities in sync with the final counts
/// - Generate text by sampling one character at a time (`generate`)
///
/// # Invariants
/// - `window_length >= 1`
/// - Every key has exactly `window_length` characters
/// - Every distribution holds at least one entry, and its probabilities
///   reflect its counts once `train` returns
///
/// Both `train` and `generate` need `&mut self` (the random generator
/// advances on every draw); wrap the model in a `Mutex` to share it.
#[derive(Clone, Debug)]
pub struct LanguageModel {
	window_length: usize,
	distributions: HashMap<String, CharDistribution>,
	rng: ChaCha8Rng,
}

impl LanguageModel {
	/// Creates an empty model.
	///
	/// # Errors
	/// Returns [`ModelError::InvalidWindowLength`] if `window_length == 0`.
	pub fn new(window_length: usize, seed: Seed) -> Result<Self, ModelError> {
		if window_length == 0 {
			return Err(ModelError::InvalidWindowLength);
		}

		let seed_value = seed.value();
		log::debug!("new model: window_length={} seed={:?} ({})", window_length, seed, seed_value);

		Ok(Self {
			window_length,
			distributions: HashMap::new(),
			rng: ChaCha8Rng::seed_from_u64(seed_value),
		})
	}

	/// Resets the random generator.
	///
	/// Reseeding with the same `Seed::Fixed` value replays the same
	/// sequence of draws, so `generate` can be repeated on an already
	/// trained model without training it again.
	pub fn reseed(&mut self, seed: Seed) {
		let seed_value = seed.value();
		log::debug!("reseed: seed={:?} ({})", seed, seed_value);
		self.rng = ChaCha8Rng::seed_from_u64(seed_value);
	}

	pub fn window_length(&self) -> usize {
		self.window_length
	}

	/// Number of distinct windows learned so far.
	pub fn len(&self) -> usize {
		self.distributions.len()
	}

	pub fn is_empty(&self) -> bool {
		self.distributions.is_empty()
	}

	/// Distribution of successors for `window`, if it was seen.
	pub fn distribution(&self, window: &str) -> Option<&CharDistribution> {
		self.distributions.get(window)
	}

	/// Iterates over the learned windows, in no particular order.
	pub fn windows(&self) -> impl Iterator<Item = &str> {
		self.distributions.keys().map(String::as_str)
	}

	/// Learns from `corpus`.
	///
	/// For every window of the corpus followed by at least one character,
	/// records that character in the window's distribution. Once the whole
	/// corpus has been scanned, every distribution is normalized again.
	///
	/// Calling it several times accumulates counts.
	///
	/// # Notes
	/// - UTF-8 safe: windows are counted in characters, not bytes.
	/// - A corpus shorter than `window_length + 1` adds nothing.
	pub fn train(&mut self, corpus: &str) -> Result<(), ModelError> {
		let chars: Vec<char> = corpus.chars().collect();

		let mut scanned = 0;
		for pair in chars.windows(self.window_length + 1) {
			// Split the slice into the window and the next character
			if let Some((next_char, window)) = pair.split_last() {
				let key: String = window.iter().collect();
				self.distributions.entry(key).or_default().update(*next_char);
				scanned += 1;
			}
		}

		for distribution in self.distributions.values_mut() {
			distribution.recompute_probabilities()?;
		}

		log::debug!("trained on {} windows, {} distinct windows known", scanned, self.distributions.len());
		Ok(())
	}

	/// Reads the file at `filepath` and learns from its content.
	///
	/// # Errors
	/// Returns [`ModelError::Io`] if the file cannot be read as UTF-8 text.
	pub fn train_from_file<P: AsRef<Path>>(&mut self, filepath: P) -> Result<(), ModelError> {
		let corpus = read_corpus(&filepath)?;
		log::debug!("loaded corpus {} ({} bytes)", filepath.as_ref().display(), corpus.len());
		self.train(&corpus)
	}

	/// Generates text starting from `initial_text`.
	///
	/// Appends sampled characters until the text holds `target_length`
	/// characters, or until the trailing window is unknown to the model.
	/// When the text is shorter than `window_length`, the whole text is used
	/// as window, which never matches a key and stops the generation.
	///
	/// # Notes
	/// - The output never exceeds `target_length` characters as long as
	///   `initial_text` holds at most `target_length` characters. A longer
	///   `initial_text` is returned unchanged, nothing is truncated.
	pub fn generate(&mut self, initial_text: &str, target_length: usize) -> String {
		let mut chars: Vec<char> = initial_text.chars().collect();

		while chars.len() < target_length {
			let start = chars.len().saturating_sub(self.window_length);
			let window: String = chars[start..].iter().collect();

			let Some(distribution) = self.distributions.get(&window) else {
				log::trace!("window {:?} unknown, stopping at {} characters", window, chars.len());
				break;
			};

			let r: f64 = self.rng.random();
			match distribution.sample(r) {
				Some(next_char) => chars.push(next_char),
				None => break,
			}
		}

		chars.into_iter().collect()
	}
}

impl fmt::Display for LanguageModel {
	/// One line per window, `window : distribution`, windows sorted.
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		let mut windows: Vec<&String> = self.distributions.keys().collect();
		windows.sort();
		for window in windows {
			if let Some(distribution) = self.distributions.get(window) {
				writeln!(f, "{} : {}", window, distribution)?;
			}
		}
		Ok(())
	}
}
