use std::fmt;
use std::slice::Iter;

use crate::error::ModelError;

/// One observed successor character of a window.
///
/// `probability` and `cumulative_probability` are derived from the counts
/// of the owning [`CharDistribution`] and are only meaningful after
/// [`CharDistribution::recompute_probabilities`].
#[derive(Clone, Debug, PartialEq)]
pub struct CharData {
	character: char,
	count: usize,
	probability: f64,
	cumulative_probability: f64,
}

impl CharData {
	fn new(character: char) -> Self {
		Self { character, count: 1, probability: 0.0, cumulative_probability: 0.0 }
	}

	pub fn character(&self) -> char {
		self.character
	}

	/// Number of times this character followed the window.
	pub fn count(&self) -> usize {
		self.count
	}

	pub fn probability(&self) -> f64 {
		self.probability
	}

	pub fn cumulative_probability(&self) -> f64 {
		self.cumulative_probability
	}
}

/// Successor characters observed after a single window.
///
/// Entries are unique by character. A character seen for the first time is
/// inserted at the front, so the order is the reverse of first observation.
/// The number of entries is bounded by the alphabet, a linear scan is enough.
///
/// ## Invariants
/// - Every entry has a count >= 1
/// - After a recompute, probabilities sum to 1.0 and the last cumulative
///   probability is 1.0 (up to floating-point rounding)
#[derive(Clone, Debug, Default)]
pub struct CharDistribution {
	entries: Vec<CharData>,
}

impl CharDistribution {
	/// Creates an empty distribution.
	pub fn new() -> Self {
		Self::default()
	}

	/// Number of distinct characters.
	pub fn len(&self) -> usize {
		self.entries.len()
	}

	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}

	/// Returns the front entry, the most recently discovered character.
	pub fn first(&self) -> Option<&CharData> {
		self.entries.first()
	}

	/// Inserts a new entry with a count of 1 at the front.
	///
	/// Does not check for duplicates, use [`update`](Self::update) when
	/// recording observations.
	pub fn add_first(&mut self, character: char) {
		self.entries.insert(0, CharData::new(character));
	}

	/// Records one occurrence of `character`.
	///
	/// - If the character is already known, its count is increased.
	/// - Otherwise a new entry is added at the front with a count of 1.
	///
	/// Probabilities are left untouched.
	pub fn update(&mut self, character: char) {
		match self.entries.iter_mut().find(|data| data.character == character) {
			Some(data) => data.count += 1,
			None => self.add_first(character),
		}
	}

	/// Position of `character` in the distribution, if present.
	pub fn index_of(&self, character: char) -> Option<usize> {
		self.entries.iter().position(|data| data.character == character)
	}

	/// Returns the entry at `index`.
	///
	/// # Errors
	/// Returns [`ModelError::IndexOutOfRange`] if `index >= len()`.
	pub fn get(&self, index: usize) -> Result<&CharData, ModelError> {
		self.entries.get(index).ok_or(ModelError::IndexOutOfRange { index, size: self.entries.len() })
	}

	/// Removes the entry for `character`.
	///
	/// Returns `true` if it was present.
	pub fn remove(&mut self, character: char) -> bool {
		match self.index_of(character) {
			Some(index) => {
				self.entries.remove(index);
				true
			}
			None => false,
		}
	}

	/// All entries in order.
	pub fn entries(&self) -> &[CharData] {
		&self.entries
	}

	/// Owned copy of all entries in order.
	pub fn to_vec(&self) -> Vec<CharData> {
		self.entries.clone()
	}

	pub fn iter(&self) -> Iter<'_, CharData> {
		self.entries.iter()
	}

	/// Iterates over the entries starting at `index`.
	///
	/// An index past the end yields an empty iterator.
	pub fn iter_from(&self, index: usize) -> Iter<'_, CharData> {
		self.entries.get(index..).unwrap_or_default().iter()
	}

	/// Derives probabilities and cumulative probabilities from the counts.
	///
	/// Must run once all counts for the window are known and before any
	/// call to [`sample`](Self::sample).
	///
	/// # Errors
	/// Returns [`ModelError::EmptyDistribution`] if there is nothing to
	/// normalize. No entry is modified in that case.
	pub fn recompute_probabilities(&mut self) -> Result<(), ModelError> {
		let total: usize = self.entries.iter().map(|data| data.count).sum();
		if total == 0 {
			return Err(ModelError::EmptyDistribution);
		}

		let mut cumulative = 0.0;
		for data in &mut self.entries {
			data.probability = data.count as f64 / total as f64;
			cumulative += data.probability;
			data.cumulative_probability = cumulative;
		}
		Ok(())
	}

	/// Picks a character by inverse-CDF sampling.
	///
	/// `r` is a uniform draw in `[0, 1)`. The first entry whose cumulative
	/// probability reaches `r` wins. If rounding leaves the last cumulative
	/// value below `r`, the last entry is returned.
	///
	/// Returns `None` only if the distribution is empty.
	pub fn sample(&self, r: f64) -> Option<char> {
		self.entries
			.iter()
			.find(|data| data.cumulative_probability >= r)
			.or_else(|| self.entries.last())
			.map(|data| data.character)
	}
}

impl<'a> IntoIterator for &'a CharDistribution {
	type Item = &'a CharData;
	type IntoIter = Iter<'a, CharData>;

	fn into_iter(self) -> Self::IntoIter {
		self.entries.iter()
	}
}

/// Formats a probability with at most four decimals, keeping one.
///
/// `1.0` -> `"1.0"`, `0.5` -> `"0.5"`, `1.0 / 3.0` -> `"0.3333"`
fn format_probability(value: f64) -> String {
	let mut text = format!("{:.4}", value);
	while text.ends_with('0') {
		text.pop();
	}
	if text.ends_with('.') {
		text.push('0');
	}
	text
}

impl fmt::Display for CharDistribution {
	/// Renders `(c count p cp)` for each entry, e.g. `((b 2 0.6667 0.6667) (a 1 0.3333 1.0))`.
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "(")?;
		for (i, data) in self.entries().iter().enumerate() {
			if i > 0 {
				write!(f, " ")?;
			}
			write!(
				f,
				"({} {} {} {})",
				data.character,
				data.count,
				format_probability(data.probability),
				format_probability(data.cumulative_probability)
			)?;
		}
		write!(f, ")")
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn distribution(chars: &str) -> CharDistribution {
		let mut distribution = CharDistribution::new();
		for c in chars.chars() {
			distribution.update(c);
		}
		distribution
	}

	#[test]
	fn update_inserts_new_characters_at_front() {
		let distribution = distribution("abca");
		let order: Vec<char> = distribution.entries().iter().map(CharData::character).collect();
		assert_eq!(order, vec!['c', 'b', 'a']);
		assert_eq!(distribution.get(2).unwrap().count(), 2);
		assert_eq!(distribution.first().unwrap().character(), 'c');
	}

	#[test]
	fn update_leaves_probabilities_stale() {
		let mut distribution = distribution("aa");
		distribution.recompute_probabilities().unwrap();
		distribution.update('b');
		assert_eq!(distribution.get(0).unwrap().probability(), 0.0);
		assert_eq!(distribution.get(1).unwrap().probability(), 1.0);
	}

	#[test]
	fn get_out_of_range() {
		let distribution = distribution("ab");
		match distribution.get(2) {
			Err(ModelError::IndexOutOfRange { index, size }) => {
				assert_eq!(index, 2);
				assert_eq!(size, 2);
			}
			other => panic!("unexpected result: {:?}", other),
		}
	}

	#[test]
	fn index_of_and_remove() {
		let mut distribution = distribution("abc");
		assert_eq!(distribution.index_of('a'), Some(2));
		assert_eq!(distribution.index_of('z'), None);

		assert!(distribution.remove('b'));
		assert!(!distribution.remove('b'));
		assert_eq!(distribution.len(), 2);
		assert_eq!(distribution.index_of('a'), Some(1));
	}

	#[test]
	fn recompute_sets_probabilities_in_list_order() {
		let mut distribution = distribution("aab c");
		distribution.recompute_probabilities().unwrap();

		// order: c, ' ', b, a with counts 1, 1, 1, 2
		let probabilities: Vec<f64> = distribution.iter().map(CharData::probability).collect();
		assert_eq!(probabilities, vec![0.2, 0.2, 0.2, 0.4]);

		let last = distribution.get(3).unwrap().cumulative_probability();
		assert!((last - 1.0).abs() < 1e-9);
		let cumulative: Vec<f64> = distribution.iter().map(CharData::cumulative_probability).collect();
		assert!(cumulative.windows(2).all(|pair| pair[0] <= pair[1]));
	}

	#[test]
	fn recompute_empty_distribution_fails() {
		let mut distribution = CharDistribution::new();
		assert!(matches!(distribution.recompute_probabilities(), Err(ModelError::EmptyDistribution)));
	}

	#[test]
	fn recompute_is_idempotent() {
		let mut distribution = distribution("the quick brown fox");
		distribution.recompute_probabilities().unwrap();
		let before = distribution.to_vec();
		distribution.recompute_probabilities().unwrap();
		assert_eq!(before, distribution.to_vec());
	}

	#[test]
	fn sample_bounds() {
		let mut distribution = distribution("abbccc");
		distribution.recompute_probabilities().unwrap();

		assert_eq!(distribution.sample(0.0), Some('c'));
		assert_eq!(distribution.sample(0.5), Some('c'));
		assert_eq!(distribution.sample(0.6), Some('b'));
		assert_eq!(distribution.sample(0.999_999), Some('a'));
		// past the last cumulative value, falls back to the last entry
		assert_eq!(distribution.sample(1.5), Some('a'));
	}

	#[test]
	fn sample_empty() {
		assert_eq!(CharDistribution::new().sample(0.3), None);
	}

	#[test]
	fn iter_from_index() {
		let distribution = distribution("abc");
		let tail: Vec<char> = distribution.iter_from(1).map(CharData::character).collect();
		assert_eq!(tail, vec!['b', 'a']);
		assert_eq!(distribution.iter_from(3).count(), 0);
		assert_eq!(distribution.iter_from(10).count(), 0);
	}

	#[test]
	fn display_format() {
		let mut distribution = distribution("aab");
		distribution.recompute_probabilities().unwrap();
		assert_eq!(distribution.to_string(), "((b 1 0.3333 0.3333) (a 2 0.6667 1.0))");

		assert_eq!(CharDistribution::new().to_string(), "()");
	}

	#[test]
	fn format_probability_trims_zeros() {
		assert_eq!(format_probability(1.0), "1.0");
		assert_eq!(format_probability(0.5), "0.5");
		assert_eq!(format_probability(0.0), "0.0");
		assert_eq!(format_probability(0.25), "0.25");
	}
}
