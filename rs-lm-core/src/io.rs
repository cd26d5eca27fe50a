use std::fs::File;
use std::io::{self, Read};
use std::path::Path;

/// Reads a whole text file as a single `String`.
///
/// Line breaks are kept: they are characters like any other for the model.
pub(crate) fn read_corpus<P: AsRef<Path>>(filename: P) -> io::Result<String> {
	let mut contents = String::new();
	File::open(filename)?.read_to_string(&mut contents)?;
	Ok(contents)
}
