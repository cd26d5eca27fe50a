mod config;

use std::process::ExitCode;

use anyhow::Context;
use config::{RunConfig, USAGE};
use rs_lm_core::LanguageModel;

fn main() -> ExitCode {
	env_logger::init();

	// Arguments: window length, initial text, text length, seed mode, corpus file
	let config = match RunConfig::from_args(std::env::args().skip(1)) {
		Ok(config) => config,
		Err(err) => {
			eprintln!("error: {}", err);
			eprintln!("{}", USAGE);
			return ExitCode::FAILURE;
		}
	};

	match run(&config) {
		Ok(text) => {
			println!("{}", text);
			ExitCode::SUCCESS
		}
		Err(err) => {
			eprintln!("error: {:#}", err);
			ExitCode::FAILURE
		}
	}
}

/// Trains a model on the corpus and generates the requested text.
fn run(config: &RunConfig) -> anyhow::Result<String> {
	let mut model = LanguageModel::new(config.window_length, config.seed)?;

	model
		.train_from_file(&config.corpus)
		.with_context(|| format!("Training on {} failed", config.corpus.display()))?;
	log::info!("{} windows learned from {}", model.len(), config.corpus.display());

	Ok(model.generate(&config.initial_text, config.text_length))
}
