//! Game key catalogue (`gamekeys.json`) and interactive selection.
//!
//! The catalogue is a flat JSON map from display name to key literal,
//! looked up in the working directory. It is seeded on first use and meant
//! to be edited by hand: add one entry per game, using the key string the
//! engine release shipped with. Key literals are encoded to raw bytes via
//! Shift-JIS, so Japanese titles key correctly.

use std::{collections::BTreeMap, fs, path::Path};

use anyhow::{Context, Result};
use inquire::{Select, Text};
use marble_rs::file::sjis;

/// Catalogue file name, looked up in the working directory
pub const CATALOGUE_FILE: &str = "gamekeys.json";

/// Label of the manual-entry choice appended to the catalogue
const MANUAL_ENTRY: &str = "(enter a key manually)";

/// Starter catalogue written on first use
fn starter_catalogue() -> BTreeMap<String, String> {
	BTreeMap::from([(String::from("(no encryption)"), String::new())])
}

/// Loads the catalogue, seeding `gamekeys.json` when it does not exist
pub fn load_catalogue() -> Result<BTreeMap<String, String>> {
	let path = Path::new(CATALOGUE_FILE);
	if !path.exists() {
		let seeded = starter_catalogue();
		let text = serde_json::to_string_pretty(&seeded)
			.context("Failed to serialize the key catalogue")?;
		fs::write(path, text).with_context(|| format!("Failed to seed {}", CATALOGUE_FILE))?;
		return Ok(seeded);
	}

	let text =
		fs::read_to_string(path).with_context(|| format!("Failed to read {}", CATALOGUE_FILE))?;
	serde_json::from_str(&text).with_context(|| format!("Malformed {}", CATALOGUE_FILE))
}

/// Prompts for a script key and returns its raw bytes
pub fn prompt_key() -> Result<Vec<u8>> {
	let catalogue = load_catalogue()?;
	let mut options: Vec<String> = catalogue.keys().cloned().collect();
	options.push(MANUAL_ENTRY.to_string());

	let choice = Select::new("Script key for this archive:", options).prompt()?;
	let literal = if choice == MANUAL_ENTRY {
		Text::new("Key:").prompt()?
	} else {
		catalogue.get(&choice).cloned().unwrap_or_default()
	};

	Ok(sjis::encode(&literal))
}
