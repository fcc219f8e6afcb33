//! Extraction manifest (`index.json`) support.
//!
//! Every extraction writes an `index.json` next to the member files. The
//! manifest records the three facts an archive cannot be rebuilt without:
//! the index layout version, the script key, and the member order.

use std::{fs, path::Path};

use serde::{Deserialize, Serialize};

use super::{ManifestError, mbl::Version};

/// File name of the manifest inside an extraction directory
pub const FILE_NAME: &str = "index.json";

/// Manifest describing an extracted archive
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Manifest {
	/// Archive index layout version
	#[serde(rename = "Version")]
	pub version: Version,

	/// Uppercase hex of the raw key bytes; `None` when the archive holds no
	/// script members. An empty key serializes to `""`, not null.
	#[serde(rename = "Key")]
	pub key: Option<String>,

	/// Member names in archive order
	#[serde(rename = "Files")]
	pub files: Vec<String>,
}

impl Manifest {
	/// Creates a manifest from raw key bytes and an ordered member list
	pub fn new(version: Version, key: Option<&[u8]>, files: Vec<String>) -> Self {
		Self {
			version,
			key: key.map(hex::encode_upper),
			files,
		}
	}

	/// Returns the raw key bytes decoded from the hex field
	///
	/// A null or empty key field decodes to an empty key.
	pub fn key_bytes(&self) -> Result<Vec<u8>, ManifestError> {
		match self.key.as_deref() {
			Some(text) if !text.is_empty() => Ok(hex::decode(text)?),
			_ => Ok(Vec::new()),
		}
	}

	/// Loads the manifest from `dir/index.json`
	pub fn load(dir: impl AsRef<Path>) -> Result<Self, ManifestError> {
		let text = fs::read_to_string(dir.as_ref().join(FILE_NAME))?;
		Ok(serde_json::from_str(&text)?)
	}

	/// Saves the manifest to `dir/index.json`
	pub fn save(&self, dir: impl AsRef<Path>) -> Result<(), ManifestError> {
		let text = serde_json::to_string_pretty(self)?;
		fs::write(dir.as_ref().join(FILE_NAME), text)?;
		Ok(())
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_field_names() {
		let manifest =
			Manifest::new(Version::V1, Some(&[0xAB, 0x01]), vec!["a.txt".to_string()]);
		let json = serde_json::to_string(&manifest).unwrap();
		assert!(json.contains("\"Version\":\"v1\""));
		assert!(json.contains("\"Key\":\"AB01\""));
		assert!(json.contains("\"Files\":[\"a.txt\"]"));
	}

	#[test]
	fn test_empty_key_serializes_to_empty_string() {
		let manifest = Manifest::new(Version::V3, Some(&[]), Vec::new());
		let json = serde_json::to_string(&manifest).unwrap();
		assert!(json.contains("\"Key\":\"\""));
		assert_eq!(manifest.key_bytes().unwrap(), Vec::<u8>::new());
	}

	#[test]
	fn test_null_key_decodes_to_empty() {
		let manifest: Manifest =
			serde_json::from_str(r#"{"Version":"v2","Key":null,"Files":[]}"#).unwrap();
		assert_eq!(manifest.version, Version::V2);
		assert_eq!(manifest.key, None);
		assert_eq!(manifest.key_bytes().unwrap(), Vec::<u8>::new());
	}

	#[test]
	fn test_key_round_trip() {
		let manifest = Manifest::new(Version::V3, Some(&[0xAB, 0xCD]), Vec::new());
		assert_eq!(manifest.key.as_deref(), Some("ABCD"));
		assert_eq!(manifest.key_bytes().unwrap(), vec![0xAB, 0xCD]);
	}
}
