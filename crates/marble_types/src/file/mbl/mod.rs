//! `.mbl` archive container support.
//!
//! MBL archives are flat containers: a member count, an index of
//! fixed-width records (Shift-JIS name, offset, size) and the payloads.
//! Three layouts exist in the wild and share the same extension:
//!
//! | Version | Name field | Header                          |
//! |---------|------------|---------------------------------|
//! | v1      | 0x10 bytes | count                           |
//! | v2      | 0x38 bytes | count                           |
//! | v3      | variable   | count + name field width        |
//!
//! The word at offset 4 is ambiguous: v3 stores its name-field width there
//! while v1/v2 begin their first record at that offset. [`File::from_bytes`]
//! resolves the ambiguity by trial-parsing each layout in turn.
//!
//! Members whose name ends in `.s`, and every member of an archive whose
//! stem ends in `_data`, are scripts: their payloads are stored behind the
//! repeating-key XOR cipher from [`crate::file::xor`].

mod read;
mod write;

pub use write::{build, create};

use std::{fmt::Display, io::Read, path::Path};

use serde::{Deserialize, Serialize};

use crate::file::{Manifest, MblError, xor::xor};

pub(crate) mod constants {
	/// Largest member count accepted as plausible
	pub const MAX_FILE_COUNT: u32 = 0xFF_FFFF;

	/// Name field width of v1 archives
	pub const V1_NAME_LEN: usize = 0x10;

	/// Name field width of v2 archives
	pub const V2_NAME_LEN: usize = 0x38;

	/// Zero padding between the index and the first payload (v1/v2 only)
	pub const INDEX_PADDING: usize = 4;

	/// Archive stem suffix marking every member as a script
	pub const SCRIPT_STEM_SUFFIX: &str = "_data";
}

/// Archive index layout version
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Version {
	/// 0x10-byte name fields, records at offset 4
	V1,
	/// 0x38-byte name fields, records at offset 4
	V2,
	/// Name field width stored in the header, records at offset 8
	V3,
}

impl Version {
	/// Returns the fixed name field width, or `None` for v3
	pub fn filename_length(self) -> Option<usize> {
		match self {
			Version::V1 => Some(constants::V1_NAME_LEN),
			Version::V2 => Some(constants::V2_NAME_LEN),
			Version::V3 => None,
		}
	}

	/// Returns the header size in bytes
	pub fn header_size(self) -> usize {
		match self {
			Version::V1 | Version::V2 => 4,
			Version::V3 => 8,
		}
	}

	/// Returns the padding between the index records and the first payload
	pub fn index_padding(self) -> usize {
		match self {
			Version::V1 | Version::V2 => constants::INDEX_PADDING,
			Version::V3 => 0,
		}
	}
}

impl Display for Version {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match self {
			Version::V1 => write!(f, "v1"),
			Version::V2 => write!(f, "v2"),
			Version::V3 => write!(f, "v3"),
		}
	}
}

/// Returns true when the archive file name marks every member as a script
///
/// The test is on the stem: `mg_data.mbl` qualifies, `mg.mbl` does not.
/// The comparison is case-insensitive.
pub fn is_script_archive_name(file_name: &str) -> bool {
	let stem = match file_name.rsplit_once('.') {
		Some((stem, _ext)) => stem,
		None => file_name,
	};
	stem.to_lowercase().ends_with(constants::SCRIPT_STEM_SUFFIX)
}

/// Single member of an archive index
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
	name: String,
	offset: u32,
	size: u32,
	script: bool,
}

impl Entry {
	/// Returns the member name, lowercased, with the extension restored
	pub fn name(&self) -> &str {
		&self.name
	}

	/// Returns the payload offset from the start of the archive
	pub fn offset(&self) -> u32 {
		self.offset
	}

	/// Returns the payload size in bytes
	pub fn size(&self) -> u32 {
		self.size
	}

	/// Returns true when the member payload is stored XOR-encrypted
	pub fn is_script(&self) -> bool {
		self.script
	}
}

impl Display for Entry {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(
			f,
			"Entry {{ name: '{}', offset: {}, size: {}{} }}",
			self.name,
			self.offset,
			self.size,
			if self.script { ", script" } else { "" }
		)
	}
}

/// A parsed MBL archive: detected version, index and raw bytes
#[derive(Debug)]
pub struct File {
	version: Version,
	entries: Vec<Entry>,
	script_archive: bool,
	data: Vec<u8>,
}

impl File {
	/// Opens and parses an archive from the specified path
	pub fn open(path: impl AsRef<Path>) -> Result<Self, MblError> {
		let path = path.as_ref();
		let data = std::fs::read(path)?;
		let file_name = path.file_name().map(|n| n.to_string_lossy().into_owned());
		Self::from_bytes(data, file_name.as_deref().unwrap_or(""))
	}

	/// Parses an archive from a byte buffer
	///
	/// `archive_name` is the file name of the archive (not a path); it only
	/// feeds the `_data` stem test that marks whole archives as scripted.
	pub fn from_bytes(data: Vec<u8>, archive_name: &str) -> Result<Self, MblError> {
		read::parse(data, is_script_archive_name(archive_name))
	}

	/// Parses an archive from any reader
	pub fn from_reader<R: Read>(reader: &mut R, archive_name: &str) -> Result<Self, MblError> {
		let mut data = Vec::new();
		reader.read_to_end(&mut data)?;
		Self::from_bytes(data, archive_name)
	}

	/// Returns the detected index layout version
	pub fn version(&self) -> Version {
		self.version
	}

	/// Returns the parsed index entries in archive order
	pub fn entries(&self) -> &[Entry] {
		&self.entries
	}

	/// Returns true when the archive stem marks every member as a script
	pub fn is_script_archive(&self) -> bool {
		self.script_archive
	}

	/// Returns the member payload, decrypting scripts with `key`
	///
	/// Entry bounds were validated during detection, so extraction itself
	/// cannot fail; an empty key returns script payloads verbatim.
	pub fn extract(&self, entry: &Entry, key: &[u8]) -> Vec<u8> {
		let start = entry.offset as usize;
		let end = start + entry.size as usize;
		let payload = &self.data[start..end];
		if entry.script {
			xor(payload, key)
		} else {
			payload.to_vec()
		}
	}

	/// Builds the manifest describing this archive
	///
	/// The key is recorded (as uppercase hex, `""` included) only when at
	/// least one member is a script; otherwise the field is null.
	pub fn manifest(&self, key: &[u8]) -> Manifest {
		let has_script = self.entries.iter().any(Entry::is_script);
		let files = self.entries.iter().map(|e| e.name.clone()).collect();
		Manifest::new(self.version, has_script.then_some(key), files)
	}
}

impl Display for File {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		writeln!(f, "MBL archive ({}, {} members):", self.version, self.entries.len())?;
		for entry in &self.entries {
			writeln!(f, "  {}", entry)?;
		}
		Ok(())
	}
}
