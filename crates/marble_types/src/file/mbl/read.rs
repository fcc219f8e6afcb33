//! Archive index auto-detection and parsing.
//!
//! Detection runs three trial parsers in a fixed order: v3 (name width read
//! from the header, records at offset 8), then v1 (0x10 at offset 4), then
//! v2 (0x38 at offset 4). A trial is accepted only when *every* record
//! validates; a single plausible-looking entry is not enough. Validation
//! requires a non-empty trimmed name, `offset >= index_size` and
//! `offset + size <= archive_size`.

use super::{Entry, File, Version, constants};
use crate::file::{MblError, sjis};

pub(super) fn parse(data: Vec<u8>, script_archive: bool) -> Result<File, MblError> {
	if data.len() < 8 {
		return Err(MblError::InsufficientData {
			expected: 8,
			actual: data.len(),
		});
	}

	let count = u32::from_le_bytes([data[0], data[1], data[2], data[3]]);
	if count == 0 || count > constants::MAX_FILE_COUNT {
		return Err(MblError::BadFileCount(count));
	}

	// v3 stores the name field width where v1/v2 place their first record;
	// a width that yields a fully consistent index wins.
	let name_len = u32::from_le_bytes([data[4], data[5], data[6], data[7]]) as usize;
	if (1..=0xFF).contains(&name_len)
		&& let Some(entries) = try_parse(&data, count, name_len, 8, script_archive)
	{
		return Ok(File {
			version: Version::V3,
			entries,
			script_archive,
			data,
		});
	}

	if let Some(entries) = try_parse(&data, count, constants::V1_NAME_LEN, 4, script_archive) {
		return Ok(File {
			version: Version::V1,
			entries,
			script_archive,
			data,
		});
	}

	if let Some(entries) = try_parse(&data, count, constants::V2_NAME_LEN, 4, script_archive) {
		return Ok(File {
			version: Version::V2,
			entries,
			script_archive,
			data,
		});
	}

	Err(MblError::NoValidIndex)
}

/// Trial-parses one index layout; `None` as soon as any record fails
fn try_parse(
	data: &[u8],
	count: u32,
	name_len: usize,
	index_offset: usize,
	script_archive: bool,
) -> Option<Vec<Entry>> {
	let record_size = name_len + 8;
	let index_size = index_offset + count as usize * record_size;
	if index_size > data.len() {
		return None;
	}

	let mut entries = Vec::with_capacity(count as usize);
	let mut pos = index_offset;
	for _ in 0..count {
		let field = &data[pos..pos + name_len];
		let base = pos + name_len;
		let offset = u32::from_le_bytes([data[base], data[base + 1], data[base + 2], data[base + 3]]);
		let size =
			u32::from_le_bytes([data[base + 4], data[base + 5], data[base + 6], data[base + 7]]);

		let name = decode_name(field)?;
		if (offset as usize) < index_size {
			return None;
		}
		if offset as u64 + size as u64 > data.len() as u64 {
			return None;
		}

		let script = script_archive || name.ends_with(".s");
		entries.push(Entry {
			name,
			offset,
			size,
			script,
		});
		pos += record_size;
	}

	Some(entries)
}

/// Reconstructs a member name from its fixed-width field
///
/// The base name runs up to the first null byte; any text after that null is
/// the extension (`\x00S` is the canonical encoding of `.s`). The result is
/// lowercased for use as an extraction path. `None` when the base is empty.
fn decode_name(field: &[u8]) -> Option<String> {
	let base = sjis::decode_fixed(field);
	if base.is_empty() {
		return None;
	}

	let split = field.iter().position(|&b| b == 0).unwrap_or(field.len());
	let extension = if split + 1 < field.len() {
		sjis::decode_fixed(&field[split + 1..])
	} else {
		String::new()
	};

	let name = if extension.is_empty() {
		base
	} else {
		format!("{}.{}", base, extension)
	};
	Some(name.to_lowercase())
}
