//! Archive layout and packing.
//!
//! Packing consumes an extraction directory and its `index.json`: the
//! manifest fixes the layout version, the key and the member order, and the
//! writer lays the index and payloads out exactly the way the engine's own
//! archives do. Script members are encrypted on the way in with the same
//! predicate the reader uses to decrypt them.

use std::path::Path;

use super::{Version, constants, is_script_archive_name};
use crate::file::{Manifest, MblError, sjis, xor::xor};

/// Packs `in_dir` (member files plus `index.json`) into `archive_path`
///
/// Members are read in manifest order; a listed file that is missing from
/// the directory aborts the pack. Returns the number of members written.
pub fn create(in_dir: impl AsRef<Path>, archive_path: impl AsRef<Path>) -> Result<usize, MblError> {
	let in_dir = in_dir.as_ref();
	let archive_path = archive_path.as_ref();

	let manifest = Manifest::load(in_dir)?;
	let key = manifest.key_bytes()?;

	let mut members = Vec::with_capacity(manifest.files.len());
	for name in &manifest.files {
		let path = in_dir.join(name);
		let data = std::fs::read(&path).map_err(|e| {
			if e.kind() == std::io::ErrorKind::NotFound {
				MblError::MissingMember(name.clone())
			} else {
				MblError::IOError(e)
			}
		})?;
		members.push((name.clone(), data));
	}

	let file_name = archive_path.file_name().map(|n| n.to_string_lossy().into_owned());
	let bytes = build(manifest.version, &key, file_name.as_deref().unwrap_or(""), &members)?;
	std::fs::write(archive_path, bytes)?;
	Ok(members.len())
}

/// Builds archive bytes in memory
///
/// `archive_name` is the archive file name; its stem decides whether every
/// member is treated as a script. Member payloads land contiguously in
/// `members` order, immediately after the index (and its padding for
/// v1/v2).
pub fn build(
	version: Version,
	key: &[u8],
	archive_name: &str,
	members: &[(String, Vec<u8>)],
) -> Result<Vec<u8>, MblError> {
	if members.is_empty() {
		return Err(MblError::BadFileCount(0));
	}

	let stored: Vec<String> = members.iter().map(|(name, _)| stored_name(name)).collect();
	let name_len = name_field_width(version, members, &stored)?;

	let preamble =
		version.header_size() + members.len() * (name_len + 8) + version.index_padding();
	let total: usize = preamble + members.iter().map(|(_, data)| data.len()).sum::<usize>();

	let mut out = Vec::with_capacity(total);
	out.extend_from_slice(&(members.len() as u32).to_le_bytes());
	if version == Version::V3 {
		out.extend_from_slice(&(name_len as u32).to_le_bytes());
	}

	let mut offsets = Vec::with_capacity(members.len());
	let mut offset = preamble;
	for ((_, data), stored) in members.iter().zip(&stored) {
		out.extend_from_slice(&sjis::encode_fixed(stored, name_len + 1)[..name_len]);
		out.extend_from_slice(&(offset as u32).to_le_bytes());
		out.extend_from_slice(&(data.len() as u32).to_le_bytes());
		offsets.push(offset);
		offset += data.len();
	}
	if version.index_padding() > 0 {
		out.extend_from_slice(&[0u8; constants::INDEX_PADDING]);
	}

	let script_archive = is_script_archive_name(archive_name);
	for ((name, data), recorded) in members.iter().zip(offsets) {
		// Each payload must land on the offset its index record promises
		if out.len() != recorded {
			return Err(MblError::LayoutMismatch {
				name: name.clone(),
				expected: recorded,
				actual: out.len(),
			});
		}
		if name.to_lowercase().ends_with(".s") || script_archive {
			out.extend_from_slice(&xor(data, key));
		} else {
			out.extend_from_slice(data);
		}
	}

	Ok(out)
}

/// Derives the stored form of a member name
///
/// `name.s` becomes `NAME\0S`, `name.ext` becomes `NAME\0EXT`, and a name
/// without an extension is stored bare. The whole field is uppercased.
fn stored_name(name: &str) -> String {
	let modified = match name.rsplit_once('.') {
		Some((base, ext)) if ext.eq_ignore_ascii_case("s") => format!("{}\0S", base),
		Some((base, ext)) => format!("{}\0{}", base, ext),
		None => name.to_string(),
	};
	modified.to_uppercase()
}

/// Resolves the name field width and checks every stored name fits
///
/// v1/v2 widths are fixed and require room for a trailing null; v3 takes
/// the widest stored name, which must itself fit the 8-bit header field.
fn name_field_width(
	version: Version,
	members: &[(String, Vec<u8>)],
	stored: &[String],
) -> Result<usize, MblError> {
	let encoded_len = |s: &String| sjis::encode(s).len();
	match version.filename_length() {
		Some(fixed) => {
			for ((name, _), stored) in members.iter().zip(stored) {
				let len = encoded_len(stored);
				if len >= fixed {
					return Err(MblError::NameTooLong {
						name: name.clone(),
						version,
						len,
						max: fixed - 1,
					});
				}
			}
			Ok(fixed)
		}
		None => {
			let widest = stored.iter().map(encoded_len).max().unwrap_or(1).max(1);
			if widest > 0xFF {
				let (name, _) = &members[stored
					.iter()
					.position(|s| encoded_len(s) == widest)
					.unwrap_or(0)];
				return Err(MblError::NameTooLong {
					name: name.clone(),
					version,
					len: widest,
					max: 0xFF,
				});
			}
			Ok(widest)
		}
	}
}
