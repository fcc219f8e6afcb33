//! Error types for file format parsing and manipulation.

use thiserror::Error;

/// Errors that can occur when parsing or building MBL archives
#[derive(Debug, Error)]
pub enum MblError {
	/// Not enough data to parse
	#[error("Insufficient data: expected {expected} bytes, got {actual} bytes")]
	InsufficientData {
		/// Expected number of bytes
		expected: usize,
		/// Actual number of bytes
		actual: usize,
	},

	/// Member count outside the plausible range
	#[error("Implausible member count: {0:#x}")]
	BadFileCount(u32),

	/// Every index layout failed to validate
	#[error("Unrecognized index layout: archive is not v1, v2 or v3")]
	NoValidIndex,

	/// Stored name does not fit the name field of the requested version
	#[error("Name '{name}' does not fit a {version} name field ({len} of at most {max} bytes)")]
	NameTooLong {
		/// Member name as listed in the manifest
		name: String,
		/// Requested archive version
		version: super::mbl::Version,
		/// Encoded length of the stored name
		len: usize,
		/// Largest encoded length the version can hold
		max: usize,
	},

	/// Member listed in the manifest is missing from the input directory
	#[error("Member '{0}' listed in the manifest was not found")]
	MissingMember(String),

	/// Emitted payload does not land on its precomputed offset
	#[error("Layout mismatch for '{name}': expected offset {expected}, got {actual}")]
	LayoutMismatch {
		/// Member whose payload was being written
		name: String,
		/// Offset recorded in the index
		expected: usize,
		/// Offset the payload actually landed on
		actual: usize,
	},

	/// Invalid manifest
	#[error(transparent)]
	Manifest(#[from] ManifestError),

	/// IO error
	#[error(transparent)]
	IOError(#[from] std::io::Error),
}

/// Errors that can occur when decoding or encoding PRS images
#[derive(Debug, Error)]
pub enum PrsError {
	/// Not enough data to parse
	#[error("Insufficient data: expected {expected} bytes, got {actual} bytes")]
	InsufficientData {
		/// Expected number of bytes
		expected: usize,
		/// Actual number of bytes
		actual: usize,
	},

	/// Invalid magic number
	#[error("Invalid magic number: expected {expected:02X?}, got {actual:02X?}")]
	InvalidMagic {
		/// Expected magic bytes
		expected: [u8; 2],
		/// Actual magic bytes
		actual: [u8; 2],
	},

	/// Pixel depth the codec does not support
	#[error("Unsupported pixel format: {0} bytes per pixel")]
	UnsupportedPixelFormat(u8),

	/// Back-reference pointing before the start of the output
	#[error("Invalid offset value: back-reference of {shift} at output position {position}")]
	InvalidOffset {
		/// Output position the back-reference was decoded at
		position: usize,
		/// Displacement the back-reference asked for
		shift: usize,
	},

	/// Compressed stream ended in the middle of an instruction
	#[error("Truncated stream: compressed data ends at byte {position}")]
	TruncatedStream {
		/// Offset into the packed payload where input ran out
		position: usize,
	},

	/// Pixel buffer does not match the declared dimensions
	#[error("Invalid pixel data: expected {expected} bytes, got {actual} bytes")]
	InvalidPixelData {
		/// Expected number of bytes
		expected: usize,
		/// Actual number of bytes
		actual: usize,
	},

	/// IO error
	#[error(transparent)]
	IOError(#[from] std::io::Error),
}

/// Errors that can occur when reading or writing `index.json` manifests
#[derive(Debug, Error)]
pub enum ManifestError {
	/// Malformed JSON document
	#[error("Malformed manifest: {0}")]
	Json(#[from] serde_json::Error),

	/// Key field is not valid hex
	#[error("Invalid key string: {0}")]
	InvalidKey(#[from] hex::FromHexError),

	/// IO error
	#[error(transparent)]
	IOError(#[from] std::io::Error),
}
