//! Core data types and file format support for the `marble-rs` toolkit.
//!
//! # File Formats
//!
//! - **MBL**: the Marble engine's archive container. Three index layouts
//!   (v1, v2, v3) share one file extension; the layout is auto-detected on
//!   read and chosen by manifest on write. Script members are stored behind
//!   a repeating-key XOR cipher.
//! - **PRS**: the engine's image codec (magic bytes `YB`), a byte-aligned
//!   bit-flagged LZ compressor with a per-channel delta predictor.
//! - **Manifest**: the `index.json` file written next to extracted members,
//!   recording the layout version, the key and the member order needed to
//!   rebuild a byte-compatible archive.
//!
//! # Examples
//!
//! ```no_run
//! use marble_types::file::MblFile;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let archive = MblFile::open("mg_data.mbl")?;
//! for entry in archive.entries() {
//!     println!("{} ({} bytes)", entry.name(), entry.size());
//! }
//! # Ok(())
//! # }
//! ```

pub mod file;
pub mod prelude;

// Re-export commonly used file types at crate root for convenience
pub use file::{
	Manifest, ManifestError, MblEntry, MblError, MblFile, MblVersion, PrsError, PrsFile, PrsHeader,
};
