//! Prelude module for `marble_types`.
//!
//! This module provides a convenient way to import commonly used types, traits, and constants.
//!
//! # Examples
//!
//! ```no_run
//! use marble_types::prelude::*;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let archive = MblFile::open("mg_data.mbl")?;
//! let image = PrsFile::open("title.prs")?;
//! # Ok(())
//! # }
//! ```

// File module types
#[doc(inline)]
pub use crate::file::{
	// Manifest types
	Manifest,
	ManifestError,

	// MBL types
	MblEntry,
	MblError,
	MblFile,
	MblVersion,

	// PRS types
	PrsError,
	PrsFile,
	PrsHeader,
};

// Re-export the file module for advanced usage
#[doc(inline)]
pub use crate::file;
