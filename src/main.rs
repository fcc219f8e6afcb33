//! Marble engine asset toolkit.
//!
//! # Features
//!
//! - **extract**: unpack an `.mbl` archive and write an `index.json` manifest
//! - **pack**: rebuild a byte-compatible archive from a directory + manifest
//! - **decode-image**: convert `.prs` images to PNG
//! - **encode-image**: convert PNG images to `.prs`
//! - **list**: print the detected index of an archive without extracting
//!
//! # Usage
//!
//! ```bash
//! # Extract a script archive (prompts for a key from gamekeys.json)
//! marble-rs extract mg_data.mbl out/
//!
//! # Rebuild the archive from the extraction directory
//! marble-rs pack out/ mg_data.mbl
//!
//! # Convert images both ways
//! marble-rs decode-image cg/ png/
//! marble-rs encode-image png/ cg/
//! ```

mod keys;

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use image::{ImageBuffer, RgbImage, RgbaImage};
use log::{error, info};
use marble_rs::file::{MblFile, mbl, prs, sjis};

#[derive(Parser)]
#[command(name = "marble-rs")]
#[command(author = "marble-rs project")]
#[command(version)]
#[command(about = "Marble engine asset toolkit - archives and PRS images", long_about = None)]
struct Cli {
	#[command(subcommand)]
	command: Commands,
}

#[derive(Subcommand)]
enum Commands {
	/// Extract an archive into a directory with an index.json manifest
	Extract {
		/// Input .mbl archive
		#[arg(value_name = "ARCHIVE")]
		archive: PathBuf,

		/// Output directory
		#[arg(value_name = "OUT_DIR")]
		out_dir: PathBuf,

		/// Script key literal, bypassing the catalogue prompt
		#[arg(short, long, value_name = "KEY")]
		key: Option<String>,
	},

	/// Pack a directory with an index.json manifest into an archive
	Pack {
		/// Input directory holding member files and index.json
		#[arg(value_name = "IN_DIR")]
		in_dir: PathBuf,

		/// Output .mbl archive
		#[arg(value_name = "ARCHIVE")]
		archive: PathBuf,
	},

	/// Decode every .prs image in a directory to .png
	DecodeImage {
		/// Input directory scanned for .prs files
		#[arg(value_name = "IN_DIR")]
		in_dir: PathBuf,

		/// Output directory for .png files
		#[arg(value_name = "OUT_DIR")]
		out_dir: PathBuf,
	},

	/// Encode every .png image in a directory to .prs
	EncodeImage {
		/// Input directory scanned for .png files
		#[arg(value_name = "IN_DIR")]
		in_dir: PathBuf,

		/// Output directory for .prs files
		#[arg(value_name = "OUT_DIR")]
		out_dir: PathBuf,
	},

	/// List the index of an archive without extracting
	List {
		/// Input .mbl archive
		#[arg(value_name = "ARCHIVE")]
		archive: PathBuf,
	},
}

/// Handles the 'extract' command
fn handle_extract(archive_path: &Path, out_dir: &Path, key_literal: Option<String>) -> Result<()> {
	let archive = MblFile::open(archive_path)
		.with_context(|| format!("Failed to open archive '{}'", archive_path.display()))?;
	info!("Detected {} layout, {} members", archive.version(), archive.entries().len());

	let key = match key_literal {
		Some(literal) => sjis::encode(&literal),
		None if archive.is_script_archive() => keys::prompt_key()?,
		None => Vec::new(),
	};

	fs::create_dir_all(out_dir)
		.with_context(|| format!("Failed to create '{}'", out_dir.display()))?;

	let mut extracted = 0usize;
	let mut failed = 0usize;
	for entry in archive.entries() {
		let data = archive.extract(entry, &key);
		let path = out_dir.join(entry.name());
		let written = path
			.parent()
			.map_or(Ok(()), fs::create_dir_all)
			.and_then(|()| fs::write(&path, &data));
		match written {
			Ok(()) => {
				info!("  {} ({} bytes)", entry.name(), data.len());
				extracted += 1;
			}
			Err(e) => {
				error!("  Failed to write '{}': {}", path.display(), e);
				failed += 1;
			}
		}
	}

	archive.manifest(&key).save(out_dir).context("Failed to write index.json")?;

	if failed > 0 {
		println!(
			"✓ Extracted {} members to {} ({} failed)",
			extracted,
			out_dir.display(),
			failed
		);
	} else {
		println!("✓ Extracted {} members to {}", extracted, out_dir.display());
	}
	Ok(())
}

/// Handles the 'pack' command
fn handle_pack(in_dir: &Path, archive_path: &Path) -> Result<()> {
	let count = mbl::create(in_dir, archive_path)
		.with_context(|| format!("Failed to pack '{}'", in_dir.display()))?;
	println!("✓ Packed {} members into {}", count, archive_path.display());
	Ok(())
}

/// Handles the 'decode-image' command
fn handle_decode_images(in_dir: &Path, out_dir: &Path) -> Result<()> {
	fs::create_dir_all(out_dir)
		.with_context(|| format!("Failed to create '{}'", out_dir.display()))?;

	let mut converted = 0usize;
	let mut failed = 0usize;
	for path in files_with_extension(in_dir, "prs")? {
		match decode_image(&path, out_dir) {
			Ok(()) => converted += 1,
			Err(e) => {
				error!("Failed to decode '{}': {:#}", path.display(), e);
				failed += 1;
			}
		}
	}

	report_batch("Decoded", converted, failed, out_dir);
	Ok(())
}

/// Decodes one `.prs` file to a PNG next to the other outputs
fn decode_image(path: &Path, out_dir: &Path) -> Result<()> {
	let image = prs::File::open(path)?;
	let width = u32::from(image.header().width());
	let height = u32::from(image.header().height());
	let target = out_dir.join(path.file_stem().unwrap_or_default()).with_extension("png");

	if image.export_channels() == 4 {
		let buffer: RgbaImage = ImageBuffer::from_raw(width, height, image.export_pixels())
			.context("Pixel buffer does not match the image dimensions")?;
		buffer.save(&target)?;
	} else {
		let buffer: RgbImage = ImageBuffer::from_raw(width, height, image.export_pixels())
			.context("Pixel buffer does not match the image dimensions")?;
		buffer.save(&target)?;
	}

	info!("  {} -> {}", path.display(), target.display());
	Ok(())
}

/// Handles the 'encode-image' command
fn handle_encode_images(in_dir: &Path, out_dir: &Path) -> Result<()> {
	fs::create_dir_all(out_dir)
		.with_context(|| format!("Failed to create '{}'", out_dir.display()))?;

	let mut converted = 0usize;
	let mut failed = 0usize;
	for path in files_with_extension(in_dir, "png")? {
		match encode_image(&path, out_dir) {
			Ok(()) => converted += 1,
			Err(e) => {
				error!("Failed to encode '{}': {:#}", path.display(), e);
				failed += 1;
			}
		}
	}

	report_batch("Encoded", converted, failed, out_dir);
	Ok(())
}

/// Encodes one PNG to `.prs`, 32-bit input picking the delta predictor
fn encode_image(path: &Path, out_dir: &Path) -> Result<()> {
	let img = image::open(path)?;

	let encoded = if img.color().has_alpha() {
		let rgba = img.to_rgba8();
		let (width, height) = rgba.dimensions();
		ensure_dimensions(width, height)?;
		prs::compress(rgba.as_raw(), width as u16, height as u16, 4, 0x80)?
	} else {
		let rgb = img.to_rgb8();
		let (width, height) = rgb.dimensions();
		ensure_dimensions(width, height)?;
		prs::compress(rgb.as_raw(), width as u16, height as u16, 3, 0x00)?
	};

	let target = out_dir.join(path.file_stem().unwrap_or_default()).with_extension("prs");
	fs::write(&target, encoded)
		.with_context(|| format!("Failed to write '{}'", target.display()))?;

	info!("  {} -> {}", path.display(), target.display());
	Ok(())
}

/// Handles the 'list' command
fn handle_list(archive_path: &Path) -> Result<()> {
	let archive = MblFile::open(archive_path)
		.with_context(|| format!("Failed to open archive '{}'", archive_path.display()))?;

	println!(
		"\n=== {} ({}, {} members) ===",
		archive_path.display(),
		archive.version(),
		archive.entries().len()
	);
	println!("{:>5} | {:32} | {:>10} | {:>10} | {}", "Index", "Name", "Offset", "Size", "Script");
	println!("{:-<5}-+-{:-<32}-+-{:-<10}-+-{:-<10}-+-{:-<6}", "", "", "", "", "");
	for (idx, entry) in archive.entries().iter().enumerate() {
		println!(
			"{:>5} | {:32} | {:>10} | {:>10} | {}",
			idx,
			entry.name(),
			entry.offset(),
			entry.size(),
			if entry.is_script() { "yes" } else { "" }
		);
	}

	Ok(())
}

/// Fails when an image does not fit the header's 16-bit dimension fields
fn ensure_dimensions(width: u32, height: u32) -> Result<()> {
	if width > u32::from(u16::MAX) || height > u32::from(u16::MAX) {
		bail!("Image dimensions {}x{} exceed the format's 16-bit fields", width, height);
	}
	Ok(())
}

/// Collects the files in `dir` carrying `ext` (case-insensitive), sorted
fn files_with_extension(dir: &Path, ext: &str) -> Result<Vec<PathBuf>> {
	let mut paths = Vec::new();
	for entry in
		fs::read_dir(dir).with_context(|| format!("Failed to read directory '{}'", dir.display()))?
	{
		let path = entry?.path();
		let matches = path
			.extension()
			.and_then(|s| s.to_str())
			.is_some_and(|s| s.eq_ignore_ascii_case(ext));
		if path.is_file() && matches {
			paths.push(path);
		}
	}
	paths.sort();
	Ok(paths)
}

/// Prints the one-line summary of a batch conversion
fn report_batch(verb: &str, converted: usize, failed: usize, out_dir: &Path) {
	if failed > 0 {
		println!("✓ {} {} images to {} ({} failed)", verb, converted, out_dir.display(), failed);
	} else {
		println!("✓ {} {} images to {}", verb, converted, out_dir.display());
	}
}

fn main() {
	// Initialize logger with default level set to info if RUST_LOG is not set
	env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));

	let cli = Cli::parse();

	let result = match cli.command {
		Commands::Extract {
			archive,
			out_dir,
			key,
		} => handle_extract(&archive, &out_dir, key),
		Commands::Pack {
			in_dir,
			archive,
		} => handle_pack(&in_dir, &archive),
		Commands::DecodeImage {
			in_dir,
			out_dir,
		} => handle_decode_images(&in_dir, &out_dir),
		Commands::EncodeImage {
			in_dir,
			out_dir,
		} => handle_encode_images(&in_dir, &out_dir),
		Commands::List {
			archive,
		} => handle_list(&archive),
	};

	if let Err(e) = result {
		eprintln!("Error: {:#}", e);
		std::process::exit(1);
	}
}
