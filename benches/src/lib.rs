//! Benchmark helper utilities for marble-rs
//!
//! This module generates synthetic PRS files for benchmarking. No
//! proprietary game assets ship with the repository, so the decode
//! benchmarks run over encoder output instead: a layered gradient with
//! repeated tiles, which exercises literals, every back-reference form and
//! the delta predictor.

use marble_types::file::prs;

/// Generates a synthetic `.prs` file with the specified dimensions
///
/// The image mixes smooth gradients (delta-friendly) with repeated 16-pixel
/// tiles (match-friendly) so the decoder sees a realistic instruction mix.
pub fn generate_test_prs_data(width: u16, height: u16, bytes_per_pixel: u8, flag: u8) -> Vec<u8> {
	let pixels = generate_pixels(width, height, bytes_per_pixel);
	prs::compress(&pixels, width, height, bytes_per_pixel, flag)
		.unwrap_or_else(|e| panic!("Failed to build benchmark image: {}", e))
}

/// Generates the raw pixel buffer the synthetic file decodes back to
pub fn generate_pixels(width: u16, height: u16, bytes_per_pixel: u8) -> Vec<u8> {
	let bpp = bytes_per_pixel as usize;
	let mut pixels = Vec::with_capacity(width as usize * height as usize * bpp);
	for y in 0..height as usize {
		for x in 0..width as usize {
			let tile = ((x / 16) + (y / 16)) % 2;
			let r = if tile == 0 { (x % 256) as u8 } else { 0x40 };
			let g = (y % 256) as u8;
			let b = ((x + y) % 256) as u8;
			pixels.push(r);
			pixels.push(g);
			pixels.push(b);
			if bpp == 4 {
				pixels.push(0xFF);
			}
		}
	}
	pixels
}

/// Common benchmark sizes for synthetic test data
pub mod sizes {
	/// Tiny image: 64x64 (4,096 pixels)
	pub const TINY: (u16, u16) = (64, 64);
	/// Small image: 256x256 (65,536 pixels)
	pub const SMALL: (u16, u16) = (256, 256);
	/// Typical game asset: 640x480 (307,200 pixels)
	pub const GAME: (u16, u16) = (640, 480);
	/// Large image: 1024x768 (786,432 pixels)
	pub const LARGE: (u16, u16) = (1024, 768);
}

#[cfg(test)]
mod tests {
	use super::*;
	use marble_types::file::prs::File;

	#[test]
	fn test_generated_file_decodes_back() {
		let data = generate_test_prs_data(64, 64, 3, 0x80);
		let file = File::from_bytes(&data).unwrap();
		assert_eq!(file.pixels(), &generate_pixels(64, 64, 3));
	}

	#[test]
	fn test_sizes_constants() {
		assert_eq!(sizes::TINY, (64, 64));
		assert_eq!(sizes::GAME, (640, 480));
	}
}
