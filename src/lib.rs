//! `marble-rs` is a toolkit for the Marble visual novel engine's on-disk
//! assets: `.mbl` archive containers and `.prs` images.
//!
//! The format implementations live in [`marble_types`]; this crate re-exports
//! them and ships the command-line front-end.

pub use marble_types::*;
