//! # CUtil - Common Utilities Library
//!
//! Small helpers shared by the workspace crates.
//!
//! ## Features
//!
//! - `http`: HTTP client utilities (fetching bytes, URL classification)
//! - `time`: Time formatting utilities

#[cfg(feature = "time")]
pub mod time;

#[cfg(feature = "http")]
pub mod http;
