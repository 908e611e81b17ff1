//! Transition table format for dfamap.
//!
//! This crate contains:
//! - Key/value layout shared with the XDP inspection program
//! - Table image file format (header, records, checksum)
//! - Human-readable dump

#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

pub mod dump;
pub mod image;
pub mod layout;

#[cfg(test)]
mod image_tests;

pub use dump::{Colors, dump, width_for_count};
pub use image::{HEADER_SIZE, IMAGE_MAGIC, IMAGE_VERSION, ImageError, ImageHeader, TableImage};
pub use layout::{
    KEY_SIZE, LayoutError, MAX_STATES, StateId, TableEntry, TableKey, TableValue, Unit, VALUE_SIZE,
};
