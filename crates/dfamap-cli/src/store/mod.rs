//! Stores the CLI can write a table into.

mod image;
mod pinned;


pub use image::ImageStore;
pub use pinned::PinnedMap;
