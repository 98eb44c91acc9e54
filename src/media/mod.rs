//! Media module for references and post-download inspection.

pub mod inspect;
pub mod item;
pub mod video;

pub use inspect::{inspect, ImageMetadata, MediaMetadata, VideoMetadata};
pub use item::{MediaKind, MediaReference};
