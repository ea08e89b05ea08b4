//! The two document representations the codec converts between.
//!
//! # Modules
//!
//! - [`nodes`]: the nested block/inline tree (owned by callers)
//! - [`blocks`]: the flat block list with offset spans (the wire model)
//! - [`symbols`]: literal text for entities and typographic symbols
//!
//! Neither representation owns the other. A conversion reads one and builds
//! the other; see [`crate::mappings`].

pub mod blocks;
pub mod nodes;
pub mod symbols;
