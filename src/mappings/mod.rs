//! Conversions between the nested tree and flat blocks.
//!
//! - [`normalize`]: lifts media, lists and headings out of positions the flat
//!   model cannot nest them in
//! - [`nested_to_flat`]: tree to blocks (runs [`normalize`] first)
//! - [`flat_to_nested`]: blocks to tree

pub mod flat_to_nested;
pub mod nested_to_flat;
pub mod normalize;
