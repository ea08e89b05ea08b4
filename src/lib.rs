//! Rich-text interoperability for Prismic StructuredText
//!
//!     This crate converts between a nested document tree (headings, paragraphs, lists, media and
//!     inline marks nested inside text) and Prismic's flat StructuredText blocks, where every block
//!     is a plain string plus offset-addressed spans.
//!
//! Architecture
//!
//!     - Format trait: Uniform interface for the wire shapes (parsing and serialization)
//!     - FormatRegistry: Centralized discovery and selection of formats
//!     - Format implementations: `nested` (Import API) and `flattened` (Migration API)
//!
//!     This is a pure lib: no I/O, no global state, no shell assumptions. Parsing markdown or
//!     HTML into the tree, and rendering it back, belong to the host.
//!
//!     The file structure :
//!     .
//!     ├── error.rs                # Hard errors (unreadable wire input, registry misuse)
//!     ├── diagnostics.rs          # Non-fatal, ordered conversion diagnostics
//!     ├── options.rs              # CodecOptions
//!     ├── format.rs               # Format trait definition
//!     ├── registry.rs             # FormatRegistry for discovery and selection
//!     ├── ir
//!     │   ├── nodes.rs            # The nested tree
//!     │   ├── blocks.rs           # The flat block model (serde = nested wire shape)
//!     │   └── symbols.rs          # Entities and typographic symbols
//!     ├── mappings
//!     │   ├── normalize.rs        # Lifts what blocks cannot nest
//!     │   ├── nested_to_flat.rs   # Tree → blocks
//!     │   └── flat_to_nested.rs   # Blocks → tree
//!     ├── formats
//!     │   ├── wire.rs             # nested ⇄ flattened JSON transform
//!     │   ├── nested
//!     │   └── flattened
//!     └── lib.rs
//!
//! Testing
//!     tests
//!     ├── encoding.rs             # tree → blocks scenarios
//!     ├── decoding.rs             # blocks → tree scenarios
//!     ├── wire_shapes.rs          # both formats end to end
//!     └── properties.rs           # proptest invariants
//!
//! Lossy by nature
//!
//!     The flat model has no tables, no math, no nesting of blocks and only three marks. Whatever
//!     cannot be expressed is dropped or moved, never rejected, and every such step is reported as
//!     a Diagnostic in the returned Conversion (and logged at warn level through `log`).
//!
//!     Only wire input that cannot be read at all is an error. Bad span offsets are repaired.
//!
//! Offsets
//!
//!     Span offsets count chars (Unicode scalar values) on both sides of the codec.
//!
pub mod diagnostics;
pub mod error;
pub mod format;
pub mod formats;
pub mod options;
pub mod registry;

pub mod ir;
pub mod mappings;

pub use diagnostics::{Conversion, Diagnostic};
pub use error::FormatError;
pub use format::Format;
pub use formats::{FlattenedFormat, NestedFormat, WireShape};
pub use options::CodecOptions;
pub use registry::FormatRegistry;

use ir::blocks::Block;
use ir::nodes::Document;

/// Converts a document tree to flat blocks.
///
/// Runs normalization first, so any tree is accepted. Everything that had to
/// be dropped or moved is listed in the returned diagnostics.
pub fn to_blocks(document: Document, options: &CodecOptions) -> Conversion<Vec<Block>> {
    mappings::nested_to_flat::to_blocks(document, options)
}

/// Converts flat blocks back to a document tree. Never fails.
pub fn from_blocks(blocks: &[Block]) -> Document {
    mappings::flat_to_nested::decode(blocks)
}
