//! Format trait definition
//!
//! A format is one JSON spelling of the flat block model. Every format reads
//! into and writes from the same [`Document`] tree, so callers pick a format
//! by name and never touch blocks directly.

use crate::diagnostics::Conversion;
use crate::error::FormatError;
use crate::ir::nodes::Document;

/// Trait for wire formats
///
/// Implementors provide conversion between JSON text and the document tree.
/// Both directions hand back a [`Conversion`] so that lossy steps can report
/// what they dropped or moved.
///
/// # Examples
///
/// ```ignore
/// struct MyFormat;
///
/// impl Format for MyFormat {
///     fn name(&self) -> &str {
///         "my-format"
///     }
///
///     fn supports_parsing(&self) -> bool {
///         true
///     }
///
///     fn parse(&self, source: &str) -> Result<Conversion<Document>, FormatError> {
///         todo!()
///     }
/// }
/// ```
pub trait Format: Send + Sync {
    /// The name of this format (e.g., "nested", "flattened")
    fn name(&self) -> &str;

    /// Optional description of this format
    fn description(&self) -> &str {
        ""
    }

    /// Whether this format supports parsing (JSON → Document)
    fn supports_parsing(&self) -> bool {
        false
    }

    /// Whether this format supports serialization (Document → JSON)
    fn supports_serialization(&self) -> bool {
        false
    }

    /// Parse JSON text into a Document
    ///
    /// Default implementation returns NotSupported error.
    fn parse(&self, _source: &str) -> Result<Conversion<Document>, FormatError> {
        Err(FormatError::NotSupported(format!(
            "Format '{}' does not support parsing",
            self.name()
        )))
    }

    /// Serialize a Document into JSON text
    ///
    /// Default implementation returns NotSupported error.
    fn serialize(&self, _doc: &Document) -> Result<Conversion<String>, FormatError> {
        Err(FormatError::NotSupported(format!(
            "Format '{}' does not support serialization",
            self.name()
        )))
    }
}
