//! Non-fatal conversion diagnostics
//!
//! Converting between the tree and the flat block model is lossy in a few
//! well-known ways: some constructs have no rich-text counterpart, and some
//! elements cannot be nested where the source put them. None of these abort
//! a conversion. Each one is recorded as a [`Diagnostic`] in the order it was
//! found and handed back next to the result in a [`Conversion`].
//!
//! Every recorded diagnostic is also forwarded to the `log` facade at `warn`
//! level, so hosts that install a logger see them without inspecting the
//! returned list.

use std::fmt;

/// Constructs that are dropped (or reduced to plain text) during encoding
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Construct {
    Table,
    DefinitionList,
    Math,
    Comment,
    XmlComment,
    Raw,
    Footnote,
    InlineCode,
    Abbreviation,
    HtmlElements,
    NestedCodeBlock,
}

impl Construct {
    fn label(self) -> &'static str {
        match self {
            Construct::Table => "table",
            Construct::DefinitionList => "dl",
            Construct::Math => "math",
            Construct::Comment => "comment",
            Construct::XmlComment => "xml comment",
            Construct::Raw => "raw",
            Construct::Footnote => "footnote",
            Construct::InlineCode => "inline code",
            Construct::Abbreviation => "abbreviation",
            Construct::HtmlElements => "html elements",
            Construct::NestedCodeBlock => "nested code block",
        }
    }
}

/// A single non-fatal event raised while converting a document
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Diagnostic {
    /// The construct has no counterpart and was dropped or flattened to text
    Unsupported(Construct),
    /// An inline HTML element other than the handful the codec understands
    UnsupportedHtmlElement(String),
    /// An image shared its container with other content and was lifted
    MediaMoved,
    /// A list nested below a top-level block was lifted
    ListMoved,
    /// A heading nested below a top-level block was lifted
    HeadingMoved,
    /// A heading level outside the representable range
    HeadingLevelClamped { from: u8, to: u8 },
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Diagnostic::Unsupported(construct) => {
                write!(f, "translating {} is not supported", construct.label())
            }
            Diagnostic::UnsupportedHtmlElement(tag) => {
                write!(f, "translating html element '{}' is not supported", tag)
            }
            Diagnostic::MediaMoved => write!(
                f,
                "images inside content will be moved to the top level and may be rendered differently"
            ),
            Diagnostic::ListMoved => write!(f, "nested list moved to the top level"),
            Diagnostic::HeadingMoved => write!(f, "heading moved to the top level"),
            Diagnostic::HeadingLevelClamped { from, to } => {
                write!(f, "heading level {} clamped to {}", from, to)
            }
        }
    }
}

/// Ordered collector threaded through a conversion
#[derive(Debug, Default)]
pub struct Diagnostics {
    entries: Vec<Diagnostic>,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a diagnostic and forward it to the logger
    pub fn push(&mut self, diagnostic: Diagnostic) {
        log::warn!("{}", diagnostic);
        self.entries.push(diagnostic);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Wrap a finished value together with everything recorded so far
    pub fn finish<T>(self, value: T) -> Conversion<T> {
        Conversion {
            value,
            diagnostics: self.entries,
        }
    }
}

/// The result of a conversion plus the diagnostics it raised
#[derive(Debug, Clone, PartialEq)]
pub struct Conversion<T> {
    pub value: T,
    pub diagnostics: Vec<Diagnostic>,
}

impl<T> Conversion<T> {
    /// A conversion that raised nothing
    pub fn clean(value: T) -> Self {
        Self {
            value,
            diagnostics: Vec::new(),
        }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Conversion<U> {
        Conversion {
            value: f(self.value),
            diagnostics: self.diagnostics,
        }
    }

    /// Human-readable diagnostic messages, in the order they were raised
    pub fn messages(&self) -> Vec<String> {
        self.diagnostics.iter().map(|d| d.to_string()).collect()
    }
}
