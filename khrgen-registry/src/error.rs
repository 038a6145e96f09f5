use std::path::PathBuf;

use miette::{Diagnostic, NamedSource, SourceSpan};
use thiserror::Error;
use xml::common::Position;

/// Result type for khrgen-registry operations (boxed to reduce size on stack)
pub type Result<T> = std::result::Result<T, Box<Error>>;

/// Source context for error reporting.
///
/// Encapsulates the registry document text and filename, reducing parameter
/// passing in error factory functions.
#[derive(Debug, Clone)]
pub struct SourceContext {
    src: String,
    filename: String,
}

impl SourceContext {
    /// Create a new source context.
    pub fn new(src: impl Into<String>, filename: impl Into<String>) -> Self {
        Self {
            src: src.into(),
            filename: filename.into(),
        }
    }

    /// Get the source content.
    pub fn src(&self) -> &str {
        &self.src
    }

    /// Get the filename.
    pub fn filename(&self) -> &str {
        &self.filename
    }

    /// Create a NamedSource for miette error reporting.
    pub fn named_source(&self) -> NamedSource<String> {
        NamedSource::new(&self.filename, self.src.clone())
    }

    /// Convert a (row, column) text position (0-based, as reported by the
    /// XML reader) into a byte-offset span into the source.
    pub fn span_at(&self, row: u64, column: u64) -> SourceSpan {
        let mut offset = 0usize;
        for (i, line) in self.src.split_inclusive('\n').enumerate() {
            if i as u64 == row {
                offset += (column as usize).min(line.len().saturating_sub(1));
                break;
            }
            offset += line.len();
        }
        SourceSpan::from((offset.min(self.src.len()), 0usize))
    }

    /// Create an XML parse error.
    pub fn xml_error(&self, source: xml::reader::Error) -> Box<Error> {
        let pos = source.position();
        Box::new(Error::Xml {
            src: self.named_source(),
            span: self.span_at(pos.row, pos.column),
            source,
        })
    }

    /// Create a missing-element error.
    pub fn missing_element(
        &self,
        element: impl Into<String>,
        context: impl Into<String>,
        span: Option<SourceSpan>,
    ) -> Box<Error> {
        Box::new(Error::MissingElement {
            src: self.named_source(),
            span,
            element: element.into(),
            context: context.into(),
        })
    }

    /// Create a missing-attribute error.
    pub fn missing_attribute(
        &self,
        attribute: impl Into<String>,
        context: impl Into<String>,
        span: Option<SourceSpan>,
    ) -> Box<Error> {
        Box::new(Error::MissingAttribute {
            src: self.named_source(),
            span,
            attribute: attribute.into(),
            context: context.into(),
        })
    }

    /// Create an invalid-value error.
    pub fn invalid_value(
        &self,
        message: impl Into<String>,
        span: Option<SourceSpan>,
    ) -> Box<Error> {
        Box::new(Error::InvalidValue {
            src: self.named_source(),
            span,
            message: message.into(),
        })
    }
}

#[derive(Debug, Error, Diagnostic)]
pub enum Error {
    #[error("failed to read '{path}'")]
    #[diagnostic(help("pass the registry document with '-s <registry.xml>'"))]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse registry document")]
    #[diagnostic(code(khrgen::xml_error))]
    Xml {
        #[source_code]
        src: NamedSource<String>,
        #[label("parse error here")]
        span: SourceSpan,
        #[source]
        source: xml::reader::Error,
    },

    #[error("document root is '{found}', expected 'registry'")]
    #[diagnostic(code(khrgen::not_a_registry))]
    NotARegistry {
        #[source_code]
        src: NamedSource<String>,
        found: String,
    },

    #[error("missing <{element}> in {context}")]
    #[diagnostic(code(khrgen::missing_element))]
    MissingElement {
        #[source_code]
        src: NamedSource<String>,
        #[label("expected a <{element}> child here")]
        span: Option<SourceSpan>,
        element: String,
        context: String,
    },

    #[error("missing '{attribute}' attribute in {context}")]
    #[diagnostic(code(khrgen::missing_attribute))]
    MissingAttribute {
        #[source_code]
        src: NamedSource<String>,
        #[label("element without '{attribute}'")]
        span: Option<SourceSpan>,
        attribute: String,
        context: String,
    },

    #[error("{message}")]
    #[diagnostic(code(khrgen::invalid_value))]
    InvalidValue {
        #[source_code]
        src: NamedSource<String>,
        #[label("{message}")]
        span: Option<SourceSpan>,
        message: String,
    },
}

impl Error {
    /// Create an IO error for a registry path
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Box<Self> {
        Box::new(Error::Io {
            path: path.into(),
            source,
        })
    }
}
