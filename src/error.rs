//! Error types for configuration loading and tile navigation
//!
//! All errors carry a stable error code in their message so that callers and
//! log readers can categorize failures without matching on text.
//!
//! # Error Codes
//!
//! Error codes follow the pattern: `E<category><number>`
//!
//! Categories:
//! - **E1xxx**: I/O errors
//! - **E2xxx**: Markup syntax and structure errors
//! - **E3xxx**: Configuration content errors
//! - **E4xxx**: Tile address errors
//!
//! ## Error Codes
//!
//! - `E1001`: Configuration document could not be read
//! - `E1002`: Document could not be written
//! - `E2001`: Malformed markup document
//! - `E2002`: Element name collides with a reserved structural name
//! - `E3001`: Invalid configuration content
//! - `E3002`: Unknown layer requested
//! - `E4001`: Invalid tile address
//! - `E4002`: Unknown navigation code

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Result type for geoquadtree operations
pub type Result<T> = std::result::Result<T, Error>;

/// Where in a document an error was detected
///
/// Line and column are 1-based. The file is filled in by the configuration
/// loader once it knows which document was being parsed.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Location {
    /// Path of the document, when parsed from disk
    pub file: Option<String>,

    /// Line number (1-based)
    pub line: usize,

    /// Column number (1-based)
    pub column: usize,
}

impl Location {
    /// Create a location from a line and column
    pub fn new(line: usize, column: usize) -> Self {
        Self {
            file: None,
            line,
            column,
        }
    }

    /// Compute the line and column of a byte offset into `source`
    ///
    /// Offsets past the end of the input are clamped to the last position.
    pub fn from_offset(source: &str, offset: usize) -> Self {
        let offset = offset.min(source.len());
        let consumed = source.get(..offset).unwrap_or(source);
        let line = consumed.matches('\n').count() + 1;
        let column = match consumed.rfind('\n') {
            Some(pos) => consumed[pos + 1..].chars().count() + 1,
            None => consumed.chars().count() + 1,
        };
        Self::new(line, column)
    }

    /// Set the file this location refers to
    pub fn file(mut self, file: impl Into<String>) -> Self {
        self.file = Some(file.into());
        self
    }
}

impl std::fmt::Display for Location {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.file {
            Some(ref file) => write!(f, "{}:{}:{}", file, self.line, self.column),
            None => write!(f, "line {}, column {}", self.line, self.column),
        }
    }
}

/// Errors that can occur while loading configuration or addressing tiles
#[derive(Error, Debug)]
pub enum Error {
    /// A configuration document could not be read
    ///
    /// **Error Code**: E1001
    ///
    /// **Common Causes**:
    /// - File not found
    /// - Insufficient permissions
    #[error("[E1001] Cannot read configuration document '{}': {source}", path.display())]
    ConfigRead {
        /// Path that was being read
        path: PathBuf,
        /// Underlying I/O failure
        #[source]
        source: io::Error,
    },

    /// A document could not be written
    ///
    /// **Error Code**: E1002
    #[error("[E1002] Cannot write document: {0}")]
    DocumentWrite(String),

    /// The markup tokenizer rejected the document
    ///
    /// **Error Code**: E2001
    ///
    /// **Common Causes**:
    /// - Unclosed or mismatched tags
    /// - Character data outside the root element
    /// - More than one root element
    #[error("[E2001] Malformed document at {location}: {message}")]
    MalformedDocument {
        /// Description of the syntax problem
        message: String,
        /// Position of the problem
        location: Location,
    },

    /// An element name collides with a structural accessor of the tree
    ///
    /// **Error Code**: E2002
    ///
    /// **Suggestions**:
    /// - Rename the element; `name`, `attributes`, `text`, `children` and
    ///   `depth` cannot be used as child element names
    #[error("[E2002] Element name '{0}' is reserved and cannot be used as a child element")]
    ReservedName(String),

    /// The configuration document is well-formed but its content is unusable
    ///
    /// **Error Code**: E3001
    ///
    /// **Common Causes**:
    /// - Missing required attribute on a dataset document
    /// - Non-numeric value for a numeric attribute
    /// - Duplicate layer name when duplicates are rejected
    #[error("[E3001] Invalid configuration: {0}")]
    InvalidConfig(String),

    /// A layer was requested by name but is not defined
    ///
    /// **Error Code**: E3002
    #[error("[E3002] Unknown layer: '{0}'")]
    UnknownLayer(String),

    /// A tile address is empty, too long, or uses digits outside 1-4
    ///
    /// **Error Code**: E4001
    #[error("[E4001] Invalid tile address: {0}")]
    InvalidAddress(String),

    /// A navigation code is not one of `U`, `D`, `L`, `R`, `I`, `O`
    ///
    /// **Error Code**: E4002
    #[error("[E4002] Unknown navigation code '{0}'; expected one of U, D, L, R, I, O")]
    InvalidDirection(String),
}

impl Error {
    /// Create a MalformedDocument error at a byte offset of `source`
    pub fn malformed_at(source: &str, offset: usize, message: impl Into<String>) -> Self {
        Error::MalformedDocument {
            message: message.into(),
            location: Location::from_offset(source, offset),
        }
    }

    /// Create an InvalidConfig error for a missing required attribute
    ///
    /// # Example
    /// ```ignore
    /// Error::missing_attribute("geoquadtree", "levels")
    /// ```
    pub fn missing_attribute(element: &str, attribute: &str) -> Self {
        Error::InvalidConfig(format!(
            "Element '<{}>' is missing required attribute '{}'",
            element, attribute
        ))
    }

    /// Create an InvalidConfig error for an attribute that is not a valid number
    pub fn invalid_number(element: &str, attribute: &str, value: &str) -> Self {
        Error::InvalidConfig(format!(
            "Attribute '{}' of '<{}>' must be numeric, got '{}'",
            attribute, element, value
        ))
    }

    /// Attach the document path to a MalformedDocument error
    ///
    /// A path that is already set is kept. Other variants are returned
    /// unchanged.
    pub fn in_file(self, file: &str) -> Self {
        match self {
            Error::MalformedDocument { message, location } if location.file.is_none() => {
                Error::MalformedDocument {
                    message,
                    location: location.file(file),
                }
            }
            other => other,
        }
    }
}
