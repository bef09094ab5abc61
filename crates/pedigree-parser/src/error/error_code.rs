//! Error codes for the outline diagnostic system.
//!
//! Error codes are organized by kind:
//! - `E0xx` - Line format errors
//! - `E1xx` - Tree structure errors

use std::fmt;

/// Error codes for categorizing diagnostic errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // =========================================================================
    // Line Format Errors (E0xx)
    // =========================================================================
    /// Tab character in indentation.
    ///
    /// Depth is counted in spaces (two per generation), so tabs are ambiguous.
    E001,

    /// Indented line without a list marker.
    ///
    /// Every indented line must be an entry of the form `- name`.
    E002,

    // =========================================================================
    // Tree Structure Errors (E1xx)
    // =========================================================================
    /// More than one root entry.
    ///
    /// A family tree has exactly one unindented entry.
    E100,

    /// Entry without a parent.
    ///
    /// An indented entry appeared before the root entry.
    E101,
}

impl ErrorCode {
    /// Returns the numeric code as a string (e.g., "E001").
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::E001 => "E001",
            ErrorCode::E002 => "E002",
            ErrorCode::E100 => "E100",
            ErrorCode::E101 => "E101",
        }
    }

    /// Returns a short description of what this error code means.
    pub fn description(&self) -> &'static str {
        match self {
            ErrorCode::E001 => "tab in indentation",
            ErrorCode::E002 => "missing list marker",
            ErrorCode::E100 => "multiple root entries",
            ErrorCode::E101 => "entry without parent",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
