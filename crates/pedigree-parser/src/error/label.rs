//! Labeled source spans for diagnostic messages.

use crate::span::Span;

/// A message attached to a span of the outline source.
///
/// A diagnostic normally has one primary label marking the offending line
/// and, for conflicts such as a second root, a secondary label pointing at
/// the earlier line it clashes with:
///
/// ```text
/// error[E100]: the outline has more than one root entry
///   --> family.md:7:1
///    |
///  2 | - 文达
///    | ------ first root entry
///  7 | - 文远
///    | ^^^^^^ second root entry
/// ```
#[derive(Debug, Clone)]
pub struct Label {
    span: Span,
    message: String,
    is_primary: bool,
}

impl Label {
    /// Create a new primary label.
    pub fn primary(span: Span, message: impl Into<String>) -> Self {
        Self {
            span,
            message: message.into(),
            is_primary: true,
        }
    }

    /// Create a new secondary label.
    pub fn secondary(span: Span, message: impl Into<String>) -> Self {
        Self {
            span,
            message: message.into(),
            is_primary: false,
        }
    }

    /// Get the span this label applies to.
    pub fn span(&self) -> Span {
        self.span
    }

    /// Get the label message.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Check if this is a primary label.
    pub fn is_primary(&self) -> bool {
        self.is_primary
    }

    /// Check if this is a secondary label.
    pub fn is_secondary(&self) -> bool {
        !self.is_primary
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_primary_label() {
        let label = Label::primary(Span::new(10..20), "second root entry");

        assert_eq!(label.span().start(), 10);
        assert_eq!(label.span().end(), 20);
        assert_eq!(label.message(), "second root entry");
        assert!(label.is_primary());
        assert!(!label.is_secondary());
    }

    #[test]
    fn test_secondary_label() {
        let label = Label::secondary(Span::new(0..6), "first root entry");

        assert!(label.is_secondary());
        assert_eq!(label.span().len(), 6);
    }
}
