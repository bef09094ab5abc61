//! Color handling for Pedigree diagrams
//!
//! This module provides the [`Color`] type which wraps the `DynamicColor` type
//! from the color crate. Style configuration stores CSS color strings; they are
//! turned into [`Color`] values once, before rendering starts.

use std::{fmt, str::FromStr};

use color::DynamicColor;

/// Wrapper around the `DynamicColor` type from the color crate
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct Color {
    color: DynamicColor,
}

impl Color {
    /// Create a new `Color` from a string
    /// This will parse CSS color strings such as "#ff0000", "rgb(255, 0, 0)", "red", etc.
    ///
    /// # Examples
    ///
    /// ```
    /// use pedigree_core::color::Color;
    ///
    /// let paper = Color::new("#fdf6e3").unwrap();
    /// let ink = Color::new("black").unwrap();
    /// assert!(Color::new("not-a-color").is_err());
    /// ```
    pub fn new(color_str: &str) -> Result<Self, String> {
        match DynamicColor::from_str(color_str) {
            Ok(color) => Ok(Self { color }),
            Err(err) => Err(format!("invalid color `{color_str}`: {err}")),
        }
    }

    /// Returns the alpha (transparency) component of this color.
    pub fn alpha(&self) -> f32 {
        self.color.components[3]
    }
}

impl FromStr for Color {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.color)
    }
}

impl From<&Color> for svg::node::Value {
    fn from(color: &Color) -> Self {
        Self::from(color.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_new() {
        assert!(Color::new("#ff0000").is_ok());
        assert!(Color::new("rgb(10, 20, 30)").is_ok());

        let err = Color::new("not-a-color").unwrap_err();
        assert!(err.contains("not-a-color"));
    }

    #[test]
    fn test_color_from_str() {
        let parsed: Color = "navy".parse().unwrap();
        assert_eq!(parsed, Color::new("navy").unwrap());
    }

    #[test]
    fn test_color_display() {
        let color = Color::new("blue").unwrap();
        assert!(!color.to_string().is_empty());
    }

    #[test]
    fn test_color_alpha() {
        assert_eq!(Color::new("red").unwrap().alpha(), 1.0);
        assert_eq!(Color::new("transparent").unwrap().alpha(), 0.0);
    }

    #[test]
    fn test_color_svg_value() {
        let color = Color::new("#336699").unwrap();
        let value: svg::node::Value = (&color).into();
        assert_eq!(value.to_string(), color.to_string());
    }
}
