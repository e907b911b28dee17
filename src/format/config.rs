//! Formatting configuration for brace
//!
//! Defaults: 2-space indentation, spaces around binary operators and after commas, one element
//! per line for non-empty object and array literals.

/// Formatting configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormatConfig {
    /// Number of spaces per indentation level
    pub indent_width: usize,
    /// `a + b` rather than `a+b`
    pub space_around_operators: bool,
    /// `f(a, b)` rather than `f(a,b)`
    pub space_after_comma: bool,
    /// Put each element of a non-empty object or array literal on its own line
    pub break_long_constructs: bool,
    /// Target line length. Reserved: not enforced by the formatter.
    pub max_line_length: usize,
}

impl Default for FormatConfig {
    fn default() -> Self {
        Self {
            indent_width: 2,
            space_around_operators: true,
            space_after_comma: true,
            break_long_constructs: true,
            max_line_length: 80,
        }
    }
}

impl FormatConfig {
    /// Create a new config with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the indentation width
    pub fn with_indent_width(mut self, width: usize) -> Self {
        self.indent_width = width;
        self
    }

    pub fn with_space_around_operators(mut self, enabled: bool) -> Self {
        self.space_around_operators = enabled;
        self
    }

    pub fn with_space_after_comma(mut self, enabled: bool) -> Self {
        self.space_after_comma = enabled;
        self
    }

    pub fn with_break_long_constructs(mut self, enabled: bool) -> Self {
        self.break_long_constructs = enabled;
        self
    }

    /// Set the maximum line length
    pub fn with_max_line_length(mut self, length: usize) -> Self {
        self.max_line_length = length;
        self
    }

    /// Separator between list elements on one line.
    pub(crate) fn comma(&self) -> &'static str {
        if self.space_after_comma { ", " } else { "," }
    }
}
