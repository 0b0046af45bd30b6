//! Error reports with suggestions and cause chains.

use std::error::Error;

use trellis_core::error::TrellisError;

use super::colors::ColorSupport;

pub struct ErrorFormatter {
    colors: ColorSupport,
}

impl ErrorFormatter {
    pub fn new() -> Self {
        Self::with_colors(ColorSupport::detect())
    }

    pub fn with_colors(colors: ColorSupport) -> Self {
        Self { colors }
    }

    /// Format an error followed by its suggestion and every underlying cause
    pub fn format_error(&self, error: &TrellisError) -> String {
        let mut output = format!("{}: {}", self.colors.red("error"), error);

        if let TrellisError::TomlParse {
            file, line, column, ..
        } = error
        {
            output.push('\n');
            output.push_str(&self.format_location(file, *line, *column));
        }

        if let Some(suggestion) = error.suggestion() {
            output.push_str(&format!("\n{}: {}", self.colors.dim("help"), suggestion));
        }

        let mut source = error.source();
        while let Some(err) = source {
            output.push_str(&format!("\n{}: {}", self.colors.dim("caused by"), err));
            source = err.source();
        }

        output
    }

    fn format_location(&self, file: &str, line: usize, column: usize) -> String {
        format!("  {} {}:{}:{}", self.colors.dim("-->"), file, line, column)
    }
}

impl Default for ErrorFormatter {
    fn default() -> Self {
        Self::new()
    }
}
