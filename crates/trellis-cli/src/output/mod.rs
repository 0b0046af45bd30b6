//! Terminal output.
//!
//! Command results go to stdout untouched so they can be piped or
//! redirected; status lines go to stderr.

pub mod colors;
pub mod errors;

/// Writes command results and status lines
pub struct OutputHandler {
    colors: colors::ColorSupport,
}

impl OutputHandler {
    pub fn new() -> Self {
        Self {
            colors: colors::ColorSupport::detect(),
        }
    }

    /// Output handler that never emits escape codes
    pub fn plain() -> Self {
        Self {
            colors: colors::ColorSupport::disabled(),
        }
    }

    /// Print a command result verbatim on stdout
    pub fn result(&self, text: &str) {
        println!("{}", text);
    }

    pub fn success(&self, message: &str) {
        eprintln!("{}", self.success_line(message));
    }

    fn success_line(&self, message: &str) -> String {
        format!("{} {}", self.colors.green("✓"), message)
    }
}

impl Default for OutputHandler {
    fn default() -> Self {
        Self::new()
    }
}
