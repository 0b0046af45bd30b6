//! ANSI colors, honouring `NO_COLOR` and only when stderr is a terminal.

use std::env;
use std::io::{self, IsTerminal};

const RESET: &str = "\x1b[0m";

pub struct ColorSupport {
    enabled: bool,
}

impl ColorSupport {
    pub fn detect() -> Self {
        if env::var_os("NO_COLOR").is_none() && io::stderr().is_terminal() {
            Self::enabled()
        } else {
            Self::disabled()
        }
    }

    pub fn enabled() -> Self {
        Self { enabled: true }
    }

    pub fn disabled() -> Self {
        Self { enabled: false }
    }

    fn paint(&self, code: &str, text: &str) -> String {
        if self.enabled {
            format!("\x1b[{}m{}{}", code, text, RESET)
        } else {
            text.to_string()
        }
    }

    pub fn green(&self, text: &str) -> String {
        self.paint("32", text)
    }

    pub fn red(&self, text: &str) -> String {
        self.paint("31", text)
    }

    pub fn dim(&self, text: &str) -> String {
        self.paint("2", text)
    }
}
