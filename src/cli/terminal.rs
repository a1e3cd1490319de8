//! Terminal colour support

use owo_colors::{colors::css, OwoColorize};

/// Detects whether coloured diagnostics should be enabled
fn supports_color() -> bool {
    supports_color::on(supports_color::Stream::Stderr).is_some()
}

/// Extension trait for colourising diagnostics
pub trait Colorize {
    /// Colour as error (red)
    fn error(&self) -> String;
}

impl Colorize for str {
    fn error(&self) -> String {
        if supports_color() {
            self.fg::<css::Red>().to_string()
        } else {
            self.to_string()
        }
    }
}

impl Colorize for String {
    fn error(&self) -> String {
        self.as_str().error()
    }
}
