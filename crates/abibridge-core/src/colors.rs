//! ANSI color codes for terminal listings.
//!
//! - `name`: generated and declared type names
//! - `kind`: scalar kinds and record kinds
//! - `dim`: structure and metadata

/// ANSI palette. Standard 16-color codes only, so both light and dark
/// themes stay readable.
#[derive(Clone, Copy, Debug)]
pub struct Colors {
    pub name: &'static str,
    pub kind: &'static str,
    pub dim: &'static str,
    pub reset: &'static str,
}

impl Default for Colors {
    fn default() -> Self {
        Self::OFF
    }
}

impl Colors {
    pub const ON: Self = Self {
        name: "\x1b[34m",
        kind: "\x1b[32m",
        dim: "\x1b[2m",
        reset: "\x1b[0m",
    };

    pub const OFF: Self = Self {
        name: "",
        kind: "",
        dim: "",
        reset: "",
    };

    pub fn new(enabled: bool) -> Self {
        if enabled { Self::ON } else { Self::OFF }
    }

    /// Wrap `text` in the name color.
    pub fn paint_name(&self, text: &str) -> String {
        format!("{}{}{}", self.name, text, self.reset)
    }

    pub fn paint_kind(&self, text: &str) -> String {
        format!("{}{}{}", self.kind, text, self.reset)
    }

    /// Wrap `text` in the dim modifier.
    pub fn paint_dim(&self, text: &str) -> String {
        format!("{}{}{}", self.dim, text, self.reset)
    }
}
