#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! Core data structures for abibridge ABI documents.
//!
//! Two layers:
//! - **Deserialization layer**: 1:1 mapping to the ABI JSON array
//! - **Analysis layer**: classified, validated declarations in document order

pub mod colors;
mod interner;
pub mod utils;

#[cfg(test)]
mod utils_tests;

pub use colors::Colors;
pub use interner::{Interner, Symbol};

/// Errors produced while loading an ABI document.
#[derive(Debug, thiserror::Error)]
pub enum DocumentError {
    #[error("malformed ABI document: {0}")]
    Json(#[from] serde_json::Error),

    #[error("unknown field type '{0}'")]
    UnknownEntryKind(String),

    #[error("{kind} entry #{index} has no name")]
    MissingName { kind: EntryKind, index: usize },
}

// ============================================================================
// Deserialization Layer
// ============================================================================

/// Raw entry from the ABI JSON array.
///
/// Every entry kind shares one flat object shape; fields a kind does not use
/// are simply absent.
#[derive(Debug, Clone, serde::Deserialize)]
pub struct RawEntry {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub constant: bool,
    #[serde(default)]
    pub baseclass: Vec<String>,
    #[serde(default)]
    pub fields: Vec<RawArgument>,
    #[serde(default)]
    pub input: Vec<RawArgument>,
    pub output: Option<String>,
    #[serde(default)]
    pub anonymous: bool,
    pub topic: Option<u32>,
}

/// A `(name, type)` pair from a field or input list.
#[derive(Debug, Clone, serde::Deserialize)]
pub struct RawArgument {
    #[serde(default)]
    pub name: String,
    #[serde(rename = "type")]
    pub type_name: String,
}

/// Parse ABI JSON content into raw entries.
pub fn parse_raw_entries(json: &str) -> Result<Vec<RawEntry>, serde_json::Error> {
    serde_json::from_str(json)
}

// ============================================================================
// Analysis Layer
// ============================================================================

/// Classification of an ABI entry by its `type` tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    Struct,
    Method,
    Event,
}

impl EntryKind {
    /// Classify a raw `type` tag. Matching ignores ASCII case, so both the
    /// WASM toolchain's `Action`/`Event` and lowercase spellings are accepted.
    pub fn classify(tag: &str) -> Option<Self> {
        if tag.eq_ignore_ascii_case("struct") {
            Some(Self::Struct)
        } else if tag.eq_ignore_ascii_case("action") || tag.eq_ignore_ascii_case("method") {
            Some(Self::Method)
        } else if tag.eq_ignore_ascii_case("event") {
            Some(Self::Event)
        } else {
            None
        }
    }
}

impl std::fmt::Display for EntryKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Struct => write!(f, "struct"),
            Self::Method => write!(f, "method"),
            Self::Event => write!(f, "event"),
        }
    }
}

/// A named, typed slot: struct field, method input, or event input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Argument {
    pub name: String,
    pub type_name: String,
}

impl From<RawArgument> for Argument {
    fn from(raw: RawArgument) -> Self {
        Self {
            name: raw.name,
            type_name: raw.type_name.trim().to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StructDecl {
    pub name: String,
    /// Base structs, flattened into leading fields by the compiler.
    pub baseclass: Vec<String>,
    pub fields: Vec<Argument>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MethodDecl {
    pub name: String,
    pub constant: bool,
    pub inputs: Vec<Argument>,
    /// `None` for `void` (or a missing/empty output).
    pub output: Option<String>,
}

impl MethodDecl {
    /// The constructor entry point. It is never exposed as a call stub.
    pub fn is_init(&self) -> bool {
        self.name == "init"
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventDecl {
    pub name: String,
    pub inputs: Vec<Argument>,
}

/// An ABI document with entries classified and kept in document order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AbiDocument {
    pub structs: Vec<StructDecl>,
    pub methods: Vec<MethodDecl>,
    pub events: Vec<EventDecl>,
}

impl AbiDocument {
    /// Parse and classify an ABI JSON document.
    pub fn from_json(json: &str) -> Result<Self, DocumentError> {
        let raw = parse_raw_entries(json)?;
        Self::from_raw(raw)
    }

    pub fn from_raw(entries: Vec<RawEntry>) -> Result<Self, DocumentError> {
        let mut doc = Self::default();

        for (index, entry) in entries.into_iter().enumerate() {
            let kind = EntryKind::classify(&entry.kind)
                .ok_or_else(|| DocumentError::UnknownEntryKind(entry.kind.clone()))?;

            if kind != EntryKind::Event && entry.name.trim().is_empty() {
                return Err(DocumentError::MissingName { kind, index });
            }

            match kind {
                EntryKind::Struct => doc.structs.push(StructDecl {
                    name: entry.name,
                    baseclass: entry.baseclass.iter().map(|b| b.trim().to_string()).collect(),
                    fields: entry.fields.into_iter().map(Argument::from).collect(),
                }),
                EntryKind::Method => doc.methods.push(MethodDecl {
                    name: entry.name,
                    constant: entry.constant,
                    inputs: entry.input.into_iter().map(Argument::from).collect(),
                    output: normalize_output(entry.output),
                }),
                EntryKind::Event => doc.events.push(EventDecl {
                    name: entry.name,
                    inputs: entry.input.into_iter().map(Argument::from).collect(),
                }),
            }
        }

        Ok(doc)
    }

    pub fn find_struct(&self, name: &str) -> Option<&StructDecl> {
        self.structs.iter().find(|s| s.name == name)
    }

    pub fn find_method(&self, name: &str) -> Option<&MethodDecl> {
        self.methods.iter().find(|m| m.name == name)
    }
}

fn normalize_output(output: Option<String>) -> Option<String> {
    let output = output?;
    let trimmed = output.trim();
    if trimmed.is_empty() || trimmed == "void" {
        return None;
    }
    Some(trimmed.to_string())
}
