use non_empty_string::NonEmptyString;

use super::LobsterKind;

/// Where an item is defined in the source code.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Location {
    /// Source file, as reported by Doxygen.
    pub file: String,
    /// Line number, `None` if unknown.
    pub line: Option<u32>,
    /// Column number, `None` if unknown.
    pub column: Option<u32>,
}

impl Location {
    /// A location in `file`.
    #[must_use]
    pub fn new(file: impl Into<String>, line: Option<u32>, column: Option<u32>) -> Self {
        Self {
            file: file.into(),
            line,
            column,
        }
    }

    /// The location used for compounds Doxygen reports without one (groups).
    #[must_use]
    pub const fn zero() -> Self {
        Self {
            file: String::new(),
            line: Some(0),
            column: Some(0),
        }
    }
}

/// A traceable code construct.
///
/// Items are built up by the trace builder and are read-only afterwards. A
/// compound item owns the function-like items declared inside it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LobsterItem {
    id: NonEmptyString,
    kind: LobsterKind,
    name: String,
    location: Location,
    language: String,
    refs: Vec<String>,
    just_up: Vec<String>,
    children: Vec<LobsterItem>,
}

impl LobsterItem {
    /// Creates an item of kind [`LobsterKind::Undefined`] with nothing but an
    /// identifier.
    #[must_use]
    pub const fn new(id: NonEmptyString) -> Self {
        Self {
            id,
            kind: LobsterKind::Undefined,
            name: String::new(),
            location: Location {
                file: String::new(),
                line: None,
                column: None,
            },
            language: String::new(),
            refs: Vec::new(),
            just_up: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Sets the kind.
    #[must_use]
    pub const fn with_kind(mut self, kind: LobsterKind) -> Self {
        self.kind = kind;
        self
    }

    /// Sets the display name.
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Sets the source language.
    #[must_use]
    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = language.into();
        self
    }

    /// Sets the source location.
    #[must_use]
    pub fn with_location(mut self, location: Location) -> Self {
        self.location = location;
        self
    }

    /// Appends requirement references, keeping their order.
    pub fn extend_refs(&mut self, refs: impl IntoIterator<Item = String>) {
        self.refs.extend(refs);
    }

    /// Appends justifications, keeping their order.
    pub fn extend_just_up(&mut self, just_up: impl IntoIterator<Item = String>) {
        self.just_up.extend(just_up);
    }

    /// Appends a child item.
    pub fn append_child(&mut self, child: Self) {
        self.children.push(child);
    }

    /// The unique identifier assigned by Doxygen.
    #[must_use]
    pub fn id(&self) -> &str {
        self.id.as_str()
    }

    /// The kind of the item.
    #[must_use]
    pub const fn kind(&self) -> LobsterKind {
        self.kind
    }

    /// The name shown in the trace report.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The source location.
    #[must_use]
    pub const fn location(&self) -> &Location {
        &self.location
    }

    /// The source language, empty if Doxygen did not report one.
    #[must_use]
    pub fn language(&self) -> &str {
        &self.language
    }

    /// Requirement references, in the order they were found.
    #[must_use]
    pub fn refs(&self) -> &[String] {
        &self.refs
    }

    /// Justifications, in the order they were found.
    #[must_use]
    pub fn just_up(&self) -> &[String] {
        &self.just_up
    }

    /// The child items.
    #[must_use]
    pub fn children(&self) -> &[Self] {
        &self.children
    }

    /// Whether the item has any children.
    #[must_use]
    pub fn has_children(&self) -> bool {
        !self.children.is_empty()
    }

    /// Whether the item references at least one requirement.
    #[must_use]
    pub fn has_refs(&self) -> bool {
        !self.refs.is_empty()
    }

    /// Whether the item carries at least one justification.
    #[must_use]
    pub fn has_just_up(&self) -> bool {
        !self.just_up.is_empty()
    }

    /// Whether the item carries references or justifications.
    #[must_use]
    pub fn is_annotated(&self) -> bool {
        self.has_refs() || self.has_just_up()
    }

    /// The LOBSTER tag, `"<language prefix> <id>"`.
    ///
    /// Unrecognised languages use the prefix `"unknown "`, so their tags
    /// contain two spaces (`"unknown  <id>"`).
    #[must_use]
    pub fn tag(&self) -> String {
        format!("{} {}", tag_prefix(&self.language), self.id.as_str())
    }
}

fn tag_prefix(language: &str) -> &'static str {
    match language {
        "C" => "c",
        "C++" => "cpp",
        "C#" => "cs",
        "Java" => "java",
        "Python" => "python",
        _ => "unknown ",
    }
}
