use std::fmt;

/// The kind of a [`LobsterItem`](super::LobsterItem).
///
/// The string form of each variant is what ends up in the `kind` field of the
/// interchange file.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum LobsterKind {
    /// Kind not (yet) assigned.
    #[default]
    Undefined,
    /// Free function.
    Function,
    /// Function prototype.
    Prototype,
    /// Member function of a class, struct or interface.
    Method,
    /// Class compound.
    Class,
    /// Struct compound.
    Struct,
    /// Interface compound.
    Interface,
    /// Source file compound.
    File,
    /// Namespace compound.
    Namespace,
    /// Doxygen group (`\defgroup`).
    Group,
}

impl LobsterKind {
    /// Maps a Doxygen compound kind (`compounddef@kind`) to an item kind.
    ///
    /// Only compounds that become trace items are mapped; everything else
    /// (pages, directories, unions, ...) yields `None`.
    #[must_use]
    pub fn from_compound_kind(kind: &str) -> Option<Self> {
        match kind.to_ascii_lowercase().as_str() {
            "class" => Some(Self::Class),
            "struct" => Some(Self::Struct),
            "interface" => Some(Self::Interface),
            "file" => Some(Self::File),
            "namespace" => Some(Self::Namespace),
            "group" => Some(Self::Group),
            _ => None,
        }
    }

    /// The human-readable name, as written to the interchange file.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Undefined => "Undefined",
            Self::Function => "Function",
            Self::Prototype => "Prototype",
            Self::Method => "Method",
            Self::Class => "Class",
            Self::Struct => "Struct",
            Self::Interface => "Interface",
            Self::File => "File",
            Self::Namespace => "Namespace",
            Self::Group => "Group",
        }
    }

    /// Whether an unannotated item of this kind is replaced by its children
    /// in the interchange output.
    #[must_use]
    pub const fn is_container(self) -> bool {
        matches!(
            self,
            Self::Class | Self::Struct | Self::Interface | Self::Namespace
        )
    }

    /// Whether function-like members of a compound of this kind become
    /// methods (`true`) rather than free functions.
    #[must_use]
    pub const fn has_methods(self) -> bool {
        matches!(self, Self::Class | Self::Struct | Self::Interface)
    }
}

impl fmt::Display for LobsterKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use test_case::test_case;

    use super::LobsterKind;

    #[test_case("class", Some(LobsterKind::Class); "class")]
    #[test_case("struct", Some(LobsterKind::Struct); "struct")]
    #[test_case("interface", Some(LobsterKind::Interface); "interface")]
    #[test_case("file", Some(LobsterKind::File); "file")]
    #[test_case("namespace", Some(LobsterKind::Namespace); "namespace")]
    #[test_case("group", Some(LobsterKind::Group); "group")]
    #[test_case("Namespace", Some(LobsterKind::Namespace); "case insensitive")]
    #[test_case("page", None; "page is skipped")]
    #[test_case("dir", None; "dir is skipped")]
    #[test_case("union", None; "union is skipped")]
    fn compound_kind_mapping(input: &str, expected: Option<LobsterKind>) {
        assert_eq!(LobsterKind::from_compound_kind(input), expected);
    }

    #[test]
    fn display_matches_interchange_names() {
        assert_eq!(LobsterKind::Function.to_string(), "Function");
        assert_eq!(LobsterKind::Undefined.to_string(), "Undefined");
        assert_eq!(LobsterKind::Group.to_string(), "Group");
    }

    #[test]
    fn only_type_and_namespace_kinds_are_containers() {
        assert!(LobsterKind::Namespace.is_container());
        assert!(LobsterKind::Class.is_container());
        assert!(!LobsterKind::File.is_container());
        assert!(!LobsterKind::Group.is_container());
        assert!(!LobsterKind::Function.is_container());
    }
}
