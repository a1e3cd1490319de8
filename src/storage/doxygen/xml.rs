//! Owned object model of the Doxygen XML files this tool reads.
//!
//! Only the elements and attributes the trace builder needs are kept; the
//! rest of the Doxygen schema is ignored.

use std::path::Path;

use non_empty_string::NonEmptyString;
use roxmltree::{Document, Node, ParsingOptions};

use super::LoadError;

/// The contents of `index.xml`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DoxygenIndex {
    /// Compounds in the order Doxygen lists them.
    pub compounds: Vec<CompoundRef>,
}

/// An entry of the index, pointing at a compound file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompoundRef {
    /// Base name of the compound file (`<refid>.xml`).
    pub refid: String,
    /// Compound kind as written by Doxygen (`class`, `file`, `page`, ...).
    pub kind: String,
    /// Compound name.
    pub name: String,
}

/// The contents of one compound file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CompoundFile {
    /// Compound definitions in document order.
    pub compounds: Vec<CompoundDef>,
}

/// A `<compounddef>` element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompoundDef {
    /// Unique identifier.
    pub id: NonEmptyString,
    /// Compound kind as written by Doxygen.
    pub kind: String,
    /// Source language, if reported.
    pub language: Option<String>,
    /// Fully qualified compound name.
    pub name: String,
    /// Location, absent for groups.
    pub location: Option<XmlLocation>,
    /// Detailed description.
    pub detailed_description: Description,
    /// Member sections in document order.
    pub sections: Vec<SectionDef>,
}

/// A `<sectiondef>` element.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SectionDef {
    /// Section kind (`public-func`, `func`, ...).
    pub kind: String,
    /// Members in document order.
    pub members: Vec<MemberDef>,
}

/// A `<memberdef>` element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemberDef {
    /// Unique identifier.
    pub id: NonEmptyString,
    /// Member kind (`function`, `prototype`, `variable`, ...).
    pub kind: String,
    /// Unqualified member name.
    pub name: String,
    /// Location of the member.
    pub location: XmlLocation,
    /// Detailed description.
    pub detailed_description: Description,
}

impl MemberDef {
    /// Whether the member is a function or a function prototype.
    #[must_use]
    pub fn is_function_like(&self) -> bool {
        matches!(self.kind.as_str(), "function" | "prototype")
    }
}

/// A `<location>` element.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct XmlLocation {
    /// The `file` attribute.
    pub file: String,
    /// The `line` attribute, if present.
    pub line: Option<u32>,
    /// The `column` attribute, if present.
    pub column: Option<u32>,
}

/// A description block (`<detaileddescription>`, `<xrefdescription>`).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Description {
    /// Paragraphs in document order.
    pub paras: Vec<Para>,
}

/// A `<para>` element.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Para {
    /// The paragraph's own text, without the text of nested elements.
    pub text: String,
    /// Cross-reference sections directly inside the paragraph.
    pub xrefsects: Vec<XrefSect>,
}

/// An `<xrefsect>` element, produced by `\xrefitem` and its aliases.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct XrefSect {
    /// The `<xreftitle>` text.
    pub title: String,
    /// The `<xrefdescription>` block.
    pub description: Description,
}

impl DoxygenIndex {
    /// Parses the text of an `index.xml` file.
    ///
    /// `origin` is only used in error messages.
    ///
    /// # Errors
    ///
    /// Returns an error if the text is not well-formed XML, the root element
    /// is not `<doxygenindex>`, or a compound lacks its `refid`.
    pub fn parse(text: &str, origin: &Path) -> Result<Self, LoadError> {
        let document = parse_document(text, origin)?;
        let root = expect_root(&document, "doxygenindex", origin)?;

        let compounds = elements(root, "compound")
            .map(|compound| -> Result<CompoundRef, LoadError> {
                let refid = required_attribute(compound, "refid", origin)?;
                Ok(CompoundRef {
                    refid: refid.as_str().to_string(),
                    kind: compound.attribute("kind").unwrap_or_default().to_string(),
                    name: child_text(compound, "name"),
                })
            })
            .collect::<Result<_, _>>()?;

        Ok(Self { compounds })
    }
}

impl CompoundFile {
    /// Parses the text of a compound file.
    ///
    /// `origin` is only used in error messages.
    ///
    /// # Errors
    ///
    /// Returns an error if the text is not well-formed XML, the root element
    /// is not `<doxygen>`, an identifier or member location is missing, or a
    /// location carries a line or column that is not a number.
    pub fn parse(text: &str, origin: &Path) -> Result<Self, LoadError> {
        let document = parse_document(text, origin)?;
        let root = expect_root(&document, "doxygen", origin)?;

        let compounds = elements(root, "compounddef")
            .map(|node| compound_def(node, origin))
            .collect::<Result<_, _>>()?;

        Ok(Self { compounds })
    }
}

fn compound_def(node: Node<'_, '_>, origin: &Path) -> Result<CompoundDef, LoadError> {
    let location = first_element(node, "location")
        .map(|location| xml_location(location, origin))
        .transpose()?;

    let sections = elements(node, "sectiondef")
        .map(|section| -> Result<SectionDef, LoadError> {
            let members = elements(section, "memberdef")
                .map(|member| member_def(member, origin))
                .collect::<Result<_, _>>()?;
            Ok(SectionDef {
                kind: section.attribute("kind").unwrap_or_default().to_string(),
                members,
            })
        })
        .collect::<Result<_, _>>()?;

    Ok(CompoundDef {
        id: required_attribute(node, "id", origin)?,
        kind: node.attribute("kind").unwrap_or_default().to_string(),
        language: node.attribute("language").map(ToString::to_string),
        name: child_text(node, "compoundname"),
        location,
        detailed_description: detailed_description(node),
        sections,
    })
}

fn member_def(node: Node<'_, '_>, origin: &Path) -> Result<MemberDef, LoadError> {
    let location = first_element(node, "location").ok_or_else(|| LoadError::MissingElement {
        path: origin.to_path_buf(),
        element: node.tag_name().name().to_string(),
        child: "location",
    })?;

    Ok(MemberDef {
        id: required_attribute(node, "id", origin)?,
        kind: node.attribute("kind").unwrap_or_default().to_string(),
        name: child_text(node, "name"),
        location: xml_location(location, origin)?,
        detailed_description: detailed_description(node),
    })
}

fn xml_location(node: Node<'_, '_>, origin: &Path) -> Result<XmlLocation, LoadError> {
    Ok(XmlLocation {
        file: node.attribute("file").unwrap_or_default().to_string(),
        line: numeric_attribute(node, "line", origin)?,
        column: numeric_attribute(node, "column", origin)?,
    })
}

fn detailed_description(node: Node<'_, '_>) -> Description {
    first_element(node, "detaileddescription")
        .map(description)
        .unwrap_or_default()
}

fn description(node: Node<'_, '_>) -> Description {
    Description {
        paras: elements(node, "para").map(para).collect(),
    }
}

fn para(node: Node<'_, '_>) -> Para {
    let xrefsects = elements(node, "xrefsect")
        .map(|xrefsect| XrefSect {
            title: child_text(xrefsect, "xreftitle"),
            description: first_element(xrefsect, "xrefdescription")
                .map(description)
                .unwrap_or_default(),
        })
        .collect();

    Para {
        text: own_text(node),
        xrefsects,
    }
}

fn parse_document<'input>(text: &'input str, origin: &Path) -> Result<Document<'input>, LoadError> {
    let mut options = ParsingOptions::default();
    options.allow_dtd = true;

    Document::parse_with_options(text, options).map_err(|source| LoadError::Xml {
        path: origin.to_path_buf(),
        source,
    })
}

fn expect_root<'a, 'input>(
    document: &'a Document<'input>,
    expected: &'static str,
    origin: &Path,
) -> Result<Node<'a, 'input>, LoadError> {
    let root = document.root_element();
    if root.tag_name().name() == expected {
        Ok(root)
    } else {
        Err(LoadError::UnexpectedRoot {
            path: origin.to_path_buf(),
            expected,
            found: root.tag_name().name().to_string(),
        })
    }
}

/// Direct child elements with the given name.
fn elements<'a, 'input: 'a>(
    node: Node<'a, 'input>,
    name: &'static str,
) -> impl Iterator<Item = Node<'a, 'input>> {
    node.children()
        .filter(move |child| child.is_element() && child.tag_name().name() == name)
}

fn first_element<'a, 'input: 'a>(
    node: Node<'a, 'input>,
    name: &'static str,
) -> Option<Node<'a, 'input>> {
    elements(node, name).next()
}

/// Concatenated text nodes directly below `node`.
fn own_text(node: Node<'_, '_>) -> String {
    node.children()
        .filter(Node::is_text)
        .filter_map(|child| child.text())
        .collect()
}

fn child_text(node: Node<'_, '_>, name: &'static str) -> String {
    first_element(node, name).map(own_text).unwrap_or_default()
}

fn required_attribute(
    node: Node<'_, '_>,
    attribute: &'static str,
    origin: &Path,
) -> Result<NonEmptyString, LoadError> {
    node.attribute(attribute)
        .and_then(|value| NonEmptyString::new(value.to_string()).ok())
        .ok_or_else(|| LoadError::MissingAttribute {
            path: origin.to_path_buf(),
            element: node.tag_name().name().to_string(),
            attribute,
        })
}

fn numeric_attribute(
    node: Node<'_, '_>,
    attribute: &'static str,
    origin: &Path,
) -> Result<Option<u32>, LoadError> {
    node.attribute(attribute)
        .map(|value| {
            value
                .trim()
                .parse()
                .map_err(|_| LoadError::InvalidNumber {
                    path: origin.to_path_buf(),
                    attribute,
                    value: value.to_string(),
                })
        })
        .transpose()
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use super::*;

    const INDEX: &str = r#"<?xml version='1.0' encoding='UTF-8' standalone='no'?>
<doxygenindex version="1.9.8" xml:lang="en-US">
  <compound refid="main_8cpp" kind="file"><name>main.cpp</name>
    <member refid="main_8cpp_1a0" kind="function"><name>main</name></member>
  </compound>
  <compound refid="group__main__group" kind="group"><name>main_group</name></compound>
  <compound refid="dir_68267d1309a1af8e8297ef4c3efbcdba" kind="dir"><name>src</name></compound>
</doxygenindex>
"#;

    const COMPOUND: &str = r#"<?xml version='1.0' encoding='UTF-8' standalone='no'?>
<doxygen version="1.9.8" xml:lang="en-US">
  <compounddef id="main_8cpp" kind="file" language="C++">
    <compoundname>main.cpp</compoundname>
    <sectiondef kind="func">
      <memberdef kind="function" id="main_8cpp_1a1" prot="public" static="no">
        <name>print_title</name>
        <detaileddescription>
          <para>Print the title.</para>
          <para><xrefsect id="implements_1_implements000001"><xreftitle>Implements</xreftitle><xrefdescription><para>Requirement: SwRequirements.sw_req_text_output </para>
</xrefdescription></xrefsect></para>
        </detaileddescription>
        <location file="src/main.cpp" line="12" column="6" bodyfile="src/main.cpp" bodystart="12" bodyend="15"/>
      </memberdef>
      <memberdef kind="variable" id="main_8cpp_1a2">
        <name>counter</name>
        <location file="src/main.cpp" line="3" column="12"/>
      </memberdef>
    </sectiondef>
    <detaileddescription></detaileddescription>
    <location file="src/main.cpp"/>
  </compounddef>
</doxygen>
"#;

    #[test]
    fn index_lists_compounds_in_order() {
        let index = DoxygenIndex::parse(INDEX, Path::new("index.xml")).unwrap();

        let refids: Vec<_> = index.compounds.iter().map(|c| c.refid.as_str()).collect();
        assert_eq!(
            refids,
            [
                "main_8cpp",
                "group__main__group",
                "dir_68267d1309a1af8e8297ef4c3efbcdba"
            ]
        );
        assert_eq!(index.compounds[0].kind, "file");
        assert_eq!(index.compounds[1].name, "main_group");
    }

    #[test]
    fn compound_reads_members_and_locations() {
        let file = CompoundFile::parse(COMPOUND, Path::new("main_8cpp.xml")).unwrap();
        let compound = &file.compounds[0];

        assert_eq!(compound.id.as_str(), "main_8cpp");
        assert_eq!(compound.kind, "file");
        assert_eq!(compound.language.as_deref(), Some("C++"));
        assert_eq!(compound.name, "main.cpp");

        let location = compound.location.as_ref().unwrap();
        assert_eq!(location.file, "src/main.cpp");
        assert_eq!(location.line, None);

        let members = &compound.sections[0].members;
        assert_eq!(members.len(), 2);
        assert!(members[0].is_function_like());
        assert!(!members[1].is_function_like());
        assert_eq!(members[0].location.line, Some(12));
        assert_eq!(members[0].location.column, Some(6));
    }

    #[test]
    fn xrefsect_paragraph_text_is_kept() {
        let file = CompoundFile::parse(COMPOUND, Path::new("main_8cpp.xml")).unwrap();
        let description = &file.compounds[0].sections[0].members[0].detailed_description;

        assert_eq!(description.paras.len(), 2);
        assert!(description.paras[0].xrefsects.is_empty());

        let xrefsect = &description.paras[1].xrefsects[0];
        assert_eq!(xrefsect.title, "Implements");
        assert_eq!(
            xrefsect.description.paras[0].text,
            "Requirement: SwRequirements.sw_req_text_output "
        );
    }

    #[test]
    fn para_text_excludes_nested_elements() {
        let xml = r#"<doxygen><compounddef id="a" kind="file"><detaileddescription>
<para>before <bold>bold</bold> after</para></detaileddescription></compounddef></doxygen>"#;

        let file = CompoundFile::parse(xml, Path::new("a.xml")).unwrap();
        let para = &file.compounds[0].detailed_description.paras[0];
        assert_eq!(para.text, "before  after");
    }

    #[test]
    fn group_without_location() {
        let xml = r#"<doxygen><compounddef id="group__g" kind="group">
<compoundname>g</compoundname></compounddef></doxygen>"#;

        let file = CompoundFile::parse(xml, Path::new("group__g.xml")).unwrap();
        assert!(file.compounds[0].location.is_none());
        assert!(file.compounds[0].language.is_none());
    }

    #[test]
    fn malformed_xml_is_an_error() {
        let error = CompoundFile::parse("<doxygen><compounddef", Path::new("bad.xml")).unwrap_err();
        assert!(matches!(error, LoadError::Xml { .. }));
    }

    #[test]
    fn wrong_root_is_an_error() {
        let error = DoxygenIndex::parse("<doxygen/>", Path::new("index.xml")).unwrap_err();
        assert!(matches!(
            error,
            LoadError::UnexpectedRoot {
                expected: "doxygenindex",
                ..
            }
        ));
    }

    #[test]
    fn missing_id_is_an_error() {
        let xml = r#"<doxygen><compounddef kind="file"/></doxygen>"#;
        let error = CompoundFile::parse(xml, Path::new("a.xml")).unwrap_err();
        assert!(matches!(
            error,
            LoadError::MissingAttribute { attribute: "id", .. }
        ));
    }

    #[test]
    fn non_numeric_line_is_an_error() {
        let xml = r#"<doxygen><compounddef id="a" kind="file"><location file="a.c" line="x"/></compounddef></doxygen>"#;
        let error = CompoundFile::parse(xml, Path::new("a.xml")).unwrap_err();
        assert!(matches!(error, LoadError::InvalidNumber { attribute: "line", .. }));
    }

    #[test]
    fn member_without_location_is_an_error() {
        let xml = r#"<doxygen><compounddef id="a" kind="file"><sectiondef kind="func">
<memberdef kind="function" id="a_1f"><name>f</name></memberdef>
</sectiondef></compounddef></doxygen>"#;

        let error = CompoundFile::parse(xml, Path::new("a.xml")).unwrap_err();
        assert!(matches!(
            error,
            LoadError::MissingElement {
                ref element,
                child: "location",
                ..
            } if element == "memberdef"
        ));
        assert_eq!(error.to_string(), "<memberdef> in a.xml has no <location> element");
    }
}
