use std::collections::HashMap;
use std::fmt;
use std::path::{Path, PathBuf};

use roxmltree::{Document, Node};

/// Looks up the display name of an actor type by its id token.
pub trait ActorCatalog {
    fn actor_name(&self, actor_id: &str) -> Option<&str>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SourceLocation {
    pub line: usize,
    pub column: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CatalogErrorCode {
    XmlMalformed,
    InvalidRoot,
    MissingAttribute,
    DuplicateActor,
}

#[derive(Debug, Clone)]
pub struct CatalogError {
    pub code: CatalogErrorCode,
    pub message: String,
    pub file_path: PathBuf,
    pub location: Option<SourceLocation>,
}

impl fmt::Display for CatalogError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.location {
            Some(loc) => write!(
                f,
                "{:?}: {} (file={}, line={}, column={})",
                self.code,
                self.message,
                self.file_path.display(),
                loc.line,
                loc.column
            ),
            None => write!(
                f,
                "{:?}: {} (file={})",
                self.code,
                self.message,
                self.file_path.display()
            ),
        }
    }
}

impl std::error::Error for CatalogError {}

/// In-memory actor catalog, usually loaded from an actor list XML file.
#[derive(Debug, Default, Clone)]
pub struct StaticActorCatalog {
    names_by_id: HashMap<String, String>,
}

impl StaticActorCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_actor(mut self, actor_id: &str, name: &str) -> Self {
        self.insert(actor_id, name);
        self
    }

    pub fn insert(&mut self, actor_id: &str, name: &str) {
        self.names_by_id
            .insert(actor_id.to_string(), name.to_string());
    }

    pub fn len(&self) -> usize {
        self.names_by_id.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names_by_id.is_empty()
    }

    /// Parses `<Table><List><Actor ID=".." Name=".."/>...</List></Table>`.
    pub fn from_xml_str(file_path: &Path, raw: &str) -> Result<Self, CatalogError> {
        let doc = Document::parse(raw).map_err(|error| CatalogError {
            code: CatalogErrorCode::XmlMalformed,
            message: format!("malformed XML: {error}"),
            file_path: file_path.to_path_buf(),
            location: Some(SourceLocation {
                line: error.pos().row as usize,
                column: error.pos().col as usize,
            }),
        })?;

        let root = doc.root_element();
        if root.tag_name().name() != "Table" {
            return Err(error_at_node(
                CatalogErrorCode::InvalidRoot,
                format!(
                    "root element must be <Table>, found <{}>",
                    root.tag_name().name()
                ),
                file_path,
                &doc,
                root,
            ));
        }

        let mut catalog = Self::new();
        for node in root
            .descendants()
            .filter(|node| node.is_element() && node.tag_name().name() == "Actor")
        {
            let actor_id = required_attribute(file_path, &doc, node, "ID")?;
            let name = required_attribute(file_path, &doc, node, "Name")?;
            if catalog.names_by_id.contains_key(actor_id) {
                return Err(error_at_node(
                    CatalogErrorCode::DuplicateActor,
                    format!("duplicate actor id '{actor_id}'"),
                    file_path,
                    &doc,
                    node,
                ));
            }
            catalog.insert(actor_id, name);
        }
        Ok(catalog)
    }
}

impl ActorCatalog for StaticActorCatalog {
    fn actor_name(&self, actor_id: &str) -> Option<&str> {
        self.names_by_id.get(actor_id).map(String::as_str)
    }
}

fn required_attribute<'a>(
    file_path: &Path,
    doc: &Document<'_>,
    node: Node<'a, '_>,
    attribute: &str,
) -> Result<&'a str, CatalogError> {
    match node.attribute(attribute).map(str::trim) {
        Some(value) if !value.is_empty() => Ok(value),
        _ => Err(error_at_node(
            CatalogErrorCode::MissingAttribute,
            format!("<Actor> is missing required attribute '{attribute}'"),
            file_path,
            doc,
            node,
        )),
    }
}

fn error_at_node(
    code: CatalogErrorCode,
    message: String,
    file_path: &Path,
    doc: &Document<'_>,
    node: Node<'_, '_>,
) -> CatalogError {
    let pos = doc.text_pos_at(node.range().start);
    CatalogError {
        code,
        message,
        file_path: file_path.to_path_buf(),
        location: Some(SourceLocation {
            line: pos.row as usize,
            column: pos.col as usize,
        }),
    }
}
