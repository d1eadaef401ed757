//! Spec model types consumed from the external specification library.
//!
//! The library owns model construction; everything here is display data.
//! [`SpecNode`] mirrors the JSON node trees the library serializes: a name,
//! children, and whatever extra attributes the source table carried
//! (module/usage for IOD module rows, elem_name/elem_tag/elem_type for
//! attribute rows). We keep the extras as an opaque map.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// One row of the PS3.3 list of IOD Modules tables.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IodEntry {
    pub name: String,
    pub table_id: String,
    pub table_url: String,
    pub kind: IodKind,
}

/// IOD category, derived from the table id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum IodKind {
    Composite,
    Normalized,
    Other,
}

impl IodKind {
    /// PS3.3 annex A tables hold composite IODs, annex B normalized ones.
    pub fn classify(table_id: &str) -> Self {
        if table_id.contains("_A.") {
            Self::Composite
        } else if table_id.contains("_B.") {
            Self::Normalized
        } else {
            Self::Other
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Composite => "Composite",
            Self::Normalized => "Normalized",
            Self::Other => "Other",
        }
    }
}

impl std::fmt::Display for IodKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The IOD list together with the DICOM standard version it came from.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct IodList {
    #[serde(default)]
    pub version: String,
    #[serde(default)]
    pub iods: Vec<IodEntry>,
}

/// Opaque display tree for a loaded IOD model.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SpecNode {
    pub name: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<SpecNode>,
    /// Source table attributes the library attached to this node.
    #[serde(flatten)]
    pub attrs: BTreeMap<String, serde_json::Value>,
}

impl SpecNode {
    /// String attribute lookup; non-string values render through JSON.
    pub fn attr(&self, key: &str) -> Option<String> {
        self.attrs.get(key).map(|value| match value.as_str() {
            Some(s) => s.to_string(),
            None => value.to_string(),
        })
    }

    /// True for IOD module rows.
    pub fn is_module(&self) -> bool {
        self.attrs.contains_key("module")
    }

    /// True for attribute rows of a module table.
    pub fn is_attribute(&self) -> bool {
        self.attrs.contains_key("elem_name")
    }

    /// Text shown in the tree for this node.
    pub fn display_name(&self) -> String {
        if let Some(module) = self.attr("module") {
            return module;
        }
        if let Some(elem_name) = self.attr("elem_name") {
            return match self.attr("elem_tag") {
                Some(tag) if !tag.is_empty() => format!("{tag} {elem_name}"),
                _ => elem_name,
            };
        }
        self.name.clone()
    }

    /// Usage or type code shown next to the node.
    pub fn usage_code(&self) -> String {
        if self.is_module() {
            self.attr("usage")
                .map(|usage| usage.chars().take(1).collect())
                .unwrap_or_default()
        } else {
            self.attr("elem_type").unwrap_or_default()
        }
    }

    /// Resolve a slash-separated path, the first segment being this node.
    pub fn find(&self, node_path: &str) -> Option<&SpecNode> {
        let mut segments = node_path.split('/');
        if segments.next()? != self.name {
            return None;
        }
        let mut node = self;
        for segment in segments {
            node = node.children.iter().find(|child| child.name == segment)?;
        }
        Some(node)
    }

    /// Full path of `descendant` below this node, for later [`find`] calls.
    pub fn path_of(&self, descendant: &SpecNode) -> Option<String> {
        if std::ptr::eq(self, descendant) {
            return Some(self.name.clone());
        }
        for child in &self.children {
            if let Some(rest) = child.path_of(descendant) {
                return Some(format!("{}/{rest}", self.name));
            }
        }
        None
    }

    /// All attributes of this node for the detail panel. The caller picks
    /// what to display.
    pub fn details(&self) -> BTreeMap<String, String> {
        let mut details: BTreeMap<String, String> = self
            .attrs
            .iter()
            .map(|(key, value)| {
                let text = match value.as_str() {
                    Some(s) => s.to_string(),
                    None => value.to_string(),
                };
                (key.clone(), text)
            })
            .collect();
        details.insert("name".to_string(), self.name.clone());
        details
    }
}

/// Human text for a module usage code (M/U/C).
pub fn usage_text(code: &str) -> &'static str {
    match code {
        "M" => "Mandatory (M)",
        "U" => "User Optional (U)",
        "C" => "Conditional (C)",
        "" => "Unspecified",
        _ => "Unknown",
    }
}

/// Human text for an attribute type code (1/1C/2/2C/3).
pub fn type_text(code: &str) -> &'static str {
    match code {
        "1" => "Mandatory (1)",
        "1C" => "Conditional (1C)",
        "2" => "Mandatory, may be empty (2)",
        "2C" => "Conditional, may be empty (2C)",
        "3" => "Optional (3)",
        "" => "Unspecified",
        _ => "Unknown",
    }
}
