//! Package manifest writer used by the org-snapshot delta generator

use std::collections::{BTreeMap, BTreeSet};
use std::fmt::Write as _;
use std::path::Path;

use quick_xml::escape::escape;

use crate::domain::value_objects::ComponentRef;
use crate::error::{DefuseError, DefuseResult};

const NAMESPACE: &str = "http://soap.sforce.com/2006/04/metadata";

/// Members grouped by metadata type, both sorted
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PackageXml {
    api_version: String,
    types: BTreeMap<String, BTreeSet<String>>,
}

impl PackageXml {
    pub fn new(api_version: impl Into<String>) -> Self {
        Self {
            api_version: api_version.into(),
            types: BTreeMap::new(),
        }
    }

    pub fn add(&mut self, component: &ComponentRef) {
        self.types
            .entry(component.kind.as_str().to_string())
            .or_default()
            .insert(component.name.clone());
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    pub fn len(&self) -> usize {
        self.types.values().map(BTreeSet::len).sum()
    }

    pub fn render(&self) -> String {
        let mut out = String::new();
        out.push_str("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n");
        let _ = writeln!(out, "<Package xmlns=\"{}\">", NAMESPACE);
        for (kind, members) in &self.types {
            out.push_str("    <types>\n");
            for member in members {
                let _ = writeln!(out, "        <members>{}</members>", escape(member.as_str()));
            }
            let _ = writeln!(out, "        <name>{}</name>", escape(kind.as_str()));
            out.push_str("    </types>\n");
        }
        let _ = writeln!(out, "    <version>{}</version>", escape(self.api_version.as_str()));
        out.push_str("</Package>\n");
        out
    }
}

/// Write `package` to `path`, creating parent directories
pub fn write_package_xml(path: &Path, package: &PackageXml) -> DefuseResult<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| DefuseError::file(parent, e))?;
    }
    std::fs::write(path, package.render()).map_err(|e| DefuseError::file(path, e))
}
