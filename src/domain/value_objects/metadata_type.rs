//! Metadata types of the source-format project layout
//!
//! Maps a file under a package directory (e.g.
//! `force-app/main/default/classes/Foo.cls`) to the component it belongs to.

use std::fmt;
use std::path::{Component, Path, PathBuf};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum MetadataType {
    ApexClass,
    ApexTrigger,
    ApexPage,
    ApexComponent,
    LightningComponentBundle,
    AuraDefinitionBundle,
    Flow,
    CustomObject,
    CustomLabels,
    PermissionSet,
    Layout,
    StaticResource,
    CustomTab,
    EmailTemplate,
}

/// (directory name, type, bundle)
const LAYOUT: &[(&str, MetadataType, bool)] = &[
    ("classes", MetadataType::ApexClass, false),
    ("triggers", MetadataType::ApexTrigger, false),
    ("pages", MetadataType::ApexPage, false),
    ("components", MetadataType::ApexComponent, false),
    ("lwc", MetadataType::LightningComponentBundle, true),
    ("aura", MetadataType::AuraDefinitionBundle, true),
    ("flows", MetadataType::Flow, false),
    ("objects", MetadataType::CustomObject, true),
    ("labels", MetadataType::CustomLabels, false),
    ("permissionsets", MetadataType::PermissionSet, false),
    ("layouts", MetadataType::Layout, false),
    ("staticresources", MetadataType::StaticResource, false),
    ("tabs", MetadataType::CustomTab, false),
    ("email", MetadataType::EmailTemplate, true),
];

impl MetadataType {
    pub fn from_dir(dir: &str) -> Option<(Self, bool)> {
        LAYOUT
            .iter()
            .find(|(name, _, _)| *name == dir)
            .map(|(_, ty, bundle)| (*ty, *bundle))
    }

    /// Name used in `<types><name>` of a package manifest
    pub fn as_str(&self) -> &'static str {
        match self {
            MetadataType::ApexClass => "ApexClass",
            MetadataType::ApexTrigger => "ApexTrigger",
            MetadataType::ApexPage => "ApexPage",
            MetadataType::ApexComponent => "ApexComponent",
            MetadataType::LightningComponentBundle => "LightningComponentBundle",
            MetadataType::AuraDefinitionBundle => "AuraDefinitionBundle",
            MetadataType::Flow => "Flow",
            MetadataType::CustomObject => "CustomObject",
            MetadataType::CustomLabels => "CustomLabels",
            MetadataType::PermissionSet => "PermissionSet",
            MetadataType::Layout => "Layout",
            MetadataType::StaticResource => "StaticResource",
            MetadataType::CustomTab => "CustomTab",
            MetadataType::EmailTemplate => "EmailTemplate",
        }
    }
}

impl fmt::Display for MetadataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The component a metadata file belongs to
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ComponentRef {
    pub kind: MetadataType,
    pub name: String,
}

impl ComponentRef {
    /// Resolve the component owning `path`.
    ///
    /// The first path segment naming a known type directory anchors the
    /// lookup, so the package prefix (`force-app/main/default`) does not
    /// matter. Returns the component and the path relative to that anchor's
    /// parent, which is identical for the same file in two different trees.
    pub fn from_path(path: &Path) -> Option<(Self, PathBuf)> {
        let parts: Vec<&str> = path
            .components()
            .filter_map(|c| match c {
                Component::Normal(s) => s.to_str(),
                _ => None,
            })
            .collect();

        let anchor = parts
            .iter()
            .position(|p| MetadataType::from_dir(p).is_some())?;
        let (kind, bundle) = MetadataType::from_dir(parts[anchor])?;
        let rest = &parts[anchor + 1..];
        let first = rest.first()?;

        let name = if bundle {
            if rest.len() < 2 {
                return None;
            }
            first.to_string()
        } else {
            component_stem(first)
        };
        if name.is_empty() {
            return None;
        }

        let key: PathBuf = parts[anchor..].iter().collect();
        Some((Self { kind, name }, key))
    }
}

/// `Foo.cls-meta.xml` -> `Foo`, `Foo.cls` -> `Foo`, `Account-Layout.layout-meta.xml` -> `Account-Layout`
fn component_stem(file_name: &str) -> String {
    let base = file_name.strip_suffix("-meta.xml").unwrap_or(file_name);
    match base.find('.') {
        Some(idx) => base[..idx].to_string(),
        None => base.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn class_and_meta_resolve_to_same_component() {
        let (a, key_a) =
            ComponentRef::from_path(Path::new("force-app/main/default/classes/Foo.cls")).unwrap();
        let (b, _) =
            ComponentRef::from_path(Path::new("force-app/main/default/classes/Foo.cls-meta.xml"))
                .unwrap();
        assert_eq!(a, b);
        assert_eq!(a.kind, MetadataType::ApexClass);
        assert_eq!(a.name, "Foo");
        assert_eq!(key_a, PathBuf::from("classes/Foo.cls"));
    }

    #[test]
    fn bundle_uses_directory_name() {
        let (c, _) = ComponentRef::from_path(Path::new("src/lwc/accountCard/accountCard.js")).unwrap();
        assert_eq!(c.kind, MetadataType::LightningComponentBundle);
        assert_eq!(c.name, "accountCard");
    }

    #[test]
    fn unknown_layout_is_ignored() {
        assert!(ComponentRef::from_path(Path::new("scripts/apex/hello.apex")).is_none());
        assert!(ComponentRef::from_path(Path::new("lwc/jsconfig.json")).is_none());
    }

    #[test]
    fn stem_keeps_dashes() {
        assert_eq!(component_stem("Account-Account Layout.layout-meta.xml"), "Account-Account Layout");
    }
}
