//! Deleted components and the manifest that declares them

use std::collections::{BTreeSet, HashSet};

/// One component marked for removal
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeletedComponent {
    name: String,
    kind: Option<String>,
}

impl DeletedComponent {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: None,
        }
    }

    /// Attach the metadata type (e.g. `ApexClass`)
    pub fn with_kind(mut self, kind: impl Into<String>) -> Self {
        self.kind = Some(kind.into());
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> Option<&str> {
        self.kind.as_deref()
    }
}

/// Ordered collection of deleted components
///
/// Names are unique: pushing a name that is already present is a no-op, so
/// the first declaration (and its kind) wins.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeletionManifest {
    components: Vec<DeletedComponent>,
    seen: HashSet<String>,
}

impl DeletionManifest {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a component, returning `false` if the name was already declared
    pub fn push(&mut self, component: DeletedComponent) -> bool {
        if !self.seen.insert(component.name.clone()) {
            return false;
        }
        self.components.push(component);
        true
    }

    pub fn components(&self) -> &[DeletedComponent] {
        &self.components
    }

    /// Component names as a sorted set
    pub fn names(&self) -> BTreeSet<&str> {
        self.components.iter().map(|c| c.name()).collect()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.seen.contains(name)
    }

    pub fn len(&self) -> usize {
        self.components.len()
    }

    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }
}

impl FromIterator<DeletedComponent> for DeletionManifest {
    fn from_iter<I: IntoIterator<Item = DeletedComponent>>(iter: I) -> Self {
        let mut manifest = Self::new();
        for component in iter {
            manifest.push(component);
        }
        manifest
    }
}
