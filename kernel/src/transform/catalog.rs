//! `TemplateCatalog`: the fixed, ordered set of templates a search may use.
//!
//! Order is preserved as given; successor enumeration walks the catalog in
//! this order, so the catalog order is part of the search's determinism.

use std::collections::BTreeSet;

use crate::transform::template::TransformTemplate;

/// Typed failure for catalog construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogError {
    /// Two templates share a name.
    DuplicateTemplate { name: String },
    /// A template has an empty name.
    EmptyName { index: usize },
}

impl std::fmt::Display for CatalogError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DuplicateTemplate { name } => write!(f, "duplicate template name '{name}'"),
            Self::EmptyName { index } => write!(f, "template at index {index} has an empty name"),
        }
    }
}

impl std::error::Error for CatalogError {}

/// An ordered collection of uniquely named templates.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TemplateCatalog {
    templates: Vec<TransformTemplate>,
}

impl TemplateCatalog {
    /// Build a catalog, rejecting empty or duplicate names.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError`] on the first invalid template.
    pub fn new(templates: Vec<TransformTemplate>) -> Result<Self, CatalogError> {
        let mut seen = BTreeSet::new();
        for (index, template) in templates.iter().enumerate() {
            if template.name().is_empty() {
                return Err(CatalogError::EmptyName { index });
            }
            if !seen.insert(template.name()) {
                return Err(CatalogError::DuplicateTemplate {
                    name: template.name().to_string(),
                });
            }
        }
        Ok(Self { templates })
    }

    /// Look up a template by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&TransformTemplate> {
        self.templates.iter().find(|t| t.name() == name)
    }

    /// Templates in catalog order.
    pub fn iter(&self) -> std::slice::Iter<'_, TransformTemplate> {
        self.templates.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.templates.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }
}

impl<'a> IntoIterator for &'a TemplateCatalog {
    type Item = &'a TransformTemplate;
    type IntoIter = std::slice::Iter<'a, TransformTemplate>;

    fn into_iter(self) -> Self::IntoIter {
        self.templates.iter()
    }
}
