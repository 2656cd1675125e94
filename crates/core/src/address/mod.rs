//! Read-only address catalog over the province → city → district hierarchy.
//!
//! The catalog is built once from a trusted dataset and never mutated, so a
//! single instance can be shared across threads without locking. Lookups for
//! unknown codes return empty results rather than errors.

mod dataset;
mod validate;

use std::collections::HashMap;

use thiserror::Error;

use crate::types::{AddressLevel, AddressNode};

pub use dataset::{CityRecord, DistrictRecord, ProvinceRecord, flatten};
pub use validate::{DatasetIssue, validate_nodes};

/// Errors raised while building a catalog.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// The dataset document could not be parsed.
    #[error("address dataset is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Immutable, indexed view of an address dataset.
#[derive(Debug, Clone, Default)]
pub struct AddressCatalog {
    /// Nodes in dataset declaration order.
    nodes: Vec<AddressNode>,
    /// Code → position in `nodes`. The first occurrence of a code wins.
    by_code: HashMap<String, usize>,
    /// Parent code → positions of its children, in declaration order.
    children: HashMap<String, Vec<usize>>,
    /// Positions of the provinces, in declaration order.
    provinces: Vec<usize>,
}

impl AddressCatalog {
    /// Build a catalog from flattened nodes.
    ///
    /// The nodes are trusted as-is; use [`validate_nodes`] at authoring time
    /// to find hierarchy problems.
    #[must_use]
    pub fn from_nodes(nodes: Vec<AddressNode>) -> Self {
        let mut by_code = HashMap::with_capacity(nodes.len());
        let mut children: HashMap<String, Vec<usize>> = HashMap::new();
        let mut provinces = Vec::new();

        for (position, node) in nodes.iter().enumerate() {
            by_code.entry(node.code.clone()).or_insert(position);

            match &node.parent_code {
                Some(parent) => children.entry(parent.clone()).or_default().push(position),
                None if node.level == AddressLevel::Province => provinces.push(position),
                None => {}
            }
        }

        Self {
            nodes,
            by_code,
            children,
            provinces,
        }
    }

    /// Parse a nested JSON dataset (see [`ProvinceRecord`]) into a catalog.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Parse`] if the document is not a valid dataset.
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let provinces: Vec<ProvinceRecord> = serde_json::from_str(json)?;
        Ok(Self::from_nodes(flatten(provinces)))
    }

    /// The dataset compiled into this crate.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Parse`] if the bundled dataset is malformed.
    pub fn embedded() -> Result<Self, CatalogError> {
        Self::from_json(dataset::EMBEDDED_DATASET)
    }

    /// Every province, in dataset order.
    ///
    /// Provinces carry no parent, so each serializes as `{code, name, type}`.
    #[must_use]
    pub fn list_provinces(&self) -> Vec<AddressNode> {
        self.collect(&self.provinces)
    }

    /// Cities whose parent is `province_code`. Empty for unknown codes.
    #[must_use]
    pub fn list_cities(&self, province_code: &str) -> Vec<AddressNode> {
        self.children_of(province_code, AddressLevel::City)
    }

    /// Districts whose parent is `city_code`. Empty for unknown codes.
    #[must_use]
    pub fn list_districts(&self, city_code: &str) -> Vec<AddressNode> {
        self.children_of(city_code, AddressLevel::District)
    }

    /// Look up a single node by code.
    #[must_use]
    pub fn get(&self, code: &str) -> Option<&AddressNode> {
        self.by_code
            .get(code)
            .and_then(|&position| self.nodes.get(position))
    }

    /// All nodes in dataset order.
    #[must_use]
    pub fn nodes(&self) -> &[AddressNode] {
        &self.nodes
    }

    /// Number of nodes in the catalog.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether the catalog holds no nodes at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    fn children_of(&self, parent_code: &str, level: AddressLevel) -> Vec<AddressNode> {
        self.children
            .get(parent_code)
            .map(|positions| {
                positions
                    .iter()
                    .filter_map(|&position| self.nodes.get(position))
                    .filter(|node| node.level == level)
                    .cloned()
                    .collect()
            })
            .unwrap_or_default()
    }

    fn collect(&self, positions: &[usize]) -> Vec<AddressNode> {
        positions
            .iter()
            .filter_map(|&position| self.nodes.get(position))
            .cloned()
            .collect()
    }
}
