//! Node factory: initial metadata for nodes created by a graph.
//!
//! Whole-entity names pick up the entity's attributes from the catalog.
//! Dotted `Entity.field` names (lineage) fall back to `System`/`Table`/`Field`
//! defaults, enriched with the field's `Type` when the catalog knows it.

use std::collections::HashMap;

use schemagraph_core::{Entity, Metadata};
use serde_json::Value;

use crate::metadata::{dynamic_metadata, entity_to_metadata, merge_metadata};
use crate::model::Node;

/// Creates nodes, seeding their metadata from an optional entity catalog.
#[derive(Debug, Clone, Default)]
pub struct NodeFactory {
    /// Lower-cased entity name → entity.
    entities: HashMap<String, Entity>,
}

impl NodeFactory {
    /// Build a factory over an entity catalog. Later duplicates win.
    pub fn new<I>(entities: I) -> Self
    where
        I: IntoIterator<Item = Entity>,
    {
        let entities = entities
            .into_iter()
            .map(|entity| (entity.name.to_lowercase(), entity))
            .collect();
        Self { entities }
    }

    /// Case-insensitive catalog lookup.
    pub fn entity(&self, name: &str) -> Option<&Entity> {
        self.entities.get(&name.to_lowercase())
    }

    pub fn entity_count(&self) -> usize {
        self.entities.len()
    }

    /// Create a node for `name`.
    ///
    /// Catalog entities get their attributes plus `AttributeCount`; any other
    /// name gets dotted-segment defaults.
    pub fn create(&self, name: &str) -> Node {
        match self.entity(name) {
            Some(entity) => Node::new(name, entity_to_metadata(entity)),
            None => Node::new(name, dynamic_metadata(name)),
        }
    }

    /// Create a node for `name` and merge caller metadata over the defaults.
    ///
    /// The first dotted segment names the entity and the last one the field.
    /// When both resolve, the field's type descriptor is stored under `Type`.
    pub fn create_with_meta(&self, name: &str, metadata: Option<&Metadata>) -> Node {
        let mut derived = dynamic_metadata(name);
        if let Some(descriptor) = self.field_descriptor(name) {
            derived.insert("Type".to_string(), descriptor.clone());
        }
        Node::new(name, merge_metadata(&derived, metadata))
    }

    fn field_descriptor(&self, name: &str) -> Option<&Value> {
        let entity_name = name.split('.').next()?;
        let field_name = name.rsplit('.').next()?;
        let entity = self.entity(entity_name)?;

        entity.attributes.get(field_name).or_else(|| {
            entity
                .attributes
                .iter()
                .find(|(attr, _)| attr.eq_ignore_ascii_case(field_name))
                .map(|(_, descriptor)| descriptor)
        })
    }
}
