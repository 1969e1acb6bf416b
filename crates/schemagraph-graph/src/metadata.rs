//! Metadata helpers: merging, entity conversion, and dotted-name defaults.

use schemagraph_core::{Entity, Metadata};
use serde_json::Value;

/// Fallback for a dotted segment that is not present.
pub const UNKNOWN: &str = "Unknown";

/// Merge `extra` over `base`. Keys in `extra` win on conflict.
pub fn merge_metadata(base: &Metadata, extra: Option<&Metadata>) -> Metadata {
    let mut merged = base.clone();
    if let Some(extra) = extra {
        merge_into(&mut merged, extra);
    }
    merged
}

/// In-place variant of [`merge_metadata`].
pub fn merge_into(target: &mut Metadata, extra: &Metadata) {
    for (key, value) in extra {
        target.insert(key.clone(), value.clone());
    }
}

/// An entity's attributes plus a derived `AttributeCount`.
pub fn entity_to_metadata(entity: &Entity) -> Metadata {
    let mut metadata = entity.attributes.clone();
    metadata.insert(
        "AttributeCount".to_string(),
        Value::from(entity.attributes.len()),
    );
    metadata
}

/// Default metadata for a node with no catalog entry.
///
/// `system.table.field` names fill `System`, `Table` and `Field`; missing
/// segments become `"Unknown"` and anything past the third is ignored.
pub fn dynamic_metadata(name: &str) -> Metadata {
    let mut parts = name.split('.');
    let mut metadata = Metadata::new();
    for key in ["System", "Table", "Field"] {
        let segment = parts.next().unwrap_or(UNKNOWN);
        metadata.insert(key.to_string(), Value::from(segment));
    }
    metadata
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn meta(value: Value) -> Metadata {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn test_merge_extra_wins() {
        let base = meta(json!({"a": 1, "keep": true}));
        let extra = meta(json!({"a": 2, "b": 3}));

        let merged = merge_metadata(&base, Some(&extra));
        assert_eq!(Value::Object(merged), json!({"a": 2, "b": 3, "keep": true}));
    }

    #[test]
    fn test_merge_without_extra_is_copy() {
        let base = meta(json!({"a": 1}));
        assert_eq!(merge_metadata(&base, None), base);
    }

    #[test]
    fn test_entity_to_metadata_counts_attributes() {
        let entity = Entity::new("Users")
            .with_attribute("Id", json!({"Type": "int", "IsKey": true}))
            .with_attribute("Email", json!({"Type": "string"}));

        let metadata = entity_to_metadata(&entity);
        assert_eq!(metadata["AttributeCount"], json!(2));
        assert_eq!(metadata["Id"]["IsKey"], json!(true));
        assert_eq!(metadata.len(), 3);
    }

    #[test]
    fn test_dynamic_metadata_full_name() {
        let metadata = dynamic_metadata("crm.customers.email");
        assert_eq!(
            Value::Object(metadata),
            json!({"System": "crm", "Table": "customers", "Field": "email"})
        );
    }

    #[test]
    fn test_dynamic_metadata_missing_segments() {
        let metadata = dynamic_metadata("Orders");
        assert_eq!(metadata["System"], json!("Orders"));
        assert_eq!(metadata["Table"], json!("Unknown"));
        assert_eq!(metadata["Field"], json!("Unknown"));
    }

    #[test]
    fn test_dynamic_metadata_ignores_extra_segments() {
        let metadata = dynamic_metadata("a.b.c.d");
        assert_eq!(metadata["Field"], json!("c"));
        assert_eq!(metadata.len(), 3);
    }
}
