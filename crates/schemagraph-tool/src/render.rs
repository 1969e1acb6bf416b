//! Text renderers for Mermaid, PlantUML, and Graphviz.
//!
//! Attribute lines are produced from node metadata entries whose value is an
//! object (an attribute descriptor such as `{"Type": "int", "IsKey": true}`);
//! scalar entries like `AttributeCount` or `System` are skipped.

use serde_json::{Map, Value};

use schemagraph_core::{Metadata, TemplateType};
use schemagraph_graph::GraphData;

use crate::plugins::INHERITS;

const TAB: &str = "  ";

/// Render `graph` with the given template.
pub fn render(graph: &GraphData, template: TemplateType) -> String {
    let mut out = String::new();
    match template {
        TemplateType::MermaidErd => render_mermaid_erd(graph, &mut out),
        TemplateType::MermaidClassDiagram => render_mermaid_class(graph, &mut out),
        TemplateType::PlantUmlClass => render_plantuml_class(graph, &mut out),
        TemplateType::GraphvizDiGraph => render_graphviz(graph, &mut out),
    }
    out
}

fn line(out: &mut String, depth: usize, text: &str) {
    for _ in 0..depth {
        out.push_str(TAB);
    }
    out.push_str(text);
    out.push('\n');
}

/// `(attribute, descriptor)` for every object-valued metadata entry.
fn attributes(metadata: &Metadata) -> impl Iterator<Item = (&String, &Map<String, Value>)> {
    metadata
        .iter()
        .filter_map(|(name, value)| value.as_object().map(|details| (name, details)))
}

fn type_name(details: &Map<String, Value>) -> String {
    match details.get("Type") {
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
        None => "unknown".to_string(),
    }
}

fn display_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn render_mermaid_erd(graph: &GraphData, out: &mut String) {
    line(out, 0, "erDiagram");

    for node in graph.nodes() {
        line(out, 1, &format!("{} {{", node.name()));
        for (attribute, details) in attributes(&node.metadata) {
            let is_key = details.get("IsKey").and_then(Value::as_bool).unwrap_or(false);
            let marker = if is_key { "PK" } else { "" };
            let text = format!("{} {} {}", type_name(details), attribute, marker);
            line(out, 2, text.trim_end());
        }
        line(out, 1, "}");
    }

    for edge in graph.edges() {
        let from = graph.node(edge.from()).name();
        let to = graph.node(edge.to()).name();
        line(out, 1, &format!("{from} ||--o| {to} : {}", edge.edge_key()));
    }
}

fn render_mermaid_class(graph: &GraphData, out: &mut String) {
    line(out, 0, "classDiagram");

    for node in graph.nodes() {
        line(out, 1, &format!("class {} {{", node.name()));

        if let Some(Value::Array(values)) = node.metadata.get("Values") {
            line(out, 2, "<<enumeration>>");
            for value in values {
                line(out, 2, &display_value(value));
            }
        } else {
            for (attribute, details) in attributes(&node.metadata) {
                line(out, 2, &format!("+{} {}", type_name(details), attribute));
            }
        }

        line(out, 1, "}");
    }

    for edge in graph.edges() {
        let from = graph.node(edge.from()).name();
        let to = graph.node(edge.to()).name();
        let arrow = if edge.edge_key() == INHERITS { "<|--" } else { "-->" };
        line(out, 1, &format!("{from} {arrow} {to} : {}", edge.edge_key()));
    }
}

fn render_plantuml_class(graph: &GraphData, out: &mut String) {
    line(out, 0, "@startuml");

    for node in graph.nodes() {
        line(out, 1, &format!("class {} {{", node.name()));
        for (attribute, details) in attributes(&node.metadata) {
            line(out, 2, &format!("{} : {}", attribute, type_name(details)));
        }
        line(out, 1, "}");
    }

    for edge in graph.edges() {
        let from = graph.node(edge.from()).name();
        let to = graph.node(edge.to()).name();
        line(out, 1, &format!("{from} --> {to} : {}", edge.edge_key()));
    }

    line(out, 0, "@enduml");
}

fn render_graphviz(graph: &GraphData, out: &mut String) {
    line(out, 0, "digraph G {");

    for node in graph.nodes() {
        line(out, 1, &format!("{0} [label=\"{0}\"];", node.name()));
    }

    for edge in graph.edges() {
        let from = graph.node(edge.from()).name();
        let to = graph.node(edge.to()).name();
        line(out, 1, &format!("{from} -> {to} [label=\"{}\"];", edge.edge_key()));
    }

    line(out, 0, "}");
}

#[cfg(test)]
mod tests {
    use super::*;
    use schemagraph_core::{Entity, PluginType, Relationship};
    use serde_json::json;

    use crate::plugins::{LineageMetadata, Plugin};

    fn erd() -> GraphData {
        let entities = vec![
            Entity::new("Users").with_attribute("Id", json!({"Type": "int", "IsKey": true})),
            Entity::new("Orders").with_attribute("UserId", json!({"Type": "int"})),
        ];
        let relationships = vec![Relationship::new("Users", "Orders", "UserId")];
        Plugin::for_type(PluginType::Erd, LineageMetadata::default()).populate(&entities, &relationships)
    }

    #[test]
    fn test_mermaid_erd() {
        let text = render(&erd(), TemplateType::MermaidErd);
        assert_eq!(
            text,
            "erDiagram\n\
             \x20 Users {\n\
             \x20   int Id PK\n\
             \x20 }\n\
             \x20 Orders {\n\
             \x20   int UserId\n\
             \x20 }\n\
             \x20 Users ||--o| Orders : UserId\n"
        );
    }

    #[test]
    fn test_mermaid_erd_missing_type_is_unknown() {
        let mut graph = GraphData::default();
        graph.update_node_metadata("T", "Blob", json!({"Nullable": true}));

        let text = render(&graph, TemplateType::MermaidErd);
        assert!(text.contains("    unknown Blob\n"));
        // Scalar defaults such as System are not attributes.
        assert!(!text.contains("System"));
    }

    #[test]
    fn test_mermaid_class_enum_and_inheritance() {
        let mut graph = GraphData::default();
        graph.update_node_metadata("Color", "Values", json!(["Red", "Green"]));
        graph.update_node_metadata("Dog", "Name", json!({"Type": "string"}));
        graph.find_or_add_edge("Animal", "Dog", "inherits");
        graph.find_or_add_edge("Dog", "Color", "has");

        let text = render(&graph, TemplateType::MermaidClassDiagram);
        assert!(text.starts_with("classDiagram\n"));
        assert!(text.contains("  class Color {\n    <<enumeration>>\n    Red\n    Green\n  }\n"));
        assert!(text.contains("  class Dog {\n    +string Name\n  }\n"));
        assert!(text.contains("  Animal <|-- Dog : inherits\n"));
        assert!(text.contains("  Dog --> Color : has\n"));
    }

    #[test]
    fn test_plantuml_class() {
        let text = render(&erd(), TemplateType::PlantUmlClass);
        assert!(text.starts_with("@startuml\n"));
        assert!(text.contains("  class Users {\n    Id : int\n  }\n"));
        assert!(text.contains("  Users --> Orders : UserId\n"));
        assert!(text.ends_with("@enduml\n"));
    }

    #[test]
    fn test_graphviz() {
        let text = render(&erd(), TemplateType::GraphvizDiGraph);
        assert_eq!(
            text,
            "digraph G {\n\
             \x20 Users [label=\"Users\"];\n\
             \x20 Orders [label=\"Orders\"];\n\
             \x20 Users -> Orders [label=\"UserId\"];\n\
             }\n"
        );
    }

    #[test]
    fn test_empty_graph() {
        let graph = GraphData::default();
        assert_eq!(render(&graph, TemplateType::MermaidErd), "erDiagram\n");
        assert_eq!(render(&graph, TemplateType::GraphvizDiGraph), "digraph G {\n}\n");
    }
}
