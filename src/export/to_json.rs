use crate::graph::Graph;
use std::error::Error;

pub fn render(graph: &Graph) -> Result<String, Box<dyn Error>> {
    Ok(serde_json::to_string_pretty(graph)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::demo;
    use crate::graph::{Edge, EdgeColor, Graph, RelationshipEdge};

    #[test]
    fn output_has_exactly_nodes_and_edges_keys() {
        let rendered = render(&demo::company_graph()).expect("render");
        let value: serde_json::Value = serde_json::from_str(&rendered).expect("valid JSON");
        let object = value.as_object().expect("top-level object");

        assert_eq!(object.len(), 2);
        assert!(object.contains_key("nodes"));
        assert!(object.contains_key("edges"));
    }

    #[test]
    fn formatting_is_two_space_indented() {
        let rendered = render(&demo::company_graph()).expect("render");
        assert!(rendered.starts_with("{\n  \"nodes\": [\n    {\n      \"id\": 1,"));
    }

    #[test]
    fn reserializing_parsed_output_is_byte_identical() {
        let rendered = render(&demo::company_graph()).expect("render");
        let reparsed: Graph = serde_json::from_str(&rendered).expect("valid graph");
        let rerendered = render(&reparsed).expect("render");
        assert_eq!(rendered, rerendered);
    }

    #[test]
    fn relationship_edge_field_order_is_stable() {
        let graph = Graph {
            nodes: vec![],
            edges: vec![Edge::Relationship(RelationshipEdge {
                from: 3,
                to: 2,
                label: "invested".to_string(),
                length: 150,
                strength: 8,
                color: EdgeColor {
                    color: "hsl(240, 70%, 50%)".to_string(),
                },
            })],
        };

        let rendered = render(&graph).expect("render");
        let compact: String = rendered.split_whitespace().collect();
        assert!(compact.contains(
            "{\"from\":3,\"to\":2,\"label\":\"invested\",\"length\":150,\"strength\":8,\"color\":{\"color\":\"hsl(240,70%,50%)\"}}"
        ));
    }
}
