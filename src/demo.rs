use crate::graph::{CompanyNode, Edge, Graph, Node, SimpleEdge};

/// Built-in company investment graph. Lets the front end be exercised
/// without any input tables.
pub fn company_graph() -> Graph {
    fn company(id: i64, label: &str, value: i64) -> Node {
        Node::Company(CompanyNode {
            id,
            label: label.to_string(),
            value,
        })
    }

    fn relation(from: i64, to: i64, label: &str) -> Edge {
        Edge::Simple(SimpleEdge {
            from,
            to,
            label: label.to_string(),
        })
    }

    Graph {
        nodes: vec![
            company(1, "Meta", 10),
            company(2, "Scale AI", 8),
            company(3, "a16z", 9),
            company(4, "OpenAI", 9),
        ],
        edges: vec![
            relation(3, 2, "invested"),
            relation(1, 2, "acquired"),
            relation(3, 4, "invested"),
        ],
    }
}
