use csv::StringRecord;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::data_loader::{PersonLoadProfile, RelationshipLoadProfile};
use crate::errors::LoadError;

/// Display weight assigned to every person node; the front end scales
/// node size from this value.
pub const DEFAULT_PERSON_VALUE: i64 = 10;

#[derive(Serialize, Deserialize, Clone, Debug, Default)]
pub struct Graph {
    pub nodes: Vec<Node>,
    pub edges: Vec<Edge>,
}

impl Graph {
    pub fn stats(&self) -> String {
        format!("Nodes: {}, Edges: {}", self.nodes.len(), self.edges.len())
    }

    /// Reports duplicate node ids and edges whose endpoints are missing
    /// from the node collection. Findings are advisory; the caller
    /// decides whether to proceed.
    pub fn verify_graph_integrity(&self) -> Result<(), Vec<String>> {
        let mut errors = Vec::new();

        let mut node_ids: HashSet<i64> = HashSet::new();
        for node in &self.nodes {
            if !node_ids.insert(node.id()) {
                errors.push(format!("Duplicate node id [{}]", node.id()));
            }
        }

        for edge in &self.edges {
            if !node_ids.contains(&edge.from_id()) {
                errors.push(format!(
                    "Edge [{} -> {}] source {} not found in nodes",
                    edge.from_id(),
                    edge.to_id(),
                    edge.from_id()
                ));
            }
            if !node_ids.contains(&edge.to_id()) {
                errors.push(format!(
                    "Edge [{} -> {}] target {} not found in nodes",
                    edge.from_id(),
                    edge.to_id(),
                    edge.to_id()
                ));
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

// Variant order matters: serde tries Person/Relationship first, and a
// person object is never a valid company object (and vice versa).
#[derive(Serialize, Deserialize, Clone, Debug)]
#[serde(untagged)]
pub enum Node {
    Person(PersonNode),
    Company(CompanyNode),
}

impl Node {
    pub fn id(&self) -> i64 {
        match self {
            Node::Person(n) => n.id,
            Node::Company(n) => n.id,
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct PersonNode {
    pub id: i64,
    pub label: String,
    pub value: i64,
    pub notable_company: String,
    pub types: Vec<String>,
    pub gender: String,
    pub photo_url: Option<String>,
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct CompanyNode {
    pub id: i64,
    pub label: String,
    pub value: i64,
}

#[derive(Serialize, Deserialize, Clone, Debug)]
#[serde(untagged)]
pub enum Edge {
    Relationship(RelationshipEdge),
    Simple(SimpleEdge),
}

impl Edge {
    pub fn from_id(&self) -> i64 {
        match self {
            Edge::Relationship(e) => e.from,
            Edge::Simple(e) => e.from,
        }
    }

    pub fn to_id(&self) -> i64 {
        match self {
            Edge::Relationship(e) => e.to,
            Edge::Simple(e) => e.to,
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct RelationshipEdge {
    pub from: i64,
    pub to: i64,
    pub label: String,
    pub length: i64,
    pub strength: i64,
    pub color: EdgeColor,
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct SimpleEdge {
    pub from: i64,
    pub to: i64,
    pub label: String,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct EdgeColor {
    pub color: String,
}

/// Spring length for the renderer; stronger ties pull their endpoints
/// closer together. Strength 10 maps to 50, strength 1 to 500.
pub fn edge_length(strength: i64) -> i64 {
    50 + (10 - strength) * 50
}

/// Hue rotates 30 degrees per strength point; saturation and lightness
/// are fixed.
pub fn edge_color(strength: i64) -> EdgeColor {
    EdgeColor {
        color: format!("hsl({}, 70%, 50%)", strength * 30),
    }
}

fn strip_quotes_and_whitespace(s: &str) -> &str {
    let trimmed = s.trim();
    if (trimmed.starts_with('"') && trimmed.ends_with('"'))
        || (trimmed.starts_with('\'') && trimmed.ends_with('\''))
    {
        trimmed[1..trimmed.len() - 1].trim()
    } else {
        trimmed
    }
}

fn get_stripped_value(
    record: &StringRecord,
    idx: usize,
    field: &'static str,
    row: usize,
) -> Result<String, LoadError> {
    let value = record
        .get(idx)
        .ok_or(LoadError::MissingField { field, row })?;
    Ok(strip_quotes_and_whitespace(value).to_string())
}

fn get_numeric_value(
    record: &StringRecord,
    idx: usize,
    field: &'static str,
    row: usize,
) -> Result<i64, LoadError> {
    let value = get_stripped_value(record, idx, field, row)?;
    value
        .parse::<i64>()
        .map_err(|_| LoadError::InvalidNumber { field, row, value })
}

impl Node {
    /// `row` is the 1-based data row number, used in diagnostics.
    pub fn person_from_record(
        record: &StringRecord,
        profile: &PersonLoadProfile,
        row: usize,
    ) -> Result<Self, LoadError> {
        let types = [profile.type1_column, profile.type2_column]
            .iter()
            .filter_map(|&idx| record.get(idx))
            .map(|t| strip_quotes_and_whitespace(t).to_string())
            .filter(|t| !t.is_empty())
            .collect();

        let photo_url = {
            let photo_url = get_stripped_value(record, profile.photo_url_column, "photo_url", row)?;
            if photo_url.is_empty() {
                None
            } else {
                Some(photo_url)
            }
        };

        Ok(Node::Person(PersonNode {
            id: get_numeric_value(record, profile.id_column, "id", row)?,
            label: get_stripped_value(record, profile.label_column, "label", row)?,
            value: DEFAULT_PERSON_VALUE,
            notable_company: get_stripped_value(
                record,
                profile.notable_company_column,
                "notable_company",
                row,
            )?,
            types,
            gender: get_stripped_value(record, profile.gender_column, "gender", row)?,
            photo_url,
        }))
    }
}

impl Edge {
    /// `row` is the 1-based data row number, used in diagnostics.
    pub fn relationship_from_record(
        record: &StringRecord,
        profile: &RelationshipLoadProfile,
        row: usize,
    ) -> Result<Self, LoadError> {
        let strength = get_numeric_value(record, profile.strength_column, "strength", row)?;

        Ok(Edge::Relationship(RelationshipEdge {
            from: get_numeric_value(record, profile.source_column, "source", row)?,
            to: get_numeric_value(record, profile.target_column, "target", row)?,
            label: get_stripped_value(record, profile.label_column, "relationship", row)?,
            length: edge_length(strength),
            strength,
            color: edge_color(strength),
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn person_profile() -> PersonLoadProfile {
        PersonLoadProfile::from_headers(&[
            "id".to_string(),
            "label".to_string(),
            "notable_company".to_string(),
            "type1".to_string(),
            "type2".to_string(),
            "gender".to_string(),
            "photo_url".to_string(),
        ])
        .expect("all columns present")
    }

    fn relationship_profile() -> RelationshipLoadProfile {
        RelationshipLoadProfile::from_headers(&[
            "source".to_string(),
            "target".to_string(),
            "relationship".to_string(),
            "strength".to_string(),
        ])
        .expect("all columns present")
    }

    fn record(fields: &[&str]) -> StringRecord {
        StringRecord::from(fields.to_vec())
    }

    #[test]
    fn test_edge_length() {
        assert_eq!(edge_length(10), 50);
        assert_eq!(edge_length(5), 300);
        assert_eq!(edge_length(1), 500);

        // monotonically decreasing as strength rises
        for strength in 2..=10 {
            assert!(edge_length(strength) < edge_length(strength - 1));
        }
    }

    #[test]
    fn test_edge_color() {
        assert_eq!(edge_color(4).color, "hsl(120, 70%, 50%)");
        assert_eq!(edge_color(8).color, "hsl(240, 70%, 50%)");
        assert_eq!(edge_color(10).color, "hsl(300, 70%, 50%)");
    }

    #[test]
    fn test_strip_quotes_and_whitespace() {
        assert_eq!(strip_quotes_and_whitespace("  plain  "), "plain");
        assert_eq!(strip_quotes_and_whitespace("\" quoted \""), "quoted");
        assert_eq!(strip_quotes_and_whitespace("'single'"), "single");
        assert_eq!(strip_quotes_and_whitespace(""), "");
    }

    #[test]
    fn person_keeps_both_types_in_order() {
        let node = Node::person_from_record(
            &record(&[
                "1",
                "Ada Lovelace",
                "Analytical Engines",
                "Founder",
                "Mathematician",
                "female",
                "https://example.com/ada.jpg",
            ]),
            &person_profile(),
            1,
        )
        .expect("valid record");

        match node {
            Node::Person(person) => {
                assert_eq!(person.id, 1);
                assert_eq!(person.label, "Ada Lovelace");
                assert_eq!(person.value, DEFAULT_PERSON_VALUE);
                assert_eq!(person.notable_company, "Analytical Engines");
                assert_eq!(person.types, vec!["Founder", "Mathematician"]);
                assert_eq!(person.gender, "female");
                assert_eq!(
                    person.photo_url.as_deref(),
                    Some("https://example.com/ada.jpg")
                );
            }
            Node::Company(_) => panic!("expected a person node"),
        }
    }

    #[test]
    fn person_drops_blank_types() {
        let node = Node::person_from_record(
            &record(&["2", "Grace Hopper", "Navy", "Founder", "", "female", ""]),
            &person_profile(),
            2,
        )
        .expect("valid record");

        match node {
            Node::Person(person) => {
                assert_eq!(person.types, vec!["Founder"]);
                assert_eq!(person.photo_url, None);
            }
            Node::Company(_) => panic!("expected a person node"),
        }
    }

    #[test]
    fn person_photo_url_is_trimmed() {
        let node = Node::person_from_record(
            &record(&[
                "3",
                "Alan Turing",
                "NPL",
                "",
                "",
                "male",
                "  https://example.com/alan.jpg  ",
            ]),
            &person_profile(),
            3,
        )
        .expect("valid record");

        match node {
            Node::Person(person) => {
                assert!(person.types.is_empty());
                assert_eq!(
                    person.photo_url.as_deref(),
                    Some("https://example.com/alan.jpg")
                );
            }
            Node::Company(_) => panic!("expected a person node"),
        }
    }

    #[test]
    fn whitespace_only_photo_url_is_none() {
        let node = Node::person_from_record(
            &record(&["4", "Edsger Dijkstra", "THE", "", "", "male", "   "]),
            &person_profile(),
            4,
        )
        .expect("valid record");

        match node {
            Node::Person(person) => assert_eq!(person.photo_url, None),
            Node::Company(_) => panic!("expected a person node"),
        }
    }

    #[test]
    fn person_with_non_numeric_id_fails_with_row() {
        let err = Node::person_from_record(
            &record(&["abc", "Ada", "X", "", "", "female", ""]),
            &person_profile(),
            7,
        )
        .expect_err("non-numeric id");

        match err {
            LoadError::InvalidNumber { field, row, value } => {
                assert_eq!(field, "id");
                assert_eq!(row, 7);
                assert_eq!(value, "abc");
            }
            other => panic!("unexpected error: {}", other),
        }
    }

    #[test]
    fn relationship_derives_length_and_color() {
        let edge = Edge::relationship_from_record(
            &record(&["3", "2", "invested", "8"]),
            &relationship_profile(),
            1,
        )
        .expect("valid record");

        match edge {
            Edge::Relationship(edge) => {
                assert_eq!(edge.from, 3);
                assert_eq!(edge.to, 2);
                assert_eq!(edge.label, "invested");
                assert_eq!(edge.length, edge_length(8));
                assert_eq!(edge.strength, 8);
                assert_eq!(edge.color.color, "hsl(240, 70%, 50%)");
            }
            Edge::Simple(_) => panic!("expected a relationship edge"),
        }
    }

    #[test]
    fn relationship_with_non_numeric_strength_fails_with_row() {
        let err = Edge::relationship_from_record(
            &record(&["1", "2", "knows", "strong"]),
            &relationship_profile(),
            12,
        )
        .expect_err("non-numeric strength");

        match err {
            LoadError::InvalidNumber { field, row, value } => {
                assert_eq!(field, "strength");
                assert_eq!(row, 12);
                assert_eq!(value, "strong");
            }
            other => panic!("unexpected error: {}", other),
        }
    }

    #[test]
    fn test_verify_graph_integrity() {
        let graph = Graph {
            nodes: vec![
                Node::Person(PersonNode {
                    id: 1,
                    label: "Ada".to_string(),
                    value: DEFAULT_PERSON_VALUE,
                    notable_company: "Analytical Engines".to_string(),
                    types: vec![],
                    gender: "female".to_string(),
                    photo_url: None,
                }),
                Node::Person(PersonNode {
                    id: 1,
                    label: "Ada again".to_string(),
                    value: DEFAULT_PERSON_VALUE,
                    notable_company: "Analytical Engines".to_string(),
                    types: vec![],
                    gender: "female".to_string(),
                    photo_url: None,
                }),
            ],
            edges: vec![Edge::Simple(SimpleEdge {
                from: 1,
                to: 99,
                label: "knows".to_string(),
            })],
        };

        let errors = graph.verify_graph_integrity().expect_err("two findings");
        assert_eq!(errors.len(), 2);
        assert!(errors[0].contains("Duplicate node id"));
        assert!(errors[1].contains("target 99 not found"));
    }

    #[test]
    fn integrity_passes_for_consistent_graph() {
        let graph = Graph {
            nodes: vec![
                Node::Company(CompanyNode {
                    id: 1,
                    label: "Meta".to_string(),
                    value: 10,
                }),
                Node::Company(CompanyNode {
                    id: 2,
                    label: "Scale AI".to_string(),
                    value: 8,
                }),
            ],
            edges: vec![Edge::Simple(SimpleEdge {
                from: 1,
                to: 2,
                label: "acquired".to_string(),
            })],
        };

        assert!(graph.verify_graph_integrity().is_ok());
        assert_eq!(graph.stats(), "Nodes: 2, Edges: 1");
    }
}
