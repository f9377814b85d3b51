use serde::{Deserialize, Serialize};

/// ## Structure
/// This module contains the data structures for the plan file.
///
/// ```text
/// Plan
///   ├── meta: Option<Meta>
///   │   └── name: Option<String>
///   ├── import: ImportConfig
///   │   └── profiles: Vec<ImportProfile>
///   │       ├── filename: String
///   │       └── filetype: ImportFileType
///   │           ├── People
///   │           └── Relationships
///   └── export: ExportProfile
///       └── profiles: Vec<ExportProfileItem>
///           ├── filename: String
///           └── exporter: ExportFileType
///               └── JSON
/// ```

#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub struct Meta {
    pub name: Option<String>,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct Plan {
    pub meta: Option<Meta>,
    pub import: ImportConfig,
    pub export: ExportProfile,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default)]
pub struct ImportConfig {
    pub profiles: Vec<ImportProfile>,
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub enum ImportFileType {
    People,
    Relationships,
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct ImportProfile {
    pub filename: String,
    pub filetype: ImportFileType,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default)]
pub struct ExportProfile {
    pub profiles: Vec<ExportProfileItem>,
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct ExportProfileItem {
    pub filename: String,
    pub exporter: ExportFileType,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub enum ExportFileType {
    JSON,
}

impl Default for Plan {
    /// The built-in plan: read `people.csv` and `relationships.csv` from
    /// the plan directory, write `graph_data.json` next to them.
    fn default() -> Self {
        Self {
            meta: Some(Meta {
                name: Some("People network".to_string()),
            }),
            import: ImportConfig {
                profiles: vec![
                    ImportProfile {
                        filename: "people.csv".to_string(),
                        filetype: ImportFileType::People,
                    },
                    ImportProfile {
                        filename: "relationships.csv".to_string(),
                        filetype: ImportFileType::Relationships,
                    },
                ],
            },
            export: ExportProfile {
                profiles: vec![ExportProfileItem {
                    filename: "graph_data.json".to_string(),
                    exporter: ExportFileType::JSON,
                }],
            },
        }
    }
}
