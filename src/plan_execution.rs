use crate::common;
use crate::data_loader;
use crate::export;
use crate::graph::{Edge, Graph, Node};
use crate::plan::{ExportFileType, ExportProfileItem, ImportFileType, Plan};
use notify::{Config, EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use std::path::{Path, PathBuf};
use std::sync::mpsc::channel;
use tracing::{debug, error, info, warn};

use anyhow::{anyhow, Result};
use csv::StringRecord;

use crate::errors::LoadError;

/// Loads a data file from disk, supporting CSV and TSV formats
fn load_file(file_path: &str) -> Result<(Vec<String>, Vec<StringRecord>)> {
    let extension = std::path::Path::new(file_path)
        .extension()
        .and_then(std::ffi::OsStr::to_str)
        .unwrap_or("");

    let separator = match extension {
        "csv" => b',',
        "tsv" => b'\t',
        _ => {
            error!("Error: unsupported extension {}", extension);
            return Err(LoadError::UnsupportedExtension(extension.to_string()).into());
        }
    };

    let headers = data_loader::get_headers_from_file(file_path, separator)?;
    let records = match separator {
        b',' => data_loader::load_csv(file_path),
        _ => data_loader::load_tsv(file_path),
    }?;

    debug!(
        "Loaded {} records with headers: {:?}",
        records.len(),
        headers
    );
    Ok((headers, records))
}

/// Loads data from import profiles into the graph
fn load_data_into_graph(graph: &mut Graph, plan: &Plan, plan_file_path: &Path) -> Result<()> {
    for profile in &plan.import.profiles {
        let parent_dir = plan_file_path
            .parent()
            .ok_or_else(|| anyhow!("Plan file has no parent directory"))?;
        let import_file_path = parent_dir.join(&profile.filename);
        info!(
            "Importing file: {} as {:?}",
            import_file_path.display(),
            profile.filetype
        );

        let file_path_str = import_file_path.to_str().ok_or_else(|| {
            anyhow!(
                "Import file path contains invalid UTF-8: {}",
                import_file_path.display()
            )
        })?;
        let (headers, records) = load_file(file_path_str)?;

        match profile.filetype {
            ImportFileType::People => {
                let person_profile = data_loader::PersonLoadProfile::from_headers(&headers)?;
                info!("{}", person_profile);
                for (idx, record) in records.iter().enumerate() {
                    let node = Node::person_from_record(record, &person_profile, idx + 1)?;
                    graph.nodes.push(node);
                }
            }
            ImportFileType::Relationships => {
                let relationship_profile =
                    data_loader::RelationshipLoadProfile::from_headers(&headers)?;
                info!("{}", relationship_profile);
                for (idx, record) in records.iter().enumerate() {
                    let edge = Edge::relationship_from_record(record, &relationship_profile, idx + 1)?;
                    graph.edges.push(edge);
                }
            }
        }
    }

    info!(
        "Graph loaded with {} nodes and {} edges",
        graph.nodes.len(),
        graph.edges.len()
    );

    Ok(())
}

/// Exports the graph to the specified file using the appropriate renderer
fn export_graph(graph: &Graph, profile: &ExportProfileItem, plan_file_path: &Path) -> Result<()> {
    info!(
        "Starting export to file: {} using exporter {:?}",
        profile.filename, profile.exporter
    );

    let parent_dir = plan_file_path
        .parent()
        .ok_or_else(|| anyhow!("Plan file has no parent directory"))?;
    let export_file_path = parent_dir.join(&profile.filename);
    let file_path_str = export_file_path.to_str().ok_or_else(|| {
        anyhow!(
            "Export file path contains invalid UTF-8: {}",
            export_file_path.display()
        )
    })?;

    let output = match profile.exporter {
        ExportFileType::JSON => export::to_json::render(graph)
            .map_err(|e| anyhow!("Failed to render JSON: {}", e))?,
    };

    common::write_string_to_file(file_path_str, &output)?;
    info!("{} created", export_file_path.display());

    Ok(())
}

/// Executes a single export plan
fn run_plan(plan: &Plan, plan_file_path: &Path) -> Result<()> {
    let mut graph = Graph::default();
    load_data_into_graph(&mut graph, plan, plan_file_path)?;

    // Dangling edge endpoints and duplicate ids are reported but do not
    // block the export; the renderer tolerates them.
    if let Err(errors) = graph.verify_graph_integrity() {
        warn!("Identified {} graph integrity issue(s)", errors.len());
        errors.iter().for_each(|e| warn!("{}", e));
    } else {
        debug!("Graph integrity verified: ok");
    }

    debug!("Graph stats {}", graph.stats());

    for profile in &plan.export.profiles {
        export_graph(&graph, profile, plan_file_path)?;
    }

    Ok(())
}

/// Main function to execute a plan, with optional file watching. With no
/// plan path, the built-in default plan runs against the working
/// directory.
pub fn execute_plan(plan_path: Option<String>, watch: bool) -> Result<()> {
    let (plan, plan_file_path) = match plan_path {
        Some(path) => {
            info!("Executing plan {}", path);
            let plan_file_path = PathBuf::from(&path);
            let path_content = std::fs::read_to_string(&plan_file_path)?;
            let plan: Plan = serde_yaml::from_str(&path_content)?;
            (plan, plan_file_path)
        }
        None => {
            info!("No plan file given, using built-in defaults");
            (Plan::default(), PathBuf::from("plan.yaml"))
        }
    };

    debug!("Executing plan: {:?}", plan);
    run_plan(&plan, &plan_file_path)?;

    if watch {
        watch_for_changes(plan, &plan_file_path)?;
    }

    Ok(())
}

/// Sets up file watching for input files to re-run the plan on changes
fn watch_for_changes(plan: Plan, plan_file_path: &Path) -> Result<()> {
    info!("Watching for changes");
    let files: Vec<String> = plan
        .import
        .profiles
        .iter()
        .map(|profile| profile.filename.clone())
        .collect();

    let (tx, rx) = channel();
    let mut watcher = RecommendedWatcher::new(tx, Config::default())?;
    for file in &files {
        let parent_dir = plan_file_path
            .parent()
            .ok_or_else(|| anyhow!("Plan file has no parent directory"))?;
        let path = parent_dir.join(file);
        watcher.watch(&path, RecursiveMode::NonRecursive)?;
    }

    loop {
        match rx.recv() {
            Ok(event) => {
                if let Ok(event) = event {
                    if let EventKind::Modify(_) = event.kind {
                        debug!("File modified {:?}", event.paths);
                        info!("Change detected, re-executing plan");
                        run_plan(&plan, plan_file_path)?;
                    }
                }
            }
            Err(e) => error!("Watch error: {:?}", e),
        }
    }
}
