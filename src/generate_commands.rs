use include_dir::{include_dir, Dir};
use std::fs;
use std::path::Path;
use tracing::{error, info};

static SAMPLE_DIR_PEOPLE_NETWORK: Dir = include_dir!("sample/people_network");

/// Materializes an embedded sample project (input tables plus plan) into
/// `dir`, so a first run works without hand-writing any files.
pub fn generate_sample(sample: String, dir: String) {
    info!("Generating sample project: {:?} in {:?}", sample, dir);
    let target_path = Path::new(&dir);
    if let Err(e) = fs::create_dir_all(target_path) {
        error!("Failed to create target directory: {:?}", e);
        return;
    }

    fn write_dir_contents(dir: &Dir, target_path: &Path) {
        for file in dir.files() {
            let relative_path = match file.path().strip_prefix(dir.path()) {
                Ok(path) => path,
                Err(e) => {
                    error!(
                        "Failed to create relative path for {:?}: {}",
                        file.path(),
                        e
                    );
                    continue;
                }
            };
            let target_file_path = target_path.join(relative_path);

            if let Some(parent) = target_file_path.parent() {
                if let Err(e) = fs::create_dir_all(parent) {
                    error!("Failed to create directory: {:?}", e);
                    return;
                }
            }

            if let Err(e) = fs::write(&target_file_path, file.contents()) {
                error!("Failed to write file: {:?}", e);
                return;
            }
        }

        for sub_dir in dir.dirs() {
            let relative_path = match sub_dir.path().strip_prefix(dir.path()) {
                Ok(path) => path,
                Err(e) => {
                    error!(
                        "Failed to create relative path for {:?}: {}",
                        sub_dir.path(),
                        e
                    );
                    continue;
                }
            };
            let sub_dir_path = target_path.join(relative_path);
            if let Err(e) = fs::create_dir_all(&sub_dir_path) {
                error!("Failed to create subdirectory: {:?}", e);
                return;
            }
            write_dir_contents(sub_dir, &sub_dir_path);
        }
    }

    match sample.to_lowercase().as_str() {
        "people-network" => write_dir_contents(&SAMPLE_DIR_PEOPLE_NETWORK, target_path),
        "people_network" => write_dir_contents(&SAMPLE_DIR_PEOPLE_NETWORK, target_path),
        _ => {
            error!("Unsupported sample: {} - use people-network", sample);
            return;
        }
    }

    info!("Sample project generated successfully at: {:?}", dir);
}
