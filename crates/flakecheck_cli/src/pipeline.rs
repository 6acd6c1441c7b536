//! Shared pipeline helpers: configuration lookup and source file discovery.

use std::path::{Path, PathBuf};

use flakecheck_config::{find_config, load_config, load_config_from_str, CheckConfig};

use crate::GlobalArgs;

/// Loads the configuration selected by the global `--config` flag.
///
/// A file path is read directly, a directory must contain `flakecheck.toml`.
/// Without the flag the nearest `flakecheck.toml` above the current directory
/// is used, and the defaults apply when there is none.
pub fn resolve_config(global: &GlobalArgs) -> Result<CheckConfig, Box<dyn std::error::Error>> {
    if let Some(ref config_path) = global.config {
        let p = PathBuf::from(config_path);
        if p.is_file() {
            let content = std::fs::read_to_string(&p)?;
            return Ok(load_config_from_str(&content)?);
        }
        return Ok(load_config(&p)?);
    }
    match find_config(&std::env::current_dir()?) {
        Some(dir) => {
            log::debug!("using configuration in {}", dir.display());
            Ok(load_config(&dir)?)
        }
        None => Ok(CheckConfig::default()),
    }
}

/// Discovers Python files under each of `roots`, sorted by path.
///
/// Directories are walked recursively, skipping any directory whose name is
/// in `exclude`. A root that is a file is taken as is, whatever its extension.
pub fn discover_python_files(
    roots: &[PathBuf],
    exclude: &[String],
) -> Result<Vec<PathBuf>, Box<dyn std::error::Error>> {
    let mut files = Vec::new();
    for root in roots {
        if root.is_file() {
            files.push(root.clone());
        } else if root.is_dir() {
            walk_dir(root, exclude, &mut files)?;
        } else {
            return Err(format!("{}: no such file or directory", root.display()).into());
        }
    }
    files.sort();
    files.dedup();
    Ok(files)
}

/// Recursively walks a directory collecting Python source files.
fn walk_dir(
    dir: &Path,
    exclude: &[String],
    files: &mut Vec<PathBuf>,
) -> Result<(), Box<dyn std::error::Error>> {
    for entry in std::fs::read_dir(dir)? {
        let entry = entry?;
        let path = entry.path();
        if path.is_dir() {
            if is_excluded(&path, exclude) {
                log::debug!("skipping {}", path.display());
                continue;
            }
            walk_dir(&path, exclude, files)?;
        } else if is_python_file(&path) {
            files.push(path);
        }
    }
    Ok(())
}

fn is_excluded(dir: &Path, exclude: &[String]) -> bool {
    dir.file_name()
        .and_then(|name| name.to_str())
        .is_some_and(|name| exclude.iter().any(|e| e == name))
}

/// Returns `true` for paths with a `.py` extension.
pub fn is_python_file(path: &Path) -> bool {
    path.extension().and_then(|ext| ext.to_str()) == Some("py")
}
