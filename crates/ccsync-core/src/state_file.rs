// Local JSON artifacts of the state snapshot.
//
// Files are pretty-printed with 4-space indentation and keys in insertion
// order, so consecutive runs against an unchanged network produce
// byte-identical files and the state repository only records real changes.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::ser::PrettyFormatter;

use crate::error::CoreError;
use crate::model::StateFile;

pub const DEVICE_INVENTORY_FILE: &str = "device_inventory.json";
pub const AP_INVENTORY_FILE: &str = "ap_inventory.json";
pub const SITE_HIERARCHY_FILE: &str = "site_hierarchy.json";
pub const NETWORK_SETTINGS_FILE: &str = "network_settings.json";
pub const REPORT_FILE: &str = "report.json";

/// Serialize `value` to a 4-space indented JSON string.
pub fn to_pretty_json<T: Serialize + ?Sized>(name: &str, value: &T) -> Result<String, CoreError> {
    let mut buf = Vec::new();
    let mut ser = serde_json::Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(b"    "));
    value
        .serialize(&mut ser)
        .map_err(|e| CoreError::json(name, e))?;
    String::from_utf8(buf).map_err(|e| CoreError::io(name, std::io::Error::other(e)))
}

/// Write `value` as `{dir}/{name}`, replacing any previous file.
pub fn write_json<T: Serialize + ?Sized>(dir: &Path, name: &str, value: &T) -> Result<StateFile, CoreError> {
    let content = to_pretty_json(name, value)?;
    let path = dir.join(name);
    fs::write(&path, &content).map_err(|e| CoreError::io(&path, e))?;
    Ok(StateFile {
        name: name.to_owned(),
        path,
        content,
    })
}

pub fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, CoreError> {
    let raw = fs::read_to_string(path).map_err(|e| CoreError::io(path, e))?;
    serde_json::from_str(&raw).map_err(|e| CoreError::json(path.display().to_string(), e))
}

/// Create `dir` and any missing parents.
pub fn ensure_dir(dir: &Path) -> Result<(), CoreError> {
    fs::create_dir_all(dir).map_err(|e| CoreError::io(dir, e))
}

/// Delete `path` if it exists. Returns whether a file was removed.
pub fn remove_stale(path: &Path) -> Result<bool, CoreError> {
    match fs::remove_file(path) {
        Ok(()) => Ok(true),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(false),
        Err(e) => Err(CoreError::io(path, e)),
    }
}

/// Regular files directly inside `dir`, sorted by file name.
///
/// Leftovers from earlier runs are included; subdirectories are not.
pub fn list_regular_files(dir: &Path) -> Result<Vec<PathBuf>, CoreError> {
    let entries = fs::read_dir(dir).map_err(|e| CoreError::io(dir, e))?;
    let mut files = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| CoreError::io(dir, e))?;
        let file_type = entry.file_type().map_err(|e| CoreError::io(entry.path(), e))?;
        if file_type.is_file() {
            files.push(entry.path());
        }
    }
    files.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    Ok(files)
}
