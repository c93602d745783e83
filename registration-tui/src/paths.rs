//! Platform-specific directory paths.
//!
//! Uses XDG on Linux, standard locations on macOS/Windows.

use std::fs;
use std::path::Path;
use std::path::PathBuf;

use directories::ProjectDirs;

const QUALIFIER: &str = "org";
const ORGANIZATION: &str = "registration-form";
const APPLICATION: &str = "registration";

const LATEST_LOG: &str = "latest.log";

/// Maximum number of archived log files to keep.
const MAX_OLD_LOGS: usize = 25;

fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from(QUALIFIER, ORGANIZATION, APPLICATION)
}

/// Get the cache directory, where logs live.
///
/// - Linux: `$XDG_CACHE_HOME/registration` or `~/.cache/registration`
/// - macOS: `~/Library/Caches/org.registration-form.registration`
/// - Windows: `C:\Users\<User>\AppData\Local\registration-form\registration\cache`
pub fn cache_dir() -> Option<PathBuf> {
    project_dirs().map(|dirs| dirs.cache_dir().to_path_buf())
}

/// Get the path to the latest log file.
pub fn log_file() -> Option<PathBuf> {
    cache_dir().map(|dir| dir.join(LATEST_LOG))
}

/// Archive `latest.log` under a timestamped name and prune old archives.
///
/// Call this at startup before creating the new log file.
pub fn rotate_logs() {
    let Some(cache) = cache_dir() else { return };
    rotate_logs_in(&cache, MAX_OLD_LOGS);
}

fn rotate_logs_in(dir: &Path, keep: usize) {
    let latest = dir.join(LATEST_LOG);
    if latest.exists() {
        let timestamp = chrono::Local::now().format("%Y%m%d_%H%M%S");
        let _ = fs::rename(&latest, dir.join(format!("{}.log", timestamp)));
    }
    cleanup_old_logs(dir, keep);
}

/// Remove archived logs, keeping only the `keep` most recent.
fn cleanup_old_logs(dir: &Path, keep: usize) {
    let Ok(entries) = fs::read_dir(dir) else { return };

    let mut logs: Vec<_> = entries
        .filter_map(|e| e.ok())
        .filter(|e| {
            let name = e.file_name();
            let name = name.to_string_lossy();
            name.ends_with(".log") && name != LATEST_LOG
        })
        .collect();

    // Oldest first
    logs.sort_by_key(|e| e.metadata().and_then(|m| m.modified()).ok());

    if logs.len() > keep {
        for entry in logs.iter().take(logs.len() - keep) {
            let _ = fs::remove_file(entry.path());
        }
    }
}
