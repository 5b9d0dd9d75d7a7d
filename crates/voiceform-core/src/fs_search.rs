//! Best-effort filesystem search for a spoken filename.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use glob::MatchOptions;
use tracing::debug;

/// How many ranked matches a search returns at most.
const MAX_MATCHES: usize = 5;

/// The usual places users keep files.
pub fn default_search_roots() -> Vec<PathBuf> {
    [
        dirs::home_dir(),
        dirs::desktop_dir(),
        dirs::document_dir(),
        dirs::download_dir(),
        dirs::picture_dir(),
        dirs::video_dir(),
    ]
    .into_iter()
    .flatten()
    .collect()
}

/// Search the given roots recursively for files matching a spoken name.
///
/// The name may be partial and may lack an extension; four glob patterns
/// cover exact, exact-plus-extension, contains, and contains-plus-extension.
/// Missing roots and traversal errors are silently skipped. Results are
/// deduplicated in discovery order, ranked, and capped to the best five.
pub fn search_files(roots: &[PathBuf], query: &str) -> Vec<PathBuf> {
    let patterns = [
        format!("**/{}", query),
        format!("**/{}.*", query),
        format!("**/*{}*", query),
        format!("**/*{}*.*", query),
    ];
    // Spoken input has arbitrary casing.
    let options = MatchOptions {
        case_sensitive: false,
        ..MatchOptions::default()
    };

    let mut seen = HashSet::new();
    let mut found = Vec::new();

    for root in roots {
        if !root.is_dir() {
            continue;
        }
        for pattern in &patterns {
            let Some(full) = root.join(pattern).to_str().map(str::to_string) else {
                continue;
            };
            let Ok(paths) = glob::glob_with(&full, options) else {
                continue;
            };
            for path in paths.flatten() {
                if path.is_file() && seen.insert(path.clone()) {
                    found.push(path);
                }
            }
        }
    }

    let query_lower = query.to_lowercase();
    found.sort_by_key(|p| rank(p, &query_lower));
    found.truncate(MAX_MATCHES);
    debug!(query, matches = found.len(), "file search done");
    found
}

/// Exact basename match < starts-with < contains < other. The sort is
/// stable, so ties keep discovery order.
fn rank(path: &Path, query_lower: &str) -> u8 {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().to_lowercase())
        .unwrap_or_default();
    if name == query_lower {
        0
    } else if name.starts_with(query_lower) {
        1
    } else if name.contains(query_lower) {
        2
    } else {
        3
    }
}

#[cfg(test)]
#[path = "fs_search_tests.rs"]
mod tests;
