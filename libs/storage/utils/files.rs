use std::path::{Path, PathBuf};

pub fn add_file_extension(path_buf: &mut PathBuf, extension: &str) {
    // Check if the current extension is the same as the provided one, if not, append the provided extension.
    match path_buf.extension() {
        Some(current_extension) if current_extension == extension => {}
        _ => {
            if let Some(name) = path_buf.file_name() {
                let new_name = format!("{}.{}", name.to_string_lossy(), extension);
                path_buf.set_file_name(new_name);
            }
        }
    }
}

/// Stems of the files of `path` having the given extension, sorted. A missing
/// directory is an empty collection.
pub async fn list_file_stems(path: &Path, extension: &str) -> std::io::Result<Vec<String>> {
    if !tokio::fs::try_exists(path).await? {
        return Ok(Vec::new());
    }

    let mut stems = Vec::new();
    let mut entries = tokio::fs::read_dir(path).await?;
    while let Some(entry) = entries.next_entry().await? {
        let path = entry.path();
        if !entry.file_type().await?.is_file() {
            continue;
        }
        if path.extension().and_then(|e| e.to_str()) != Some(extension) {
            continue;
        }
        if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
            stems.push(stem.to_string());
        }
    }

    stems.sort();
    Ok(stems)
}
