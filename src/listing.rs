//! Folder listing
//!
//! Reads the immediate children of a directory together with the metadata
//! the file browser shows. Entries are sorted by name.

use crate::types::{FolioError, Result};
use chrono::{DateTime, Utc};
use futures::future::join_all;
use path_clean::PathClean;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{debug, warn};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileInfo {
    pub name: String,
    pub path: PathBuf,
    pub is_directory: bool,
    pub size: u64,
    pub modified_time: DateTime<Utc>,
}

pub async fn read_folder(folder: &Path) -> Result<Vec<FileInfo>> {
    if folder.as_os_str().is_empty() {
        return Err(FolioError::InvalidPath(folder.to_path_buf()));
    }
    let folder = folder.to_path_buf().clean();
    debug!("Reading folder: {}", folder.display());

    let mut dir = fs::read_dir(&folder).await?;
    let mut paths = Vec::new();
    while let Some(entry) = dir.next_entry().await? {
        paths.push(entry.path());
    }

    let infos = join_all(paths.into_iter().map(stat_entry)).await;

    let mut contents = Vec::with_capacity(infos.len());
    for info in infos {
        match info {
            Ok(info) => contents.push(info),
            // Entries can vanish or be unreadable between listing and stat.
            Err((path, e)) => warn!("Skipping {}: {}", path.display(), e),
        }
    }
    contents.sort_by(|a, b| a.name.cmp(&b.name));

    Ok(contents)
}

async fn stat_entry(
    path: PathBuf,
) -> std::result::Result<FileInfo, (PathBuf, std::io::Error)> {
    let metadata = match fs::metadata(&path).await {
        Ok(metadata) => metadata,
        Err(e) => return Err((path, e)),
    };
    let modified = match metadata.modified() {
        Ok(modified) => modified,
        Err(e) => return Err((path, e)),
    };

    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();

    Ok(FileInfo {
        name,
        is_directory: metadata.is_dir(),
        size: metadata.len(),
        modified_time: DateTime::<Utc>::from(modified),
        path,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_read_folder() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("b.txt"), b"hello").unwrap();
        std::fs::create_dir(dir.path().join("a_dir")).unwrap();

        let contents = read_folder(dir.path()).await.unwrap();
        assert_eq!(contents.len(), 2);

        assert_eq!(contents[0].name, "a_dir");
        assert!(contents[0].is_directory);

        assert_eq!(contents[1].name, "b.txt");
        assert!(!contents[1].is_directory);
        assert_eq!(contents[1].size, 5);
        assert_eq!(contents[1].path, dir.path().join("b.txt"));
    }

    #[tokio::test]
    async fn test_read_missing_folder() {
        let dir = TempDir::new().unwrap();
        let result = read_folder(&dir.path().join("missing")).await;
        assert!(matches!(result, Err(FolioError::Io(_))));
    }

    #[tokio::test]
    async fn test_empty_path_rejected() {
        let result = read_folder(Path::new("")).await;
        assert!(matches!(result, Err(FolioError::InvalidPath(_))));
    }

    #[tokio::test]
    async fn test_file_info_serializes_camel_case() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("x"), b"").unwrap();

        let contents = read_folder(dir.path()).await.unwrap();
        let value = serde_json::to_value(&contents[0]).unwrap();
        assert_eq!(value["isDirectory"], false);
        assert!(value["modifiedTime"].is_string());
    }
}
