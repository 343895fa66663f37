use crate::error::{AppResult, FileError};
use crate::models::catalog::Catalog;
use std::path::{Path, PathBuf};
use tokio::fs;

/// 从 TOML 文件加载目录快照
pub async fn load_catalog(toml_file_path: &Path) -> AppResult<Catalog> {
    let path_str = toml_file_path.display().to_string();

    if !toml_file_path.exists() {
        return Err(FileError::NotFound { path: path_str }.into());
    }

    let content = fs::read_to_string(toml_file_path)
        .await
        .map_err(|source| FileError::ReadFailed {
            path: path_str.clone(),
            source,
        })?;

    let catalog: Catalog = toml::from_str(&content).map_err(|source| FileError::TomlParseFailed {
        path: path_str.clone(),
        source,
    })?;

    Ok(catalog.with_file_path(path_str))
}

/// 加载文件夹中的所有 TOML 快照并合并为一个目录
///
/// 单个文件解析失败只记录警告，不影响其他文件。
pub async fn load_catalog_dir(folder_path: &str) -> AppResult<Catalog> {
    let folder = PathBuf::from(folder_path);

    if !folder.exists() {
        return Err(FileError::NotFound {
            path: folder_path.to_string(),
        }
        .into());
    }

    let mut entries = fs::read_dir(&folder)
        .await
        .map_err(|source| FileError::ReadFailed {
            path: folder_path.to_string(),
            source,
        })?;

    let mut paths = Vec::new();
    while let Some(entry) = entries.next_entry().await.map_err(|source| FileError::ReadFailed {
        path: folder_path.to_string(),
        source,
    })? {
        let path = entry.path();
        if path.extension().and_then(|s| s.to_str()) == Some("toml") {
            paths.push(path);
        }
    }
    // read_dir 顺序不固定，按文件名排序保证合并结果稳定
    paths.sort();

    let mut merged = Catalog::default();
    for path in paths {
        tracing::info!(
            "正在加载: {}",
            path.file_name().unwrap_or_default().to_string_lossy()
        );

        match load_catalog(&path).await {
            Ok(catalog) => {
                tracing::info!("成功加载 {} 条记录", catalog.record_count());
                merged.exams.extend(catalog.exams);
                merged.courses.extend(catalog.courses);
                merged.categories.extend(catalog.categories);
                merged.tests.extend(catalog.tests);
                merged.subscribers.extend(catalog.subscribers);
                merged.enrollments.extend(catalog.enrollments);
            }
            Err(e) => {
                tracing::warn!("加载文件失败 {}: {}", path.display(), e);
            }
        }
    }

    Ok(merged.with_file_path(folder_path.to_string()))
}
